//! Text output formatting for scan results.

use std::io::Write;

use console::style;
use sift_core::prelude::*;

use super::OutputContext;
use crate::ui::{colors, format_duration, indicators, pluralise_word};

/// Renders findings as styled, human-readable text to the given writer.
pub fn write(ctx: &OutputContext, writer: &mut dyn Write, strip_colors: bool, verbose: u8) -> anyhow::Result<()> {
    for finding in ctx.findings {
        write_finding(ctx, finding, writer, strip_colors)?;
    }

    if verbose > 0 {
        write_notices(ctx.notices, writer, strip_colors)?;
    }

    write_summary(ctx, writer, strip_colors, verbose)
}

fn write_finding(
    ctx: &OutputContext,
    finding: &FindingSnapshot,
    writer: &mut dyn Write,
    strip_colors: bool,
) -> anyhow::Result<()> {
    let paths = ctx.evidence_paths(finding);
    let evidence = finding.evidence_ids.len();

    write_line(
        writer,
        format_args!(
            "{} {} {} {}",
            colors::warning().apply_to(indicators::MATCH),
            style(&finding.name).bold(),
            colors::muted().apply_to("·"),
            colors::secondary().apply_to(format!(
                "{evidence} {}",
                pluralise_word(evidence, "match", "matches")
            )),
        ),
        strip_colors,
    )?;

    write_line(
        writer,
        format_args!("  {}", colors::accent().apply_to(&finding.source_location)),
        strip_colors,
    )?;

    for line in finding.description.lines().filter(|l| !l.is_empty()) {
        write_line(writer, format_args!("  {}", colors::muted().apply_to(line)), strip_colors)?;
    }

    let others: Vec<_> = paths
        .iter()
        .filter(|p| p.display().to_string() != finding.source_location.as_str())
        .collect();

    if !others.is_empty() {
        write_line(
            writer,
            format_args!("  {}", colors::secondary().apply_to("also matched in")),
            strip_colors,
        )?;
        for path in others {
            write_line(
                writer,
                format_args!("    {}", colors::secondary().apply_to(path.display())),
                strip_colors,
            )?;
        }
    }

    writeln!(writer)?;
    Ok(())
}

fn write_notices(notices: &[String], writer: &mut dyn Write, strip_colors: bool) -> anyhow::Result<()> {
    if notices.is_empty() {
        return Ok(());
    }

    for notice in notices {
        write_line(
            writer,
            format_args!(
                "{} {}",
                colors::info().apply_to(indicators::INFO),
                colors::muted().apply_to(notice)
            ),
            strip_colors,
        )?;
    }

    writeln!(writer)?;
    Ok(())
}

fn write_summary(ctx: &OutputContext, writer: &mut dyn Write, strip_colors: bool, verbose: u8) -> anyhow::Result<()> {
    let stats = &ctx.stats;
    let files = format!("{} {}", stats.inspected, pluralise_word(stats.inspected, "file", "files"));
    let time = format_duration(stats.elapsed);

    if ctx.findings.is_empty() {
        write_line(
            writer,
            format_args!(
                "{} {} {} {} {} {}",
                colors::success().apply_to(indicators::SUCCESS),
                colors::success().apply_to("no matches"),
                colors::muted().apply_to("·"),
                colors::secondary().apply_to(&files),
                colors::muted().apply_to("·"),
                colors::muted().apply_to(&time),
            ),
            strip_colors,
        )?;
    } else {
        let matched = ctx.findings.len();
        write_line(
            writer,
            format_args!(
                "{} {} {} {} {} {} {}",
                colors::error().apply_to(indicators::ERROR),
                colors::error().apply_to(matched),
                colors::secondary().apply_to(format!(
                    "of {} {} matched",
                    stats.pattern_count,
                    pluralise_word(stats.pattern_count, "pattern", "patterns")
                )),
                colors::muted().apply_to("·"),
                colors::secondary().apply_to(&files),
                colors::muted().apply_to("·"),
                colors::muted().apply_to(&time),
            ),
            strip_colors,
        )?;
    }

    if verbose > 0 && stats.skipped > 0 {
        write_line(
            writer,
            format_args!(
                "  {}",
                colors::muted().apply_to(format!(
                    "{} of {} skipped (binary, unreadable, or over size limit)",
                    stats.skipped, stats.file_count
                ))
            ),
            strip_colors,
        )?;
    }

    Ok(())
}

fn write_line(writer: &mut dyn Write, args: std::fmt::Arguments<'_>, strip_colors: bool) -> anyhow::Result<()> {
    if strip_colors {
        let s = args.to_string();
        let stripped = console::strip_ansi_codes(&s);
        writeln!(writer, "{stripped}")?;
    } else {
        writeln!(writer, "{args}")?;
    }
    Ok(())
}
