//! Check command - compiles the configured patterns and lists them.

use std::io::Write;

use serde::Serialize;
use sift_core::prelude::*;

use crate::setup::{Settings, build_engine, describe_sources};
use crate::ui::{colors, indicators, pluralise_word, print_command_header, print_warning};
use crate::{CONFIG_FILENAME, CheckArgs, OutputFormat};

#[derive(Debug, Serialize)]
struct JsonPattern<'a> {
    id: usize,
    source: &'a str,
}

/// Executes the `sift check` command.
///
/// Compilation errors propagate and exit with the error code; an empty
/// configuration only warns.
pub fn run(args: &CheckArgs) -> super::Result {
    let settings = Settings::load(&args.patterns)?;
    let (engine, _notifier) = build_engine(&settings.patterns)?;
    let sources = engine.pattern_sources();

    let mut stdout = std::io::stdout().lock();

    match args.format {
        OutputFormat::Json => write_json(&sources, &mut stdout),
        OutputFormat::Text => {
            print_command_header("check");

            if sources.is_empty() {
                print_warning(&format!(
                    "no patterns configured; pass --pattern or --pattern-file, or set [patterns] in {CONFIG_FILENAME}"
                ));
                return Ok(());
            }

            write_text(&sources, &describe_sources(&settings.patterns), &mut stdout)
        }
    }
}

fn write_json(sources: &[std::sync::Arc<str>], writer: &mut dyn Write) -> anyhow::Result<()> {
    let patterns: Vec<JsonPattern> = sources
        .iter()
        .enumerate()
        .map(|(id, source)| JsonPattern { id, source })
        .collect();

    serde_json::to_writer_pretty(&mut *writer, &patterns)?;
    writeln!(writer)?;
    Ok(())
}

fn write_text(sources: &[std::sync::Arc<str>], origin: &str, writer: &mut dyn Write) -> anyhow::Result<()> {
    for (idx, source) in sources.iter().enumerate() {
        writeln!(
            writer,
            "  {} {}",
            colors::muted().apply_to(PatternId::new(idx)),
            colors::accent().apply_to(source)
        )?;
    }

    writeln!(writer)?;
    writeln!(
        writer,
        "{} {} {} {} {}",
        colors::success().apply_to(indicators::SUCCESS),
        colors::success().apply_to(format!(
            "{} {} compiled",
            sources.len(),
            pluralise_word(sources.len(), "pattern", "patterns")
        )),
        colors::muted().apply_to("·"),
        colors::muted().apply_to("from"),
        colors::secondary().apply_to(origin),
    )?;

    Ok(())
}
