//! Scan command - matches files against the configured patterns.

mod context;
mod output;
mod runner;

use std::time::Instant;

use sift_core::prelude::*;

use self::context::{ScanContext, VerboseInfo};
use self::output::{OutputContext, ScanStats, write_output};
use self::runner::{collect_scan_files, run_scan};
use crate::setup::{configure_thread_pool, describe_sources};
use crate::ui::{exit, print_command_header};
use crate::{OutputFormat, ScanArgs};

/// Executes the `sift scan` command.
pub fn run(args: &ScanArgs) -> super::Result {
    configure_thread_pool(args.concurrency)?;

    let show_progress = should_show_progress(args);
    let start = Instant::now();

    if show_progress {
        print_command_header("scan");
    }

    let context = ScanContext::load(args)?;
    let files = collect_scan_files(args, &context.settings)?;
    let max_file_size = args.max_file_size.or(context.settings.config.max_file_size);

    if show_progress && args.verbose > 0 {
        let info = VerboseInfo {
            config_path: context.settings.config_path.clone(),
            sources: describe_sources(&context.settings.patterns),
            pattern_count: context.engine.pattern_count(),
            file_count: files.len(),
            excludes: context.settings.config.exclude_paths.clone(),
            paths: args.paths.clone(),
            max_file_size,
        };
        context::print_verbose_context(&info, args.verbose);
    }

    if files.is_empty() && show_progress {
        runner::print_no_files();
        return Ok(());
    }

    let summary = run_scan(&context.engine, &files, max_file_size, show_progress);
    let findings = context.engine.findings();
    let notices = context.notifier.messages();

    let stats = ScanStats {
        file_count: files.len(),
        inspected: summary.inspected,
        skipped: summary.skipped,
        pattern_count: context.engine.pattern_count(),
        elapsed: start.elapsed(),
    };

    let ctx = OutputContext {
        findings: &findings,
        files: &files,
        notices: &notices,
        stats,
    };

    write_output(args, &ctx)?;

    handle_exit_code(args, &findings);

    Ok(())
}

const fn should_show_progress(args: &ScanArgs) -> bool {
    args.output.is_none() && matches!(args.format, OutputFormat::Text)
}

fn handle_exit_code(args: &ScanArgs, findings: &[FindingSnapshot]) {
    if !args.exit_zero && !findings.is_empty() {
        std::process::exit(exit::FINDINGS);
    }
}
