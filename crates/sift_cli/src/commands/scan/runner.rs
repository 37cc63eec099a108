//! File collection and parallel inspection.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use sift_core::prelude::*;
#[cfg(feature = "tracing")]
use tracing::{debug, trace};

use crate::ScanArgs;
use crate::files::{collect_files, read_text_file};
use crate::setup::Settings;
use crate::ui::{colors, create_file_progress, indicators};

/// Counts of files read and files dropped during a scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Files read as text and handed to the engine.
    pub inspected: usize,
    /// Files skipped as unreadable, binary, non-UTF-8, or oversize.
    pub skipped: usize,
}

/// Collects files to scan from the given paths, honouring both config and
/// command-line exclusions. The settings file and pattern file are never
/// scanned.
pub fn collect_scan_files(args: &ScanArgs, settings: &Settings) -> anyhow::Result<Vec<PathBuf>> {
    let all_excludes: Vec<String> = settings
        .config
        .exclude_paths
        .iter()
        .chain(args.exclude.iter())
        .cloned()
        .collect();

    let mut files = collect_files(&args.paths, &all_excludes, !args.skip_gitignore)?;

    let own: Vec<PathBuf> = [Some(settings.config_path.as_path()), settings.patterns.file_path()]
        .into_iter()
        .flatten()
        .filter_map(|p| p.canonicalize().ok())
        .collect();
    if !own.is_empty() {
        files.retain(|f| f.canonicalize().ok().is_none_or(|c| !own.contains(&c)));
    }

    #[cfg(feature = "tracing")]
    debug!(files = files.len(), excludes = all_excludes.len(), "collected files");

    Ok(files)
}

/// Inspects every file in parallel. A file's index in `files` is its
/// evidence id and its path is the source location.
#[must_use]
pub fn run_scan(engine: &Engine, files: &[PathBuf], max_file_size: Option<u64>, show_progress: bool) -> RunSummary {
    let inspected = if show_progress {
        let pb = create_file_progress(files.len());

        let inspected = files
            .par_iter()
            .enumerate()
            .filter(|&(idx, path)| {
                let read = inspect_file(engine, idx, path, max_file_size);
                pb.inc(1);
                read
            })
            .count();

        pb.finish_and_clear();
        inspected
    } else {
        files
            .par_iter()
            .enumerate()
            .filter(|&(idx, path)| inspect_file(engine, idx, path, max_file_size))
            .count()
    };

    RunSummary {
        inspected,
        skipped: files.len() - inspected,
    }
}

/// Prints a message when no files are available to scan.
pub fn print_no_files() {
    println!("{} no files to scan", colors::warning().apply_to(indicators::MATCH));
    println!();
    println!("  Check your .gitignore or exclude patterns.");
    println!();
}

fn inspect_file(engine: &Engine, idx: usize, path: &Path, max_file_size: Option<u64>) -> bool {
    let Some(content) = read_text_file(path, max_file_size) else {
        #[cfg(feature = "tracing")]
        trace!(path = %path.display(), "skipped");
        return false;
    };

    let location = SourceLocation::from(path.display().to_string());
    engine.inspect(&content, EvidenceId::new(idx as u64), &location);
    true
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::setup::build_engine;

    #[test]
    fn run_scan_uses_file_index_as_evidence_id() {
        let dir = TempDir::new().unwrap();
        let files: Vec<PathBuf> = ["a.txt", "b.txt", "c.txt"]
            .iter()
            .map(|name| dir.path().join(name))
            .collect();
        fs::write(&files[0], "token=abc").unwrap();
        fs::write(&files[1], "nothing").unwrap();
        fs::write(&files[2], "TOKEN=def").unwrap();

        let (engine, _notifier) = build_engine(&PatternConfig::new(Some("token=\\w+"), None)).unwrap();
        let summary = run_scan(&engine, &files, None, false);

        assert_eq!(summary, RunSummary { inspected: 3, skipped: 0 });

        let findings = engine.findings();
        assert_eq!(findings.len(), 1);
        let mut ids: Vec<u64> = findings[0].evidence_ids.iter().map(|id| id.get()).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![0, 2]);
    }

    #[test]
    fn run_scan_counts_skipped_files() {
        let dir = TempDir::new().unwrap();
        let text = dir.path().join("page.html");
        let binary = dir.path().join("blob");
        let missing = dir.path().join("missing.txt");
        fs::write(&text, "hello").unwrap();
        fs::write(&binary, b"\x00\x01hello").unwrap();

        let (engine, _notifier) = build_engine(&PatternConfig::new(Some("hello"), None)).unwrap();
        let summary = run_scan(&engine, &[text.clone(), binary, missing], None, false);

        assert_eq!(summary, RunSummary { inspected: 1, skipped: 2 });
        assert_eq!(engine.findings()[0].source_location.as_str(), text.display().to_string());
    }
}
