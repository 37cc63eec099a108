//! File collection and reading utilities.
//!
//! Handles walking directories with gitignore support, applying exclude
//! patterns, and reading text files with size limits.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use ignore::WalkBuilder;
use ignore::overrides::{Override, OverrideBuilder};

use crate::binary::{has_binary_extension, looks_binary};

/// Walks the given paths, collecting candidate text files while honouring
/// exclude globs, gitignore rules, and binary-extension filtering.
///
/// The result is sorted and deduplicated so evidence ids derived from a
/// file's position are stable between runs.
pub fn collect_files(paths: &[PathBuf], excludes: &[String], respect_gitignore: bool) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            if !has_binary_extension(path) {
                files.push(path.clone());
            }
            continue;
        }

        let overrides = build_overrides(path, excludes)?;
        let walker = build_walker(path, overrides, respect_gitignore);

        let (tx, rx) = std::sync::mpsc::channel();
        walker.run(|| {
            let tx = tx.clone();
            Box::new(move |result| {
                if let Ok(entry) = result
                    && is_candidate_file(&entry)
                {
                    let _ = tx.send(entry.into_path());
                }
                ignore::WalkState::Continue
            })
        });
        drop(tx);
        files.extend(rx);
    }

    files.sort();
    files.dedup();
    Ok(files)
}

fn is_candidate_file(entry: &ignore::DirEntry) -> bool {
    entry.file_type().is_some_and(|ft| ft.is_file()) && !has_binary_extension(entry.path())
}

/// Files at or above this size are memory-mapped instead of heap-read.
const MMAP_THRESHOLD: u64 = 32 * 1024;

/// Reads a file as UTF-8 text, returning `None` if it exceeds `max_size`,
/// cannot be opened, looks binary, or is not valid UTF-8.
#[must_use]
pub fn read_text_file(path: &Path, max_size: Option<u64>) -> Option<String> {
    let mut file = std::fs::File::open(path).ok()?;
    let len = file.metadata().ok()?.len();

    if max_size.is_some_and(|max| len > max) {
        return None;
    }

    if len >= MMAP_THRESHOLD {
        read_mapped(&file)
    } else {
        read_buffered(&mut file, len)
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "only files below the mmap threshold reach this path"
)]
fn read_buffered(file: &mut std::fs::File, len: u64) -> Option<String> {
    let mut bytes = Vec::with_capacity(len as usize);
    file.read_to_end(&mut bytes).ok()?;
    if looks_binary(&bytes) {
        return None;
    }
    String::from_utf8(bytes).ok()
}

fn read_mapped(file: &std::fs::File) -> Option<String> {
    // SAFETY: The map is read-only and dropped before this function returns.
    // A concurrent truncation could raise SIGBUS, the same exposure any
    // mmap-based reader accepts.
    #[expect(unsafe_code, reason = "mmap requires unsafe; lifetime is scoped to this function")]
    let mmap = unsafe { memmap2::Mmap::map(file) }.ok()?;

    if looks_binary(&mmap) {
        return None;
    }

    std::str::from_utf8(&mmap).ok().map(String::from)
}

fn build_overrides(path: &Path, excludes: &[String]) -> anyhow::Result<Override> {
    let mut builder = OverrideBuilder::new(path);
    builder.add("!.git/").context("failed to exclude .git")?;

    for pattern in excludes {
        builder
            .add(&format!("!{pattern}"))
            .with_context(|| format!("invalid exclude pattern '{pattern}'"))?;
    }

    builder.build().context("failed to build exclude overrides")
}

fn build_walker(path: &Path, overrides: Override, respect_gitignore: bool) -> ignore::WalkParallel {
    WalkBuilder::new(path)
        .hidden(false)
        .git_ignore(respect_gitignore)
        .git_global(respect_gitignore)
        .git_exclude(respect_gitignore)
        .overrides(overrides)
        .build_parallel()
}
