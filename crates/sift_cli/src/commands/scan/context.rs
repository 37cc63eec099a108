//! Scan context - settings and engine construction.

use std::path::PathBuf;
use std::sync::Arc;

use sift_core::prelude::*;

use crate::setup::{Settings, build_engine};
use crate::ui::{colors, format_file_size};
use crate::{CONFIG_FILENAME, ScanArgs};

/// Loaded settings and a configured engine for a scan run.
#[derive(Debug)]
pub struct ScanContext {
    /// Settings file merged with command-line overrides.
    pub settings: Settings,
    /// Engine holding the compiled patterns.
    pub engine: Engine,
    /// Creation notices emitted while scanning.
    pub notifier: Arc<CollectingNotifier>,
}

impl ScanContext {
    /// Loads settings and compiles the pattern sources they name.
    ///
    /// Fails if the sources do not compile or yield no patterns at all.
    pub fn load(args: &ScanArgs) -> anyhow::Result<Self> {
        let settings = Settings::load(&args.patterns)?;
        let (engine, notifier) = build_engine(&settings.patterns)?;

        if !engine.is_configured() {
            anyhow::bail!(
                "no patterns configured; pass --pattern or --pattern-file, or set [patterns] in {CONFIG_FILENAME}"
            );
        }

        Ok(Self {
            settings,
            engine,
            notifier,
        })
    }
}

/// Data collected for verbose output display.
#[derive(Debug)]
pub struct VerboseInfo {
    /// Path to the configuration file.
    pub config_path: PathBuf,
    /// Which pattern sources are set.
    pub sources: String,
    /// Number of compiled patterns.
    pub pattern_count: usize,
    /// Number of files to scan.
    pub file_count: usize,
    /// Active exclude glob patterns.
    pub excludes: Vec<String>,
    /// Paths being scanned.
    pub paths: Vec<PathBuf>,
    /// Maximum file size limit in bytes.
    pub max_file_size: Option<u64>,
}

/// Prints verbose scan context to the terminal.
pub fn print_verbose_context(info: &VerboseInfo, level: u8) {
    let context_line = format!(
        "{} · {} · {} patterns · {} files",
        info.config_path.display(),
        info.sources,
        info.pattern_count,
        info.file_count
    );

    println!("{}", colors::muted().apply_to(&context_line));

    if level >= 2 {
        print_verbose_details(info);
    }

    println!();
}

fn print_verbose_details(info: &VerboseInfo) {
    if !info.excludes.is_empty() {
        println!(
            "  {}",
            colors::muted().apply_to(format!("exclude {}", info.excludes.join(" ")))
        );
    }

    if let Some(max_size) = info.max_file_size {
        println!(
            "  {}",
            colors::muted().apply_to(format!("max {}", format_file_size(max_size)))
        );
    }

    let paths: Vec<_> = info.paths.iter().map(|p| p.display().to_string()).collect();
    println!("  {}", colors::muted().apply_to(format!("paths {}", paths.join(" "))));
}
