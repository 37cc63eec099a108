//! Settings resolution and engine construction shared by every command.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;
use sift_core::prelude::*;

use crate::{CONFIG_FILENAME, PatternArgs};

/// Settings file contents merged with command-line overrides.
#[derive(Debug)]
pub struct Settings {
    /// Path the settings file was looked up at.
    pub config_path: PathBuf,
    /// Parsed `.sift.toml`, or defaults if it does not exist.
    pub config: Config,
    /// Pattern sources after applying `--pattern` / `--pattern-file`.
    pub patterns: PatternConfig,
}

impl Settings {
    /// Loads `.sift.toml` and lets flags replace its pattern sources
    /// one field at a time.
    pub fn load(args: &PatternArgs) -> anyhow::Result<Self> {
        let config_path = args
            .config
            .clone()
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME));
        let config = Config::load(&config_path).context("loading config")?;

        let patterns = merge_patterns(&config.patterns, args);

        Ok(Self {
            config_path,
            config,
            patterns,
        })
    }
}

fn merge_patterns(from_file: &PatternConfig, args: &PatternArgs) -> PatternConfig {
    PatternConfig {
        inline: args.pattern.clone().or_else(|| from_file.inline.clone()),
        file: args.pattern_file.clone().or_else(|| from_file.file.clone()),
    }
}

/// Builds an engine that discards sink writes and buffers creation notices.
///
/// Results are read back through [`Engine::findings`], which keeps
/// registration order regardless of which worker matched first.
pub fn build_engine(patterns: &PatternConfig) -> anyhow::Result<(Engine, Arc<CollectingNotifier>)> {
    let notifier = Arc::new(CollectingNotifier::new());
    let engine = Engine::new(Arc::new(NullSink), Arc::clone(&notifier) as Arc<dyn Notifier>);

    engine.configure(patterns).context("compiling patterns")?;

    Ok((engine, notifier))
}

/// Summarises which pattern sources are set, for verbose output.
#[must_use]
pub fn describe_sources(patterns: &PatternConfig) -> String {
    match (patterns.inline_source(), patterns.file_path()) {
        (Some(_), Some(file)) => format!("{} + inline", display_path(file)),
        (Some(_), None) => "inline".to_string(),
        (None, Some(file)) => display_path(file),
        (None, None) => "none".to_string(),
    }
}

fn display_path(path: &Path) -> String {
    path.display().to_string()
}

/// Configures the global rayon thread pool with the requested number of
/// threads, if specified.
pub fn configure_thread_pool(concurrency: Option<usize>) -> anyhow::Result<()> {
    if let Some(n) = concurrency {
        rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build_global()
            .context("failed to configure thread pool")?;
    }
    Ok(())
}
