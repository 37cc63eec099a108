//! CLI command handlers.

/// Pattern validation and listing.
pub mod check;
/// File and directory scanning against the configured patterns.
pub mod scan;

/// Convenience alias for command return types.
pub type Result<T = ()> = anyhow::Result<T>;
