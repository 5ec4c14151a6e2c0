//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Shared utilities (global inputs, rule loading, pipeline run)
//! - `report` - Terminal pie and bar tables
//! - `rules` - Rule listing and testing
//! - `serve` - Web server command
//! - `snapshot` - Snapshot writing with a summary

pub mod core;
pub mod report;
pub mod rules;
pub mod serve;
pub mod snapshot;

// Re-export command functions for main.rs
pub use self::core::*;
pub use report::*;
pub use rules::*;
pub use serve::*;
pub use snapshot::*;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
