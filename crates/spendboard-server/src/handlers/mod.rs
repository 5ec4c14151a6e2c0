//! HTTP request handlers organized by area
//!
//! Each submodule contains handlers for one part of the dashboard.

pub mod assets;
pub mod dashboard;
pub mod transactions;

// Re-export all handlers for use in router
pub use assets::*;
pub use dashboard::*;
pub use transactions::*;
