//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Snapshot file access, settings, init and shared argument helpers
//! - `categories` - Category breakdown and management (add, rename, delete)
//! - `dashboard` - Portfolio overview with renewals and budget recommendations
//! - `renewals` - Upcoming renewal listing
//! - `subscriptions` - Subscription commands (list, add, update, delete, preview, export)

pub mod categories;
pub mod core;
pub mod dashboard;
pub mod renewals;
pub mod subscriptions;

// Re-export command functions for main.rs
pub use categories::*;
pub use core::*;
pub use dashboard::*;
pub use renewals::*;
pub use subscriptions::*;

/// Truncate a string to at most `max` characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
