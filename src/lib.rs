//! Math Coach Telegram Bot
//!
//! A Socratic math tutor: instead of answering a problem it walks the learner
//! through a fixed sequence of guiding questions, checking each answer and
//! handing out hints on request. This library provides the skill dialogues,
//! the per-user session store and the Telegram handlers around them.

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod services;
pub mod skills;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{CoachError, Result};

// Re-export main components for easy access
pub use services::TutorService;
pub use skills::SkillRegistry;
pub use state::SessionStore;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
