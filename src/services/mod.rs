//! Services module
//!
//! This module contains the tutoring business logic

pub mod classifier;
pub mod tutor;

// Re-export commonly used services
pub use classifier::{classify, Candidate};
pub use tutor::{TutorService, FAILURE_REPLY};
