//! State management module
//!
//! This module handles tutoring session state and its per-user storage

pub mod context;
pub mod storage;

// Re-export commonly used state components
pub use context::{
    FractionScratch, LinearScratch, QuadraticScratch, Scratch, SkillScratch, Step, TutorState, Validator,
};
pub use storage::{SessionStore, StorageStats, UserId};
