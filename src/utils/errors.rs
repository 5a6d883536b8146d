//! Error handling for Math Coach
//!
//! This module defines the main error type used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for the Math Coach application
#[derive(Error, Debug)]
pub enum CoachError {
    #[error("Telegram API error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration loading error: {0}")]
    ConfigLoad(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid state transition: {from} -> {to}")]
    InvalidStateTransition { from: String, to: String },

    #[error("Scratch record does not belong to skill {skill}")]
    ScratchMismatch { skill: String },

    #[error("No active session for user {user_id}")]
    SessionNotFound { user_id: i64 },
}

/// Result type alias for Math Coach operations
pub type Result<T> = std::result::Result<T, CoachError>;

impl CoachError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            CoachError::Telegram(_) => true,
            CoachError::Config(_) => false,
            CoachError::ConfigLoad(_) => false,
            CoachError::Io(_) => true,
            CoachError::InvalidInput(_) => true,
            CoachError::InvalidStateTransition { .. } => false,
            CoachError::ScratchMismatch { .. } => false,
            CoachError::SessionNotFound { .. } => true,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoachError::Config(_) => ErrorSeverity::Critical,
            CoachError::ConfigLoad(_) => ErrorSeverity::Critical,
            CoachError::InvalidInput(_) => ErrorSeverity::Info,
            CoachError::SessionNotFound { .. } => ErrorSeverity::Info,
            CoachError::Telegram(_) => ErrorSeverity::Warning,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_classification() {
        assert_eq!(CoachError::Config("x".into()).severity(), ErrorSeverity::Critical);
        assert_eq!(CoachError::SessionNotFound { user_id: 1 }.severity(), ErrorSeverity::Info);
        assert_eq!(
            CoachError::ScratchMismatch { skill: "linear_eq".into() }.severity(),
            ErrorSeverity::Error
        );
    }

    #[test]
    fn test_recoverability() {
        assert!(CoachError::InvalidInput("bad".into()).is_recoverable());
        assert!(!CoachError::ScratchMismatch { skill: "frac_add".into() }.is_recoverable());
    }

    #[test]
    fn test_display_messages() {
        let err = CoachError::InvalidStateTransition {
            from: "finished".to_string(),
            to: "advance".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid state transition: finished -> advance");
        assert_eq!(ErrorSeverity::Warning.to_string(), "WARN");
    }
}
