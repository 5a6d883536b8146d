//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the Math Coach application.

use tracing::{info, debug};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use crate::config::LoggingConfig;
use crate::utils::errors::{CoachError, Result};

/// Initialize logging based on configuration.
///
/// The returned guard flushes the file writer on drop and must be held for
/// the lifetime of the process.
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    std::fs::create_dir_all(&config.file_path)?;
    let file_appender = tracing_appender::rolling::daily(&config.file_path, "math_coach.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(non_blocking))
        .try_init()
        .map_err(|e| CoachError::Config(format!("Failed to install tracing subscriber: {}", e)))?;

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log user actions with structured data
pub fn log_user_action(user_id: i64, action: &str, details: Option<&str>) {
    info!(
        user_id = user_id,
        action = action,
        details = details,
        "User action performed"
    );
}

/// Log the start of a tutoring session
pub fn log_session_started(user_id: i64, skill: &str, steps: usize) {
    info!(
        user_id = user_id,
        skill = skill,
        steps = steps,
        "Tutoring session started"
    );
}

/// Log a validator decision for the current step
pub fn log_step_result(user_id: i64, skill: &str, step: usize, validator: &str, accepted: bool) {
    debug!(
        user_id = user_id,
        skill = skill,
        step = step,
        validator = validator,
        accepted = accepted,
        "Step answer checked"
    );
}

/// Log a completed tutoring session
pub fn log_session_finished(user_id: i64, skill: &str, elapsed_secs: i64) {
    info!(
        user_id = user_id,
        skill = skill,
        elapsed_secs = elapsed_secs,
        "Tutoring session finished"
    );
}
