//! Logging middleware
//!
//! Tracks incoming learner messages and commands without touching
//! tutoring state.

use std::time::Instant;
use teloxide::types::Message;
use tracing::{debug, info, instrument, warn, Span};

/// Logging middleware for bot interactions
#[derive(Debug, Clone)]
pub struct LoggingMiddleware {
    log_user_interactions: bool,
    log_performance: bool,
}

impl LoggingMiddleware {
    /// Create a new LoggingMiddleware instance
    pub fn new(log_user_interactions: bool, log_performance: bool) -> Self {
        Self {
            log_user_interactions,
            log_performance,
        }
    }

    /// Log an incoming message
    #[instrument(skip(self, message))]
    pub fn log_message(&self, message: &Message) {
        if !self.log_user_interactions {
            return;
        }

        let user_id = message.from.as_ref().map(|user| user.id.0);
        match message.text() {
            Some(text) => {
                debug!(user_id = user_id, chat_id = message.chat.id.0, text = %text, "Text message received");
                info!(
                    user_id = user_id,
                    chat_id = message.chat.id.0,
                    message_id = message.id.0,
                    length = text.chars().count(),
                    "Message processed"
                );
            }
            None => {
                debug!(user_id = user_id, chat_id = message.chat.id.0, "Non-text message ignored");
            }
        }
    }

    /// Log a tutoring command
    pub fn log_command(&self, user_id: i64, command: &str) {
        if !self.log_user_interactions {
            return;
        }
        info!(user_id = user_id, command = command, "Command executed");
    }

    /// Start timing an operation; logs on completion when performance logging is on
    pub fn track(&self, operation: &str) -> Option<PerformanceTracker> {
        self.log_performance.then(|| PerformanceTracker::new(operation.to_string()))
    }
}

impl Default for LoggingMiddleware {
    fn default() -> Self {
        Self::new(true, true)
    }
}

/// Performance tracker for measuring operation duration
pub struct PerformanceTracker {
    operation: String,
    start_time: Instant,
    _span: Span,
}

impl PerformanceTracker {
    fn new(operation: String) -> Self {
        let span = tracing::info_span!("performance", operation = %operation);

        Self {
            operation,
            start_time: Instant::now(),
            _span: span,
        }
    }

    /// Complete the performance tracking and log the result
    pub fn complete(self, success: bool) {
        let duration_ms = self.start_time.elapsed().as_millis();

        if success {
            debug!(operation = %self.operation, duration_ms = duration_ms, "Operation completed");
        } else {
            warn!(operation = %self.operation, duration_ms = duration_ms, "Operation failed");
        }

        if duration_ms > 1000 {
            warn!(operation = %self.operation, duration_ms = duration_ms, "Slow operation detected");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_middleware_creation() {
        let middleware = LoggingMiddleware::new(true, false);
        assert!(middleware.log_user_interactions);
        assert!(!middleware.log_performance);
        assert!(middleware.track("handle_text").is_none());
    }

    #[test]
    fn test_performance_tracker() {
        let middleware = LoggingMiddleware::default();
        let tracker = middleware.track("handle_text").expect("tracker");
        std::thread::sleep(std::time::Duration::from_millis(5));
        tracker.complete(true);
    }

    #[test]
    fn test_disabled_interaction_logging_is_silent() {
        let middleware = LoggingMiddleware::new(false, false);
        middleware.log_command(1, "hint");
    }
}
