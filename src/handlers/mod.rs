//! Bot handlers module
//!
//! This module contains all Telegram bot handlers organized by type:
//! - Command handlers for bot commands
//! - Message handlers for free-text problems and answers

pub mod commands;
pub mod messages;

use teloxide::{prelude::*, types::{ChatId, Message}, Bot};
use tracing::{error, warn};

use crate::services::FAILURE_REPLY;
use crate::utils::errors::{CoachError, Result};

// Re-export commonly used handler functions
pub use commands::{handle_command, Command};
pub use messages::handle_message;

/// Send each reply as its own message, preserving order
pub async fn send_replies(bot: &Bot, chat_id: ChatId, replies: &[String]) -> Result<()> {
    for reply in replies {
        bot.send_message(chat_id, reply.as_str()).await?;
    }
    Ok(())
}

/// Tell the learner an internal failure happened; their state is unchanged
pub async fn send_failure_reply(bot: &Bot, chat_id: ChatId, cause: &CoachError) {
    if cause.is_recoverable() {
        warn!(chat_id = chat_id.0, error = %cause, severity = %cause.severity(), "Handler failed");
    } else {
        error!(chat_id = chat_id.0, error = %cause, severity = %cause.severity(), "Handler failed");
    }
    if let Err(e) = bot.send_message(chat_id, FAILURE_REPLY).await {
        error!(chat_id = chat_id.0, error = %e, "Failed to send failure reply");
    }
}

/// Stable user id of the message sender, if any
pub(crate) fn sender_id(msg: &Message) -> Option<i64> {
    msg.from.as_ref().map(|user| user.id.0 as i64)
}
