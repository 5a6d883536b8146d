//! Session command handlers: /new, /hint, /giveup

use std::sync::Arc;
use teloxide::{prelude::*, types::Message, Bot};
use tracing::debug;

use crate::handlers::sender_id;
use crate::services::TutorService;
use crate::utils::errors::{CoachError, Result};

fn require_sender(msg: &Message) -> Result<i64> {
    sender_id(msg).ok_or_else(|| CoachError::InvalidInput("No user in message".to_string()))
}

/// Handle /new command
pub async fn handle_new(bot: Bot, msg: Message, tutor: Arc<TutorService>) -> Result<()> {
    let user_id = require_sender(&msg)?;
    let reply = tutor.reset_session(user_id);
    bot.send_message(msg.chat.id, reply).await?;
    Ok(())
}

/// Handle /hint command
pub async fn handle_hint(bot: Bot, msg: Message, tutor: Arc<TutorService>) -> Result<()> {
    let user_id = require_sender(&msg)?;
    debug!(user_id = user_id, "Hint requested");
    let reply = tutor.request_hint(user_id);
    bot.send_message(msg.chat.id, reply).await?;
    Ok(())
}

/// Handle /giveup command
pub async fn handle_giveup(bot: Bot, msg: Message, tutor: Arc<TutorService>) -> Result<()> {
    let user_id = require_sender(&msg)?;
    let reply = tutor.request_plan(user_id);
    bot.send_message(msg.chat.id, reply).await?;
    Ok(())
}
