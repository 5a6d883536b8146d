//! Message handlers module
//!
//! Handles free-text messages: the first one becomes a problem statement,
//! later ones are answers to the current step.

use std::sync::Arc;
use teloxide::{types::Message, Bot};
use tracing::debug;

use crate::handlers::{send_replies, sender_id};
use crate::services::TutorService;
use crate::utils::errors::Result;

/// Handle incoming text messages
pub async fn handle_message(bot: Bot, msg: Message, tutor: Arc<TutorService>) -> Result<()> {
    let (Some(user_id), Some(text)) = (sender_id(&msg), msg.text()) else {
        debug!(chat_id = msg.chat.id.0, "Ignoring message without sender or text");
        return Ok(());
    };

    let replies = tutor.handle_text(user_id, text)?;
    send_replies(&bot, msg.chat.id, &replies).await
}
