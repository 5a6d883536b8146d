//! Help and topics command handlers

use std::sync::Arc;
use teloxide::{prelude::*, types::Message, Bot};

use crate::services::TutorService;
use crate::utils::errors::Result;
use super::start::welcome_text;

/// Handle /help command
pub async fn handle_help(bot: Bot, msg: Message) -> Result<()> {
    bot.send_message(msg.chat.id, welcome_text()).await?;
    Ok(())
}

/// Handle /topics command
pub async fn handle_topics(bot: Bot, msg: Message, tutor: Arc<TutorService>) -> Result<()> {
    bot.send_message(msg.chat.id, tutor.list_supported_types()).await?;
    Ok(())
}
