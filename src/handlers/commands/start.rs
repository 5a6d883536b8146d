//! Start command handler

use teloxide::{prelude::*, types::Message, Bot};
use tracing::info;

use crate::handlers::sender_id;
use crate::utils::errors::Result;

/// Greeting shared by /start and /help
pub fn welcome_text() -> &'static str {
    "👋 Hi! I'm a math coach. I don't hand out answers; I lead you to the solution step by step.\n\n\
     Send me a problem, for example:\n\
     • 2x + 5 = 17\n\
     • 2/3 + 3/4\n\
     • x^2 - 5x + 6 = 0\n\
     • 3:4 = 6:y\n\n\
     Commands:\n\
     /new - start a new problem\n\
     /hint - get a hint for the current step\n\
     /giveup - show the solution plan\n\
     /topics - list supported problem types\n\
     /help - show this message"
}

/// Handle /start command
pub async fn handle_start(bot: Bot, msg: Message) -> Result<()> {
    info!(user_id = ?sender_id(&msg), chat_id = msg.chat.id.0, "User started the bot");
    bot.send_message(msg.chat.id, welcome_text()).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_welcome_lists_every_command() {
        for command in ["/new", "/hint", "/giveup", "/topics", "/help"] {
            assert!(welcome_text().contains(command), "missing {}", command);
        }
    }
}
