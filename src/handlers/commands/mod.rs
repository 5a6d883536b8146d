//! Command handlers module
//!
//! This module contains handlers for all bot commands like /start, /hint, etc.

pub mod help;
pub mod start;
pub mod tutor;

use std::sync::Arc;
use teloxide::{types::Message, utils::command::BotCommands, Bot};
use tracing::debug;

use crate::services::TutorService;
use crate::utils::errors::Result;

/// All available bot commands
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Math coach commands:")]
pub enum Command {
    #[command(description = "Show the welcome message")]
    Start,
    #[command(description = "Show help information")]
    Help,
    #[command(description = "Drop the current problem and start a new one")]
    New,
    #[command(description = "Get a hint for the current step")]
    Hint,
    #[command(description = "Show the solution plan")]
    Giveup,
    #[command(description = "List supported problem types")]
    Topics,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Start => "start",
            Command::Help => "help",
            Command::New => "new",
            Command::Hint => "hint",
            Command::Giveup => "giveup",
            Command::Topics => "topics",
        }
    }
}

/// Main command dispatcher
pub async fn handle_command(bot: Bot, msg: Message, cmd: Command, tutor: Arc<TutorService>) -> Result<()> {
    debug!(chat_id = msg.chat.id.0, command = cmd.name(), "Dispatching command");
    match cmd {
        Command::Start => start::handle_start(bot, msg).await,
        Command::Help => help::handle_help(bot, msg).await,
        Command::New => tutor::handle_new(bot, msg, tutor).await,
        Command::Hint => tutor::handle_hint(bot, msg, tutor).await,
        Command::Giveup => tutor::handle_giveup(bot, msg, tutor).await,
        Command::Topics => help::handle_topics(bot, msg, tutor).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("/hint", "coach_bot").ok(), Some(Command::Hint));
        assert_eq!(Command::parse("/giveup", "coach_bot").ok(), Some(Command::Giveup));
        assert_eq!(Command::parse("/new@coach_bot", "coach_bot").ok(), Some(Command::New));
        assert!(Command::parse("/unknown", "coach_bot").is_err());
    }

    #[test]
    fn test_descriptions_list_every_command() {
        let descriptions = Command::descriptions().to_string();
        for name in ["start", "help", "new", "hint", "giveup", "topics"] {
            assert!(descriptions.contains(&format!("/{}", name)), "missing /{}", name);
        }
    }
}
