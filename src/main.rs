//! Math Coach Telegram Bot
//!
//! Main application entry point

use std::sync::Arc;
use teloxide::dispatching::{UpdateFilterExt, UpdateHandler};
use teloxide::{prelude::*, types::Update, utils::command::BotCommands};
use tracing::{info, warn};

use math_coach::{
    config::Settings,
    handlers::{self, Command},
    middleware::LoggingMiddleware,
    services::{tutor, TutorService},
    utils::logging,
};

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging; the guard flushes the file writer on shutdown
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", math_coach::info());

    let bot = Bot::new(&settings.bot.token);
    let tutor_service = Arc::new(TutorService::new());
    let middleware = Arc::new(LoggingMiddleware::default());
    tutor::log_ready(&tutor_service);

    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        warn!(error = %e, "Failed to register bot commands");
    }

    let mut dispatcher = Dispatcher::builder(bot, create_handler())
        .dependencies(dptree::deps![Arc::clone(&tutor_service), middleware])
        .default_handler(|upd| async move {
            warn!("Unhandled update: {:?}", upd.kind);
        })
        .enable_ctrlc_handler()
        .build();

    info!("Starting bot with polling mode...");
    dispatcher.dispatch().await;

    let stats = tutor_service.stats();
    info!(
        known_users = stats.known_users,
        active_sessions = stats.active_sessions,
        "Math coach bot has been shut down."
    );
    Ok(())
}

/// Create the main update handler
fn create_handler() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
    Update::filter_message()
        .branch(
            // Handle commands
            dptree::entry()
                .filter_command::<Command>()
                .endpoint(handle_commands),
        )
        .branch(
            // Handle problems and answers
            dptree::endpoint(handle_messages),
        )
}

/// Handle bot commands
async fn handle_commands(
    bot: Bot,
    msg: Message,
    cmd: Command,
    tutor_service: Arc<TutorService>,
    middleware: Arc<LoggingMiddleware>,
) -> HandlerResult {
    let tracker = middleware.track(cmd.name());
    if let Some(user) = msg.from.as_ref() {
        middleware.log_command(user.id.0 as i64, cmd.name());
    }

    let chat_id = msg.chat.id;
    let result = handlers::handle_command(bot.clone(), msg, cmd, tutor_service).await;
    if let Some(tracker) = tracker {
        tracker.complete(result.is_ok());
    }
    if let Err(e) = result {
        handlers::send_failure_reply(&bot, chat_id, &e).await;
    }

    Ok(())
}

/// Handle regular messages
async fn handle_messages(
    bot: Bot,
    msg: Message,
    tutor_service: Arc<TutorService>,
    middleware: Arc<LoggingMiddleware>,
) -> HandlerResult {
    middleware.log_message(&msg);
    let tracker = middleware.track("handle_text");

    let chat_id = msg.chat.id;
    let result = handlers::handle_message(bot.clone(), msg, tutor_service).await;
    if let Some(tracker) = tracker {
        tracker.complete(result.is_ok());
    }
    if let Err(e) = result {
        handlers::send_failure_reply(&bot, chat_id, &e).await;
    }

    Ok(())
}
