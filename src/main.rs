//! Matchday Telegram Bot
//!
//! Main application entry point

use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::Update;
use teloxide::dispatching::UpdateFilterExt;
use tracing::{info, warn};

use matchday::{
    config::Settings,
    database::{connection, DatabaseService, MatchStore},
    dispatch::{DispatchQueues, InboundEvent},
    services::{ServiceFactory, TelegramTransport},
    utils::logging,
};

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging
    logging::init_logging(&settings.logging)?;

    info!("Starting Matchday Telegram Bot...");

    // Initialize database connection
    info!("Connecting to database...");
    let pool_config = connection::PoolConfig {
        url: settings.database.url.clone(),
        max_connections: settings.database.max_connections,
        min_connections: settings.database.min_connections,
        acquire_timeout: std::time::Duration::from_secs(30),
    };
    let pool = connection::create_pool(&pool_config).await?;

    // Run database migrations
    connection::run_migrations(&pool).await?;

    // Initialize bot and services
    let bot = Bot::new(&settings.bot.token);
    let store: Arc<dyn MatchStore> = Arc::new(DatabaseService::new(pool));
    let transport = Arc::new(TelegramTransport::new(bot.clone()));
    let services = ServiceFactory::new(store, transport);

    let me = bot.get_me().await?;
    let bot_username = me.username().to_string();
    info!(bot_username = %bot_username, "Bot identity resolved");

    // One bounded queue and worker per inbound event kind
    let queues = Arc::new(DispatchQueues::spawn(
        bot.clone(),
        services,
        bot_username,
        settings.dispatch.queue_capacity,
    ));

    info!("Matchday bot is ready!");

    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint(enqueue_message))
        .branch(Update::filter_inline_query().endpoint(enqueue_inline_query))
        .branch(Update::filter_chosen_inline_result().endpoint(enqueue_chosen_result))
        .branch(Update::filter_callback_query().endpoint(enqueue_callback_query));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![queues])
        .default_handler(|upd| async move {
            warn!("Unhandled update: {:?}", upd);
        })
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    info!("Matchday bot has been shut down.");

    Ok(())
}

async fn enqueue_message(msg: Message, queues: Arc<DispatchQueues>) -> HandlerResult {
    queues.enqueue(InboundEvent::CommandMessage(msg)).await;
    Ok(())
}

async fn enqueue_inline_query(
    query: teloxide::types::InlineQuery,
    queues: Arc<DispatchQueues>,
) -> HandlerResult {
    queues.enqueue(InboundEvent::InlineLookup(query)).await;
    Ok(())
}

async fn enqueue_chosen_result(
    result: teloxide::types::ChosenInlineResult,
    queues: Arc<DispatchQueues>,
) -> HandlerResult {
    queues.enqueue(InboundEvent::ChosenResult(result)).await;
    Ok(())
}

async fn enqueue_callback_query(
    query: teloxide::types::CallbackQuery,
    queues: Arc<DispatchQueues>,
) -> HandlerResult {
    queues.enqueue(InboundEvent::ButtonCallback(query)).await;
    Ok(())
}
