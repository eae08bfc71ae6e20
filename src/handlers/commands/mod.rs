//! Command message handlers

pub mod help;
pub mod matches;

use teloxide::prelude::*;
use teloxide::types::Message;
use teloxide::utils::command::{BotCommands, ParseError};
use tracing::debug;

use crate::services::ServiceFactory;
use crate::utils::errors::{MatchdayError, Result};

#[derive(BotCommands, Clone, Debug)]
#[command(rename_rule = "lowercase", description = "Matchday Bot Commands")]
pub enum Command {
    #[command(description = "Start the bot")]
    Start,
    #[command(description = "Show help information")]
    Help,
    #[command(description = "Create a new match: /match <date> <time>", parse_with = "split")]
    Match { date: String, time: String },
    #[command(description = "Show the current match for this chat")]
    Status,
    #[command(description = "Join the current match")]
    In,
    #[command(description = "Leave the current match")]
    Out,
    #[command(description = "Not sure about the current match")]
    Maybe,
    #[command(description = "Add an external player: /add <match> <name>")]
    Add(String),
    #[command(description = "Remove an external player: /remove <match> <name>")]
    Remove(String),
}

/// Route one inbound chat message. Non-command text is ignored.
pub async fn handle_message(
    bot: &Bot,
    msg: Message,
    services: &ServiceFactory,
    bot_username: &str,
) -> Result<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    if !text.starts_with('/') {
        debug!(chat_id = msg.chat.id.0, "Ignoring non-command message");
        return Ok(());
    }

    match Command::parse(text, bot_username) {
        Ok(command) => dispatch_command(bot, &msg, command, services).await,
        Err(ParseError::UnknownCommand(_)) => {
            bot.send_message(msg.chat.id, MatchdayError::InvalidCommand.user_message())
                .await?;
            Ok(())
        }
        Err(_) => {
            // A known command with bad arguments; only /match takes several.
            bot.send_message(msg.chat.id, "Please specify a Date and a Time")
                .await?;
            Ok(())
        }
    }
}

async fn dispatch_command(
    bot: &Bot,
    msg: &Message,
    command: Command,
    services: &ServiceFactory,
) -> Result<()> {
    match command {
        Command::Start | Command::Help => help::handle_help(bot, msg).await,
        Command::Match { date, time } => {
            matches::handle_create(bot, msg, services, &date, &time).await
        }
        Command::Status => matches::handle_status(bot, msg, services).await,
        Command::In => {
            matches::handle_own_attendance(bot, msg, services, crate::models::AttendanceStatus::In)
                .await
        }
        Command::Out => {
            matches::handle_own_attendance(bot, msg, services, crate::models::AttendanceStatus::Out)
                .await
        }
        Command::Maybe => {
            matches::handle_own_attendance(
                bot,
                msg,
                services,
                crate::models::AttendanceStatus::Maybe,
            )
            .await
        }
        Command::Add(args) => matches::handle_external(bot, msg, services, &args, true).await,
        Command::Remove(args) => matches::handle_external(bot, msg, services, &args, false).await,
    }
}

/// Report a failed operation to the requester following the error taxonomy:
/// validation and not-found errors map to their reply text, internal errors
/// are logged here and reported generically.
pub(crate) async fn reply_error(bot: &Bot, msg: &Message, err: MatchdayError) -> Result<()> {
    if !err.is_validation() {
        tracing::warn!(chat_id = msg.chat.id.0, error = %err, "Command failed");
    }
    bot.send_message(msg.chat.id, err.user_message()).await?;
    Ok(())
}
