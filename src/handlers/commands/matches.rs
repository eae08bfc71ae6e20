//! Match command handlers

use teloxide::prelude::*;
use teloxide::types::Message;
use tracing::debug;

use super::reply_error;
use crate::models::{AttendanceStatus, SurfaceHandle};
use crate::services::{ServiceFactory, UserProfile};
use crate::utils::errors::{MatchdayError, Result};
use crate::utils::render::{match_keyboard, render_card};

fn requester(msg: &Message) -> Result<UserProfile> {
    msg.from()
        .map(UserProfile::from_telegram)
        .ok_or(MatchdayError::InvalidCommand)
}

/// Handle /match <date> <time>: create the match and post its first card.
/// The posted card becomes the match's first registered surface.
pub async fn handle_create(
    bot: &Bot,
    msg: &Message,
    services: &ServiceFactory,
    date: &str,
    time: &str,
) -> Result<()> {
    let user = requester(msg)?;
    debug!(user_id = user.id, chat_id = msg.chat.id.0, "Processing /match command");

    let m = match services
        .matches
        .create_match(user.id, Some(msg.chat.id.0), date, time)
        .await
    {
        Ok(m) => m,
        Err(e) => return reply_error(bot, msg, e).await,
    };

    send_card(bot, msg, services, m.id).await
}

/// Handle /status: render the chat's current match.
pub async fn handle_status(bot: &Bot, msg: &Message, services: &ServiceFactory) -> Result<()> {
    let m = match services.matches.current_for_chat(msg.chat.id.0).await {
        Ok(m) => m,
        Err(e) => return reply_error(bot, msg, e).await,
    };

    send_card(bot, msg, services, m.id).await
}

/// Handle /in, /out and /maybe: set the sender's own attendance on the chat's
/// current match, then fan the new state out to every surface.
pub async fn handle_own_attendance(
    bot: &Bot,
    msg: &Message,
    services: &ServiceFactory,
    status: AttendanceStatus,
) -> Result<()> {
    let user = requester(msg)?;
    let m = match services.matches.current_for_chat(msg.chat.id.0).await {
        Ok(m) => m,
        Err(e) => return reply_error(bot, msg, e).await,
    };

    if let Err(e) = services.matches.set_attendance(m.id, &user, status).await {
        return reply_error(bot, msg, e).await;
    }
    if let Err(e) = services.broadcast.broadcast(m.id, None).await {
        return reply_error(bot, msg, e).await;
    }
    Ok(())
}

/// Handle /add and /remove: `<match id> <name...>` for an external player.
pub async fn handle_external(
    bot: &Bot,
    msg: &Message,
    services: &ServiceFactory,
    args: &str,
    add: bool,
) -> Result<()> {
    let user = requester(msg)?;

    let mut parts = args.split_whitespace();
    let match_id: i64 = match parts.next().and_then(|id| id.parse().ok()) {
        Some(id) => id,
        None => return reply_error(bot, msg, MatchdayError::InvalidCommand).await,
    };
    let name = parts.collect::<Vec<_>>().join(" ");

    // Visibility first: outsiders get the same not-found as a missing match.
    let m = match services.matches.find_visible(match_id, user.id).await {
        Ok(m) => m,
        Err(e) => return reply_error(bot, msg, e).await,
    };

    let outcome = if add {
        services.matches.add_external(m.id, &name).await
    } else {
        services.matches.remove_external(m.id, &name).await
    };
    let normalized = match outcome {
        Ok(name) => name,
        Err(e) => return reply_error(bot, msg, e).await,
    };

    if let Err(e) = services.broadcast.broadcast(m.id, None).await {
        return reply_error(bot, msg, e).await;
    }
    let confirmation = if add {
        format!("Added {normalized} to match #{}", m.id)
    } else {
        format!("Removed {normalized} from match #{}", m.id)
    };
    bot.send_message(msg.chat.id, confirmation).await?;
    Ok(())
}

/// Post a fresh card for the match into the chat and register the sent
/// message as one of the match's surfaces.
async fn send_card(
    bot: &Bot,
    msg: &Message,
    services: &ServiceFactory,
    match_id: i64,
) -> Result<()> {
    let m = services.matches.get_match(match_id).await?;
    let summary = services.matches.summary(&m).await?;

    let sent = bot
        .send_message(msg.chat.id, render_card(&summary))
        .reply_markup(match_keyboard(m.id))
        .await?;

    services
        .broadcast
        .register_surface(
            m.id,
            &SurfaceHandle::ChatMessage {
                chat_id: sent.chat.id.0,
                message_id: sent.id.0,
            },
        )
        .await
}
