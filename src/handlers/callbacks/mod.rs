//! Callback query handlers module
//!
//! Button presses on a match card carry the compact `{"c","m"}` payload. The
//! pressed surface is the broadcast origin: it is updated directly and skipped
//! in the fan-out.

use teloxide::prelude::*;
use teloxide::types::CallbackQuery;
use tracing::{debug, warn};

use crate::models::{AttendanceStatus, CallbackCommand, CallbackData, SurfaceHandle};
use crate::services::{ServiceFactory, UserProfile};
use crate::utils::errors::Result;

/// Handle one button press: mutate (unless refresh), broadcast, acknowledge.
pub async fn handle_callback_query(
    bot: &Bot,
    query: CallbackQuery,
    services: &ServiceFactory,
) -> Result<()> {
    let user = UserProfile::from_telegram(&query.from);
    debug!(user_id = user.id, callback_data = ?query.data, "Processing callback query");

    let payload = query.data.as_deref().and_then(CallbackData::decode);
    let Some(payload) = payload else {
        warn!(callback_data = ?query.data, "Unknown callback payload");
        bot.answer_callback_query(query.id).await?;
        return Ok(());
    };

    // Callbacks resolve by id alone: holding the button means the card was
    // shared with this user.
    let m = match services.matches.get_match(payload.match_id).await {
        Ok(m) => m,
        Err(e) => {
            bot.answer_callback_query(query.id)
                .text(e.user_message())
                .await?;
            return Ok(());
        }
    };

    let ack = match payload.command {
        CallbackCommand::In | CallbackCommand::Maybe | CallbackCommand::Out => {
            let status = match payload.command {
                CallbackCommand::In => AttendanceStatus::In,
                CallbackCommand::Maybe => AttendanceStatus::Maybe,
                _ => AttendanceStatus::Out,
            };
            match services.matches.set_attendance(m.id, &user, status).await {
                Ok(()) => match status {
                    AttendanceStatus::In => "You're in!",
                    AttendanceStatus::Maybe => "Maybe then!",
                    AttendanceStatus::Out => "Too bad!",
                },
                Err(e) => {
                    warn!(match_id = m.id, error = %e, "Failed to update attendance");
                    "Failed to update attendance!"
                }
            }
        }
        CallbackCommand::Refresh => "Refreshed!",
    };

    // The button press must always be acknowledged, even when the fan-out
    // fails: a store failure here maps to the generic toast, never a spinner.
    let ack = match services
        .broadcast
        .broadcast(m.id, origin_surface(&query).as_ref())
        .await
    {
        Ok(()) => ack.to_string(),
        Err(e) => {
            warn!(match_id = m.id, error = %e, "Broadcast failed");
            e.user_message()
        }
    };

    bot.answer_callback_query(query.id).text(ack).await?;
    Ok(())
}

/// The surface the pressed button lives on: the inline message when the card
/// was shared, otherwise the chat message carrying the keyboard.
fn origin_surface(query: &CallbackQuery) -> Option<SurfaceHandle> {
    use teloxide::types::MaybeInaccessibleMessage;

    if let Some(inline_message_id) = &query.inline_message_id {
        return Some(SurfaceHandle::Inline {
            inline_message_id: inline_message_id.clone(),
        });
    }
    match &query.message {
        Some(MaybeInaccessibleMessage::Regular(message)) => Some(SurfaceHandle::ChatMessage {
            chat_id: message.chat.id.0,
            message_id: message.id.0,
        }),
        Some(MaybeInaccessibleMessage::Inaccessible(message)) => {
            Some(SurfaceHandle::ChatMessage {
                chat_id: message.chat.id.0,
                message_id: message.message_id.0,
            })
        }
        None => None,
    }
}
