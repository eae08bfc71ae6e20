//! Inline-query protocol handlers
//!
//! An empty query lists the requester's upcoming matches as selectable cards.
//! A `"<id> [name]"` query narrows to one card and, when a name is supplied,
//! offers add/remove suggestions that resolve to the /add and /remove
//! commands. Selecting any card creates a new inline surface, registered via
//! the chosen-result notification.

use teloxide::prelude::*;
use teloxide::types::{
    ChosenInlineResult, InlineQuery, InlineQueryResult, InlineQueryResultArticle,
    InputMessageContent, InputMessageContentText,
};
use tracing::{debug, warn};

use crate::models::{Match, SurfaceHandle};
use crate::services::ServiceFactory;
use crate::utils::errors::{MatchdayError, Result};
use crate::utils::render::{match_keyboard, render_card, render_title};

/// Answer an inline lookup with match cards visible to the requester.
pub async fn handle_inline_query(
    bot: &Bot,
    query: InlineQuery,
    services: &ServiceFactory,
) -> Result<()> {
    let requester_id = query.from.id.0 as i64;
    let terms = query.query.trim().to_string();
    debug!(user_id = requester_id, query = %terms, "Processing inline query");

    let mut results: Vec<InlineQueryResult> = Vec::new();

    if terms.is_empty() {
        for m in services.matches.list_upcoming(requester_id).await? {
            results.push(card_result(&m, services).await?);
        }
    } else {
        let mut parts = terms.split_whitespace();
        let match_id: Option<i64> = parts.next().and_then(|id| id.parse().ok());
        let name = parts.collect::<Vec<_>>().join(" ");

        if let Some(match_id) = match_id {
            match services.matches.find_visible(match_id, requester_id).await {
                Ok(m) => {
                    results.push(card_result(&m, services).await?);
                    if !name.is_empty() {
                        results.push(suggestion_result("add", m.id, &name));
                        results.push(suggestion_result("remove", m.id, &name));
                    }
                }
                Err(MatchdayError::MatchNotFound { .. }) => {}
                Err(e) => return Err(e),
            }
        }
    }

    bot.answer_inline_query(query.id, results)
        .is_personal(true)
        .cache_time(0)
        .await?;
    Ok(())
}

/// Register the inline message created by a chosen card as a new surface.
/// Suggestion entries carry non-numeric result ids and register nothing.
pub async fn handle_chosen_result(
    result: ChosenInlineResult,
    services: &ServiceFactory,
) -> Result<()> {
    let Ok(match_id) = result.result_id.parse::<i64>() else {
        return Ok(());
    };
    let Some(inline_message_id) = result.inline_message_id else {
        warn!(match_id = match_id, "Chosen result without inline message id");
        return Ok(());
    };

    services
        .broadcast
        .register_surface(match_id, &SurfaceHandle::Inline { inline_message_id })
        .await
}

/// One selectable match card. The result id is the match id, which the
/// chosen-result handler parses back to register the surface.
async fn card_result(m: &Match, services: &ServiceFactory) -> Result<InlineQueryResult> {
    let summary = services.matches.summary(m).await?;
    let article = InlineQueryResultArticle::new(
        m.id.to_string(),
        render_title(&summary),
        InputMessageContent::Text(InputMessageContentText::new(render_card(&summary))),
    )
    .reply_markup(match_keyboard(m.id));

    Ok(InlineQueryResult::Article(article))
}

/// A suggestion entry that, once chosen, posts the corresponding command.
fn suggestion_result(action: &str, match_id: i64, name: &str) -> InlineQueryResult {
    let title = match action {
        "add" => format!("Add {name}"),
        _ => format!("Remove {name}"),
    };
    let article = InlineQueryResultArticle::new(
        format!("{action}:{match_id}"),
        title,
        InputMessageContent::Text(InputMessageContentText::new(format!(
            "/{action} {match_id} {name}"
        ))),
    );

    InlineQueryResult::Article(article)
}
