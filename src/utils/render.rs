//! Match card rendering
//!
//! Pure functions from a match summary to the display payload: the card text
//! and the fixed action-button layout. Every surface of a match shows the same
//! payload, so this is the single place the card shape is decided.

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::models::{CallbackCommand, CallbackData, MatchSummary};

/// Card text: title line plus one section per non-empty attendance group.
pub fn render_card(summary: &MatchSummary) -> String {
    let schedule = summary
        .scheduled_at
        .with_timezone(&chrono::Local)
        .format("%a, %d %b %H:%M");
    let mut text = format!("Match #{} on {}:\n", summary.match_id, schedule);

    render_group(&mut text, "Attendees", &summary.attending);
    render_group(&mut text, "Maybe", &summary.maybe);
    render_group(&mut text, "Out", &summary.out);

    text
}

fn render_group(text: &mut String, label: &str, names: &[String]) {
    if names.is_empty() {
        return;
    }
    text.push_str(&format!("{}: {}", label, names.len()));
    for name in names {
        text.push_str(&format!("\n  - {name}"));
    }
    text.push('\n');
}

/// The fixed keyboard every card carries: attendance buttons on the first row,
/// refresh and share on the second.
pub fn match_keyboard(match_id: i64) -> InlineKeyboardMarkup {
    let callback = |label: &str, command: CallbackCommand| {
        InlineKeyboardButton::callback(label, CallbackData::new(command, match_id).encode())
    };

    InlineKeyboardMarkup::new(vec![
        vec![
            callback("In", CallbackCommand::In),
            callback("Maybe", CallbackCommand::Maybe),
            callback("Out", CallbackCommand::Out),
        ],
        vec![
            callback("Refresh", CallbackCommand::Refresh),
            InlineKeyboardButton::switch_inline_query("Share", match_id.to_string()),
        ],
    ])
}

/// One-line summary used as the inline result title.
pub fn render_title(summary: &MatchSummary) -> String {
    let schedule = summary
        .scheduled_at
        .with_timezone(&chrono::Local)
        .format("%d/%m %H:%M");
    format!("Match {schedule}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn summary(attending: &[&str], maybe: &[&str], out: &[&str]) -> MatchSummary {
        MatchSummary {
            match_id: 7,
            scheduled_at: Utc::now(),
            attending: attending.iter().map(|s| s.to_string()).collect(),
            maybe: maybe.iter().map(|s| s.to_string()).collect(),
            out: out.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn empty_groups_are_omitted() {
        let text = render_card(&summary(&[], &[], &[]));
        assert!(text.starts_with("Match #7 on "));
        assert!(!text.contains("Attendees"));
        assert!(!text.contains("Maybe"));
        assert!(!text.contains("Out"));
    }

    #[test]
    fn groups_list_names_with_counts() {
        let text = render_card(&summary(&["Seba", "Maria Lopez"], &["Ana"], &[]));
        assert!(text.contains("Attendees: 2\n  - Seba\n  - Maria Lopez"));
        assert!(text.contains("Maybe: 1\n  - Ana"));
        assert!(!text.contains("Out"));
    }

    #[test]
    fn keyboard_layout_is_fixed() {
        let keyboard = match_keyboard(7);
        let rows = &keyboard.inline_keyboard;
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].len(), 3);
        assert_eq!(rows[1].len(), 2);

        let labels: Vec<&str> = rows
            .iter()
            .flatten()
            .map(|button| button.text.as_str())
            .collect();
        assert_eq!(labels, ["In", "Maybe", "Out", "Refresh", "Share"]);
    }
}
