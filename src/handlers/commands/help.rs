//! Help command handler

use teloxide::prelude::*;
use teloxide::types::Message;

use crate::utils::errors::Result;

/// Handle /help and /start
pub async fn handle_help(bot: &Bot, msg: &Message) -> Result<()> {
    let help_text = "⚽ Matchday Help\n\n\
        /match <date> <time> - Create a new match (e.g. /match 14/6 18:30)\n\
        /status - Show the current match for this chat\n\
        /in - Join the match\n\
        /out - Leave the match\n\
        /maybe - Not sure yet\n\
        /add <match> <name> - Add an external player\n\
        /remove <match> <name> - Remove an external player\n\n\
        Share a match card in any chat by typing my name followed by the match number.";

    bot.send_message(msg.chat.id, help_text).await?;
    Ok(())
}
