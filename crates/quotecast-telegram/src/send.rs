//! Outbound message helpers.
//!
//! Replies are plain text. Telegram caps messages at 4096 characters; the
//! only unbounded input we relay is the echo of a user message, which is
//! itself already under that cap, so no chunking is needed.

use teloxide::prelude::*;
use tracing::warn;

/// Send `text` to `chat_id`.
///
/// A failed send is logged and dropped — delivery failures are never retried
/// and never affect the schedule.
pub async fn send_response(bot: &Bot, chat_id: ChatId, text: &str) {
    if let Err(e) = bot.send_message(chat_id, text).await {
        warn!(error = %e, chat_id = chat_id.0, "Telegram: failed to send message");
    }
}
