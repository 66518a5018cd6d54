//! Delivery types — shared between the scheduler engine and the Telegram adapter.

use serde::{Deserialize, Serialize};

/// Formatted and ready-to-send quote; passed from the delivery router to the
/// Telegram delivery task.
///
/// The router owns corpus access: by the time a `QuoteDelivery` exists the
/// quote has already been picked and formatted, so the channel task only
/// needs to put text on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteDelivery {
    /// Originating job ID — used for logging.
    pub job_id: String,
    /// Telegram chat the quote is bound to.
    pub chat_id: i64,
    /// Text to send, already in `"quote" - author` form.
    pub message: String,
}
