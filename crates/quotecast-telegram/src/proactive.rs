//! Proactive Telegram delivery — sends scheduler-fired quotes to chats.

use teloxide::prelude::*;
use tracing::{debug, info};

use quotecast_core::delivery::QuoteDelivery;

/// Background task that receives fired quotes and delivers them.
///
/// Spawned once in `adapter.rs` when the adapter starts. Runs for the
/// lifetime of the Telegram connection.
pub async fn run_quote_delivery(bot: Bot, mut rx: tokio::sync::mpsc::Receiver<QuoteDelivery>) {
    while let Some(delivery) = rx.recv().await {
        debug!(job_id = %delivery.job_id, chat_id = delivery.chat_id, "telegram: delivering quote");
        crate::send::send_response(&bot, ChatId(delivery.chat_id), &delivery.message).await;
    }

    info!("telegram delivery task exiting (channel closed)");
}
