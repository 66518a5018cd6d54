//! Telegram channel adapter.
//!
//! Wraps a teloxide `Bot` + `Dispatcher` and drives the long-polling event
//! loop until the process exits. Long polling — no public URL required.

use std::sync::Arc;

use teloxide::prelude::*;
use tracing::info;

use quotecast_core::delivery::QuoteDelivery;

use crate::context::BotState;
use crate::error::TelegramError;
use crate::handler::handle_message;

/// Telegram channel adapter.
pub struct TelegramAdapter {
    state: Arc<BotState>,
    token: String,
}

impl TelegramAdapter {
    pub fn new(token: &str, state: Arc<BotState>) -> Self {
        Self {
            state,
            token: token.to_string(),
        }
    }

    /// Validate the token, then drive the long-polling loop.
    ///
    /// Returns `InvalidToken` without starting the dispatcher when Telegram
    /// rejects the credential; otherwise runs for the lifetime of the
    /// process. A proactive quote delivery task is spawned for `delivery_rx`.
    pub async fn run(
        self,
        delivery_rx: tokio::sync::mpsc::Receiver<QuoteDelivery>,
    ) -> Result<(), TelegramError> {
        let bot = Bot::new(&self.token);

        // Fail fast: a bad token must be a startup error, not a runtime one.
        let me = bot
            .get_me()
            .await
            .map_err(TelegramError::InvalidToken)?;
        info!(
            username = me.user.username.as_deref().unwrap_or("<unset>"),
            "Telegram: token accepted"
        );

        // Spawn proactive quote delivery task.
        let bot2 = bot.clone();
        tokio::spawn(crate::proactive::run_quote_delivery(bot2, delivery_rx));

        info!("Telegram: starting long-polling dispatcher");

        let handler = Update::filter_message().endpoint(handle_message);

        Dispatcher::builder(bot, handler)
            .dependencies(dptree::deps![Arc::clone(&self.state)])
            .default_handler(|_upd| async {})
            .build()
            .dispatch()
            .await;

        Ok(())
    }
}
