/// Errors produced by the Telegram adapter.
#[derive(Debug, thiserror::Error)]
pub enum TelegramError {
    #[error("teloxide error: {0}")]
    Teloxide(#[from] teloxide::RequestError),

    /// The token did not correspond to a working bot at startup.
    #[error("the bot token was rejected by Telegram: {0}")]
    InvalidToken(teloxide::RequestError),
}
