pub mod adapter;
pub mod commands;
pub mod context;
pub mod error;
pub mod handler;
pub mod proactive;
pub mod send;

pub use adapter::TelegramAdapter;
pub use context::BotState;
pub use error::TelegramError;
