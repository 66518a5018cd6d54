use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// What a job does when it fires, interpreted by the delivery router.
///
/// Actions are plain data rather than stored callbacks, so a job can be
/// inspected, logged, and fired in tests without a live Telegram connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum JobAction {
    /// Pick a random quote and send it to the given Telegram chat.
    SendQuote { chat_id: i64 },
}

/// Firing policy of a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobKind {
    /// Fires at most once, then the job is removed.
    Once,
    /// Fires every interval for as long as the job exists and is enabled.
    Repeating,
}

/// One scheduled firing contract, exclusively owned by the scheduler store.
#[derive(Debug, Clone)]
pub struct Job {
    /// UUID v4 string — unique for the scheduler's lifetime.
    pub id: String,
    pub kind: JobKind,
    /// Delay for `Once`, period for `Repeating`.
    pub interval: Duration,
    pub action: JobAction,
    /// Disabled jobs stay registered and keep their `next_fire`; they just
    /// never fire until re-enabled.
    pub enabled: bool,
    /// Next planned execution (UTC).
    pub next_fire: DateTime<Utc>,
}

/// Copy of a due job forwarded to the delivery router when it fires.
#[derive(Debug, Clone)]
pub struct FiredJob {
    pub id: String,
    pub action: JobAction,
}
