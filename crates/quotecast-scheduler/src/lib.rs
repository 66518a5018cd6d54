//! `quotecast-scheduler` — Tokio-based in-memory job scheduler.
//!
//! # Overview
//!
//! Jobs live in a single in-memory store shared between a [`SchedulerHandle`]
//! (used by command handlers to add/toggle/clear jobs) and the
//! [`engine::SchedulerEngine`], which ticks once per second and forwards every
//! due job over an mpsc channel for delivery routing.
//!
//! # Job kinds
//!
//! | Kind        | Behaviour                                              |
//! |-------------|--------------------------------------------------------|
//! | `Once`      | Single fire after a delay, then removed from the store |
//! | `Repeating` | Fires every N seconds for as long as it exists         |
//!
//! Repeating jobs keep a fixed phase: after a firing, `next_fire` advances by
//! whole multiples of the interval until it lands in the future, so scheduler
//! latency never accumulates into drift and windows missed while a job was
//! disabled are skipped rather than replayed.

pub mod engine;
pub mod error;
pub mod timespec;
pub mod types;

pub use engine::{SchedulerEngine, SchedulerHandle};
pub use error::TimeSpecError;
pub use timespec::TimeSpec;
pub use types::{FiredJob, Job, JobAction, JobKind};
