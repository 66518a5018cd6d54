use std::str::FromStr;

use chrono::Duration;

use crate::error::TimeSpecError;

/// A parsed, range-validated `HH:MM:SS` duration.
///
/// Constructed transiently per command, converted to a [`Duration`], then
/// discarded. Hours run 00-99, minutes and seconds 00-59.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSpec {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl TimeSpec {
    /// Total length as a chrono duration (`h*3600 + m*60 + s` seconds).
    ///
    /// `00:00:00` yields a zero duration; the scheduler treats such a job as
    /// due on its very next tick.
    pub fn to_duration(self) -> Duration {
        Duration::seconds(i64::from(self.hours) * 3600 + i64::from(self.minutes) * 60 + i64::from(self.seconds))
    }
}

impl FromStr for TimeSpec {
    type Err = TimeSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split(':').collect();
        if fields.len() != 3 {
            return Err(TimeSpecError::MalformedInput);
        }

        // Digit-only check before any numeric interpretation, so "-1" and
        // "1a" are malformed rather than out-of-range.
        if fields
            .iter()
            .any(|f| f.is_empty() || !f.chars().all(|c| c.is_ascii_digit()))
        {
            return Err(TimeSpecError::MalformedInput);
        }

        let hours: u32 = fields[0].parse().map_err(|_| TimeSpecError::MalformedInput)?;
        let minutes: u32 = fields[1].parse().map_err(|_| TimeSpecError::MalformedInput)?;
        let seconds: u32 = fields[2].parse().map_err(|_| TimeSpecError::MalformedInput)?;

        if hours > 99 || minutes > 59 || seconds > 59 {
            return Err(TimeSpecError::OutOfRange);
        }

        Ok(TimeSpec {
            hours,
            minutes,
            seconds,
        })
    }
}
