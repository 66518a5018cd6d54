use thiserror::Error;

/// Errors produced while parsing a textual `HH:MM:SS` time specification.
///
/// Rejection is all-or-nothing: a spec that fails either check produces no
/// partial value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TimeSpecError {
    /// Not exactly three colon-separated fields, or a field contains
    /// something other than decimal digits.
    #[error("malformed time spec: expected HH:MM:SS with digit-only fields")]
    MalformedInput,

    /// Fields are well-formed digits but violate the accepted ranges
    /// (hours 00-99, minutes and seconds 00-59).
    #[error("time spec out of range: hours must be 00-99, minutes and seconds 00-59")]
    OutOfRange,
}
