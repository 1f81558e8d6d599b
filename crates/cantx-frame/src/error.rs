use crate::signal::SignalId;

/// Errors that can occur while encoding a signal value into a payload.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    /// The source value cannot be parsed as the signal's numeric type.
    #[error("invalid {signal} value {value:?}")]
    InvalidValue { signal: SignalId, value: String },
}

pub type Result<T> = std::result::Result<T, EncodeError>;
