use std::io;

/// Errors that can occur in bus transport operations.
#[derive(Debug, thiserror::Error)]
pub enum BusError {
    /// Failed to open a handle on the named interface.
    #[error("failed to open CAN interface {interface}: {source}")]
    Open { interface: String, source: io::Error },

    /// The interface rejected or failed to accept a frame.
    #[error("failed to transmit frame: {0}")]
    Send(#[from] io::Error),

    /// The frame cannot be represented on this transport.
    #[error("frame rejected: {0}")]
    InvalidFrame(String),
}

pub type Result<T> = std::result::Result<T, BusError>;
