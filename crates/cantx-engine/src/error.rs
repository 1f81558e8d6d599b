use cantx_bus::BusError;

/// Errors that can occur while operating the engine.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Bus transport failure while acquiring a channel's handle.
    #[error("bus transport error: {0}")]
    Bus(#[from] BusError),

    /// The worker thread could not be spawned.
    #[error("failed to spawn channel worker: {0}")]
    Spawn(std::io::Error),
}

/// Caller-side misuse of the engine's public operations.
///
/// An unknown channel name is a programming error at the string boundary,
/// not a runtime fault. It must surface rather than be swallowed.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown channel {0:?}")]
    UnknownChannel(String),

    #[error("unknown parameter {0:?}")]
    UnknownParameter(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
