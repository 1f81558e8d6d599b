//! CAN bus transport abstraction.
//!
//! Provides a unified send-only interface over the transports cantx can
//! emit frames through:
//! - SocketCAN network interfaces (Linux)
//! - An in-memory recording bus for tests and dry runs
//!
//! This is the lowest layer of cantx. A transport is handed fully-encoded
//! [`cantx_frame::TxFrame`]s and does nothing but put them on the wire:
//! no retries, no queuing, no error-frame recovery.

pub mod error;
pub mod memory;
pub mod traits;

#[cfg(target_os = "linux")]
pub mod socketcan;

pub use error::{BusError, Result};
pub use memory::MemoryBus;
pub use traits::{BoxedBus, BusTransport};

#[cfg(target_os = "linux")]
pub use self::socketcan::SocketCanBus;
