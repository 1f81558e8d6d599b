use cantx_frame::TxFrame;

use crate::error::Result;

/// A send-only handle on a CAN bus.
///
/// Implementations are synchronous and side-effect-only: `send` either
/// queues the frame with the interface or reports why it could not. Retry
/// and backoff policy belongs to the caller; here that is "try again next
/// cycle".
pub trait BusTransport {
    /// Emit one frame on the bus.
    fn send(&mut self, frame: &TxFrame) -> Result<()>;

    /// Interface name for diagnostics.
    fn interface(&self) -> &str;
}

/// Owned transport handle as moved into a channel worker.
pub type BoxedBus = Box<dyn BusTransport + Send>;
