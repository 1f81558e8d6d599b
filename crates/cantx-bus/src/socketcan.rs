use ::socketcan::{CanFrame, CanSocket, Socket};
use embedded_can::{ExtendedId, Frame as EmbeddedFrame, Id, StandardId};
use tracing::{debug, info};

use cantx_frame::TxFrame;

use crate::error::{BusError, Result};
use crate::traits::BusTransport;

/// SocketCAN transport.
///
/// One handle wraps one raw CAN socket bound to a named network interface
/// (`can0`, `vcan0`, ...). Opening requires the interface to exist and be
/// up; sending maps directly onto the kernel's transmit queue.
pub struct SocketCanBus {
    socket: CanSocket,
    interface: String,
}

impl SocketCanBus {
    /// Open a socket on the named CAN interface.
    pub fn open(interface: &str) -> Result<Self> {
        let socket = CanSocket::open(interface).map_err(|source| BusError::Open {
            interface: interface.to_string(),
            source,
        })?;
        info!(interface, "opened SocketCAN interface");
        Ok(Self {
            socket,
            interface: interface.to_string(),
        })
    }
}

impl BusTransport for SocketCanBus {
    fn send(&mut self, frame: &TxFrame) -> Result<()> {
        let id = if frame.extended {
            ExtendedId::new(frame.can_id).map(Id::Extended)
        } else {
            u16::try_from(frame.can_id)
                .ok()
                .and_then(StandardId::new)
                .map(Id::Standard)
        }
        .ok_or_else(|| {
            BusError::InvalidFrame(format!("arbitration ID {:08X} out of range", frame.can_id))
        })?;

        let can_frame = CanFrame::new(id, &frame.data)
            .ok_or_else(|| BusError::InvalidFrame("payload rejected by socket".to_string()))?;

        self.socket.write_frame(&can_frame)?;
        debug!(interface = %self.interface, %frame, "frame transmitted");
        Ok(())
    }

    fn interface(&self) -> &str {
        &self.interface
    }
}
