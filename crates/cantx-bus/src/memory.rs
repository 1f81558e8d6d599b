use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use cantx_frame::TxFrame;
use parking_lot::Mutex;

use crate::error::{BusError, Result};
use crate::traits::BusTransport;

/// In-memory bus that records every frame instead of transmitting it.
///
/// Clones share the same frame log, so a test can hold one handle while the
/// engine owns others. `set_fail_sends` injects transmit faults to exercise
/// the report-and-continue path.
#[derive(Debug, Clone, Default)]
pub struct MemoryBus {
    shared: Arc<Shared>,
}

#[derive(Debug, Default)]
struct Shared {
    frames: Mutex<Vec<TxFrame>>,
    fail_sends: AtomicBool,
}

impl MemoryBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every frame sent so far, in send order.
    pub fn sent(&self) -> Vec<TxFrame> {
        self.shared.frames.lock().clone()
    }

    /// Number of recorded frames carrying the given arbitration identifier.
    pub fn sent_with_id(&self, can_id: u32) -> usize {
        self.shared
            .frames
            .lock()
            .iter()
            .filter(|f| f.can_id == can_id)
            .count()
    }

    /// Make every subsequent `send` fail until cleared.
    pub fn set_fail_sends(&self, fail: bool) {
        self.shared.fail_sends.store(fail, Ordering::SeqCst);
    }
}

impl BusTransport for MemoryBus {
    fn send(&mut self, frame: &TxFrame) -> Result<()> {
        if self.shared.fail_sends.load(Ordering::SeqCst) {
            return Err(BusError::Send(io::Error::other("injected transmit fault")));
        }
        self.shared.frames.lock().push(*frame);
        Ok(())
    }

    fn interface(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(can_id: u32) -> TxFrame {
        TxFrame::extended(can_id, [0; 8])
    }

    #[test]
    fn records_frames_in_send_order() {
        let mut bus = MemoryBus::new();
        bus.send(&frame(0x100)).unwrap();
        bus.send(&frame(0x200)).unwrap();

        let sent = bus.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].can_id, 0x100);
        assert_eq!(sent[1].can_id, 0x200);
    }

    #[test]
    fn clones_share_the_frame_log() {
        let bus = MemoryBus::new();
        let mut writer = bus.clone();
        writer.send(&frame(0x300)).unwrap();
        assert_eq!(bus.sent_with_id(0x300), 1);
    }

    #[test]
    fn injected_faults_fail_sends_without_recording() {
        let mut bus = MemoryBus::new();
        bus.set_fail_sends(true);
        assert!(matches!(bus.send(&frame(0x100)), Err(BusError::Send(_))));
        assert!(bus.sent().is_empty());

        bus.set_fail_sends(false);
        bus.send(&frame(0x100)).unwrap();
        assert_eq!(bus.sent_with_id(0x100), 1);
    }
}
