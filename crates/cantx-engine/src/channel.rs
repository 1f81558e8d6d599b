//! One channel: a codec, a transport handle, and a repeating worker.
//!
//! The active flag doubles as the worker's cancellation token. It is
//! checked once per cycle, after the sleep, so a stop request issued
//! mid-sleep takes effect at the next cycle boundary. The state mutex
//! covers the check-and-set in `start`/`stop`; two concurrent starts can
//! never leave two live workers behind.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use cantx_bus::{BoxedBus, BusError, BusTransport};
use parking_lot::Mutex;
use tracing::{debug, error, info, warn};

use crate::catalog::ChannelSpec;
use crate::error::{EngineError, Result};
use crate::params::ParameterSource;

pub(crate) struct Channel {
    spec: ChannelSpec,
    active: Arc<AtomicBool>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl Channel {
    pub(crate) fn new(spec: ChannelSpec) -> Self {
        Self {
            spec,
            active: Arc::new(AtomicBool::new(false)),
            worker: Mutex::new(None),
        }
    }

    pub(crate) fn spec(&self) -> &ChannelSpec {
        &self.spec
    }

    pub(crate) fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Begin cyclic transmission. Idempotent: a second start while active
    /// is a no-op and does not acquire a second transport handle.
    ///
    /// The transport is opened under the state lock and ownership moves
    /// into the worker, so the handle lives exactly as long as the worker.
    pub(crate) fn start(
        &self,
        source: Arc<dyn ParameterSource>,
        open: impl FnOnce() -> std::result::Result<BoxedBus, BusError>,
    ) -> Result<()> {
        let mut worker = self.worker.lock();
        if self.active.load(Ordering::SeqCst) {
            debug!(signal = %self.spec.id, "start ignored: already sending");
            return Ok(());
        }

        let bus = open()?;
        self.active.store(true, Ordering::SeqCst);

        let spec = self.spec;
        let active = Arc::clone(&self.active);
        let handle = thread::Builder::new()
            .name(format!("cantx-{}", spec.id))
            .spawn(move || worker_loop(spec, active, source, bus))
            .map_err(|err| {
                self.active.store(false, Ordering::SeqCst);
                EngineError::Spawn(err)
            })?;
        *worker = Some(handle);

        info!(signal = %self.spec.id, "transmission started");
        Ok(())
    }

    /// End cyclic transmission. Idempotent. Blocks until the worker has
    /// observed the flag and exited, at most one cycle period later.
    pub(crate) fn stop(&self) {
        let mut worker = self.worker.lock();
        if !self.active.swap(false, Ordering::SeqCst) {
            debug!(signal = %self.spec.id, "stop ignored: already idle");
            return;
        }

        if let Some(handle) = worker.take() {
            if handle.join().is_err() {
                error!(signal = %self.spec.id, "worker terminated abnormally");
            }
        }

        info!(signal = %self.spec.id, "transmission stopped");
    }
}

fn worker_loop(
    spec: ChannelSpec,
    active: Arc<AtomicBool>,
    source: Arc<dyn ParameterSource>,
    mut bus: BoxedBus,
) {
    debug!(
        signal = %spec.id,
        interface = bus.interface(),
        cycle_ms = spec.cycle.as_millis() as u64,
        "worker running"
    );

    while active.load(Ordering::SeqCst) {
        match (spec.encode)(source.as_ref()) {
            Ok(frame) => {
                if let Err(err) = bus.send(&frame) {
                    warn!(signal = %spec.id, %err, "frame not sent");
                }
            }
            Err(err) => {
                warn!(signal = %spec.id, %err, "cycle skipped");
            }
        }
        thread::sleep(spec.cycle);
    }

    debug!(signal = %spec.id, "worker exited");
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use cantx_bus::MemoryBus;
    use cantx_frame::SignalId;

    use super::*;
    use crate::catalog::channel_specs;
    use crate::params::ParamTable;

    fn test_channel(cycle_ms: u64) -> Channel {
        let specs = channel_specs(Duration::from_millis(cycle_ms));
        Channel::new(specs[SignalId::EngineRpm.index()])
    }

    fn boxed(bus: &MemoryBus) -> BoxedBus {
        Box::new(bus.clone()) as BoxedBus
    }

    #[test]
    fn starts_sending_and_stops_quiescent() {
        let channel = test_channel(5);
        let bus = MemoryBus::new();
        let source = Arc::new(ParamTable::new());

        channel.start(source, || Ok(boxed(&bus))).unwrap();
        assert!(channel.is_active());

        std::thread::sleep(Duration::from_millis(40));
        channel.stop();
        assert!(!channel.is_active());

        let sent_at_stop = bus.sent().len();
        assert!(sent_at_stop > 0);

        // The worker has joined; no frame may arrive afterwards.
        std::thread::sleep(Duration::from_millis(30));
        assert_eq!(bus.sent().len(), sent_at_stop);
    }

    #[test]
    fn second_start_does_not_open_a_second_transport() {
        let channel = test_channel(5);
        let bus = MemoryBus::new();
        let source: Arc<dyn ParameterSource> = Arc::new(ParamTable::new());

        let mut opens = 0;
        channel
            .start(Arc::clone(&source), || {
                opens += 1;
                Ok(boxed(&bus))
            })
            .unwrap();
        channel
            .start(source, || {
                opens += 1;
                Ok(boxed(&bus))
            })
            .unwrap();

        assert_eq!(opens, 1);
        channel.stop();
    }

    #[test]
    fn stop_when_idle_is_a_no_op() {
        let channel = test_channel(5);
        channel.stop();
        channel.stop();
        assert!(!channel.is_active());
    }

    #[test]
    fn open_failure_leaves_channel_idle() {
        let channel = test_channel(5);
        let source = Arc::new(ParamTable::new());
        let result = channel.start(source, || {
            Err(BusError::Open {
                interface: "can9".to_string(),
                source: std::io::Error::other("no such device"),
            })
        });
        assert!(result.is_err());
        assert!(!channel.is_active());
    }

    #[test]
    fn transmit_faults_do_not_stop_the_worker() {
        let channel = test_channel(5);
        let bus = MemoryBus::new();
        bus.set_fail_sends(true);
        let source = Arc::new(ParamTable::new());

        channel.start(source, || Ok(boxed(&bus))).unwrap();
        std::thread::sleep(Duration::from_millis(30));
        assert!(channel.is_active());
        assert!(bus.sent().is_empty());

        bus.set_fail_sends(false);
        std::thread::sleep(Duration::from_millis(30));
        assert!(!bus.sent().is_empty());

        channel.stop();
    }
}
