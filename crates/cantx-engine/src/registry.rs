//! The channel registry: the engine's public operations.
//!
//! Owns one channel per defined signal plus the shared parameter source and
//! the transport opener. Channels are fully independent: starting or
//! stopping one never touches another.

use std::sync::Arc;
use std::time::Duration;

use cantx_bus::{BoxedBus, BusError};
use cantx_frame::SignalId;

use crate::catalog::{channel_specs, ChannelSpec, DEFAULT_CYCLE};
use crate::channel::Channel;
use crate::error::{ConfigError, Result};
use crate::params::ParameterSource;

/// Opens one transport handle on the named interface. Called once per
/// channel start.
pub type TransportOpener =
    Box<dyn Fn(&str) -> std::result::Result<BoxedBus, BusError> + Send + Sync>;

/// Displayed state of one channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelStatus {
    Idle,
    Sending,
}

impl ChannelStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ChannelStatus::Idle => "Idle",
            ChannelStatus::Sending => "Sending",
        }
    }
}

impl std::fmt::Display for ChannelStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub struct Registry {
    interface: String,
    source: Arc<dyn ParameterSource>,
    opener: TransportOpener,
    channels: Vec<Channel>,
}

impl Registry {
    /// Build a registry over the default 100 ms cycle.
    pub fn new(
        interface: impl Into<String>,
        source: Arc<dyn ParameterSource>,
        opener: TransportOpener,
    ) -> Self {
        Self::with_cycle(interface, source, opener, DEFAULT_CYCLE)
    }

    /// Build a registry with an explicit cycle period for every channel.
    pub fn with_cycle(
        interface: impl Into<String>,
        source: Arc<dyn ParameterSource>,
        opener: TransportOpener,
        cycle: Duration,
    ) -> Self {
        Self {
            interface: interface.into(),
            source,
            opener,
            channels: channel_specs(cycle).into_iter().map(Channel::new).collect(),
        }
    }

    /// Build a registry that transmits on a SocketCAN interface.
    #[cfg(target_os = "linux")]
    pub fn socketcan(
        interface: impl Into<String>,
        source: Arc<dyn ParameterSource>,
        cycle: Duration,
    ) -> Self {
        let opener: TransportOpener = Box::new(|iface: &str| {
            Ok(Box::new(cantx_bus::SocketCanBus::open(iface)?) as BoxedBus)
        });
        Self::with_cycle(interface, source, opener, cycle)
    }

    /// Resolve a channel name from the string boundary (CLI, scripts).
    pub fn resolve(name: &str) -> std::result::Result<SignalId, ConfigError> {
        SignalId::parse(name).ok_or_else(|| ConfigError::UnknownChannel(name.to_string()))
    }

    fn channel(&self, id: SignalId) -> &Channel {
        &self.channels[id.index()]
    }

    /// Start cyclic transmission of one signal. Idempotent; returns once
    /// the worker is spawned, without waiting for the first frame.
    pub fn start(&self, id: SignalId) -> Result<()> {
        self.channel(id)
            .start(Arc::clone(&self.source), || (self.opener)(&self.interface))
    }

    /// Stop one signal. Idempotent; blocks until its worker has exited.
    pub fn stop(&self, id: SignalId) {
        self.channel(id).stop();
    }

    /// Stop-then-start, resetting the cycle phase. Used by control
    /// surfaces when a selector change should take effect on a fresh
    /// cycle rather than mid-phase.
    pub fn restart(&self, id: SignalId) -> Result<()> {
        self.stop(id);
        self.start(id)
    }

    pub fn is_active(&self, id: SignalId) -> bool {
        self.channel(id).is_active()
    }

    pub fn status(&self, id: SignalId) -> ChannelStatus {
        if self.is_active(id) {
            ChannelStatus::Sending
        } else {
            ChannelStatus::Idle
        }
    }

    /// The channel definitions, in table order.
    pub fn specs(&self) -> impl Iterator<Item = &ChannelSpec> {
        self.channels.iter().map(Channel::spec)
    }

    /// Interface channels transmit on.
    pub fn interface(&self) -> &str {
        &self.interface
    }

    /// Stop every active channel. Called from the process shutdown hook so
    /// no worker outlives the process's owning resources.
    pub fn shutdown_all(&self) {
        for channel in &self.channels {
            channel.stop();
        }
    }
}
