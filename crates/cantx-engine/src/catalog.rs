//! The fixed channel table.
//!
//! One [`ChannelSpec`] per signal, defined once at startup and never
//! mutated. The encode hook bridges the live parameter store to the pure
//! codecs in `cantx-frame`.

use std::time::Duration;

use cantx_frame::{codec, EncodeError, SignalId, TxFrame};

use crate::params::{ParamKey, ParameterSource};

/// Cycle period every channel uses unless configured otherwise.
pub const DEFAULT_CYCLE: Duration = Duration::from_millis(100);

/// Reads a channel's current value(s) and produces its frame.
pub type EncodeFn = fn(&dyn ParameterSource) -> Result<TxFrame, EncodeError>;

/// Immutable definition of one cyclic channel.
#[derive(Clone, Copy)]
pub struct ChannelSpec {
    pub id: SignalId,
    /// Arbitration identifier of the emitted frame.
    pub can_id: u32,
    /// Extended (29-bit) identifier. True for every signal in this system.
    pub extended: bool,
    /// Interval between successive transmissions while active.
    pub cycle: Duration,
    pub encode: EncodeFn,
}

/// Build the full channel table with the given cycle period.
pub fn channel_specs(cycle: Duration) -> [ChannelSpec; 6] {
    SignalId::ALL.map(|id| ChannelSpec {
        id,
        can_id: id.can_id(),
        extended: true,
        cycle,
        encode: encode_fn(id),
    })
}

fn encode_fn(id: SignalId) -> EncodeFn {
    match id {
        SignalId::EngineRpm => encode_engine_rpm,
        SignalId::IvtStatus => encode_ivt_status,
        SignalId::TractorGuidance => encode_tractor_guidance,
        SignalId::HandThrottle => encode_hand_throttle,
        SignalId::SetSpeed => encode_set_speed,
        SignalId::TractorSpeed => encode_tractor_speed,
    }
}

fn encode_engine_rpm(source: &dyn ParameterSource) -> Result<TxFrame, EncodeError> {
    codec::engine_rpm(&source.get(ParamKey::EngineRpm))
}

fn encode_ivt_status(source: &dyn ParameterSource) -> Result<TxFrame, EncodeError> {
    Ok(codec::ivt_status(&source.get(ParamKey::IvtStatus)))
}

fn encode_tractor_guidance(source: &dyn ParameterSource) -> Result<TxFrame, EncodeError> {
    codec::tractor_guidance(&source.get(ParamKey::TractorGuidance))
}

fn encode_hand_throttle(source: &dyn ParameterSource) -> Result<TxFrame, EncodeError> {
    codec::hand_throttle(&source.get(ParamKey::HandThrottle))
}

fn encode_set_speed(source: &dyn ParameterSource) -> Result<TxFrame, EncodeError> {
    codec::set_speed(
        &source.get(ParamKey::SpeedLimitF1),
        &source.get(ParamKey::SpeedLimitF2),
    )
}

fn encode_tractor_speed(source: &dyn ParameterSource) -> Result<TxFrame, EncodeError> {
    codec::tractor_speed(&source.get(ParamKey::TractorSpeed))
}
