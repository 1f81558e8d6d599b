//! The live parameter store channel workers read from.
//!
//! One key per operator-entered field. Workers read the latest value every
//! cycle; the control surface writes whenever the operator changes a field.
//! Reads never block beyond the table lock and always yield a value: a
//! missing or empty entry falls back to the key's default.

use std::collections::HashMap;

use cantx_frame::SignalId;
use parking_lot::RwLock;

/// One operator-entered input field.
///
/// The speed-limit signal reads two fields (F1 and F2), so keys are not
/// one-to-one with signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKey {
    EngineRpm,
    IvtStatus,
    TractorGuidance,
    HandThrottle,
    SpeedLimitF1,
    SpeedLimitF2,
    TractorSpeed,
}

impl ParamKey {
    /// Every defined parameter, in field order.
    pub const ALL: [ParamKey; 7] = [
        ParamKey::EngineRpm,
        ParamKey::IvtStatus,
        ParamKey::TractorGuidance,
        ParamKey::HandThrottle,
        ParamKey::SpeedLimitF1,
        ParamKey::SpeedLimitF2,
        ParamKey::TractorSpeed,
    ];

    /// Stable machine-readable name (CLI argument form).
    pub fn as_str(self) -> &'static str {
        match self {
            ParamKey::EngineRpm => "engine-rpm",
            ParamKey::IvtStatus => "ivt-status",
            ParamKey::TractorGuidance => "tractor-guidance",
            ParamKey::HandThrottle => "hand-throttle",
            ParamKey::SpeedLimitF1 => "f1",
            ParamKey::SpeedLimitF2 => "f2",
            ParamKey::TractorSpeed => "tractor-speed",
        }
    }

    /// The value a field holds before the operator first writes it.
    pub fn default_value(self) -> &'static str {
        match self {
            ParamKey::EngineRpm => "0",
            ParamKey::IvtStatus => "Not Parked",
            ParamKey::TractorGuidance => "0",
            ParamKey::HandThrottle => "0",
            ParamKey::SpeedLimitF1 => "10.0",
            ParamKey::SpeedLimitF2 => "31.0",
            ParamKey::TractorSpeed => "0",
        }
    }

    /// Resolve a machine-readable name back to a key.
    pub fn parse(name: &str) -> Option<ParamKey> {
        ParamKey::ALL.iter().copied().find(|k| k.as_str() == name)
    }
}

impl std::fmt::Display for ParamKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The parameter keys a signal's codec reads, in codec argument order.
pub fn params_for(id: SignalId) -> &'static [ParamKey] {
    match id {
        SignalId::EngineRpm => &[ParamKey::EngineRpm],
        SignalId::IvtStatus => &[ParamKey::IvtStatus],
        SignalId::TractorGuidance => &[ParamKey::TractorGuidance],
        SignalId::HandThrottle => &[ParamKey::HandThrottle],
        SignalId::SetSpeed => &[ParamKey::SpeedLimitF1, ParamKey::SpeedLimitF2],
        SignalId::TractorSpeed => &[ParamKey::TractorSpeed],
    }
}

/// Thread-safe read access to the latest value of a named input.
///
/// Implementations must be callable from any worker thread concurrently
/// with writes from the control surface, and must never block the caller
/// for longer than a short critical section.
pub trait ParameterSource: Send + Sync {
    /// The most recently set value for `key`, or its default.
    fn get(&self, key: ParamKey) -> String;
}

/// The provided [`ParameterSource`]: a lock-guarded table of text values.
#[derive(Debug, Default)]
pub struct ParamTable {
    values: RwLock<HashMap<ParamKey, String>>,
}

impl ParamTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new value for `key`. Workers pick it up on their next cycle.
    pub fn set(&self, key: ParamKey, value: impl Into<String>) {
        self.values.write().insert(key, value.into());
    }
}

impl ParameterSource for ParamTable {
    fn get(&self, key: ParamKey) -> String {
        let values = self.values.read();
        match values.get(&key) {
            Some(value) if !value.trim().is_empty() => value.clone(),
            _ => key.default_value().to_string(),
        }
    }
}
