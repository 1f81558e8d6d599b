//! Transmitted signal identities.
//!
//! The signal table is fixed: six signals, one cyclic frame each. Arbitration
//! identifiers follow the SAE J1939-style parameter-group convention of the
//! vehicle network this tool drives and are not derived; they are carried
//! verbatim from the network specification.

/// Engine speed, extended ID.
pub const ENGINE_RPM_ID: u32 = 0x0CF0_04FE;

/// Electrical-isolation (IVT) status flag, extended ID.
pub const IVT_STATUS_ID: u32 = 0x0CFF_FE03;

/// Guidance curvature command, extended ID.
pub const TRACTOR_GUIDANCE_ID: u32 = 0x0CAC_00FE;

/// Hand throttle position, extended ID.
pub const HAND_THROTTLE_ID: u32 = 0x0CFF_FF8C;

/// Commanded speed-limit pair (F1, F2), extended ID.
pub const SET_SPEED_ID: u32 = 0x18FF_FF05;

/// Measured vehicle speed, extended ID.
pub const TRACTOR_SPEED_ID: u32 = 0x18FE_F1FE;

/// One named signal, transmitted as one periodic frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalId {
    EngineRpm,
    IvtStatus,
    TractorGuidance,
    HandThrottle,
    SetSpeed,
    TractorSpeed,
}

impl SignalId {
    /// Every defined signal, in table order.
    pub const ALL: [SignalId; 6] = [
        SignalId::EngineRpm,
        SignalId::IvtStatus,
        SignalId::TractorGuidance,
        SignalId::HandThrottle,
        SignalId::SetSpeed,
        SignalId::TractorSpeed,
    ];

    /// Stable machine-readable name (CLI argument form).
    pub fn as_str(self) -> &'static str {
        match self {
            SignalId::EngineRpm => "engine-rpm",
            SignalId::IvtStatus => "ivt-status",
            SignalId::TractorGuidance => "tractor-guidance",
            SignalId::HandThrottle => "hand-throttle",
            SignalId::SetSpeed => "set-speed",
            SignalId::TractorSpeed => "tractor-speed",
        }
    }

    /// Human-readable label for display surfaces.
    pub fn label(self) -> &'static str {
        match self {
            SignalId::EngineRpm => "Engine RPM",
            SignalId::IvtStatus => "IVT Status",
            SignalId::TractorGuidance => "Tractor Guidance",
            SignalId::HandThrottle => "Hand Throttle %",
            SignalId::SetSpeed => "Set Speed MPH",
            SignalId::TractorSpeed => "Tractor Speed",
        }
    }

    /// The signal's fixed arbitration identifier.
    pub fn can_id(self) -> u32 {
        match self {
            SignalId::EngineRpm => ENGINE_RPM_ID,
            SignalId::IvtStatus => IVT_STATUS_ID,
            SignalId::TractorGuidance => TRACTOR_GUIDANCE_ID,
            SignalId::HandThrottle => HAND_THROTTLE_ID,
            SignalId::SetSpeed => SET_SPEED_ID,
            SignalId::TractorSpeed => TRACTOR_SPEED_ID,
        }
    }

    /// Resolve a machine-readable name back to a signal.
    pub fn parse(name: &str) -> Option<SignalId> {
        SignalId::ALL.iter().copied().find(|s| s.as_str() == name)
    }

    /// Position in [`SignalId::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for SignalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips_every_signal() {
        for signal in SignalId::ALL {
            assert_eq!(SignalId::parse(signal.as_str()), Some(signal));
        }
    }

    #[test]
    fn parse_rejects_unknown_names() {
        assert_eq!(SignalId::parse("brake-pressure"), None);
        assert_eq!(SignalId::parse(""), None);
        assert_eq!(SignalId::parse("Engine RPM"), None);
    }

    #[test]
    fn indexes_match_table_order() {
        for (i, signal) in SignalId::ALL.iter().enumerate() {
            assert_eq!(signal.index(), i);
        }
    }

    #[test]
    fn arbitration_ids_are_unique() {
        for a in SignalId::ALL {
            for b in SignalId::ALL {
                if a != b {
                    assert_ne!(a.can_id(), b.can_id());
                }
            }
        }
    }
}
