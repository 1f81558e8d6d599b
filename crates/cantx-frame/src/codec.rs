//! Per-signal payload transforms.
//!
//! Each function parses the signal's current text value(s), applies the
//! signal's scale/offset, and packs the raw counts into the payload. Raw
//! values are computed in 64-bit integer space and truncated to their low
//! 16 bits on packing, so out-of-range inputs wrap in two's complement the
//! same way the network consumers expect.
//!
//! Scale and offset constants are calibration data from the external vehicle
//! network specification. Preserve them exactly; do not re-derive.

use std::str::FromStr;

use crate::error::{EncodeError, Result};
use crate::frame::{TxFrame, PAYLOAD_LEN};
use crate::signal::{
    SignalId, ENGINE_RPM_ID, HAND_THROTTLE_ID, IVT_STATUS_ID, SET_SPEED_ID, TRACTOR_GUIDANCE_ID,
    TRACTOR_SPEED_ID,
};

/// Engine speed resolution: 0.125 rpm per count.
const RPM_SCALE: f64 = 0.125;

/// IVT payload byte for the "Parked" state.
const IVT_PARKED: u8 = 0xCD;

/// IVT payload byte for every other state.
const IVT_NOT_PARKED: u8 = 0xCC;

/// Selector text that maps to [`IVT_PARKED`].
pub const IVT_PARKED_VALUE: &str = "Parked";

/// Guidance curvature scale (counts per 1/m).
const GUIDANCE_SCALE: f64 = 0.25;

/// Guidance curvature offset, in counts.
const GUIDANCE_OFFSET: f64 = 33408.0;

/// Hand throttle resolution: 0.4 % per count.
const THROTTLE_SCALE: f64 = 0.4;

/// Fixed leading byte of the hand-throttle frame.
const THROTTLE_PREFIX: u8 = 0x4D;

/// Speed-limit resolution, in mph per count.
const SPEED_LIMIT_SCALE: f64 = 0.00124277943490;

/// Fixed leading byte of the speed-limit frame.
const SPEED_LIMIT_PREFIX: u8 = 0x20;

/// Vehicle speed resolution: 1/256 km/h per count.
const SPEED_SCALE: f64 = 0.00390625;

/// km/h per m/s.
const KMH_PER_MPS: f64 = 3.6;

fn parse<T: FromStr>(signal: SignalId, text: &str) -> Result<T> {
    text.trim().parse().map_err(|_| EncodeError::InvalidValue {
        signal,
        value: text.to_string(),
    })
}

fn put_u16_le(data: &mut [u8; PAYLOAD_LEN], offset: usize, raw: i64) {
    data[offset..offset + 2].copy_from_slice(&(raw as u16).to_le_bytes());
}

/// Encode engine speed (whole rpm).
///
/// `raw = round(rpm / 0.125)`, u16 LE at byte offset 3.
pub fn engine_rpm(text: &str) -> Result<TxFrame> {
    let rpm: i64 = parse(SignalId::EngineRpm, text)?;
    let raw = (rpm as f64 / RPM_SCALE).round() as i64;
    let mut data = [0u8; PAYLOAD_LEN];
    put_u16_le(&mut data, 3, raw);
    Ok(TxFrame::extended(ENGINE_RPM_ID, data))
}

/// Encode the isolation (IVT) status selector.
///
/// `"Parked"` maps to 0xCD, anything else to 0xCC, at byte offset 3.
/// Never fails: the selector is an enumeration, not a number.
pub fn ivt_status(text: &str) -> TxFrame {
    let status = if text.trim() == IVT_PARKED_VALUE {
        IVT_PARKED
    } else {
        IVT_NOT_PARKED
    };
    let mut data = [0u8; PAYLOAD_LEN];
    data[3] = status;
    TxFrame::extended(IVT_STATUS_ID, data)
}

/// Encode guidance curvature (1/m).
///
/// `raw = round(curvature * 0.25 - 33408)`, low 16 bits LE at byte offset 0.
/// The offset puts typical curvatures below i16 range; the low-16-bit
/// truncation is what the consumer decodes.
pub fn tractor_guidance(text: &str) -> Result<TxFrame> {
    let curvature: f64 = parse(SignalId::TractorGuidance, text)?;
    let raw = (curvature * GUIDANCE_SCALE - GUIDANCE_OFFSET).round() as i64;
    let mut data = [0u8; PAYLOAD_LEN];
    put_u16_le(&mut data, 0, raw);
    Ok(TxFrame::extended(TRACTOR_GUIDANCE_ID, data))
}

/// Encode hand throttle position (percent).
///
/// `raw = round(throttle / 0.4)`, u16 LE at byte offset 3, with the fixed
/// prefix byte 0x4D at offset 0.
pub fn hand_throttle(text: &str) -> Result<TxFrame> {
    let throttle: f64 = parse(SignalId::HandThrottle, text)?;
    let raw = (throttle / THROTTLE_SCALE).round() as i64;
    let mut data = [0u8; PAYLOAD_LEN];
    data[0] = THROTTLE_PREFIX;
    put_u16_le(&mut data, 3, raw);
    Ok(TxFrame::extended(HAND_THROTTLE_ID, data))
}

/// Encode the commanded speed-limit pair (F1, F2, mph).
///
/// `raw_i = round(Fi / 0.00124277943490)`, two u16 LE at byte offsets 1 and
/// 3, with the fixed prefix byte 0x20 at offset 0.
pub fn set_speed(f1_text: &str, f2_text: &str) -> Result<TxFrame> {
    let f1: f64 = parse(SignalId::SetSpeed, f1_text)?;
    let f2: f64 = parse(SignalId::SetSpeed, f2_text)?;
    let raw1 = (f1 / SPEED_LIMIT_SCALE).round() as i64;
    let raw2 = (f2 / SPEED_LIMIT_SCALE).round() as i64;
    let mut data = [0u8; PAYLOAD_LEN];
    data[0] = SPEED_LIMIT_PREFIX;
    put_u16_le(&mut data, 1, raw1);
    put_u16_le(&mut data, 3, raw2);
    Ok(TxFrame::extended(SET_SPEED_ID, data))
}

/// Encode measured vehicle speed (m/s).
///
/// `raw = round(mps * 3.6 / 0.00390625)` (km/h in 1/256 units), u16 LE at
/// byte offset 1.
pub fn tractor_speed(text: &str) -> Result<TxFrame> {
    let mps: f64 = parse(SignalId::TractorSpeed, text)?;
    let raw = (mps * KMH_PER_MPS / SPEED_SCALE).round() as i64;
    let mut data = [0u8; PAYLOAD_LEN];
    put_u16_le(&mut data, 1, raw);
    Ok(TxFrame::extended(TRACTOR_SPEED_ID, data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_rpm_1000_packs_0x1f40_at_offset_3() {
        let frame = engine_rpm("1000").unwrap();
        assert_eq!(frame.can_id, ENGINE_RPM_ID);
        assert!(frame.extended);
        assert_eq!(frame.data, [0, 0, 0, 0x40, 0x1F, 0, 0, 0]);
    }

    #[test]
    fn engine_rpm_zero_is_all_zero_payload() {
        let frame = engine_rpm("0").unwrap();
        assert_eq!(frame.data, [0u8; PAYLOAD_LEN]);
    }

    #[test]
    fn engine_rpm_accepts_surrounding_whitespace() {
        let frame = engine_rpm(" 1000 ").unwrap();
        assert_eq!(frame.data[3..5], [0x40, 0x1F]);
    }

    #[test]
    fn engine_rpm_rejects_non_integer_text() {
        assert!(engine_rpm("fast").is_err());
        assert!(engine_rpm("").is_err());
        assert!(engine_rpm("800.5").is_err());
    }

    #[test]
    fn invalid_value_error_carries_the_text() {
        let err = engine_rpm("fast").unwrap_err();
        let EncodeError::InvalidValue { signal, value } = err;
        assert_eq!(signal, SignalId::EngineRpm);
        assert_eq!(value, "fast");
    }

    #[test]
    fn ivt_parked_is_0xcd_at_offset_3() {
        let frame = ivt_status("Parked");
        assert_eq!(frame.can_id, IVT_STATUS_ID);
        assert_eq!(frame.data, [0, 0, 0, 0xCD, 0, 0, 0, 0]);
    }

    #[test]
    fn ivt_anything_else_is_0xcc() {
        assert_eq!(ivt_status("Not Parked").data[3], 0xCC);
        assert_eq!(ivt_status("").data[3], 0xCC);
        assert_eq!(ivt_status("parked").data[3], 0xCC);
    }

    #[test]
    fn guidance_zero_wraps_offset_into_low_16_bits() {
        // round(0 * 0.25 - 33408) = -33408; low 16 bits = 0x7D80.
        let frame = tractor_guidance("0").unwrap();
        assert_eq!(frame.can_id, TRACTOR_GUIDANCE_ID);
        assert_eq!(frame.data, [0x80, 0x7D, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn guidance_cancelling_the_offset_packs_zero() {
        // 133632 * 0.25 == 33408, so the raw count is exactly zero.
        let frame = tractor_guidance("133632").unwrap();
        assert_eq!(frame.data, [0u8; PAYLOAD_LEN]);
    }

    #[test]
    fn guidance_rejects_non_numeric_text() {
        assert!(tractor_guidance("left").is_err());
    }

    #[test]
    fn hand_throttle_full_scale() {
        // 100 / 0.4 = 250 = 0x00FA, prefixed with 0x4D.
        let frame = hand_throttle("100").unwrap();
        assert_eq!(frame.can_id, HAND_THROTTLE_ID);
        assert_eq!(frame.data, [0x4D, 0, 0, 0xFA, 0, 0, 0, 0]);
    }

    #[test]
    fn hand_throttle_accepts_fractions() {
        // 50.5 / 0.4 = 126.25, rounds to 126.
        let frame = hand_throttle("50.5").unwrap();
        assert_eq!(frame.data[3..5], [126, 0]);
    }

    #[test]
    fn set_speed_reference_pair() {
        // round(10.0 / scale) = 8046 = 0x1F6E, round(31.0 / scale) = 24944 = 0x6170.
        let frame = set_speed("10.0", "31.0").unwrap();
        assert_eq!(frame.can_id, SET_SPEED_ID);
        assert_eq!(frame.data, [0x20, 0x6E, 0x1F, 0x70, 0x61, 0, 0, 0]);
    }

    #[test]
    fn set_speed_rejects_either_bad_limit() {
        assert!(set_speed("ten", "31.0").is_err());
        assert!(set_speed("10.0", "").is_err());
    }

    #[test]
    fn tractor_speed_10_mps_is_36_kmh() {
        // 36 km/h / (1/256) = 9216 = 0x2400.
        let frame = tractor_speed("10").unwrap();
        assert_eq!(frame.can_id, TRACTOR_SPEED_ID);
        assert_eq!(frame.data, [0, 0x00, 0x24, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn tractor_speed_fractional_input() {
        // 2.5 m/s = 9 km/h = 2304 counts = 0x0900.
        let frame = tractor_speed("2.5").unwrap();
        assert_eq!(frame.data[1..3], [0x00, 0x09]);
    }
}
