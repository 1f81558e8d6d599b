//! CAN frame types and per-signal payload codecs.
//!
//! This is the pure core of cantx. Each transmitted signal has a fixed
//! extended (29-bit) arbitration identifier and a scale/offset/bit-packing
//! transform that maps its engineering-unit value onto an 8-byte payload:
//! - Multi-byte fields are little-endian
//! - Unassigned payload bytes stay zero
//!
//! No state, no I/O. Everything here is a plain function over text input.

pub mod codec;
pub mod error;
pub mod frame;
pub mod signal;

pub use codec::{
    engine_rpm, hand_throttle, ivt_status, set_speed, tractor_guidance, tractor_speed,
};
pub use error::{EncodeError, Result};
pub use frame::{TxFrame, PAYLOAD_LEN};
pub use signal::{
    SignalId, ENGINE_RPM_ID, HAND_THROTTLE_ID, IVT_STATUS_ID, SET_SPEED_ID, TRACTOR_GUIDANCE_ID,
    TRACTOR_SPEED_ID,
};
