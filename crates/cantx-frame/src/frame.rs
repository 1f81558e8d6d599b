use std::fmt;

/// Every cyclic frame on this network carries a full 8-byte payload.
pub const PAYLOAD_LEN: usize = 8;

/// An encoded frame ready to hand to a bus transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxFrame {
    /// Arbitration identifier (29-bit when `extended`).
    pub can_id: u32,
    /// Extended (29-bit) vs. standard (11-bit) identifier.
    pub extended: bool,
    /// The payload. Bytes not assigned by a codec stay zero.
    pub data: [u8; PAYLOAD_LEN],
}

impl TxFrame {
    /// Create a frame with an extended identifier.
    pub fn extended(can_id: u32, data: [u8; PAYLOAD_LEN]) -> Self {
        Self {
            can_id,
            extended: true,
            data,
        }
    }

    /// Payload rendered as space-separated hex bytes.
    pub fn payload_hex(&self) -> String {
        self.data
            .iter()
            .map(|b| format!("{b:02X}"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for TxFrame {
    /// candump-style rendering: `0CF004FE  [8]  00 00 00 40 1F 00 00 00`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:08X}  [{}]  {}",
            self.can_id,
            PAYLOAD_LEN,
            self.payload_hex()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extended_constructor_sets_flag() {
        let frame = TxFrame::extended(0x0CF0_04FE, [0; PAYLOAD_LEN]);
        assert!(frame.extended);
        assert_eq!(frame.can_id, 0x0CF0_04FE);
    }

    #[test]
    fn display_is_candump_style() {
        let frame = TxFrame::extended(0x0CF0_04FE, [0, 0, 0, 0x40, 0x1F, 0, 0, 0]);
        assert_eq!(
            frame.to_string(),
            "0CF004FE  [8]  00 00 00 40 1F 00 00 00"
        );
    }
}
