//! Pin role to physical bit mapping and mask rendering
//!
//! The FT232R pin header used for the loopback harness:
//!   1 -> TX, 2 -> RX, 3 -> RTS, 4 -> CTS, 5 -> DTR, 6 -> DSR, 7 -> DCD, 8 -> RI
//! Pin N maps to bit N-1 of the bit-bang state byte.

use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An 8-bit pin state mask, one bit per physical signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinMask(pub u8);

impl PinMask {
    /// The all-low quiescent state written between probes
    pub const ZERO: PinMask = PinMask(0x00);

    /// Raw byte value for the device write
    pub fn bits(self) -> u8 {
        self.0
    }

    /// Check whether every bit of `other` is set in this mask
    pub fn contains(self, other: PinMask) -> bool {
        self.0 & other.0 == other.0
    }

    /// Render as an 8-character binary string, most-significant bit first
    pub fn render(self) -> String {
        (0..8)
            .map(|i| if self.0 & (1 << (7 - i)) != 0 { '1' } else { '0' })
            .collect()
    }
}

impl std::ops::BitOr for PinMask {
    type Output = PinMask;

    fn bitor(self, rhs: PinMask) -> PinMask {
        PinMask(self.0 | rhs.0)
    }
}

impl std::ops::BitAnd for PinMask {
    type Output = PinMask;

    fn bitand(self, rhs: PinMask) -> PinMask {
        PinMask(self.0 & rhs.0)
    }
}

impl fmt::Display for PinMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0b{}", self.render())
    }
}

/// Logical role of a physical signal on the adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PinRole {
    /// TX, pin 1: the loopback output the trigger task drives
    LoopbackWrite,
    /// RX, pin 2: the loopback input the listener task watches
    LoopbackRead,
    /// RTS, pin 3
    Request,
    /// CTS, pin 4
    ClearToSend,
    /// DTR, pin 5
    DataTerminalReady,
    /// DSR, pin 6
    DataSetReady,
    /// DCD, pin 7
    CarrierDetect,
    /// RI, pin 8
    RingIndicator,
}

/// All roles in physical pin order
pub const ALL_ROLES: [PinRole; 8] = [
    PinRole::LoopbackWrite,
    PinRole::LoopbackRead,
    PinRole::Request,
    PinRole::ClearToSend,
    PinRole::DataTerminalReady,
    PinRole::DataSetReady,
    PinRole::CarrierDetect,
    PinRole::RingIndicator,
];

/// Union of every output-group role; the byte handed to bit-bang mode
/// configuration so the device never drives an input-group pin.
pub const OUTPUT_MASK: PinMask = PinMask(0b0001_0101);

impl PinRole {
    /// Physical bit mask for this role. Deterministic, no side effects.
    pub fn mask(self) -> PinMask {
        match self {
            PinRole::LoopbackWrite => PinMask(1 << 0),
            PinRole::LoopbackRead => PinMask(1 << 1),
            PinRole::Request => PinMask(1 << 2),
            PinRole::ClearToSend => PinMask(1 << 3),
            PinRole::DataTerminalReady => PinMask(1 << 4),
            PinRole::DataSetReady => PinMask(1 << 5),
            PinRole::CarrierDetect => PinMask(1 << 6),
            PinRole::RingIndicator => PinMask(1 << 7),
        }
    }

    /// Whether this role belongs to the output group
    pub fn is_output(self) -> bool {
        matches!(
            self,
            PinRole::LoopbackWrite | PinRole::Request | PinRole::DataTerminalReady
        )
    }

    /// Look up a role from its 1-based physical pin index
    pub fn from_index(index: u8) -> Result<PinRole> {
        match index {
            1..=8 => Ok(ALL_ROLES[(index - 1) as usize]),
            _ => Err(AppError::validation(format!(
                "Pin index must be between 1 and 8, got {}",
                index
            ))),
        }
    }

    /// Human-readable signal name
    pub fn name(self) -> &'static str {
        match self {
            PinRole::LoopbackWrite => "TX",
            PinRole::LoopbackRead => "RX",
            PinRole::Request => "RTS",
            PinRole::ClearToSend => "CTS",
            PinRole::DataTerminalReady => "DTR",
            PinRole::DataSetReady => "DSR",
            PinRole::CarrierDetect => "DCD",
            PinRole::RingIndicator => "RI",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_role_has_exactly_one_bit() {
        for role in ALL_ROLES {
            assert_eq!(role.mask().bits().count_ones(), 1, "role {:?}", role);
        }
    }

    #[test]
    fn test_roles_map_to_distinct_bits() {
        let mut seen = 0u8;
        for role in ALL_ROLES {
            assert_eq!(seen & role.mask().bits(), 0, "role {:?} overlaps", role);
            seen |= role.mask().bits();
        }
        assert_eq!(seen, 0xFF);
    }

    #[test]
    fn test_output_and_input_groups_never_intersect() {
        let output = ALL_ROLES
            .iter()
            .filter(|r| r.is_output())
            .fold(PinMask::ZERO, |acc, r| acc | r.mask());
        let input = ALL_ROLES
            .iter()
            .filter(|r| !r.is_output())
            .fold(PinMask::ZERO, |acc, r| acc | r.mask());

        assert_eq!((output & input).bits(), 0);
        assert_eq!(output, OUTPUT_MASK);
    }

    #[test]
    fn test_output_mask_excludes_loopback_read() {
        assert!(!OUTPUT_MASK.contains(PinRole::LoopbackRead.mask()));
        assert!(OUTPUT_MASK.contains(PinRole::LoopbackWrite.mask()));
    }

    #[test]
    fn test_render() {
        assert_eq!(PinMask(0x01).render(), "00000001");
        assert_eq!(PinMask(0x80).render(), "10000000");
        assert_eq!(PinMask(0x00).render(), "00000000");
        assert_eq!(PinMask(0b0001_0101).render(), "00010101");
    }

    #[test]
    fn test_from_index_valid_range() {
        assert_eq!(PinRole::from_index(1).unwrap(), PinRole::LoopbackWrite);
        assert_eq!(PinRole::from_index(2).unwrap(), PinRole::LoopbackRead);
        assert_eq!(PinRole::from_index(8).unwrap(), PinRole::RingIndicator);
    }

    #[test]
    fn test_from_index_out_of_range() {
        assert!(PinRole::from_index(0).is_err());
        assert!(PinRole::from_index(9).is_err());
    }

    #[test]
    fn test_index_matches_bit_position() {
        for index in 1..=8u8 {
            let role = PinRole::from_index(index).unwrap();
            assert_eq!(role.mask().bits(), 1 << (index - 1));
        }
    }

    #[test]
    fn test_display_format() {
        assert_eq!(format!("{}", PinMask(0x01)), "0b00000001");
    }
}
