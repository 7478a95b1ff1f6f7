//! Vial selection commands from the host

/// Number of addressable vials.
pub const VIAL_COUNT: u8 = 8;

/// One odor vial, addressed by a single ASCII command byte.
///
/// Vial 1 holds the mineral-oil blank and is the power-on selection; a
/// trial on it runs the full valve schedule with no odor valve energized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Vial(u8);

impl Vial {
    /// The mineral-oil blank, selected at power-on.
    pub const MINERAL_OIL: Vial = Vial(1);

    /// Parse a vial from its command byte (`'1'..='8'`).
    ///
    /// Every other byte value is invalid and decodes to `None`; the
    /// controller absorbs those without starting a trial.
    pub fn from_command_byte(byte: u8) -> Option<Self> {
        match byte {
            b'1'..=b'8' => Some(Vial(byte - b'0')),
            _ => None,
        }
    }

    /// Convert back to the command byte.
    pub fn command_byte(self) -> u8 {
        b'0' + self.0
    }

    /// Vial number, 1..=8.
    pub fn number(self) -> u8 {
        self.0
    }

    /// Returns true for the mineral-oil blank.
    pub fn is_blank(self) -> bool {
        self.0 == 1
    }
}
