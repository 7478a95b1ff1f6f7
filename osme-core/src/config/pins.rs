//! Pin assignment table
//!
//! The legacy bench wiring, expressed as data so a rewired board is a
//! config change rather than an edit to the sequencing code. Vial valves
//! run downward from GPIO 10: vial 1 shares the mineral-oil carrier pin,
//! vial 8 sits on GPIO 3.

use heapless::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use osme_protocol::{Vial, VIAL_COUNT};

/// An inclusive run of GPIO numbers treated as one output bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinRange {
    /// First GPIO in the bank
    pub first: u8,
    /// Last GPIO in the bank (inclusive)
    pub last: u8,
}

impl PinRange {
    /// Create a bank covering `first..=last`.
    pub const fn new(first: u8, last: u8) -> Self {
        Self { first, last }
    }

    /// Number of pins in the bank.
    pub const fn len(&self) -> usize {
        if self.last < self.first {
            0
        } else {
            (self.last - self.first + 1) as usize
        }
    }

    /// Check for an empty bank.
    pub const fn is_empty(&self) -> bool {
        self.last < self.first
    }

    /// Check whether the bank covers a GPIO.
    pub const fn contains(&self, pin: u8) -> bool {
        self.first <= pin && pin <= self.last
    }

    /// Iterate the GPIO numbers in the bank.
    pub fn iter(&self) -> core::ops::RangeInclusive<u8> {
        self.first..=self.last
    }
}

/// Errors found by [`PinAssignments::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Two roles share a GPIO (other than the vial-1 / carrier share)
    DuplicatePin(u8),
    /// A valve role sits outside the bulk-reset bank
    OutsideBank(u8),
    /// The trigger or reporter pin falls inside the bank
    BankCollision(u8),
    /// Vial 1 is the blank; its table entry must be the carrier pin
    BlankVialMismatch(u8),
}

/// GPIO assignment for every role in the rig.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinAssignments {
    /// Mineral-oil carrier valve
    pub carrier_valve: u8,
    /// Vial valves indexed by vial number minus one; vial 1 shares the
    /// carrier pin and never gets a valve of its own
    pub vial_valves: [u8; VIAL_COUNT as usize],
    /// Final valve between the manifold and the delivery port
    pub final_valve: u8,
    /// Final-valve reporter output (configured, held low, never driven)
    pub final_valve_reporter: u8,
    /// Trigger line to the signal relay
    pub trigger: u8,
    /// ADC channel carrying the PID signal on the relay node
    pub pid_adc_channel: u8,
    /// Contiguous output bank initialized low and bulk-reset low at the
    /// end of every trial
    pub valve_bank: PinRange,
}

impl Default for PinAssignments {
    fn default() -> Self {
        Self {
            carrier_valve: 10,
            vial_valves: [10, 9, 8, 7, 6, 5, 4, 3],
            final_valve: 11,
            final_valve_reporter: 22,
            trigger: 2,
            pid_adc_channel: 3,
            valve_bank: PinRange::new(3, 12),
        }
    }
}

impl PinAssignments {
    /// GPIO of the valve for a vial.
    ///
    /// `None` for the blank (vial 1), whose delivery path is the carrier
    /// alone.
    pub fn odor_pin_for(&self, vial: Vial) -> Option<u8> {
        if vial.is_blank() {
            None
        } else {
            Some(self.vial_valves[(vial.number() - 1) as usize])
        }
    }

    /// Check the table for wiring conflicts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.vial_valves[0] != self.carrier_valve {
            return Err(ConfigError::BlankVialMismatch(self.vial_valves[0]));
        }

        // Every valve must sit inside the bulk-reset bank
        for pin in self.valve_pins() {
            if !self.valve_bank.contains(pin) {
                return Err(ConfigError::OutsideBank(pin));
            }
        }

        // The trigger and the reporter are never bulk-reset
        for pin in [self.trigger, self.final_valve_reporter] {
            if self.valve_bank.contains(pin) {
                return Err(ConfigError::BankCollision(pin));
            }
        }

        let mut seen: Vec<u8, 16> = Vec::new();
        for pin in self.role_pins() {
            if seen.contains(&pin) {
                return Err(ConfigError::DuplicatePin(pin));
            }
            let _ = seen.push(pin);
        }

        Ok(())
    }

    /// Pins that must fall inside the valve bank.
    fn valve_pins(&self) -> impl Iterator<Item = u8> + '_ {
        [self.carrier_valve, self.final_valve]
            .into_iter()
            .chain(self.vial_valves.iter().skip(1).copied())
    }

    /// Every role pin, with the shared vial-1 entry skipped.
    fn role_pins(&self) -> impl Iterator<Item = u8> + '_ {
        [
            self.carrier_valve,
            self.final_valve,
            self.final_valve_reporter,
            self.trigger,
        ]
        .into_iter()
        .chain(self.vial_valves.iter().skip(1).copied())
    }
}
