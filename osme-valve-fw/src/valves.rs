//! Valve bank and trigger line drivers
//!
//! The valve bank is the contiguous GPIO run that the legacy rig
//! initialized low and bulk-reset low at the end of every trial. Holding
//! the pins as one bank means the end-of-trial reset closes everything in
//! a single sweep, whatever the trial opened.

use defmt::*;
use embassy_rp::gpio::Output;

use osme_core::config::PinAssignments;
use osme_core::traits::TriggerOutput;
use osme_core::trial::LineLevels;

/// Pins in the valve bank (GPIO 3..=12).
pub const BANK_SIZE: usize = 10;

/// The controller's valve outputs, addressed by GPIO number.
pub struct ValveBank {
    pins: PinAssignments,
    bank: [(u8, Output<'static>); BANK_SIZE],
}

impl ValveBank {
    /// Take ownership of the bank outputs, already constructed low.
    pub fn new(pins: PinAssignments, bank: [(u8, Output<'static>); BANK_SIZE]) -> Self {
        for (gpio, _) in &bank {
            if !pins.valve_bank.contains(*gpio) {
                warn!("GPIO {} handed to the bank but outside its range", gpio);
            }
        }
        Self { pins, bank }
    }

    /// Drive the bank to match a level snapshot.
    ///
    /// Pins outside the bank (the trigger) are not touched here; the
    /// trial task owns those directly.
    pub fn apply(&mut self, levels: &LineLevels) {
        let high = levels.active_pins(&self.pins);
        for (gpio, out) in &mut self.bank {
            if high.contains(gpio) {
                out.set_high();
            } else {
                out.set_low();
            }
        }
    }

    /// Bulk reset: every bank pin low.
    pub fn reset(&mut self) {
        for (_, out) in &mut self.bank {
            out.set_low();
        }
    }
}

/// Trigger line to the signal relay, the writer side.
pub struct TriggerLine {
    out: Output<'static>,
}

impl TriggerLine {
    /// Wrap the trigger output, already constructed low.
    pub fn new(out: Output<'static>) -> Self {
        Self { out }
    }
}

impl TriggerOutput for TriggerLine {
    fn assert(&mut self) {
        self.out.set_high();
    }

    fn release(&mut self) {
        self.out.set_low();
    }

    fn is_asserted(&self) -> bool {
        self.out.is_set_high()
    }
}
