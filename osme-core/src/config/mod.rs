//! Configuration types for both rig nodes
//!
//! Plain data with defaults carrying the legacy bench wiring and the fixed
//! trial schedule. Firmware injects these at initialization; nothing is
//! persisted.

mod pins;
mod timing;

pub use pins::{ConfigError, PinAssignments, PinRange};
pub use timing::{RelayTiming, TrialTiming};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Valve controller node configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ControllerConfig {
    /// GPIO assignment table
    pub pins: PinAssignments,
    /// Trial schedule
    pub timing: TrialTiming,
    /// Reset the vial selection to the blank on an invalid command byte.
    ///
    /// The legacy behavior (`false`) leaves the previous selection in
    /// place. Either way an invalid byte starts no trial, moves no pin
    /// and prints no marker.
    pub reset_on_invalid: bool,
}

/// Signal relay node configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RelayConfig {
    /// Trigger input GPIO (wired to the controller's trigger output)
    pub trigger: u8,
    /// ADC channel carrying the PID signal
    pub pid_adc_channel: u8,
    /// Sample cadence
    pub timing: RelayTiming,
}

impl Default for RelayConfig {
    fn default() -> Self {
        let pins = PinAssignments::default();
        Self {
            trigger: pins.trigger,
            pid_adc_channel: pins.pid_adc_channel,
            timing: RelayTiming::default(),
        }
    }
}
