//! Trial and relay schedules

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Fixed trial schedule in milliseconds.
///
/// The three windows run back to back with no gap and no overlap; the
/// trigger line is high for their whole sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TrialTiming {
    /// Odor equilibration window (carrier and vial valve open)
    pub equilibration_ms: u32,
    /// Final-valve pulse width
    pub final_valve_ms: u32,
    /// Settle window before the next command byte is read
    pub settle_ms: u32,
}

impl Default for TrialTiming {
    fn default() -> Self {
        Self {
            equilibration_ms: 4000,
            final_valve_ms: 1000,
            settle_ms: 2000,
        }
    }
}

impl TrialTiming {
    /// Full trial duration.
    pub const fn trial_ms(&self) -> u32 {
        self.equilibration_ms + self.final_valve_ms + self.settle_ms
    }
}

/// Sample cadence of the signal relay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RelayTiming {
    /// Minimum spacing between samples while the trigger is high
    pub sample_interval_ms: u32,
}

impl Default for RelayTiming {
    fn default() -> Self {
        Self { sample_interval_ms: 2 }
    }
}
