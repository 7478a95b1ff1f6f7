//! Role-level output snapshot

use heapless::Vec;

use osme_protocol::Vial;

use crate::config::PinAssignments;
use crate::state::TrialState;

/// Commanded level of every controller output, derived purely from the
/// trial state and the selected vial.
///
/// The firmware applies consecutive snapshots to the GPIO bank; tests
/// assert on snapshots directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LineLevels {
    /// Trigger line to the signal relay
    pub trigger: bool,
    /// Mineral-oil carrier valve
    pub carrier: bool,
    /// Energized odor valve, `None` when no vial valve is open
    pub odor_vial: Option<Vial>,
    /// Final valve
    pub final_valve: bool,
}

impl LineLevels {
    /// Everything low.
    pub const fn idle() -> Self {
        Self {
            trigger: false,
            carrier: false,
            odor_vial: None,
            final_valve: false,
        }
    }

    /// Derive the snapshot for a state and selection.
    ///
    /// Blank trials (vial 1) energize no valve at all; the carrier path
    /// is the default air path and needs no drive.
    pub fn for_state(state: TrialState, selection: Vial) -> Self {
        let odor_open = state.odor_path_open() && !selection.is_blank();
        Self {
            trigger: state.acquisition_active(),
            carrier: odor_open,
            odor_vial: if odor_open { Some(selection) } else { None },
            final_valve: state.final_valve_open(),
        }
    }

    /// GPIO numbers currently commanded high, per the pin table.
    pub fn active_pins(&self, pins: &PinAssignments) -> Vec<u8, 4> {
        let mut high = Vec::new();
        if self.trigger {
            let _ = high.push(pins.trigger);
        }
        if self.carrier {
            let _ = high.push(pins.carrier_valve);
        }
        if let Some(vial) = self.odor_vial {
            if let Some(pin) = pins.odor_pin_for(vial) {
                let _ = high.push(pin);
            }
        }
        if self.final_valve {
            let _ = high.push(pins.final_valve);
        }
        high
    }
}
