//! Deadline-driven valve sequencer
//!
//! Owns the trial state, the vial selection and the phase deadlines. The
//! caller owns the clock: it feeds monotonic milliseconds into
//! [`TrialSequencer::tick`] and maps the returned events onto hardware.

use osme_protocol::Vial;

use super::lines::LineLevels;
use crate::config::TrialTiming;
use crate::state::{TrialEvent, TrialState};

/// Valve sequencer for one controller node.
#[derive(Debug)]
pub struct TrialSequencer {
    /// Trial schedule
    timing: TrialTiming,
    /// Reset the selection to the blank on an invalid byte
    reset_on_invalid: bool,
    /// Current trial state
    state: TrialState,
    /// Selected vial; persists between trials
    selection: Vial,
    /// Deadline of the current phase, monotonic milliseconds
    deadline_ms: u64,
}

impl TrialSequencer {
    /// Create a sequencer. The power-on selection is the mineral-oil
    /// blank.
    pub fn new(timing: TrialTiming, reset_on_invalid: bool) -> Self {
        Self {
            timing,
            reset_on_invalid,
            state: TrialState::Idle,
            selection: Vial::MINERAL_OIL,
            deadline_ms: 0,
        }
    }

    /// Current trial state.
    pub fn state(&self) -> TrialState {
        self.state
    }

    /// Current vial selection.
    pub fn selection(&self) -> Vial {
        self.selection
    }

    /// Check if the next command byte would be acted on.
    pub fn is_idle(&self) -> bool {
        self.state.is_idle()
    }

    /// Commanded output levels for the current state and selection.
    pub fn line_levels(&self) -> LineLevels {
        LineLevels::for_state(self.state, self.selection)
    }

    /// Feed one command byte from the host link.
    ///
    /// A valid byte while idle updates the selection and starts the
    /// schedule. An invalid byte is absorbed: no event, no deadline, and
    /// the selection persists or resets to the blank per the configured
    /// policy. Callers poll for bytes only between trials; a byte fed
    /// mid-trial is ignored.
    pub fn handle_byte(&mut self, byte: u8, now_ms: u64) -> Option<TrialEvent> {
        if !self.state.is_idle() {
            return None;
        }

        match Vial::from_command_byte(byte) {
            Some(vial) => {
                self.selection = vial;
                self.deadline_ms = now_ms + self.timing.equilibration_ms as u64;
                let event = TrialEvent::TrialStarted(vial);
                self.state = self.state.transition(event);
                Some(event)
            }
            None => {
                if self.reset_on_invalid {
                    self.selection = Vial::MINERAL_OIL;
                }
                None
            }
        }
    }

    /// Advance the schedule once the current phase deadline has passed.
    ///
    /// Returns at most one event per call. Deadlines accumulate from the
    /// trial's start, so tick jitter shifts when an event is observed but
    /// never stretches the schedule itself.
    pub fn tick(&mut self, now_ms: u64) -> Option<TrialEvent> {
        if self.state.is_idle() || now_ms < self.deadline_ms {
            return None;
        }

        let event = match self.state {
            TrialState::Equilibrating => {
                self.deadline_ms += self.timing.final_valve_ms as u64;
                TrialEvent::EquilibrationDone
            }
            TrialState::FinalValveOpen => {
                self.deadline_ms += self.timing.settle_ms as u64;
                TrialEvent::FinalValveClosed
            }
            TrialState::Settling => TrialEvent::TrialComplete,
            TrialState::Idle => return None,
        };

        self.state = self.state.transition(event);
        Some(event)
    }
}
