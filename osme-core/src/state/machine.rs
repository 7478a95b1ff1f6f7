//! Trial state machine
//!
//! Valve levels, the trigger line and the status markers are all a
//! function of the current state and the selected vial.

use super::events::TrialEvent;

/// Trial states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TrialState {
    /// Waiting for a command byte; every output low
    Idle,
    /// Carrier and vial valve open, odor equilibrating in the manifold
    Equilibrating,
    /// Final valve pulsed open, odor reaching the delivery port
    FinalValveOpen,
    /// Final valve closed again, manifold settling before the next trial
    Settling,
}

impl TrialState {
    /// Check if a trial is in progress. This is the trigger-line level.
    pub fn acquisition_active(&self) -> bool {
        !matches!(self, TrialState::Idle)
    }

    /// Check if the carrier and vial valves are energized.
    ///
    /// They open at trial start and stay open until the end-of-trial bulk
    /// reset, through the final-valve pulse and the settle window.
    pub fn odor_path_open(&self) -> bool {
        matches!(
            self,
            TrialState::Equilibrating | TrialState::FinalValveOpen | TrialState::Settling
        )
    }

    /// Check if the final valve is energized.
    pub fn final_valve_open(&self) -> bool {
        matches!(self, TrialState::FinalValveOpen)
    }

    /// Check if a new command byte would be acted on.
    pub fn is_idle(&self) -> bool {
        matches!(self, TrialState::Idle)
    }

    /// Process an event and return the next state
    ///
    /// Trials cannot overlap: while one is running, only the event for
    /// the current phase advances, everything else stays put.
    pub fn transition(self, event: TrialEvent) -> Self {
        use TrialEvent::*;
        use TrialState::*;

        match (self, event) {
            (Idle, TrialStarted(_)) => Equilibrating,
            (Equilibrating, EquilibrationDone) => FinalValveOpen,
            (FinalValveOpen, FinalValveClosed) => Settling,
            (Settling, TrialComplete) => Idle,

            // Default: stay in current state
            _ => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use osme_protocol::Vial;

    fn started() -> TrialEvent {
        TrialEvent::TrialStarted(Vial::MINERAL_OIL)
    }

    #[test]
    fn test_full_cycle() {
        let state = TrialState::Idle;

        let state = state.transition(started());
        assert_eq!(state, TrialState::Equilibrating);

        let state = state.transition(TrialEvent::EquilibrationDone);
        assert_eq!(state, TrialState::FinalValveOpen);

        let state = state.transition(TrialEvent::FinalValveClosed);
        assert_eq!(state, TrialState::Settling);

        let state = state.transition(TrialEvent::TrialComplete);
        assert_eq!(state, TrialState::Idle);
    }

    #[test]
    fn test_no_overlapping_trials() {
        let running = [
            TrialState::Equilibrating,
            TrialState::FinalValveOpen,
            TrialState::Settling,
        ];

        for state in running {
            assert_eq!(state.transition(started()), state);
        }
    }

    #[test]
    fn test_out_of_order_events_stay_put() {
        assert_eq!(
            TrialState::Idle.transition(TrialEvent::TrialComplete),
            TrialState::Idle
        );
        assert_eq!(
            TrialState::Equilibrating.transition(TrialEvent::FinalValveClosed),
            TrialState::Equilibrating
        );
        assert_eq!(
            TrialState::Settling.transition(TrialEvent::EquilibrationDone),
            TrialState::Settling
        );
    }

    #[test]
    fn test_acquisition_active() {
        assert!(!TrialState::Idle.acquisition_active());
        assert!(TrialState::Equilibrating.acquisition_active());
        assert!(TrialState::FinalValveOpen.acquisition_active());
        assert!(TrialState::Settling.acquisition_active());
    }

    #[test]
    fn test_odor_path_open() {
        assert!(!TrialState::Idle.odor_path_open());
        assert!(TrialState::Equilibrating.odor_path_open());
        assert!(TrialState::FinalValveOpen.odor_path_open());
        assert!(TrialState::Settling.odor_path_open());
    }

    #[test]
    fn test_final_valve_open() {
        assert!(!TrialState::Idle.final_valve_open());
        assert!(!TrialState::Equilibrating.final_valve_open());
        assert!(TrialState::FinalValveOpen.final_valve_open());
        assert!(!TrialState::Settling.final_valve_open());
    }
}
