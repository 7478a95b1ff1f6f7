//! Events that advance a trial

use osme_protocol::Vial;

/// Trial events.
///
/// The first comes from the host link; the other three are raised by the
/// sequencer when a phase deadline passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TrialEvent {
    /// A valid command byte was accepted; the schedule begins
    TrialStarted(Vial),
    /// Equilibration window elapsed; the final valve opens
    EquilibrationDone,
    /// Final-valve pulse elapsed; the valve closes for the settle window
    FinalValveClosed,
    /// Settle window elapsed; every output returns low
    TrialComplete,
}

impl TrialEvent {
    /// Returns true for the event that opens a trial (marker 1, trigger
    /// rise).
    pub fn starts_trial(&self) -> bool {
        matches!(self, TrialEvent::TrialStarted(_))
    }

    /// Returns true for the event that closes a trial (marker 2, trigger
    /// fall).
    pub fn ends_trial(&self) -> bool {
        matches!(self, TrialEvent::TrialComplete)
    }
}
