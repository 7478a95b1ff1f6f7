//! Valve sequencing for the controller node

pub mod lines;
pub mod sequencer;

pub use lines::LineLevels;
pub use sequencer::TrialSequencer;
