//! Trial state machine and its events

pub mod events;
pub mod machine;

pub use events::TrialEvent;
pub use machine::TrialState;
