//! Hardware abstraction traits

pub mod trigger;

pub use trigger::{TriggerInput, TriggerOutput};
