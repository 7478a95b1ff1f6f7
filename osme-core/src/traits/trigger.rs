//! Trigger-line traits
//!
//! The trigger is a bare GPIO level with exactly one writer (the valve
//! controller) and one reader (the signal relay). No acknowledgement
//! travels back; the level itself is the whole contract.

/// Writer side of the trigger line.
///
/// Implemented by the controller firmware over a push-pull output.
pub trait TriggerOutput {
    /// Drive the line high (acquisition active).
    fn assert(&mut self);

    /// Drive the line low (acquisition stopped).
    fn release(&mut self);

    /// Level currently driven.
    fn is_asserted(&self) -> bool;
}

/// Reader side of the trigger line.
///
/// Implemented by the relay firmware over a GPIO input.
pub trait TriggerInput {
    /// Level currently observed.
    fn is_asserted(&self) -> bool;
}
