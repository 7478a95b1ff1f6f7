//! Board-agnostic core logic for the olfactometer rig firmware
//!
//! This crate contains all trial-control logic that does not depend on
//! specific hardware implementations:
//!
//! - Pin assignment and schedule configuration
//! - Trial state machine (idle / equilibrating / final valve / settling)
//! - Valve sequencer driven by a caller-owned monotonic clock
//! - Sample relay engine for the acquisition node
//! - Trigger-line traits shared by both nodes

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod relay;
pub mod state;
pub mod traits;
pub mod trial;
