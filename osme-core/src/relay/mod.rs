//! Acquisition-side sample relay

pub mod sampler;

pub use sampler::{LinkState, RelayAction, SampleRelay};
