//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod host_rx;
pub mod trial;

pub use host_rx::host_rx_task;
pub use trial::trial_task;
