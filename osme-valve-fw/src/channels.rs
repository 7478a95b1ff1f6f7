//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.
//! Uses embassy-sync primitives for safe async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

/// Channel capacity for raw command bytes from the host link
const COMMAND_CHANNEL_SIZE: usize = 8;

/// Raw command bytes from the host link.
///
/// The rx task pushes every byte unparsed; the trial task decides what a
/// byte means, so invalid bytes still reach the sequencer's reset policy.
pub static COMMAND_BYTES: Channel<CriticalSectionRawMutex, u8, COMMAND_CHANNEL_SIZE> =
    Channel::new();
