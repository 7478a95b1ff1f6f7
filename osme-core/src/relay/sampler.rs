//! Sample relay engine
//!
//! Poll-driven core of the acquisition node: while the trigger line is
//! high the host link is open and samples flow at a fixed cadence; the
//! high-to-low edge flushes and closes the link. The caller owns the
//! clock, the pin read, the ADC and the link itself; this type only
//! decides what to do on each poll.

use crate::config::RelayTiming;

/// Host link state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkState {
    /// No acquisition; nothing may be written
    Closed,
    /// Acquisition running; samples flow
    Open,
}

/// What the caller must do after a poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RelayAction {
    /// Open the host link and emit the first sample immediately
    OpenLink,
    /// Emit one sample on the open link
    Sample,
    /// Flush and close the host link
    CloseLink,
}

/// Relay engine for one acquisition node.
#[derive(Debug)]
pub struct SampleRelay {
    /// Sample cadence
    timing: RelayTiming,
    /// Host link state
    link: LinkState,
    /// Time of the most recent sample, monotonic milliseconds
    last_sample_ms: u64,
}

impl SampleRelay {
    /// Create a relay. The link starts closed.
    pub fn new(timing: RelayTiming) -> Self {
        Self {
            timing,
            link: LinkState::Closed,
            last_sample_ms: 0,
        }
    }

    /// Current link state.
    pub fn link(&self) -> LinkState {
        self.link
    }

    /// Check if the host link is open.
    pub fn link_open(&self) -> bool {
        self.link == LinkState::Open
    }

    /// Feed one observation of the trigger line.
    ///
    /// Call on every poll; at most one action comes back. The first
    /// sample of a window rides on [`RelayAction::OpenLink`], in the same
    /// poll that saw the trigger rise.
    pub fn poll(&mut self, trigger_high: bool, now_ms: u64) -> Option<RelayAction> {
        match (self.link, trigger_high) {
            (LinkState::Closed, true) => {
                self.link = LinkState::Open;
                self.last_sample_ms = now_ms;
                Some(RelayAction::OpenLink)
            }
            (LinkState::Closed, false) => None,
            (LinkState::Open, true) => {
                let elapsed = now_ms.saturating_sub(self.last_sample_ms);
                if elapsed >= self.timing.sample_interval_ms as u64 {
                    self.last_sample_ms = now_ms;
                    Some(RelayAction::Sample)
                } else {
                    None
                }
            }
            (LinkState::Open, false) => {
                self.link = LinkState::Closed;
                Some(RelayAction::CloseLink)
            }
        }
    }
}
