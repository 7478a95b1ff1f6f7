//! Trial status markers printed to the controller's host

/// Markers bracketing every trial on the controller's host link.
///
/// Marker `1` prints when acquisition starts (trigger line rises), marker
/// `2` when it stops (trigger line falls). Nothing in the rig consumes
/// them; they exist so a capture script can line the host log up with the
/// relay's sample stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StatusMarker {
    /// Trial started, trigger line high.
    AcquisitionStart,
    /// Trial finished, trigger line low.
    AcquisitionStop,
}

const MARKER_START: u8 = 1;
const MARKER_STOP: u8 = 2;

impl StatusMarker {
    /// Numeric code as printed (1 or 2).
    pub fn code(self) -> u8 {
        match self {
            StatusMarker::AcquisitionStart => MARKER_START,
            StatusMarker::AcquisitionStop => MARKER_STOP,
        }
    }

    /// Parse a marker from its numeric code.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            MARKER_START => Some(StatusMarker::AcquisitionStart),
            MARKER_STOP => Some(StatusMarker::AcquisitionStop),
            _ => None,
        }
    }

    /// The exact bytes written to the host link.
    pub fn line(self) -> &'static [u8] {
        match self {
            StatusMarker::AcquisitionStart => b"1\r\n",
            StatusMarker::AcquisitionStop => b"2\r\n",
        }
    }
}
