//! ADC sample lines streamed by the signal relay

use core::fmt::Write;

use heapless::String;

/// Worst-case length of one sample line: five digits plus CRLF.
pub const SAMPLE_LINE_MAX: usize = 7;

/// Encode one ADC reading as a decimal ASCII line.
///
/// The width is whatever the converter produced; a 10-bit board prints
/// `0..=1023`, the RP2040 `0..=4095`. The buffer covers the full `u16`
/// range, so the write below cannot overflow.
pub fn encode_sample(value: u16) -> String<SAMPLE_LINE_MAX> {
    let mut line = String::new();
    let _ = write!(line, "{}\r\n", value);
    line
}

/// Parse a sample line back to its reading.
///
/// Host-side convenience for capture scripts and tests. Accepts a trailing
/// CRLF or bare LF.
pub fn parse_sample_line(line: &str) -> Option<u16> {
    line.trim_end_matches(['\r', '\n']).parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_sample() {
        assert_eq!(encode_sample(0).as_str(), "0\r\n");
        assert_eq!(encode_sample(1023).as_str(), "1023\r\n");
        assert_eq!(encode_sample(4095).as_str(), "4095\r\n");
        assert_eq!(encode_sample(u16::MAX).as_str(), "65535\r\n");
    }

    #[test]
    fn test_parse_sample_line() {
        assert_eq!(parse_sample_line("512\r\n"), Some(512));
        assert_eq!(parse_sample_line("512\n"), Some(512));
        assert_eq!(parse_sample_line("512"), Some(512));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_sample_line("").is_none());
        assert!(parse_sample_line("\r\n").is_none());
        assert!(parse_sample_line("12a4\r\n").is_none());
        assert!(parse_sample_line("70000\r\n").is_none());
    }
}
