//! Property tests over the full byte domain of each wire surface.

use osme_protocol::{encode_sample, parse_sample_line, StatusMarker, Vial};
use proptest::prelude::*;

proptest! {
    #[test]
    fn command_decode_is_total(byte in any::<u8>()) {
        match Vial::from_command_byte(byte) {
            Some(vial) => {
                prop_assert!((b'1'..=b'8').contains(&byte));
                prop_assert_eq!(vial.command_byte(), byte);
            }
            None => prop_assert!(!(b'1'..=b'8').contains(&byte)),
        }
    }

    #[test]
    fn sample_lines_roundtrip(value in any::<u16>()) {
        let line = encode_sample(value);
        prop_assert!(line.ends_with("\r\n"));
        prop_assert_eq!(parse_sample_line(&line), Some(value));
    }

    #[test]
    fn marker_codes_roundtrip(code in any::<u8>()) {
        match StatusMarker::from_code(code) {
            Some(marker) => prop_assert_eq!(marker.code(), code),
            None => prop_assert!(code != 1 && code != 2),
        }
    }
}
