//! Olfactometer Rig Wire Contract
//!
//! This crate defines the serial surfaces of the two-node Osme rig: the
//! command bytes the valve controller accepts, the status markers it prints,
//! and the sample lines the signal relay streams. Everything is plain ASCII,
//! so a terminal attached to either host link shows the traffic as-is.
//!
//! # Surfaces
//!
//! ```text
//! host A ──'1'..'8'──▶ valve controller ──"1\r\n" / "2\r\n"──▶ host A
//!                      valve controller ──trigger (GPIO level)──▶ signal relay
//!                                          signal relay ──"NNNN\r\n"──▶ host B
//! ```
//!
//! The trigger line carries no bytes. It is a bare level signal, high for
//! exactly the duration of a trial, and is the only coupling between the
//! two nodes.

#![no_std]
#![deny(unsafe_code)]

pub mod command;
pub mod markers;
pub mod samples;

pub use command::{Vial, VIAL_COUNT};
pub use markers::StatusMarker;
pub use samples::{encode_sample, parse_sample_line, SAMPLE_LINE_MAX};

/// Baud rate of both host links (8N1).
pub const LINK_BAUD: u32 = 9600;

/// Terminator of every printed line.
pub const LINE_END: &[u8] = b"\r\n";
