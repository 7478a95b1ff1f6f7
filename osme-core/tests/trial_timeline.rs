//! End-to-end timeline of one rig: the sequencer and the relay coupled
//! by the trigger level, with every pin change and host line recorded
//! against a shared millisecond clock.

use osme_core::config::{PinAssignments, RelayTiming, TrialTiming};
use osme_core::relay::{RelayAction, SampleRelay};
use osme_core::state::TrialEvent;
use osme_core::traits::{TriggerInput, TriggerOutput};
use osme_core::trial::TrialSequencer;
use osme_protocol::{StatusMarker, Vial};

/// The wire between the two simulated nodes.
#[derive(Default)]
struct TriggerWire {
    level: bool,
}

impl TriggerOutput for TriggerWire {
    fn assert(&mut self) {
        self.level = true;
    }

    fn release(&mut self) {
        self.level = false;
    }

    fn is_asserted(&self) -> bool {
        self.level
    }
}

impl TriggerInput for TriggerWire {
    fn is_asserted(&self) -> bool {
        self.level
    }
}

/// Everything observable from outside the rig.
#[derive(Debug, Default)]
struct Timeline {
    markers: Vec<(u64, StatusMarker)>,
    /// Pin-set changes: (time, GPIOs commanded high)
    pin_changes: Vec<(u64, Vec<u8>)>,
    samples: Vec<u64>,
    link_opens: Vec<u64>,
    link_closes: Vec<u64>,
}

struct Rig {
    seq: TrialSequencer,
    relay: SampleRelay,
    wire: TriggerWire,
    pins: PinAssignments,
    timeline: Timeline,
    pins_high: Vec<u8>,
}

impl Rig {
    fn new(reset_on_invalid: bool) -> Self {
        Self {
            seq: TrialSequencer::new(TrialTiming::default(), reset_on_invalid),
            relay: SampleRelay::new(RelayTiming::default()),
            wire: TriggerWire::default(),
            pins: PinAssignments::default(),
            timeline: Timeline::default(),
            pins_high: Vec::new(),
        }
    }

    /// One millisecond of rig time: controller node first, relay second.
    fn step(&mut self, now: u64, byte: Option<u8>) {
        let event = match byte {
            // The firmware reads the host link only between trials
            Some(b) if self.seq.is_idle() => self.seq.handle_byte(b, now),
            Some(_) => None,
            None => self.seq.tick(now),
        };

        if let Some(event) = event {
            match event {
                TrialEvent::TrialStarted(_) => {
                    self.wire.assert();
                    self.timeline
                        .markers
                        .push((now, StatusMarker::AcquisitionStart));
                }
                TrialEvent::TrialComplete => {
                    self.timeline
                        .markers
                        .push((now, StatusMarker::AcquisitionStop));
                    self.wire.release();
                }
                TrialEvent::EquilibrationDone | TrialEvent::FinalValveClosed => {}
            }
        }

        let high = self
            .seq
            .line_levels()
            .active_pins(&self.pins)
            .as_slice()
            .to_vec();
        if high != self.pins_high {
            self.pins_high = high.clone();
            self.timeline.pin_changes.push((now, high));
        }

        match self.relay.poll(TriggerInput::is_asserted(&self.wire), now) {
            Some(RelayAction::OpenLink) => {
                self.timeline.link_opens.push(now);
                self.timeline.samples.push(now);
            }
            Some(RelayAction::Sample) => self.timeline.samples.push(now),
            Some(RelayAction::CloseLink) => self.timeline.link_closes.push(now),
            None => {}
        }
    }

    /// Deliver one command byte at `now`.
    fn send(&mut self, now: u64, byte: u8) {
        self.step(now, Some(byte));
    }

    /// Let the rig run with no host traffic over `from..to`.
    fn run_quiet(&mut self, from: u64, to: u64) {
        for now in from..to {
            self.step(now, None);
        }
    }
}

#[test]
fn full_trial_timeline_for_vial_3() {
    let mut rig = Rig::new(false);
    rig.send(0, b'3');
    rig.run_quiet(1, 8000);

    assert_eq!(
        rig.timeline.markers,
        vec![
            (0, StatusMarker::AcquisitionStart),
            (7000, StatusMarker::AcquisitionStop),
        ]
    );

    // Trigger 2, carrier 10, odor 8, final valve 11
    assert_eq!(
        rig.timeline.pin_changes,
        vec![
            (0, vec![2, 10, 8]),
            (4000, vec![2, 10, 8, 11]),
            (5000, vec![2, 10, 8]),
            (7000, vec![]),
        ]
    );

    assert_eq!(rig.timeline.link_opens, vec![0]);
    assert_eq!(rig.timeline.link_closes, vec![7000]);

    // One sample every 2 ms across the whole trigger-high window
    assert_eq!(rig.timeline.samples.len(), 3500);
    assert_eq!(rig.timeline.samples.first(), Some(&0));
    assert_eq!(rig.timeline.samples.last(), Some(&6998));
    assert!(rig.timeline.samples.windows(2).all(|w| w[1] - w[0] == 2));
}

#[test]
fn invalid_byte_is_fully_absorbed() {
    let mut rig = Rig::new(false);
    rig.send(0, b'5');
    rig.run_quiet(1, 8000);

    let markers = rig.timeline.markers.len();
    let pin_changes = rig.timeline.pin_changes.len();
    let samples = rig.timeline.samples.len();

    rig.send(8000, b'Q');
    rig.run_quiet(8001, 9000);

    assert_eq!(rig.timeline.markers.len(), markers);
    assert_eq!(rig.timeline.pin_changes.len(), pin_changes);
    assert_eq!(rig.timeline.samples.len(), samples);
    assert_eq!(rig.seq.selection(), Vial::from_command_byte(b'5').unwrap());
}

#[test]
fn reset_policy_clears_selection() {
    let mut rig = Rig::new(true);
    rig.send(0, b'5');
    rig.run_quiet(1, 8000);
    assert_eq!(rig.seq.selection().number(), 5);

    rig.send(8000, b'Q');
    assert!(rig.seq.is_idle());
    assert_eq!(rig.seq.selection(), Vial::MINERAL_OIL);
}

#[test]
fn blank_trial_triggers_acquisition_without_valves() {
    let mut rig = Rig::new(false);
    rig.send(0, b'1');
    rig.run_quiet(1, 8000);

    assert_eq!(
        rig.timeline.pin_changes,
        vec![
            (0, vec![2]),
            (4000, vec![2, 11]),
            (5000, vec![2]),
            (7000, vec![]),
        ]
    );
    assert_eq!(rig.timeline.markers.len(), 2);
    assert!(!rig.timeline.samples.is_empty());
}

#[test]
fn markers_bracket_the_acquisition_window() {
    let mut rig = Rig::new(false);
    rig.send(0, b'4');
    rig.run_quiet(1, 8000);

    let (start_ms, start) = rig.timeline.markers[0];
    let (stop_ms, stop) = rig.timeline.markers[1];
    assert_eq!(start, StatusMarker::AcquisitionStart);
    assert_eq!(stop, StatusMarker::AcquisitionStop);

    // The relay's window coincides with the markers
    assert_eq!(rig.timeline.link_opens, vec![start_ms]);
    assert_eq!(rig.timeline.link_closes, vec![stop_ms]);
    assert!(rig
        .timeline
        .samples
        .iter()
        .all(|t| (start_ms..stop_ms).contains(t)));
}

#[test]
fn back_to_back_trials_reuse_the_wire() {
    let mut rig = Rig::new(false);
    rig.send(0, b'2');
    rig.run_quiet(1, 7500);
    rig.send(7500, b'7');
    rig.run_quiet(7501, 15_000);

    assert_eq!(rig.timeline.markers.len(), 4);
    assert_eq!(rig.timeline.link_opens, vec![0, 7500]);
    assert_eq!(rig.timeline.link_closes, vec![7000, 14_500]);
    assert_eq!(rig.seq.selection().number(), 7);
}
