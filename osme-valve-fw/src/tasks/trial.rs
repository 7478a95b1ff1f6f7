//! Trial control task
//!
//! Owns the sequencer, the valve bank, the trigger line and the host tx
//! half. While idle it waits for a command byte; while a trial runs it
//! only ticks the sequencer, so queued bytes wait until the trial is over
//! (the legacy controller read its serial port only between trials).

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_rp::uart::BufferedUartTx;
use embassy_time::{Duration, Instant, Timer};
use embedded_io_async::Write;

use osme_core::config::ControllerConfig;
use osme_core::state::TrialEvent;
use osme_core::traits::TriggerOutput;
use osme_core::trial::TrialSequencer;
use osme_protocol::StatusMarker;

use crate::channels::COMMAND_BYTES;
use crate::valves::{TriggerLine, ValveBank};

/// Sequencer tick interval in milliseconds.
///
/// Bounds the jitter on each phase boundary; deadlines themselves
/// accumulate inside the sequencer, so jitter never stretches a trial.
const SEQUENCER_TICK_MS: u64 = 5;

/// Trial task - decodes commands and runs the valve schedule
#[embassy_executor::task]
pub async fn trial_task(
    config: ControllerConfig,
    mut bank: ValveBank,
    mut trigger: TriggerLine,
    mut tx: BufferedUartTx<'static>,
) {
    info!(
        "Trial task started: schedule {}+{}+{} ms, reset_on_invalid={}",
        config.timing.equilibration_ms,
        config.timing.final_valve_ms,
        config.timing.settle_ms,
        config.reset_on_invalid
    );

    let mut seq = TrialSequencer::new(config.timing, config.reset_on_invalid);
    let start = Instant::now();

    loop {
        let event = if seq.is_idle() {
            match select(
                COMMAND_BYTES.receive(),
                Timer::after(Duration::from_millis(SEQUENCER_TICK_MS)),
            )
            .await
            {
                Either::First(byte) => {
                    let now_ms = start.elapsed().as_millis();
                    let event = seq.handle_byte(byte, now_ms);
                    if event.is_none() {
                        debug!("Absorbed byte {:#x}", byte);
                    }
                    event
                }
                Either::Second(()) => None,
            }
        } else {
            Timer::after(Duration::from_millis(SEQUENCER_TICK_MS)).await;
            seq.tick(start.elapsed().as_millis())
        };

        if let Some(event) = event {
            // Ordering on the wire: the trigger rises before marker 1 and
            // the valves; the bank resets before marker 2 and the trigger
            // falling. The relay's window therefore brackets everything.
            match event {
                TrialEvent::TrialStarted(vial) => {
                    info!("Trial started: vial {}", vial.number());
                    trigger.assert();
                    write_marker(&mut tx, StatusMarker::AcquisitionStart).await;
                    bank.apply(&seq.line_levels());
                }
                TrialEvent::EquilibrationDone => {
                    debug!("Equilibration done, final valve open");
                    bank.apply(&seq.line_levels());
                }
                TrialEvent::FinalValveClosed => {
                    debug!("Final valve closed, settling");
                    bank.apply(&seq.line_levels());
                }
                TrialEvent::TrialComplete => {
                    bank.reset();
                    write_marker(&mut tx, StatusMarker::AcquisitionStop).await;
                    trigger.release();
                    info!("Trial complete");
                }
            }
        }
    }
}

/// Print one status marker line on the host link
async fn write_marker(tx: &mut BufferedUartTx<'static>, marker: StatusMarker) {
    if let Err(e) = tx.write_all(marker.line()).await {
        warn!("Failed to write marker {}: {:?}", marker.code(), e);
    }
}
