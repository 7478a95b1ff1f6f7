//! Osme - Signal Relay Firmware
//!
//! Acquisition node of the two-node olfactometer rig. Polls the trigger
//! line driven by the valve controller; while it is high, streams PID
//! samples from the ADC to the host serial link, one decimal line every
//! 2 ms. The node never learns which vial was selected - the trigger
//! level is its entire view of the experiment.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{Adc, Async, Channel, Config as AdcConfig, InterruptHandler as AdcInterruptHandler};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, BufferedUartTx, Config as UartConfig, Uart};
use embassy_time::{Duration, Instant, Ticker, Timer};
use embedded_io_async::Write;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use osme_core::config::RelayConfig;
use osme_core::relay::{RelayAction, SampleRelay};
use osme_protocol::{encode_sample, LINK_BAUD};

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
    ADC_IRQ_FIFO => AdcInterruptHandler;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 16]> = StaticCell::new();

/// Trigger poll interval in milliseconds.
///
/// Finer than the 2 ms sample cadence so the engine, not the ticker,
/// sets the spacing; also bounds the latency to notice the trigger fall.
const POLL_INTERVAL_MS: u64 = 1;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Osme signal relay starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = RelayConfig::default();

    // Trigger input, pulled down so an unwired line reads idle
    let trigger = Input::new(p.PIN_2, Pull::Down);

    // PID signal on ADC channel 3 (GPIO 29)
    let adc = Adc::new(p.ADC, Irqs, AdcConfig::default());
    let pid_channel = Channel::new_pin(p.PIN_29, Pull::None);

    // Setup UART for the host link. Only the tx half carries traffic;
    // the rig sends this node nothing.
    let uart_config = {
        let mut cfg = UartConfig::default();
        cfg.baudrate = LINK_BAUD;
        cfg
    };

    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 16]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, _rx) = uart.split();

    info!("Host UART initialized at {} baud", LINK_BAUD);

    spawner.spawn(relay_task(trigger, adc, pid_channel, tx, config)).unwrap();

    info!("Relay task spawned, firmware running");

    loop {
        Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}

/// Relay task - samples the PID signal while the trigger is high
#[embassy_executor::task]
async fn relay_task(
    trigger: Input<'static>,
    mut adc: Adc<'static, Async>,
    mut pid_channel: Channel<'static>,
    mut tx: BufferedUartTx<'static>,
    config: RelayConfig,
) {
    info!(
        "Relay task started: trigger GPIO {}, ADC channel {}, {} ms cadence",
        config.trigger, config.pid_adc_channel, config.timing.sample_interval_ms
    );

    let mut relay = SampleRelay::new(config.timing);
    let mut ticker = Ticker::every(Duration::from_millis(POLL_INTERVAL_MS));
    let start = Instant::now();

    loop {
        ticker.next().await;
        let now_ms = start.elapsed().as_millis();

        match relay.poll(trigger.is_high(), now_ms) {
            Some(RelayAction::OpenLink) => {
                // First sample rides on the open, in the same poll that
                // saw the trigger rise
                info!("Trigger high, sample window open");
                emit_sample(&mut adc, &mut pid_channel, &mut tx).await;
            }
            Some(RelayAction::Sample) => {
                emit_sample(&mut adc, &mut pid_channel, &mut tx).await;
            }
            Some(RelayAction::CloseLink) => {
                if let Err(e) = tx.flush().await {
                    warn!("Flush on close failed: {:?}", e);
                }
                info!("Trigger low, sample window closed");
            }
            None => {}
        }
    }
}

/// Read the PID signal once and print it as a decimal line
async fn emit_sample(
    adc: &mut Adc<'static, Async>,
    pid_channel: &mut Channel<'static>,
    tx: &mut BufferedUartTx<'static>,
) {
    match adc.read(pid_channel).await {
        Ok(raw) => {
            let line = encode_sample(raw);
            if let Err(e) = tx.write_all(line.as_bytes()).await {
                warn!("Sample write failed: {:?}", e);
            }
        }
        Err(e) => {
            // Skip the reading; the engine keeps the window's cadence
            warn!("ADC read failed: {:?}", e);
        }
    }
}
