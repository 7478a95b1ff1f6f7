//! Osme - Valve Controller Firmware
//!
//! Controller node of the two-node olfactometer rig. Listens on the host
//! serial link for single-byte vial commands, runs the fixed valve
//! schedule for each trial, and drives the trigger line that tells the
//! signal relay node to stream PID samples.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use osme_core::config::ControllerConfig;
use osme_protocol::LINK_BAUD;

use crate::valves::{TriggerLine, ValveBank};

mod channels;
mod tasks;
mod valves;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 64]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Osme valve controller starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = ControllerConfig::default();
    if let Err(e) = config.pins.validate() {
        // A bad table means the board is miswired relative to the code;
        // keep running so the host link still answers, but say so loudly.
        error!("Pin table validation failed: {:?}", e);
    }

    // Setup UART for the host link
    let uart_config = {
        let mut cfg = UartConfig::default();
        cfg.baudrate = LINK_BAUD;
        cfg
    };

    let tx_buf = TX_BUF.init([0u8; 64]);
    let rx_buf = RX_BUF.init([0u8; 64]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    info!("Host UART initialized at {} baud", LINK_BAUD);

    // Valve bank: GPIO 3..=12 as outputs, all low.
    // Carrier valve 10, vials 2-8 on 9 down to 3, final valve 11; 12 is
    // wired but unassigned and rides along in the bulk reset.
    let bank = ValveBank::new(
        config.pins,
        [
            (3, Output::new(p.PIN_3, Level::Low)),
            (4, Output::new(p.PIN_4, Level::Low)),
            (5, Output::new(p.PIN_5, Level::Low)),
            (6, Output::new(p.PIN_6, Level::Low)),
            (7, Output::new(p.PIN_7, Level::Low)),
            (8, Output::new(p.PIN_8, Level::Low)),
            (9, Output::new(p.PIN_9, Level::Low)),
            (10, Output::new(p.PIN_10, Level::Low)),
            (11, Output::new(p.PIN_11, Level::Low)),
            (12, Output::new(p.PIN_12, Level::Low)),
        ],
    );

    // Final-valve reporter: configured output, held low, never driven.
    // The bench apparatus expects the pin to exist; its actuation has
    // been disabled for as long as anyone remembers.
    let _final_valve_reporter = Output::new(p.PIN_22, Level::Low);

    // Trigger line to the signal relay, low until the first trial
    let trigger = TriggerLine::new(Output::new(p.PIN_2, Level::Low));

    info!("Valve bank and trigger line initialized");

    // Spawn tasks
    spawner.spawn(tasks::host_rx_task(rx)).unwrap();
    spawner.spawn(tasks::trial_task(config, bank, trigger, tx)).unwrap();

    info!("All tasks spawned, firmware running");

    // Main task has nothing else to do - all work happens in spawned tasks
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
