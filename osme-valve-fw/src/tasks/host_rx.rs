//! Host UART receive task
//!
//! Receives raw command bytes from the host link and queues them for the
//! trial task. No decoding happens here: the sequencer must see invalid
//! bytes too, so its reset-on-invalid policy can apply.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use crate::channels::COMMAND_BYTES;

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 16;

/// Host RX task - forwards raw bytes from the host link
#[embassy_executor::task]
pub async fn host_rx_task(mut rx: BufferedUartRx<'static>) {
    info!("Host RX task started");

    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);

                for &byte in &buf[..n] {
                    // A full queue means the host is flooding commands
                    // mid-trial; dropping matches the legacy controller,
                    // which never buffered more than the UART FIFO.
                    if COMMAND_BYTES.try_send(byte).is_err() {
                        warn!("Command queue full, dropping byte {:#x}", byte);
                    }
                }
            }
            Ok(_) => {
                // No bytes read, continue
            }
            Err(e) => {
                warn!("UART read error: {:?}", e);
            }
        }
    }
}
