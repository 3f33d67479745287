//! Serial command receive task
//!
//! Reads command bytes from the Bluetooth module and posts picture
//! requests. A request that arrives before the previous one is serviced
//! replaces it.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use kinora_protocol::{decode, Command};

use crate::channels::{EVENTS, WAKE};

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 16;

/// Serial RX task - decodes picture select commands
#[embassy_executor::task]
pub async fn serial_rx_task(mut rx: BufferedUartRx) {
    info!("Serial RX task started");

    let events = EVENTS.source();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);

                for command in decode(&buf[..n]) {
                    match command {
                        Command::SelectPicture(index) => {
                            debug!("Picture {} requested", index);
                            events.picture_requested(index);
                            WAKE.signal(());
                        }
                        Command::Unknown(byte) => {
                            warn!("Ignoring unknown command byte {=u8:#x}", byte);
                        }
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
