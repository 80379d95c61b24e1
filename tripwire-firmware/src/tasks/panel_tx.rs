//! Panel UART transmit task

use defmt::*;
use embassy_rp::uart::BufferedUartTx;
use embedded_io_async::Write;

use crate::channels::PANEL_TX;

/// Panel TX task - encodes queued messages onto the UART
#[embassy_executor::task]
pub async fn panel_tx_task(mut tx: BufferedUartTx) {
    info!("Panel TX task started");

    loop {
        let message = PANEL_TX.receive().await;

        let encoded = match message.to_frame().and_then(|frame| frame.encode_to_vec()) {
            Ok(encoded) => encoded,
            Err(e) => {
                warn!("Failed to encode {:?}: {:?}", message, e);
                continue;
            }
        };

        if let Err(e) = tx.write_all(&encoded).await {
            warn!("Failed to send {:?}: {:?}", message, e);
        } else {
            trace!("TX: {:?}", message);
        }
    }
}
