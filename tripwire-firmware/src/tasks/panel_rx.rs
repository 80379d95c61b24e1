//! Panel UART receive task
//!
//! Receives frames from the panel and turns them into guard commands.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embassy_time::Instant;
use embedded_io_async::Read;

use tripwire_core::guard::Command;
use tripwire_core::secret::{to_secret, validate_new_secret};
use tripwire_core::state::Event;
use tripwire_core::error::{GuardError, ValidationError};
use tripwire_protocol::{ControllerMessage, Frame, FrameParser, NoticeCode, PanelMessage};

use crate::channels::{COMMANDS, PANEL_TX};
use crate::report::{lifecycle_from, notice_for};

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// Panel RX task - receives and parses frames from the panel
#[embassy_executor::task]
pub async fn panel_rx_task(mut rx: BufferedUartRx) {
    info!("Panel RX task started");

    let mut parser = FrameParser::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);
                for &byte in &buf[..n] {
                    match parser.feed(byte) {
                        Ok(Some(frame)) => handle_frame(&frame).await,
                        Ok(None) => {}
                        Err(e) => {
                            warn!("Frame parse error: {:?}", e);
                            reply(ControllerMessage::Notice(NoticeCode::Malformed));
                        }
                    }
                }
            }
            Ok(_) => {}
            Err(e) => {
                warn!("UART read error: {:?}", e);
            }
        }
    }
}

async fn handle_frame(frame: &Frame) {
    let message = match PanelMessage::from_frame(frame) {
        Ok(message) => message,
        Err(e) => {
            warn!("Bad panel message {:#x}: {:?}", frame.msg_type, e);
            reply(ControllerMessage::Notice(NoticeCode::Malformed));
            return;
        }
    };

    let command = match message {
        PanelMessage::Ping => {
            trace!("PING received");
            reply(ControllerMessage::Pong);
            return;
        }
        PanelMessage::Arm => Command::Arm {
            now_ms: Instant::now().as_millis(),
        },
        PanelMessage::SetSecret { first, confirm } => {
            let (Some(first_secret), Some(confirm_secret)) = (to_secret(first), to_secret(confirm))
            else {
                // Over capacity, let the validation rules pick the complaint
                let error = validate_new_secret(first, confirm)
                    .err()
                    .unwrap_or(ValidationError::TooLong);
                reply(ControllerMessage::Notice(notice_for(GuardError::from(error))));
                return;
            };
            Command::SetSecret {
                first: first_secret,
                confirm: confirm_secret,
            }
        }
        PanelMessage::Disarm { candidate } => match to_secret(candidate) {
            Some(candidate) => Command::Disarm { candidate },
            // Longer than any secret that could have been saved
            None => {
                reply(ControllerMessage::Notice(NoticeCode::AuthMismatch));
                return;
            }
        },
        PanelMessage::Back => Command::Back,
        PanelMessage::Lifecycle(report) => {
            debug!("Panel lifecycle: {:?}", report);
            Command::Event(Event::LifecycleChanged(lifecycle_from(report)))
        }
    };

    COMMANDS.send(command).await;
}

/// Queue a direct reply, dropping it if the panel is not keeping up
fn reply(message: ControllerMessage) {
    if PANEL_TX.try_send(message).is_err() {
        warn!("Panel TX queue full, dropping {:?}", message);
    }
}
