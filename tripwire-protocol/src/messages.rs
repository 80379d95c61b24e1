//! Message types for the panel link
//!
//! Message types are divided into two categories:
//! - Panel → Controller: user commands, lifecycle reports, heartbeat requests
//! - Controller → Panel: status, notices, heartbeat responses
//!
//! Text fields are UTF-8, prefixed with a one-byte length.

use heapless::Vec;

use crate::codes::{GuardStatus, LifecycleReport, NoticeCode};
use crate::frame::{Frame, FrameError, MAX_PAYLOAD_SIZE};

// Message type IDs: Panel → Controller
pub const MSG_ARM: u8 = 0x01;
pub const MSG_SET_SECRET: u8 = 0x02;
pub const MSG_DISARM: u8 = 0x03;
pub const MSG_BACK: u8 = 0x04;
pub const MSG_LIFECYCLE: u8 = 0x05;
pub const MSG_PING: u8 = 0x06;

// Message type IDs: Controller → Panel
pub const MSG_STATUS: u8 = 0x20;
pub const MSG_NOTICE: u8 = 0x21;
pub const MSG_BACK_RESULT: u8 = 0x22;
pub const MSG_LOCK_PORTRAIT: u8 = 0x23;
pub const MSG_PONG: u8 = 0x24;

type Payload = Vec<u8, MAX_PAYLOAD_SIZE>;

/// Messages from the panel to the controller
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelMessage<'a> {
    /// Arm button pressed
    Arm,
    /// New secret entered twice
    SetSecret { first: &'a str, confirm: &'a str },
    /// Secret entered on the disarm screen
    Disarm { candidate: &'a str },
    /// Back button pressed
    Back,
    /// Panel moved to or from the foreground
    Lifecycle(LifecycleReport),
    /// Heartbeat request
    Ping,
}

impl<'a> PanelMessage<'a> {
    /// Parse a message from a frame
    ///
    /// Text fields borrow from the frame payload.
    pub fn from_frame(frame: &'a Frame) -> Result<Self, FrameError> {
        let mut reader = PayloadReader::new(&frame.payload);
        let message = match frame.msg_type {
            MSG_ARM => PanelMessage::Arm,
            MSG_SET_SECRET => {
                let first = reader.text()?;
                let confirm = reader.text()?;
                PanelMessage::SetSecret { first, confirm }
            }
            MSG_DISARM => PanelMessage::Disarm {
                candidate: reader.text()?,
            },
            MSG_BACK => PanelMessage::Back,
            MSG_LIFECYCLE => {
                let report =
                    LifecycleReport::from_byte(reader.byte()?).ok_or(FrameError::InvalidFrame)?;
                PanelMessage::Lifecycle(report)
            }
            MSG_PING => PanelMessage::Ping,
            _ => return Err(FrameError::InvalidFrame),
        };
        reader.finish()?;
        Ok(message)
    }

    /// Encode this message into a frame (for testing or simulation)
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        match self {
            PanelMessage::Arm => Ok(Frame::empty(MSG_ARM)),
            PanelMessage::SetSecret { first, confirm } => {
                let mut payload = Payload::new();
                push_text(&mut payload, first)?;
                push_text(&mut payload, confirm)?;
                Frame::new(MSG_SET_SECRET, &payload)
            }
            PanelMessage::Disarm { candidate } => {
                let mut payload = Payload::new();
                push_text(&mut payload, candidate)?;
                Frame::new(MSG_DISARM, &payload)
            }
            PanelMessage::Back => Ok(Frame::empty(MSG_BACK)),
            PanelMessage::Lifecycle(report) => Frame::new(MSG_LIFECYCLE, &[report.to_byte()]),
            PanelMessage::Ping => Ok(Frame::empty(MSG_PING)),
        }
    }
}

/// Messages from the controller to the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControllerMessage {
    /// Current guard state and seconds left on the countdown
    Status { status: GuardStatus, remaining_s: u8 },
    /// Result of the last command
    Notice(NoticeCode),
    /// Whether the panel should ignore its own back navigation
    BackResult { swallowed: bool },
    /// Panel must stay in portrait orientation
    LockPortrait,
    /// Heartbeat response
    Pong,
}

impl ControllerMessage {
    /// Encode this message into a frame
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        match self {
            ControllerMessage::Status {
                status,
                remaining_s,
            } => Frame::new(MSG_STATUS, &[status.to_byte(), *remaining_s]),
            ControllerMessage::Notice(code) => Frame::new(MSG_NOTICE, &[code.to_byte()]),
            ControllerMessage::BackResult { swallowed } => {
                Frame::new(MSG_BACK_RESULT, &[*swallowed as u8])
            }
            ControllerMessage::LockPortrait => Ok(Frame::empty(MSG_LOCK_PORTRAIT)),
            ControllerMessage::Pong => Ok(Frame::empty(MSG_PONG)),
        }
    }

    /// Parse a message from a frame (panel side)
    pub fn from_frame(frame: &Frame) -> Result<Self, FrameError> {
        let mut reader = PayloadReader::new(&frame.payload);
        let message = match frame.msg_type {
            MSG_STATUS => {
                let status = GuardStatus::from_byte(reader.byte()?).ok_or(FrameError::InvalidFrame)?;
                ControllerMessage::Status {
                    status,
                    remaining_s: reader.byte()?,
                }
            }
            MSG_NOTICE => {
                let code = NoticeCode::from_byte(reader.byte()?).ok_or(FrameError::InvalidFrame)?;
                ControllerMessage::Notice(code)
            }
            MSG_BACK_RESULT => {
                let swallowed = match reader.byte()? {
                    0 => false,
                    1 => true,
                    _ => return Err(FrameError::InvalidFrame),
                };
                ControllerMessage::BackResult { swallowed }
            }
            MSG_LOCK_PORTRAIT => ControllerMessage::LockPortrait,
            MSG_PONG => ControllerMessage::Pong,
            _ => return Err(FrameError::InvalidFrame),
        };
        reader.finish()?;
        Ok(message)
    }
}

fn push_text(payload: &mut Payload, text: &str) -> Result<(), FrameError> {
    let bytes = text.as_bytes();
    let len = u8::try_from(bytes.len()).map_err(|_| FrameError::PayloadTooLarge)?;
    payload.push(len).map_err(|_| FrameError::PayloadTooLarge)?;
    payload
        .extend_from_slice(bytes)
        .map_err(|_| FrameError::PayloadTooLarge)
}

/// Cursor over a frame payload
struct PayloadReader<'a> {
    data: &'a [u8],
}

impl<'a> PayloadReader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    fn byte(&mut self) -> Result<u8, FrameError> {
        let (&first, rest) = self.data.split_first().ok_or(FrameError::InvalidFrame)?;
        self.data = rest;
        Ok(first)
    }

    fn text(&mut self) -> Result<&'a str, FrameError> {
        let len = self.byte()? as usize;
        if self.data.len() < len {
            return Err(FrameError::InvalidFrame);
        }
        let (text, rest) = self.data.split_at(len);
        self.data = rest;
        core::str::from_utf8(text).map_err(|_| FrameError::InvalidFrame)
    }

    /// Trailing bytes mean the sender and receiver disagree on the layout
    fn finish(&self) -> Result<(), FrameError> {
        if self.data.is_empty() {
            Ok(())
        } else {
            Err(FrameError::InvalidFrame)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_secret_layout() {
        let msg = PanelMessage::SetSecret {
            first: "abcd",
            confirm: "abce",
        };
        let frame = msg.to_frame().unwrap();
        assert_eq!(frame.msg_type, MSG_SET_SECRET);
        assert_eq!(frame.payload.as_slice(), b"\x04abcd\x04abce");

        let parsed = PanelMessage::from_frame(&frame).unwrap();
        assert_eq!(parsed, msg);
    }

    #[test]
    fn test_disarm_with_utf8() {
        let msg = PanelMessage::Disarm { candidate: "pässwörd" };
        let frame = msg.to_frame().unwrap();
        assert_eq!(frame.payload[0] as usize, "pässwörd".len());
        assert_eq!(PanelMessage::from_frame(&frame).unwrap(), msg);
    }

    #[test]
    fn test_empty_secret_is_valid_on_the_wire() {
        // Length rules belong to the controller, the link only carries text
        let frame = Frame::new(MSG_DISARM, &[0]).unwrap();
        assert_eq!(
            PanelMessage::from_frame(&frame).unwrap(),
            PanelMessage::Disarm { candidate: "" }
        );
    }

    #[test]
    fn test_truncated_text() {
        let frame = Frame::new(MSG_DISARM, &[5, b'a', b'b']).unwrap();
        assert_eq!(PanelMessage::from_frame(&frame), Err(FrameError::InvalidFrame));
    }

    #[test]
    fn test_invalid_utf8() {
        let frame = Frame::new(MSG_DISARM, &[2, 0xC3, 0x28]).unwrap();
        assert_eq!(PanelMessage::from_frame(&frame), Err(FrameError::InvalidFrame));
    }

    #[test]
    fn test_trailing_bytes_rejected() {
        let frame = Frame::new(MSG_ARM, &[0]).unwrap();
        assert_eq!(PanelMessage::from_frame(&frame), Err(FrameError::InvalidFrame));
    }

    #[test]
    fn test_lifecycle_report() {
        let frame = Frame::new(MSG_LIFECYCLE, &[0x02]).unwrap();
        assert_eq!(
            PanelMessage::from_frame(&frame).unwrap(),
            PanelMessage::Lifecycle(LifecycleReport::Background)
        );
        let frame = Frame::new(MSG_LIFECYCLE, &[0x09]).unwrap();
        assert_eq!(PanelMessage::from_frame(&frame), Err(FrameError::InvalidFrame));
    }

    #[test]
    fn test_unknown_panel_message() {
        let frame = Frame::empty(MSG_STATUS);
        assert_eq!(PanelMessage::from_frame(&frame), Err(FrameError::InvalidFrame));
    }

    #[test]
    fn test_longest_secret_pair_fits() {
        let long = "x".repeat(64);
        let msg = PanelMessage::SetSecret {
            first: &long,
            confirm: &long,
        };
        assert!(msg.to_frame().is_ok());
    }

    #[test]
    fn test_oversized_text() {
        let long = "x".repeat(MAX_PAYLOAD_SIZE);
        let msg = PanelMessage::Disarm { candidate: &long };
        assert_eq!(msg.to_frame(), Err(FrameError::PayloadTooLarge));
    }

    #[test]
    fn test_status_layout() {
        let msg = ControllerMessage::Status {
            status: GuardStatus::Countdown,
            remaining_s: 7,
        };
        let frame = msg.to_frame().unwrap();
        assert_eq!(frame.msg_type, MSG_STATUS);
        assert_eq!(frame.payload.as_slice(), &[0x01, 7]);
    }

    #[test]
    fn test_controller_messages_parse_back() {
        for msg in [
            ControllerMessage::Notice(NoticeCode::AuthMismatch),
            ControllerMessage::BackResult { swallowed: true },
            ControllerMessage::LockPortrait,
            ControllerMessage::Pong,
        ] {
            let frame = msg.to_frame().unwrap();
            assert_eq!(ControllerMessage::from_frame(&frame).unwrap(), msg);
        }
    }

    #[test]
    fn test_back_result_flag_must_be_boolean() {
        let frame = Frame::new(MSG_BACK_RESULT, &[2]).unwrap();
        assert_eq!(ControllerMessage::from_frame(&frame), Err(FrameError::InvalidFrame));
    }
}
