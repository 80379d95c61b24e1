//! Frame encoding and decoding for the panel link.
//!
//! Frame format:
//! - START (1 byte): 0x7E synchronization byte
//! - LENGTH (1 byte): payload length (0-160)
//! - TYPE (1 byte): message type identifier
//! - PAYLOAD (0-160 bytes): type-specific data
//! - CRC8 (1 byte): CRC-8/SMBUS of LENGTH, TYPE and PAYLOAD

use heapless::Vec;

use crate::crc::{crc8, crc8_update};

/// Frame synchronization byte
pub const FRAME_START: u8 = 0x7E;

/// Maximum payload size in bytes
///
/// Large enough for a secret and its confirmation (two length-prefixed
/// 64-byte strings).
pub const MAX_PAYLOAD_SIZE: usize = 160;

/// Maximum complete frame size (START + LENGTH + TYPE + MAX_PAYLOAD + CRC8)
pub const MAX_FRAME_SIZE: usize = 1 + 1 + 1 + MAX_PAYLOAD_SIZE + 1;

/// Errors that can occur during frame parsing or encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Payload exceeds maximum allowed size
    PayloadTooLarge,
    /// CRC mismatch
    InvalidCrc,
    /// Invalid frame structure or unknown message
    InvalidFrame,
    /// Buffer too small for encoding
    BufferTooSmall,
}

/// A parsed or constructed frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Message type identifier
    pub msg_type: u8,
    /// Payload data
    pub payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

impl Frame {
    /// Create a frame with the given message type and payload
    pub fn new(msg_type: u8, payload: &[u8]) -> Result<Self, FrameError> {
        let payload = Vec::from_slice(payload).map_err(|_| FrameError::PayloadTooLarge)?;
        Ok(Self { msg_type, payload })
    }

    /// Create a frame with no payload
    pub fn empty(msg_type: u8) -> Self {
        Self {
            msg_type,
            payload: Vec::new(),
        }
    }

    /// Size of this frame on the wire
    pub fn encoded_len(&self) -> usize {
        4 + self.payload.len()
    }

    /// Encode this frame into a byte buffer
    ///
    /// Returns the number of bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, FrameError> {
        let frame_len = self.encoded_len();
        if buffer.len() < frame_len {
            return Err(FrameError::BufferTooSmall);
        }

        let payload_end = 3 + self.payload.len();
        buffer[0] = FRAME_START;
        buffer[1] = self.payload.len() as u8;
        buffer[2] = self.msg_type;
        buffer[3..payload_end].copy_from_slice(&self.payload);
        buffer[payload_end] = crc8(&buffer[1..payload_end]);

        Ok(frame_len)
    }

    /// Encode this frame into a heapless Vec
    pub fn encode_to_vec(&self) -> Result<Vec<u8, MAX_FRAME_SIZE>, FrameError> {
        let mut buffer = [0u8; MAX_FRAME_SIZE];
        let len = self.encode(&mut buffer)?;
        Vec::from_slice(&buffer[..len]).map_err(|_| FrameError::BufferTooSmall)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Discarding bytes until START
    Hunting,
    Length,
    Type,
    Payload,
    Crc,
}

/// Byte-at-a-time frame parser
///
/// Bytes that arrive outside a frame are dropped. After a bad length or
/// CRC the parser goes back to hunting for START.
#[derive(Debug, Clone)]
pub struct FrameParser {
    state: ParseState,
    payload: Vec<u8, MAX_PAYLOAD_SIZE>,
    length: usize,
    msg_type: u8,
    crc: u8,
}

impl Default for FrameParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameParser {
    pub fn new() -> Self {
        Self {
            state: ParseState::Hunting,
            payload: Vec::new(),
            length: 0,
            msg_type: 0,
            crc: 0,
        }
    }

    /// Drop any partial frame
    pub fn reset(&mut self) {
        self.state = ParseState::Hunting;
        self.payload.clear();
        self.length = 0;
        self.msg_type = 0;
        self.crc = 0;
    }

    /// Check if the parser is in the middle of a frame
    pub fn in_frame(&self) -> bool {
        self.state != ParseState::Hunting
    }

    /// Feed a single byte to the parser
    ///
    /// Returns `Ok(Some(frame))` when a complete valid frame is parsed,
    /// `Ok(None)` when more bytes are needed, or `Err` on parse error.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Frame>, FrameError> {
        match self.state {
            ParseState::Hunting => {
                if byte == FRAME_START {
                    self.state = ParseState::Length;
                }
                Ok(None)
            }
            ParseState::Length => {
                if byte as usize > MAX_PAYLOAD_SIZE {
                    self.reset();
                    return Err(FrameError::PayloadTooLarge);
                }
                self.length = byte as usize;
                self.crc = crc8_update(0, byte);
                self.state = ParseState::Type;
                Ok(None)
            }
            ParseState::Type => {
                self.msg_type = byte;
                self.crc = crc8_update(self.crc, byte);
                self.payload.clear();
                self.state = if self.length == 0 {
                    ParseState::Crc
                } else {
                    ParseState::Payload
                };
                Ok(None)
            }
            ParseState::Payload => {
                // Length was checked against capacity above
                let _ = self.payload.push(byte);
                self.crc = crc8_update(self.crc, byte);
                if self.payload.len() == self.length {
                    self.state = ParseState::Crc;
                }
                Ok(None)
            }
            ParseState::Crc => {
                if byte != self.crc {
                    self.reset();
                    return Err(FrameError::InvalidCrc);
                }
                let frame = Frame {
                    msg_type: self.msg_type,
                    payload: core::mem::take(&mut self.payload),
                };
                self.reset();
                Ok(Some(frame))
            }
        }
    }

    /// Feed multiple bytes to the parser
    ///
    /// Returns the first complete frame found and how many bytes were
    /// consumed, so the caller can continue with the rest.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> (Result<Option<Frame>, FrameError>, usize) {
        for (index, &byte) in bytes.iter().enumerate() {
            match self.feed(byte) {
                Ok(None) => {}
                result => return (result, index + 1),
            }
        }
        (Ok(None), bytes.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_encode_empty_payload() {
        let frame = Frame::empty(0x05);
        let mut buffer = [0u8; 8];
        let len = frame.encode(&mut buffer).unwrap();

        assert_eq!(len, 4);
        assert_eq!(buffer[..3], [FRAME_START, 0, 0x05]);
        assert_eq!(buffer[3], crc8(&[0, 0x05]));
    }

    #[test]
    fn test_encode_with_payload() {
        let frame = Frame::new(0x20, &[3, 7]).unwrap();
        let encoded = frame.encode_to_vec().unwrap();
        assert_eq!(encoded[..5], [FRAME_START, 2, 0x20, 3, 7]);
        assert_eq!(encoded[5], crc8(&[2, 0x20, 3, 7]));
    }

    #[test]
    fn test_buffer_too_small() {
        let frame = Frame::new(0x20, &[1, 2, 3]).unwrap();
        let mut buffer = [0u8; 6];
        assert_eq!(frame.encode(&mut buffer), Err(FrameError::BufferTooSmall));
    }

    #[test]
    fn test_parser_rejects_bad_crc() {
        let mut encoded = Frame::new(0x03, b"abcd").unwrap().encode_to_vec().unwrap();
        let last = encoded.len() - 1;
        encoded[last] ^= 0x01;

        let mut parser = FrameParser::new();
        let (result, _) = parser.feed_bytes(&encoded);
        assert_eq!(result, Err(FrameError::InvalidCrc));
        assert!(!parser.in_frame());
    }

    #[test]
    fn test_parser_rejects_oversized_length() {
        let mut parser = FrameParser::new();
        parser.feed(FRAME_START).unwrap();
        assert_eq!(parser.feed(MAX_PAYLOAD_SIZE as u8 + 1), Err(FrameError::PayloadTooLarge));
    }

    #[test]
    fn test_parser_resyncs_after_garbage() {
        let encoded = Frame::empty(0x06).encode_to_vec().unwrap();
        let mut data = Vec::<u8, 16>::new();
        data.extend_from_slice(&[0x00, 0xFF, 0x12]).unwrap();
        data.extend_from_slice(&encoded).unwrap();

        let mut parser = FrameParser::new();
        let (result, consumed) = parser.feed_bytes(&data);
        assert_eq!(result.unwrap().unwrap().msg_type, 0x06);
        assert_eq!(consumed, data.len());
    }

    #[test]
    fn test_back_to_back_frames() {
        let first = Frame::empty(0x04).encode_to_vec().unwrap();
        let second = Frame::new(0x05, &[1]).unwrap().encode_to_vec().unwrap();
        let mut data = Vec::<u8, 16>::new();
        data.extend_from_slice(&first).unwrap();
        data.extend_from_slice(&second).unwrap();

        let mut parser = FrameParser::new();
        let (result, consumed) = parser.feed_bytes(&data);
        assert_eq!(result.unwrap().unwrap().msg_type, 0x04);
        let (result, _) = parser.feed_bytes(&data[consumed..]);
        assert_eq!(result.unwrap().unwrap().payload.as_slice(), &[1]);
    }

    #[test]
    fn test_payload_too_large() {
        let large = [0u8; MAX_PAYLOAD_SIZE + 1];
        assert_eq!(Frame::new(0x02, &large), Err(FrameError::PayloadTooLarge));
    }

    proptest! {
        #[test]
        fn prop_parser_accepts_what_encoder_emits(
            msg_type in any::<u8>(),
            payload in proptest::collection::vec(any::<u8>(), 0..=MAX_PAYLOAD_SIZE),
        ) {
            let frame = Frame::new(msg_type, &payload).unwrap();
            let encoded = frame.encode_to_vec().unwrap();
            let mut parser = FrameParser::new();
            let (result, consumed) = parser.feed_bytes(&encoded);
            prop_assert_eq!(result, Ok(Some(frame)));
            prop_assert_eq!(consumed, encoded.len());
        }

        #[test]
        fn prop_single_bit_flip_is_detected(
            payload in proptest::collection::vec(any::<u8>(), 1..32),
            bit in 0usize..8,
            position in 2usize..34,
        ) {
            let frame = Frame::new(0x03, &payload).unwrap();
            let mut encoded = frame.encode_to_vec().unwrap();
            // Flip inside TYPE or PAYLOAD so the frame length is unchanged
            let index = position.min(encoded.len() - 2);
            encoded[index] ^= 1 << bit;

            let mut parser = FrameParser::new();
            let (result, _) = parser.feed_bytes(&encoded);
            prop_assert_eq!(result, Err(FrameError::InvalidCrc));
        }
    }
}
