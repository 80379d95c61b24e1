//! Configuration
//!
//! Guard policy constants, alarm output settings and the board description
//! parsed from `board.toml`.

pub mod hardware;
pub mod parse;
pub mod types;

pub use hardware::*;
pub use parse::{parse_board_config, ParseError, ParseErrorKind};
pub use types::*;
