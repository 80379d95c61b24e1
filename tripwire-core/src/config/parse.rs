//! Minimal `board.toml` parser
//!
//! Handles only the subset of TOML the board file uses:
//!
//! - `[section]` headers
//! - `key = value` pairs with integer, boolean and hex (`0x19`) values
//! - integer arrays on one line: `pattern_ms = [500, 500, 500]`
//! - `#` comments, whole-line or trailing
//!
//! Unknown sections and keys are rejected so typos do not silently fall back
//! to defaults.

use super::hardware::{BoardConfig, BOARD_CONFIG_VERSION};

/// Parse error, with the 1-based line it occurred on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ParseError {
    pub line: usize,
    pub kind: ParseErrorKind,
}

/// What went wrong on the offending line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseErrorKind {
    /// Section header not recognised
    UnknownSection,
    /// Key not valid in the current section
    UnknownKey,
    /// Line is neither a header nor `key = value`
    Syntax,
    /// Value has the wrong type or is out of range
    InvalidValue,
    /// Array has more entries than the config can hold
    TooManyItems,
    /// `version` does not match this firmware
    UnsupportedVersion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Siren,
    Vibration,
    Accelerometer,
    Panel,
    Alarm,
}

/// Parse a board description into a [`BoardConfig`]
///
/// Keys that are absent keep their defaults.
pub fn parse_board_config(input: &str) -> Result<BoardConfig, ParseError> {
    let mut config = BoardConfig::new();
    let mut section = Section::Root;

    for (index, raw) in input.lines().enumerate() {
        let line_no = index + 1;
        let line = strip_comment(raw).trim();
        if line.is_empty() {
            continue;
        }

        let fail = |kind| ParseError {
            line: line_no,
            kind,
        };

        if line.starts_with('[') {
            if !line.ends_with(']') {
                return Err(fail(ParseErrorKind::Syntax));
            }
            section = parse_section(&line[1..line.len() - 1]).ok_or(fail(ParseErrorKind::UnknownSection))?;
            continue;
        }

        let (key, value) = split_key_value(line).ok_or(fail(ParseErrorKind::Syntax))?;
        apply_value(&mut config, section, key, value).map_err(fail)?;
    }

    Ok(config)
}

fn parse_section(name: &str) -> Option<Section> {
    match name.trim() {
        "siren" => Some(Section::Siren),
        "vibration" => Some(Section::Vibration),
        "accelerometer" => Some(Section::Accelerometer),
        "panel" => Some(Section::Panel),
        "alarm" => Some(Section::Alarm),
        _ => None,
    }
}

fn apply_value(
    config: &mut BoardConfig,
    section: Section,
    key: &str,
    value: &str,
) -> Result<(), ParseErrorKind> {
    match (section, key) {
        (Section::Root, "version") => {
            let version: u8 = parse_int(value)?;
            if version != BOARD_CONFIG_VERSION {
                return Err(ParseErrorKind::UnsupportedVersion);
            }
            config.version = version;
        }
        (Section::Siren, "frequency_hz") => config.siren.frequency_hz = parse_int(value)?,
        (Section::Vibration, "active_low") => config.vibration.active_low = parse_bool(value)?,
        (Section::Accelerometer, "address") => {
            let address: u8 = parse_int(value)?;
            if address > 0x7F {
                return Err(ParseErrorKind::InvalidValue);
            }
            config.accelerometer.address = address;
        }
        (Section::Accelerometer, "bus_frequency_hz") => {
            config.accelerometer.bus_frequency_hz = parse_int(value)?
        }
        (Section::Accelerometer, "max_read_failures") => {
            let failures: u8 = parse_int(value)?;
            if failures == 0 {
                return Err(ParseErrorKind::InvalidValue);
            }
            config.accelerometer.max_read_failures = failures;
        }
        (Section::Panel, "baud") => config.panel.baud = parse_int(value)?,
        (Section::Alarm, "volume_percent") => {
            let volume: u8 = parse_int(value)?;
            if !(1..=100).contains(&volume) {
                return Err(ParseErrorKind::InvalidValue);
            }
            config.alarm.volume_percent = volume;
        }
        (Section::Alarm, "repeat") => config.alarm.repeat = parse_bool(value)?,
        (Section::Alarm, "pattern_ms") => {
            config.alarm.pattern_ms.clear();
            let inner = value
                .strip_prefix('[')
                .and_then(|v| v.strip_suffix(']'))
                .ok_or(ParseErrorKind::InvalidValue)?;
            for item in inner.split(',').map(str::trim).filter(|s| !s.is_empty()) {
                config
                    .alarm
                    .pattern_ms
                    .push(parse_int(item)?)
                    .map_err(|_| ParseErrorKind::TooManyItems)?;
            }
            if !config.alarm.pattern_is_usable() {
                return Err(ParseErrorKind::InvalidValue);
            }
        }
        _ => return Err(ParseErrorKind::UnknownKey),
    }
    Ok(())
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

fn split_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    let value = value.trim();
    if key.is_empty() || value.is_empty() {
        return None;
    }
    Some((key, value))
}

fn parse_bool(value: &str) -> Result<bool, ParseErrorKind> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseErrorKind::InvalidValue),
    }
}

/// Parse a decimal or `0x` hex integer, allowing `_` separators
fn parse_int<T: TryFrom<u64>>(value: &str) -> Result<T, ParseErrorKind> {
    let mut digits: heapless::String<24> = heapless::String::new();
    for c in value.chars().filter(|&c| c != '_') {
        digits.push(c).map_err(|_| ParseErrorKind::InvalidValue)?;
    }

    let parsed = match digits.strip_prefix("0x") {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => digits.parse::<u64>(),
    }
    .map_err(|_| ParseErrorKind::InvalidValue)?;

    T::try_from(parsed).map_err(|_| ParseErrorKind::InvalidValue)
}
