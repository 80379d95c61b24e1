//! Build script for tripwire-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates board.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Mirrors `tripwire_core::config::BOARD_CONFIG_VERSION`
const BOARD_CONFIG_VERSION: i64 = 1;
/// Mirrors `tripwire_core::config::MAX_PATTERN_LEN`
const MAX_PATTERN_LEN: usize = 8;

fn main() {
    setup_linker();
    validate_board();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate board.toml before it gets embedded
///
/// The firmware parser rejects the same mistakes at boot, but finding them
/// here keeps a bad board file from ever being flashed.
fn validate_board() {
    println!("cargo:rerun-if-changed=board.toml");

    let path = Path::new("board.toml");
    if !path.exists() {
        fail(
            "board.toml not found",
            &["The firmware embeds board.toml from the tripwire-firmware directory.".into()],
        );
    }

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read board.toml", &[e.to_string()]),
    };

    let board: toml::Value = match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => fail(
            "Invalid TOML syntax in board.toml",
            &e.to_string().lines().map(String::from).collect::<Vec<_>>(),
        ),
    };

    let mut errors = Vec::new();
    check_known_keys(&board, &mut errors);
    check_values(&board, &mut errors);

    if !errors.is_empty() {
        fail("Invalid board configuration", &errors);
    }

    println!("cargo:warning=board.toml validated successfully");
}

/// Sections and the keys each one accepts
const SCHEMA: &[(&str, &[&str])] = &[
    ("siren", &["frequency_hz"]),
    ("vibration", &["active_low"]),
    (
        "accelerometer",
        &["address", "bus_frequency_hz", "max_read_failures"],
    ),
    ("panel", &["baud"]),
    ("alarm", &["volume_percent", "pattern_ms", "repeat"]),
];

fn check_known_keys(board: &toml::Value, errors: &mut Vec<String>) {
    let Some(root) = board.as_table() else {
        errors.push("board.toml must be a table".into());
        return;
    };

    for (name, value) in root {
        if name == "version" {
            continue;
        }
        let Some((_, keys)) = SCHEMA.iter().find(|(section, _)| section == name) else {
            errors.push(format!("unknown section [{}]", name));
            continue;
        };
        let Some(table) = value.as_table() else {
            errors.push(format!("[{}] must be a table", name));
            continue;
        };
        for key in table.keys() {
            if !keys.contains(&key.as_str()) {
                errors.push(format!("[{}] unknown key '{}'", name, key));
            }
        }
    }
}

fn check_range(
    board: &toml::Value,
    section: &str,
    key: &str,
    range: std::ops::RangeInclusive<i64>,
    errors: &mut Vec<String>,
) {
    let Some(value) = board.get(section).and_then(|s| s.get(key)) else {
        return;
    };
    match value.as_integer() {
        Some(n) if range.contains(&n) => {}
        _ => errors.push(format!(
            "[{}] {} must be an integer in {}..={}",
            section,
            key,
            range.start(),
            range.end()
        )),
    }
}

fn check_values(board: &toml::Value, errors: &mut Vec<String>) {
    match board.get("version").map(|v| v.as_integer()) {
        None => {}
        Some(Some(BOARD_CONFIG_VERSION)) => {}
        Some(_) => errors.push(format!("version must be {}", BOARD_CONFIG_VERSION)),
    }

    check_range(board, "siren", "frequency_hz", 20..=20_000, errors);
    check_range(board, "accelerometer", "address", 0..=0x7F, errors);
    check_range(board, "accelerometer", "bus_frequency_hz", 1..=1_000_000, errors);
    check_range(board, "accelerometer", "max_read_failures", 1..=255, errors);
    check_range(board, "panel", "baud", 1..=u32::MAX as i64, errors);
    check_range(board, "alarm", "volume_percent", 1..=100, errors);

    for (section, key) in [("vibration", "active_low"), ("alarm", "repeat")] {
        if let Some(value) = board.get(section).and_then(|s| s.get(key)) {
            if !value.is_bool() {
                errors.push(format!("[{}] {} must be true or false", section, key));
            }
        }
    }

    if let Some(pattern) = board.get("alarm").and_then(|a| a.get("pattern_ms")) {
        check_pattern(pattern, errors);
    }
}

fn check_pattern(pattern: &toml::Value, errors: &mut Vec<String>) {
    let Some(steps) = pattern.as_array() else {
        errors.push("[alarm] pattern_ms must be an array".into());
        return;
    };
    if steps.len() > MAX_PATTERN_LEN {
        errors.push(format!(
            "[alarm] pattern_ms has {} entries, at most {} allowed",
            steps.len(),
            MAX_PATTERN_LEN
        ));
    }

    let mut durations = Vec::new();
    for step in steps {
        match step.as_integer() {
            Some(ms) if (0..=u16::MAX as i64).contains(&ms) => durations.push(ms),
            _ => errors.push("[alarm] pattern_ms entries must be 0-65535".into()),
        }
    }

    // Odd entries are motor-on time
    if !durations.iter().skip(1).step_by(2).any(|&ms| ms > 0) {
        errors.push("[alarm] pattern_ms needs at least one non-zero on step".into());
    }
}

fn fail(title: &str, lines: &[String]) -> ! {
    let body = lines
        .iter()
        .map(|line| format!("║  • {:<62} ║", line))
        .collect::<Vec<_>>()
        .join("\n");
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title, body
    );
}
