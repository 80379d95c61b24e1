//! Tripwire - Motion Guard Firmware
//!
//! Firmware binary for RP2040-based guard boards. Arm it from the panel,
//! and after the countdown any movement, a lost panel or a dead
//! accelerometer sounds the siren until the owner's secret is entered.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::{I2C0, UART0};
use embassy_rp::pwm::Pwm;
use embassy_rp::uart::{BufferedInterruptHandler, BufferedUart, Config as UartConfig};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use tripwire_core::config::{parse_board_config, BoardConfig};
use tripwire_core::guard::{AlarmActuator, GuardController};
use tripwire_drivers::sensor::Lis3dh;
use tripwire_drivers::siren::PwmSiren;
use tripwire_drivers::storage::FlashSecretStore;
use tripwire_drivers::vibration::VibrationMotor;
use tripwire_hal_rp2040::flash::Rp2040FlashStorage;
use tripwire_hal_rp2040::pwm::tone_config;

use crate::platform::{PanelOrientation, TaskMotionSensor, TaskTimers, TaskVibrator};

/// Board description compiled into the firmware
/// Edit board.toml and rebuild to customize
const EMBEDDED_BOARD: &str = include_str!("../board.toml");

mod channels;
mod platform;
mod report;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
    I2C0_IRQ => i2c::InterruptHandler<I2C0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Tripwire firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let board = load_board_config();

    // Panel UART (GPIO0 TX, GPIO1 RX)
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = board.panel.baud;
    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);
    let uart = BufferedUart::new(p.UART0, p.PIN_0, p.PIN_1, Irqs, tx_buf, rx_buf, uart_config);
    let (tx, rx) = uart.split();
    info!("UART initialized for panel at {} baud", board.panel.baud);

    // LIS3DH on I2C0 (GPIO4 SDA, GPIO5 SCL)
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = board.accelerometer.bus_frequency_hz;
    let i2c = I2c::new_async(p.I2C0, p.PIN_5, p.PIN_4, Irqs, i2c_config);
    let accelerometer = Lis3dh::new(i2c, board.accelerometer.address);
    info!(
        "Accelerometer at {:#x}, {} Hz bus",
        board.accelerometer.address, board.accelerometer.bus_frequency_hz
    );

    // Piezo on GPIO14 (PWM slice 7, channel A)
    let pwm = Pwm::new_output_a(p.PWM_SLICE7, p.PIN_14, tone_config(board.siren.frequency_hz));
    let (siren_output, _) = pwm.split();
    let siren = PwmSiren::new(unwrap!(siren_output));
    info!("Siren tone {} Hz", board.siren.frequency_hz);

    // Vibration motor driver on GPIO15, held off
    let off_level = if board.vibration.active_low {
        Level::High
    } else {
        Level::Low
    };
    let motor = VibrationMotor::new(Output::new(p.PIN_15, off_level), board.vibration.active_low);

    let store = FlashSecretStore::new(Rp2040FlashStorage::new(p.FLASH, p.DMA_CH0));
    let alarm = AlarmActuator::new(siren, TaskVibrator, board.alarm);
    let guard = GuardController::new(store, alarm, TaskMotionSensor, TaskTimers, PanelOrientation);

    spawner.spawn(tasks::panel_rx_task(rx)).unwrap();
    spawner.spawn(tasks::panel_tx_task(tx)).unwrap();
    spawner.spawn(tasks::timer_task()).unwrap();
    spawner
        .spawn(tasks::accel_task(
            accelerometer,
            board.accelerometer.max_read_failures,
        ))
        .unwrap();
    spawner.spawn(tasks::vibration_task(motor)).unwrap();
    spawner.spawn(tasks::controller_task(guard)).unwrap();

    info!("All tasks spawned, guard running");
}

/// Parse the embedded board description
///
/// build.rs has already validated board.toml, so falling back to the
/// built-in defaults should only happen if the two checks disagree.
fn load_board_config() -> BoardConfig {
    match parse_board_config(EMBEDDED_BOARD) {
        Ok(board) => {
            info!("Board configuration loaded");
            board
        }
        Err(e) => {
            error!("board.toml line {}: {:?}", e.line, e.kind);
            error!("Using built-in board defaults");
            BoardConfig::default()
        }
    }
}
