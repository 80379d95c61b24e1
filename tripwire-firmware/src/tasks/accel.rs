//! Accelerometer sampling task
//!
//! Idle (and powered down) until the guard subscribes. While subscribed,
//! reads one sample per interval and posts it to the mailbox. Too many
//! failed reads in a row are reported as a sensor fault and sampling stops.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_rp::i2c::{Async, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_time::{Duration, Ticker};

use tripwire_core::guard::Command;
use tripwire_core::motion::ReadFailureCounter;
use tripwire_core::state::Event;
use tripwire_drivers::sensor::{DataRate, Lis3dh};

use crate::channels::{AccelRequest, ACCEL_REQUEST, ACCEL_SUBSCRIBED, COMMANDS};

pub type Accelerometer = Lis3dh<I2c<'static, I2C0, Async>>;

/// Accelerometer task - samples while the guard is monitoring
#[embassy_executor::task]
pub async fn accel_task(mut sensor: Accelerometer, max_read_failures: u8) {
    info!("Accelerometer task started");

    let mut failures = ReadFailureCounter::new(max_read_failures);
    let mut ticker: Option<Ticker> = None;

    loop {
        let request = match ticker.as_mut() {
            Some(ticker) => match select(ACCEL_REQUEST.wait(), ticker.next()).await {
                Either::First(request) => Some(request),
                Either::Second(()) => None,
            },
            None => Some(ACCEL_REQUEST.wait().await),
        };

        match request {
            Some(AccelRequest::Subscribe { interval_ms }) => {
                let result = sensor.init(DataRate::for_interval_ms(interval_ms)).await;
                match result {
                    Ok(()) => {
                        info!("Sampling every {} ms", interval_ms);
                        failures.reset();
                        ticker = Some(Ticker::every(Duration::from_millis(interval_ms as u64)));
                    }
                    Err(e) => {
                        warn!("Accelerometer init failed: {:?}", e);
                        ticker = None;
                    }
                }
                ACCEL_SUBSCRIBED.signal(result);
            }
            Some(AccelRequest::Unsubscribe) => {
                info!("Sampling stopped");
                ticker = None;
                if let Err(e) = sensor.power_down().await {
                    warn!("Accelerometer power down failed: {:?}", e);
                }
            }
            None => {
                if !sample(&mut sensor, &mut failures).await {
                    ticker = None;
                }
            }
        }
    }
}

/// Take one reading, returns false once the sensor is considered lost
async fn sample(sensor: &mut Accelerometer, failures: &mut ReadFailureCounter) -> bool {
    match sensor.read().await {
        Ok(reading) => {
            failures.record_success();
            // A dropped sample is replaced by the next one
            if COMMANDS
                .try_send(Command::Event(Event::MotionSample(reading)))
                .is_err()
            {
                trace!("Mailbox full, sample dropped");
            }
            true
        }
        Err(e) => {
            warn!("Accelerometer read failed: {:?}", e);
            if !failures.record_failure() {
                return true;
            }
            error!(
                "Accelerometer lost after {} failed reads",
                failures.consecutive()
            );
            COMMANDS.send(Command::Event(Event::SensorFault)).await;
            false
        }
    }
}
