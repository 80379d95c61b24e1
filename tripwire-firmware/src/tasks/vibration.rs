//! Vibration pattern playback task

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_rp::gpio::Output;
use embassy_time::Timer;

use tripwire_drivers::vibration::{PatternPlayer, VibrationMotor};

use crate::channels::{VibrationRequest, VIBRATION_REQUEST};

pub type Motor = VibrationMotor<Output<'static>>;

/// Vibration task - plays patterns until stopped or replaced
#[embassy_executor::task]
pub async fn vibration_task(mut motor: Motor) {
    info!("Vibration task started");

    let mut request = VIBRATION_REQUEST.wait().await;
    loop {
        let next = match request {
            VibrationRequest::Play(pattern) => {
                debug!("Vibration pattern: {} ms period", pattern.period_ms());
                let next = play(&mut motor, PatternPlayer::new(pattern)).await;
                switch(&mut motor, false);
                next
            }
            VibrationRequest::Stop => {
                switch(&mut motor, false);
                None
            }
        };

        request = match next {
            Some(request) => request,
            None => VIBRATION_REQUEST.wait().await,
        };
    }
}

/// Play until the pattern ends, or return the request that interrupted it
async fn play(motor: &mut Motor, mut player: PatternPlayer) -> Option<VibrationRequest> {
    while let Some(step) = player.next_step() {
        switch(motor, step.on);
        let delay = Timer::after_millis(step.duration_ms as u64);
        if let Either::Second(request) = select(delay, VIBRATION_REQUEST.wait()).await {
            return Some(request);
        }
    }
    None
}

fn switch(motor: &mut Motor, on: bool) {
    if let Err(e) = motor.set_on(on) {
        warn!("Vibration motor output failed: {:?}", e);
    }
}
