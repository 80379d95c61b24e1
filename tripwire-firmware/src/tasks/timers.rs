//! Guard timer task
//!
//! Holds the one pending deadline and turns its expiry into a `TimerFired`
//! event in the mailbox. Expiries carry the generation they were scheduled
//! under; the guard drops the ones from a past generation.
//!
//! Requests arrive through a signal, so the controller never waits on this
//! task even while it is blocked handing an expiry to a full mailbox.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_time::{Instant, Timer};

use tripwire_core::countdown::Generation;
use tripwire_core::guard::Command;
use tripwire_core::state::{Event, TimerKind};

use crate::channels::{TimerRequest, COMMANDS, TIMER_REQUEST};

#[derive(Debug, Clone, Copy)]
struct Pending {
    deadline: Instant,
    kind: TimerKind,
    generation: Generation,
}

/// Timer task - fires scheduled tick and settle timers
#[embassy_executor::task]
pub async fn timer_task() {
    info!("Timer task started");

    let mut pending: Option<Pending> = None;

    loop {
        let request = match pending {
            Some(timer) => match select(Timer::at(timer.deadline), TIMER_REQUEST.wait()).await {
                Either::First(()) => {
                    pending = None;
                    trace!("Timer fired: {:?} gen {}", timer.kind, timer.generation.value());
                    COMMANDS
                        .send(Command::Event(Event::TimerFired {
                            kind: timer.kind,
                            generation: timer.generation,
                        }))
                        .await;
                    continue;
                }
                Either::Second(request) => request,
            },
            None => TIMER_REQUEST.wait().await,
        };

        pending = match request {
            TimerRequest::Schedule {
                kind,
                generation,
                deadline_ms,
            } => {
                let deadline = Instant::from_millis(deadline_ms);
                if deadline < Instant::now() {
                    debug!("{:?} deadline already passed, firing now", kind);
                }
                Some(Pending {
                    deadline,
                    kind,
                    generation,
                })
            }
            TimerRequest::CancelAll => {
                if pending.is_some() {
                    trace!("Timer cancelled");
                }
                None
            }
        };
    }
}
