//! Guard controller task
//!
//! Sole consumer of the command mailbox. Each command runs to completion
//! before the next is received, and every outcome is reported to the panel.

use defmt::*;

use tripwire_core::guard::{Command, Outcome, TransitionReport, TriggerCause};
use tripwire_core::state::GuardState;
use tripwire_protocol::{ControllerMessage, NoticeCode};

use crate::channels::{COMMANDS, PANEL_TX};
use crate::platform::Guard;
use crate::report::{notice_for, status_message};

/// Controller task - applies commands to the guard one at a time
#[embassy_executor::task]
pub async fn controller_task(mut guard: Guard) {
    info!("Controller task started");

    match guard.boot().await {
        Ok(true) => info!("Secret found, guard ready"),
        Ok(false) => info!("No secret set, arming disabled until one is saved"),
        Err(e) => {
            error!("Secret store unreadable: {}", e.message());
            notify(NoticeCode::StorageFailed).await;
        }
    }
    PANEL_TX.send(status_message(guard.machine())).await;

    loop {
        let command = COMMANDS.receive().await;
        // Commands carry secrets, log only what kind they are
        let name = command_name(&command);
        let disarm = matches!(command, Command::Disarm { .. });
        trace!("Command: {}", name);

        match guard.dispatch(command).await {
            Ok(Outcome::Transition(report)) => {
                report_transition(&report).await;
                if report.to == GuardState::Triggered && report.changed_state() {
                    match guard.machine().last_trigger() {
                        Some(TriggerCause::Motion(axis)) => warn!(
                            "Alarm triggered: motion on {:?} after {} samples",
                            axis,
                            guard.machine().samples_evaluated()
                        ),
                        Some(cause) => warn!("Alarm triggered: {:?}", cause),
                        None => {}
                    }
                }
                if disarm {
                    info!("Disarmed");
                    notify(NoticeCode::Disarmed).await;
                }
                PANEL_TX.send(status_message(guard.machine())).await;
            }
            Ok(Outcome::Ignored) => {}
            Ok(Outcome::SecretSaved) => {
                info!("Secret saved");
                notify(NoticeCode::SecretSaved).await;
            }
            Ok(Outcome::Back { swallowed }) => {
                debug!("Back request, swallowed={}", swallowed);
                PANEL_TX
                    .send(ControllerMessage::BackResult { swallowed })
                    .await;
            }
            Err(e) => {
                warn!("{} rejected: {}", name, e.message());
                notify(notice_for(e)).await;
            }
        }
    }
}

async fn report_transition(report: &TransitionReport) {
    if report.changed_state() {
        info!("{} -> {}", report.from.name(), report.to.name());
    }

    let Some(alarm) = report.alarm else {
        return;
    };
    if let Err(e) = alarm.siren {
        warn!("Siren failed: {:?}", e);
    }
    if let Err(e) = alarm.vibrator {
        warn!("Vibrator failed: {:?}", e);
    }
    if let Some(fault) = alarm.fault() {
        notify(notice_for(fault)).await;
    }
}

async fn notify(code: NoticeCode) {
    PANEL_TX.send(ControllerMessage::Notice(code)).await;
}

fn command_name(command: &Command) -> &'static str {
    match command {
        Command::Arm { .. } => "arm",
        Command::SetSecret { .. } => "set secret",
        Command::Disarm { .. } => "disarm",
        Command::Back => "back",
        Command::Event(_) => "event",
    }
}
