//! Best-effort notification on wave closure.

use soroban_sdk::{contractclient, Address, Env};

use crate::events;
use crate::types::{HackathonConfig, WaveNotice};

/// Interface a notification contract must expose.
#[contractclient(name = "NotifierClient")]
pub trait Notifier {
    fn send_notification(env: Env, recipient: Address, payload: WaveNotice);
}

/// Notify the configured collaborator, if any, that a wave closed.
///
/// A failing notifier never aborts the close: its own changes are rolled
/// back by the host and a `ntf_fail` event is emitted instead.
pub fn notify_wave_closed(env: &Env, config: &HackathonConfig, notice: &WaveNotice) {
    let Some(notifier) = &config.notifier else {
        return;
    };

    let client = NotifierClient::new(env, notifier);
    match client.try_send_notification(&config.safe, notice) {
        Ok(Ok(())) => {}
        _ => events::emit_notify_failed(env, notice, notifier.clone()),
    }
}
