//! # Events
//!
//! Every state transition publishes an event so off-chain consumers (see
//! `backend/indexer`) can rebuild the wave history without querying storage.
//!
//! | Topic                     | Data               |
//! |---------------------------|--------------------|
//! | `(opened, id)`            | [`HackathonOpened`]|
//! | `(submitted, id, wave)`   | [`ProductSubmitted`]|
//! | `(closed, id, wave)`      | [`WaveClosed`]     |
//! | `(rewarded, id, wave)`    | [`RewardPaid`]     |
//! | `(ntf_fail, id, wave)`    | [`NotifyFailed`]   |

use soroban_sdk::{contracttype, symbol_short, Address, Env, String, Vec};

use crate::types::WaveNotice;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HackathonOpened {
    pub hackathon_id: String,
    pub owner: Address,
    pub token: Address,
    pub safe: Address,
    pub deposit: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProductSubmitted {
    pub hackathon_id: String,
    pub wave_index: u32,
    pub submitter: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WaveClosed {
    pub hackathon_id: String,
    pub wave_index: u32,
    pub closer: Address,
    pub votes: Vec<u32>,
    /// Deposit left after the debit for this wave.
    pub deposit_amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardPaid {
    pub hackathon_id: String,
    pub wave_index: u32,
    pub recipient: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NotifyFailed {
    pub hackathon_id: String,
    pub wave_index: u32,
    pub notifier: Address,
}

pub fn emit_hackathon_opened(env: &Env, data: HackathonOpened) {
    env.events()
        .publish((symbol_short!("opened"), data.hackathon_id.clone()), data);
}

pub fn emit_product_submitted(env: &Env, data: ProductSubmitted) {
    env.events().publish(
        (
            symbol_short!("submitted"),
            data.hackathon_id.clone(),
            data.wave_index,
        ),
        data,
    );
}

pub fn emit_wave_closed(env: &Env, data: WaveClosed) {
    env.events().publish(
        (
            symbol_short!("closed"),
            data.hackathon_id.clone(),
            data.wave_index,
        ),
        data,
    );
}

pub fn emit_reward_paid(env: &Env, data: RewardPaid) {
    env.events().publish(
        (
            symbol_short!("rewarded"),
            data.hackathon_id.clone(),
            data.wave_index,
        ),
        data,
    );
}

pub fn emit_notify_failed(env: &Env, notice: &WaveNotice, notifier: Address) {
    env.events().publish(
        (
            symbol_short!("ntf_fail"),
            notice.hackathon_id.clone(),
            notice.wave_index,
        ),
        NotifyFailed {
            hackathon_id: notice.hackathon_id.clone(),
            wave_index: notice.wave_index,
            notifier,
        },
    );
}
