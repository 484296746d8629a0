//! # Storage
//!
//! Provides typed helpers over Soroban's two storage tiers:
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key              | Type  | Description                          |
//! |------------------|-------|--------------------------------------|
//! | `HackathonCount` | `u32` | Number of hackathons ever opened     |
//!
//! Instance TTL is bumped by **7 days** whenever it falls below 1 day remaining.
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key              | Type              | Description                      |
//! |------------------|-------------------|----------------------------------|
//! | `Config(id)`     | `HackathonConfig` | Immutable hackathon configuration|
//! | `State(id)`      | `HackathonState`  | Deposit balance and wave count   |
//! | `Wave(id, i)`    | `Wave`            | Wave `i` of hackathon `id`       |
//!
//! Persistent TTL is bumped by **30 days** whenever it falls below 7 days remaining.
//!
//! Loads of absent entries return [`Error::NotFound`].

use soroban_sdk::{contracttype, Env, String};

use crate::types::{Hackathon, HackathonConfig, HackathonState, Wave};
use crate::Error;

// ── TTL Constants ────────────────────────────────────────────────────

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

/// Instance storage: bump by 7 days when below 1 day remaining.
const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

/// Persistent storage: bump by 30 days when below 7 days remaining.
const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

// ── Storage Keys ─────────────────────────────────────────────────────

/// All contract storage keys.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Number of registered hackathons (Instance).
    HackathonCount,
    /// Immutable hackathon configuration keyed by ID (Persistent).
    Config(String),
    /// Mutable hackathon state keyed by ID (Persistent).
    State(String),
    /// A single wave keyed by hackathon ID and wave index (Persistent).
    Wave(String, u32),
}

// ── Instance Storage Helpers ─────────────────────────────────────────

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

/// Number of hackathons opened on this contract.
pub fn hackathon_count(env: &Env) -> u32 {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::HackathonCount)
        .unwrap_or(0)
}

fn increment_hackathon_count(env: &Env) {
    let current = hackathon_count(env);
    env.storage()
        .instance()
        .set(&DataKey::HackathonCount, &(current + 1));
}

// ── Persistent Storage Helpers ───────────────────────────────────────

fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

/// Whether a hackathon with this ID has already been opened.
pub fn hackathon_exists(env: &Env, id: &String) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Config(id.clone()))
}

/// Save the config, initial state and first wave of a new hackathon.
pub fn save_new_hackathon(
    env: &Env,
    config: &HackathonConfig,
    state: &HackathonState,
    wave: &Wave,
) {
    let config_key = DataKey::Config(config.id.clone());
    env.storage().persistent().set(&config_key, config);
    bump_persistent(env, &config_key);

    save_state(env, &config.id, state);
    save_wave(env, wave);
    increment_hackathon_count(env);
}

/// Load the full `Hackathon` by combining config and state.
pub fn load_hackathon(env: &Env, id: &String) -> Result<Hackathon, Error> {
    let config = load_config(env, id)?;
    let state = load_state(env, id)?;
    Ok(Hackathon {
        id: config.id,
        owner: config.owner,
        token: config.token,
        safe: config.safe,
        notifier: config.notifier,
        unit_cost: config.unit_cost,
        deposit_amount: state.deposit_amount,
        submission_window: config.submission_window,
        voting_window: config.voting_window,
        opened_at: config.opened_at,
        wave_count: state.wave_count,
    })
}

/// Load only the immutable hackathon configuration.
pub fn load_config(env: &Env, id: &String) -> Result<HackathonConfig, Error> {
    let key = DataKey::Config(id.clone());
    let config: HackathonConfig = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(Error::NotFound)?;
    bump_persistent(env, &key);
    Ok(config)
}

/// Load only the mutable hackathon state.
pub fn load_state(env: &Env, id: &String) -> Result<HackathonState, Error> {
    let key = DataKey::State(id.clone());
    let state: HackathonState = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(Error::NotFound)?;
    bump_persistent(env, &key);
    Ok(state)
}

pub fn save_state(env: &Env, id: &String, state: &HackathonState) {
    let key = DataKey::State(id.clone());
    env.storage().persistent().set(&key, state);
    bump_persistent(env, &key);
}

/// Load wave `index` of hackathon `id`.
pub fn load_wave(env: &Env, id: &String, index: u32) -> Result<Wave, Error> {
    let key = DataKey::Wave(id.clone(), index);
    let wave: Wave = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(Error::NotFound)?;
    bump_persistent(env, &key);
    Ok(wave)
}

pub fn save_wave(env: &Env, wave: &Wave) {
    let key = DataKey::Wave(wave.hackathon_id.clone(), wave.index);
    env.storage().persistent().set(&key, wave);
    bump_persistent(env, &key);
}
