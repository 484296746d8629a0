//! # Hackathon Ledger Contract
//!
//! Tracks named hackathons, their sequence of timed waves, the submitters
//! registered against each wave and the deposit that funds wave rewards.
//!
//! | Phase        | Entry Point(s)                                   |
//! |--------------|--------------------------------------------------|
//! | Registration | [`HackathonContract::open`]                      |
//! | Submission   | [`HackathonContract::submit_product`]            |
//! | Closure      | [`HackathonContract::close`]                     |
//! | Queries      | `get_hackathon`, `get_wave_count`, `get_wave`,   |
//! |              | `get_waves`, `get_submit_products`,              |
//! |              | `closable_at`, `get_hackathon_count`             |
//!
//! ## Architecture
//!
//! Storage access is delegated to [`storage`], the reward split to
//! [`rewards`], the best-effort notifier call to [`notifier`] and event
//! publication to [`events`]. This file holds the entry points and the
//! validation that gates each transition.
//!
//! ## Atomicity
//!
//! Every validation error is returned before the first storage write. A
//! failing reward transfer returns [`Error::TransferFailed`], which makes the
//! host roll back the whole close: wave closure, deposit debit, the next
//! wave and any transfer already made in the same call. The notifier is the
//! only collaborator outside that boundary.

#![no_std]

use soroban_sdk::{contract, contracterror, contractimpl, token, Address, Env, String, Vec};

pub mod events;
pub mod notifier;
mod rewards;
mod storage;
mod types;

#[cfg(test)]
mod mocks;
#[cfg(test)]
mod test_auth;
#[cfg(test)]
mod test_events;

use events::{HackathonOpened, ProductSubmitted, RewardPaid, WaveClosed};
use storage::{
    hackathon_count, hackathon_exists, load_config, load_hackathon, load_state, load_wave,
    save_new_hackathon, save_state, save_wave,
};
pub use types::{
    Hackathon, HackathonConfig, HackathonParams, HackathonState, Wave, WaveNotice, WaveStatus,
};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    NotFound            = 1,
    AlreadyExists       = 2,
    Unauthorized        = 3,
    WindowNotElapsed    = 4,
    VoteCountMismatch   = 5,
    InsufficientDeposit = 6,
    TransferFailed      = 7,
    InvalidParams       = 8,
    AlreadySubmitted    = 9,
    WaveFull            = 10,
}

/// Submitters a single wave can hold. A wave is one persistent entry, so its
/// submission and vote lists must stay well inside the ledger entry size limit.
pub const MAX_SUBMISSIONS_PER_WAVE: u32 = 100;

#[contract]
pub struct HackathonContract;

#[contractimpl]
impl HackathonContract {
    // ─────────────────────────────────────────────────────────
    // Commands
    // ─────────────────────────────────────────────────────────

    /// Open a new hackathon and its first wave.
    ///
    /// `owner` must sign; `params.total_deposit` is pulled from `owner` into
    /// the contract and becomes the hackathon's deposit.
    pub fn open(
        env: Env,
        owner: Address,
        hackathon_id: String,
        params: HackathonParams,
    ) -> Result<Hackathon, Error> {
        owner.require_auth();

        if hackathon_id.len() == 0
            || params.unit_cost < 0
            || params.unit_cost > rewards::MAX_POOL
            || params.total_deposit < 0
        {
            return Err(Error::InvalidParams);
        }
        if hackathon_exists(&env, &hackathon_id) {
            return Err(Error::AlreadyExists);
        }

        let now = env.ledger().timestamp();

        if params.total_deposit > 0 {
            transfer_or_fail(
                &env,
                &params.token,
                &owner,
                &env.current_contract_address(),
                params.total_deposit,
            )?;
        }

        let config = HackathonConfig {
            id: hackathon_id.clone(),
            owner: owner.clone(),
            token: params.token.clone(),
            safe: params.safe.clone(),
            notifier: params.notifier,
            unit_cost: params.unit_cost,
            submission_window: params.submission_window,
            voting_window: params.voting_window,
            opened_at: now,
        };
        let state = HackathonState {
            deposit_amount: params.total_deposit,
            wave_count: 1,
        };
        let first_wave = new_wave(&env, &hackathon_id, 0, now);

        save_new_hackathon(&env, &config, &state, &first_wave);

        events::emit_hackathon_opened(
            &env,
            HackathonOpened {
                hackathon_id: hackathon_id.clone(),
                owner,
                token: params.token,
                safe: params.safe,
                deposit: params.total_deposit,
            },
        );

        load_hackathon(&env, &hackathon_id)
    }

    /// Register `submitter` against the hackathon's current wave.
    ///
    /// A submitter may appear at most once per wave, and a wave holds at most
    /// [`MAX_SUBMISSIONS_PER_WAVE`] submitters.
    pub fn submit_product(
        env: Env,
        submitter: Address,
        hackathon_id: String,
    ) -> Result<(), Error> {
        submitter.require_auth();

        let state = load_state(&env, &hackathon_id)?;
        let mut wave = load_wave(&env, &hackathon_id, current_index(&state))?;

        if wave.submissions.contains(&submitter) {
            return Err(Error::AlreadySubmitted);
        }
        if wave.submissions.len() >= MAX_SUBMISSIONS_PER_WAVE {
            return Err(Error::WaveFull);
        }

        wave.submissions.push_back(submitter.clone());
        save_wave(&env, &wave);

        events::emit_product_submitted(
            &env,
            ProductSubmitted {
                hackathon_id,
                wave_index: wave.index,
                submitter,
            },
        );
        Ok(())
    }

    /// Close the current wave with `votes` and open the next one.
    ///
    /// - `caller` must sign and be the hackathon's safe address.
    /// - Both the submission and voting windows must have elapsed.
    /// - `votes` must contain exactly one share per submitter, in submission order.
    /// - The remaining deposit must cover the unit cost.
    pub fn close(
        env: Env,
        caller: Address,
        hackathon_id: String,
        votes: Vec<u32>,
    ) -> Result<(), Error> {
        caller.require_auth();

        let now = env.ledger().timestamp();
        let config = load_config(&env, &hackathon_id)?;
        let mut state = load_state(&env, &hackathon_id)?;

        if caller != config.safe {
            return Err(Error::Unauthorized);
        }

        let index = current_index(&state);
        let mut wave = load_wave(&env, &hackathon_id, index)?;

        if now < wave.opened_at.saturating_add(config.wave_duration()) {
            return Err(Error::WindowNotElapsed);
        }
        if votes.len() != wave.submissions.len() {
            return Err(Error::VoteCountMismatch);
        }
        if config.unit_cost > state.deposit_amount {
            return Err(Error::InsufficientDeposit);
        }

        // ── State transition ─────────────────────────────────
        wave.votes = votes.clone();
        wave.status = WaveStatus::Closed;
        wave.closed_at = now;
        save_wave(&env, &wave);

        state.deposit_amount -= config.unit_cost;
        state.wave_count += 1;
        save_state(&env, &hackathon_id, &state);

        save_wave(&env, &new_wave(&env, &hackathon_id, index + 1, now));

        events::emit_wave_closed(
            &env,
            WaveClosed {
                hackathon_id: hackathon_id.clone(),
                wave_index: index,
                closer: caller,
                votes,
                deposit_amount: state.deposit_amount,
            },
        );

        // ── Side effects ─────────────────────────────────────
        pay_rewards(&env, &config, &wave)?;

        notifier::notify_wave_closed(
            &env,
            &config,
            &WaveNotice {
                hackathon_id,
                wave_index: index,
                closed_at: now,
            },
        );
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────

    pub fn get_hackathon(env: Env, hackathon_id: String) -> Result<Hackathon, Error> {
        load_hackathon(&env, &hackathon_id)
    }

    /// Number of hackathons ever opened on this contract.
    pub fn get_hackathon_count(env: Env) -> u32 {
        hackathon_count(&env)
    }

    pub fn get_wave_count(env: Env, hackathon_id: String) -> Result<u32, Error> {
        Ok(load_state(&env, &hackathon_id)?.wave_count)
    }

    /// The current (open) wave.
    pub fn get_wave(env: Env, hackathon_id: String) -> Result<Wave, Error> {
        let state = load_state(&env, &hackathon_id)?;
        load_wave(&env, &hackathon_id, current_index(&state))
    }

    /// Every wave of the hackathon, oldest first.
    pub fn get_waves(env: Env, hackathon_id: String) -> Result<Vec<Wave>, Error> {
        let state = load_state(&env, &hackathon_id)?;
        let mut waves = Vec::new(&env);
        for index in 0..state.wave_count {
            waves.push_back(load_wave(&env, &hackathon_id, index)?);
        }
        Ok(waves)
    }

    /// Submitters of wave `wave_index`, in submission order.
    pub fn get_submit_products(
        env: Env,
        hackathon_id: String,
        wave_index: u32,
    ) -> Result<Vec<Address>, Error> {
        let state = load_state(&env, &hackathon_id)?;
        if wave_index >= state.wave_count {
            return Err(Error::NotFound);
        }
        Ok(load_wave(&env, &hackathon_id, wave_index)?.submissions)
    }

    /// Earliest ledger timestamp at which the current wave may be closed.
    pub fn closable_at(env: Env, hackathon_id: String) -> Result<u64, Error> {
        let config = load_config(&env, &hackathon_id)?;
        let state = load_state(&env, &hackathon_id)?;
        let wave = load_wave(&env, &hackathon_id, current_index(&state))?;
        Ok(wave.opened_at.saturating_add(config.wave_duration()))
    }
}

// ─────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────

fn current_index(state: &HackathonState) -> u32 {
    state.wave_count - 1
}

fn new_wave(env: &Env, hackathon_id: &String, index: u32, opened_at: u64) -> Wave {
    Wave {
        hackathon_id: hackathon_id.clone(),
        index,
        status: WaveStatus::Opening,
        opened_at,
        closed_at: 0,
        submissions: Vec::new(env),
        votes: Vec::new(env),
    }
}

/// Pay the closed wave's pool: one transfer per submitter, then the
/// unallocated remainder to the safe address.
fn pay_rewards(env: &Env, config: &HackathonConfig, wave: &Wave) -> Result<(), Error> {
    let (shares, remainder) = rewards::split_pool(env, config.unit_cost, &wave.votes);
    let contract = env.current_contract_address();

    for (submitter, amount) in wave.submissions.iter().zip(shares.iter()) {
        transfer_or_fail(env, &config.token, &contract, &submitter, amount)?;
        events::emit_reward_paid(
            env,
            RewardPaid {
                hackathon_id: wave.hackathon_id.clone(),
                wave_index: wave.index,
                recipient: submitter,
                amount,
            },
        );
    }

    if remainder > 0 {
        transfer_or_fail(env, &config.token, &contract, &config.safe, remainder)?;
        events::emit_reward_paid(
            env,
            RewardPaid {
                hackathon_id: wave.hackathon_id.clone(),
                wave_index: wave.index,
                recipient: config.safe.clone(),
                amount: remainder,
            },
        );
    }
    Ok(())
}

/// Move `amount` of `token`, mapping any rejection by the token contract to
/// [`Error::TransferFailed`].
fn transfer_or_fail(
    env: &Env,
    token: &Address,
    from: &Address,
    to: &Address,
    amount: i128,
) -> Result<(), Error> {
    let client = token::Client::new(env, token);
    match client.try_transfer(from, to, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(Error::TransferFailed),
    }
}
