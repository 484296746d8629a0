//! # Types
//!
//! Shared data structures used across all modules of the hackathon ledger.
//!
//! ## Design decisions
//!
//! ### Config / State split
//!
//! A `Hackathon` is internally stored as two separate ledger entries:
//!
//! - [`HackathonConfig`]: written once by `open`; never mutated.
//! - [`HackathonState`]: written on every wave closure.
//!
//! Waves are stored one entry per index so that a submission only rewrites
//! the current wave, never the whole history.
//!
//! ### Wave status as a Finite-State Machine
//!
//! ```text
//! (None) ──open / close(prev)──► Opening ──close──► Closed
//! ```
//!
//! `None` is never stored; it is what a query would report for an index
//! beyond the wave count. `Closed` is terminal for the wave.

use soroban_sdk::{contracttype, Address, String, Vec};

/// Lifecycle status of a single wave.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum WaveStatus {
    None = 0,
    /// Accepting submissions.
    Opening = 1,
    /// Votes recorded and rewards paid.
    Closed = 2,
}

/// Arguments to `open`, bundled so the entry point stays readable.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HackathonParams {
    /// Token contract used for the deposit and for rewards.
    pub token: Address,
    /// The only account allowed to close waves; receives unallocated rewards.
    pub safe: Address,
    /// Optional notification contract, called best-effort on close.
    pub notifier: Option<Address>,
    /// Amount debited from the deposit on each close.
    pub unit_cost: i128,
    /// Amount pulled from the owner at open time.
    pub total_deposit: i128,
    /// Seconds a wave accepts submissions.
    pub submission_window: u64,
    /// Seconds reserved for voting after the submission window.
    pub voting_window: u64,
}

/// Immutable hackathon configuration, written once at open.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HackathonConfig {
    pub id: String,
    pub owner: Address,
    pub token: Address,
    pub safe: Address,
    pub notifier: Option<Address>,
    pub unit_cost: i128,
    pub submission_window: u64,
    pub voting_window: u64,
    pub opened_at: u64,
}

impl HackathonConfig {
    /// Minimum number of seconds a wave stays open before it may be closed.
    pub fn wave_duration(&self) -> u64 {
        self.submission_window.saturating_add(self.voting_window)
    }
}

/// Mutable hackathon state, updated on every close.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HackathonState {
    pub deposit_amount: i128,
    pub wave_count: u32,
}

/// Full representation of a hackathon.
///
/// Used as the public API return type; reconstructed internally from
/// the split `HackathonConfig` + `HackathonState` storage entries.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Hackathon {
    /// Unique identifier chosen by the opener.
    pub id: String,
    /// Address that funded the deposit.
    pub owner: Address,
    /// Token used for deposit and rewards.
    pub token: Address,
    /// Address authorized to close waves.
    pub safe: Address,
    /// Optional notification collaborator.
    pub notifier: Option<Address>,
    /// Amount debited per closed wave.
    pub unit_cost: i128,
    /// Remaining deposit; never increases.
    pub deposit_amount: i128,
    pub submission_window: u64,
    pub voting_window: u64,
    /// Ledger timestamp of `open`.
    pub opened_at: u64,
    /// Number of waves created so far, including the open one.
    pub wave_count: u32,
}

/// One timed round of submissions and votes.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Wave {
    pub hackathon_id: String,
    /// Position in the hackathon's wave sequence, 0-based.
    pub index: u32,
    pub status: WaveStatus,
    /// Ledger timestamp at which the wave entered `Opening`.
    pub opened_at: u64,
    /// Ledger timestamp of the close, 0 while opening.
    pub closed_at: u64,
    /// Submitters in submission order.
    pub submissions: Vec<Address>,
    /// Vote shares aligned with `submissions`; empty until closed.
    pub votes: Vec<u32>,
}

/// Payload handed to the notifier when a wave closes.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WaveNotice {
    pub hackathon_id: String,
    pub wave_index: u32,
    pub closed_at: u64,
}
