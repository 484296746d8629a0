//! Reward split for a closing wave.
//!
//! The amount debited from the deposit on close (the hackathon's unit cost)
//! is the pool for that wave. Each submitter gets `pool * vote / total_votes`,
//! rounded down. Whatever is not allocated this way is the remainder and is
//! forwarded to the safe address.

use soroban_sdk::{Env, Vec};

/// Largest pool whose product with any single vote fits in an `i128`.
pub const MAX_POOL: i128 = i128::MAX / u32::MAX as i128;

/// Split `pool` across `votes`, returning the per-submitter shares (aligned
/// with `votes`) and the unallocated remainder.
///
/// With no votes, or all-zero votes, the whole pool is the remainder.
/// `pool` must not exceed [`MAX_POOL`]; `open` rejects larger unit costs.
pub fn split_pool(env: &Env, pool: i128, votes: &Vec<u32>) -> (Vec<i128>, i128) {
    let mut shares = Vec::new(env);
    let total: i128 = votes.iter().map(i128::from).sum();

    if total == 0 {
        for _ in votes.iter() {
            shares.push_back(0);
        }
        return (shares, pool);
    }

    let mut allocated: i128 = 0;
    for vote in votes.iter() {
        let share = pool * i128::from(vote) / total;
        allocated += share;
        shares.push_back(share);
    }

    (shares, pool - allocated)
}
