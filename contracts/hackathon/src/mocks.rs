//! Test-only collaborator contracts and fixtures.

extern crate std;

use soroban_sdk::{
    contract, contracterror, contractimpl, panic_with_error, symbol_short, testutils::Address as _,
    token, Address, Env, String,
};

use crate::types::{HackathonParams, WaveNotice};
use crate::{HackathonContract, HackathonContractClient};

pub const UNIT_COST: i128 = 10;
pub const TOTAL_DEPOSIT: i128 = 1_000;
pub const SUBMISSION_WINDOW: u64 = 600;
pub const VOTING_WINDOW: u64 = 600;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum MockError {
    Rejected = 1,
}

/// Token stand-in whose `transfer` can be switched to fail.
#[contract]
pub struct FlakyToken;

#[contractimpl]
impl FlakyToken {
    pub fn set_failing(env: Env, failing: bool) {
        env.storage()
            .instance()
            .set(&symbol_short!("failing"), &failing);
    }

    pub fn transfer(env: Env, _from: Address, _to: Address, _amount: i128) {
        let failing: bool = env
            .storage()
            .instance()
            .get(&symbol_short!("failing"))
            .unwrap_or(false);
        if failing {
            panic_with_error!(&env, MockError::Rejected);
        }
        let count: u32 = env
            .storage()
            .instance()
            .get(&symbol_short!("count"))
            .unwrap_or(0);
        env.storage()
            .instance()
            .set(&symbol_short!("count"), &(count + 1));
    }

    pub fn transfer_count(env: Env) -> u32 {
        env.storage()
            .instance()
            .get(&symbol_short!("count"))
            .unwrap_or(0)
    }
}

/// Notifier that remembers every notice it receives.
#[contract]
pub struct RecordingNotifier;

#[contractimpl]
impl RecordingNotifier {
    pub fn send_notification(env: Env, recipient: Address, payload: WaveNotice) {
        env.storage()
            .instance()
            .set(&symbol_short!("last"), &(recipient, payload));
        let count: u32 = env
            .storage()
            .instance()
            .get(&symbol_short!("count"))
            .unwrap_or(0);
        env.storage()
            .instance()
            .set(&symbol_short!("count"), &(count + 1));
    }

    pub fn count(env: Env) -> u32 {
        env.storage()
            .instance()
            .get(&symbol_short!("count"))
            .unwrap_or(0)
    }

    pub fn last(env: Env) -> Option<(Address, WaveNotice)> {
        env.storage().instance().get(&symbol_short!("last"))
    }
}

// Each contract's generated entry-point symbols are module-level, so a second
// `send_notification` needs its own module.
mod broken {
    use super::*;

    /// Notifier that always fails.
    #[contract]
    pub struct BrokenNotifier;

    #[contractimpl]
    impl BrokenNotifier {
        pub fn send_notification(env: Env, _recipient: Address, _payload: WaveNotice) {
            env.storage().instance().set(&symbol_short!("touched"), &true);
            panic_with_error!(&env, MockError::Rejected);
        }

        pub fn touched(env: Env) -> bool {
            env.storage()
                .instance()
                .get(&symbol_short!("touched"))
                .unwrap_or(false)
        }
    }
}

pub use broken::{BrokenNotifier, BrokenNotifierClient};

pub struct Fixture {
    pub env: Env,
    pub client: HackathonContractClient<'static>,
    pub owner: Address,
    pub safe: Address,
    pub token: token::Client<'static>,
    pub id: String,
}

impl Fixture {
    /// Contract plus a funded Stellar asset; nothing opened yet.
    pub fn new() -> Self {
        let env = Env::default();
        env.mock_all_auths();

        let contract_id = env.register(HackathonContract, ());
        let client = HackathonContractClient::new(&env, &contract_id);

        let owner = Address::generate(&env);
        let safe = Address::generate(&env);
        let token_admin = Address::generate(&env);
        let sac = env.register_stellar_asset_contract_v2(token_admin);
        token::StellarAssetClient::new(&env, &sac.address()).mint(&owner, &TOTAL_DEPOSIT);
        let token = token::Client::new(&env, &sac.address());

        let id = String::from_str(&env, "EthGlobalTokyo");

        Fixture {
            env,
            client,
            owner,
            safe,
            token,
            id,
        }
    }

    pub fn params(&self, notifier: Option<Address>) -> HackathonParams {
        HackathonParams {
            token: self.token.address.clone(),
            safe: self.safe.clone(),
            notifier,
            unit_cost: UNIT_COST,
            total_deposit: TOTAL_DEPOSIT,
            submission_window: SUBMISSION_WINDOW,
            voting_window: VOTING_WINDOW,
        }
    }

    /// Fixture with the default hackathon already opened, no notifier.
    pub fn opened() -> Self {
        let fx = Self::new();
        fx.client.open(&fx.owner, &fx.id, &fx.params(None));
        fx
    }

    pub fn submitter(&self) -> Address {
        Address::generate(&self.env)
    }

    pub fn advance(&self, seconds: u64) {
        use soroban_sdk::testutils::Ledger;
        self.env.ledger().with_mut(|li| li.timestamp += seconds);
    }

    pub fn advance_past_windows(&self) {
        self.advance(SUBMISSION_WINDOW + VOTING_WINDOW);
    }
}
