extern crate std;

use soroban_sdk::{
    symbol_short, testutils::Events, vec, Env, IntoVal, Symbol, TryFromVal, TryIntoVal, Val, Vec,
};

use crate::events::{HackathonOpened, NotifyFailed, ProductSubmitted, RewardPaid, WaveClosed};
use crate::mocks::{BrokenNotifier, Fixture, TOTAL_DEPOSIT, UNIT_COST};

/// Events published by the hackathon contract itself, in order.
fn contract_events(fx: &Fixture) -> std::vec::Vec<(Vec<Val>, Val)> {
    fx.env
        .events()
        .all()
        .iter()
        .filter(|(contract, _, _)| *contract == fx.client.address)
        .map(|(_, topics, data)| (topics, data))
        .collect()
}

/// Contract events whose leading topic is `name`.
fn topics_of(fx: &Fixture, name: Symbol) -> std::vec::Vec<(Vec<Val>, Val)> {
    contract_events(fx)
        .into_iter()
        .filter(|(topics, _)| {
            topics
                .get(0)
                .and_then(|t| Symbol::try_from_val(&fx.env, &t).ok())
                .map(|topic| topic == name)
                .unwrap_or(false)
        })
        .collect()
}

fn decode<T: TryFromVal<Env, Val>>(env: &Env, data: &Val) -> T {
    data.try_into_val(env).unwrap()
}

#[test]
fn test_hackathon_opened_event() {
    let fx = Fixture::opened();

    let all_events = fx.env.events().all();
    let last_event = all_events.last().expect("No events found");

    // Topic: (symbol_short!("opened"), hackathon_id)
    assert_eq!(last_event.0, fx.client.address);
    let expected_topics = vec![
        &fx.env,
        symbol_short!("opened").into_val(&fx.env),
        fx.id.into_val(&fx.env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: HackathonOpened = last_event.2.try_into_val(&fx.env).unwrap();
    assert_eq!(
        event_data,
        HackathonOpened {
            hackathon_id: fx.id.clone(),
            owner: fx.owner.clone(),
            token: fx.token.address.clone(),
            safe: fx.safe.clone(),
            deposit: TOTAL_DEPOSIT,
        }
    );
}

#[test]
fn test_product_submitted_event() {
    let fx = Fixture::opened();
    let alice = fx.submitter();

    fx.client.submit_product(&alice, &fx.id);

    let all_events = fx.env.events().all();
    let last_event = all_events.last().expect("No events found");

    // Topic: (symbol_short!("submitted"), hackathon_id, wave_index)
    assert_eq!(last_event.0, fx.client.address);
    let expected_topics = vec![
        &fx.env,
        symbol_short!("submitted").into_val(&fx.env),
        fx.id.into_val(&fx.env),
        0u32.into_val(&fx.env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: ProductSubmitted = last_event.2.try_into_val(&fx.env).unwrap();
    assert_eq!(
        event_data,
        ProductSubmitted {
            hackathon_id: fx.id.clone(),
            wave_index: 0,
            submitter: alice,
        }
    );
}

#[test]
fn test_wave_closed_and_reward_events() {
    let fx = Fixture::opened();
    let (alice, bob) = (fx.submitter(), fx.submitter());
    fx.client.submit_product(&alice, &fx.id);
    fx.client.submit_product(&bob, &fx.id);
    fx.advance_past_windows();

    let votes = vec![&fx.env, 70u32, 30u32];
    fx.client.close(&fx.safe, &fx.id, &votes);

    let closed = topics_of(&fx, symbol_short!("closed"));
    assert_eq!(closed.len(), 1);
    let (topics, data) = &closed[0];
    assert_eq!(
        *topics,
        vec![
            &fx.env,
            symbol_short!("closed").into_val(&fx.env),
            fx.id.into_val(&fx.env),
            0u32.into_val(&fx.env),
        ]
    );
    let closed_data: WaveClosed = decode(&fx.env, data);
    assert_eq!(
        closed_data,
        WaveClosed {
            hackathon_id: fx.id.clone(),
            wave_index: 0,
            closer: fx.safe.clone(),
            votes,
            deposit_amount: TOTAL_DEPOSIT - UNIT_COST,
        }
    );

    let rewards: std::vec::Vec<RewardPaid> = topics_of(&fx, symbol_short!("rewarded"))
        .iter()
        .map(|(_, data)| decode(&fx.env, data))
        .collect();
    assert_eq!(
        rewards,
        std::vec![
            RewardPaid {
                hackathon_id: fx.id.clone(),
                wave_index: 0,
                recipient: alice,
                amount: 7,
            },
            RewardPaid {
                hackathon_id: fx.id.clone(),
                wave_index: 0,
                recipient: bob,
                amount: 3,
            },
        ]
    );
}

#[test]
fn test_empty_wave_rewards_safe() {
    let fx = Fixture::opened();
    fx.advance_past_windows();

    fx.client.close(&fx.safe, &fx.id, &Vec::new(&fx.env));

    let rewards = topics_of(&fx, symbol_short!("rewarded"));
    assert_eq!(rewards.len(), 1);
    let reward: RewardPaid = decode(&fx.env, &rewards[0].1);
    assert_eq!(reward.recipient, fx.safe);
    assert_eq!(reward.amount, UNIT_COST);
}

#[test]
fn test_notify_failed_event() {
    let fx = Fixture::new();
    let notifier = fx.env.register(BrokenNotifier, ());
    fx.client
        .open(&fx.owner, &fx.id, &fx.params(Some(notifier.clone())));
    fx.advance_past_windows();

    fx.client.close(&fx.safe, &fx.id, &Vec::new(&fx.env));

    let failures = topics_of(&fx, symbol_short!("ntf_fail"));
    assert_eq!(failures.len(), 1);
    let data: NotifyFailed = decode(&fx.env, &failures[0].1);
    assert_eq!(
        data,
        NotifyFailed {
            hackathon_id: fx.id.clone(),
            wave_index: 0,
            notifier,
        }
    );
}

#[test]
fn test_no_notify_failed_without_notifier() {
    let fx = Fixture::opened();
    fx.advance_past_windows();

    fx.client.close(&fx.safe, &fx.id, &Vec::new(&fx.env));

    assert!(topics_of(&fx, symbol_short!("ntf_fail")).is_empty());
}
