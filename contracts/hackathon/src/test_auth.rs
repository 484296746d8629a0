extern crate std;

use soroban_sdk::{
    testutils::{Address as _, AuthorizedFunction},
    vec, Address, Symbol, Vec,
};

use crate::mocks::Fixture;

/// Whether the last top-level invocation required `who` to authorize `function`
/// on the hackathon contract.
fn authorized(fx: &Fixture, who: &Address, function: &str) -> bool {
    let expected = Symbol::new(&fx.env, function);
    fx.env.auths().iter().any(|(address, invocation)| {
        address == who
            && matches!(
                &invocation.function,
                AuthorizedFunction::Contract((contract, name, _))
                    if *contract == fx.client.address && *name == expected
            )
    })
}

#[test]
fn test_open_requires_owner_auth() {
    let fx = Fixture::opened();
    assert!(authorized(&fx, &fx.owner, "open"));
}

#[test]
fn test_submit_product_requires_submitter_auth() {
    let fx = Fixture::opened();
    let alice = fx.submitter();

    fx.client.submit_product(&alice, &fx.id);

    assert!(authorized(&fx, &alice, "submit_product"));
}

#[test]
fn test_close_requires_safe_auth() {
    let fx = Fixture::opened();
    fx.advance_past_windows();

    fx.client.close(&fx.safe, &fx.id, &Vec::new(&fx.env));

    assert!(authorized(&fx, &fx.safe, "close"));
}

#[test]
fn test_close_without_safe_signature_fails() {
    let fx = Fixture::opened();
    let alice = fx.submitter();
    fx.client.submit_product(&alice, &fx.id);
    fx.advance_past_windows();

    let waves_before = fx.client.get_waves(&fx.id);
    let hackathon_before = fx.client.get_hackathon(&fx.id);

    // Stop mocking: nobody has signed anything.
    fx.env.set_auths(&[]);
    let result = fx.client.try_close(&fx.safe, &fx.id, &vec![&fx.env, 100u32]);
    assert!(matches!(result, Err(Err(_))));

    assert_eq!(fx.client.get_waves(&fx.id), waves_before);
    assert_eq!(fx.client.get_hackathon(&fx.id), hackathon_before);
}

#[test]
fn test_submit_without_submitter_signature_fails() {
    let fx = Fixture::opened();
    let stranger = Address::generate(&fx.env);

    fx.env.set_auths(&[]);
    let result = fx.client.try_submit_product(&stranger, &fx.id);
    assert!(matches!(result, Err(Err(_))));

    assert!(fx.client.get_submit_products(&fx.id, &0).is_empty());
}
