extern crate std;

use std::vec::Vec;

use soroban_sdk::{testutils::Address as _, Address};

use crate::invariants::{assert_all_ledger_invariants, assert_funders_sequence, assert_ledger_reset};
use crate::test_mocks::{Setup, ONE_NATIVE};
use crate::{AccessStrategy, Error};

fn withdraw_with(s: &Setup, strategy: AccessStrategy) -> i128 {
    match strategy {
        AccessStrategy::StorageLookup => s.client.withdraw(&s.owner),
        AccessStrategy::LocalCopy => s.client.cheaper_withdraw(&s.owner),
    }
}

fn fund_five(s: &Setup) -> Vec<Address> {
    (0..5).map(|_| s.new_funder(ONE_NATIVE)).collect()
}

#[test]
fn test_withdraw_from_single_funder() {
    let s = Setup::new();
    let funder = s.new_funder(ONE_NATIVE);

    let starting_contract = s.contract_balance();
    let starting_owner = s.token.balance(&s.owner);

    assert_eq!(s.client.withdraw(&s.owner), ONE_NATIVE);

    assert_eq!(s.contract_balance(), 0);
    assert_eq!(s.token.balance(&s.owner), starting_owner + starting_contract);
    assert_ledger_reset(&s, &[funder]);
}

#[test]
fn test_withdraw_with_multiple_funders() {
    let s = Setup::new();
    let funders = fund_five(&s);
    assert_all_ledger_invariants(&s);

    let starting_contract = s.contract_balance();
    let starting_owner = s.token.balance(&s.owner);
    assert_eq!(starting_contract, 5 * ONE_NATIVE);

    s.client.withdraw(&s.owner);

    assert_eq!(s.contract_balance(), 0);
    assert_eq!(s.token.balance(&s.owner), starting_owner + 5 * ONE_NATIVE);
    assert_ledger_reset(&s, &funders);
}

#[test]
fn test_cheaper_withdraw_with_multiple_funders() {
    let s = Setup::new();
    let funders = fund_five(&s);

    let starting_owner = s.token.balance(&s.owner);

    assert_eq!(s.client.cheaper_withdraw(&s.owner), 5 * ONE_NATIVE);

    assert_eq!(s.token.balance(&s.owner), starting_owner + 5 * ONE_NATIVE);
    assert_ledger_reset(&s, &funders);
}

#[test]
fn test_both_strategies_reach_identical_post_states() {
    let mut outcomes = Vec::new();

    for strategy in [AccessStrategy::StorageLookup, AccessStrategy::LocalCopy] {
        let s = Setup::new();
        let funders = fund_five(&s);
        // A repeat funder puts a duplicate in the sequence.
        s.mint(&funders[2], ONE_NATIVE);
        s.client.fund(&funders[2], &ONE_NATIVE);

        let starting_owner = s.token.balance(&s.owner);
        let paid = withdraw_with(&s, strategy);

        assert_ledger_reset(&s, &funders);
        outcomes.push((
            paid,
            s.token.balance(&s.owner) - starting_owner,
            s.contract_balance(),
            s.client.funders_count(),
            funders
                .iter()
                .map(|f| s.client.amount_funded(f))
                .collect::<Vec<_>>(),
        ));
    }

    assert_eq!(outcomes[0], outcomes[1]);
    assert_eq!(outcomes[0].0, 6 * ONE_NATIVE);
    assert_eq!(outcomes[0].1, 6 * ONE_NATIVE);
}

#[test]
fn test_only_owner_can_withdraw() {
    let s = Setup::new();
    let funders = fund_five(&s);
    let attacker = funders[0].clone();

    assert_eq!(s.client.try_withdraw(&attacker), Err(Ok(Error::NotOwner)));
    assert_eq!(
        s.client.try_cheaper_withdraw(&attacker),
        Err(Ok(Error::NotOwner))
    );

    let stranger = Address::generate(&s.env);
    assert_eq!(s.client.try_withdraw(&stranger), Err(Ok(Error::NotOwner)));

    assert_eq!(s.contract_balance(), 5 * ONE_NATIVE);
    assert_funders_sequence(&s, &funders);
    for funder in &funders {
        assert_eq!(s.client.amount_funded(funder), ONE_NATIVE);
    }
}

#[test]
fn test_rejected_payout_rolls_back_reset() {
    for strategy in [AccessStrategy::StorageLookup, AccessStrategy::LocalCopy] {
        let s = Setup::with_rejecting_token();
        let funders = fund_five(&s);
        s.block_owner_payouts();

        let result = match strategy {
            AccessStrategy::StorageLookup => s.client.try_withdraw(&s.owner),
            AccessStrategy::LocalCopy => s.client.try_cheaper_withdraw(&s.owner),
        };
        assert_eq!(result, Err(Ok(Error::TransferFailure)));

        assert_eq!(s.contract_balance(), 5 * ONE_NATIVE);
        assert_eq!(s.token.balance(&s.owner), 0);
        assert_funders_sequence(&s, &funders);
        for funder in &funders {
            assert_eq!(s.client.amount_funded(funder), ONE_NATIVE);
        }
    }
}

#[test]
fn test_withdraw_on_empty_ledger_pays_nothing() {
    let s = Setup::new();
    assert_eq!(s.client.withdraw(&s.owner), 0);
    assert_eq!(s.client.cheaper_withdraw(&s.owner), 0);
    assert_eq!(s.token.balance(&s.owner), 0);
    assert_ledger_reset(&s, &[]);
}

#[test]
fn test_funding_after_withdrawal_starts_fresh_cycle() {
    let s = Setup::new();
    let first = fund_five(&s);
    s.client.cheaper_withdraw(&s.owner);

    let returning = first[0].clone();
    s.mint(&returning, 2 * ONE_NATIVE);
    s.client.fund(&returning, &(2 * ONE_NATIVE));

    assert_eq!(s.client.amount_funded(&returning), 2 * ONE_NATIVE);
    assert_eq!(s.client.amount_funded(&first[1]), 0);
    assert_funders_sequence(&s, &[returning]);
    assert_all_ledger_invariants(&s);

    s.client.withdraw(&s.owner);
    assert_eq!(s.token.balance(&s.owner), 7 * ONE_NATIVE);
    assert_ledger_reset(&s, &first);
}

#[test]
fn test_reentry_during_payout_is_rejected() {
    for strategy in [AccessStrategy::StorageLookup, AccessStrategy::LocalCopy] {
        let s = Setup::with_reentrant_token();
        let funders = fund_five(&s);
        s.arm_reentry();

        let result = match strategy {
            AccessStrategy::StorageLookup => s.client.try_withdraw(&s.owner),
            AccessStrategy::LocalCopy => s.client.try_cheaper_withdraw(&s.owner),
        };

        match result {
            Ok(Ok(paid)) => {
                assert_eq!(paid, 5 * ONE_NATIVE);
                assert_eq!(s.token.balance(&s.owner), 5 * ONE_NATIVE);
                assert_eq!(s.contract_balance(), 0);
                assert_ledger_reset(&s, &funders);
                let (attempts, succeeded) = s.reentry_outcome();
                assert_eq!(attempts, 1);
                assert!(!succeeded);
            }
            other => {
                assert_eq!(other, Err(Ok(Error::TransferFailure)));
                assert_eq!(s.token.balance(&s.owner), 0);
                assert_eq!(s.contract_balance(), 5 * ONE_NATIVE);
                assert_funders_sequence(&s, &funders);
                for funder in &funders {
                    assert_eq!(s.client.amount_funded(funder), ONE_NATIVE);
                }
                assert!(!s.reentry_outcome().1);
            }
        }
    }
}

#[test]
fn test_reentry_during_funding_is_rejected() {
    let s = Setup::with_reentrant_token();
    let first = s.new_funder(ONE_NATIVE);
    s.arm_reentry();

    let funder = Address::generate(&s.env);
    s.mint(&funder, ONE_NATIVE);

    match s.client.try_fund(&funder, &ONE_NATIVE) {
        Ok(Ok(total)) => {
            assert_eq!(total, ONE_NATIVE);
            assert_eq!(s.contract_balance(), 2 * ONE_NATIVE);
            assert_eq!(s.token.balance(&s.owner), 0);
            assert_funders_sequence(&s, &[first, funder]);
            let (attempts, succeeded) = s.reentry_outcome();
            assert_eq!(attempts, 1);
            assert!(!succeeded);
        }
        other => {
            assert_eq!(other, Err(Ok(Error::TransferFailure)));
            assert_eq!(s.contract_balance(), ONE_NATIVE);
            assert_eq!(s.client.amount_funded(&funder), 0);
            assert_funders_sequence(&s, &[first]);
        }
    }
    assert_all_ledger_invariants(&s);
}
