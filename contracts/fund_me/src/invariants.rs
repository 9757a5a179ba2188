#![allow(dead_code)]

extern crate std;

use std::vec::Vec;

use soroban_sdk::Address;

use crate::test_mocks::Setup;
use crate::Error;

/// INV-1: every contributor's recorded total equals the sum of what they sent.
pub fn assert_ledger_matches(setup: &Setup, expected: &[(Address, i128)]) {
    for (funder, amount) in expected {
        assert_eq!(
            setup.client.amount_funded(funder),
            *amount,
            "INV-1 violated: recorded total differs from contributions"
        );
    }
}

/// INV-2: the funders sequence is exactly `expected`, in insertion order.
pub fn assert_funders_sequence(setup: &Setup, expected: &[Address]) {
    assert_eq!(
        setup.client.funders_count(),
        expected.len() as u32,
        "INV-2 violated: funders sequence length"
    );
    for (index, funder) in expected.iter().enumerate() {
        assert_eq!(
            setup.client.funder(&(index as u32)),
            *funder,
            "INV-2 violated: funder at {} out of order",
            index
        );
    }
    assert_eq!(
        setup.client.try_funder(&(expected.len() as u32)),
        Err(Ok(Error::OutOfRange)),
        "INV-2 violated: read past the end succeeded"
    );
}

/// INV-3: every sequence entry has a non-zero recorded total.
pub fn assert_sequence_entries_funded(setup: &Setup) {
    for index in 0..setup.client.funders_count() {
        let funder = setup.client.funder(&index);
        assert!(
            setup.client.amount_funded(&funder) > 0,
            "INV-3 violated: funder at {} has no recorded total",
            index
        );
    }
}

/// INV-4: the contract holds exactly the sum of all recorded totals.
pub fn assert_balance_covers_ledger(setup: &Setup) {
    let mut distinct: Vec<Address> = Vec::new();
    for index in 0..setup.client.funders_count() {
        let funder = setup.client.funder(&index);
        if !distinct.contains(&funder) {
            distinct.push(funder);
        }
    }
    let recorded: i128 = distinct
        .iter()
        .map(|funder| setup.client.amount_funded(funder))
        .sum();
    assert_eq!(
        setup.contract_balance(),
        recorded,
        "INV-4 violated: contract balance {} != recorded total {}",
        setup.contract_balance(),
        recorded
    );
}

/// INV-5: after a reset, nobody has a total and the sequence is empty.
pub fn assert_ledger_reset(setup: &Setup, previous_funders: &[Address]) {
    for funder in previous_funders {
        assert_eq!(
            setup.client.amount_funded(funder),
            0,
            "INV-5 violated: total survived the reset"
        );
    }
    assert_eq!(setup.client.funders_count(), 0, "INV-5 violated: sequence not empty");
    assert_eq!(
        setup.client.try_funder(&0),
        Err(Ok(Error::OutOfRange)),
        "INV-5 violated: funder(0) readable after reset"
    );
    assert_eq!(
        setup.contract_balance(),
        0,
        "INV-5 violated: balance left in contract"
    );
}

/// Run the invariants that hold for any funded state.
pub fn assert_all_ledger_invariants(setup: &Setup) {
    assert_sequence_entries_funded(setup);
    assert_balance_covers_ledger(setup);
}
