//! Event payloads published by the FundMe contract.
//!
//! | Topic                   | Data                     |
//! |-------------------------|--------------------------|
//! | `("funded", funder)`    | [`ContributionRecorded`] |
//! | `("withdrawn", owner)`  | [`FundsWithdrawn`]       |
//!
//! The off-chain indexer keys on the leading topic symbol, so these names
//! are part of the public interface.

use soroban_sdk::{contracttype, symbol_short, Address, Env};

use crate::types::AccessStrategy;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContributionRecorded {
    pub funder: Address,
    pub amount: i128,
    /// Funder's cumulative total after this contribution.
    pub total: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FundsWithdrawn {
    pub owner: Address,
    pub amount: i128,
    /// Length of the funders sequence that was cleared, duplicates included.
    pub funders_cleared: u32,
    pub strategy: AccessStrategy,
}

pub fn emit_contribution_recorded(env: &Env, funder: &Address, amount: i128, total: i128) {
    env.events().publish(
        (symbol_short!("funded"), funder.clone()),
        ContributionRecorded {
            funder: funder.clone(),
            amount,
            total,
        },
    );
}

pub fn emit_funds_withdrawn(
    env: &Env,
    owner: &Address,
    amount: i128,
    funders_cleared: u32,
    strategy: AccessStrategy,
) {
    env.events().publish(
        (symbol_short!("withdrawn"), owner.clone()),
        FundsWithdrawn {
            owner: owner.clone(),
            amount,
            funders_cleared,
            strategy,
        },
    );
}
