//! # Types
//!
//! Shared data structures used across the FundMe modules.
//!
//! ## Price data
//!
//! [`RoundData`] is the wire shape returned by the external aggregator
//! contract. The contract only ever consumes it through [`PriceRate`], the
//! pair of `answer` and its fractional precision that the conversion gate
//! needs.
//!
//! ## Access strategy
//!
//! [`AccessStrategy`] selects how the withdrawal engine walks the funders
//! sequence. Both strategies end in the same state; they differ only in
//! how many persistent-storage reads they perform.

use soroban_sdk::contracttype;

/// One aggregator round, as returned by `latest_round_data`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoundData {
    pub round_id: u64,
    /// Native/USD price with `decimals()` fractional digits.
    pub answer: i128,
    pub started_at: u64,
    pub updated_at: u64,
    pub answered_in_round: u64,
}

/// Fixed-decimal exchange rate: `answer / 10^decimals` USD per whole native unit.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PriceRate {
    pub answer: i128,
    pub decimals: u32,
}

/// How the funders sequence is read while clearing the ledger.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AccessStrategy {
    /// Re-read the persisted sequence for every length check and element.
    StorageLookup,
    /// Load the sequence once into a local copy and iterate that.
    LocalCopy,
}
