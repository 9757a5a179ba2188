//! # FundMe Contract
//!
//! A minimal crowdfunding ledger. Anyone may contribute native tokens worth
//! at least [`MINIMUM_USD`] according to an external price feed; the owner
//! may withdraw the whole balance, which resets the ledger.
//!
//! | Phase        | Entry Point(s)                                             |
//! |--------------|------------------------------------------------------------|
//! | Bootstrap    | `__constructor`                                            |
//! | Funding      | [`FundMe::fund`]                                           |
//! | Withdrawal   | [`FundMe::withdraw`], [`FundMe::cheaper_withdraw`]         |
//! | Queries      | `amount_funded`, `funder`, `funders_count`, `owner`, `price_feed`, `native_token` |
//! | Pricing      | `minimum_usd`, `conversion_rate`, `feed_version`           |
//!
//! ## Architecture
//!
//! Pricing goes through [`price_feed`] and [`conversion`]. Ledger state lives
//! in [`storage`], and the owner check in [`access`]. Withdrawal
//! sequencing is in [`withdrawal`]. This file holds only the entry points.

#![no_std]

use soroban_sdk::{contract, contracterror, contractimpl, token, Address, Env};

mod access;
pub mod conversion;
mod events;
pub mod price_feed;
mod storage;
mod types;
mod withdrawal;

#[cfg(test)]
mod invariants;
#[cfg(test)]
mod test_withdraw;

pub use conversion::MINIMUM_USD;
pub use events::{ContributionRecorded, FundsWithdrawn};
pub use types::{AccessStrategy, PriceRate, RoundData};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    InsufficientContribution = 1,
    NotOwner                 = 2,
    TransferFailure          = 3,
    OutOfRange               = 4,
    InvalidPrice             = 5,
    PriceFeedUnavailable     = 6,
    ArithmeticOverflow       = 7,
    NotInitialized           = 8,
}

#[contract]
pub struct FundMe;

#[contractimpl]
impl FundMe {
    /// Store the immutable configuration.
    ///
    /// - `owner` is the only identity that may withdraw.
    /// - `native_token` is the token contract of the native asset.
    /// - `price_feed` is the native/USD aggregator.
    pub fn __constructor(env: Env, owner: Address, native_token: Address, price_feed: Address) {
        storage::init_config(&env, &owner, &native_token, &price_feed);
    }

    // ─────────────────────────────────────────────────────────
    // Funding
    // ─────────────────────────────────────────────────────────

    /// Contribute `amount` stroops from `funder`.
    ///
    /// The USD check runs before anything is written. On success the
    /// contribution is recorded, the tokens are pulled from `funder`, and the
    /// funder's new cumulative total is returned.
    pub fn fund(env: Env, funder: Address, amount: i128) -> Result<i128, Error> {
        funder.require_auth();

        let rate = price_feed::latest_rate(&env, &storage::get_price_feed(&env)?)?;
        conversion::require_minimum(amount, &rate)?;

        let total = storage::record_contribution(&env, &funder, amount)?;

        let token = token::Client::new(&env, &storage::get_native_token(&env)?);
        match token.try_transfer(&funder, &env.current_contract_address(), &amount) {
            Ok(Ok(())) => {}
            _ => return Err(Error::TransferFailure),
        }

        events::emit_contribution_recorded(&env, &funder, amount, total);
        Ok(total)
    }

    // ─────────────────────────────────────────────────────────
    // Withdrawal
    // ─────────────────────────────────────────────────────────

    /// Send the whole balance to the owner and reset the ledger, re-reading
    /// the persisted funders sequence on every iteration.
    pub fn withdraw(env: Env, caller: Address) -> Result<i128, Error> {
        withdrawal::execute(&env, &caller, AccessStrategy::StorageLookup)
    }

    /// Same outcome as [`FundMe::withdraw`], reading the funders sequence
    /// once into a local copy.
    pub fn cheaper_withdraw(env: Env, caller: Address) -> Result<i128, Error> {
        withdrawal::execute(&env, &caller, AccessStrategy::LocalCopy)
    }

    // ─────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────

    /// Cumulative stroops contributed by `funder` since the last withdrawal.
    pub fn amount_funded(env: Env, funder: Address) -> i128 {
        storage::amount_funded(&env, &funder)
    }

    /// Contributor at position `index` of the funders sequence.
    pub fn funder(env: Env, index: u32) -> Result<Address, Error> {
        storage::funder_at(&env, index).ok_or(Error::OutOfRange)
    }

    /// Number of entries in the funders sequence, duplicates included.
    pub fn funders_count(env: Env) -> u32 {
        storage::funders_len(&env)
    }

    pub fn owner(env: Env) -> Result<Address, Error> {
        storage::get_owner(&env)
    }

    pub fn price_feed(env: Env) -> Result<Address, Error> {
        storage::get_price_feed(&env)
    }

    pub fn native_token(env: Env) -> Result<Address, Error> {
        storage::get_native_token(&env)
    }

    // ─────────────────────────────────────────────────────────
    // Pricing
    // ─────────────────────────────────────────────────────────

    pub fn minimum_usd(_env: Env) -> i128 {
        MINIMUM_USD
    }

    /// USD value (8 decimals) of `amount` stroops at the current feed rate.
    pub fn conversion_rate(env: Env, amount: i128) -> Result<i128, Error> {
        let rate = price_feed::latest_rate(&env, &storage::get_price_feed(&env)?)?;
        conversion::to_fiat(amount, &rate)
    }

    /// Version reported by the configured price feed.
    pub fn feed_version(env: Env) -> Result<u32, Error> {
        price_feed::version(&env, &storage::get_price_feed(&env)?)
    }
}
