//! # Storage
//!
//! Typed helpers over the two Soroban storage tiers used by FundMe.
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key           | Type      | Description                          |
//! |---------------|-----------|--------------------------------------|
//! | `Owner`       | `Address` | Sole identity allowed to withdraw    |
//! | `PriceFeed`   | `Address` | Native/USD aggregator contract       |
//! | `NativeToken` | `Address` | Token contract of the native asset   |
//!
//! All three are written once by the constructor and never again.
//! Instance TTL is bumped by **7 days** whenever it falls below 1 day remaining.
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key                     | Type           | Description                       |
//! |-------------------------|----------------|-----------------------------------|
//! | `AmountFunded(address)` | `i128`         | Cumulative stroops per contributor|
//! | `Funders`               | `Vec<Address>` | Contributors in insertion order   |
//!
//! Persistent TTL is bumped by **30 days** whenever it falls below 7 days remaining.
//!
//! `Funders` is append-only between withdrawals and keeps duplicates: a
//! contributor who funds twice appears twice. Together the two persistent
//! keys form the ledger; a withdrawal removes both.

use soroban_sdk::{contracttype, Address, Env, Vec};

use crate::Error;

// ── TTL Constants ────────────────────────────────────────────────────

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

/// Instance storage: bump by 7 days when below 1 day remaining.
const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

/// Persistent storage: bump by 30 days when below 7 days remaining.
const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

// ── Storage Keys ─────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Contract owner (Instance).
    Owner,
    /// Price feed aggregator address (Instance).
    PriceFeed,
    /// Native asset token contract (Instance).
    NativeToken,
    /// Ordered contributor sequence (Persistent).
    Funders,
    /// Cumulative contribution keyed by contributor (Persistent).
    AmountFunded(Address),
}

// ── Instance Storage Helpers ─────────────────────────────────────────

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

/// Write the immutable configuration. Only the constructor calls this.
pub fn init_config(env: &Env, owner: &Address, native_token: &Address, price_feed: &Address) {
    env.storage().instance().set(&DataKey::Owner, owner);
    env.storage()
        .instance()
        .set(&DataKey::NativeToken, native_token);
    env.storage().instance().set(&DataKey::PriceFeed, price_feed);
    bump_instance(env);
}

fn get_instance_address(env: &Env, key: &DataKey) -> Result<Address, Error> {
    let value = env
        .storage()
        .instance()
        .get(key)
        .ok_or(Error::NotInitialized)?;
    bump_instance(env);
    Ok(value)
}

pub fn get_owner(env: &Env) -> Result<Address, Error> {
    get_instance_address(env, &DataKey::Owner)
}

pub fn get_price_feed(env: &Env) -> Result<Address, Error> {
    get_instance_address(env, &DataKey::PriceFeed)
}

pub fn get_native_token(env: &Env) -> Result<Address, Error> {
    get_instance_address(env, &DataKey::NativeToken)
}

// ── Persistent Storage Helpers ───────────────────────────────────────

/// Extend the TTL for a persistent storage key. The key must exist.
fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

/// Cumulative stroops contributed by `funder`; zero when absent.
pub fn amount_funded(env: &Env, funder: &Address) -> i128 {
    let key = DataKey::AmountFunded(funder.clone());
    match env.storage().persistent().get::<_, i128>(&key) {
        Some(amount) => {
            bump_persistent(env, &key);
            amount
        }
        None => 0,
    }
}

/// Load the whole funders sequence; empty when absent.
pub fn load_funders(env: &Env) -> Vec<Address> {
    let key = DataKey::Funders;
    match env.storage().persistent().get::<_, Vec<Address>>(&key) {
        Some(funders) => {
            bump_persistent(env, &key);
            funders
        }
        None => Vec::new(env),
    }
}

/// Length of the persisted sequence. Reads storage on every call.
pub fn funders_len(env: &Env) -> u32 {
    load_funders(env).len()
}

/// Element `index` of the persisted sequence. Reads storage on every call.
pub fn funder_at(env: &Env, index: u32) -> Option<Address> {
    load_funders(env).get(index)
}

/// Add `amount` to the contributor's total and append them to the sequence.
///
/// Returns the contributor's new total. The append is unconditional, so a
/// repeat contributor is listed once per contribution.
pub fn record_contribution(env: &Env, funder: &Address, amount: i128) -> Result<i128, Error> {
    let total = amount_funded(env, funder)
        .checked_add(amount)
        .ok_or(Error::ArithmeticOverflow)?;

    let amount_key = DataKey::AmountFunded(funder.clone());
    env.storage().persistent().set(&amount_key, &total);
    bump_persistent(env, &amount_key);

    let mut funders = load_funders(env);
    funders.push_back(funder.clone());
    env.storage().persistent().set(&DataKey::Funders, &funders);
    bump_persistent(env, &DataKey::Funders);

    Ok(total)
}

/// Remove a contributor's entry. Removing an absent key is a no-op.
pub fn clear_amount_funded(env: &Env, funder: &Address) {
    env.storage()
        .persistent()
        .remove(&DataKey::AmountFunded(funder.clone()));
}

/// Remove the whole funders sequence in one write.
pub fn clear_funders(env: &Env) {
    env.storage().persistent().remove(&DataKey::Funders);
}
