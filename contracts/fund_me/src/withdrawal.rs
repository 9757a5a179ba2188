//! # Withdrawal engine
//!
//! One algorithm behind both `withdraw` and `cheaper_withdraw`:
//!
//! 1. **Check**: the caller must be the owner.
//! 2. **Effects**: every `AmountFunded` entry named by the funders sequence is
//!    removed, then the sequence itself is removed.
//! 3. **Interaction**: the contract's whole native balance moves to the owner.
//!
//! The transfer is always the last effect. A re-entrant call made during
//! the transfer would see an empty ledger. If the token rejects the
//! transfer, the engine returns [`Error::TransferFailure`] and the host
//! rolls back steps 2 and 3 together.
//!
//! [`AccessStrategy`] only changes how step 2 reads the sequence:
//! `StorageLookup` re-reads the persisted vector for the loop bound and for
//! every element, and `LocalCopy` reads it once.

use soroban_sdk::{token, Address, Env};

use crate::types::AccessStrategy;
use crate::{access, events, storage, Error};

/// Withdraw the full balance to the owner and reset the ledger.
///
/// Returns the amount transferred.
pub fn execute(env: &Env, caller: &Address, strategy: AccessStrategy) -> Result<i128, Error> {
    let owner = access::require_owner(env, caller)?;

    let funders_cleared = match strategy {
        AccessStrategy::StorageLookup => clear_with_storage_lookups(env),
        AccessStrategy::LocalCopy => clear_with_local_copy(env),
    };
    storage::clear_funders(env);

    let token = token::Client::new(env, &storage::get_native_token(env)?);
    let contract = env.current_contract_address();
    let balance = match token.try_balance(&contract) {
        Ok(Ok(balance)) => balance,
        _ => return Err(Error::TransferFailure),
    };

    events::emit_funds_withdrawn(env, &owner, balance, funders_cleared, strategy);

    if balance > 0 {
        match token.try_transfer(&contract, &owner, &balance) {
            Ok(Ok(())) => {}
            _ => return Err(Error::TransferFailure),
        }
    }

    Ok(balance)
}

fn clear_with_storage_lookups(env: &Env) -> u32 {
    let mut index = 0;
    while index < storage::funders_len(env) {
        if let Some(funder) = storage::funder_at(env, index) {
            storage::clear_amount_funded(env, &funder);
        }
        index += 1;
    }
    index
}

fn clear_with_local_copy(env: &Env) -> u32 {
    let funders = storage::load_funders(env);
    for funder in funders.iter() {
        storage::clear_amount_funded(env, &funder);
    }
    funders.len()
}
