//! Single-owner access control.
//!
//! The owner is written once by the constructor. There is no entry point
//! that changes it.

use soroban_sdk::{Address, Env};

use crate::storage;
use crate::Error;

/// Require `caller` to have signed the invocation and to be the owner.
pub fn require_owner(env: &Env, caller: &Address) -> Result<Address, Error> {
    caller.require_auth();
    let owner = storage::get_owner(env)?;
    if *caller != owner {
        return Err(Error::NotOwner);
    }
    Ok(owner)
}
