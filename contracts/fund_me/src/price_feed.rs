//! Read-only adapter over the external native/USD aggregator.
//!
//! The aggregator is another contract; FundMe never writes to it and does
//! not judge staleness. Any failed cross-contract call surfaces as
//! [`Error::PriceFeedUnavailable`].

use soroban_sdk::{contractclient, Address, Env};

use crate::types::{PriceRate, RoundData};
use crate::Error;

/// Interface FundMe expects from a price aggregator.
#[allow(dead_code)]
#[contractclient(name = "PriceFeedClient")]
pub trait PriceFeed {
    fn latest_round_data(env: Env) -> RoundData;
    fn decimals(env: Env) -> u32;
    fn version(env: Env) -> u32;
}

/// Latest rate reported by `feed`, with its fractional precision.
pub fn latest_rate(env: &Env, feed: &Address) -> Result<PriceRate, Error> {
    let client = PriceFeedClient::new(env, feed);

    let round = match client.try_latest_round_data() {
        Ok(Ok(round)) => round,
        _ => return Err(Error::PriceFeedUnavailable),
    };
    let decimals = match client.try_decimals() {
        Ok(Ok(decimals)) => decimals,
        _ => return Err(Error::PriceFeedUnavailable),
    };

    if round.answer <= 0 {
        return Err(Error::InvalidPrice);
    }

    Ok(PriceRate {
        answer: round.answer,
        decimals,
    })
}

/// Version number reported by `feed`.
pub fn version(env: &Env, feed: &Address) -> Result<u32, Error> {
    match PriceFeedClient::new(env, feed).try_version() {
        Ok(Ok(version)) => Ok(version),
        _ => Err(Error::PriceFeedUnavailable),
    }
}
