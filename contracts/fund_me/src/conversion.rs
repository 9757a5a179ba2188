//! # Conversion gate
//!
//! Converts stroop amounts into their USD value and enforces the minimum
//! contribution. Everything here is integer fixed-point:
//!
//! ```text
//! fiat = amount * answer * 10^FIAT_DECIMALS / (10^NATIVE_DECIMALS * 10^decimals)
//! ```
//!
//! The rate's own precision is folded into the divisor and there is a
//! single floor division at the end, so the result is the exact floor of
//! the true value at `FIAT_DECIMALS` fractional digits.

use crate::types::PriceRate;
use crate::Error;

/// Fractional digits of fiat amounts produced by [`to_fiat`].
pub const FIAT_DECIMALS: u32 = 8;

/// Fractional digits of the native asset (1 unit = 10^7 stroops).
pub const NATIVE_DECIMALS: u32 = 7;

/// Smallest accepted contribution: 50 USD.
pub const MINIMUM_USD: i128 = 50 * 10i128.pow(FIAT_DECIMALS);

fn pow10(exp: u32) -> Result<i128, Error> {
    10i128.checked_pow(exp).ok_or(Error::ArithmeticOverflow)
}

/// USD value of `amount` stroops at `rate`, with [`FIAT_DECIMALS`] digits.
pub fn to_fiat(amount: i128, rate: &PriceRate) -> Result<i128, Error> {
    if rate.answer <= 0 {
        return Err(Error::InvalidPrice);
    }

    let numerator = amount
        .checked_mul(rate.answer)
        .and_then(|n| n.checked_mul(10i128.pow(FIAT_DECIMALS)))
        .ok_or(Error::ArithmeticOverflow)?;
    let denominator = pow10(NATIVE_DECIMALS)?
        .checked_mul(pow10(rate.decimals)?)
        .ok_or(Error::ArithmeticOverflow)?;

    Ok(numerator.div_euclid(denominator))
}

/// Fail with [`Error::InsufficientContribution`] unless `amount` is worth at
/// least [`MINIMUM_USD`]. Returns the computed fiat value on success.
pub fn require_minimum(amount: i128, rate: &PriceRate) -> Result<i128, Error> {
    let fiat = to_fiat(amount, rate)?;
    if fiat < MINIMUM_USD {
        return Err(Error::InsufficientContribution);
    }
    Ok(fiat)
}
