//! Canonical event types emitted by the FundMe contract.
//!
//! These mirror the Soroban contract events defined in
//! `contracts/fund_me/src/events.rs`.

use serde::{Deserialize, Serialize};

/// All recognised event kinds from the FundMe contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A contribution passed the USD gate and was recorded (`funded` topic).
    ContributionRecorded,
    /// The owner withdrew the balance and the ledger was reset (`withdrawn` topic).
    FundsWithdrawn,
    /// An event from this contract that we don't recognise yet.
    Unknown,
}

impl EventKind {
    /// Parse the leading topic symbol string produced by Soroban into an [`EventKind`].
    pub fn from_topic(topic: &str) -> Self {
        match topic {
            "funded" => Self::ContributionRecorded,
            "withdrawn" => Self::FundsWithdrawn,
            _ => Self::Unknown,
        }
    }

    /// Return a short identifier string suitable for storage in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ContributionRecorded => "contribution_recorded",
            Self::FundsWithdrawn => "funds_withdrawn",
            Self::Unknown => "unknown",
        }
    }

    /// Inverse of [`EventKind::as_str`].
    pub fn from_stored(value: &str) -> Self {
        match value {
            "contribution_recorded" => Self::ContributionRecorded,
            "funds_withdrawn" => Self::FundsWithdrawn,
            _ => Self::Unknown,
        }
    }
}

/// A fully decoded FundMe event, ready to be stored in the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FundMeEvent {
    /// RPC event id, unique per contract.
    pub event_id: String,
    pub event_type: String,
    /// Funder for contributions, owner for withdrawals.
    pub actor: Option<String>,
    /// Stroops, kept as a decimal string because the contract uses `i128`.
    pub amount: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
}

/// A raw event record as stored in / read from the database.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct EventRecord {
    pub id: i64,
    pub event_id: String,
    pub event_type: String,
    pub actor: Option<String>,
    pub amount: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
    pub created_at: i64,
}

/// Off-chain view of one contributor's open balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunderTotal {
    pub funder: String,
    /// Cumulative stroops since the latest withdrawal, as a decimal string.
    pub total: String,
    pub contributions: u32,
}

/// Replay `records` (ordered by ledger, then id) the way the contract
/// mutates its ledger: contributions accumulate per funder and every
/// withdrawal resets all totals.
///
/// Funders are returned in order of their first contribution in the
/// current cycle. Records with a missing actor or an unparsable amount are
/// skipped.
pub fn replay_funder_totals(records: &[EventRecord]) -> Vec<FunderTotal> {
    let mut open: Vec<(String, i128, u32)> = Vec::new();

    for record in records {
        match EventKind::from_stored(&record.event_type) {
            EventKind::FundsWithdrawn => open.clear(),
            EventKind::ContributionRecorded => {
                let (Some(actor), Some(amount)) = (
                    record.actor.as_deref(),
                    record.amount.as_deref().and_then(|a| a.parse::<i128>().ok()),
                ) else {
                    continue;
                };
                match open.iter_mut().find(|(funder, _, _)| funder == actor) {
                    Some(entry) => {
                        entry.1 = entry.1.saturating_add(amount);
                        entry.2 += 1;
                    }
                    None => open.push((actor.to_string(), amount, 1)),
                }
            }
            EventKind::Unknown => {}
        }
    }

    open.into_iter()
        .map(|(funder, total, contributions)| FunderTotal {
            funder,
            total: total.to_string(),
            contributions,
        })
        .collect()
}
