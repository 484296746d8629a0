//! Canonical event types emitted by the hackathon ledger contract.
//!
//! These mirror the Soroban contract events defined in
//! `contracts/hackathon/src/events.rs`.

use serde::{Deserialize, Serialize};

/// All recognised event kinds from the hackathon contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A hackathon was opened and its deposit pulled in (`opened` topic).
    HackathonOpened,
    /// A participant registered against the current wave (`submitted` topic).
    ProductSubmitted,
    /// The safe closed a wave with its votes (`closed` topic).
    WaveClosed,
    /// A reward transfer was made on close (`rewarded` topic).
    RewardPaid,
    /// The notifier collaborator failed on close (`ntf_fail` topic).
    NotificationFailed,
    /// An event from this contract that we don't recognise yet.
    Unknown,
}

impl EventKind {
    /// Parse the leading topic symbol string produced by Soroban into an [`EventKind`].
    pub fn from_topic(topic: &str) -> Self {
        match topic {
            "opened" => Self::HackathonOpened,
            "submitted" => Self::ProductSubmitted,
            "closed" => Self::WaveClosed,
            "rewarded" => Self::RewardPaid,
            "ntf_fail" => Self::NotificationFailed,
            _ => Self::Unknown,
        }
    }

    /// Return a short identifier string suitable for storage in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HackathonOpened => "hackathon_opened",
            Self::ProductSubmitted => "product_submitted",
            Self::WaveClosed => "wave_closed",
            Self::RewardPaid => "reward_paid",
            Self::NotificationFailed => "notification_failed",
            Self::Unknown => "unknown",
        }
    }

    /// Whether the event's topics carry a wave index after the hackathon id.
    pub fn has_wave_topic(&self) -> bool {
        !matches!(self, Self::HackathonOpened | Self::Unknown)
    }
}

/// A fully decoded hackathon event, ready to be stored in the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HackathonEvent {
    /// RPC-assigned event id; unique per event and used for deduplication.
    pub event_id: String,
    pub event_type: String,
    pub hackathon_id: Option<String>,
    pub wave_index: Option<i64>,
    pub actor: Option<String>,
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
    pub hackathon_id: Option<String>,
    pub wave_index: Option<i64>,
    pub actor: Option<String>,
    pub amount: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
    pub created_at: i64,
}
