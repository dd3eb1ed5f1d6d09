//! Credit ledger data types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Last-known credit balance for the signed-in user.
///
/// Owned exclusively by the balance cache in `paw-credits`: only a
/// successful purchase verification or an explicit balance refresh may
/// produce a new value, and the amount is never decremented optimistically
/// ahead of the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditBalance {
    pub amount: u64,
    pub last_refreshed_at: DateTime<Utc>,
}

impl CreditBalance {
    pub fn new(amount: u64, last_refreshed_at: DateTime<Utc>) -> Self {
        Self {
            amount,
            last_refreshed_at,
        }
    }
}

/// A purchasable bundle of credits.
///
/// Packages are computed, not persisted. When the user is short of credits
/// for a concrete action, a synthetic package covering exactly the shortfall
/// is prepended to the catalog (see `paw_credits::packages`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditPackage {
    pub credits: u32,
    /// Price in integer cents. Display formatting is the UI's problem.
    pub price_cents: u32,
    pub popular: bool,
    pub is_shortfall: bool,
}

/// What a purchase is paying for, sent along with checkout creation for
/// server-side reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum PurchaseContext {
    BookDownload { book_id: String },
    Regeneration { book_id: String },
    TopUp,
}

/// One checkout attempt with the external payment processor.
///
/// Created by the purchase orchestrator and consumed at most once by the
/// verification reconciler when the user returns from the redirect. A
/// session the user abandons is never retried or cleaned up client-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseSession {
    pub session_id: String,
    pub credit_amount: u32,
    pub checkout_url: String,
}

/// Where a checkout session stands from the client's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum VerificationOutcome {
    /// A verification call for this session is already in flight.
    Pending,
    /// Confirmed by the backend; terminal for this page lifetime.
    Verified { credits_added: u32, new_balance: u64 },
    /// Last attempt failed; a retry is allowed.
    Failed,
}

impl VerificationOutcome {
    pub fn is_verified(&self) -> bool {
        matches!(self, Self::Verified { .. })
    }
}
