use std::collections::HashMap;
use std::sync::Arc;

use credit_models::VerificationOutcome;
use parking_lot::Mutex;
use paw_api::{ApiClient, ApiError};
use tracing::{debug, info, warn};

use crate::balance::BalanceCache;
use crate::error::CreditError;
use crate::types::{VERIFY_PATH, VerifyPurchaseRequest, VerifyPurchaseResponse};

/// Confirms completed checkout sessions exactly once per page lifetime.
///
/// The triggering event — observing a return from the payment redirect —
/// can fire more than once (duplicate mount, re-render, re-navigation), so
/// each session identifier is latched to `Pending` synchronously *before*
/// the confirm call starts. Concurrent re-entrant invocations observe the
/// latch and no-op instead of issuing a second request.
///
/// The latch is asymmetric on purpose: success is terminal and never
/// cleared (a verified session must not be replayed), while failure clears
/// the latch so the user can retry what was probably a transient fault.
/// The map is in-memory only; a fresh page load starts clean and relies on
/// the backend treating re-verification of a settled session as settled.
pub struct VerificationReconciler {
    client: Arc<ApiClient>,
    balance: Arc<BalanceCache>,
    sessions: Mutex<HashMap<String, VerificationOutcome>>,
}

impl VerificationReconciler {
    pub fn new(client: Arc<ApiClient>, balance: Arc<BalanceCache>) -> Self {
        Self {
            client,
            balance,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// What the reconciler currently knows about a session. `None` means no
    /// attempt has started this page lifetime.
    pub fn outcome(&self, session_id: &str) -> Option<VerificationOutcome> {
        self.sessions.lock().get(session_id).copied()
    }

    /// Confirm a checkout session with the backend.
    ///
    /// Returns `Pending` when another invocation already owns the confirm
    /// call, the recorded `Verified` outcome when the session has already
    /// been confirmed, or the fresh outcome otherwise. On success the new
    /// balance is written to the cache.
    pub async fn verify(&self, session_id: &str) -> Result<VerificationOutcome, CreditError> {
        if session_id.is_empty() {
            return Err(CreditError::MissingSession);
        }
        if self.client.auth().current_user().is_none() {
            return Err(ApiError::Unauthenticated.into());
        }

        // The latch must be taken synchronously, before the first await, so
        // two near-simultaneous invocations cannot both reach the network.
        {
            let mut sessions = self.sessions.lock();
            match sessions.get(session_id).copied() {
                Some(verified @ VerificationOutcome::Verified { .. }) => {
                    debug!(session_id, "session already verified");
                    return Ok(verified);
                }
                Some(VerificationOutcome::Pending) => {
                    debug!(session_id, "verification already in flight");
                    return Ok(VerificationOutcome::Pending);
                }
                Some(VerificationOutcome::Failed) | None => {
                    sessions.insert(session_id.to_string(), VerificationOutcome::Pending);
                }
            }
        }

        let result: Result<VerifyPurchaseResponse, ApiError> = self
            .client
            .post_json(
                VERIFY_PATH,
                &VerifyPurchaseRequest {
                    session_id: session_id.to_string(),
                },
            )
            .await;

        match result {
            Ok(response) => {
                let outcome = VerificationOutcome::Verified {
                    credits_added: response.credits_added,
                    new_balance: response.new_balance,
                };
                self.sessions
                    .lock()
                    .insert(session_id.to_string(), outcome);
                self.balance.set(response.new_balance);
                info!(
                    session_id,
                    credits_added = response.credits_added,
                    new_balance = response.new_balance,
                    "purchase verified"
                );
                Ok(outcome)
            }
            Err(e) => {
                // Failure is assumed possibly transient; clearing the latch
                // (to `Failed`) lets the user retry.
                self.sessions
                    .lock()
                    .insert(session_id.to_string(), VerificationOutcome::Failed);
                warn!(session_id, error = %e, "purchase verification failed");
                Err(e.into())
            }
        }
    }
}
