use std::sync::Arc;

use credit_models::{PurchaseContext, PurchaseSession};
use paw_api::{ApiClient, ApiError, CheckoutRedirect};
use tracing::info;

use crate::error::CreditError;
use crate::types::{CreatePurchaseRequest, CreatePurchaseResponse, PURCHASE_PATH};

/// Ceiling enforced by the purchase UI before it ever reaches the
/// orchestrator. The server enforces its own bound regardless.
pub const MAX_CREDITS_PER_PURCHASE: u32 = 100_000;

/// Creates checkout sessions with the external payment processor.
///
/// A successful call returns a [`PurchaseSession`]; the caller's only
/// remaining job is [`Self::hand_off`], a full-page navigation to the
/// processor's checkout URL. Nothing is persisted client-side and nothing
/// is retried — a failed call leaves the balance cache untouched and the
/// user re-invokes.
pub struct PurchaseOrchestrator {
    client: Arc<ApiClient>,
}

impl PurchaseOrchestrator {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Create a checkout session for `credit_amount` credits.
    ///
    /// # Errors
    ///
    /// `InvalidAmount` for zero credits (before any network call),
    /// `Unauthenticated` when no user is signed in (before any network
    /// call), otherwise whatever the transport or server reports.
    pub async fn create_session(
        &self,
        credit_amount: u32,
        context: PurchaseContext,
    ) -> Result<PurchaseSession, CreditError> {
        if credit_amount == 0 {
            return Err(CreditError::InvalidAmount);
        }
        if self.client.auth().current_user().is_none() {
            return Err(ApiError::Unauthenticated.into());
        }

        let response: CreatePurchaseResponse = self
            .client
            .post_json(
                PURCHASE_PATH,
                &CreatePurchaseRequest {
                    credit_amount,
                    context,
                },
            )
            .await?;

        info!(
            session_id = %response.session_id,
            credit_amount,
            "checkout session created"
        );

        Ok(PurchaseSession {
            session_id: response.session_id,
            credit_amount,
            checkout_url: response.checkout_url,
        })
    }

    /// Hand the browsing context to the payment processor. The processor
    /// runs its own verification flow and returns the user with a session
    /// identifier for the reconciler.
    pub fn hand_off(&self, session: &PurchaseSession, redirect: &dyn CheckoutRedirect) {
        info!(session_id = %session.session_id, "redirecting to checkout");
        redirect.redirect(&session.checkout_url);
    }
}
