//! Wire shapes for the credit endpoints.

use credit_models::PurchaseContext;
use serde::{Deserialize, Serialize};

pub(crate) const BALANCE_PATH: &str = "/api/credits/balance";
pub(crate) const PURCHASE_PATH: &str = "/api/credits/purchase";
pub(crate) const VERIFY_PATH: &str = "/api/credits/verify-purchase";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreatePurchaseRequest {
    pub credit_amount: u32,
    pub context: PurchaseContext,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreatePurchaseResponse {
    pub session_id: String,
    pub checkout_url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VerifyPurchaseRequest {
    pub session_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VerifyPurchaseResponse {
    pub credits_added: u32,
    pub new_balance: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BalanceResponse {
    pub amount: u64,
}
