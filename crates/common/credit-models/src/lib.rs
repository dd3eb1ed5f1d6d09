//! Shared data model for the credit ledger and paid-delivery flows.
//!
//! Everything in this crate is plain data plus pure functions: no I/O, no
//! clocks beyond the timestamps callers hand in, and no dependency on the
//! HTTP layer. The app crates (`paw-credits`, `paw-delivery`, `paw-upload`)
//! build their orchestration on top of these types.

pub mod allowance;

mod credit;
pub use credit::{
    CreditBalance, CreditPackage, PurchaseContext, PurchaseSession, VerificationOutcome,
};
