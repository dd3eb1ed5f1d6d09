use chrono::Utc;
use credit_models::CreditBalance;
use parking_lot::RwLock;
use paw_api::ApiClient;
use tracing::debug;

use crate::error::CreditError;
use crate::types::{BALANCE_PATH, BalanceResponse};

/// Last-known credit balance.
///
/// Single-writer discipline: only the verification reconciler and
/// [`Self::refresh`] write this cache. UI reads go through [`Self::cached`]
/// and never block on a fresh fetch — a stale amount is acceptable, an
/// optimistic decrement is not.
#[derive(Debug, Default)]
pub struct BalanceCache {
    inner: RwLock<Option<CreditBalance>>,
}

impl BalanceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached balance, however stale. `None` until the first refresh or
    /// verification of this session.
    pub fn cached(&self) -> Option<CreditBalance> {
        *self.inner.read()
    }

    /// Convenience for gating decisions: unknown balance counts as zero.
    pub fn amount_or_zero(&self) -> u64 {
        self.cached().map(|b| b.amount).unwrap_or(0)
    }

    pub(crate) fn set(&self, amount: u64) -> CreditBalance {
        let balance = CreditBalance::new(amount, Utc::now());
        debug!(amount, "balance cache updated");
        *self.inner.write() = Some(balance);
        balance
    }

    /// Fetch the authoritative balance and replace the cache.
    pub async fn refresh(&self, client: &ApiClient) -> Result<CreditBalance, CreditError> {
        let response: BalanceResponse = client.get_json(BALANCE_PATH).await?;
        Ok(self.set(response.amount))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty_and_reads_are_stale_tolerant() {
        let cache = BalanceCache::new();
        assert!(cache.cached().is_none());
        assert_eq!(cache.amount_or_zero(), 0);
    }

    #[test]
    fn set_replaces_the_cached_amount() {
        let cache = BalanceCache::new();
        cache.set(250);
        assert_eq!(cache.amount_or_zero(), 250);
        cache.set(100);
        assert_eq!(cache.amount_or_zero(), 100);
    }
}
