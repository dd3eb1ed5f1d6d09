//! Purchasable credit packages.
//!
//! The catalog is fixed client-side; the server re-validates amounts at
//! checkout creation. When the user is short of credits for a concrete
//! action, a synthetic package covering exactly the shortfall is prepended
//! so the cheapest way to proceed is always the first option shown.

use credit_models::CreditPackage;

const CENTS_PER_CREDIT: u32 = 5;

const BASE_CATALOG: [(u32, u32, bool); 4] = [
    (100, 499, false),
    (250, 1_199, false),
    (600, 2_699, true),
    (1_200, 4_999, false),
];

/// The package list for a purchase prompt.
///
/// `required_credits` is what the pending action costs (zero for a plain
/// top-up); `current_balance` is the cached, possibly stale balance.
pub fn catalog_for(required_credits: u32, current_balance: u64) -> Vec<CreditPackage> {
    let mut packages: Vec<CreditPackage> = BASE_CATALOG
        .iter()
        .map(|&(credits, price_cents, popular)| CreditPackage {
            credits,
            price_cents,
            popular,
            is_shortfall: false,
        })
        .collect();

    let covered = u32::try_from(current_balance).unwrap_or(u32::MAX);
    let shortfall = required_credits.saturating_sub(covered);
    if shortfall > 0 {
        packages.insert(
            0,
            CreditPackage {
                credits: shortfall,
                price_cents: shortfall.saturating_mul(CENTS_PER_CREDIT),
                popular: false,
                is_shortfall: true,
            },
        );
    }
    packages
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_shortfall_when_balance_covers_the_action() {
        let packages = catalog_for(100, 250);
        assert_eq!(packages.len(), BASE_CATALOG.len());
        assert!(packages.iter().all(|p| !p.is_shortfall));
    }

    #[test]
    fn exact_shortfall_is_prepended() {
        let packages = catalog_for(600, 200);
        assert_eq!(packages[0].credits, 400);
        assert!(packages[0].is_shortfall);
        assert_eq!(packages[0].price_cents, 400 * CENTS_PER_CREDIT);
        assert_eq!(packages.len(), BASE_CATALOG.len() + 1);
    }

    #[test]
    fn balance_equal_to_requirement_needs_no_shortfall() {
        let packages = catalog_for(600, 600);
        assert!(packages.iter().all(|p| !p.is_shortfall));
    }

    #[test]
    fn huge_balance_does_not_underflow() {
        let packages = catalog_for(600, u64::MAX);
        assert!(packages.iter().all(|p| !p.is_shortfall));
    }
}
