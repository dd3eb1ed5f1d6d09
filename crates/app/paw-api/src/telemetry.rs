//! Process-wide tracing setup.
//!
//! Installed once at startup; repeated calls are no-ops. Log filtering is
//! driven by `RUST_LOG` with a quiet default, so production hosts suppress
//! debug output without any runtime log switch.

use std::sync::Once;

use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

pub fn init() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("info,paw_api=info"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_init_is_a_noop() {
        init();
        init();
    }
}
