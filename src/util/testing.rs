//! Tracing for tests.
//!
//! Diff and session tests call [`init_test_setup`] so the `#[instrument]`
//! spans of `transform_to` and the services show up in failing test output.

use std::sync::Once;
use tracing::{debug, info};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

static TEST_SETUP: Once = Once::new();

/// Install the test subscriber once per test binary.
pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        setup_test_logging();
        info!("treediff test tracing ready");
    });
}

fn setup_test_logging() {
    // RUST_LOG wins; otherwise treediff at debug, dependencies silent
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{}=debug", env!("CARGO_CRATE_NAME"))));

    // captured per test by libtest instead of interleaving on stderr
    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_test_writer()
            .with_target(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(env_filter),
    );

    if tracing::dispatcher::has_been_set() {
        debug!("subscriber installed elsewhere, keeping it");
    } else if let Err(e) = subscriber.try_init() {
        eprintln!("treediff test tracing not installed: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_repeated_calls_when_initializing_then_installs_once() {
        init_test_setup();
        init_test_setup();

        assert!(tracing::dispatcher::has_been_set());
    }
}
