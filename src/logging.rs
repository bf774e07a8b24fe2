//! Structured logging setup.
//!
//! Call [`init`] once at startup. Library code only emits `tracing` events;
//! nothing is printed unless a subscriber is installed.

use std::sync::Once;

use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Log the start of a pipeline operation.
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::info!(op = $op, event = "start")
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(op = $op, event = "start", $($field)*)
    };
}

/// Log the successful end of a pipeline operation.
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(op = $op, event = "end", duration_ms = $duration)
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(op = $op, event = "end", duration_ms = $duration, $($field)*)
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output, `info` level by default.
    Development,
    /// JSON lines, `info` level by default.
    Production,
    /// No output; tests install their own subscribers.
    Test,
}

/// Filter used when `RUST_LOG` is unset. Per-record events sit at `debug`
/// and stay hidden unless asked for.
pub fn default_filter(profile: Profile) -> &'static str {
    match profile {
        Profile::Development | Profile::Production => "rib_stability=info",
        Profile::Test => "off",
    }
}

static INIT_ONCE: Once = Once::new();

/// Install the global subscriber for `profile`. `RUST_LOG` overrides the
/// default filter. Later calls are no-ops.
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| match profile {
        Profile::Development => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| EnvFilter::new(default_filter(profile))),
                )
                .with_writer(std::io::stderr)
                .init();
        }
        Profile::Production => {
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(
                    EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| EnvFilter::new(default_filter(profile))),
                )
                .with_writer(std::io::stderr)
                .init();
        }
        Profile::Test => {
            tracing_subscriber::registry().init();
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_idempotent() {
        init(Profile::Test);
        init(Profile::Test);
        init(Profile::Development);
    }

    #[test]
    fn test_default_filter_hides_per_record_events() {
        assert_eq!(default_filter(Profile::Development), "rib_stability=info");
        assert_eq!(default_filter(Profile::Production), "rib_stability=info");
        assert_eq!(default_filter(Profile::Test), "off");
    }
}
