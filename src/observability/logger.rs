//! Tracing subscriber setup
//!
//! Human-readable lines on stderr. `RUST_LOG` wins over the configured
//! filter when set.

use tracing_subscriber::EnvFilter;

/// Build the filter: `RUST_LOG` if set and valid, else `fallback`, else `info`
pub fn env_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber. Later calls are no-ops.
pub fn init_tracing(fallback_filter: &str) {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(env_filter(fallback_filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(filter = fallback_filter, "tracing initialised");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_fallback_degrades_to_info() {
        // Only meaningful when RUST_LOG is unset, but must never panic
        let _ = env_filter("not a [valid filter");
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init_tracing("debug");
        init_tracing("info");
    }
}
