//! Tracing subscriber set-up for binaries and benchmarks.
//!
//! The library itself only emits `tracing` events; installing a subscriber is
//! left to the executable.

use crate::error::{DspError, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install a global fmt subscriber.
///
/// `RUST_LOG` wins over `default_filter` when it is set and valid. Fails with
/// [`DspError::Config`] if the filter is malformed or a global subscriber is
/// already installed.
pub fn init(default_filter: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_filter)
            .map_err(|e| DspError::Config(format!("Invalid log filter {:?}: {}", default_filter, e)))?,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .map_err(|e| DspError::Config(format!("Failed to install logger: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_filter() {
        if std::env::var_os("RUST_LOG").is_none() {
            assert!(matches!(init("sigkit_rs=loudest"), Err(DspError::Config(_))));
        }
    }
}
