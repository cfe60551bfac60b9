// ============================================================================
// Logging Setup
// Structured log output for demos and host applications
// ============================================================================
//
// The library only emits `tracing` events. A host that already installs its
// own subscriber should not call this.
//
// # Usage
//
// ```ignore
// use tx_amount_core::utils::init_logging;
//
// init_logging(tracing::Level::DEBUG)?;
// ```
// ============================================================================

use tracing::Level;

/// Install a global fmt subscriber printing events at `level` and above.
///
/// # Errors
/// Fails if a global subscriber is already installed.
pub fn init_logging(level: Level) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_fails() {
        let _ = init_logging(Level::TRACE);
        assert!(init_logging(Level::TRACE).is_err());
    }
}
