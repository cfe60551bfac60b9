// ============================================================================
// Utilities Module
// Helpers for applications embedding the core
// ============================================================================

#[cfg(feature = "logging")]
mod logging;

#[cfg(feature = "logging")]
pub use logging::init_logging;
