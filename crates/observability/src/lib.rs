//! Process-wide logging setup for superstore binaries and tests.

/// Subscriber installation (filters, output format).
pub mod tracing;

pub use self::tracing::{DEFAULT_DIRECTIVE, init, init_with_default};
