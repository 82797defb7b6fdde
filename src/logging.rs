//! Logging initialization and configuration.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when neither `RUST_LOG` nor an explicit level is given.
pub const DEFAULT_FILTER: &str = "todo_lists=info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Turn a bare level such as `debug` into a crate-scoped directive.
///
/// Anything that already looks like a directive list is passed through.
fn directive(level: &str) -> String {
    if level.contains('=') || level.contains(',') {
        level.to_string()
    } else {
        format!("todo_lists={level},tower_http={level}")
    }
}

/// Initialize the logging system.
///
/// Uses the `RUST_LOG` environment variable for filtering. If not set,
/// defaults to `todo_lists=info`.
///
/// # Panics
///
/// Panics if called more than once, or if another tracing subscriber
/// has already been set.
pub fn init() {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(tracing_subscriber::fmt::layer().compact())
        .init();
}

/// Initialize the logging system with an explicit level or directive.
///
/// Returns `Err` if logging has already been initialized.
pub fn init_with_filter(level: &str) -> Result<(), tracing_subscriber::util::TryInitError> {
    let filter = EnvFilter::try_new(directive(level)).unwrap_or_else(|_| env_filter());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().compact())
        .try_init()
}

/// Try to initialize the logging system.
///
/// Returns `Ok(())` if successful, or `Err` if logging has already been
/// initialized.
pub fn try_init() -> Result<(), tracing_subscriber::util::TryInitError> {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(tracing_subscriber::fmt::layer().compact())
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directive_from_level() {
        assert_eq!(directive("debug"), "todo_lists=debug,tower_http=debug");
    }

    #[test]
    fn test_directive_passthrough() {
        assert_eq!(directive("todo_lists=trace"), "todo_lists=trace");
        assert_eq!(directive("info,hyper=warn"), "info,hyper=warn");
    }

    #[test]
    fn test_try_init_idempotent() {
        let _ = try_init();
        // Second call errors once a subscriber is set, but never panics
        let _ = init_with_filter("debug");
    }

    #[test]
    fn test_logging_works() {
        let _ = try_init();

        tracing::info!("test info message");
        tracing::debug!(list_id = 3, "test debug message");
        tracing::warn!("test warn message");
        tracing::error!("test error message");
    }
}
