//! Structured logging with environment variable configuration.
//!
//! Logs are written to stderr so that table and JSON output on stdout stay
//! machine-readable. `RUST_LOG` takes precedence over the level implied by
//! `--verbose` and `--quiet`.

use tracing_subscriber::EnvFilter;

/// Returns the default filter for the verbosity flags.
fn default_directive(verbose: bool, quiet: bool) -> &'static str {
    if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    }
}

fn filter_for(verbose: bool, quiet: bool) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)))
}

/// Initialise the logging subsystem.
///
/// If a global subscriber is already set, this function silently ignores
/// the error.
pub fn init_logging(verbose: bool, quiet: bool) {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter_for(verbose, quiet))
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(false, false), "warn");
        assert_eq!(default_directive(true, false), "debug");
        assert_eq!(default_directive(false, true), "error");
    }

    #[test]
    fn test_init_logging_is_idempotent() {
        init_logging(false, false);
        init_logging(true, false);
    }
}
