use std::path::Path;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Initialise the global `tracing` subscriber.
///
/// `log_level` is mapped to a [`tracing_subscriber::EnvFilter`] directive.
/// Falls back to `"info"` if the level string is not recognised.
pub fn setup_logging(log_level: &str) -> anyhow::Result<()> {
    let upper = log_level.to_uppercase();
    let normalised = match upper.as_str() {
        "DEBUG" | "CRITICAL" => "debug",
        "INFO" => "info",
        "WARNING" => "warn",
        "ERROR" => "error",
        other => other,
    };

    let filter = EnvFilter::try_new(normalised).unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = fmt::layer().with_target(false).with_thread_ids(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .init();

    Ok(())
}

// ── Output-directory bootstrap ─────────────────────────────────────────────────

/// Ensure the output directory exists, creating any missing parents.
pub fn ensure_output_dir(out_dir: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(out_dir)?;
    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_ensure_output_dir_creates_nested_dirs() {
        let tmp = TempDir::new().expect("tempdir");
        let nested = tmp.path().join("reports").join("2013");

        ensure_output_dir(&nested).expect("ensure_output_dir should succeed");

        assert!(nested.is_dir(), "nested output dir must exist");
    }

    #[test]
    fn test_ensure_output_dir_is_idempotent() {
        let tmp = TempDir::new().expect("tempdir");
        let out = tmp.path().join("out");

        ensure_output_dir(&out).unwrap();
        ensure_output_dir(&out).unwrap();

        assert!(out.is_dir());
    }
}
