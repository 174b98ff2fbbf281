//! Telemetry helpers for hosts embedding `graph-axis`.
//!
//! The engine only emits `tracing` events (resets, layout passes, discarded
//! limits, label hook failures). Hosts either call `init_default_tracing`
//! or install their own subscriber.

/// Installs a compact `tracing` subscriber filtered by `RUST_LOG`
/// (default `info`) when the `telemetry` feature is enabled.
///
/// Returns `false` when the feature is disabled or the host already set a
/// global subscriber.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .with_target(false)
            .compact();

        return builder.try_init().is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
