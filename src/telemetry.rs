//! Tracing setup for hosts embedding `chart-graph`.
//!
//! The engine only emits `tracing` events; enabling the `debug` graph setting
//! raises per-pass diagnostics from `trace` to `debug`. Hosts either call
//! [`init_default_tracing`] or install their own subscriber.

/// Installs a compact `fmt` subscriber filtered by `RUST_LOG` (default
/// `chart_graph=info`) when the `telemetry` feature is enabled.
///
/// Returns `false` when the feature is off or a global subscriber already
/// exists.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("chart_graph=info")),
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
