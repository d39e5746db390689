use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs a stdout `tracing` subscriber for the running binary.
///
/// `log_level` seeds the env-filter default; `RUST_LOG` still overrides it
/// when set, matching the usual `tracing_subscriber` convention. There is no
/// OTLP export layer here — the simulator is a single offline process with
/// no collector to ship spans to.
pub fn init_tracing(log_level: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init();
}
