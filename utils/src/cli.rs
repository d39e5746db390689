use clap::Args;

/// CLI flags shared by every Gemelos binary, flattened into each command's
/// own argument struct via `#[command(flatten)]`.
#[derive(Args, Debug, Clone)]
pub struct CommonConfig {
    /// Log level passed to the tracing env-filter (error, warn, info, debug, trace)
    #[arg(long, default_value_t = String::from("info"))]
    pub log_level: String,

    /// Seed for the simulator's random number generator.
    ///
    /// Fixed by default so two runs with identical other arguments produce
    /// identical candidate identities and random-forward decisions.
    #[arg(long, default_value_t = 0)]
    pub seed: u64,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            log_level: String::from("info"),
            seed: 0,
        }
    }
}
