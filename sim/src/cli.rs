use clap::Parser;
use gemelos_types::HashFunction;
use gemelos_utils::CommonConfig;

/// Drives a simulated Gemelos two-club overlay over a synthetic population
/// and reports routing statistics.
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Number of nodes to populate the network with
    pub network_size: usize,

    /// Length, in bits, of the head fingerprint
    pub head_length: usize,

    /// Length, in bits, of the boot fingerprint
    pub boot_length: usize,

    /// Maximum number of hops a single routing attempt may take before it
    /// is reported as hop-cap-exceeded rather than delivered
    #[arg(default_value_t = 20)]
    pub hop_cap: usize,

    /// Hash family used to derive each node's canonical binary address
    #[arg(long, value_enum, default_value_t = HashFunction::Sha256)]
    pub hash_function: HashFunction,

    /// Address order in bits. Defaults to the chosen hash function's
    /// natural output length; overriding it to a mismatched value is
    /// reported as a configuration error rather than silently truncated.
    #[arg(long)]
    pub address_order: Option<u32>,

    /// Number of (source, destination) pairs to sample when measuring
    /// routing behavior
    #[arg(long, default_value_t = 1000)]
    pub samples: usize,

    /// Route sampled pairs across a rayon thread pool instead of
    /// sequentially. Sampling itself, and per-route randomness, stay
    /// reproducible under `--seed` either way.
    #[arg(long, default_value_t = false)]
    pub parallel: bool,

    /// Output format for the final report
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[command(flatten)]
    pub common: CommonConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl Cli {
    pub fn order_bits(&self) -> u32 {
        self.address_order
            .unwrap_or(self.hash_function.output_bits() as u32)
    }
}
