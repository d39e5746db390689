use crate::cli::Cli;
use crate::identity::synthetic_identities;
use crate::report::SimulationReport;
use gemelos_core::{Network, NetworkConfig, RandomForwardPolicy, RouteRecord};
use gemelos_types::GemelosError;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rayon::prelude::*;
use tracing::info;

/// A splitmix64-style decorrelation constant, used only to derive
/// independent per-task RNG substreams from one base seed — not for any
/// cryptographic purpose.
const SUBSTREAM_MULTIPLIER: u64 = 0x9E37_79B9_7F4A_7C15;

/// Builds, seeds, and routes across a simulated network per `cli`, and
/// returns the aggregated report. The same `--seed` always produces the
/// same population, the same sampled pairs, and the same routing
/// decisions, whether or not `--parallel` is set.
pub fn run(cli: &Cli) -> Result<SimulationReport, GemelosError> {
    let mut rng = StdRng::seed_from_u64(cli.common.seed);

    let config = NetworkConfig {
        order_bits: cli.order_bits(),
        head_length: cli.head_length,
        boot_length: cli.boot_length,
        hash_function: cli.hash_function,
        hop_cap: cli.hop_cap,
        random_forward_policy: RandomForwardPolicy::FirstMatch,
    };
    let mut network = Network::new(config)?;

    // Oversample candidates generously: random IPv4-shaped strings collide
    // rarely, but `populate` must still see enough of them to reach
    // `network_size` unique nodes.
    let candidate_count = cli
        .network_size
        .saturating_mul(8)
        .max(cli.network_size + 16);
    let candidates = synthetic_identities(candidate_count, &mut rng);
    network.populate(candidates, cli.network_size)?;
    network.seed();
    info!(nodes = network.len(), "network populated and seeded");

    let pairs: Vec<(usize, usize)> = (0..cli.samples)
        .map(|_| {
            let source = rng.gen_range(0..network.len());
            let dest = rng.gen_range(0..network.len());
            (source, dest)
        })
        .collect();

    let records: Vec<RouteRecord> = if cli.parallel {
        let base_seed = cli.common.seed;
        pairs
            .par_iter()
            .enumerate()
            .map(|(i, &(source, dest))| {
                let mut child_rng =
                    StdRng::seed_from_u64(base_seed ^ (i as u64).wrapping_mul(SUBSTREAM_MULTIPLIER));
                network.route(source, dest, &mut child_rng)
            })
            .collect()
    } else {
        pairs
            .iter()
            .map(|&(source, dest)| network.route(source, dest, &mut rng))
            .collect()
    };

    Ok(SimulationReport::from_records(network.survey(), &records))
}
