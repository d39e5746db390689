use crate::node::{Club, Node, NodeId, RandomForwardPolicy};
use gemelos_types::{Address, GemelosError, HashFunction, Ring, RouteOutcome, RoutingStatus};
use itertools::Itertools;
use rand::Rng;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fmt;
use tracing::{debug, instrument};

/// Parameters fixed for the lifetime of a `Network`. `head_length` and
/// `boot_length` need not sum to `order_bits` — the remaining middle bits
/// of an address participate in neither club.
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    pub order_bits: u32,
    pub head_length: usize,
    pub boot_length: usize,
    pub hash_function: HashFunction,
    pub hop_cap: usize,
    pub random_forward_policy: RandomForwardPolicy,
}

impl NetworkConfig {
    fn validate(&self) -> Result<(), GemelosError> {
        if self.hash_function.output_bits() != self.order_bits as usize {
            return Err(GemelosError::HashLengthMismatch {
                expected: self.hash_function.output_bits(),
                actual: self.order_bits as usize,
            });
        }
        if self.head_length == 0 || self.boot_length == 0 {
            return Err(GemelosError::InvalidParameters(
                "head_length and boot_length must both be positive".to_string(),
            ));
        }
        let order = self.order_bits as usize;
        if self.head_length + self.boot_length > order {
            return Err(GemelosError::InvalidParameters(format!(
                "head_length ({}) + boot_length ({}) must not exceed order_bits ({order})",
                self.head_length, self.boot_length
            )));
        }
        if self.hop_cap == 0 {
            return Err(GemelosError::InvalidParameters(
                "hop_cap must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// One end-to-end routing attempt's trail and terminal outcome.
#[derive(Debug, Clone, Serialize)]
pub struct RouteRecord {
    pub source: NodeId,
    pub dest: NodeId,
    pub hops: usize,
    pub trail: Vec<RoutingStatus>,
    pub outcome: RouteOutcome,
}

impl fmt::Display for RouteRecord {
    /// `source -> dest: [status,status,...] (N hops, outcome)` — the
    /// comma-separated trail rendering from spec's per-route observed
    /// output field set.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {}: [{}] ({} hops, {})",
            self.source,
            self.dest,
            self.trail.iter().map(RoutingStatus::to_string).join(","),
            self.hops,
            self.outcome
        )
    }
}

/// Structural statistics over a seeded network, independent of any
/// particular routing attempt.
#[derive(Debug, Clone, Serialize)]
pub struct Survey {
    pub node_count: usize,
    pub head_cases: usize,
    pub boot_cases: usize,
    pub avg_head_club_size: f64,
    pub avg_boot_club_size: f64,
    /// Fraction of nodes reachable as a member of *some* head club. Head
    /// clubs are a total partition of the node set by construction, so
    /// this is expected to read 100.0 under normal seeding; a lower value
    /// signals a seeding bug, not partial network coverage.
    pub head_coverage: f64,
    pub boot_coverage: f64,
    /// Number of distinct nodes reachable as a member of some head club —
    /// the numerator behind `head_coverage`, reported separately since a
    /// ratio alone can't be compared across networks of different sizes.
    pub covered_by_head: usize,
    pub covered_by_boot: usize,
}

/// A populated, seeded overlay: an arena of nodes plus the two multimaps
/// used to build their club views. Immutable once seeded, which is what
/// lets `route` be called concurrently across many `(source, dest)` pairs.
#[derive(Debug, Clone)]
pub struct Network {
    config: NetworkConfig,
    ring: Ring,
    nodes: Vec<Node>,
    head_map: HashMap<String, Vec<NodeId>>,
    boot_map: HashMap<String, Vec<NodeId>>,
}

impl Network {
    pub fn new(config: NetworkConfig) -> Result<Self, GemelosError> {
        config.validate()?;
        let ring = Ring::new(config.order_bits);
        Ok(Self {
            config,
            ring,
            nodes: Vec::new(),
            head_map: HashMap::new(),
            boot_map: HashMap::new(),
        })
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    pub fn ring(&self) -> &Ring {
        &self.ring
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Draws unique identities from `candidates` until `target_n` distinct
    /// nodes exist, discarding both raw-string duplicates and (the
    /// vanishingly unlikely but checked) hash collisions. Candidate
    /// generation itself — e.g. random IP or name synthesis — is the
    /// caller's concern; `Network` only knows how to hash and dedupe
    /// whatever strings it is given.
    #[instrument(skip(self, candidates))]
    pub fn populate<I>(&mut self, candidates: I, target_n: usize) -> Result<(), GemelosError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut seen_raw: HashSet<String> = HashSet::with_capacity(target_n);
        let mut seen_hashed: HashSet<Vec<u8>> = HashSet::with_capacity(target_n);
        for raw in candidates {
            if self.nodes.len() >= target_n {
                break;
            }
            if !seen_raw.insert(raw.clone()) {
                continue;
            }
            let mut address = Address::new(raw);
            address.hash(self.config.hash_function, self.config.order_bits)?;
            if !seen_hashed.insert(address.hashed().to_vec()) {
                continue;
            }
            let id = self.nodes.len();
            self.nodes.push(Node::new(
                id,
                address,
                self.config.head_length,
                self.config.boot_length,
            ));
        }
        if self.nodes.len() < target_n {
            return Err(GemelosError::PopulationExhausted {
                requested: target_n,
                obtained: self.nodes.len(),
            });
        }
        debug!(nodes = self.nodes.len(), "population complete");
        Ok(())
    }

    /// Builds the head and boot multimaps from the populated node set, then
    /// gives every node a view (shared index list) into its bucket of each
    /// map. A node always appears in its own clubs (reflexivity).
    #[instrument(skip(self))]
    pub fn seed(&mut self) {
        self.head_map.clear();
        self.boot_map.clear();
        for node in &self.nodes {
            self.head_map
                .entry(node.head_case().to_string())
                .or_default()
                .push(node.id());
            self.boot_map
                .entry(node.boot_case().to_string())
                .or_default()
                .push(node.id());
        }
        for node in &mut self.nodes {
            let head_club = self.head_map[node.head_case()].clone();
            let boot_club = self.boot_map[node.boot_case()].clone();
            node.set_head_club(head_club);
            node.set_boot_club(boot_club);
        }
        debug!(
            head_cases = self.head_map.len(),
            boot_cases = self.boot_map.len(),
            "seeding complete"
        );
    }

    /// Searches a given node's named club for a member with the target
    /// hash image, a convenience wrapper over `Node::search_club` that
    /// supplies the arena.
    pub fn search(&self, holder: NodeId, which: Club, target_hash: &[u8]) -> Option<&Node> {
        self.nodes[holder].search_club(which, target_hash, &self.nodes)
    }

    /// Drives routing from `source` to `dest`, capped at `config.hop_cap`
    /// hops. `source == dest` is recognized before any hop is attempted
    /// (zero-hop success, empty trail).
    #[instrument(skip(self, rng))]
    pub fn route(&self, source: NodeId, dest: NodeId, rng: &mut impl Rng) -> RouteRecord {
        let mut trail = Vec::new();
        if source == dest {
            return RouteRecord {
                source,
                dest,
                hops: 0,
                trail,
                outcome: RouteOutcome::Success,
            };
        }
        let mut current = source;
        for _ in 0..self.config.hop_cap {
            let holder = &self.nodes[current];
            let target = &self.nodes[dest];
            let (next, status) = holder.route(
                target,
                &self.nodes,
                &self.ring,
                self.config.random_forward_policy,
                rng,
            );
            trail.push(status);
            if status == RoutingStatus::Undefined {
                return RouteRecord {
                    source,
                    dest,
                    hops: trail.len(),
                    trail,
                    outcome: RouteOutcome::Undefined,
                };
            }
            current = next;
            if current == dest {
                return RouteRecord {
                    source,
                    dest,
                    hops: trail.len(),
                    trail,
                    outcome: RouteOutcome::Success,
                };
            }
        }
        RouteRecord {
            source,
            dest,
            hops: trail.len(),
            trail,
            outcome: RouteOutcome::HopCapExceeded,
        }
    }

    /// Structural statistics over the seeded club maps.
    pub fn survey(&self) -> Survey {
        let node_count = self.nodes.len();
        let head_cases = self.head_map.len();
        let boot_cases = self.boot_map.len();
        let avg = |map: &HashMap<String, Vec<NodeId>>| -> f64 {
            if map.is_empty() {
                0.0
            } else {
                map.values().map(Vec::len).sum::<usize>() as f64 / map.len() as f64
            }
        };
        let covered_by = |map: &HashMap<String, Vec<NodeId>>| -> usize {
            let covered: HashSet<NodeId> = map.values().flatten().copied().collect();
            covered.len()
        };
        let coverage = |covered: usize| -> f64 {
            if node_count == 0 {
                0.0
            } else {
                covered as f64 / node_count as f64 * 100.0
            }
        };
        let covered_by_head = covered_by(&self.head_map);
        let covered_by_boot = covered_by(&self.boot_map);
        Survey {
            node_count,
            head_cases,
            boot_cases,
            avg_head_club_size: avg(&self.head_map),
            avg_boot_club_size: avg(&self.boot_map),
            head_coverage: coverage(covered_by_head),
            boot_coverage: coverage(covered_by_boot),
            covered_by_head,
            covered_by_boot,
        }
    }
}
