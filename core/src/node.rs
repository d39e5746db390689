use gemelos_types::{Address, Ring, RoutingStatus};
use rand::Rng;

/// Stable index into a `Network`'s node arena. Clubs store these instead of
/// node references, which keeps the arena free of ownership cycles (see
/// the design notes on cyclic node references).
pub type NodeId = usize;

/// Which of a node's two clubs to search or scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Club {
    Head,
    Boot,
}

/// How `Node::route` resolves case (c), the "random forward" escape hop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RandomForwardPolicy {
    /// First head-club member whose boot case differs from the
    /// destination's. Deterministic, used by default.
    FirstMatch,
    /// A uniformly chosen member among those whose boot case differs.
    Random,
}

/// Per-peer state: own address, head/boot fingerprints, and two club
/// views. A node exclusively owns its fingerprints; its clubs are views
/// (index lists) into the enclosing `Network`'s arena.
///
/// This is the two-dimensional (head, boot) design. A `d`-dimensional
/// generalization (spec's optional 3-D/4-D variants, adding a body slice
/// or a second head/tail pair) would add more `(case, club)` pairs here and
/// extend the routing decision tree symmetrically; none of the
/// higher-dimensional termination properties are established, so it is
/// left as an extension point rather than implemented.
#[derive(Debug, Clone)]
pub struct Node {
    id: NodeId,
    address: Address,
    head_case: String,
    boot_case: String,
    head_club: Vec<NodeId>,
    boot_club: Vec<NodeId>,
}

impl Node {
    pub(crate) fn new(id: NodeId, address: Address, head_len: usize, boot_len: usize) -> Self {
        let head_case = address.head(head_len).to_string();
        let boot_case = address.boot(boot_len).to_string();
        Self {
            id,
            address,
            head_case,
            boot_case,
            head_club: Vec::new(),
            boot_club: Vec::new(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn head_case(&self) -> &str {
        &self.head_case
    }

    pub fn boot_case(&self) -> &str {
        &self.boot_case
    }

    pub fn head_club(&self) -> &[NodeId] {
        &self.head_club
    }

    pub fn boot_club(&self) -> &[NodeId] {
        &self.boot_club
    }

    pub fn belongs_in_head(&self, other: &Node) -> bool {
        self.head_case == other.head_case
    }

    pub fn belongs_in_boot(&self, other: &Node) -> bool {
        self.boot_case == other.boot_case
    }

    pub(crate) fn set_head_club(&mut self, club: Vec<NodeId>) {
        self.head_club = club;
    }

    pub(crate) fn set_boot_club(&mut self, club: Vec<NodeId>) {
        self.boot_club = club;
    }

    /// Inserts `other` into whichever club(s) it belongs to. Silently
    /// rejects (returns `false`) a node that shares neither fingerprint —
    /// it is not routable from this node's two-club horizon. Clubs are
    /// sets under address equality; re-inserting an existing member is a
    /// no-op.
    ///
    /// This direct, pairwise form of club membership is provided for
    /// constructing or testing a node's state outside a full `Network`
    /// seeding pass; `Network::seed` instead splices in the already-built
    /// multimap bucket directly, which is equivalent but O(1) per node
    /// rather than O(N) pairwise checks.
    pub fn set_state(&mut self, other: &Node) -> bool {
        let mut inserted = false;
        if self.belongs_in_head(other) && !self.head_club.contains(&other.id) {
            self.head_club.push(other.id);
            inserted = true;
        }
        if self.belongs_in_boot(other) && !self.boot_club.contains(&other.id) {
            self.boot_club.push(other.id);
            inserted = true;
        }
        inserted
    }

    /// Linear scan of one of this node's clubs for a member with the given
    /// hash image. Clubs are small (bounded by `N / 2^h` or `N / 2^b` on
    /// average) so no ordering is required for correctness.
    pub fn search_club<'a>(
        &self,
        which: Club,
        target_hash: &[u8],
        arena: &'a [Node],
    ) -> Option<&'a Node> {
        let ids = match which {
            Club::Head => &self.head_club,
            Club::Boot => &self.boot_club,
        };
        ids.iter()
            .map(|&id| &arena[id])
            .find(|n| n.address.hashed() == target_hash)
    }

    /// Computes one routing hop toward `dest`. Callers are expected to
    /// check `self.id() == dest.id()` before calling (the zero-hop,
    /// already-delivered case) — this method only implements the four
    /// decision-tree cases that apply when `self != dest`.
    pub fn route(
        &self,
        dest: &Node,
        arena: &[Node],
        ring: &Ring,
        policy: RandomForwardPolicy,
        rng: &mut impl Rng,
    ) -> (NodeId, RoutingStatus) {
        if self.head_case == dest.head_case {
            return self.route_head_hit(dest, arena, ring);
        }
        if let Some(bridge) = self.route_boot_forward(dest, arena) {
            return (bridge, RoutingStatus::BootForward);
        }
        if let Some(escape) = self.route_random_forward(dest, arena, policy, rng) {
            return (escape, RoutingStatus::RandomForward);
        }
        (self.id, RoutingStatus::Undefined)
    }

    /// Case (a): among members of `self`'s head club, the one numerically
    /// closest to `dest` under the ring. Since `dest` always has ring
    /// distance zero to itself and shares this club (head clubs are a
    /// total partition), this resolves to `dest` directly whenever `dest`
    /// is a member — i.e. head-hit is always exactly one hop.
    fn route_head_hit(&self, dest: &Node, arena: &[Node], ring: &Ring) -> (NodeId, RoutingStatus) {
        let dest_int = dest.address.as_integer();
        let mut best: Option<(NodeId, u64)> = None;
        for &id in &self.head_club {
            let candidate_int = arena[id].address.as_integer();
            let key = ring.distance_key(&candidate_int, &dest_int);
            let better = match best {
                Some((_, best_key)) => key < best_key,
                None => true,
            };
            if better {
                best = Some((id, key));
            }
        }
        match best {
            Some((id, _)) => (id, RoutingStatus::HeadHit),
            None => (self.id, RoutingStatus::Undefined),
        }
    }

    /// Case (b): first boot-club member whose head case matches `dest`'s.
    fn route_boot_forward(&self, dest: &Node, arena: &[Node]) -> Option<NodeId> {
        self.boot_club
            .iter()
            .copied()
            .find(|&id| arena[id].head_case == dest.head_case)
    }

    /// Case (c): a head-club member whose boot case differs from `dest`'s,
    /// first-match by default, uniformly random under the `Random` policy.
    fn route_random_forward(
        &self,
        dest: &Node,
        arena: &[Node],
        policy: RandomForwardPolicy,
        rng: &mut impl Rng,
    ) -> Option<NodeId> {
        match policy {
            RandomForwardPolicy::FirstMatch => self
                .head_club
                .iter()
                .copied()
                .find(|&id| arena[id].boot_case != dest.boot_case),
            RandomForwardPolicy::Random => {
                let candidates: Vec<NodeId> = self
                    .head_club
                    .iter()
                    .copied()
                    .filter(|&id| arena[id].boot_case != dest.boot_case)
                    .collect();
                if candidates.is_empty() {
                    None
                } else {
                    Some(candidates[rng.gen_range(0..candidates.len())])
                }
            }
        }
    }
}
