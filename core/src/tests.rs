//! Integration-level tests that exercise `Node` and `Network` together over
//! realistic populations, covering the properties and end-to-end scenarios
//! that a single module's unit tests can't see on their own.

use crate::network::{Network, NetworkConfig};
use crate::node::RandomForwardPolicy;
use gemelos_types::{HashFunction, RouteOutcome, RoutingStatus};
use pretty_assertions::assert_eq;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn populated_network(
    n: usize,
    order_bits: u32,
    hash_function: HashFunction,
    head_length: usize,
    boot_length: usize,
    hop_cap: usize,
) -> Network {
    let config = NetworkConfig {
        order_bits,
        head_length,
        boot_length,
        hash_function,
        hop_cap,
        random_forward_policy: RandomForwardPolicy::FirstMatch,
    };
    let mut net = Network::new(config).unwrap();
    let candidates = (0..n * 6).map(|i| format!("peer-{i}"));
    net.populate(candidates, n).unwrap();
    net.seed();
    net
}

#[test]
fn club_partition_reflexivity_and_symmetry_hold_at_scale() {
    let net = populated_network(150, 256, HashFunction::Sha256, 4, 4, 16);
    for node in net.nodes() {
        assert!(node.head_club().contains(&node.id()));
        assert!(node.boot_club().contains(&node.id()));
        for &member in node.head_club() {
            assert_eq!(net.node(member).head_case(), node.head_case());
        }
        for &member in node.boot_club() {
            assert_eq!(net.node(member).boot_case(), node.boot_case());
        }
    }
    for node in net.nodes() {
        for &member in node.head_club() {
            assert!(net.node(member).head_club().contains(&node.id()));
        }
        for &member in node.boot_club() {
            assert!(net.node(member).boot_club().contains(&node.id()));
        }
    }
}

#[test]
fn boot_forward_always_bridges_into_a_shared_head_case() {
    let net = populated_network(200, 256, HashFunction::Sha256, 3, 3, 16);
    let mut rng = StdRng::seed_from_u64(11);
    for source in net.nodes().iter().take(40) {
        for dest in net.nodes().iter().take(40) {
            if source.id() == dest.id() || source.head_case() == dest.head_case() {
                continue;
            }
            let (next, status) = source.route(
                dest,
                net.nodes(),
                net.ring(),
                RandomForwardPolicy::FirstMatch,
                &mut rng,
            );
            if status == RoutingStatus::BootForward {
                assert_eq!(net.node(next).head_case(), dest.head_case());
            }
        }
    }
}

#[test]
fn two_nodes_sharing_head_only_route_in_one_hop() {
    let net = populated_network(120, 256, HashFunction::Sha256, 3, 6, 8);
    let pair = net
        .nodes()
        .iter()
        .find_map(|a| {
            net.nodes()
                .iter()
                .find(|b| {
                    b.id() != a.id()
                        && a.head_case() == b.head_case()
                        && a.boot_case() != b.boot_case()
                })
                .map(|b| (a.id(), b.id()))
        })
        .expect("some pair shares a head case in a network this size");
    let mut rng = StdRng::seed_from_u64(1);
    let record = net.route(pair.0, pair.1, &mut rng);
    assert_eq!(record.outcome, RouteOutcome::Success);
    assert_eq!(record.hops, 1);
    assert_eq!(record.trail, vec![RoutingStatus::HeadHit]);
}

#[test]
fn two_nodes_sharing_boot_only_route_via_boot_forward_in_one_hop() {
    let net = populated_network(150, 256, HashFunction::Sha256, 6, 3, 8);
    let pair = net
        .nodes()
        .iter()
        .find_map(|a| {
            net.nodes()
                .iter()
                .find(|b| {
                    b.id() != a.id()
                        && a.boot_case() == b.boot_case()
                        && a.head_case() != b.head_case()
                })
                .map(|b| (a.id(), b.id()))
        })
        .expect("some pair shares a boot case in a network this size");
    let mut rng = StdRng::seed_from_u64(2);
    let record = net.route(pair.0, pair.1, &mut rng);
    assert_eq!(record.outcome, RouteOutcome::Success);
    assert_eq!(record.hops, 1);
    assert_eq!(record.trail, vec![RoutingStatus::BootForward]);
}

#[test]
fn disjoint_pair_bridges_through_boot_forward_into_head_hit() {
    let net = populated_network(200, 256, HashFunction::Sha256, 3, 3, 8);
    let mut rng = StdRng::seed_from_u64(3);
    let mut delivered = None;
    'search: for a in net.nodes().iter().take(60) {
        for c in net.nodes().iter().take(60) {
            if a.id() == c.id() || a.head_case() == c.head_case() || a.boot_case() == c.boot_case()
            {
                continue;
            }
            let record = net.route(a.id(), c.id(), &mut rng);
            if record.outcome == RouteOutcome::Success {
                delivered = Some(record);
                break 'search;
            }
        }
    }
    let record = delivered.expect("some disjoint pair should be bridgeable in a network this size");
    assert_eq!(record.trail.last(), Some(&RoutingStatus::HeadHit));
}

#[test]
fn tight_hop_cap_over_a_coarse_partition_eventually_exceeds() {
    let net = populated_network(500, 256, HashFunction::Sha256, 2, 2, 2);
    let mut rng = StdRng::seed_from_u64(99);
    let mut saw_hopcap = false;
    'search: for source in net.nodes().iter().take(60) {
        for dest in net.nodes().iter().take(60) {
            if source.id() == dest.id() {
                continue;
            }
            let record = net.route(source.id(), dest.id(), &mut rng);
            if record.outcome == RouteOutcome::HopCapExceeded {
                assert_eq!(record.hops, 2);
                saw_hopcap = true;
                break 'search;
            }
        }
    }
    assert!(
        saw_hopcap,
        "a hop cap of 2 over a 2-bit head/boot partition should exceed at least once in 500 nodes"
    );
}

/// Scenario 6 at N=100, L=128, h=4, b=4 as given can't be realized by any
/// of the supported hash families (SHA-1/256/512 output 160/256/512 bits,
/// never 128) without truncating or padding a digest, which `Address::hash`
/// deliberately refuses to do. SHA-1 at its natural 160-bit width is the
/// closest supported stand-in; the invariants under test don't depend on
/// the exact bit width.
#[test]
fn seeding_invariant_holds_at_n_equals_100() {
    let net = populated_network(100, 160, HashFunction::Sha1, 4, 4, 16);
    let survey = net.survey();
    assert_eq!(survey.node_count, 100);
    assert!((survey.head_coverage - 100.0).abs() < f64::EPSILON);
    assert!((survey.boot_coverage - 100.0).abs() < f64::EPSILON);
    for node in net.nodes() {
        assert!(node.head_club().contains(&node.id()));
        assert!(node.boot_club().contains(&node.id()));
    }
}
