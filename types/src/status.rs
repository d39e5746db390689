use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of one hop decision made by `Node::route`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RoutingStatus {
    /// Delivered, or progressed, inside a shared head club.
    HeadHit,
    /// Pivoted through the boot club into the destination's head club.
    BootForward,
    /// Escaped a "neither shared" region via a head-club member with a
    /// differing boot case.
    RandomForward,
    /// No case applied; a dead end.
    Undefined,
}

impl fmt::Display for RoutingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RoutingStatus::HeadHit => "HeadHit",
            RoutingStatus::BootForward => "BootForward",
            RoutingStatus::RandomForward => "RandomForward",
            RoutingStatus::Undefined => "Undefined",
        };
        f.write_str(s)
    }
}

/// Terminal result of a full routing attempt (many hops), as distinct from
/// the per-hop `RoutingStatus`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RouteOutcome {
    Success,
    Undefined,
    HopCapExceeded,
}

impl fmt::Display for RouteOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RouteOutcome::Success => "success",
            RouteOutcome::Undefined => "undefined",
            RouteOutcome::HopCapExceeded => "hopcap",
        };
        f.write_str(s)
    }
}
