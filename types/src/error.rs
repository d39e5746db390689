use thiserror::Error;

/// Fatal errors raised while constructing the identity/fingerprint model.
///
/// `Unrecognized`, `UndefinedHop`, and `HopCapExceeded` from the routing
/// design are deliberately not variants here: they are routine per-request
/// outcomes of a partial-coverage overlay, not failures of construction, and
/// live on `RoutingStatus`/`RouteOutcome` instead.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum GemelosError {
    #[error("hash function produces {actual} bytes, but address order requires {expected}")]
    HashLengthMismatch { expected: usize, actual: usize },

    #[error("invalid network parameters: {0}")]
    InvalidParameters(String),

    #[error("candidate identity source exhausted after {obtained} of {requested} unique nodes")]
    PopulationExhausted { requested: usize, obtained: usize },
}
