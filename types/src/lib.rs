pub mod address;
pub mod error;
pub mod hash;
pub mod ring;
pub mod status;

pub use address::{Address, AddressStatus};
pub use error::GemelosError;
pub use hash::HashFunction;
pub use ring::Ring;
pub use status::{RouteOutcome, RoutingStatus};
