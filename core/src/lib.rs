pub mod network;
pub mod node;
#[cfg(test)]
mod tests;

pub use network::{Network, NetworkConfig, RouteRecord, Survey};
pub use node::{Club, Node, NodeId, RandomForwardPolicy};
