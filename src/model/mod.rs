//! Problem data: network, demands, candidate paths, assignments.
//!
//! All inputs are validated once, when a [`RoutingInstance`] is built.
//! Downstream components (cost model, SA engine, QUBO encoder) treat the
//! instance as immutable shared-read-only data and may assume every
//! candidate path is edge-consistent with the network.

mod instance;
mod network;

pub use instance::{Assignment, Demand, Path, RoutingInstance};
pub use network::{EdgeAttrs, EdgeKey, Network, NodeId};
