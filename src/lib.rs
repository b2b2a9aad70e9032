//! Capacitated traffic route assignment.
//!
//! Assigns one candidate route to each traffic demand on a capacitated
//! network, minimizing total travel cost plus a soft penalty for edges
//! loaded beyond capacity. Two optimizers consume the same cost model:
//!
//! - **Simulated Annealing (SA)**: single-coordinate local search over
//!   the per-demand path choice, with geometric cooling and Metropolis
//!   acceptance.
//! - **QUBO encoding**: the identical objective re-expressed as a sparse
//!   quadratic form over binary selection variables, consumable by
//!   annealing samplers or quantum optimizers.
//!
//! Both paths must agree on the cost of any assignment; that consistency
//! is part of the crate's contract (and its test suite).
//!
//! # Architecture
//!
//! The network, demands, and candidate path lists are bundled into an
//! immutable [`model::RoutingInstance`], validated once at construction.
//! [`cost::CostModel`] provides the pure scoring functions shared by the
//! SA engine ([`sa::AnnealRunner`]), the QUBO encoder ([`qubo::encode`]),
//! and the benchmark baselines ([`baseline`]).
//!
//! Candidate path enumeration (k-shortest simple paths), graph builders,
//! solver execution, and result persistence are external collaborators;
//! this crate only scores, searches, and encodes.

pub mod baseline;
pub mod cost;
pub mod model;
pub mod qubo;
pub mod sa;
