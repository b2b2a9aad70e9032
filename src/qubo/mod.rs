//! QUBO encoding of the assignment problem.
//!
//! Re-expresses the cost model as a Quadratic Unconstrained Binary
//! Optimization over selection variables `x[i,p]` ("demand `i` takes
//! candidate `p`"). Three additive contributions share one sparse
//! coefficient map:
//!
//! 1. the linear travel cost of each candidate path;
//! 2. the one-choice-per-demand constraint `alpha * (sum_p x[i,p] - 1)^2`;
//! 3. the per-edge congestion penalty
//!    `beta * (sum volume * x - capacity)^2`.
//!
//! The model is solver-agnostic: any sampler returning a binary vector
//! can be scored with [`QuboModel::energy`] and decoded back into an
//! [`Assignment`](crate::model::Assignment) for re-scoring through the
//! regular cost model. Feasibility of a decoded solution must always be
//! re-checked there — a mis-scaled `alpha`/`beta` is a modeling risk the
//! energy value alone does not surface.

mod encoder;
mod model;

pub use encoder::{decode, encode, indicator, QuboWeights};
pub use model::{QuboModel, VarTable};
