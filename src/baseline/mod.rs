//! Degenerate routing policies used to benchmark the optimizers.
//!
//! Both are scored through the same [`CostModel`] as the annealer and
//! the QUBO path and return the shared [`RoutingOutcome`] shape, so
//! their objectives are directly comparable.

use crate::cost::{CostModel, PenaltyParams, RoutingOutcome};
use crate::model::RoutingInstance;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Every demand takes its cheapest candidate by travel cost alone,
/// ignoring congestion. Ties break toward the lowest index.
pub fn shortest_path(instance: &RoutingInstance, penalty: PenaltyParams) -> RoutingOutcome {
    let model = CostModel::new(instance, penalty);
    let assignment = (0..instance.demand_count())
        .map(|i| {
            let mut best = 0;
            let mut best_cost = model.path_cost(instance.path(i, 0));
            for candidate in 1..instance.candidates(i).len() {
                let cost = model.path_cost(instance.path(i, candidate));
                if cost < best_cost {
                    best = candidate;
                    best_cost = cost;
                }
            }
            best
        })
        .collect();
    model.outcome(assignment)
}

/// Every demand picks a uniformly random candidate, from a seeded
/// generator.
pub fn uniform_random(
    instance: &RoutingInstance,
    penalty: PenaltyParams,
    seed: u64,
) -> RoutingOutcome {
    let mut rng = StdRng::seed_from_u64(seed);
    let model = CostModel::new(instance, penalty);
    let assignment = (0..instance.demand_count())
        .map(|i| rng.random_range(0..instance.candidates(i).len()))
        .collect();
    model.outcome(assignment)
}
