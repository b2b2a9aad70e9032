//! Assignment initialization and neighborhood moves.

use crate::model::{Assignment, RoutingInstance};
use rand::Rng;

/// Draws a uniformly random candidate index for every demand.
pub fn random_assignment<R: Rng>(instance: &RoutingInstance, rng: &mut R) -> Assignment {
    (0..instance.demand_count())
        .map(|i| rng.random_range(0..instance.candidates(i).len()))
        .collect()
}

/// Proposes a neighbor by re-routing one uniformly chosen demand onto a
/// *different* candidate, uniform over the remaining choices.
///
/// A demand with a single candidate yields a no-op move: the returned
/// assignment equals the current one. The engine treats that as an
/// ordinary `delta = 0` trial, so single-candidate demands never stall
/// or bias the loop.
pub fn neighbor<R: Rng>(
    current: &[usize],
    instance: &RoutingInstance,
    rng: &mut R,
) -> Assignment {
    let mut next = current.to_vec();
    let i = rng.random_range(0..current.len());
    let choices = instance.candidates(i).len();
    if choices > 1 {
        // uniform over the other choices: draw from [0, n-1) and skip
        // the current index
        let draw = rng.random_range(0..choices - 1);
        next[i] = if draw >= current[i] { draw + 1 } else { draw };
    }
    next
}
