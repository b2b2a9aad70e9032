//! Expansion of the cost model into QUBO coefficients.

use super::model::{QuboModel, VarTable};
use crate::cost::{CostModel, PenaltyParams};
use crate::model::{Assignment, EdgeKey, RoutingInstance};
use std::collections::HashMap;

/// Penalty weights of the two quadratic expansions.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuboWeights {
    /// Weight of the one-choice-per-demand constraint. Must dominate any
    /// travel-cost or congestion saving obtainable by selecting zero or
    /// two paths for a demand.
    pub alpha: f64,

    /// Weight of the per-edge congestion expansion. Matches the cost
    /// model's `coef` when exact energy/objective agreement is wanted.
    pub beta: f64,
}

impl QuboWeights {
    pub fn new(alpha: f64, beta: f64) -> Self {
        Self { alpha, beta }
    }

    /// Scales base weights to the instance's magnitudes.
    ///
    /// `alpha` grows with the squared maximum demand volume (the scale of
    /// any congestion saving a one-choice violation could buy) and `beta`
    /// shrinks with the squared maximum capacity, keeping the congestion
    /// term of order `beta_base` as capacities grow. Un-normalized
    /// weights drift out of balance as instances scale, which surfaces
    /// as feasibility violations in decoded solutions.
    pub fn normalized(instance: &RoutingInstance, alpha_base: f64, beta_base: f64) -> Self {
        let max_volume = instance
            .demands()
            .iter()
            .map(|d| d.volume)
            .fold(1.0_f64, f64::max);
        let max_capacity = instance
            .network()
            .edges()
            .map(|(_, attrs)| attrs.capacity)
            .fold(1.0_f64, f64::max);
        Self {
            alpha: alpha_base * max_volume * max_volume,
            beta: beta_base / (max_capacity * max_capacity),
        }
    }
}

/// Builds the QUBO for an instance.
///
/// Three contributions accumulate into one coefficient map:
///
/// 1. **Travel cost** — `path_cost` on each variable's diagonal.
/// 2. **One choice per demand** — `alpha * (sum_p x[i,p] - 1)^2`:
///    `-alpha` per diagonal, `+2 alpha` per same-demand pair, `+alpha`
///    to the offset. Zero at any valid indicator vector.
/// 3. **Congestion** — `beta * (sum_(i,p) volume_i * x[i,p] - cap_e)^2`
///    per edge: `beta*vol^2 - 2*beta*cap*vol` per diagonal,
///    `2*beta*vol_i*vol_j` per pair sharing the edge, `beta*cap^2` to
///    the offset.
///
/// All constant terms are carried, so for a valid one-per-demand vector
/// the energy equals `travel_cost + beta * sum_e (load_e - cap_e)^2`.
/// This is the standard quadratic relaxation of the capacity constraint:
/// it penalizes squared *deviation* from capacity in both directions,
/// and coincides with the cost model's one-sided `max(0, ...)^2` penalty
/// exactly when every edge is either loaded to capacity or beyond, or
/// has zero capacity. Decoded solutions are therefore always re-scored
/// through [`CostModel`](crate::cost::CostModel).
pub fn encode(instance: &RoutingInstance, weights: &QuboWeights) -> (QuboModel, VarTable) {
    let table = VarTable::from_instance(instance);
    let mut model = QuboModel::new(table.len());
    let cost = CostModel::new(instance, PenaltyParams::unpenalized());

    // travel cost on the diagonal
    for (variable, &(demand, candidate)) in table.pairs().iter().enumerate() {
        let path_cost = cost.path_cost(instance.path(demand, candidate));
        model.add_term(variable, variable, path_cost);
    }

    // one-choice constraint per demand
    for demand in 0..instance.demand_count() {
        let vars: Vec<usize> = (0..instance.candidates(demand).len())
            .map(|c| table.index_of(demand, c).expect("table covers every candidate"))
            .collect();

        for &q in &vars {
            model.add_term(q, q, -weights.alpha);
        }
        for (i, &a) in vars.iter().enumerate() {
            for &b in &vars[i + 1..] {
                model.add_term(a, b, 2.0 * weights.alpha);
            }
        }
        model.add_offset(weights.alpha);
    }

    // congestion expansion per edge
    let mut edge_users: HashMap<EdgeKey, Vec<(usize, f64)>> = instance
        .network()
        .edges()
        .map(|(key, _)| (key, Vec::new()))
        .collect();
    for (variable, &(demand, candidate)) in table.pairs().iter().enumerate() {
        let volume = instance.demands()[demand].volume;
        for pair in instance.path(demand, candidate).windows(2) {
            edge_users
                .get_mut(&EdgeKey::new(pair[0], pair[1]))
                .expect("validated path step is a network edge")
                .push((variable, volume));
        }
    }

    for (key, users) in &edge_users {
        let capacity = instance
            .network()
            .attrs(*key)
            .expect("edge key from the network")
            .capacity;

        for &(q, volume) in users {
            model.add_term(
                q,
                q,
                weights.beta * volume * volume - 2.0 * weights.beta * capacity * volume,
            );
        }
        for (i, &(a, volume_a)) in users.iter().enumerate() {
            for &(b, volume_b) in &users[i + 1..] {
                model.add_term(a, b, 2.0 * weights.beta * volume_a * volume_b);
            }
        }
        model.add_offset(weights.beta * capacity * capacity);
    }

    (model, table)
}

/// Indicator vector of an assignment: `x[i, assignment[i]] = 1`.
pub fn indicator(table: &VarTable, assignment: &[usize]) -> Vec<u8> {
    let mut sample = vec![0u8; table.len()];
    for (demand, &candidate) in assignment.iter().enumerate() {
        let variable = table
            .index_of(demand, candidate)
            .expect("assignment must index the variable table");
        sample[variable] = 1;
    }
    sample
}

/// Decodes a solver's binary vector back into an assignment.
///
/// A vector that selects zero or several candidates for some demand
/// violates the one-choice constraint and is reported as an error, not
/// repaired — the caller decides whether to re-sample or to reject the
/// solver output.
pub fn decode(table: &VarTable, sample: &[u8]) -> Result<Assignment, String> {
    if sample.len() != table.len() {
        return Err(format!(
            "sample has {} entries, model has {} variables",
            sample.len(),
            table.len()
        ));
    }

    let mut chosen: Vec<Option<usize>> = vec![None; table.demand_count()];
    for (variable, &bit) in sample.iter().enumerate() {
        match bit {
            0 => {}
            1 => {
                let (demand, candidate) =
                    table.pair_of(variable).expect("variable index in range");
                if chosen[demand].is_some() {
                    return Err(format!("demand {demand}: multiple candidates selected"));
                }
                chosen[demand] = Some(candidate);
            }
            other => return Err(format!("variable {variable}: non-binary value {other}")),
        }
    }

    chosen
        .into_iter()
        .enumerate()
        .map(|(demand, candidate)| {
            candidate.ok_or_else(|| format!("demand {demand}: no candidate selected"))
        })
        .collect()
}
