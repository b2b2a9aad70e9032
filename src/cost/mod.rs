//! Shared cost model.
//!
//! Pure scoring functions over a validated [`RoutingInstance`]: travel
//! cost, volume-weighted edge loads, the congestion penalty the search
//! optimizes, and the capacity-violation metric callers report. The SA
//! engine, the QUBO encoder, and the baselines all score through this
//! module, so any assignment gets the same objective regardless of who
//! asks.

use crate::model::{Assignment, EdgeKey, NodeId, RoutingInstance};
use std::collections::HashMap;

/// Load per canonical undirected edge, weighted by demand volume.
pub type EdgeLoads = HashMap<EdgeKey, f64>;

/// Congestion penalty parameters.
///
/// The penalty `coef * max(0, load - capacity)^power` converts the hard
/// capacity constraint into a soft cost, so local search can pass
/// through infeasible intermediate states instead of being blocked by
/// them. The *reported* feasibility metric always uses power 1 and no
/// coefficient; the two intentionally differ.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PenaltyParams {
    pub coef: f64,
    pub power: i32,
}

impl Default for PenaltyParams {
    fn default() -> Self {
        Self { coef: 10.0, power: 2 }
    }
}

impl PenaltyParams {
    pub fn new(coef: f64, power: i32) -> Self {
        Self { coef, power }
    }

    /// Travel cost only; congestion is free.
    pub fn unpenalized() -> Self {
        Self { coef: 0.0, power: 2 }
    }
}

/// Scored result of any routing policy, in one shape for the annealer,
/// the baselines, and decoded QUBO solutions alike.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoutingOutcome {
    pub assignment: Assignment,
    pub objective: f64,
    pub loads: EdgeLoads,

    /// Total load in excess of capacity, summed over edges (power 1).
    /// Zero iff the assignment is feasible.
    pub violation: f64,
}

/// Pure cost functions over one instance and one penalty setting.
#[derive(Debug, Clone, Copy)]
pub struct CostModel<'a> {
    instance: &'a RoutingInstance,
    penalty: PenaltyParams,
}

impl<'a> CostModel<'a> {
    pub fn new(instance: &'a RoutingInstance, penalty: PenaltyParams) -> Self {
        Self { instance, penalty }
    }

    pub fn instance(&self) -> &'a RoutingInstance {
        self.instance
    }

    pub fn penalty(&self) -> PenaltyParams {
        self.penalty
    }

    /// Sum of edge costs along consecutive node pairs of a path.
    ///
    /// Every step must be a network edge; instance validation guarantees
    /// this for all candidate paths.
    pub fn path_cost(&self, path: &[NodeId]) -> f64 {
        path.windows(2)
            .map(|pair| {
                self.instance
                    .network()
                    .edge(pair[0], pair[1])
                    .expect("path step must be a network edge")
                    .cost
            })
            .sum()
    }

    /// Total travel cost of the chosen paths.
    pub fn travel_cost(&self, assignment: &[usize]) -> f64 {
        assignment
            .iter()
            .enumerate()
            .map(|(i, &choice)| self.path_cost(self.instance.path(i, choice)))
            .sum()
    }

    /// Volume-weighted load on every network edge (unused edges at 0.0).
    ///
    /// Recomputed from scratch on every call.
    pub fn edge_loads(&self, assignment: &[usize]) -> EdgeLoads {
        let mut loads: EdgeLoads = self
            .instance
            .network()
            .edges()
            .map(|(key, _)| (key, 0.0))
            .collect();

        for (i, &choice) in assignment.iter().enumerate() {
            let volume = self.instance.demands()[i].volume;
            for pair in self.instance.path(i, choice).windows(2) {
                *loads.entry(EdgeKey::new(pair[0], pair[1])).or_insert(0.0) += volume;
            }
        }
        loads
    }

    /// `coef * sum_e max(0, load_e - capacity_e)^power`.
    pub fn congestion_penalty(&self, assignment: &[usize]) -> f64 {
        self.congestion_penalty_of(&self.edge_loads(assignment))
    }

    /// Penalty from precomputed loads.
    pub fn congestion_penalty_of(&self, loads: &EdgeLoads) -> f64 {
        self.penalty.coef
            * loads
                .iter()
                .map(|(key, &load)| {
                    let capacity = self
                        .instance
                        .network()
                        .attrs(*key)
                        .expect("load key must be a network edge")
                        .capacity;
                    (load - capacity).max(0.0).powi(self.penalty.power)
                })
                .sum::<f64>()
    }

    /// `travel_cost + congestion_penalty` — the quantity both optimizers
    /// minimize.
    pub fn objective(&self, assignment: &[usize]) -> f64 {
        self.travel_cost(assignment) + self.congestion_penalty(assignment)
    }

    /// Reported feasibility metric: `sum_e max(0, load_e - capacity_e)`.
    pub fn capacity_violation(&self, assignment: &[usize]) -> f64 {
        self.capacity_violation_of(&self.edge_loads(assignment))
    }

    /// Violation from precomputed loads.
    pub fn capacity_violation_of(&self, loads: &EdgeLoads) -> f64 {
        loads
            .iter()
            .map(|(key, &load)| {
                let capacity = self
                    .instance
                    .network()
                    .attrs(*key)
                    .expect("load key must be a network edge")
                    .capacity;
                (load - capacity).max(0.0)
            })
            .sum()
    }

    /// Scores an assignment into the shared outcome shape.
    pub fn outcome(&self, assignment: Assignment) -> RoutingOutcome {
        let loads = self.edge_loads(&assignment);
        let objective = self.travel_cost(&assignment) + self.congestion_penalty_of(&loads);
        let violation = self.capacity_violation_of(&loads);
        RoutingOutcome { assignment, objective, loads, violation }
    }
}
