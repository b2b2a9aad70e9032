//! Demands, candidate paths, and the validated routing instance.

use super::network::{Network, NodeId};

/// A candidate route: a sequence of nodes. A single-node path is the
/// degenerate "no movement" fallback emitted by the external path
/// enumerator when no route exists.
pub type Path = Vec<NodeId>;

/// One chosen candidate index per demand, parallel to the demand list.
pub type Assignment = Vec<usize>;

/// An origin-destination traffic requirement.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Demand {
    pub source: NodeId,
    pub target: NodeId,

    /// Traffic quantity carried by this demand. Edge loads are weighted
    /// by this value, identically in the SA and QUBO paths.
    pub volume: f64,
}

impl Demand {
    pub fn new(source: NodeId, target: NodeId, volume: f64) -> Self {
        Self { source, target, volume }
    }

    /// A demand of one unit of traffic (one path = one unit of load).
    pub fn unit(source: NodeId, target: NodeId) -> Self {
        Self::new(source, target, 1.0)
    }
}

/// Immutable, validated bundle of network + demands + candidate paths.
///
/// Construction is the fail-fast gate for every configuration error:
/// after [`RoutingInstance::new`] succeeds, the cost model and both
/// optimizers may assume all lookups succeed and never re-validate.
#[derive(Debug, Clone)]
pub struct RoutingInstance {
    network: Network,
    demands: Vec<Demand>,
    candidates: Vec<Vec<Path>>,
}

impl RoutingInstance {
    /// Validates and bundles the inputs.
    ///
    /// Checked preconditions (each is a fatal configuration error):
    /// - at least one demand;
    /// - one candidate list per demand, every list non-empty;
    /// - demand endpoints exist in the network and differ;
    /// - demand volume finite and > 0;
    /// - every path starts at its demand's source and (unless it is the
    ///   single-node fallback) ends at the target;
    /// - every consecutive node pair in every path is a network edge;
    /// - paths are internally simple (no repeated node).
    pub fn new(
        network: Network,
        demands: Vec<Demand>,
        candidates: Vec<Vec<Path>>,
    ) -> Result<Self, String> {
        if demands.is_empty() {
            return Err("at least one demand required".into());
        }
        if candidates.len() != demands.len() {
            return Err(format!(
                "expected one candidate list per demand: {} demands, {} lists",
                demands.len(),
                candidates.len()
            ));
        }

        for (i, demand) in demands.iter().enumerate() {
            if demand.source == demand.target {
                return Err(format!("demand {i}: source equals target ({})", demand.source));
            }
            for node in [demand.source, demand.target] {
                if !network.contains_node(node) {
                    return Err(format!("demand {i}: node {node} not in network"));
                }
            }
            if !demand.volume.is_finite() || demand.volume <= 0.0 {
                return Err(format!(
                    "demand {i}: volume must be finite and > 0, got {}",
                    demand.volume
                ));
            }

            let lists = &candidates[i];
            if lists.is_empty() {
                return Err(format!("demand {i}: empty candidate list"));
            }
            for (p, path) in lists.iter().enumerate() {
                validate_path(&network, demand, path)
                    .map_err(|e| format!("demand {i}, candidate {p}: {e}"))?;
            }
        }

        Ok(Self { network, demands, candidates })
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn demands(&self) -> &[Demand] {
        &self.demands
    }

    pub fn demand_count(&self) -> usize {
        self.demands.len()
    }

    /// Candidate paths of one demand.
    pub fn candidates(&self, demand: usize) -> &[Path] {
        &self.candidates[demand]
    }

    /// The chosen path of `demand` under `candidate`.
    pub fn path(&self, demand: usize, candidate: usize) -> &Path {
        &self.candidates[demand][candidate]
    }

    /// Total number of (demand, candidate) pairs — the QUBO variable count.
    pub fn variable_count(&self) -> usize {
        self.candidates.iter().map(Vec::len).sum()
    }

    /// Checks that an assignment indexes this instance's candidate lists.
    pub fn check_assignment(&self, assignment: &[usize]) -> Result<(), String> {
        if assignment.len() != self.demands.len() {
            return Err(format!(
                "assignment length {} does not match {} demands",
                assignment.len(),
                self.demands.len()
            ));
        }
        for (i, &choice) in assignment.iter().enumerate() {
            if choice >= self.candidates[i].len() {
                return Err(format!(
                    "demand {i}: candidate index {choice} out of range (have {})",
                    self.candidates[i].len()
                ));
            }
        }
        Ok(())
    }
}

fn validate_path(network: &Network, demand: &Demand, path: &Path) -> Result<(), String> {
    match path.as_slice() {
        [] => return Err("empty path".into()),
        [only] => {
            // no-movement fallback
            if *only != demand.source {
                return Err(format!(
                    "single-node path must sit at the source {}, got {only}",
                    demand.source
                ));
            }
            return Ok(());
        }
        nodes => {
            if nodes[0] != demand.source {
                return Err(format!("path starts at {}, demand source is {}", nodes[0], demand.source));
            }
            if *nodes.last().unwrap() != demand.target {
                return Err(format!(
                    "path ends at {}, demand target is {}",
                    nodes.last().unwrap(),
                    demand.target
                ));
            }
        }
    }

    let mut seen = std::collections::HashSet::new();
    for &node in path {
        if !seen.insert(node) {
            return Err(format!("path revisits node {node}"));
        }
    }

    for pair in path.windows(2) {
        if network.edge(pair[0], pair[1]).is_none() {
            return Err(format!("step ({}, {}) is not a network edge", pair[0], pair[1]));
        }
    }
    Ok(())
}
