//! Sparse quadratic model and the variable index table.

use crate::model::RoutingInstance;
use std::collections::HashMap;

/// Bidirectional table between QUBO variable indices and
/// `(demand, candidate)` pairs.
///
/// Variables are numbered densely in `(demand, candidate)` order, one
/// per pair, so external solvers see indices `0..len()`.
#[derive(Debug, Clone)]
pub struct VarTable {
    index: HashMap<(usize, usize), usize>,
    pairs: Vec<(usize, usize)>,
    demand_count: usize,
}

impl VarTable {
    pub fn from_instance(instance: &RoutingInstance) -> Self {
        let mut index = HashMap::new();
        let mut pairs = Vec::with_capacity(instance.variable_count());
        for demand in 0..instance.demand_count() {
            for candidate in 0..instance.candidates(demand).len() {
                index.insert((demand, candidate), pairs.len());
                pairs.push((demand, candidate));
            }
        }
        Self { index, pairs, demand_count: instance.demand_count() }
    }

    /// Variable index of `(demand, candidate)`, if present.
    pub fn index_of(&self, demand: usize, candidate: usize) -> Option<usize> {
        self.index.get(&(demand, candidate)).copied()
    }

    /// `(demand, candidate)` pair of a variable index, if present.
    pub fn pair_of(&self, variable: usize) -> Option<(usize, usize)> {
        self.pairs.get(variable).copied()
    }

    /// All pairs in variable-index order.
    pub fn pairs(&self) -> &[(usize, usize)] {
        &self.pairs
    }

    pub fn demand_count(&self) -> usize {
        self.demand_count
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Sparse symmetric QUBO: `energy(x) = offset + sum Q[a,b] * x_a * x_b`.
///
/// Keys are canonicalized to `(min, max)`; a diagonal entry `(q, q)` is
/// a linear term (`x^2 = x` for binary variables). Coefficients only
/// ever accumulate — contributions from the travel cost, the one-choice
/// constraint, and the congestion expansion sum into the same entries.
#[derive(Debug, Clone, Default)]
pub struct QuboModel {
    coefficients: HashMap<(usize, usize), f64>,
    offset: f64,
    num_variables: usize,
}

impl QuboModel {
    pub fn new(num_variables: usize) -> Self {
        Self { coefficients: HashMap::new(), offset: 0.0, num_variables }
    }

    /// Adds `value` to the coefficient of `x_a * x_b` (order-insensitive).
    pub fn add_term(&mut self, a: usize, b: usize, value: f64) {
        let key = if a <= b { (a, b) } else { (b, a) };
        *self.coefficients.entry(key).or_insert(0.0) += value;
    }

    /// Adds a constant to the model.
    pub fn add_offset(&mut self, value: f64) {
        self.offset += value;
    }

    /// Coefficient of `x_a * x_b` (0.0 if absent).
    pub fn coefficient(&self, a: usize, b: usize) -> f64 {
        let key = if a <= b { (a, b) } else { (b, a) };
        self.coefficients.get(&key).copied().unwrap_or(0.0)
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn num_variables(&self) -> usize {
        self.num_variables
    }

    /// Number of stored (non-zero-initialized) terms.
    pub fn term_count(&self) -> usize {
        self.coefficients.len()
    }

    /// Iterates over `((a, b), coefficient)` with `a <= b`.
    pub fn terms(&self) -> impl Iterator<Item = ((usize, usize), f64)> + '_ {
        self.coefficients.iter().map(|(&k, &v)| (k, v))
    }

    /// Evaluates the quadratic form at a binary vector.
    ///
    /// `sample` must hold one 0/1 entry per variable.
    pub fn energy(&self, sample: &[u8]) -> f64 {
        assert_eq!(
            sample.len(),
            self.num_variables,
            "sample length must match variable count"
        );
        self.offset
            + self
                .coefficients
                .iter()
                .map(|(&(a, b), &coef)| coef * f64::from(sample[a]) * f64::from(sample[b]))
                .sum::<f64>()
    }
}
