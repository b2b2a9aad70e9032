//! Annealing execution loop.

use super::config::AnnealConfig;
use super::state::{neighbor, random_assignment};
use crate::cost::{CostModel, PenaltyParams, RoutingOutcome};
use crate::model::RoutingInstance;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Floor for the acceptance denominator as the temperature approaches
/// zero.
const MIN_TEMPERATURE: f64 = 1e-9;

/// Progress record emitted once per episode.
///
/// This is the engine's sole externally observable progress signal;
/// sinks (CSV writers, plotters) live outside the crate.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EpisodeRecord {
    pub episode: usize,
    pub temperature: f64,
    pub current_cost: f64,
    pub best_cost: f64,

    /// Accepted / attempted moves within this episode, in `[0, 1]`.
    pub acceptance_rate: f64,

    /// Capacity violation of the best assignment seen so far.
    pub violations: f64,
}

/// Result of an annealing run.
#[derive(Debug, Clone)]
pub struct AnnealOutcome {
    /// Best assignment found, scored in the shared outcome shape.
    pub result: RoutingOutcome,

    /// One record per episode.
    pub episodes: Vec<EpisodeRecord>,

    /// Temperature after the last episode's decay step.
    pub final_temperature: f64,

    /// Accepted moves over the whole run.
    pub accepted_moves: usize,

    /// Attempted moves over the whole run (`episodes * moves_per_episode`).
    pub attempted_moves: usize,
}

/// Executes the annealing search.
pub struct AnnealRunner;

impl AnnealRunner {
    /// Runs a single annealing chain.
    ///
    /// Instance preconditions (non-empty candidate lists, edge-consistent
    /// paths) are enforced by [`RoutingInstance::new`]; this entry point
    /// only re-validates the configuration. The run is deterministic
    /// given a seed: one generator services the initial assignment,
    /// every neighbor proposal, and every Metropolis draw, in order.
    pub fn run(
        instance: &RoutingInstance,
        penalty: PenaltyParams,
        config: &AnnealConfig,
    ) -> Result<AnnealOutcome, String> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };

        let model = CostModel::new(instance, penalty);
        let mut current = random_assignment(instance, &mut rng);
        let mut current_cost = model.objective(&current);
        let mut best = current.clone();
        let mut best_cost = current_cost;

        let moves = config.moves_for(instance.demand_count());
        let cooling_rate = config.cooling_rate();
        let mut temperature = config.temp_start;

        let mut records = Vec::with_capacity(config.episodes);
        let mut accepted_total = 0usize;
        let mut attempted_total = 0usize;

        for episode in 0..config.episodes {
            let mut accepted = 0usize;

            for _ in 0..moves {
                let candidate = neighbor(&current, instance, &mut rng);
                let candidate_cost = model.objective(&candidate);
                let delta = candidate_cost - current_cost;

                // Metropolis criterion; a no-op move has delta = 0 and
                // is always accepted without changing the state.
                let accept = delta <= 0.0 || {
                    let t = temperature.max(MIN_TEMPERATURE);
                    rng.random_range(0.0..1.0) < (-delta / t).exp()
                };

                if accept {
                    current = candidate;
                    current_cost = candidate_cost;
                    accepted += 1;

                    if current_cost < best_cost {
                        best = current.clone();
                        best_cost = current_cost;
                    }
                }
            }

            accepted_total += accepted;
            attempted_total += moves;

            records.push(EpisodeRecord {
                episode,
                temperature,
                current_cost,
                best_cost,
                acceptance_rate: accepted as f64 / moves as f64,
                violations: model.capacity_violation(&best),
            });

            temperature *= cooling_rate;
        }

        Ok(AnnealOutcome {
            result: model.outcome(best),
            episodes: records,
            final_temperature: temperature,
            accepted_moves: accepted_total,
            attempted_moves: attempted_total,
        })
    }

    /// Runs independent chains with distinct seeds and keeps the best.
    ///
    /// Chains share no mutable state; with the `parallel` feature they
    /// run on the rayon thread pool.
    pub fn run_chains(
        instance: &RoutingInstance,
        penalty: PenaltyParams,
        config: &AnnealConfig,
        seeds: &[u64],
    ) -> Result<AnnealOutcome, String> {
        if seeds.is_empty() {
            return Err("run_chains requires at least one seed".into());
        }

        let run_one = |&seed: &u64| {
            let chain_config = config.clone().with_seed(seed);
            Self::run(instance, penalty, &chain_config)
        };

        #[cfg(feature = "parallel")]
        let outcomes: Vec<AnnealOutcome> = {
            use rayon::prelude::*;
            seeds.par_iter().map(run_one).collect::<Result<_, String>>()?
        };

        #[cfg(not(feature = "parallel"))]
        let outcomes: Vec<AnnealOutcome> = {
            seeds.iter().map(run_one).collect::<Result<_, String>>()?
        };

        Ok(outcomes
            .into_iter()
            .min_by(|a, b| {
                a.result
                    .objective
                    .partial_cmp(&b.result.objective)
                    .expect("objectives are finite")
            })
            .expect("at least one chain"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Demand, Network, RoutingInstance};

    /// Triangle scenario: edges 0-1 (cost 1), 1-2 (cost 1), 0-2 (cost 3);
    /// two unit demands 0 -> 2, candidates [0,1,2] and [0,2] each.
    fn triangle_instance(capacity: f64) -> RoutingInstance {
        let mut net = Network::new();
        net.add_edge(0, 1, 1.0, capacity).unwrap();
        net.add_edge(1, 2, 1.0, capacity).unwrap();
        net.add_edge(0, 2, 3.0, capacity).unwrap();
        RoutingInstance::new(
            net,
            vec![Demand::unit(0, 2), Demand::unit(0, 2)],
            vec![
                vec![vec![0, 1, 2], vec![0, 2]],
                vec![vec![0, 1, 2], vec![0, 2]],
            ],
        )
        .unwrap()
    }

    fn test_config() -> AnnealConfig {
        AnnealConfig::default()
            .with_episodes(200)
            .with_temperatures(50.0, 0.5)
            .with_seed(42)
    }

    #[test]
    fn test_finds_cheap_route_without_penalty() {
        // slack capacity, no penalty: both demands via [0,1,2], cost 4
        let instance = triangle_instance(2.0);
        let outcome =
            AnnealRunner::run(&instance, PenaltyParams::unpenalized(), &test_config()).unwrap();

        assert_eq!(outcome.result.objective, 4.0);
        assert_eq!(outcome.result.assignment, vec![0, 0]);
        assert_eq!(outcome.result.violation, 0.0);
    }

    #[test]
    fn test_penalty_splits_demands_under_tight_capacity() {
        // capacity 1: stacking both demands costs 4 + 20 penalty; the
        // optimum splits them (one two-hop, one direct) at cost 5
        let instance = triangle_instance(1.0);
        let outcome =
            AnnealRunner::run(&instance, PenaltyParams::new(10.0, 2), &test_config()).unwrap();

        assert_eq!(outcome.result.objective, 5.0);
        assert_eq!(outcome.result.violation, 0.0);
        let mut sorted = outcome.result.assignment.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![0, 1]);
    }

    #[test]
    fn test_tight_capacity_costs_strictly_more() {
        let slack =
            AnnealRunner::run(&triangle_instance(2.0), PenaltyParams::new(10.0, 2), &test_config())
                .unwrap();
        let tight =
            AnnealRunner::run(&triangle_instance(1.0), PenaltyParams::new(10.0, 2), &test_config())
                .unwrap();
        assert!(tight.result.objective > slack.result.objective);
    }

    #[test]
    fn test_best_cost_monotone_non_increasing() {
        let instance = triangle_instance(1.0);
        let outcome =
            AnnealRunner::run(&instance, PenaltyParams::new(10.0, 2), &test_config()).unwrap();

        for window in outcome.episodes.windows(2) {
            assert!(window[1].best_cost <= window[0].best_cost);
        }
    }

    #[test]
    fn test_episode_records_shape() {
        let config = test_config().with_episodes(25);
        let instance = triangle_instance(1.0);
        let outcome = AnnealRunner::run(&instance, PenaltyParams::new(10.0, 2), &config).unwrap();

        assert_eq!(outcome.episodes.len(), 25);
        for (i, record) in outcome.episodes.iter().enumerate() {
            assert_eq!(record.episode, i);
            assert!(record.acceptance_rate >= 0.0 && record.acceptance_rate <= 1.0);
            assert!(record.violations >= 0.0);
            assert!(record.best_cost <= record.current_cost + 1e-12);
            assert!(record.temperature > 0.0);
        }

        // geometric decay between consecutive episodes
        let rate = config.cooling_rate();
        for window in outcome.episodes.windows(2) {
            let expected = window[0].temperature * rate;
            assert!((window[1].temperature - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn test_reproducible_given_seed() {
        let instance = triangle_instance(1.0);
        let a = AnnealRunner::run(&instance, PenaltyParams::new(10.0, 2), &test_config()).unwrap();
        let b = AnnealRunner::run(&instance, PenaltyParams::new(10.0, 2), &test_config()).unwrap();

        assert_eq!(a.result.assignment, b.result.assignment);
        assert_eq!(a.result.objective, b.result.objective);
        assert_eq!(a.episodes, b.episodes);
    }

    #[test]
    fn test_single_candidate_demands_do_not_stall() {
        // every demand has one candidate: all moves are no-ops, the run
        // must still terminate with the only possible assignment
        let mut net = Network::new();
        net.add_edge(0, 1, 1.0, 2.0).unwrap();
        net.add_edge(1, 2, 1.0, 2.0).unwrap();
        let instance = RoutingInstance::new(
            net,
            vec![Demand::unit(0, 2)],
            vec![vec![vec![0, 1, 2]]],
        )
        .unwrap();

        let config = test_config().with_episodes(10);
        let outcome = AnnealRunner::run(&instance, PenaltyParams::default(), &config).unwrap();

        assert_eq!(outcome.result.assignment, vec![0]);
        assert_eq!(outcome.result.objective, 2.0);
        // no-op moves have delta = 0 and are always accepted
        assert_eq!(outcome.accepted_moves, outcome.attempted_moves);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let instance = triangle_instance(2.0);
        let config = AnnealConfig::default().with_temperatures(1.0, 5.0);
        assert!(AnnealRunner::run(&instance, PenaltyParams::default(), &config).is_err());
    }

    #[test]
    fn test_run_chains_returns_best() {
        let instance = triangle_instance(1.0);
        let config = AnnealConfig::default().with_episodes(200).with_temperatures(50.0, 0.5);
        let multi = AnnealRunner::run_chains(
            &instance,
            PenaltyParams::new(10.0, 2),
            &config,
            &[1, 2, 3, 4],
        )
        .unwrap();

        for seed in [1u64, 2, 3, 4] {
            let single = AnnealRunner::run(
                &instance,
                PenaltyParams::new(10.0, 2),
                &config.clone().with_seed(seed),
            )
            .unwrap();
            assert!(multi.result.objective <= single.result.objective);
        }
    }

    #[test]
    fn test_run_chains_requires_seeds() {
        let instance = triangle_instance(2.0);
        assert!(AnnealRunner::run_chains(
            &instance,
            PenaltyParams::default(),
            &AnnealConfig::default(),
            &[]
        )
        .is_err());
    }
}
