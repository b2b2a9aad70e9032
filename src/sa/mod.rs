//! Simulated Annealing over route assignments.
//!
//! Single-solution trajectory search: each move re-routes one demand
//! onto a different candidate path, accepted by the Metropolis criterion
//! under a geometric cooling schedule. Worsening moves are accepted with
//! probability `exp(-delta / temperature)`, letting the search escape
//! local optima and pass through capacity-infeasible states that the
//! congestion penalty prices rather than forbids.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Metropolis et al. (1953), equation of state calculations

mod config;
mod runner;
mod state;

pub use config::AnnealConfig;
pub use runner::{AnnealOutcome, AnnealRunner, EpisodeRecord};
pub use state::{neighbor, random_assignment};
