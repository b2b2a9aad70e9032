//! Annealing configuration.

/// Configuration for the annealing engine.
///
/// The run is organized in `episodes` outer steps; the temperature is
/// held constant within an episode and decays geometrically between
/// them, from `temp_start` down to approximately `temp_end`.
///
/// # Examples
///
/// ```
/// use traffic_assign::sa::AnnealConfig;
///
/// let config = AnnealConfig::default()
///     .with_episodes(120)
///     .with_temperatures(50.0, 0.5)
///     .with_seed(123);
/// ```
#[derive(Debug, Clone)]
pub struct AnnealConfig {
    /// Outer loop count. One progress record is emitted per episode.
    pub episodes: usize,

    /// Initial temperature. Higher values accept more worsening moves.
    pub temp_start: f64,

    /// Final temperature, reached at the end of the run.
    pub temp_end: f64,

    /// Moves attempted per episode. `None` means half the demand count,
    /// at least 1.
    pub moves_per_episode: Option<usize>,

    /// Random seed. `None` draws a fresh seed per run.
    pub seed: Option<u64>,
}

impl Default for AnnealConfig {
    fn default() -> Self {
        Self {
            episodes: 60,
            temp_start: 50.0,
            temp_end: 0.5,
            moves_per_episode: None,
            seed: None,
        }
    }
}

impl AnnealConfig {
    pub fn with_episodes(mut self, episodes: usize) -> Self {
        self.episodes = episodes;
        self
    }

    pub fn with_temperatures(mut self, temp_start: f64, temp_end: f64) -> Self {
        self.temp_start = temp_start;
        self.temp_end = temp_end;
        self
    }

    pub fn with_moves_per_episode(mut self, moves: usize) -> Self {
        self.moves_per_episode = Some(moves);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.episodes == 0 {
            return Err("episodes must be at least 1".into());
        }
        if !self.temp_start.is_finite() || self.temp_start <= 0.0 {
            return Err(format!("temp_start must be finite and > 0, got {}", self.temp_start));
        }
        if !self.temp_end.is_finite() || self.temp_end <= 0.0 {
            return Err(format!("temp_end must be finite and > 0, got {}", self.temp_end));
        }
        if self.temp_end >= self.temp_start {
            return Err(format!(
                "temp_end must be less than temp_start ({} >= {})",
                self.temp_end, self.temp_start
            ));
        }
        if self.moves_per_episode == Some(0) {
            return Err("moves_per_episode must be at least 1".into());
        }
        Ok(())
    }

    /// Geometric decay factor taking `temp_start` to `temp_end` over
    /// the configured episode count.
    pub fn cooling_rate(&self) -> f64 {
        (self.temp_end / self.temp_start).powf(1.0 / self.episodes as f64)
    }

    /// Moves per episode for an instance with `demand_count` demands.
    pub fn moves_for(&self, demand_count: usize) -> usize {
        self.moves_per_episode.unwrap_or_else(|| (demand_count / 2).max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(AnnealConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_episodes() {
        assert!(AnnealConfig::default().with_episodes(0).validate().is_err());
    }

    #[test]
    fn test_rejects_bad_temperatures() {
        assert!(AnnealConfig::default().with_temperatures(-1.0, 0.5).validate().is_err());
        assert!(AnnealConfig::default().with_temperatures(10.0, 0.0).validate().is_err());
        assert!(AnnealConfig::default().with_temperatures(1.0, 1.0).validate().is_err());
        assert!(AnnealConfig::default().with_temperatures(1.0, 2.0).validate().is_err());
    }

    #[test]
    fn test_rejects_zero_moves() {
        assert!(AnnealConfig::default().with_moves_per_episode(0).validate().is_err());
    }

    #[test]
    fn test_cooling_rate_reaches_temp_end() {
        let config = AnnealConfig::default()
            .with_episodes(60)
            .with_temperatures(50.0, 0.5);
        let rate = config.cooling_rate();
        assert!(rate > 0.0 && rate < 1.0);

        let final_temp = config.temp_start * rate.powi(config.episodes as i32);
        assert!((final_temp - config.temp_end).abs() < 1e-9);
    }

    #[test]
    fn test_moves_default_is_half_demand_count() {
        let config = AnnealConfig::default();
        assert_eq!(config.moves_for(25), 12);
        assert_eq!(config.moves_for(1), 1);
        assert_eq!(config.moves_for(0), 1);
        assert_eq!(config.with_moves_per_episode(7).moves_for(25), 7);
    }
}
