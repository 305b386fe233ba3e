//! Simulation configuration.

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Pool to draw from
    pub pool_id: String,

    /// Number of single draws to perform
    pub num_draws: u64,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Log verbosity (0 = silent, 1 = summary, 2 = progress)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            pool_id: "basic".to_string(),
            num_draws: 100_000,
            seed: None,
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Small run for eyeballing a pool
    pub fn quick(pool_id: &str) -> Self {
        Self {
            pool_id: pool_id.to_string(),
            num_draws: 1_000,
            ..Default::default()
        }
    }

    /// Large seeded run, enough to check rates to about a percent
    pub fn distribution_check(pool_id: &str, seed: u64) -> Self {
        Self {
            pool_id: pool_id.to_string(),
            num_draws: 1_000_000,
            seed: Some(seed),
            ..Default::default()
        }
    }
}
