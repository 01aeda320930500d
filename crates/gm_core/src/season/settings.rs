//! Session configuration and runtime settings.

use serde::{Deserialize, Serialize};

/// Initial entity counts and the session seed, fed in by the embedding
/// application.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SimConfig {
    pub seed: u64,
    pub starting_year: u16,
    pub champions_per_region: usize,
    pub challengers_per_region: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            starting_year: 2024,
            champions_per_region: crate::league::DEFAULT_CHAMPIONS_TEAMS,
            challengers_per_region: crate::league::DEFAULT_CHALLENGERS_TEAMS,
        }
    }
}

/// Runtime feature switches. Flipping a toggle never retroactively undoes
/// effects that were applied while it was on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SimulationSettings {
    pub auto_advance: bool,
    pub simulation_speed: u32,
    pub promotion_relegation: bool,
    pub international_tournaments: bool,
    pub all_star_events: bool,
    pub player_development: bool,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            auto_advance: true,
            simulation_speed: 1,
            promotion_relegation: true,
            international_tournaments: true,
            all_star_events: true,
            player_development: true,
        }
    }
}
