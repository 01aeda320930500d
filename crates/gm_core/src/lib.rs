//! # gm_core - Deterministic Esports Circuit Simulation Engine
//!
//! A closed, single-process batch simulator for a multi-region professional
//! circuit: regular-season round-robins, seeded playoff brackets,
//! promotion/relegation between two tiers, and Swiss-system international
//! tournaments, layered on a player-career model (generation, development,
//! retirement) and a team-strength/synergy model that drives stochastic
//! match outcomes.
//!
//! ## Features
//! - 100% deterministic simulation (same seed = same season)
//! - Explicit advance calls, no background execution
//! - Serializable entity graph and read-only snapshot queries
//!
//! The embedding application owns presentation, persistence and input; it
//! feeds commands and initial entity counts into [`SeasonManager`] and
//! consumes its snapshot queries.

pub mod engine;
pub mod error;
pub mod generators;
pub mod league;
pub mod models;
pub mod rng;
pub mod season;
pub mod tournament;
pub mod world;

pub use engine::{simulate_match, MatchFormat, MatchResult};
pub use error::{Result, SimError};
pub use league::{LeagueRecord, RegionalLeague, Split, SplitOptions};
pub use models::{LeagueTier, Player, PlayerTrait, Region, Role, Team};
pub use rng::SessionRng;
pub use season::{SeasonManager, SimConfig, SimulationSettings};
pub use tournament::{SwissTournament, TournamentFormat, TournamentKind};
pub use world::{PlayerId, TeamId, World};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_api_drives_a_complete_session() {
        let mut manager = SeasonManager::new(SimConfig { seed: 99, ..SimConfig::default() });
        manager.set_auto_advance(false);
        manager.start_simulation().unwrap();

        assert_eq!(manager.current_year(), 2025);
        assert!(!manager.is_running());
        for region in Region::ALL {
            assert_eq!(manager.standings(region, LeagueTier::Champions).len(), 10);
            assert_eq!(manager.standings(region, LeagueTier::Challengers).len(), 8);
        }
        assert_eq!(manager.tournament_history().len(), 2);
    }
}
