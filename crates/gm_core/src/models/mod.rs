pub mod player;
pub mod stats;
pub mod team;
pub mod traits;

pub use player::{DevelopmentCurve, Player, Role, RETIREMENT_AGE};
pub use stats::{PlayerStatistics, SplitRecord, TeamStatistics};
pub use team::{LeagueTier, Region, Team, BASELINE_SYNERGY};
pub use traits::{PlayerTrait, TraitWeights};
