pub mod game;
pub mod match_sim;

pub use game::{simulate_game, Game, GameEvent, GameEventKind, CHAMPION_POOL};
pub use match_sim::{simulate_match, MatchFormat, MatchResult};
