//! Tournament format contract.
//!
//! Formats share one capability set — initialize, simulate a round, round
//! completion, advance, qualified teams — and new formats (single or double
//! elimination) plug in as further implementations of the same trait rather
//! than a subclass hierarchy. The provided `simulate_to_completion` driver
//! is the only loop the orchestrator needs.

pub mod swiss;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::rng::SessionRng;
use crate::world::{TeamId, World};

pub use swiss::SwissTournament;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TournamentKind {
    Msi,
    Worlds,
}

impl TournamentKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            TournamentKind::Msi => "MSI",
            TournamentKind::Worlds => "Worlds",
        }
    }
}

pub trait TournamentFormat {
    fn name(&self) -> &str;

    /// Reset per-tournament bookkeeping for the registered participants.
    fn initialize(&mut self, world: &World);

    /// Pair and play one round.
    fn simulate_round(&mut self, world: &mut World, rng: &mut SessionRng) -> Result<()>;

    fn is_round_complete(&self) -> bool;

    /// Move to the next round; the format decides when it is finished.
    fn advance(&mut self, world: &World);

    fn is_complete(&self) -> bool;

    fn winner(&self) -> Option<TeamId>;

    fn qualified_teams(&self) -> &[TeamId];

    /// Drive the format from initialization to completion.
    fn simulate_to_completion(&mut self, world: &mut World, rng: &mut SessionRng) -> Result<()> {
        self.initialize(world);
        while !self.is_complete() {
            self.simulate_round(world, rng)?;
            if self.is_round_complete() {
                self.advance(world);
            }
        }
        Ok(())
    }
}
