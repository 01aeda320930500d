//! Swiss-system tournament.
//!
//! Each round pairs teams on identical win-loss differentials where
//! possible, relaxing first to any unplayed opponent and only then to a
//! rematch. An odd field hands exactly one bye per round. After the
//! configured number of rounds the cutoff `min(8, field/2)` qualifies, and
//! the top seed of the final ranking is the tournament winner.

use chrono::{DateTime, Utc};
use std::collections::HashMap;

use super::{TournamentFormat, TournamentKind};
use crate::engine::{simulate_match, MatchFormat, MatchResult};
use crate::error::Result;
use crate::rng::SessionRng;
use crate::world::{TeamId, World};

/// Most qualification spots a Swiss stage hands out.
const MAX_QUALIFIERS: usize = 8;

#[derive(Debug)]
pub struct SwissTournament {
    name: String,
    kind: TournamentKind,
    participants: Vec<TeamId>,
    wins: HashMap<TeamId, u32>,
    losses: HashMap<TeamId, u32>,
    played: HashMap<TeamId, Vec<TeamId>>,
    matches: Vec<MatchResult>,
    swiss_rounds: u32,
    current_round: u32,
    qualified: Vec<TeamId>,
    winner: Option<TeamId>,
    complete: bool,
    started_at: DateTime<Utc>,
    finished_at: Option<DateTime<Utc>>,
}

impl SwissTournament {
    pub fn new(name: impl Into<String>, kind: TournamentKind, swiss_rounds: u32) -> Self {
        Self {
            name: name.into(),
            kind,
            participants: Vec::new(),
            wins: HashMap::new(),
            losses: HashMap::new(),
            played: HashMap::new(),
            matches: Vec::new(),
            swiss_rounds,
            current_round: 1,
            qualified: Vec::new(),
            winner: None,
            complete: false,
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    pub fn add_participant(&mut self, team: TeamId) {
        if !self.participants.contains(&team) {
            self.participants.push(team);
        }
    }

    pub fn kind(&self) -> TournamentKind {
        self.kind
    }

    pub fn participants(&self) -> &[TeamId] {
        &self.participants
    }

    pub fn matches(&self) -> &[MatchResult] {
        &self.matches
    }

    pub fn current_round(&self) -> u32 {
        self.current_round
    }

    pub fn record(&self, team: TeamId) -> (u32, u32) {
        (
            self.wins.get(&team).copied().unwrap_or(0),
            self.losses.get(&team).copied().unwrap_or(0),
        )
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    /// Teams that have already met this one.
    fn has_played(&self, team: TeamId, opponent: TeamId) -> bool {
        self.played.get(&team).is_some_and(|seen| seen.contains(&opponent))
    }

    fn differential(&self, team: TeamId) -> i64 {
        let (wins, losses) = self.record(team);
        i64::from(wins) - i64::from(losses)
    }

    /// Ranking used for both pairing and the final table: differential
    /// descending, strength descending, then stable field order.
    fn ranking(&self, world: &World) -> Vec<TeamId> {
        let mut order = self.participants.clone();
        order.sort_by(|a, b| {
            self.differential(*b)
                .cmp(&self.differential(*a))
                .then_with(|| world.team_strength(*b).total_cmp(&world.team_strength(*a)))
        });
        order
    }

    /// Greedy Swiss pairing over the ranked field. Any leftover team after
    /// pairing is the round's bye.
    fn pair_round(&self, world: &World) -> (Vec<(TeamId, TeamId)>, Option<TeamId>) {
        let mut available = self.ranking(world);
        let mut pairs = Vec::new();
        while available.len() >= 2 {
            let team = available.remove(0);
            let diff = self.differential(team);
            let index = if let Some(i) = available
                .iter()
                .position(|o| self.differential(*o) == diff && !self.has_played(team, *o))
            {
                i
            } else if let Some(i) = available.iter().position(|o| !self.has_played(team, *o)) {
                log::debug!(
                    "{}: round {} pairing relaxed to cross-bracket for {}",
                    self.name,
                    self.current_round,
                    world.team(team).name
                );
                i
            } else {
                log::debug!(
                    "{}: round {} forced rematch for {}",
                    self.name,
                    self.current_round,
                    world.team(team).name
                );
                0
            };
            pairs.push((team, available.remove(index)));
        }
        (pairs, available.pop())
    }

    fn finish(&mut self, world: &World) {
        let order = self.ranking(world);
        let spots = MAX_QUALIFIERS.min(self.participants.len() / 2);
        self.qualified = order.into_iter().take(spots).collect();
        self.winner = self.qualified.first().copied();
        self.complete = true;
        self.finished_at = Some(Utc::now());
        match self.winner {
            Some(id) => log::info!("{} complete: {} on top", self.name, world.team(id).name),
            None => log::warn!("{} completed with no qualifiers", self.name),
        }
    }
}

impl TournamentFormat for SwissTournament {
    fn name(&self) -> &str {
        &self.name
    }

    fn initialize(&mut self, _world: &World) {
        self.current_round = 1;
        self.complete = false;
        self.winner = None;
        self.qualified.clear();
        self.matches.clear();
        for team in &self.participants {
            self.wins.insert(*team, 0);
            self.losses.insert(*team, 0);
            self.played.insert(*team, Vec::new());
        }
        if self.participants.is_empty() {
            log::warn!("{}: no participants registered", self.name);
        } else if self.participants.len() % 2 == 1 {
            log::warn!(
                "{}: odd field of {}, one bye per round",
                self.name,
                self.participants.len()
            );
        }
    }

    fn simulate_round(&mut self, world: &mut World, rng: &mut SessionRng) -> Result<()> {
        let (pairs, bye) = self.pair_round(world);
        for (a, b) in pairs {
            self.played.entry(a).or_default().push(b);
            self.played.entry(b).or_default().push(a);
            match simulate_match(world, a, b, MatchFormat::Bo3, &mut *rng) {
                Ok(result) => {
                    *self.wins.entry(result.winner).or_insert(0) += 1;
                    *self.losses.entry(result.loser()).or_insert(0) += 1;
                    self.matches.push(result);
                }
                Err(err) => {
                    // Invariant failure on one pairing should not sink the
                    // whole stage; neither side gains a game.
                    log::warn!(
                        "{}: skipping pairing {} vs {}: {err}",
                        self.name,
                        world.team(a).name,
                        world.team(b).name
                    );
                }
            }
        }
        if let Some(team) = bye {
            *self.wins.entry(team).or_insert(0) += 1;
            log::info!(
                "{}: {} receives a bye in round {}",
                self.name,
                world.team(team).name,
                self.current_round
            );
        }
        Ok(())
    }

    fn is_round_complete(&self) -> bool {
        true
    }

    fn advance(&mut self, world: &World) {
        self.current_round += 1;
        if self.current_round > self.swiss_rounds {
            self.finish(world);
        }
    }

    fn is_complete(&self) -> bool {
        self.complete
    }

    fn winner(&self) -> Option<TeamId> {
        self.winner
    }

    fn qualified_teams(&self) -> &[TeamId] {
        &self.qualified
    }
}
