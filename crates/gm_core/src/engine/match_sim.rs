//! Best-of-N match simulation and statistics fan-out.
//!
//! A match refuses to start unless both rosters are complete (the scheduler
//! decides whether to skip the fixture). Games run until one side reaches
//! the format's win threshold; the aggregate result then updates team and
//! player statistics, including international-appearance counters for
//! cross-region pairings.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::game::{simulate_game, Game};
use crate::error::{Result, SimError};
use crate::rng::gaussian;
use crate::world::{PlayerId, TeamId, World};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchFormat {
    Bo1,
    Bo3,
    Bo5,
}

impl MatchFormat {
    pub fn games_to_win(&self) -> u32 {
        match self {
            MatchFormat::Bo1 => 1,
            MatchFormat::Bo3 => 2,
            MatchFormat::Bo5 => 3,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    pub teams: [TeamId; 2],
    pub format: MatchFormat,
    pub score: [u32; 2],
    pub winner: TeamId,
    pub games: Vec<Game>,
    pub average_game_duration: f64,
    pub total_kills: u32,
    /// Best sampled performance on the winning roster.
    pub mvp: Option<String>,
    /// The weaker side won across a strength gap of more than 10 points.
    pub upset: bool,
}

impl MatchResult {
    pub fn loser(&self) -> TeamId {
        if self.winner == self.teams[0] {
            self.teams[1]
        } else {
            self.teams[0]
        }
    }

    pub fn score_string(&self) -> String {
        format!("{}-{}", self.score[0], self.score[1])
    }

    pub fn kills_of(&self, team: TeamId) -> u32 {
        self.games.iter().map(|g| g.kills_of(team)).sum()
    }

    pub fn deaths_of(&self, team: TeamId) -> u32 {
        self.games.iter().map(|g| g.deaths_of(team)).sum()
    }
}

/// Simulate a full match and fold the outcome into both teams' and all ten
/// starters' statistics.
pub fn simulate_match(
    world: &mut World,
    a: TeamId,
    b: TeamId,
    format: MatchFormat,
    rng: &mut impl Rng,
) -> Result<MatchResult> {
    for id in [a, b] {
        if !world.team(id).roster_complete() {
            return Err(SimError::IncompleteRoster { team: world.team(id).name.clone() });
        }
    }

    let a_strength = world.team_strength(a);
    let b_strength = world.team_strength(b);

    let to_win = format.games_to_win();
    let mut score = [0u32; 2];
    let mut games = Vec::new();
    while score[0] < to_win && score[1] < to_win {
        let game = simulate_game(world, a, b, rng);
        score[game.winner_side()] += 1;
        games.push(game);
    }
    let winner = if score[0] > score[1] { a } else { b };

    let average_game_duration =
        games.iter().map(|g| g.duration_min).sum::<f64>() / games.len() as f64;
    let total_kills = games.iter().map(|g| g.kills[0] + g.kills[1]).sum();

    let gap = (a_strength - b_strength).abs();
    let favorite = if a_strength >= b_strength { a } else { b };
    let upset = gap > 10.0 && winner != favorite;

    let mut result = MatchResult {
        teams: [a, b],
        format,
        score,
        winner,
        games,
        average_game_duration,
        total_kills,
        mvp: None,
        upset,
    };
    result.mvp = apply_statistics(world, &result, rng);
    Ok(result)
}

/// Update team aggregates and per-player statistics; returns the MVP name.
fn apply_statistics(world: &mut World, result: &MatchResult, rng: &mut impl Rng) -> Option<String> {
    let [a, b] = result.teams;
    let international = world.team(a).region != world.team(b).region;

    for team_id in [a, b] {
        let won = result.winner == team_id;
        let kills = result.kills_of(team_id);
        let deaths = result.deaths_of(team_id);
        world.team_mut(team_id).stats.record_match(
            won,
            result.average_game_duration,
            kills,
            deaths,
        );
    }

    let mut mvp: Option<(PlayerId, f64)> = None;
    for team_id in [a, b] {
        let won = result.winner == team_id;
        for player_id in world.starters(team_id) {
            let performance = world.player(player_id).match_performance(rng);
            let kills = (gaussian(rng, 0.0, 3.0) + performance / 20.0).max(0.0) as u32;
            let deaths = (gaussian(rng, 0.0, 2.0) + (100.0 - performance) / 25.0).max(1.0) as u32;
            let assists = (gaussian(rng, 0.0, 4.0) + performance / 15.0).max(0.0) as u32;

            let player = world.player_mut(player_id);
            player.stats.record_game(won, performance, kills, deaths, assists);
            if international {
                player.stats.international_appearances += 1;
            }
            if won && mvp.map_or(true, |(_, best)| performance > best) {
                mvp = Some((player_id, performance));
            }
        }
    }

    mvp.map(|(id, _)| {
        world.player_mut(id).stats.mvp_awards += 1;
        world.player(id).name.clone()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LeagueTier, Player, Region, Role, Team};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn add_full_team(world: &mut World, rng: &mut ChaCha8Rng, name: &str, region: Region) -> TeamId {
        let team = world.add_team(Team::new(name, region, LeagueTier::Champions, 1_000_000, "Coach"));
        for role in Role::ALL {
            let p = Player::generate(rng, format!("{name} {role:?}"), role, 22);
            let id = world.add_player(p);
            world.install_founding_player(team, id);
        }
        team
    }

    #[test]
    fn incomplete_roster_is_a_loud_failure() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut world = World::new();
        let a = add_full_team(&mut world, &mut rng, "Full", Region::Lec);
        let b = world.add_team(Team::new("Empty", Region::Lec, LeagueTier::Champions, 0, "Coach"));
        let err = simulate_match(&mut world, a, b, MatchFormat::Bo1, &mut rng).unwrap_err();
        assert!(matches!(err, SimError::IncompleteRoster { team } if team == "Empty"));
    }

    #[test]
    fn best_of_score_bounds_hold_for_every_format() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut world = World::new();
        let a = add_full_team(&mut world, &mut rng, "A", Region::Lck);
        let b = add_full_team(&mut world, &mut rng, "B", Region::Lck);
        for format in [MatchFormat::Bo1, MatchFormat::Bo3, MatchFormat::Bo5] {
            for _ in 0..30 {
                let r = simulate_match(&mut world, a, b, format, &mut rng).unwrap();
                let to_win = format.games_to_win();
                let winner_side = usize::from(r.winner == r.teams[1]);
                assert_eq!(r.score[winner_side], to_win);
                assert!(r.score[1 - winner_side] < to_win);
                assert_eq!(r.games.len() as u32, r.score[0] + r.score[1]);
            }
        }
    }

    #[test]
    fn statistics_fan_out_to_teams_and_starters() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut world = World::new();
        let a = add_full_team(&mut world, &mut rng, "A", Region::Lck);
        let b = add_full_team(&mut world, &mut rng, "B", Region::Lck);
        let r = simulate_match(&mut world, a, b, MatchFormat::Bo3, &mut rng).unwrap();

        assert_eq!(world.team(a).stats.matches_played, 1);
        assert_eq!(world.team(b).stats.matches_played, 1);
        let winner_stats = &world.team(r.winner).stats;
        assert_eq!(winner_stats.wins, 1);
        for id in world.starters(a).into_iter().chain(world.starters(b)) {
            let p = world.player(id);
            assert_eq!(p.stats.games_played, 1);
            assert!(p.stats.deaths >= 1);
            // Same-region match: no international credit.
            assert_eq!(p.stats.international_appearances, 0);
        }
        let mvp = r.mvp.expect("winning roster yields an MVP");
        assert!(mvp.starts_with(if r.winner == a { "A" } else { "B" }));
    }

    #[test]
    fn cross_region_match_counts_international_appearances() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut world = World::new();
        let a = add_full_team(&mut world, &mut rng, "East", Region::Lck);
        let b = add_full_team(&mut world, &mut rng, "West", Region::Lec);
        simulate_match(&mut world, a, b, MatchFormat::Bo3, &mut rng).unwrap();
        for id in world.starters(a).into_iter().chain(world.starters(b)) {
            assert_eq!(world.player(id).stats.international_appearances, 1);
        }
    }

    #[test]
    fn average_duration_stays_in_game_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut world = World::new();
        let a = add_full_team(&mut world, &mut rng, "A", Region::Lpl);
        let b = add_full_team(&mut world, &mut rng, "B", Region::Lpl);
        let r = simulate_match(&mut world, a, b, MatchFormat::Bo5, &mut rng).unwrap();
        assert!((25.0..=45.0).contains(&r.average_game_duration));
        assert_eq!(r.total_kills, r.kills_of(a) + r.kills_of(b));
    }
}
