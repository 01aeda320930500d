//! Entity arenas and the roster-ownership discipline.
//!
//! Players and teams live in dense arenas; everything else (leagues,
//! tournaments, match results) refers to them through `PlayerId`/`TeamId`
//! handles. All roster mutation funnels through `World` — `sign`, `release`
//! and `develop_roster` — so a player has exactly one owner at a time:
//! a team's roster/bench/academy, or the free-agent pool.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::traits::PlayerTrait;
use crate::models::{Player, Role, Team, BASELINE_SYNERGY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub(crate) u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TeamId(pub(crate) u32);

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct World {
    players: Vec<Player>,
    teams: Vec<Team>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_player(&mut self, player: Player) -> PlayerId {
        let id = PlayerId(self.players.len() as u32);
        self.players.push(player);
        id
    }

    pub fn add_team(&mut self, team: Team) -> TeamId {
        let id = TeamId(self.teams.len() as u32);
        self.teams.push(team);
        id
    }

    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.0 as usize]
    }

    pub fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id.0 as usize]
    }

    pub fn team(&self, id: TeamId) -> &Team {
        &self.teams[id.0 as usize]
    }

    pub fn team_mut(&mut self, id: TeamId) -> &mut Team {
        &mut self.teams[id.0 as usize]
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn team_count(&self) -> usize {
        self.teams.len()
    }

    /// Starter ids of a team in fixed role order.
    pub fn starters(&self, id: TeamId) -> Vec<PlayerId> {
        self.team(id).starters().collect()
    }

    // ========================================================================
    // Roster operations
    // ========================================================================

    /// Sign a free agent or poach a player onto `team`.
    ///
    /// Returns `false` without side effects when the salary exceeds the
    /// team's budget. An incumbent in the same role is moved to the bench
    /// (and stays under contract with the team).
    pub fn sign(&mut self, team_id: TeamId, player_id: PlayerId) -> bool {
        let (role, salary) = {
            let p = self.player(player_id);
            (p.role, p.salary)
        };
        if salary > self.team(team_id).budget {
            return false;
        }
        let team = self.team_mut(team_id);
        if let Some(incumbent) = team.roster.insert(role, player_id) {
            team.bench.push(incumbent);
        }
        team.budget -= salary;
        self.player_mut(player_id).team = Some(team_id);
        self.recompute_synergy(team_id);
        true
    }

    /// Install a founding player without the budget gate.
    ///
    /// League bootstrap pre-commits founding salaries; the gate in [`sign`]
    /// applies to in-simulation transfers only.
    ///
    /// [`sign`]: World::sign
    pub fn install_founding_player(&mut self, team_id: TeamId, player_id: PlayerId) {
        let role = self.player(player_id).role;
        let team = self.team_mut(team_id);
        if let Some(incumbent) = team.roster.insert(role, player_id) {
            team.bench.push(incumbent);
        }
        self.player_mut(player_id).team = Some(team_id);
        self.recompute_synergy(team_id);
    }

    /// Release a player from roster or bench, refunding half the salary.
    pub fn release(&mut self, team_id: TeamId, player_id: PlayerId) {
        let salary = self.player(player_id).salary;
        let team = self.team_mut(team_id);
        let in_roster = team.roster.values().any(|id| *id == player_id);
        if in_roster {
            team.roster.retain(|_, id| *id != player_id);
        } else {
            team.bench.retain(|id| *id != player_id);
        }
        team.budget += salary / 2;
        self.player_mut(player_id).team = None;
        self.recompute_synergy(team_id);
    }

    /// Apply one year of development to roster, bench and academy, then
    /// purge anyone who retired in the process. Retired players lose their
    /// team link — a retired player never holds a team.
    pub fn develop_roster(&mut self, team_id: TeamId, rng: &mut impl Rng) {
        let members: Vec<PlayerId> = {
            let team = self.team(team_id);
            team.starters()
                .chain(team.bench.iter().copied())
                .chain(team.academy.iter().copied())
                .collect()
        };
        for id in &members {
            self.player_mut(*id).develop_one_year(rng);
        }
        let retired: Vec<PlayerId> =
            members.into_iter().filter(|id| self.player(*id).retired).collect();
        if !retired.is_empty() {
            let team = self.team_mut(team_id);
            team.roster.retain(|_, id| !retired.contains(id));
            team.bench.retain(|id| !retired.contains(id));
            team.academy.retain(|id| !retired.contains(id));
            for id in &retired {
                self.player_mut(*id).team = None;
                log::debug!("{} retired during roster development", self.player(*id).name);
            }
            self.recompute_synergy(team_id);
        }
    }

    // ========================================================================
    // Ratings
    // ========================================================================

    /// Recompute the cached synergy once the roster is complete: over all
    /// unordered starter pairs, base 0.5, +0.1 for a Team Captain on either
    /// side, +0.15 for a Synergy Builder, normalized by the 10 pairs.
    pub fn recompute_synergy(&mut self, team_id: TeamId) {
        let starters = self.starters(team_id);
        if starters.len() < Role::ALL.len() {
            return;
        }
        let mut total = 0.0;
        for i in 0..starters.len() {
            for j in i + 1..starters.len() {
                let a = self.player(starters[i]);
                let b = self.player(starters[j]);
                let mut pair = BASELINE_SYNERGY;
                if a.traits.contains(&PlayerTrait::TeamCaptain)
                    || b.traits.contains(&PlayerTrait::TeamCaptain)
                {
                    pair += 0.1;
                }
                if a.traits.contains(&PlayerTrait::SynergyBuilder)
                    || b.traits.contains(&PlayerTrait::SynergyBuilder)
                {
                    pair += 0.15;
                }
                total += pair;
            }
        }
        self.team_mut(team_id).synergy = total / 10.0;
    }

    /// Team strength: zero for an incomplete roster, otherwise the starter
    /// overall mean plus the synergy bonus. Bench and academy never count.
    pub fn team_strength(&self, team_id: TeamId) -> f64 {
        let team = self.team(team_id);
        if !team.roster_complete() {
            return 0.0;
        }
        let total: f64 = team.starters().map(|id| self.player(id).overall).sum();
        total / Role::ALL.len() as f64 + team.synergy * 10.0
    }

    /// Logistic win probability; zero when either roster is incomplete.
    pub fn win_probability(&self, team_id: TeamId, opponent_id: TeamId) -> f64 {
        if !self.team(team_id).roster_complete() || !self.team(opponent_id).roster_complete() {
            return 0.0;
        }
        let diff = self.team_strength(team_id) - self.team_strength(opponent_id);
        1.0 / (1.0 + (-diff / 10.0).exp())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LeagueTier, Region};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng(seed: u64) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(seed)
    }

    fn team_with_roster(world: &mut World, rng: &mut ChaCha8Rng, budget: u32) -> TeamId {
        let team = world.add_team(Team::new("Unit", Region::Lck, LeagueTier::Champions, budget, "Coach"));
        for role in Role::ALL {
            let mut p = Player::generate(rng, format!("{role:?} starter"), role, 22);
            p.salary = 50_000;
            let id = world.add_player(p);
            world.install_founding_player(team, id);
        }
        team
    }

    #[test]
    fn strength_is_zero_until_roster_completes() {
        let mut r = rng(10);
        let mut world = World::new();
        let team = world.add_team(Team::new("Holes", Region::Lpl, LeagueTier::Champions, 1_000_000, "Coach"));
        for role in [Role::Top, Role::Jungle, Role::Mid, Role::Adc] {
            let p = Player::generate(&mut r, "p", role, 20);
            let id = world.add_player(p);
            world.install_founding_player(team, id);
            assert_eq!(world.team_strength(team), 0.0);
        }
        let p = Player::generate(&mut r, "p", Role::Support, 20);
        let id = world.add_player(p);
        world.install_founding_player(team, id);
        assert!(world.team_strength(team) > 0.0);
    }

    #[test]
    fn bench_players_do_not_move_strength() {
        let mut r = rng(11);
        let mut world = World::new();
        let team = team_with_roster(&mut world, &mut r, 1_000_000);
        let before = world.team_strength(team);
        let mut star = Player::generate(&mut r, "Benched Star", Role::Mid, 20);
        star.mechanical = 100.0;
        star.strategic = 100.0;
        star.soft_skill = 100.0;
        star.recalculate_overall();
        let id = world.add_player(star);
        world.team_mut(team).bench.push(id);
        assert_eq!(world.team_strength(team), before);
    }

    #[test]
    fn signing_over_an_occupied_role_benches_the_incumbent() {
        let mut r = rng(12);
        let mut world = World::new();
        let team = team_with_roster(&mut world, &mut r, 1_000_000);
        let incumbent = world.team(team).roster[&Role::Mid];

        let mut newcomer = Player::generate(&mut r, "Sixth Man", Role::Mid, 19);
        newcomer.salary = 100_000;
        let newcomer_id = world.add_player(newcomer);
        assert!(world.sign(team, newcomer_id));

        let team_ref = world.team(team);
        assert_eq!(team_ref.roster[&Role::Mid], newcomer_id);
        assert!(team_ref.bench.contains(&incumbent));
        assert!(!team_ref.roster.values().any(|id| *id == incumbent));
        assert_eq!(world.player(incumbent).team, Some(team));
    }

    #[test]
    fn signing_fails_when_salary_exceeds_budget() {
        let mut r = rng(13);
        let mut world = World::new();
        let team = team_with_roster(&mut world, &mut r, 10_000);
        let mut expensive = Player::generate(&mut r, "Too Rich", Role::Top, 24);
        expensive.salary = 50_000;
        let id = world.add_player(expensive);
        assert!(!world.sign(team, id));
        assert_eq!(world.player(id).team, None);
        assert_eq!(world.team(team).budget, 10_000);
    }

    #[test]
    fn release_refunds_half_salary_and_clears_team_link() {
        let mut r = rng(14);
        let mut world = World::new();
        let team = team_with_roster(&mut world, &mut r, 1_000_000);
        let starter = world.team(team).roster[&Role::Adc];
        let budget_before = world.team(team).budget;
        world.release(team, starter);
        assert_eq!(world.player(starter).team, None);
        assert_eq!(world.team(team).budget, budget_before + 25_000);
        assert!(!world.team(team).roster.contains_key(&Role::Adc));
    }

    #[test]
    fn develop_roster_purges_retirees_everywhere() {
        let mut r = rng(15);
        let mut world = World::new();
        let team = team_with_roster(&mut world, &mut r, 1_000_000);
        let mid = world.team(team).roster[&Role::Mid];
        world.player_mut(mid).age = 30;
        let mut old_sub = Player::generate(&mut r, "Old Sub", Role::Top, 30);
        old_sub.salary = 10_000;
        let sub_id = world.add_player(old_sub);
        world.team_mut(team).bench.push(sub_id);
        world.player_mut(sub_id).team = Some(team);

        world.develop_roster(team, &mut r);

        assert!(world.player(mid).retired);
        assert_eq!(world.player(mid).team, None);
        assert!(!world.team(team).roster.contains_key(&Role::Mid));
        assert!(world.player(sub_id).retired);
        assert!(!world.team(team).bench.contains(&sub_id));
    }

    #[test]
    fn win_probability_is_logistic_and_symmetric() {
        let mut r = rng(16);
        let mut world = World::new();
        let a = team_with_roster(&mut world, &mut r, 1_000_000);
        let b = team_with_roster(&mut world, &mut r, 1_000_000);
        let p_ab = world.win_probability(a, b);
        let p_ba = world.win_probability(b, a);
        assert!((p_ab + p_ba - 1.0).abs() < 1e-9);
        assert!(p_ab > 0.0 && p_ab < 1.0);
    }
}
