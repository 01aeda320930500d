//! Regional league: double round-robin regular season, seeded playoff
//! bracket, promotion/relegation and split rollover.
//!
//! One split runs regular season -> playoffs -> (Summer only)
//! promotion/relegation -> rollover. Standings, match lists and the split
//! champion stay readable after `simulate_split` returns; they are cleared
//! when the next split begins, so the orchestrator and query surface can
//! consume them in between.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::engine::{simulate_match, MatchFormat, MatchResult};
use crate::error::{Result, SimError};
use crate::generators::NameGenerator;
use crate::models::{LeagueTier, Player, Region, Role, Team};
use crate::world::{TeamId, World};

/// Founding roster headcount targets mirror a typical professional league.
pub const DEFAULT_CHAMPIONS_TEAMS: usize = 10;
pub const DEFAULT_CHALLENGERS_TEAMS: usize = 8;
/// Teams exchanged between tiers at the end of the Summer split.
const TRANSFER_COUNT: usize = 2;
/// Champions-tier playoff bracket size.
const PLAYOFF_FIELD: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Split {
    Winter,
    Spring,
    Summer,
}

impl Split {
    pub const ALL: [Split; 3] = [Split::Winter, Split::Spring, Split::Summer];

    /// Next split, and whether the year rolls over.
    pub fn next(self) -> (Split, bool) {
        match self {
            Split::Winter => (Split::Spring, false),
            Split::Spring => (Split::Summer, false),
            Split::Summer => (Split::Winter, true),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Split::Winter => "WINTER",
            Split::Spring => "SPRING",
            Split::Summer => "SUMMER",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct LeagueRecord {
    pub wins: u32,
    pub losses: u32,
}

impl LeagueRecord {
    pub fn win_rate(&self) -> f64 {
        let total = self.wins + self.losses;
        if total == 0 {
            0.0
        } else {
            f64::from(self.wins) / f64::from(total)
        }
    }
}

/// Per-split feature switches resolved from the simulation settings.
#[derive(Debug, Clone, Copy)]
pub struct SplitOptions {
    pub promotion_relegation: bool,
    pub develop_players: bool,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self { promotion_relegation: true, develop_players: true }
    }
}

#[derive(Debug)]
pub struct RegionalLeague {
    region: Region,
    split: Split,
    year: u16,
    champions: Vec<TeamId>,
    challengers: Vec<TeamId>,
    records: BTreeMap<TeamId, LeagueRecord>,
    regular_season: Vec<MatchResult>,
    playoffs: Vec<MatchResult>,
    split_champion: Option<TeamId>,
    promoted: Vec<TeamId>,
    relegated: Vec<TeamId>,
}

impl RegionalLeague {
    /// Found a league: create both tiers with complete founding rosters.
    pub fn found(
        world: &mut World,
        names: &mut NameGenerator,
        rng: &mut impl Rng,
        region: Region,
        starting_year: u16,
        champions_count: usize,
        challengers_count: usize,
    ) -> Self {
        let mut league = Self {
            region,
            split: Split::Winter,
            year: starting_year,
            champions: Vec::with_capacity(champions_count),
            challengers: Vec::with_capacity(challengers_count),
            records: BTreeMap::new(),
            regular_season: Vec::new(),
            playoffs: Vec::new(),
            split_champion: None,
            promoted: Vec::new(),
            relegated: Vec::new(),
        };

        let orgs = regional_org_names(region);
        for i in 0..champions_count {
            let name = format!("{} {}", region.code(), orgs[i % orgs.len()]);
            let team = league.found_team(world, names, rng, name, LeagueTier::Champions);
            league.champions.push(team);
        }
        for i in 0..challengers_count {
            let name = format!("{} Challengers {}", region.code(), i + 1);
            let team = league.found_team(world, names, rng, name, LeagueTier::Challengers);
            league.challengers.push(team);
        }
        for id in league.champions.iter().chain(&league.challengers) {
            league.records.insert(*id, LeagueRecord::default());
        }
        log::info!(
            "founded {} league: {} Champions, {} Challengers teams",
            region.display_name(),
            champions_count,
            challengers_count
        );
        league
    }

    fn found_team(
        &self,
        world: &mut World,
        names: &mut NameGenerator,
        rng: &mut impl Rng,
        name: String,
        tier: LeagueTier,
    ) -> TeamId {
        let budget = 500_000 + rng.gen_range(0..1_000_000);
        let coach = names.coach_name(rng);
        let team = world.add_team(Team::new(name, self.region, tier, budget, coach));
        for role in Role::ALL {
            let player_name = names.player_name(rng);
            let player_age = rng.gen_range(18..28);
            let mut player = Player::generate(rng, player_name, role, player_age);
            player.salary = 50_000 + rng.gen_range(0..200_000);
            player.contract_years = rng.gen_range(1..=3);
            let player_id = world.add_player(player);
            world.install_founding_player(team, player_id);
        }
        team
    }

    /// Run one full split. See the module docs for the phase order.
    pub fn simulate_split(
        &mut self,
        world: &mut World,
        rng: &mut impl Rng,
        opts: SplitOptions,
    ) -> Result<()> {
        log::info!("{} {} {}: split begins", self.region.code(), self.split.label(), self.year);
        self.begin_split();
        self.simulate_regular_season(world, rng);
        self.simulate_playoffs(world, rng)?;
        if self.split == Split::Summer && opts.promotion_relegation {
            self.apply_promotion_relegation(world);
        }
        self.rollover(world, rng, opts.develop_players);
        Ok(())
    }

    /// Clear everything the previous split left behind for observers.
    fn begin_split(&mut self) {
        self.regular_season.clear();
        self.playoffs.clear();
        self.split_champion = None;
        self.promoted.clear();
        self.relegated.clear();
        for record in self.records.values_mut() {
            *record = LeagueRecord::default();
        }
    }

    fn simulate_regular_season(&mut self, world: &mut World, rng: &mut impl Rng) {
        for tier in [self.champions.clone(), self.challengers.clone()] {
            self.double_round_robin(world, rng, &tier);
        }
    }

    /// Every ordered pair meets exactly once: home and away, BO1.
    fn double_round_robin(&mut self, world: &mut World, rng: &mut impl Rng, teams: &[TeamId]) {
        for i in 0..teams.len() {
            for j in i + 1..teams.len() {
                self.fixture(world, rng, teams[i], teams[j]);
                self.fixture(world, rng, teams[j], teams[i]);
            }
        }
    }

    fn fixture(&mut self, world: &mut World, rng: &mut impl Rng, home: TeamId, away: TeamId) {
        match simulate_match(world, home, away, MatchFormat::Bo1, rng) {
            Ok(result) => {
                let loser = result.loser();
                if let Some(record) = self.records.get_mut(&result.winner) {
                    record.wins += 1;
                }
                if let Some(record) = self.records.get_mut(&loser) {
                    record.losses += 1;
                }
                let label = self.split.label();
                world.team_mut(result.winner).stats.record_split_result(label, true);
                world.team_mut(loser).stats.record_split_result(label, false);
                self.regular_season.push(result);
            }
            Err(err) => {
                log::warn!(
                    "skipping fixture {} vs {}: {err}",
                    world.team(home).name,
                    world.team(away).name
                );
            }
        }
    }

    /// Champions-tier playoffs: 3v6 and 4v5 BO3 semifinals, seeds 1 and 2
    /// meet the winners in BO5, then a BO5 grand final.
    fn simulate_playoffs(&mut self, world: &mut World, rng: &mut impl Rng) -> Result<()> {
        let seeds = self.ranked(world, &self.champions);
        if seeds.len() < PLAYOFF_FIELD {
            return Err(SimError::ShortField { needed: PLAYOFF_FIELD, found: seeds.len() });
        }

        let semi_a = self.playoff_match(world, rng, seeds[2], seeds[5], MatchFormat::Bo3)?;
        let semi_b = self.playoff_match(world, rng, seeds[3], seeds[4], MatchFormat::Bo3)?;
        let finalist_a = self.playoff_match(world, rng, seeds[0], semi_a, MatchFormat::Bo5)?;
        let finalist_b = self.playoff_match(world, rng, seeds[1], semi_b, MatchFormat::Bo5)?;
        let champion = self.playoff_match(world, rng, finalist_a, finalist_b, MatchFormat::Bo5)?;

        world.team_mut(champion).stats.championships_won += 1;
        self.split_champion = Some(champion);
        log::info!(
            "{} {} {}: {} take the split",
            self.region.code(),
            self.split.label(),
            self.year,
            world.team(champion).name
        );
        Ok(())
    }

    fn playoff_match(
        &mut self,
        world: &mut World,
        rng: &mut impl Rng,
        a: TeamId,
        b: TeamId,
        format: MatchFormat,
    ) -> Result<TeamId> {
        let result = simulate_match(world, a, b, format, rng)?;
        let winner = result.winner;
        self.playoffs.push(result);
        Ok(winner)
    }

    /// Bottom two Champions swap tiers with the top two Challengers.
    fn apply_promotion_relegation(&mut self, world: &mut World) {
        if self.champions.len() < TRANSFER_COUNT || self.challengers.len() < TRANSFER_COUNT {
            log::warn!(
                "{}: tiers too small for promotion/relegation, skipping",
                self.region.code()
            );
            return;
        }
        let champ_order = self.ranked(world, &self.champions);
        let relegated: Vec<TeamId> =
            champ_order[champ_order.len() - TRANSFER_COUNT..].to_vec();
        let promoted: Vec<TeamId> =
            self.ranked(world, &self.challengers)[..TRANSFER_COUNT].to_vec();

        for id in &relegated {
            self.champions.retain(|t| t != id);
            self.challengers.push(*id);
            world.team_mut(*id).tier = LeagueTier::Challengers;
            log::info!("{} relegated to Challengers", world.team(*id).name);
        }
        for id in &promoted {
            self.challengers.retain(|t| t != id);
            self.champions.push(*id);
            world.team_mut(*id).tier = LeagueTier::Champions;
            log::info!("{} promoted to Champions", world.team(*id).name);
        }
        self.relegated = relegated;
        self.promoted = promoted;
    }

    /// Advance the calendar and develop every roster one year.
    fn rollover(&mut self, world: &mut World, rng: &mut impl Rng, develop: bool) {
        let (next, year_wraps) = self.split.next();
        self.split = next;
        if year_wraps {
            self.year += 1;
        }
        if develop {
            for id in self.champions.clone().into_iter().chain(self.challengers.clone()) {
                world.develop_roster(id, rng);
            }
        }
    }

    /// Standings order: wins descending, strength descending, then stable
    /// insertion order.
    fn ranked(&self, world: &World, teams: &[TeamId]) -> Vec<TeamId> {
        let mut order = teams.to_vec();
        order.sort_by(|a, b| {
            let ra = self.records.get(a).copied().unwrap_or_default();
            let rb = self.records.get(b).copied().unwrap_or_default();
            rb.wins
                .cmp(&ra.wins)
                .then_with(|| world.team_strength(*b).total_cmp(&world.team_strength(*a)))
        });
        order
    }

    /// Champions-tier teams by raw strength, for international selection.
    pub fn top_teams_by_strength(&self, world: &World, n: usize) -> Vec<TeamId> {
        let mut order = self.champions.clone();
        order.sort_by(|a, b| world.team_strength(*b).total_cmp(&world.team_strength(*a)));
        order.truncate(n);
        order
    }

    pub fn standings(&self, world: &World, tier: LeagueTier) -> Vec<(TeamId, LeagueRecord)> {
        let teams = match tier {
            LeagueTier::Champions => &self.champions,
            LeagueTier::Challengers => &self.challengers,
        };
        self.ranked(world, teams)
            .into_iter()
            .map(|id| (id, self.records.get(&id).copied().unwrap_or_default()))
            .collect()
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn split(&self) -> Split {
        self.split
    }

    pub fn year(&self) -> u16 {
        self.year
    }

    pub fn champions(&self) -> &[TeamId] {
        &self.champions
    }

    pub fn challengers(&self) -> &[TeamId] {
        &self.challengers
    }

    pub fn split_champion(&self) -> Option<TeamId> {
        self.split_champion
    }

    pub fn promoted(&self) -> &[TeamId] {
        &self.promoted
    }

    pub fn relegated(&self) -> &[TeamId] {
        &self.relegated
    }

    pub fn regular_season_matches(&self) -> &[MatchResult] {
        &self.regular_season
    }

    pub fn playoff_matches(&self) -> &[MatchResult] {
        &self.playoffs
    }
}

fn regional_org_names(region: Region) -> &'static [&'static str] {
    match region {
        Region::Lta => &[
            "Cloud9", "Team Liquid", "TSM", "100 Thieves", "FlyQuest", "Evil Geniuses",
            "Dignitas", "Immortals", "CLG", "Golden Guardians",
        ],
        Region::Lec => &[
            "G2", "Fnatic", "MAD Lions", "Rogue", "Vitality", "BDS", "Excel", "Heretics",
            "Giants", "Astralis",
        ],
        Region::Lck => &[
            "T1", "Gen.G", "DRX", "KT Rolster", "Hanwha Life", "DPlus KIA", "Kwangdong Freecs",
            "Liiv SANDBOX", "Nongshim RedForce", "BRO",
        ],
        Region::Lpl => &[
            "JDG", "BLG", "WBG", "LNG", "TES", "EDG", "FPX", "IG", "RNG", "WE",
        ],
        Region::Lcp => &[
            "PSG Talon", "DetonationFocusMe", "ZETA Division", "Crazy Raccoon", "ORDER",
            "Chiefs", "Pentanet.GG", "Legacy", "Dire Wolves", "Peace",
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn setup(champions: usize, challengers: usize) -> (World, RegionalLeague, ChaCha8Rng) {
        let mut rng = ChaCha8Rng::seed_from_u64(31);
        let mut world = World::new();
        let mut names = NameGenerator::new();
        let league = RegionalLeague::found(
            &mut world,
            &mut names,
            &mut rng,
            Region::Lck,
            2024,
            champions,
            challengers,
        );
        (world, league, rng)
    }

    #[test]
    fn founding_produces_complete_rosters_in_both_tiers() {
        let (world, league, _) = setup(10, 8);
        assert_eq!(league.champions().len(), 10);
        assert_eq!(league.challengers().len(), 8);
        for id in league.champions().iter().chain(league.challengers()) {
            assert!(world.team(*id).roster_complete());
            assert!(world.team_strength(*id) > 0.0);
        }
    }

    #[test]
    fn regular_season_plays_every_ordered_pair_once() {
        let (mut world, mut league, mut rng) = setup(10, 8);
        league
            .simulate_split(&mut world, &mut rng, SplitOptions::default())
            .unwrap();
        // 10 Champions teams: 90 fixtures; 8 Challengers teams: 56 fixtures.
        assert_eq!(league.regular_season_matches().len(), 90 + 56);
        let total_games: u32 = league
            .standings(&world, LeagueTier::Champions)
            .iter()
            .map(|(_, r)| r.wins + r.losses)
            .sum();
        // Each of the 90 Champions fixtures contributes one win and one loss.
        assert_eq!(total_games, 180);
    }

    #[test]
    fn one_split_crowns_exactly_one_champion() {
        let (mut world, mut league, mut rng) = setup(10, 0);
        league
            .simulate_split(&mut world, &mut rng, SplitOptions::default())
            .unwrap();
        assert_eq!(league.regular_season_matches().len(), 90);
        let champion = league.split_champion().expect("playoffs produce a champion");
        assert!(league.champions().contains(&champion));
        assert_eq!(world.team(champion).stats.championships_won, 1);
        // Semis (2) + seeded BO5s (2) + grand final (1).
        assert_eq!(league.playoff_matches().len(), 5);
    }

    #[test]
    fn playoffs_need_six_teams() {
        let (mut world, mut league, mut rng) = setup(4, 0);
        let err = league
            .simulate_split(&mut world, &mut rng, SplitOptions::default())
            .unwrap_err();
        assert!(matches!(err, SimError::ShortField { needed: 6, found: 4 }));
    }

    #[test]
    fn summer_split_moves_two_teams_each_way() {
        let (mut world, mut league, mut rng) = setup(10, 8);
        // Winter, Spring: no transfers.
        for _ in 0..2 {
            league.simulate_split(&mut world, &mut rng, SplitOptions::default()).unwrap();
            assert!(league.promoted().is_empty());
            assert!(league.relegated().is_empty());
        }
        assert_eq!(league.split(), Split::Summer);
        league.simulate_split(&mut world, &mut rng, SplitOptions::default()).unwrap();

        assert_eq!(league.promoted().len(), 2);
        assert_eq!(league.relegated().len(), 2);
        assert_eq!(league.champions().len(), 10);
        assert_eq!(league.challengers().len(), 8);
        for id in league.promoted() {
            assert!(league.champions().contains(id));
            assert!(!league.challengers().contains(id));
            assert_eq!(world.team(*id).tier, LeagueTier::Champions);
        }
        for id in league.relegated() {
            assert!(league.challengers().contains(id));
            assert!(!league.champions().contains(id));
            assert_eq!(world.team(*id).tier, LeagueTier::Challengers);
        }
        // Summer rollover wraps the year.
        assert_eq!(league.year(), 2025);
        assert_eq!(league.split(), Split::Winter);
    }

    #[test]
    fn promotion_toggle_disables_transfers() {
        let (mut world, mut league, mut rng) = setup(10, 8);
        let opts = SplitOptions { promotion_relegation: false, develop_players: true };
        for _ in 0..3 {
            league.simulate_split(&mut world, &mut rng, opts).unwrap();
        }
        assert!(league.promoted().is_empty());
        assert!(league.relegated().is_empty());
    }

    #[test]
    fn development_toggle_freezes_ages() {
        let (mut world, mut league, mut rng) = setup(6, 0);
        let ages: Vec<u8> = league
            .champions()
            .iter()
            .flat_map(|id| world.starters(*id))
            .map(|id| world.player(id).age)
            .collect();
        let opts = SplitOptions { promotion_relegation: true, develop_players: false };
        league.simulate_split(&mut world, &mut rng, opts).unwrap();
        let after: Vec<u8> = league
            .champions()
            .iter()
            .flat_map(|id| world.starters(*id))
            .map(|id| world.player(id).age)
            .collect();
        assert_eq!(ages, after);
    }

    proptest::proptest! {
        #![proptest_config(proptest::prelude::ProptestConfig::with_cases(12))]

        /// A double round-robin over n teams always yields n*(n-1) fixtures.
        #[test]
        fn round_robin_fixture_count(n in 2usize..8, seed in 0u64..1_000) {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut world = World::new();
            let mut names = NameGenerator::new();
            let mut league = RegionalLeague::found(
                &mut world, &mut names, &mut rng, Region::Lpl, 2024, n, 0,
            );
            let teams = league.champions().to_vec();
            league.double_round_robin(&mut world, &mut rng, &teams);
            proptest::prop_assert_eq!(league.regular_season_matches().len(), n * (n - 1));
        }
    }

    #[test]
    fn standings_tiebreak_prefers_stronger_team() {
        let (world, league, _) = setup(10, 0);
        // Fresh league: all records 0-0, so order is purely strength.
        let table = league.standings(&world, LeagueTier::Champions);
        let strengths: Vec<f64> =
            table.iter().map(|(id, _)| world.team_strength(*id)).collect();
        for pair in strengths.windows(2) {
            assert!(pair[0] >= pair[1]);
        }
    }
}
