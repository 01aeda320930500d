//! Season orchestration.
//!
//! `SeasonManager` drives the year -> split -> (regional leagues,
//! international tournaments, all-star selection, free agency) cycle and
//! owns everything with cross-region lifetime: the entity world, the
//! free-agent pool, the name generator, tournament history and the session
//! RNG. One call advances at most one year; there is no internal loop.

mod queries;
mod settings;

pub use queries::{PlayerSummary, StandingsRow, TeamSnapshot, TournamentSummary};
pub use settings::{SimConfig, SimulationSettings};

use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::Result;
use crate::generators::NameGenerator;
use crate::league::{RegionalLeague, Split, SplitOptions};
use crate::models::{Player, Region, Role};
use crate::rng::SessionRng;
use crate::tournament::{SwissTournament, TournamentFormat, TournamentKind};
use crate::world::{PlayerId, TeamId, World};

const MSI_ROUNDS: u32 = 3;
const WORLDS_ROUNDS: u32 = 5;
const WORLDS_TEAMS_PER_REGION: usize = 3;

/// Archived summary of a finished international tournament.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TournamentRecord {
    pub name: String,
    pub kind: TournamentKind,
    pub year: u16,
    pub winner: Option<TeamId>,
    pub participant_count: usize,
}

/// One completed year at a glance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearBook {
    pub year: u16,
    pub regional_champions: Vec<(Region, TeamId)>,
    pub msi_champion: Option<TeamId>,
    pub worlds_champion: Option<TeamId>,
}

#[derive(Debug)]
pub struct SeasonManager {
    world: World,
    leagues: Vec<RegionalLeague>,
    free_agents: Vec<PlayerId>,
    tournament_history: Vec<TournamentRecord>,
    all_stars: BTreeMap<Region, Vec<PlayerId>>,
    year_books: Vec<YearBook>,
    names: NameGenerator,
    settings: SimulationSettings,
    year: u16,
    split: Split,
    running: bool,
    rng: SessionRng,
}

impl SeasonManager {
    pub fn new(config: SimConfig) -> Self {
        let mut rng = SessionRng::seed_from_u64(config.seed);
        let mut world = World::new();
        let mut names = NameGenerator::new();
        let leagues = Region::ALL
            .into_iter()
            .map(|region| {
                RegionalLeague::found(
                    &mut world,
                    &mut names,
                    &mut rng,
                    region,
                    config.starting_year,
                    config.champions_per_region,
                    config.challengers_per_region,
                )
            })
            .collect();
        log::info!(
            "circuit initialized: {} regions, starting year {}",
            Region::ALL.len(),
            config.starting_year
        );
        Self {
            world,
            leagues,
            free_agents: Vec::new(),
            tournament_history: Vec::new(),
            all_stars: BTreeMap::new(),
            year_books: Vec::new(),
            names,
            settings: SimulationSettings::default(),
            year: config.starting_year,
            split: Split::Winter,
            running: false,
            rng,
        }
    }

    // ========================================================================
    // Control surface
    // ========================================================================

    /// Begin the simulation and play one year. With auto-advance enabled the
    /// session stays running and further years come from [`advance_year`];
    /// otherwise it halts after this one. No-op if already running.
    ///
    /// [`advance_year`]: SeasonManager::advance_year
    pub fn start_simulation(&mut self) -> Result<()> {
        if self.running {
            log::debug!("start ignored: simulation already running");
            return Ok(());
        }
        self.running = true;
        self.simulate_year()?;
        if !self.settings.auto_advance {
            self.running = false;
        }
        Ok(())
    }

    /// Play one more year. No-op unless the simulation is running.
    pub fn advance_year(&mut self) -> Result<()> {
        if !self.running {
            log::debug!("advance ignored: simulation not running");
            return Ok(());
        }
        self.simulate_year()
    }

    pub fn pause_simulation(&mut self) {
        self.running = false;
    }

    pub fn resume_simulation(&mut self) {
        self.running = true;
    }

    pub fn set_simulation_speed(&mut self, speed: u32) {
        self.settings.simulation_speed = speed;
    }

    pub fn set_auto_advance(&mut self, enabled: bool) {
        self.settings.auto_advance = enabled;
    }

    pub fn set_promotion_relegation(&mut self, enabled: bool) {
        self.settings.promotion_relegation = enabled;
    }

    pub fn set_international_tournaments(&mut self, enabled: bool) {
        self.settings.international_tournaments = enabled;
    }

    pub fn set_all_star_events(&mut self, enabled: bool) {
        self.settings.all_star_events = enabled;
    }

    pub fn set_player_development(&mut self, enabled: bool) {
        self.settings.player_development = enabled;
    }

    pub fn settings(&self) -> &SimulationSettings {
        &self.settings
    }

    // ========================================================================
    // Year cycle
    // ========================================================================

    fn simulate_year(&mut self) -> Result<()> {
        log::info!("=== year {} ===", self.year);
        for split in Split::ALL {
            self.split = split;
            let opts = SplitOptions {
                promotion_relegation: self.settings.promotion_relegation,
                develop_players: self.settings.player_development,
            };
            for league in self.leagues.iter_mut() {
                league.simulate_split(&mut self.world, &mut self.rng, opts)?;
            }
            if self.settings.international_tournaments {
                match split {
                    Split::Spring => self.run_msi()?,
                    Split::Summer => self.run_worlds()?,
                    Split::Winter => {}
                }
            }
            if split == Split::Winter && self.settings.all_star_events {
                self.select_all_stars();
            }
            self.purge_signed_free_agents();
        }
        self.end_of_year();
        self.year += 1;
        Ok(())
    }

    /// MSI: each region's Spring champion, Swiss over three rounds.
    fn run_msi(&mut self) -> Result<()> {
        let mut tournament =
            SwissTournament::new(format!("MSI {}", self.year), TournamentKind::Msi, MSI_ROUNDS);
        for league in &self.leagues {
            match league.split_champion() {
                Some(champion) => {
                    tournament.add_participant(champion);
                    self.world.team_mut(champion).stats.international_appearances += 1;
                }
                None => log::warn!(
                    "{}: no Spring champion available for MSI",
                    league.region().code()
                ),
            }
        }
        tournament.simulate_to_completion(&mut self.world, &mut self.rng)?;
        self.archive_tournament(tournament);
        Ok(())
    }

    /// Worlds: top three Champions teams per region by strength, Swiss over
    /// five rounds; the winner is credited a championship.
    fn run_worlds(&mut self) -> Result<()> {
        let mut tournament = SwissTournament::new(
            format!("Worlds {}", self.year),
            TournamentKind::Worlds,
            WORLDS_ROUNDS,
        );
        for league in &self.leagues {
            for team in league.top_teams_by_strength(&self.world, WORLDS_TEAMS_PER_REGION) {
                tournament.add_participant(team);
                self.world.team_mut(team).stats.international_appearances += 1;
            }
        }
        tournament.simulate_to_completion(&mut self.world, &mut self.rng)?;
        if let Some(champion) = tournament.winner() {
            self.world.team_mut(champion).stats.championships_won += 1;
        }
        self.archive_tournament(tournament);
        Ok(())
    }

    fn archive_tournament(&mut self, tournament: SwissTournament) {
        if let Some(winner) = tournament.winner() {
            log::info!("{}: {} win", tournament.name(), self.world.team(winner).name);
        }
        self.tournament_history.push(TournamentRecord {
            name: tournament.name().to_string(),
            kind: tournament.kind(),
            year: self.year,
            winner: tournament.winner(),
            participant_count: tournament.participants().len(),
        });
    }

    /// Best Champions-tier player per role, per region.
    fn select_all_stars(&mut self) {
        for league in &self.leagues {
            let mut best: BTreeMap<Role, (PlayerId, f64)> = BTreeMap::new();
            for team in league.champions() {
                for (role, player_id) in &self.world.team(*team).roster {
                    let overall = self.world.player(*player_id).overall;
                    let replace = best.get(role).map_or(true, |(_, top)| overall > *top);
                    if replace {
                        best.insert(*role, (*player_id, overall));
                    }
                }
            }
            let roster: Vec<PlayerId> =
                Role::ALL.iter().filter_map(|r| best.get(r).map(|(id, _)| *id)).collect();
            log::info!(
                "{} all-stars selected: {} players",
                league.region().display_name(),
                roster.len()
            );
            self.all_stars.insert(league.region(), roster);
        }
    }

    fn end_of_year(&mut self) {
        self.sweep_retirees();
        self.generate_rookies();
        self.process_contracts();
        self.purge_signed_free_agents();
        self.record_year_book();
    }

    fn all_league_teams(&self) -> Vec<TeamId> {
        self.leagues
            .iter()
            .flat_map(|l| l.champions().iter().chain(l.challengers()).copied())
            .collect()
    }

    /// Release any retiree still attached to a team. Roster development
    /// already purges most of them at split rollovers; this is the year-end
    /// safety net.
    fn sweep_retirees(&mut self) {
        let mut to_release: Vec<(TeamId, PlayerId)> = Vec::new();
        for team_id in self.all_league_teams() {
            let team = self.world.team(team_id);
            for player_id in team.starters().chain(team.bench.iter().copied()) {
                if self.world.player(player_id).retired {
                    to_release.push((team_id, player_id));
                }
            }
        }
        for (team_id, player_id) in to_release {
            self.world.release(team_id, player_id);
            log::info!(
                "{} has retired from professional play",
                self.world.player(player_id).name
            );
        }
    }

    /// 10-30 rookies per region, ages 16-18, into the free-agent pool.
    fn generate_rookies(&mut self) {
        let mut generated = 0usize;
        for _region in Region::ALL {
            let count = self.rng.gen_range(10..30);
            for _ in 0..count {
                let role = Role::ALL[self.rng.gen_range(0..Role::ALL.len())];
                let age = self.rng.gen_range(16..19);
                let name = self.names.player_name(&mut self.rng);
                let mut rookie = Player::generate(&mut self.rng, name, role, age);
                // Rookies come cheap.
                rookie.salary = 20_000 + self.rng.gen_range(0..50_000);
                rookie.contract_years = self.rng.gen_range(1..=2);
                let id = self.world.add_player(rookie);
                self.free_agents.push(id);
                generated += 1;
            }
        }
        log::info!("generated {generated} rookie players");
    }

    /// Decrement every signed player's contract; expired contracts release
    /// into free agency.
    fn process_contracts(&mut self) {
        let mut expired: Vec<(TeamId, PlayerId)> = Vec::new();
        for team_id in self.all_league_teams() {
            let team = self.world.team(team_id);
            let members: Vec<PlayerId> =
                team.starters().chain(team.bench.iter().copied()).collect();
            for player_id in members {
                let player = self.world.player_mut(player_id);
                player.contract_years = player.contract_years.saturating_sub(1);
                if player.contract_years == 0 {
                    expired.push((team_id, player_id));
                }
            }
        }
        for (team_id, player_id) in expired {
            self.world.release(team_id, player_id);
            self.free_agents.push(player_id);
            log::debug!(
                "{} enters free agency on an expired contract",
                self.world.player(player_id).name
            );
        }
    }

    fn purge_signed_free_agents(&mut self) {
        let world = &self.world;
        self.free_agents.retain(|id| world.player(*id).team.is_none());
    }

    fn record_year_book(&mut self) {
        let regional_champions: Vec<(Region, TeamId)> = self
            .leagues
            .iter()
            .filter_map(|l| l.split_champion().map(|c| (l.region(), c)))
            .collect();
        let champion_of = |history: &[TournamentRecord], kind: TournamentKind, year: u16| {
            history.iter().find(|t| t.kind == kind && t.year == year).and_then(|t| t.winner)
        };
        let msi_champion = champion_of(&self.tournament_history, TournamentKind::Msi, self.year);
        let worlds_champion =
            champion_of(&self.tournament_history, TournamentKind::Worlds, self.year);
        self.year_books.push(YearBook {
            year: self.year,
            regional_champions,
            msi_champion,
            worlds_champion,
        });
    }

    // ========================================================================
    // Raw accessors (snapshot queries live in `queries`)
    // ========================================================================

    pub fn current_year(&self) -> u16 {
        self.year
    }

    pub fn current_split(&self) -> Split {
        self.split
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn leagues(&self) -> &[RegionalLeague] {
        &self.leagues
    }

    pub fn league(&self, region: Region) -> Option<&RegionalLeague> {
        self.leagues.iter().find(|l| l.region() == region)
    }

    pub fn free_agent_ids(&self) -> &[PlayerId] {
        &self.free_agents
    }

    pub fn tournament_records(&self) -> &[TournamentRecord] {
        &self.tournament_history
    }

    pub fn year_books(&self) -> &[YearBook] {
        &self.year_books
    }

    pub fn all_star_ids(&self, region: Region) -> &[PlayerId] {
        self.all_stars.get(&region).map_or(&[], Vec::as_slice)
    }
}
