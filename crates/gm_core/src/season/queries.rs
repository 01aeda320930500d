//! Read-only snapshot queries for presentation-layer collaborators.
//!
//! Every snapshot is a plain serializable value detached from the entity
//! arenas; callers can hold them across advance calls without touching
//! simulation state.

use serde::Serialize;

use super::SeasonManager;
use crate::models::{LeagueTier, Region, Role};
use crate::world::PlayerId;

#[derive(Debug, Clone, Serialize)]
pub struct StandingsRow {
    pub team: String,
    pub wins: u32,
    pub losses: u32,
    pub win_rate: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerSummary {
    pub name: String,
    pub role: Role,
    pub age: u8,
    pub overall: f64,
    pub potential: f64,
    pub team: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamSnapshot {
    pub name: String,
    pub strength: f64,
    pub roster: Vec<PlayerSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TournamentSummary {
    pub name: String,
    pub year: u16,
    pub winner: Option<String>,
    pub participant_count: usize,
}

impl SeasonManager {
    fn player_summary(&self, id: PlayerId) -> PlayerSummary {
        let player = self.world().player(id);
        PlayerSummary {
            name: player.name.clone(),
            role: player.role,
            age: player.age,
            overall: player.overall,
            potential: player.potential,
            team: player.team.map(|t| self.world().team(t).name.clone()),
        }
    }

    /// Last completed split's table for one tier of a region.
    pub fn standings(&self, region: Region, tier: LeagueTier) -> Vec<StandingsRow> {
        let Some(league) = self.league(region) else {
            return Vec::new();
        };
        league
            .standings(self.world(), tier)
            .into_iter()
            .map(|(id, record)| StandingsRow {
                team: self.world().team(id).name.clone(),
                wins: record.wins,
                losses: record.losses,
                win_rate: record.win_rate(),
            })
            .collect()
    }

    /// Top `n` Champions-tier players of a region by overall rating.
    pub fn top_players(&self, region: Region, n: usize) -> Vec<PlayerSummary> {
        let Some(league) = self.league(region) else {
            return Vec::new();
        };
        let mut ids: Vec<PlayerId> = league
            .champions()
            .iter()
            .flat_map(|team| self.world().starters(*team))
            .collect();
        ids.sort_by(|a, b| {
            self.world().player(*b).overall.total_cmp(&self.world().player(*a).overall)
        });
        ids.truncate(n);
        ids.into_iter().map(|id| self.player_summary(id)).collect()
    }

    /// Champions-tier rosters of a region with their current strength.
    pub fn champions_rosters(&self, region: Region) -> Vec<TeamSnapshot> {
        let Some(league) = self.league(region) else {
            return Vec::new();
        };
        league
            .champions()
            .iter()
            .map(|id| {
                let team = self.world().team(*id);
                TeamSnapshot {
                    name: team.name.clone(),
                    strength: self.world().team_strength(*id),
                    roster: team.starters().map(|p| self.player_summary(p)).collect(),
                }
            })
            .collect()
    }

    /// Every archived international tournament, oldest first.
    pub fn tournament_history(&self) -> Vec<TournamentSummary> {
        self.tournament_records()
            .iter()
            .map(|record| TournamentSummary {
                name: record.name.clone(),
                year: record.year,
                winner: record.winner.map(|id| self.world().team(id).name.clone()),
                participant_count: record.participant_count,
            })
            .collect()
    }

    pub fn free_agents(&self) -> Vec<PlayerSummary> {
        self.free_agent_ids().iter().map(|id| self.player_summary(*id)).collect()
    }

    pub fn all_star_roster(&self, region: Region) -> Vec<PlayerSummary> {
        self.all_star_ids(region).iter().map(|id| self.player_summary(*id)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::season::SimConfig;

    #[test]
    fn snapshots_reflect_the_completed_split() {
        let mut m = SeasonManager::new(SimConfig { seed: 7, ..SimConfig::default() });
        // Keep tier membership fixed so every Champions team shows a full
        // 18-game Summer record.
        m.set_promotion_relegation(false);
        m.start_simulation().unwrap();

        let table = m.standings(Region::Lec, LeagueTier::Champions);
        assert_eq!(table.len(), 10);
        // 18 matches per team in a 10-team double round-robin.
        for row in &table {
            assert_eq!(row.wins + row.losses, 18);
            assert!((row.win_rate - f64::from(row.wins) / 18.0).abs() < 1e-9);
        }
        // Table is sorted by wins.
        for pair in table.windows(2) {
            assert!(pair[0].wins >= pair[1].wins);
        }

        let top = m.top_players(Region::Lec, 3);
        assert_eq!(top.len(), 3);
        assert!(top[0].overall >= top[1].overall);
        assert!(top.iter().all(|p| p.team.is_some()));

        let rosters = m.champions_rosters(Region::Lec);
        assert_eq!(rosters.len(), 10);
        for snapshot in &rosters {
            assert_eq!(snapshot.roster.len(), 5);
            assert!(snapshot.strength > 0.0);
        }

        let history = m.tournament_history();
        assert_eq!(history.len(), 2);
        assert!(history.iter().all(|t| t.winner.is_some()));

        assert!(!m.free_agents().is_empty());
        assert_eq!(m.all_star_roster(Region::Lec).len(), 5);
    }

    #[test]
    fn snapshots_serialize_for_external_consumers() {
        let mut m = SeasonManager::new(SimConfig { seed: 8, ..SimConfig::default() });
        m.start_simulation().unwrap();
        let json = serde_json::to_value(m.standings(Region::Lck, LeagueTier::Challengers)).unwrap();
        assert!(json.as_array().is_some_and(|rows| rows.len() == 8));
        let json = serde_json::to_value(m.tournament_history()).unwrap();
        assert!(json[0]["name"].is_string());
    }
}
