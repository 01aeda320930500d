//! Cumulative career statistics for players and teams.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerStatistics {
    pub games_played: u32,
    pub wins: u32,
    pub losses: u32,
    pub average_performance: f64,
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    pub kda: f64,
    pub mvp_awards: u32,
    pub international_appearances: u32,
}

impl PlayerStatistics {
    pub fn record_game(&mut self, won: bool, performance: f64, kills: u32, deaths: u32, assists: u32) {
        self.games_played += 1;
        if won {
            self.wins += 1;
        } else {
            self.losses += 1;
        }
        let n = f64::from(self.games_played);
        self.average_performance = (self.average_performance * (n - 1.0) + performance) / n;
        self.kills += kills;
        self.deaths += deaths;
        self.assists += assists;
        self.kda = if self.deaths == 0 {
            f64::from(self.kills + self.assists)
        } else {
            f64::from(self.kills + self.assists) / f64::from(self.deaths)
        };
    }

    pub fn win_rate(&self) -> f64 {
        if self.games_played == 0 {
            0.0
        } else {
            f64::from(self.wins) / f64::from(self.games_played)
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SplitRecord {
    pub wins: u32,
    pub losses: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeamStatistics {
    pub matches_played: u32,
    pub wins: u32,
    pub losses: u32,
    /// Keyed by split label, e.g. "WINTER".
    pub split_records: BTreeMap<String, SplitRecord>,
    pub championships_won: u32,
    pub international_appearances: u32,
    pub average_game_duration: f64,
    pub total_kills: u32,
    pub total_deaths: u32,
    pub kill_death_ratio: f64,
}

impl TeamStatistics {
    pub fn record_match(&mut self, won: bool, avg_game_duration: f64, kills: u32, deaths: u32) {
        self.matches_played += 1;
        if won {
            self.wins += 1;
        } else {
            self.losses += 1;
        }
        let n = f64::from(self.matches_played);
        self.average_game_duration =
            (self.average_game_duration * (n - 1.0) + avg_game_duration) / n;
        self.total_kills += kills;
        self.total_deaths += deaths;
        self.kill_death_ratio = if self.total_deaths == 0 {
            f64::from(self.total_kills)
        } else {
            f64::from(self.total_kills) / f64::from(self.total_deaths)
        };
    }

    pub fn record_split_result(&mut self, split: &str, won: bool) {
        let entry = self.split_records.entry(split.to_string()).or_default();
        if won {
            entry.wins += 1;
        } else {
            entry.losses += 1;
        }
    }

    pub fn win_rate(&self) -> f64 {
        if self.matches_played == 0 {
            0.0
        } else {
            f64::from(self.wins) / f64::from(self.matches_played)
        }
    }
}
