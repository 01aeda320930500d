//! Team entity: region, league tier, the role-keyed starting roster, bench
//! and academy lists, budget and cached synergy.
//!
//! Roster mutation is the [`crate::world::World`]'s job — `sign`, `release`
//! and `develop_roster` live there so every removal funnels through one
//! owner. This module only holds the data shape and read-side helpers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::player::Role;
use super::stats::TeamStatistics;
use crate::world::PlayerId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Region {
    Lta,
    Lec,
    Lck,
    Lpl,
    Lcp,
}

impl Region {
    pub const ALL: [Region; 5] =
        [Region::Lta, Region::Lec, Region::Lck, Region::Lpl, Region::Lcp];

    pub fn display_name(&self) -> &'static str {
        match self {
            Region::Lta => "Americas",
            Region::Lec => "EMEA",
            Region::Lck => "Korea",
            Region::Lpl => "China",
            Region::Lcp => "Pacific",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Region::Lta => "LTA",
            Region::Lec => "LEC",
            Region::Lck => "LCK",
            Region::Lpl => "LPL",
            Region::Lcp => "LCP",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeagueTier {
    Champions,
    Challengers,
}

/// Synergy score before a full roster has ever been assembled.
pub const BASELINE_SYNERGY: f64 = 0.5;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    pub region: Region,
    pub tier: LeagueTier,
    /// One starter per role. Signing over an occupied role benches the
    /// incumbent.
    pub roster: BTreeMap<Role, PlayerId>,
    pub bench: Vec<PlayerId>,
    pub academy: Vec<PlayerId>,
    pub budget: u32,
    pub coach: String,
    /// Cached pairwise-trait synergy, recomputed on roster changes.
    pub synergy: f64,
    pub stats: TeamStatistics,
}

impl Team {
    pub fn new(name: impl Into<String>, region: Region, tier: LeagueTier, budget: u32, coach: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            region,
            tier,
            roster: BTreeMap::new(),
            bench: Vec::new(),
            academy: Vec::new(),
            budget,
            coach: coach.into(),
            synergy: BASELINE_SYNERGY,
            stats: TeamStatistics::default(),
        }
    }

    /// A team is complete iff it fields exactly one starter in every role.
    pub fn roster_complete(&self) -> bool {
        self.roster.len() == Role::ALL.len()
    }

    /// Starter ids in fixed role order.
    pub fn starters(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.roster.values().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roster_complete_requires_all_five_roles() {
        let mut team = Team::new("Test", Region::Lck, LeagueTier::Champions, 1_000_000, "Coach Kim");
        assert!(!team.roster_complete());
        for (i, role) in Role::ALL.into_iter().enumerate() {
            team.roster.insert(role, PlayerId(i as u32));
        }
        assert!(team.roster_complete());
    }

    #[test]
    fn starters_iterate_in_role_order() {
        let mut team = Team::new("Test", Region::Lec, LeagueTier::Challengers, 500_000, "Coach");
        team.roster.insert(Role::Support, PlayerId(4));
        team.roster.insert(Role::Top, PlayerId(0));
        team.roster.insert(Role::Mid, PlayerId(2));
        let ids: Vec<PlayerId> = team.starters().collect();
        assert_eq!(ids, vec![PlayerId(0), PlayerId(2), PlayerId(4)]);
    }
}
