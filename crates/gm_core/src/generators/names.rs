//! Session-scoped name generation.
//!
//! Owned by the season manager, never a process-wide static, so concurrent
//! simulations in tests cannot observe each other's used-name sets. Player
//! names are unique per session; coach names may repeat.

use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

const FIRST_NAMES: [&str; 60] = [
    "Alex", "Jordan", "Casey", "Taylor", "Morgan", "Avery", "Riley", "Quinn", "Sage", "River",
    "Kai", "Rowan", "Phoenix", "Skyler", "Cameron", "Parker", "Emery", "Finley", "Hayden",
    "Peyton", "Blake", "Dana", "Jesse", "Kendall", "Logan", "Reese", "Remy", "Shiloh", "Tatum",
    "Teagan", "Echo", "Frost", "Hunter", "Jazz", "Knox", "Lark", "Mika", "Nova", "Orion", "Rain",
    "Scout", "Star", "Titan", "Vex", "Wave", "Zen", "Ace", "Bane", "Colt", "Dex", "Flux", "Ghost",
    "Hawk", "Ion", "Jet", "Koda", "Lynx", "Mage", "Nyx", "Zephyr",
];

const LAST_NAMES: [&str; 60] = [
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson", "Thomas", "Taylor",
    "Moore", "Jackson", "Martin", "Lee", "Perez", "Thompson", "White", "Harris", "Sanchez",
    "Clark", "Ramirez", "Lewis", "Robinson", "Walker", "Young", "Allen", "King", "Wright",
    "Scott", "Torres", "Nguyen", "Hill", "Flores", "Green", "Adams", "Nelson", "Baker", "Hall",
    "Rivera", "Campbell", "Mitchell", "Carter", "Roberts", "Kim", "Cox", "Ward", "Richardson",
    "Watson", "Brooks", "Chavez", "Wood", "James", "Chen",
];

const COACH_NAMES: [&str; 8] = [
    "Coach Kim", "Coach Johnson", "Coach Chen", "Coach Mueller", "Coach Silva", "Coach Petrov",
    "Coach Martinez", "Coach Wang",
];

/// How many fresh draws to attempt before falling back to a numbered suffix.
const MAX_DRAWS: u32 = 100;

#[derive(Debug, Default)]
pub struct NameGenerator {
    used: HashSet<String>,
}

impl NameGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw a session-unique player name.
    pub fn player_name(&mut self, rng: &mut impl Rng) -> String {
        for _ in 0..MAX_DRAWS {
            let first = FIRST_NAMES.choose(rng).copied().unwrap_or(FIRST_NAMES[0]);
            let last = LAST_NAMES.choose(rng).copied().unwrap_or(LAST_NAMES[0]);
            let name = format!("{first} {last}");
            if self.used.insert(name.clone()) {
                return name;
            }
        }
        // Pool saturated: disambiguate with a counter.
        let mut n = self.used.len();
        loop {
            let name = format!("{} {} {}", FIRST_NAMES[0], LAST_NAMES[0], n);
            if self.used.insert(name.clone()) {
                return name;
            }
            n += 1;
        }
    }

    pub fn coach_name(&self, rng: &mut impl Rng) -> String {
        COACH_NAMES.choose(rng).copied().unwrap_or(COACH_NAMES[0]).to_string()
    }

    pub fn used_count(&self) -> usize {
        self.used.len()
    }

    pub fn reset(&mut self) {
        self.used.clear();
    }
}
