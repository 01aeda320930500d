//! Player entity: attribute generation, yearly development, match
//! performance sampling.
//!
//! Skill is modeled on three latent axes (mechanical, strategic, soft skill)
//! in [30,100]. `overall` is derived from the axes plus trait bonuses;
//! `potential` projects the ceiling for young players. Generation inputs are
//! not validated — the curve math tolerates any age.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::stats::PlayerStatistics;
use super::traits::PlayerTrait;
use crate::rng::gaussian;
use crate::world::TeamId;

/// Shared standard deviation of the axis distributions.
const AXIS_STDDEV: f64 = 15.0;
const AXIS_MIN: f64 = 30.0;
const AXIS_MAX: f64 = 100.0;
/// Players retire once they reach this age.
pub const RETIREMENT_AGE: u8 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Top,
    Jungle,
    Mid,
    Adc,
    Support,
}

impl Role {
    pub const ALL: [Role; 5] = [Role::Top, Role::Jungle, Role::Mid, Role::Adc, Role::Support];

    /// Gaussian means for (mechanical, strategic, soft skill) per role.
    fn axis_means(&self) -> (f64, f64, f64) {
        match self {
            Role::Top => (65.0, 60.0, 55.0),
            Role::Jungle => (60.0, 70.0, 65.0),
            Role::Mid => (70.0, 65.0, 60.0),
            Role::Adc => (75.0, 55.0, 50.0),
            Role::Support => (50.0, 65.0, 75.0),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Top => "TOP",
            Role::Jungle => "JUNGLE",
            Role::Mid => "MID",
            Role::Adc => "ADC",
            Role::Support => "SUPPORT",
        }
    }
}

/// Development curve fixed at creation time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DevelopmentCurve {
    pub peak_age: f64,
    pub growth_rate: f64,
    pub decline_rate: f64,
}

impl DevelopmentCurve {
    fn draw(rng: &mut impl Rng) -> Self {
        Self {
            peak_age: gaussian(rng, 22.0, 2.0),
            growth_rate: gaussian(rng, 0.05, 0.02),
            decline_rate: gaussian(rng, 0.02, 0.01),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub role: Role,
    pub age: u8,
    pub mechanical: f64,
    pub strategic: f64,
    pub soft_skill: f64,
    pub overall: f64,
    pub potential: f64,
    pub traits: Vec<PlayerTrait>,
    pub curve: DevelopmentCurve,
    pub salary: u32,
    pub contract_years: u8,
    /// `None` while the player sits in the free-agent pool.
    pub team: Option<TeamId>,
    pub retired: bool,
    pub stats: PlayerStatistics,
}

fn clamp_axis(v: f64) -> f64 {
    v.clamp(AXIS_MIN, AXIS_MAX)
}

impl Player {
    /// Roll a fresh player: role-biased axes, 0-2 distinct traits, a
    /// development curve, and the derived overall/potential ratings.
    pub fn generate(rng: &mut impl Rng, name: impl Into<String>, role: Role, age: u8) -> Self {
        let (m, s, ss) = role.axis_means();
        let mechanical = clamp_axis(gaussian(rng, m, AXIS_STDDEV));
        let strategic = clamp_axis(gaussian(rng, s, AXIS_STDDEV));
        let soft_skill = clamp_axis(gaussian(rng, ss, AXIS_STDDEV));

        let trait_count = rng.gen_range(0..=2);
        let traits: Vec<PlayerTrait> =
            PlayerTrait::all().choose_multiple(rng, trait_count).copied().collect();

        let mut player = Self {
            name: name.into(),
            role,
            age,
            mechanical,
            strategic,
            soft_skill,
            overall: 0.0,
            potential: 0.0,
            traits,
            curve: DevelopmentCurve::draw(rng),
            salary: 0,
            contract_years: 0,
            team: None,
            retired: false,
            stats: PlayerStatistics::default(),
        };
        player.recalculate_overall();
        let youth = ((30.0 - f64::from(age)) / 14.0).max(0.0);
        player.potential = (player.overall + gaussian(rng, 0.0, 10.0) * youth).min(100.0);
        player
    }

    /// Overall = mean of the axes plus the weighted trait bonuses, in [0,100].
    pub fn recalculate_overall(&mut self) {
        let base = (self.mechanical + self.strategic + self.soft_skill) / 3.0;
        let bonus: f64 = self
            .traits
            .iter()
            .map(|t| {
                let w = t.weights();
                w.mechanical * self.mechanical
                    + w.strategic * self.strategic
                    + w.soft_skill * self.soft_skill
            })
            .sum();
        self.overall = (base + bonus).clamp(0.0, 100.0);
    }

    /// Advance the career by one year.
    ///
    /// At [`RETIREMENT_AGE`] the player retires instead of developing; a
    /// retired player's ratings are frozen for good. Below the peak the
    /// growth factor ramps down linearly; past it the decline is quadratic
    /// in the distance from the peak.
    pub fn develop_one_year(&mut self, rng: &mut impl Rng) {
        if self.retired {
            return;
        }
        if self.age >= RETIREMENT_AGE {
            self.retired = true;
            return;
        }
        self.age += 1;

        let age = f64::from(self.age);
        let factor = if age <= self.curve.peak_age {
            self.curve.growth_rate * (1.0 - age / self.curve.peak_age)
        } else {
            -self.curve.decline_rate * ((age - self.curve.peak_age) / 5.0).powi(2)
        };

        self.mechanical = clamp_axis(self.mechanical + factor * 10.0 + gaussian(rng, 0.0, 2.0));
        self.strategic = clamp_axis(self.strategic + factor * 10.0 + gaussian(rng, 0.0, 2.0));
        self.soft_skill = clamp_axis(self.soft_skill + factor * 10.0 + gaussian(rng, 0.0, 2.0));
        self.recalculate_overall();

        if self.traits.contains(&PlayerTrait::LateBloomer) && self.age > 25 {
            self.mechanical = clamp_axis(self.mechanical + 2.0);
            self.strategic = clamp_axis(self.strategic + 2.0);
            self.soft_skill = clamp_axis(self.soft_skill + 2.0);
            self.recalculate_overall();
        }
    }

    /// Sample a single-game performance value, capped at 100.
    ///
    /// Deliberately non-idempotent: the Gaussian noise term models
    /// game-to-game variance.
    pub fn match_performance(&self, rng: &mut impl Rng) -> f64 {
        let mut perf = self.overall;
        for t in &self.traits {
            match t {
                PlayerTrait::ClutchPerformer if rng.gen_bool(0.3) => perf *= 1.2,
                PlayerTrait::ConsistentPerformer => perf *= 1.1,
                PlayerTrait::PressureResistant => perf *= 1.05,
                _ => {}
            }
        }
        (perf + gaussian(rng, 0.0, AXIS_STDDEV)).min(100.0)
    }
}
