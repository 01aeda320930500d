//! Player trait catalog.
//!
//! Each trait carries a weight per skill axis; the weighted axis values are
//! added on top of the base rating when a player's overall is computed.
//! A handful of traits additionally act situationally: during match
//! performance sampling (Clutch/Consistent/Pressure-Resistant), during
//! development (Late Bloomer), and in team synergy (Team Captain /
//! Synergy Builder).

use serde::{Deserialize, Serialize};

/// Per-axis bonus weights applied against a player's current axis values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraitWeights {
    pub mechanical: f64,
    pub strategic: f64,
    pub soft_skill: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerTrait {
    ClutchPerformer,
    VisionMaster,
    LateBloomer,
    EarlyGameSpecialist,
    TeamCaptain,
    MechanicalProdigy,
    StrategicMind,
    VersatilePlayer,
    PressureResistant,
    RookieSensation,
    VeteranWisdom,
    LaneDominator,
    MacroGenius,
    ChampionSpecialist,
    ConsistentPerformer,
    CarryPotential,
    SupportAnchor,
    Shotcaller,
    Adaptable,
    InternationalExperience,
    SynergyBuilder,
    ClutchRookie,
    StrategicVeteran,
    EmotionalStability,
}

impl PlayerTrait {
    pub fn all() -> &'static [PlayerTrait] {
        use PlayerTrait::*;
        &[
            ClutchPerformer,
            VisionMaster,
            LateBloomer,
            EarlyGameSpecialist,
            TeamCaptain,
            MechanicalProdigy,
            StrategicMind,
            VersatilePlayer,
            PressureResistant,
            RookieSensation,
            VeteranWisdom,
            LaneDominator,
            MacroGenius,
            ChampionSpecialist,
            ConsistentPerformer,
            CarryPotential,
            SupportAnchor,
            Shotcaller,
            Adaptable,
            InternationalExperience,
            SynergyBuilder,
            ClutchRookie,
            StrategicVeteran,
            EmotionalStability,
        ]
    }

    pub fn display_name(&self) -> &'static str {
        use PlayerTrait::*;
        match self {
            ClutchPerformer => "Clutch Performer",
            VisionMaster => "Vision Master",
            LateBloomer => "Late Bloomer",
            EarlyGameSpecialist => "Early Game Specialist",
            TeamCaptain => "Team Captain",
            MechanicalProdigy => "Mechanical Prodigy",
            StrategicMind => "Strategic Mind",
            VersatilePlayer => "Versatile Player",
            PressureResistant => "Pressure Resistant",
            RookieSensation => "Rookie Sensation",
            VeteranWisdom => "Veteran Wisdom",
            LaneDominator => "Lane Dominator",
            MacroGenius => "Macro Genius",
            ChampionSpecialist => "Champion Specialist",
            ConsistentPerformer => "Consistent Performer",
            CarryPotential => "Carry Potential",
            SupportAnchor => "Support Anchor",
            Shotcaller => "Shotcaller",
            Adaptable => "Adaptable",
            InternationalExperience => "International Experience",
            SynergyBuilder => "Synergy Builder",
            ClutchRookie => "Clutch Rookie",
            StrategicVeteran => "Strategic Veteran",
            EmotionalStability => "Emotional Stability",
        }
    }

    /// Axis weights used by the overall-rating bonus.
    pub fn weights(&self) -> TraitWeights {
        use PlayerTrait::*;
        let (mechanical, strategic, soft_skill) = match self {
            ClutchPerformer => (0.15, 0.0, 0.1),
            VisionMaster => (0.0, 0.2, 0.05),
            LateBloomer => (0.1, 0.05, 0.15),
            EarlyGameSpecialist => (0.12, 0.08, 0.0),
            TeamCaptain => (0.05, 0.1, 0.2),
            MechanicalProdigy => (0.25, 0.0, 0.0),
            StrategicMind => (0.0, 0.25, 0.1),
            VersatilePlayer => (0.08, 0.08, 0.08),
            PressureResistant => (0.1, 0.05, 0.15),
            RookieSensation => (0.15, 0.0, 0.0),
            VeteranWisdom => (0.0, 0.15, 0.1),
            LaneDominator => (0.2, 0.0, 0.0),
            MacroGenius => (0.0, 0.2, 0.05),
            ChampionSpecialist => (0.18, 0.0, 0.0),
            ConsistentPerformer => (0.05, 0.1, 0.1),
            CarryPotential => (0.2, 0.0, 0.0),
            SupportAnchor => (0.0, 0.1, 0.15),
            Shotcaller => (0.0, 0.15, 0.1),
            Adaptable => (0.1, 0.1, 0.1),
            InternationalExperience => (0.05, 0.1, 0.15),
            SynergyBuilder => (0.0, 0.1, 0.2),
            ClutchRookie => (0.12, 0.0, 0.08),
            StrategicVeteran => (0.05, 0.2, 0.1),
            EmotionalStability => (0.0, 0.05, 0.2),
        };
        TraitWeights { mechanical, strategic, soft_skill }
    }
}
