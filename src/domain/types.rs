// ==========================================
// Vegetation Cut - domain value types
// ==========================================
// Machine / Period / CutStatus
// Persisted codes use SCREAMING_SNAKE_CASE (same as the database)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// Machine
// ==========================================
// Equipment used to cut an area. New variants must also get
// a code, an i18n key and a `FromStr` arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Machine {
    TractorMower, // Trator
    RotaryMower,  // Girozero
    Brushcutter,  // Roçadeira
}

impl Machine {
    pub const ALL: [Machine; 3] = [
        Machine::TractorMower,
        Machine::RotaryMower,
        Machine::Brushcutter,
    ];

    /// Translation key for operator-facing labels
    pub fn i18n_key(&self) -> &'static str {
        match self {
            Machine::TractorMower => "machine.tractor_mower",
            Machine::RotaryMower => "machine.rotary_mower",
            Machine::Brushcutter => "machine.brushcutter",
        }
    }
}

impl Default for Machine {
    fn default() -> Self {
        Machine::TractorMower
    }
}

impl fmt::Display for Machine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Machine::TractorMower => write!(f, "TRACTOR_MOWER"),
            Machine::RotaryMower => write!(f, "ROTARY_MOWER"),
            Machine::Brushcutter => write!(f, "BRUSHCUTTER"),
        }
    }
}

impl FromStr for Machine {
    type Err = String;

    /// Accepts the persisted codes and the legacy Portuguese labels
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "TRACTOR_MOWER" | "TRATOR" => Ok(Machine::TractorMower),
            "ROTARY_MOWER" | "GIROZERO" => Ok(Machine::RotaryMower),
            "BRUSHCUTTER" | "ROÇADEIRA" | "ROCADEIRA" => Ok(Machine::Brushcutter),
            other => Err(format!("unknown machine: {}", other)),
        }
    }
}

// ==========================================
// Period (rainy / dry)
// ==========================================
// Derived from the month of "now", never from the cut date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Period {
    Rainy,
    Dry,
}

impl Period {
    pub fn i18n_key(&self) -> &'static str {
        match self {
            Period::Rainy => "period.rainy",
            Period::Dry => "period.dry",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Rainy => write!(f, "RAINY"),
            Period::Dry => write!(f, "DRY"),
        }
    }
}

// ==========================================
// Cut status
// ==========================================
// Ordered so that `Overdue > OnSchedule`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CutStatus {
    OnSchedule, // Em dia
    Overdue,    // Vencido
}

impl CutStatus {
    pub fn is_overdue(&self) -> bool {
        matches!(self, CutStatus::Overdue)
    }

    pub fn i18n_key(&self) -> &'static str {
        match self {
            CutStatus::OnSchedule => "status.on_schedule",
            CutStatus::Overdue => "status.overdue",
        }
    }
}

impl fmt::Display for CutStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CutStatus::OnSchedule => write!(f, "ON_SCHEDULE"),
            CutStatus::Overdue => write!(f, "OVERDUE"),
        }
    }
}
