//! Production entity type - units assembled per day and shift

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::entity::Record;

/// Day of the production week
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Segunda,
    Terca,
    Quarta,
    Quinta,
    Sexta,
    Sabado,
    Domingo,
}

/// Work shift
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shift {
    Manha,
    Tarde,
    Noite,
}

#[derive(Debug, Error)]
pub enum ParseScheduleError {
    #[error("Unknown day '{0}'. Use segunda, terca, quarta, quinta, sexta, sabado or domingo")]
    Day(String),

    #[error("Unknown shift '{0}'. Use manha, tarde or noite")]
    Shift(String),
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Segunda,
        Weekday::Terca,
        Weekday::Quarta,
        Weekday::Quinta,
        Weekday::Sexta,
        Weekday::Sabado,
        Weekday::Domingo,
    ];
}

impl Shift {
    pub const ALL: [Shift; 3] = [Shift::Manha, Shift::Tarde, Shift::Noite];
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Weekday::Segunda => write!(f, "Segunda"),
            Weekday::Terca => write!(f, "Terça"),
            Weekday::Quarta => write!(f, "Quarta"),
            Weekday::Quinta => write!(f, "Quinta"),
            Weekday::Sexta => write!(f, "Sexta"),
            Weekday::Sabado => write!(f, "Sábado"),
            Weekday::Domingo => write!(f, "Domingo"),
        }
    }
}

impl std::fmt::Display for Shift {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Shift::Manha => write!(f, "Manhã"),
            Shift::Tarde => write!(f, "Tarde"),
            Shift::Noite => write!(f, "Noite"),
        }
    }
}

/// Lowercase and strip the accents used in day and shift names
fn fold(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'á' | 'ã' | 'â' => 'a',
            'ç' => 'c',
            other => other,
        })
        .collect()
}

impl std::str::FromStr for Weekday {
    type Err = ParseScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded = fold(s);
        Weekday::ALL
            .into_iter()
            .find(|d| fold(&d.to_string()) == folded)
            .ok_or_else(|| ParseScheduleError::Day(s.to_string()))
    }
}

impl std::str::FromStr for Shift {
    type Err = ParseScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded = fold(s);
        Shift::ALL
            .into_iter()
            .find(|sh| fold(&sh.to_string()) == folded)
            .ok_or_else(|| ParseScheduleError::Shift(s.to_string()))
    }
}

/// Units assembled in one shift
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionEntry {
    pub day: Weekday,
    pub shift: Shift,
    pub quantity: u32,
    pub recorded: DateTime<Utc>,
}

impl Record for ProductionEntry {
    const FILE: &'static str = "production.json";
    const NAME: &'static str = "production entry";

    fn key(&self) -> &str {
        "production"
    }
}
