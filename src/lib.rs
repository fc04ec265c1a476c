//! Client-side presentation layer for the climbing statistics site.
//!
//! The start page (`src/main.rs`) hosts the gym/user selection wizard, the
//! results page (`src/bin/dashboard.rs`) renders the chart payloads embedded by
//! the server. Everything that decides *what* should happen lives in pure
//! modules (`filter`, `form`, `chart_options`, ...) so it can be tested without
//! a browser; `browser`, `api`, `chart` and `components` do the DOM work.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod api;
pub mod browser;
pub mod cache;
pub mod chart;
pub mod chart_options;
pub mod components;
pub mod config;
pub mod cookies;
pub mod error;
pub mod filter;
pub mod form;
pub mod hooks;
pub mod labels;
pub mod logging;
pub mod nav;
pub mod utils;

pub type GymId = u32;

/// TopLogger user ids are kept as text; their format is validated on submit.
pub type UserId = String;

/// The two supported disciplines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClimbType {
    Boulder,
    Route,
}

impl ClimbType {
    pub const ALL: [ClimbType; 2] = [ClimbType::Boulder, ClimbType::Route];

    pub fn as_str(self) -> &'static str {
        match self {
            ClimbType::Boulder => "boulder",
            ClimbType::Route => "route",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ClimbType::Boulder => "Boulders",
            ClimbType::Route => "Routes",
        }
    }

    /// Grading systems offered in this climb type's panel, default first.
    pub fn grading_systems(self) -> &'static [GradingSystem] {
        match self {
            ClimbType::Boulder => &[
                GradingSystem::French,
                GradingSystem::FrenchRounded,
                GradingSystem::VGrade,
            ],
            ClimbType::Route => &[
                GradingSystem::French,
                GradingSystem::FrenchRounded,
                GradingSystem::Yds,
                GradingSystem::Uiaa,
                GradingSystem::British,
                GradingSystem::Ewbank,
            ],
        }
    }
}

impl fmt::Display for ClimbType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClimbType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "boulder" => Ok(ClimbType::Boulder),
            "route" => Ok(ClimbType::Route),
            other => Err(format!("Unknown climb type '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradingSystem {
    French,
    FrenchRounded,
    VGrade,
    British,
    Yds,
    Uiaa,
    Ewbank,
}

impl GradingSystem {
    pub fn as_str(self) -> &'static str {
        match self {
            GradingSystem::French => "french",
            GradingSystem::FrenchRounded => "french_rounded",
            GradingSystem::VGrade => "v_grade",
            GradingSystem::British => "british",
            GradingSystem::Yds => "yds",
            GradingSystem::Uiaa => "uiaa",
            GradingSystem::Ewbank => "ewbank",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GradingSystem::French => "French",
            GradingSystem::FrenchRounded => "French (rounded)",
            GradingSystem::VGrade => "V-grade",
            GradingSystem::British => "British",
            GradingSystem::Yds => "YDS",
            GradingSystem::Uiaa => "UIAA",
            GradingSystem::Ewbank => "Ewbank",
        }
    }
}

impl fmt::Display for GradingSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the gym picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GymOption {
    pub id: GymId,
    pub name: String,
    /// Precomputed lowercase text the search box matches against.
    pub search_key: String,
    #[serde(default)]
    pub boulder: bool,
    #[serde(default)]
    pub route: bool,
}

impl GymOption {
    pub fn supports(&self, climb_type: ClimbType) -> bool {
        match climb_type {
            ClimbType::Boulder => self.boulder,
            ClimbType::Route => self.route,
        }
    }
}

/// A `(user id, display name)` pair as served by `GET /api/users/{gym_id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawUserEntry", into = "RawUserEntry")]
pub struct UserEntry {
    pub id: UserId,
    pub name: String,
}

impl UserEntry {
    pub fn new(id: impl Into<UserId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

// The endpoint emits ids as JSON numbers, older caches as strings.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawUserId {
    Number(u64),
    Text(String),
}

#[derive(Serialize, Deserialize)]
struct RawUserEntry(RawUserId, String);

impl From<RawUserEntry> for UserEntry {
    fn from(raw: RawUserEntry) -> Self {
        let id = match raw.0 {
            RawUserId::Number(n) => n.to_string(),
            RawUserId::Text(s) => s,
        };
        UserEntry { id, name: raw.1 }
    }
}

impl From<UserEntry> for RawUserEntry {
    fn from(entry: UserEntry) -> Self {
        RawUserEntry(RawUserId::Text(entry.id), entry.name)
    }
}
