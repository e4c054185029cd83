use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Externally supplied identifier for a developer; immutable once the record exists.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(pub String);

impl MemberId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raised when a stored or configured enum tag does not name a known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

/// Seniority tier. The experience-year bounds for each tier live in
/// [`LevelPolicy`](super::validation::LevelPolicy), not on the enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeveloperLevel {
    New,
    Junior,
    Senior,
}

impl DeveloperLevel {
    pub const ALL: [DeveloperLevel; 3] = [Self::New, Self::Junior, Self::Senior];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "NEW",
            Self::Junior => "JUNIOR",
            Self::Senior => "SENIOR",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::New => "new developer",
            Self::Junior => "junior developer",
            Self::Senior => "senior developer",
        }
    }
}

impl FromStr for DeveloperLevel {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == value)
            .ok_or_else(|| UnknownVariant {
                kind: "developer level",
                value: value.to_string(),
            })
    }
}

impl fmt::Display for DeveloperLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeveloperSkillType {
    BackEnd,
    FrontEnd,
    FullStack,
}

impl DeveloperSkillType {
    pub const ALL: [DeveloperSkillType; 3] = [Self::BackEnd, Self::FrontEnd, Self::FullStack];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BackEnd => "BACK_END",
            Self::FrontEnd => "FRONT_END",
            Self::FullStack => "FULL_STACK",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::BackEnd => "back-end",
            Self::FrontEnd => "front-end",
            Self::FullStack => "full-stack",
        }
    }
}

impl FromStr for DeveloperSkillType {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|skill| skill.as_str() == value)
            .ok_or_else(|| UnknownVariant {
                kind: "developer skill type",
                value: value.to_string(),
            })
    }
}

/// Employment status. `Retired` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusCode {
    Employed,
    Retired,
}

impl StatusCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Employed => "EMPLOYED",
            Self::Retired => "RETIRED",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Employed => "employed",
            Self::Retired => "retired",
        }
    }
}

impl FromStr for StatusCode {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "EMPLOYED" => Ok(Self::Employed),
            "RETIRED" => Ok(Self::Retired),
            other => Err(UnknownVariant {
                kind: "status code",
                value: other.to_string(),
            }),
        }
    }
}

/// Level, skill, and experience: the only fields an edit may change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Career {
    pub level: DeveloperLevel,
    pub skill_type: DeveloperSkillType,
    pub experience_years: u32,
}

/// Stored developer record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Developer {
    pub member_id: MemberId,
    pub name: String,
    pub age: u32,
    pub level: DeveloperLevel,
    pub skill_type: DeveloperSkillType,
    pub experience_years: u32,
    pub status: StatusCode,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Developer {
    pub fn is_employed(&self) -> bool {
        self.status == StatusCode::Employed
    }

    pub fn career(&self) -> Career {
        Career {
            level: self.level,
            skill_type: self.skill_type,
            experience_years: self.experience_years,
        }
    }

    /// Copy of this record carrying a new career; identity, name, age and status are kept.
    pub fn with_career(&self, career: Career, now: DateTime<Utc>) -> Self {
        Self {
            level: career.level,
            skill_type: career.skill_type,
            experience_years: career.experience_years,
            updated_at: now,
            ..self.clone()
        }
    }

    pub fn retired(&self, now: DateTime<Utc>) -> Self {
        Self {
            status: StatusCode::Retired,
            updated_at: now,
            ..self.clone()
        }
    }
}

/// Append-only audit entry written once per retirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetiredDeveloper {
    pub member_id: MemberId,
    pub name: String,
    pub retired_at: DateTime<Utc>,
}

impl RetiredDeveloper {
    pub fn of(developer: &Developer, retired_at: DateTime<Utc>) -> Self {
        Self {
            member_id: developer.member_id.clone(),
            name: developer.name.clone(),
            retired_at,
        }
    }
}
