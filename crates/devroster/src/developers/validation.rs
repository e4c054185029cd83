//! Pure checks run before any developer record is written.

use super::domain::{Developer, DeveloperLevel, MemberId};
use super::dto::CreateDeveloperRequest;
use super::error::{DeveloperError, ErrorCode};
use super::repository::RepositoryError;

pub const MAX_MEMBER_ID_CHARS: usize = 50;
pub const MAX_NAME_CHARS: usize = 50;
pub const MINIMUM_AGE: u32 = 18;

/// Inclusive experience-year range permitted for a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelBounds {
    min_experience_years: u32,
    max_experience_years: u32,
}

/// Raised when a configured range has its ends swapped.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("minimum experience years {min} exceeds maximum {max}")]
pub struct InvertedBounds {
    pub min: u32,
    pub max: u32,
}

impl LevelBounds {
    pub fn new(min: u32, max: u32) -> Result<Self, InvertedBounds> {
        if min > max {
            return Err(InvertedBounds { min, max });
        }
        Ok(Self {
            min_experience_years: min,
            max_experience_years: max,
        })
    }

    pub fn min(&self) -> u32 {
        self.min_experience_years
    }

    pub fn max(&self) -> u32 {
        self.max_experience_years
    }

    pub fn contains(&self, experience_years: u32) -> bool {
        (self.min_experience_years..=self.max_experience_years).contains(&experience_years)
    }
}

/// Level → bounds lookup table. NEW is always `[0, 0]`; JUNIOR and SENIOR come
/// from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelPolicy {
    junior: LevelBounds,
    senior: LevelBounds,
}

impl LevelPolicy {
    pub const NEW: LevelBounds = LevelBounds {
        min_experience_years: 0,
        max_experience_years: 0,
    };
    pub const DEFAULT_JUNIOR: (u32, u32) = (1, 10);
    pub const DEFAULT_SENIOR: (u32, u32) = (11, 70);

    pub fn new(junior: LevelBounds, senior: LevelBounds) -> Self {
        Self { junior, senior }
    }

    pub fn bounds(&self, level: DeveloperLevel) -> LevelBounds {
        match level {
            DeveloperLevel::New => Self::NEW,
            DeveloperLevel::Junior => self.junior,
            DeveloperLevel::Senior => self.senior,
        }
    }

    pub fn entries(&self) -> [(DeveloperLevel, LevelBounds); 3] {
        DeveloperLevel::ALL.map(|level| (level, self.bounds(level)))
    }

    /// Fails with `LEVEL_EXPERIENCE_YEARS_NOT_MATCHED` outside the level's inclusive bounds.
    pub fn validate_level(
        &self,
        level: DeveloperLevel,
        experience_years: u32,
    ) -> Result<(), DeveloperError> {
        let bounds = self.bounds(level);
        if bounds.contains(experience_years) {
            return Ok(());
        }

        Err(DeveloperError::with_message(
            ErrorCode::LevelExperienceYearsNotMatched,
            format!(
                "{} requires {}-{} experience years, got {}",
                level,
                bounds.min(),
                bounds.max(),
                experience_years
            ),
        ))
    }
}

impl Default for LevelPolicy {
    fn default() -> Self {
        let pair = |(min, max): (u32, u32)| LevelBounds {
            min_experience_years: min,
            max_experience_years: max,
        };
        Self::new(pair(Self::DEFAULT_JUNIOR), pair(Self::DEFAULT_SENIOR))
    }
}

/// Fails with `DUPLICATED_MEMBER_ID` when the lookup finds any record, retired ones included.
pub fn validate_unique_member_id<F>(member_id: &MemberId, lookup: F) -> Result<(), DeveloperError>
where
    F: FnOnce(&MemberId) -> Result<Option<Developer>, RepositoryError>,
{
    match lookup(member_id)? {
        Some(_) => Err(DeveloperError::duplicated_member_id()),
        None => Ok(()),
    }
}

/// Shape checks on a create payload, independent of stored state.
pub fn validate_create_request(request: &CreateDeveloperRequest) -> Result<(), DeveloperError> {
    check_text("memberId", request.member_id.as_str(), MAX_MEMBER_ID_CHARS)?;
    check_text("name", &request.name, MAX_NAME_CHARS)?;

    if request.age < MINIMUM_AGE {
        return Err(DeveloperError::invalid_request(format!(
            "age must be at least {MINIMUM_AGE}"
        )));
    }

    Ok(())
}

fn check_text(field: &str, value: &str, max_chars: usize) -> Result<(), DeveloperError> {
    if value.trim().is_empty() {
        return Err(DeveloperError::invalid_request(format!(
            "{field} must not be blank"
        )));
    }
    if value.chars().count() > max_chars {
        return Err(DeveloperError::invalid_request(format!(
            "{field} must be at most {max_chars} characters"
        )));
    }
    Ok(())
}
