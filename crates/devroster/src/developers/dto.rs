use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{
    Career, Developer, DeveloperLevel, DeveloperSkillType, MemberId, RetiredDeveloper, StatusCode,
};

/// Payload for `POST /developers`. Every field is required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDeveloperRequest {
    pub developer_level: DeveloperLevel,
    pub developer_skill_type: DeveloperSkillType,
    pub experience_years: u32,
    pub member_id: MemberId,
    pub name: String,
    pub age: u32,
}

impl CreateDeveloperRequest {
    pub fn career(&self) -> Career {
        Career {
            level: self.developer_level,
            skill_type: self.developer_skill_type,
            experience_years: self.experience_years,
        }
    }

    pub(crate) fn into_developer(self, now: DateTime<Utc>) -> Developer {
        Developer {
            member_id: self.member_id,
            name: self.name,
            age: self.age,
            level: self.developer_level,
            skill_type: self.developer_skill_type,
            experience_years: self.experience_years,
            status: StatusCode::Employed,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDeveloperResponse {
    pub member_id: MemberId,
}

/// Payload for `PUT /developers/{memberId}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditDeveloperRequest {
    pub developer_level: DeveloperLevel,
    pub developer_skill_type: DeveloperSkillType,
    pub experience_years: u32,
}

impl EditDeveloperRequest {
    pub fn career(&self) -> Career {
        Career {
            level: self.developer_level,
            skill_type: self.developer_skill_type,
            experience_years: self.experience_years,
        }
    }
}

/// List entry for `GET /developers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeveloperSummary {
    pub developer_level: DeveloperLevel,
    pub developer_skill_type: DeveloperSkillType,
    pub member_id: MemberId,
}

impl From<&Developer> for DeveloperSummary {
    fn from(developer: &Developer) -> Self {
        Self {
            developer_level: developer.level,
            developer_skill_type: developer.skill_type,
            member_id: developer.member_id.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeveloperDetail {
    pub developer_level: DeveloperLevel,
    pub developer_skill_type: DeveloperSkillType,
    pub experience_years: u32,
    pub member_id: MemberId,
    pub status_code: StatusCode,
    pub name: String,
    pub age: u32,
}

impl From<&Developer> for DeveloperDetail {
    fn from(developer: &Developer) -> Self {
        Self {
            developer_level: developer.level,
            developer_skill_type: developer.skill_type,
            experience_years: developer.experience_years,
            member_id: developer.member_id.clone(),
            status_code: developer.status,
            name: developer.name.clone(),
            age: developer.age,
        }
    }
}

/// Audit trail entry for `GET /retired-developers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetiredDeveloperView {
    pub member_id: MemberId,
    pub name: String,
    pub retired_at: DateTime<Utc>,
}

impl From<&RetiredDeveloper> for RetiredDeveloperView {
    fn from(retired: &RetiredDeveloper) -> Self {
        Self {
            member_id: retired.member_id.clone(),
            name: retired.name.clone(),
            retired_at: retired.retired_at,
        }
    }
}
