//! Developer records: level validation, lifecycle orchestration, persistence, and HTTP routes.
//!
//! A developer is created `EMPLOYED`, may have its career fields edited, and is retired
//! by a logical delete that also appends a [`RetiredDeveloper`] audit entry. Every
//! operation runs inside a single [`DeveloperTransaction`].

pub mod domain;
pub mod dto;
pub mod error;
pub mod memory;
pub mod repository;
pub mod router;
pub mod service;
pub mod sqlite;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{
    Career, Developer, DeveloperLevel, DeveloperSkillType, MemberId, RetiredDeveloper, StatusCode,
    UnknownVariant,
};
pub use dto::{
    CreateDeveloperRequest, CreateDeveloperResponse, DeveloperDetail, DeveloperSummary,
    EditDeveloperRequest, RetiredDeveloperView,
};
pub use error::{DeveloperError, ErrorBody, ErrorCode};
pub use memory::InMemoryDeveloperStore;
pub use repository::{DeveloperStore, DeveloperTransaction, RepositoryError};
pub use router::developer_router;
pub use service::DeveloperLifecycleService;
pub use sqlite::SqliteDeveloperStore;
pub use validation::{
    validate_create_request, validate_unique_member_id, InvertedBounds, LevelBounds, LevelPolicy,
};
