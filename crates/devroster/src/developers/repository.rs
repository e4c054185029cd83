use super::domain::{Developer, MemberId, RetiredDeveloper, StatusCode};

/// Storage abstraction so the lifecycle service can run against memory or SQLite.
///
/// Every service operation opens one transaction. Writes stay invisible to other
/// transactions until [`DeveloperTransaction::commit`]; dropping an uncommitted
/// transaction discards them.
pub trait DeveloperStore: Send + Sync {
    type Transaction<'a>: DeveloperTransaction
    where
        Self: 'a;

    fn begin(&self) -> Result<Self::Transaction<'_>, RepositoryError>;
}

/// Unit of work over the `developer` and `retired_developer` tables.
pub trait DeveloperTransaction {
    fn find_by_member_id(
        &mut self,
        member_id: &MemberId,
    ) -> Result<Option<Developer>, RepositoryError>;

    /// Employed or retired records with the given status, ordered by member id.
    fn find_all_by_status(&mut self, status: StatusCode)
        -> Result<Vec<Developer>, RepositoryError>;

    /// Adds a new record. Fails with [`RepositoryError::Conflict`] when the member id exists.
    fn insert(&mut self, developer: Developer) -> Result<(), RepositoryError>;

    /// Replaces the record stored under the developer's member id.
    fn save(&mut self, developer: Developer) -> Result<(), RepositoryError>;

    fn save_retired(&mut self, retired: RetiredDeveloper) -> Result<(), RepositoryError>;

    /// Audit entries in the order they were written.
    fn find_all_retired(&mut self) -> Result<Vec<RetiredDeveloper>, RepositoryError>;

    fn commit(self) -> Result<(), RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
