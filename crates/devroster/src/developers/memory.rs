use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::domain::{Developer, MemberId, RetiredDeveloper, StatusCode};
use super::repository::{DeveloperStore, DeveloperTransaction, RepositoryError};

#[derive(Debug, Default)]
struct Tables {
    developers: BTreeMap<MemberId, Developer>,
    retired: Vec<RetiredDeveloper>,
}

/// Process-local store. A transaction holds the table lock for its whole
/// lifetime, so transactions are serialised.
#[derive(Debug, Default, Clone)]
pub struct InMemoryDeveloperStore {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryDeveloperStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DeveloperStore for InMemoryDeveloperStore {
    type Transaction<'a> = InMemoryTransaction<'a>;

    fn begin(&self) -> Result<Self::Transaction<'_>, RepositoryError> {
        let tables = self
            .tables
            .lock()
            .map_err(|_| RepositoryError::Unavailable("developer table lock poisoned".into()))?;

        Ok(InMemoryTransaction {
            tables,
            staged: BTreeMap::new(),
            staged_retired: Vec::new(),
        })
    }
}

/// Writes are staged next to the locked tables and applied on commit.
pub struct InMemoryTransaction<'a> {
    tables: MutexGuard<'a, Tables>,
    staged: BTreeMap<MemberId, Developer>,
    staged_retired: Vec<RetiredDeveloper>,
}

impl InMemoryTransaction<'_> {
    fn exists(&self, member_id: &MemberId) -> bool {
        self.staged.contains_key(member_id) || self.tables.developers.contains_key(member_id)
    }
}

impl DeveloperTransaction for InMemoryTransaction<'_> {
    fn find_by_member_id(
        &mut self,
        member_id: &MemberId,
    ) -> Result<Option<Developer>, RepositoryError> {
        Ok(self
            .staged
            .get(member_id)
            .or_else(|| self.tables.developers.get(member_id))
            .cloned())
    }

    fn find_all_by_status(
        &mut self,
        status: StatusCode,
    ) -> Result<Vec<Developer>, RepositoryError> {
        let mut merged: BTreeMap<&MemberId, &Developer> = self.tables.developers.iter().collect();
        merged.extend(self.staged.iter());

        Ok(merged
            .into_values()
            .filter(|developer| developer.status == status)
            .cloned()
            .collect())
    }

    fn insert(&mut self, developer: Developer) -> Result<(), RepositoryError> {
        if self.exists(&developer.member_id) {
            return Err(RepositoryError::Conflict);
        }
        self.staged.insert(developer.member_id.clone(), developer);
        Ok(())
    }

    fn save(&mut self, developer: Developer) -> Result<(), RepositoryError> {
        if !self.exists(&developer.member_id) {
            return Err(RepositoryError::NotFound);
        }
        self.staged.insert(developer.member_id.clone(), developer);
        Ok(())
    }

    fn save_retired(&mut self, retired: RetiredDeveloper) -> Result<(), RepositoryError> {
        self.staged_retired.push(retired);
        Ok(())
    }

    fn find_all_retired(&mut self) -> Result<Vec<RetiredDeveloper>, RepositoryError> {
        Ok(self
            .tables
            .retired
            .iter()
            .chain(self.staged_retired.iter())
            .cloned()
            .collect())
    }

    fn commit(mut self) -> Result<(), RepositoryError> {
        let staged = std::mem::take(&mut self.staged);
        let staged_retired = std::mem::take(&mut self.staged_retired);
        self.tables.developers.extend(staged);
        self.tables.retired.extend(staged_retired);
        Ok(())
    }
}
