use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use axum::response::Response;
use chrono::Utc;
use serde_json::Value;

use crate::developers::domain::{
    Developer, DeveloperLevel, DeveloperSkillType, MemberId, RetiredDeveloper, StatusCode,
};
use crate::developers::dto::{CreateDeveloperRequest, EditDeveloperRequest};
use crate::developers::memory::{InMemoryDeveloperStore, InMemoryTransaction};
use crate::developers::repository::{DeveloperStore, DeveloperTransaction, RepositoryError};
use crate::developers::service::DeveloperLifecycleService;
use crate::developers::validation::LevelPolicy;

pub(super) fn default_developer() -> Developer {
    let now = Utc::now();
    Developer {
        member_id: MemberId::new("a"),
        name: "jimmy".to_string(),
        age: 28,
        level: DeveloperLevel::Junior,
        skill_type: DeveloperSkillType::FrontEnd,
        experience_years: 7,
        status: StatusCode::Employed,
        created_at: now,
        updated_at: now,
    }
}

pub(super) fn create_request(
    level: DeveloperLevel,
    skill_type: DeveloperSkillType,
    experience_years: u32,
) -> CreateDeveloperRequest {
    create_request_for("a", level, skill_type, experience_years)
}

pub(super) fn create_request_for(
    member_id: &str,
    level: DeveloperLevel,
    skill_type: DeveloperSkillType,
    experience_years: u32,
) -> CreateDeveloperRequest {
    CreateDeveloperRequest {
        developer_level: level,
        developer_skill_type: skill_type,
        experience_years,
        member_id: MemberId::new(member_id),
        name: "jimmy".to_string(),
        age: 28,
    }
}

pub(super) fn default_edit_request() -> EditDeveloperRequest {
    EditDeveloperRequest {
        developer_level: DeveloperLevel::Junior,
        developer_skill_type: DeveloperSkillType::FrontEnd,
        experience_years: 5,
    }
}

pub(super) fn build_service() -> (
    DeveloperLifecycleService<RecordingStore>,
    Arc<RecordingStore>,
) {
    let store = Arc::new(RecordingStore::default());
    let service = DeveloperLifecycleService::new(store.clone(), LevelPolicy::default());
    (service, store)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("valid json")
}

/// In-memory store that counts write calls and can be told to fail audit inserts.
#[derive(Default)]
pub(super) struct RecordingStore {
    inner: InMemoryDeveloperStore,
    writes: AtomicUsize,
    fail_audit: AtomicBool,
}

impl RecordingStore {
    pub(super) fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub(super) fn fail_audit_writes(&self) {
        self.fail_audit.store(true, Ordering::SeqCst);
    }

    /// Insert without counting, for arranging test state.
    pub(super) fn seed(&self, developer: Developer) {
        let mut tx = self.inner.begin().expect("begin");
        tx.insert(developer).expect("seed insert");
        tx.commit().expect("seed commit");
    }

    pub(super) fn stored(&self, member_id: &str) -> Option<Developer> {
        let mut tx = self.inner.begin().expect("begin");
        let developer = tx
            .find_by_member_id(&MemberId::new(member_id))
            .expect("lookup");
        developer
    }

    pub(super) fn retired(&self) -> Vec<RetiredDeveloper> {
        let mut tx = self.inner.begin().expect("begin");
        let retired = tx.find_all_retired().expect("audit listing");
        retired
    }
}

impl DeveloperStore for RecordingStore {
    type Transaction<'a> = RecordingTransaction<'a>;

    fn begin(&self) -> Result<Self::Transaction<'_>, RepositoryError> {
        Ok(RecordingTransaction {
            inner: self.inner.begin()?,
            store: self,
        })
    }
}

pub(super) struct RecordingTransaction<'a> {
    inner: InMemoryTransaction<'a>,
    store: &'a RecordingStore,
}

impl RecordingTransaction<'_> {
    fn record_write(&self) {
        self.store.writes.fetch_add(1, Ordering::SeqCst);
    }
}

impl DeveloperTransaction for RecordingTransaction<'_> {
    fn find_by_member_id(
        &mut self,
        member_id: &MemberId,
    ) -> Result<Option<Developer>, RepositoryError> {
        self.inner.find_by_member_id(member_id)
    }

    fn find_all_by_status(
        &mut self,
        status: StatusCode,
    ) -> Result<Vec<Developer>, RepositoryError> {
        self.inner.find_all_by_status(status)
    }

    fn insert(&mut self, developer: Developer) -> Result<(), RepositoryError> {
        self.record_write();
        self.inner.insert(developer)
    }

    fn save(&mut self, developer: Developer) -> Result<(), RepositoryError> {
        self.record_write();
        self.inner.save(developer)
    }

    fn save_retired(&mut self, retired: RetiredDeveloper) -> Result<(), RepositoryError> {
        self.record_write();
        if self.store.fail_audit.load(Ordering::SeqCst) {
            return Err(RepositoryError::Unavailable(
                "retired_developer table offline".to_string(),
            ));
        }
        self.inner.save_retired(retired)
    }

    fn find_all_retired(&mut self) -> Result<Vec<RetiredDeveloper>, RepositoryError> {
        self.inner.find_all_retired()
    }

    fn commit(self) -> Result<(), RepositoryError> {
        self.inner.commit()
    }
}

/// Store whose every transaction fails to open.
pub(super) struct UnavailableStore;

impl DeveloperStore for UnavailableStore {
    type Transaction<'a> = InMemoryTransaction<'a>;

    fn begin(&self) -> Result<Self::Transaction<'_>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}
