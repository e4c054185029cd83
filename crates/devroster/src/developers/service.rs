use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use super::domain::{Developer, MemberId, RetiredDeveloper, StatusCode};
use super::dto::{
    CreateDeveloperRequest, CreateDeveloperResponse, DeveloperDetail, DeveloperSummary,
    EditDeveloperRequest, RetiredDeveloperView,
};
use super::error::DeveloperError;
use super::repository::{DeveloperStore, DeveloperTransaction};
use super::validation::{validate_create_request, validate_unique_member_id, LevelPolicy};

/// Lifecycle manager for developer records: validates, persists, and retires.
pub struct DeveloperLifecycleService<S> {
    store: Arc<S>,
    levels: LevelPolicy,
}

impl<S> DeveloperLifecycleService<S>
where
    S: DeveloperStore + 'static,
{
    pub fn new(store: Arc<S>, levels: LevelPolicy) -> Self {
        Self { store, levels }
    }

    pub fn levels(&self) -> &LevelPolicy {
        &self.levels
    }

    /// Register a new employed developer.
    pub fn create_developer(
        &self,
        request: CreateDeveloperRequest,
    ) -> Result<CreateDeveloperResponse, DeveloperError> {
        validate_create_request(&request)?;
        self.levels
            .validate_level(request.developer_level, request.experience_years)?;

        let mut tx = self.store.begin()?;
        validate_unique_member_id(&request.member_id, |member_id| {
            tx.find_by_member_id(member_id)
        })?;

        let developer = request.into_developer(Utc::now());
        let member_id = developer.member_id.clone();
        tx.insert(developer)?;
        tx.commit()?;

        info!(member_id = %member_id, "developer created");
        Ok(CreateDeveloperResponse { member_id })
    }

    /// Employed developers, ordered by member id.
    pub fn get_all_developers(&self) -> Result<Vec<DeveloperSummary>, DeveloperError> {
        let mut tx = self.store.begin()?;
        let developers = tx.find_all_by_status(StatusCode::Employed)?;
        Ok(developers.iter().map(DeveloperSummary::from).collect())
    }

    /// Detail view for any developer, retired ones included.
    pub fn get_developer_detail(
        &self,
        member_id: &MemberId,
    ) -> Result<DeveloperDetail, DeveloperError> {
        let mut tx = self.store.begin()?;
        let developer = load(&mut tx, member_id)?;
        Ok(DeveloperDetail::from(&developer))
    }

    /// Change level, skill and experience. Other fields are left as stored.
    pub fn edit_developer(
        &self,
        member_id: &MemberId,
        request: EditDeveloperRequest,
    ) -> Result<DeveloperDetail, DeveloperError> {
        self.levels
            .validate_level(request.developer_level, request.experience_years)?;

        let mut tx = self.store.begin()?;
        let current = load(&mut tx, member_id)?;
        let updated = current.with_career(request.career(), Utc::now());
        tx.save(updated.clone())?;
        tx.commit()?;

        info!(
            member_id = %member_id,
            level = %updated.level,
            experience_years = updated.experience_years,
            "developer edited"
        );
        Ok(DeveloperDetail::from(&updated))
    }

    /// Retire a developer: flip the status and append the audit entry in one unit of work.
    pub fn delete_developer(&self, member_id: &MemberId) -> Result<DeveloperDetail, DeveloperError> {
        let mut tx = self.store.begin()?;
        let current = load(&mut tx, member_id)?;

        if !current.is_employed() {
            debug!(member_id = %member_id, "developer already retired");
            return Ok(DeveloperDetail::from(&current));
        }

        let now = Utc::now();
        let retired = current.retired(now);
        tx.save(retired.clone())?;
        tx.save_retired(RetiredDeveloper::of(&retired, now))?;
        tx.commit()?;

        info!(member_id = %member_id, "developer retired");
        Ok(DeveloperDetail::from(&retired))
    }

    /// Retirement audit trail in the order it was written.
    pub fn get_retired_developers(&self) -> Result<Vec<RetiredDeveloperView>, DeveloperError> {
        let mut tx = self.store.begin()?;
        let retired = tx.find_all_retired()?;
        Ok(retired.iter().map(RetiredDeveloperView::from).collect())
    }
}

fn load<T: DeveloperTransaction>(
    tx: &mut T,
    member_id: &MemberId,
) -> Result<Developer, DeveloperError> {
    tx.find_by_member_id(member_id)?
        .ok_or_else(DeveloperError::no_developer)
}
