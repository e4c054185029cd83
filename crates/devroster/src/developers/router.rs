use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, Request, State,
    },
    http::Uri,
    middleware::{self, Next},
    response::Response,
    routing::get,
    Json, Router,
};
use tracing::error;

use super::domain::MemberId;
use super::dto::{
    CreateDeveloperRequest, CreateDeveloperResponse, DeveloperDetail, DeveloperSummary,
    EditDeveloperRequest, RetiredDeveloperView,
};
use super::error::{DeveloperError, ErrorReport};
use super::repository::DeveloperStore;
use super::service::DeveloperLifecycleService;

type SharedService<S> = Arc<DeveloperLifecycleService<S>>;

/// Router exposing the `/developers` collection and the retirement audit trail.
pub fn developer_router<S>(service: SharedService<S>) -> Router
where
    S: DeveloperStore + 'static,
{
    Router::new()
        .route(
            "/developers",
            get(list_handler::<S>)
                .post(create_handler::<S>)
                .fallback(unsupported_method),
        )
        .route(
            "/developers/:member_id",
            get(detail_handler::<S>)
                .put(edit_handler::<S>)
                .delete(retire_handler::<S>)
                .fallback(unsupported_method),
        )
        .route(
            "/retired-developers",
            get(retired_handler::<S>).fallback(unsupported_method),
        )
        .fallback(unknown_route)
        .layer(middleware::from_fn(log_error_responses))
        .with_state(service)
}

pub(crate) async fn list_handler<S>(
    State(service): State<SharedService<S>>,
) -> Result<Json<Vec<DeveloperSummary>>, DeveloperError>
where
    S: DeveloperStore + 'static,
{
    service.get_all_developers().map(Json)
}

pub(crate) async fn create_handler<S>(
    State(service): State<SharedService<S>>,
    payload: Result<Json<CreateDeveloperRequest>, JsonRejection>,
) -> Result<Json<CreateDeveloperResponse>, DeveloperError>
where
    S: DeveloperStore + 'static,
{
    let Json(request) = payload.map_err(|rejection| rejected(rejection.body_text()))?;
    service.create_developer(request).map(Json)
}

pub(crate) async fn detail_handler<S>(
    State(service): State<SharedService<S>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<DeveloperDetail>, DeveloperError>
where
    S: DeveloperStore + 'static,
{
    let member_id = member_id(path)?;
    service.get_developer_detail(&member_id).map(Json)
}

pub(crate) async fn edit_handler<S>(
    State(service): State<SharedService<S>>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<EditDeveloperRequest>, JsonRejection>,
) -> Result<Json<DeveloperDetail>, DeveloperError>
where
    S: DeveloperStore + 'static,
{
    let member_id = member_id(path)?;
    let Json(request) = payload.map_err(|rejection| rejected(rejection.body_text()))?;
    service.edit_developer(&member_id, request).map(Json)
}

pub(crate) async fn retire_handler<S>(
    State(service): State<SharedService<S>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<DeveloperDetail>, DeveloperError>
where
    S: DeveloperStore + 'static,
{
    let member_id = member_id(path)?;
    service.delete_developer(&member_id).map(Json)
}

pub(crate) async fn retired_handler<S>(
    State(service): State<SharedService<S>>,
) -> Result<Json<Vec<RetiredDeveloperView>>, DeveloperError>
where
    S: DeveloperStore + 'static,
{
    service.get_retired_developers().map(Json)
}

pub(crate) async fn unsupported_method() -> DeveloperError {
    DeveloperError::invalid_request("method not supported for this resource")
}

pub(crate) async fn unknown_route(uri: Uri) -> DeveloperError {
    DeveloperError::invalid_request(format!("no resource at {}", uri.path()))
}

fn member_id(path: Result<Path<String>, PathRejection>) -> Result<MemberId, DeveloperError> {
    let Path(member_id) = path.map_err(|rejection| rejected(rejection.body_text()))?;
    Ok(MemberId(member_id))
}

fn rejected(detail: String) -> DeveloperError {
    DeveloperError::invalid_request(detail)
}

/// Logs every error response with the originating path.
async fn log_error_responses(request: Request, next: Next) -> Response {
    let url = request.uri().path().to_string();
    let response = next.run(request).await;

    if let Some(ErrorReport(failure)) = response.extensions().get::<ErrorReport>() {
        error!(
            error_code = %failure.code(),
            url = %url,
            message = %failure.message(),
            "developer request failed"
        );
    }

    response
}
