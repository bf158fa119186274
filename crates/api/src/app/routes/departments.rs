//! Department CRUD, each operation behind the policy gate.

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect},
    routing::{get, post},
    Json, Router,
};

use crewdir_core::DepartmentId;
use crewdir_directory::NewDepartment;
use crewdir_policy::{ActionName, ResourceId};

use crate::app::dto::{CreateDepartmentRequest, DepartmentDocument, UpdateDepartmentRequest};
use crate::app::errors::ApiError;
use crate::app::AppState;
use crate::context::{PrincipalContext, SessionContext};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_department))
        .route(
            "/:id",
            get(view_department)
                .put(update_department)
                .delete(delete_department),
        )
}

pub async fn create_department(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    Extension(principal): Extension<PrincipalContext>,
    Json(body): Json<CreateDepartmentRequest>,
) -> Result<axum::response::Response, ApiError> {
    state
        .gate
        .authorize(
            principal.principal(),
            &ResourceId::collection("departments"),
            &ActionName::new("create_department"),
            None,
        )
        .await?;

    let new = NewDepartment { name: body.name };
    new.validate()?;

    let department = state.store.create_department(new).await?;
    state
        .sessions
        .push_notice(&session.session_id(), "Department added successfully!");

    Ok((StatusCode::CREATED, Json(department)).into_response())
}

pub async fn view_department(
    State(state): State<AppState>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<DepartmentId>,
) -> Result<Json<DepartmentDocument>, ApiError> {
    state
        .gate
        .authorize(
            principal.principal(),
            &ResourceId::instance("departments", id),
            &ActionName::new("view_department"),
            None,
        )
        .await?;

    let department = state.store.department(id).await?.ok_or(ApiError::NotFound)?;
    let employees = state.store.employees_in(id).await?;

    Ok(Json(DepartmentDocument {
        department,
        employees,
    }))
}

pub async fn update_department(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<DepartmentId>,
    Json(body): Json<UpdateDepartmentRequest>,
) -> Result<axum::response::Response, ApiError> {
    state
        .gate
        .authorize(
            principal.principal(),
            &ResourceId::instance("departments", id),
            &ActionName::new("update_department"),
            None,
        )
        .await?;

    let new = NewDepartment {
        name: body.name.clone(),
    };
    new.validate()?;

    let department = state.store.rename_department(id, body.name).await?;
    state
        .sessions
        .push_notice(&session.session_id(), "Department updated successfully!");

    Ok(Json(department).into_response())
}

/// Deleting a department cascades to its employees: employees first, then
/// the department itself. A missing department is a notice, not an error.
pub async fn delete_department(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<DepartmentId>,
) -> Result<Redirect, ApiError> {
    state
        .gate
        .authorize(
            principal.principal(),
            &ResourceId::instance("departments", id),
            &ActionName::new("delete_department"),
            None,
        )
        .await?;

    let session_id = session.session_id();

    if state.store.department(id).await?.is_some() {
        state.store.delete_employees_in(id).await?;
        state.store.delete_department(id).await?;
        state.sessions.push_notice(
            &session_id,
            "Department and all related employees deleted successfully!",
        );
    } else {
        state
            .sessions
            .push_notice(&session_id, "Department not found!");
    }

    Ok(Redirect::to("/"))
}
