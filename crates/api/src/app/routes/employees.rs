//! Employee CRUD, each operation behind the policy gate.

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect},
    routing::{get, post},
    Json, Router,
};

use crewdir_core::EmployeeId;
use crewdir_directory::{Employee, EmployeeUpdate, NewEmployee};
use crewdir_policy::{ActionName, ResourceId};

use crate::app::dto::{CreateEmployeeRequest, UpdateEmployeeRequest};
use crate::app::errors::ApiError;
use crate::app::AppState;
use crate::context::{PrincipalContext, SessionContext};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_employee))
        .route(
            "/:id",
            get(view_employee).put(update_employee).delete(delete_employee),
        )
}

pub async fn create_employee(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    Extension(principal): Extension<PrincipalContext>,
    Json(body): Json<CreateEmployeeRequest>,
) -> Result<axum::response::Response, ApiError> {
    state
        .gate
        .authorize(
            principal.principal(),
            &ResourceId::collection("employees"),
            &ActionName::new("create_employee"),
            None,
        )
        .await?;

    let new = NewEmployee {
        username: body.username,
        name: body.name,
        gender: body.gender,
        position: body.position,
        location: body.location,
        start_year: body.start_year,
        hobbies: body.hobbies,
        department_id: body.department_id,
    };
    new.validate()?;

    if state.store.department(new.department_id).await?.is_none() {
        return Err(ApiError::Validation(format!(
            "department {} does not exist",
            new.department_id
        )));
    }

    let employee = state.store.create_employee(new).await?;
    state
        .sessions
        .push_notice(&session.session_id(), "Employee added successfully.");

    Ok((StatusCode::CREATED, Json(employee)).into_response())
}

pub async fn view_employee(
    State(state): State<AppState>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<EmployeeId>,
) -> Result<Json<Employee>, ApiError> {
    state
        .gate
        .authorize(
            principal.principal(),
            &ResourceId::instance("employees", id),
            &ActionName::new("view_employee"),
            None,
        )
        .await?;

    let employee = state.store.employee(id).await?.ok_or(ApiError::NotFound)?;
    Ok(Json(employee))
}

pub async fn update_employee(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<EmployeeId>,
    Json(body): Json<UpdateEmployeeRequest>,
) -> Result<Json<Employee>, ApiError> {
    state
        .gate
        .authorize(
            principal.principal(),
            &ResourceId::instance("employees", id),
            &ActionName::new("update_employee"),
            None,
        )
        .await?;

    let update = EmployeeUpdate {
        name: body.name,
        gender: body.gender,
        location: body.location,
        start_year: body.start_year,
        hobbies: body.hobbies,
    };
    update.validate()?;

    let employee = state.store.update_employee(id, update).await?;
    state
        .sessions
        .push_notice(&session.session_id(), "Employee updated successfully!");

    Ok(Json(employee))
}

/// A missing employee is a notice, not an error; the request still lands
/// back on the home view.
pub async fn delete_employee(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<EmployeeId>,
) -> Result<Redirect, ApiError> {
    state
        .gate
        .authorize(
            principal.principal(),
            &ResourceId::instance("employees", id),
            &ActionName::new("delete_employee"),
            None,
        )
        .await?;

    let session_id = session.session_id();

    match state.store.employee(id).await? {
        Some(employee) => {
            state.store.delete_employee(id).await?;
            state
                .sessions
                .push_notice(&session_id, "Employee deleted successfully!");
            Ok(Redirect::to(&format!(
                "/departments/{}",
                employee.department_id
            )))
        }
        None => {
            state
                .sessions
                .push_notice(&session_id, "Employee not found!");
            Ok(Redirect::to("/"))
        }
    }
}
