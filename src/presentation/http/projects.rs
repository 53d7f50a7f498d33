use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::error::AppError;
use crate::application::ports::project_repository::{NewProject, ProjectChanges};
use crate::application::use_cases::projects::create_project::CreateProject;
use crate::application::use_cases::projects::delete_project::DeleteProject;
use crate::application::use_cases::projects::get_project::GetProject;
use crate::application::use_cases::projects::list_projects::ListProjects;
use crate::application::use_cases::projects::update_project::UpdateProject;
use crate::bootstrap::app_context::AppContext;
use crate::domain::projects::project as domain;
use crate::presentation::http::auth::{Bearer, current_user};

#[derive(Debug, Serialize, ToSchema)]
pub struct ProjectResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    #[schema(value_type = String)]
    pub budget: BigDecimal,
    /// The owning client's username, as rendered by the API.
    pub client: String,
    pub client_id: Uuid,
    #[schema(value_type = String)]
    pub status: domain::ProjectStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProjectListResponse {
    pub items: Vec<ProjectResponse>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProjectRequest {
    pub title: String,
    pub description: String,
    #[schema(value_type = String)]
    pub budget: BigDecimal,
    #[schema(value_type = Option<String>)]
    pub status: Option<domain::ProjectStatus>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateProjectRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    #[schema(value_type = Option<String>)]
    pub budget: Option<BigDecimal>,
    #[schema(value_type = Option<String>)]
    pub status: Option<domain::ProjectStatus>,
}

#[derive(Debug, Deserialize)]
pub struct ListProjectsQuery {
    /// `client=me` scopes the listing to the caller's own projects.
    pub client: Option<String>,
    pub search: Option<String>,
}

fn project_response(p: domain::Project) -> ProjectResponse {
    ProjectResponse {
        id: p.id,
        title: p.title,
        description: p.description,
        budget: p.budget,
        client: p.client_username,
        client_id: p.client_id,
        status: p.status,
        created_at: p.created_at,
    }
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/projects", get(list_projects).post(create_project))
        .route(
            "/projects/:id",
            get(get_project)
                .put(update_project)
                .patch(update_project)
                .delete(delete_project),
        )
        .with_state(ctx)
}

#[utoipa::path(get, path = "/api/projects", tag = "Projects",
    params(
        ("client" = Option<String>, Query, description = "Set to 'me' to list only your own projects"),
        ("search" = Option<String>, Query, description = "Title substring filter")
    ),
    responses((status = 200, body = ProjectListResponse)))]
pub async fn list_projects(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    q: Option<Query<ListProjectsQuery>>,
) -> Result<Json<ProjectListResponse>, AppError> {
    let caller = current_user(&ctx, bearer).await?;
    let (client, search) = q.map(|Query(v)| (v.client, v.search)).unwrap_or((None, None));
    let mine_only = client.as_deref() == Some("me");

    let repo = ctx.project_repo();
    let uc = ListProjects {
        repo: repo.as_ref(),
    };
    let projects = uc.execute(&caller, mine_only, search).await?;
    Ok(Json(ProjectListResponse {
        items: projects.into_iter().map(project_response).collect(),
    }))
}

#[utoipa::path(post, path = "/api/projects", tag = "Projects", request_body = CreateProjectRequest, responses(
    (status = 201, body = ProjectResponse)
))]
pub async fn create_project(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Json(req): Json<CreateProjectRequest>,
) -> Result<(StatusCode, Json<ProjectResponse>), AppError> {
    let caller = current_user(&ctx, bearer).await?;
    let new = NewProject {
        title: req.title,
        description: req.description,
        budget: req.budget,
        status: req.status.unwrap_or(domain::ProjectStatus::Open),
    };

    let repo = ctx.project_repo();
    let uc = CreateProject {
        repo: repo.as_ref(),
    };
    let project = uc.execute(&caller, &new).await?;
    Ok((StatusCode::CREATED, Json(project_response(project))))
}

#[utoipa::path(get, path = "/api/projects/{id}", tag = "Projects",
    params(("id" = Uuid, Path, description = "Project ID")),
    responses((status = 200, body = ProjectResponse), (status = 404)))]
pub async fn get_project(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path(id): Path<Uuid>,
) -> Result<Json<ProjectResponse>, AppError> {
    let _caller = current_user(&ctx, bearer).await?;

    let repo = ctx.project_repo();
    let uc = GetProject {
        repo: repo.as_ref(),
    };
    let project = uc.execute(id).await?;
    Ok(Json(project_response(project)))
}

#[utoipa::path(put, path = "/api/projects/{id}", tag = "Projects", request_body = UpdateProjectRequest,
    params(("id" = Uuid, Path, description = "Project ID")),
    responses((status = 200, body = ProjectResponse), (status = 403), (status = 404)))]
pub async fn update_project(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateProjectRequest>,
) -> Result<Json<ProjectResponse>, AppError> {
    let caller = current_user(&ctx, bearer).await?;
    let changes = ProjectChanges {
        title: req.title,
        description: req.description,
        budget: req.budget,
        status: req.status,
    };

    let repo = ctx.project_repo();
    let uc = UpdateProject {
        repo: repo.as_ref(),
    };
    let project = uc.execute(&caller, id, &changes).await?;
    Ok(Json(project_response(project)))
}

#[utoipa::path(delete, path = "/api/projects/{id}", tag = "Projects",
    params(("id" = Uuid, Path, description = "Project ID")),
    responses((status = 204), (status = 403), (status = 404)))]
pub async fn delete_project(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let caller = current_user(&ctx, bearer).await?;

    let repo = ctx.project_repo();
    let uc = DeleteProject {
        repo: repo.as_ref(),
    };
    uc.execute(&caller, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
