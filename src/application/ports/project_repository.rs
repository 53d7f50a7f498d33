use async_trait::async_trait;
use bigdecimal::BigDecimal;
use uuid::Uuid;

use crate::application::error::AppError;
use crate::domain::projects::project::{Project, ProjectStatus};

#[derive(Debug, Clone)]
pub struct NewProject {
    pub title: String,
    pub description: String,
    pub budget: BigDecimal,
    pub status: ProjectStatus,
}

/// Partial update; `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct ProjectChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub budget: Option<BigDecimal>,
    pub status: Option<ProjectStatus>,
}

#[derive(Debug, Clone, Default)]
pub struct ProjectFilter {
    pub client_id: Option<Uuid>,
    pub search: Option<String>,
}

#[async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn create_for_client(
        &self,
        client_id: Uuid,
        new: &NewProject,
    ) -> Result<Project, AppError>;
    /// Newest first; `filter.search` matches the title case-insensitively.
    async fn list(&self, filter: &ProjectFilter) -> Result<Vec<Project>, AppError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Project>, AppError>;
    async fn update(&self, id: Uuid, changes: &ProjectChanges)
    -> Result<Option<Project>, AppError>;
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
}
