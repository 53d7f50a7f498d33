use uuid::Uuid;

use crate::application::error::AppError;
use crate::application::ports::project_repository::ProjectRepository;
use crate::domain::projects::project::Project;

pub struct GetProject<'a, R: ProjectRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: ProjectRepository + ?Sized> GetProject<'a, R> {
    /// Reads are open to any authenticated caller.
    pub async fn execute(&self, id: Uuid) -> Result<Project, AppError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Project not found.".into()))
    }
}
