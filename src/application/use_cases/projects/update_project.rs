use uuid::Uuid;

use crate::application::access::{self, ProjectAction};
use crate::application::error::AppError;
use crate::application::ports::project_repository::{ProjectChanges, ProjectRepository};
use crate::domain::projects::project::Project;
use crate::domain::users::user::User;

pub struct UpdateProject<'a, R: ProjectRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: ProjectRepository + ?Sized> UpdateProject<'a, R> {
    pub async fn execute(
        &self,
        caller: &User,
        id: Uuid,
        changes: &ProjectChanges,
    ) -> Result<Project, AppError> {
        let existing = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Project not found.".into()))?;
        access::require_project_owner(caller, &existing, ProjectAction::Update)?;
        self.repo
            .update(id, changes)
            .await?
            .ok_or_else(|| AppError::NotFound("Project not found.".into()))
    }
}
