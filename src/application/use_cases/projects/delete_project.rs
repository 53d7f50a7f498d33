use uuid::Uuid;

use crate::application::access::{self, ProjectAction};
use crate::application::error::AppError;
use crate::application::ports::project_repository::ProjectRepository;
use crate::domain::users::user::User;

pub struct DeleteProject<'a, R: ProjectRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: ProjectRepository + ?Sized> DeleteProject<'a, R> {
    pub async fn execute(&self, caller: &User, id: Uuid) -> Result<(), AppError> {
        let existing = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Project not found.".into()))?;
        access::require_project_owner(caller, &existing, ProjectAction::Delete)?;
        if self.repo.delete(id).await? {
            Ok(())
        } else {
            Err(AppError::NotFound("Project not found.".into()))
        }
    }
}
