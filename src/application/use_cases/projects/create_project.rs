use crate::application::error::AppError;
use crate::application::ports::project_repository::{NewProject, ProjectRepository};
use crate::domain::projects::project::Project;
use crate::domain::users::user::User;

pub struct CreateProject<'a, R: ProjectRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: ProjectRepository + ?Sized> CreateProject<'a, R> {
    /// Any authenticated caller may post a project; the caller becomes the
    /// owning client regardless of what the request claimed.
    pub async fn execute(&self, caller: &User, new: &NewProject) -> Result<Project, AppError> {
        self.repo.create_for_client(caller.id, new).await
    }
}
