use crate::application::error::AppError;
use crate::application::ports::project_repository::{ProjectFilter, ProjectRepository};
use crate::domain::projects::project::Project;
use crate::domain::users::user::User;

pub struct ListProjects<'a, R: ProjectRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: ProjectRepository + ?Sized> ListProjects<'a, R> {
    /// All projects are visible to any authenticated caller; `mine_only`
    /// restricts to the caller's own postings, `search` filters by title.
    pub async fn execute(
        &self,
        caller: &User,
        mine_only: bool,
        search: Option<String>,
    ) -> Result<Vec<Project>, AppError> {
        let filter = ProjectFilter {
            client_id: mine_only.then_some(caller.id),
            search,
        };
        self.repo.list(&filter).await
    }
}
