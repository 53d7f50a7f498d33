use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::error::AppError;
use crate::application::ports::project_repository::{
    NewProject, ProjectChanges, ProjectFilter, ProjectRepository,
};
use crate::domain::projects::project::Project;
use crate::infrastructure::db::PgPool;

pub struct SqlxProjectRepository {
    pub pool: PgPool,
}

impl SqlxProjectRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn project_from_row(r: &PgRow) -> Project {
    Project {
        id: r.get("id"),
        title: r.get("title"),
        description: r.get("description"),
        budget: r.get("budget"),
        client_id: r.get("client_id"),
        client_username: r.get("client_username"),
        status: r.get("status"),
        created_at: r.get("created_at"),
    }
}

#[async_trait]
impl ProjectRepository for SqlxProjectRepository {
    async fn create_for_client(
        &self,
        client_id: Uuid,
        new: &NewProject,
    ) -> Result<Project, AppError> {
        let row = sqlx::query(
            r#"WITH inserted AS (
                   INSERT INTO projects (title, description, budget, client_id, status)
                   VALUES ($1, $2, $3, $4, $5)
                   RETURNING id, title, description, budget, client_id, status, created_at
               )
               SELECT i.id, i.title, i.description, i.budget, i.client_id,
                      u.username AS client_username, i.status, i.created_at
               FROM inserted i
               JOIN users u ON u.id = i.client_id"#,
        )
        .bind(&new.title)
        .bind(&new.description)
        .bind(&new.budget)
        .bind(client_id)
        .bind(new.status)
        .fetch_one(&self.pool)
        .await?;
        Ok(project_from_row(&row))
    }

    async fn list(&self, filter: &ProjectFilter) -> Result<Vec<Project>, AppError> {
        let like = filter
            .search
            .as_ref()
            .filter(|s| !s.trim().is_empty())
            .map(|s| format!("%{}%", s.trim()));
        let rows = sqlx::query(
            r#"SELECT p.id, p.title, p.description, p.budget, p.client_id,
                      u.username AS client_username, p.status, p.created_at
               FROM projects p
               JOIN users u ON u.id = p.client_id
               WHERE ($1::uuid IS NULL OR p.client_id = $1)
                 AND ($2::text IS NULL OR p.title ILIKE $2)
               ORDER BY p.created_at DESC"#,
        )
        .bind(filter.client_id)
        .bind(like)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(project_from_row).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Project>, AppError> {
        let row = sqlx::query(
            r#"SELECT p.id, p.title, p.description, p.budget, p.client_id,
                      u.username AS client_username, p.status, p.created_at
               FROM projects p
               JOIN users u ON u.id = p.client_id
               WHERE p.id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(project_from_row))
    }

    async fn update(
        &self,
        id: Uuid,
        changes: &ProjectChanges,
    ) -> Result<Option<Project>, AppError> {
        let row = sqlx::query(
            r#"UPDATE projects p SET
                   title = COALESCE($2, p.title),
                   description = COALESCE($3, p.description),
                   budget = COALESCE($4, p.budget),
                   status = COALESCE($5, p.status)
               FROM users u
               WHERE p.id = $1 AND u.id = p.client_id
               RETURNING p.id, p.title, p.description, p.budget, p.client_id,
                         u.username AS client_username, p.status, p.created_at"#,
        )
        .bind(id)
        .bind(&changes.title)
        .bind(&changes.description)
        .bind(&changes.budget)
        .bind(changes.status)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(project_from_row))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let res = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
