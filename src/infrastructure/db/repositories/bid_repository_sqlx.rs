use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::error::AppError;
use crate::application::ports::bid_repository::{BidChanges, BidRepository, NewBid};
use crate::domain::bids::bid::Bid;
use crate::infrastructure::db::PgPool;

pub struct SqlxBidRepository {
    pub pool: PgPool,
}

impl SqlxBidRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn bid_from_row(r: &PgRow) -> Bid {
    Bid {
        id: r.get("id"),
        project_id: r.get("project_id"),
        project_title: r.get("project_title"),
        project_client_id: r.get("project_client_id"),
        freelancer_id: r.get("freelancer_id"),
        freelancer_username: r.get("freelancer_username"),
        amount: r.get("amount"),
        cover_letter: r.get("cover_letter"),
        created_at: r.get("created_at"),
    }
}

const BID_COLUMNS: &str = r#"b.id, b.project_id, p.title AS project_title,
       p.client_id AS project_client_id, b.freelancer_id,
       u.username AS freelancer_username, b.amount, b.cover_letter, b.created_at"#;

#[async_trait]
impl BidRepository for SqlxBidRepository {
    async fn create_for_freelancer(
        &self,
        freelancer_id: Uuid,
        new: &NewBid,
    ) -> Result<Bid, AppError> {
        let sql = format!(
            r#"WITH b AS (
                   INSERT INTO bids (project_id, freelancer_id, amount, cover_letter)
                   VALUES ($1, $2, $3, $4)
                   RETURNING id, project_id, freelancer_id, amount, cover_letter, created_at
               )
               SELECT {BID_COLUMNS}
               FROM b
               JOIN projects p ON p.id = b.project_id
               JOIN users u ON u.id = b.freelancer_id"#
        );
        let row = sqlx::query(&sql)
            .bind(new.project_id)
            .bind(freelancer_id)
            .bind(&new.amount)
            .bind(&new.cover_letter)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db) if db.is_unique_violation() => AppError::Conflict(
                    "You have already placed a bid on this project.".into(),
                ),
                sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                    AppError::NotFound("Project not found.".into())
                }
                _ => AppError::from(e),
            })?;
        Ok(bid_from_row(&row))
    }

    async fn list_by_freelancer(&self, freelancer_id: Uuid) -> Result<Vec<Bid>, AppError> {
        let sql = format!(
            r#"SELECT {BID_COLUMNS}
               FROM bids b
               JOIN projects p ON p.id = b.project_id
               JOIN users u ON u.id = b.freelancer_id
               WHERE b.freelancer_id = $1
               ORDER BY b.created_at DESC"#
        );
        let rows = sqlx::query(&sql)
            .bind(freelancer_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.iter().map(bid_from_row).collect())
    }

    async fn list_by_project_client(&self, client_id: Uuid) -> Result<Vec<Bid>, AppError> {
        let sql = format!(
            r#"SELECT {BID_COLUMNS}
               FROM bids b
               JOIN projects p ON p.id = b.project_id
               JOIN users u ON u.id = b.freelancer_id
               WHERE p.client_id = $1
               ORDER BY b.created_at DESC"#
        );
        let rows = sqlx::query(&sql)
            .bind(client_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.iter().map(bid_from_row).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Bid>, AppError> {
        let sql = format!(
            r#"SELECT {BID_COLUMNS}
               FROM bids b
               JOIN projects p ON p.id = b.project_id
               JOIN users u ON u.id = b.freelancer_id
               WHERE b.id = $1"#
        );
        let row = sqlx::query(&sql).bind(id).fetch_optional(&self.pool).await?;
        Ok(row.as_ref().map(bid_from_row))
    }

    async fn update(&self, id: Uuid, changes: &BidChanges) -> Result<Option<Bid>, AppError> {
        let sql = format!(
            r#"UPDATE bids b SET
                   amount = COALESCE($2, b.amount),
                   cover_letter = COALESCE($3, b.cover_letter)
               FROM projects p, users u
               WHERE b.id = $1 AND p.id = b.project_id AND u.id = b.freelancer_id
               RETURNING {BID_COLUMNS}"#
        );
        let row = sqlx::query(&sql)
            .bind(id)
            .bind(&changes.amount)
            .bind(&changes.cover_letter)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(bid_from_row))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let res = sqlx::query("DELETE FROM bids WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
