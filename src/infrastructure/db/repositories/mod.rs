pub mod bid_repository_sqlx;
pub mod project_repository_sqlx;
pub mod user_repository_sqlx;
