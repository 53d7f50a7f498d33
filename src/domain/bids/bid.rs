use bigdecimal::BigDecimal;
use uuid::Uuid;

/// A freelancer's offer on a project. Carries the parent project's title and
/// owner so visibility checks and responses don't need a second lookup.
#[derive(Debug, Clone)]
pub struct Bid {
    pub id: Uuid,
    pub project_id: Uuid,
    pub project_title: String,
    pub project_client_id: Uuid,
    pub freelancer_id: Uuid,
    pub freelancer_username: String,
    pub amount: BigDecimal,
    pub cover_letter: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
