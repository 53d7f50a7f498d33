use async_trait::async_trait;
use bigdecimal::BigDecimal;
use uuid::Uuid;

use crate::application::error::AppError;
use crate::domain::bids::bid::Bid;

#[derive(Debug, Clone)]
pub struct NewBid {
    pub project_id: Uuid,
    pub amount: BigDecimal,
    pub cover_letter: String,
}

#[derive(Debug, Clone, Default)]
pub struct BidChanges {
    pub amount: Option<BigDecimal>,
    pub cover_letter: Option<String>,
}

#[async_trait]
pub trait BidRepository: Send + Sync {
    /// Fails with `AppError::Conflict` when the freelancer already has a bid
    /// on the project; the storage unique constraint serializes concurrent
    /// duplicates.
    async fn create_for_freelancer(
        &self,
        freelancer_id: Uuid,
        new: &NewBid,
    ) -> Result<Bid, AppError>;
    async fn list_by_freelancer(&self, freelancer_id: Uuid) -> Result<Vec<Bid>, AppError>;
    async fn list_by_project_client(&self, client_id: Uuid) -> Result<Vec<Bid>, AppError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Bid>, AppError>;
    async fn update(&self, id: Uuid, changes: &BidChanges) -> Result<Option<Bid>, AppError>;
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
}
