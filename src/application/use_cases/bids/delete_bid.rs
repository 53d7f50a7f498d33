use uuid::Uuid;

use crate::application::access::{self, BidAction};
use crate::application::error::AppError;
use crate::application::ports::bid_repository::BidRepository;
use crate::domain::users::user::User;

pub struct DeleteBid<'a, R: BidRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: BidRepository + ?Sized> DeleteBid<'a, R> {
    pub async fn execute(&self, caller: &User, id: Uuid) -> Result<(), AppError> {
        let bid = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Bid not found.".into()))?;
        if !access::can_view_bid(caller, &bid) {
            return Err(AppError::NotFound("Bid not found.".into()));
        }
        access::require_bid_owner(caller, &bid, BidAction::Delete)?;
        if self.repo.delete(id).await? {
            Ok(())
        } else {
            Err(AppError::NotFound("Bid not found.".into()))
        }
    }
}
