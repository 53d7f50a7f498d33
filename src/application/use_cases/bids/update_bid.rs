use uuid::Uuid;

use crate::application::access::{self, BidAction};
use crate::application::error::AppError;
use crate::application::ports::bid_repository::{BidChanges, BidRepository};
use crate::domain::bids::bid::Bid;
use crate::domain::users::user::User;

pub struct UpdateBid<'a, R: BidRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: BidRepository + ?Sized> UpdateBid<'a, R> {
    /// Out-of-scope bids read as missing; in-scope bids may only be mutated
    /// by the freelancer who placed them.
    pub async fn execute(
        &self,
        caller: &User,
        id: Uuid,
        changes: &BidChanges,
    ) -> Result<Bid, AppError> {
        let bid = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Bid not found.".into()))?;
        if !access::can_view_bid(caller, &bid) {
            return Err(AppError::NotFound("Bid not found.".into()));
        }
        access::require_bid_owner(caller, &bid, BidAction::Update)?;
        self.repo
            .update(id, changes)
            .await?
            .ok_or_else(|| AppError::NotFound("Bid not found.".into()))
    }
}
