use uuid::Uuid;

use crate::application::access;
use crate::application::error::AppError;
use crate::application::ports::bid_repository::BidRepository;
use crate::domain::bids::bid::Bid;
use crate::domain::users::user::User;

pub struct GetBid<'a, R: BidRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: BidRepository + ?Sized> GetBid<'a, R> {
    /// A bid outside the caller's scope reads as missing, so ids don't leak
    /// across tenants.
    pub async fn execute(&self, caller: &User, id: Uuid) -> Result<Bid, AppError> {
        let bid = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Bid not found.".into()))?;
        if !access::can_view_bid(caller, &bid) {
            return Err(AppError::NotFound("Bid not found.".into()));
        }
        Ok(bid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{decimal, fixtures};

    #[tokio::test]
    async fn visible_to_owner_and_project_client_only() {
        let fx = fixtures();
        let alice = fx.register_client("alice").await;
        let carol = fx.register_client("carol").await;
        let bob = fx.register_freelancer("bob").await;
        let dave = fx.register_freelancer("dave").await;
        let project = fx.post_project(&alice, "Logo Design", decimal("100.00")).await;
        let bid = fx.place_bid(&bob, &project, decimal("50.00")).await;

        let uc = GetBid {
            repo: fx.bids.as_ref(),
        };
        assert!(uc.execute(&bob, bid.id).await.is_ok());
        assert!(uc.execute(&alice, bid.id).await.is_ok());
        assert!(matches!(
            uc.execute(&carol, bid.id).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            uc.execute(&dave, bid.id).await,
            Err(AppError::NotFound(_))
        ));
    }
}
