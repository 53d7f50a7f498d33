use crate::application::access;
use crate::application::error::AppError;
use crate::application::ports::bid_repository::{BidRepository, NewBid};
use crate::application::ports::project_repository::ProjectRepository;
use crate::domain::bids::bid::Bid;
use crate::domain::users::user::User;

pub struct CreateBid<'a, B, P>
where
    B: BidRepository + ?Sized,
    P: ProjectRepository + ?Sized,
{
    pub bids: &'a B,
    pub projects: &'a P,
}

impl<'a, B, P> CreateBid<'a, B, P>
where
    B: BidRepository + ?Sized,
    P: ProjectRepository + ?Sized,
{
    /// Freelancer-only; the bidding freelancer is server-assigned from the
    /// caller. The storage unique constraint rejects a second bid on the
    /// same project.
    pub async fn execute(&self, caller: &User, new: &NewBid) -> Result<Bid, AppError> {
        access::require_freelancer(caller)?;
        self.projects
            .find_by_id(new.project_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Project not found.".into()))?;
        self.bids.create_for_freelancer(caller.id, new).await
    }
}
