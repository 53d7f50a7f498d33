use crate::application::access::{self, BidScope};
use crate::application::error::AppError;
use crate::application::ports::bid_repository::BidRepository;
use crate::domain::bids::bid::Bid;
use crate::domain::users::user::User;

pub struct ListBids<'a, R: BidRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: BidRepository + ?Sized> ListBids<'a, R> {
    /// Role-scoped: a freelancer's own bids, or the bids on a client's
    /// projects. Newest first.
    pub async fn execute(&self, caller: &User) -> Result<Vec<Bid>, AppError> {
        match access::bid_scope(caller) {
            BidScope::ByFreelancer(id) => self.repo.list_by_freelancer(id).await,
            BidScope::ByProjectClient(id) => self.repo.list_by_project_client(id).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::bid_repository::NewBid;
    use crate::application::test_support::{decimal, fixtures};
    use crate::application::use_cases::bids::create_bid::CreateBid;

    #[tokio::test]
    async fn scoping_is_exact_per_role() {
        let fx = fixtures();
        let alice = fx.register_client("alice").await;
        let carol = fx.register_client("carol").await;
        let bob = fx.register_freelancer("bob").await;
        let dave = fx.register_freelancer("dave").await;

        let alices = fx.post_project(&alice, "Logo Design", decimal("100.00")).await;
        let carols = fx.post_project(&carol, "Site Redesign", decimal("800.00")).await;

        fx.place_bid(&bob, &alices, decimal("50.00")).await;
        fx.place_bid(&bob, &carols, decimal("400.00")).await;
        fx.place_bid(&dave, &alices, decimal("60.00")).await;

        let uc = ListBids {
            repo: fx.bids.as_ref(),
        };

        // Bob sees exactly his two bids.
        let bobs = uc.execute(&bob).await.unwrap();
        assert_eq!(bobs.len(), 2);
        assert!(bobs.iter().all(|b| b.freelancer_id == bob.id));

        // Alice sees exactly the bids on her project, across freelancers.
        let alices_view = uc.execute(&alice).await.unwrap();
        assert_eq!(alices_view.len(), 2);
        assert!(alices_view.iter().all(|b| b.project_client_id == alice.id));

        // Carol sees only Bob's bid on her project.
        let carols_view = uc.execute(&carol).await.unwrap();
        assert_eq!(carols_view.len(), 1);
        assert_eq!(carols_view[0].freelancer_id, bob.id);
    }

    #[tokio::test]
    async fn logo_design_scenario_end_to_end() {
        let fx = fixtures();
        let alice = fx.register_client("alice").await;
        let bob = fx.register_freelancer("bob").await;
        let project = fx.post_project(&alice, "Logo Design", decimal("100.00")).await;

        let create = CreateBid {
            bids: fx.bids.as_ref(),
            projects: fx.projects.as_ref(),
        };
        let offer = NewBid {
            project_id: project.id,
            amount: decimal("50.00"),
            cover_letter: "Portfolio attached.".into(),
        };
        create.execute(&bob, &offer).await.unwrap();
        assert!(matches!(
            create.execute(&bob, &offer).await,
            Err(AppError::Conflict(_))
        ));

        let list = ListBids {
            repo: fx.bids.as_ref(),
        };
        let alices_view = list.execute(&alice).await.unwrap();
        assert_eq!(alices_view.len(), 1);
        assert_eq!(alices_view[0].project_title, "Logo Design");
        assert_eq!(alices_view[0].freelancer_username, "bob");

        let bobs_view = list.execute(&bob).await.unwrap();
        assert_eq!(bobs_view.len(), 1);
        assert_eq!(bobs_view[0].amount, decimal("50.00"));
    }
}
