use uuid::Uuid;

use crate::application::error::AppError;
use crate::domain::bids::bid::Bid;
use crate::domain::projects::project::Project;
use crate::domain::users::user::{Role, User};

// Presentation resolves the bearer token to a User; this module decides what
// that user may see or mutate. One rule per resource: mutation requires
// ownership, read does not.

#[derive(Debug, Clone, Copy)]
pub enum ProjectAction {
    Update,
    Delete,
}

#[derive(Debug, Clone, Copy)]
pub enum BidAction {
    Update,
    Delete,
}

/// Which bids a caller's list is scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BidScope {
    ByFreelancer(Uuid),
    ByProjectClient(Uuid),
}

pub fn require_project_owner(
    caller: &User,
    project: &Project,
    action: ProjectAction,
) -> Result<(), AppError> {
    if project.client_id == caller.id {
        return Ok(());
    }
    let verb = match action {
        ProjectAction::Update => "update",
        ProjectAction::Delete => "delete",
    };
    Err(AppError::Permission(format!(
        "You can only {verb} your own projects."
    )))
}

pub fn require_freelancer(caller: &User) -> Result<(), AppError> {
    match caller.role {
        Role::Freelancer => Ok(()),
        Role::Client => Err(AppError::Permission(
            "Only freelancers can create bids.".into(),
        )),
    }
}

/// Freelancers see their own bids, clients see bids on their projects. The
/// role enum is closed, so there is no unknown-role branch to fall through.
pub fn bid_scope(caller: &User) -> BidScope {
    match caller.role {
        Role::Freelancer => BidScope::ByFreelancer(caller.id),
        Role::Client => BidScope::ByProjectClient(caller.id),
    }
}

/// A bid is visible iff it would appear in the caller's scoped list.
pub fn can_view_bid(caller: &User, bid: &Bid) -> bool {
    match caller.role {
        Role::Freelancer => bid.freelancer_id == caller.id,
        Role::Client => bid.project_client_id == caller.id,
    }
}

pub fn require_bid_owner(caller: &User, bid: &Bid, action: BidAction) -> Result<(), AppError> {
    if bid.freelancer_id == caller.id {
        return Ok(());
    }
    let verb = match action {
        BidAction::Update => "update",
        BidAction::Delete => "delete",
    };
    Err(AppError::Permission(format!(
        "You can only {verb} your own bids."
    )))
}
