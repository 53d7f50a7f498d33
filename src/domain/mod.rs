pub mod bids;
pub mod projects;
pub mod users;
