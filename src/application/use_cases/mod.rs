pub mod auth;
pub mod bids;
pub mod projects;
