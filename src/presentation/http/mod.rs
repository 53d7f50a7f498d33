pub mod auth;
pub mod bids;
pub mod error;
pub mod health;
pub mod projects;
