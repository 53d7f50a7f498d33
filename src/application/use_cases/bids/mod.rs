pub mod create_bid;
pub mod delete_bid;
pub mod get_bid;
pub mod list_bids;
pub mod update_bid;
