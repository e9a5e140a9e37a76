pub mod auth;
pub mod posts;
pub mod review_count;
