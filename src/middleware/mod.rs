pub mod auth;
pub mod client_addr;
pub mod json_body;

pub use auth::CurrentSession;
pub use client_addr::ClientAddr;
pub use json_body::JsonBody;
