pub mod auth_guard;
pub mod posts;
pub mod site_config;

pub use auth_guard::{AuthGuard, Operation, Session, SessionClaims};
pub use posts::PostRepository;
pub use site_config::SiteConfigAccessor;
