pub mod post;
pub mod tags;

pub use post::{Post, PostDraft, PostFields, PostId};
pub use tags::{CategoryInput, Tags};
