//! Entity structs for all forum domain objects.
//!
//! Each entity maps to one table (`users`, `questions`, `replies`,
//! `question_follows`, `question_likes`). The `id` of every entity is `None`
//! until the store assigns one on first persist.

mod follow;
mod like;
mod question;
mod reply;
mod user;

pub use follow::{FollowCount, QuestionFollow};
pub use like::{LikeCount, QuestionLike};
pub use question::Question;
pub use reply::Reply;
pub use user::User;
