use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Question;

/// A user's vote on a question. `user_likes` is `false` for a down-vote.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct QuestionLike {
    pub id: Option<i64>,
    pub question_id: i64,
    pub user_id: i64,
    pub user_likes: bool,
}

impl QuestionLike {
    #[must_use]
    pub const fn new(question_id: i64, user_id: i64, user_likes: bool) -> Self {
        Self {
            id: None,
            question_id,
            user_id,
            user_likes,
        }
    }

    #[must_use]
    pub const fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}

/// One row of the most-liked ranking.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct LikeCount {
    pub question: Question,
    pub likes: i64,
}
