use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A reply to a question, optionally nested under another reply.
///
/// Replies form a tree per question through `parent_reply_id`. Nothing checks
/// that the parent belongs to the same question.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Reply {
    pub id: Option<i64>,
    pub question_id: i64,
    pub parent_reply_id: Option<i64>,
    pub user_id: i64,
    pub body: String,
}

impl Reply {
    /// A fresh top-level reply.
    #[must_use]
    pub fn new(question_id: i64, user_id: i64, body: impl Into<String>) -> Self {
        Self {
            id: None,
            question_id,
            parent_reply_id: None,
            user_id,
            body: body.into(),
        }
    }

    /// Nest this reply under `parent_reply_id`.
    #[must_use]
    pub const fn with_parent(mut self, parent_reply_id: i64) -> Self {
        self.parent_reply_id = Some(parent_reply_id);
        self
    }

    #[must_use]
    pub const fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}
