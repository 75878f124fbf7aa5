use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A question posted by a user.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Question {
    pub id: Option<i64>,
    pub title: String,
    pub body: String,
    /// References `users.id`.
    pub author_id: i64,
}

impl Question {
    /// A fresh, unpersisted question.
    #[must_use]
    pub fn new(title: impl Into<String>, body: impl Into<String>, author_id: i64) -> Self {
        Self {
            id: None,
            title: title.into(),
            body: body.into(),
            author_id,
        }
    }

    #[must_use]
    pub const fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}
