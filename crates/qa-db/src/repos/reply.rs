//! Reply repository.
//!
//! Replies form a per-question tree through `parent_reply_id`.

use qa_core::entities::{Question, Reply, User};

use crate::error::DatabaseError;
use crate::helpers::{FromRecord, Record};
use crate::service::{QaService, ensure_unsaved, require_id};

const ENTITY: &str = "Reply";

impl FromRecord for Reply {
    fn from_record(record: &Record) -> Result<Self, DatabaseError> {
        Ok(Self {
            id: record.opt_i64("id")?,
            question_id: record.i64("question_id")?,
            parent_reply_id: record.opt_i64("parent_reply_id")?,
            user_id: record.i64("user_id")?,
            body: record.string("body")?,
        })
    }
}

impl QaService {
    /// Insert `reply` and back-fill its id.
    ///
    /// The parent, if any, is not checked against `question_id`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::AlreadyPersisted` if `reply.id` is set, or
    /// `DatabaseError` if the insert fails.
    pub async fn create_reply(&self, reply: &mut Reply) -> Result<i64, DatabaseError> {
        ensure_unsaved(ENTITY, reply.id)?;
        let id = self
            .insert(
                "replies",
                "INSERT INTO replies (question_id, parent_reply_id, user_id, body)
                 VALUES (?1, ?2, ?3, ?4)",
                libsql::params![
                    reply.question_id,
                    reply.parent_reply_id,
                    reply.user_id,
                    reply.body.as_str()
                ],
            )
            .await?;
        reply.id = Some(id);
        Ok(id)
    }

    pub async fn find_reply(&self, id: i64) -> Result<Option<Reply>, DatabaseError> {
        self.query_first("SELECT * FROM replies WHERE replies.id = ?1", libsql::params![id])
            .await
    }

    pub async fn find_replies_by_user_id(&self, user_id: i64) -> Result<Vec<Reply>, DatabaseError> {
        self.query_all(
            "SELECT * FROM replies WHERE replies.user_id = ?1 ORDER BY replies.id",
            libsql::params![user_id],
        )
        .await
    }

    pub async fn find_replies_by_question_id(
        &self,
        question_id: i64,
    ) -> Result<Vec<Reply>, DatabaseError> {
        self.query_all(
            "SELECT * FROM replies WHERE replies.question_id = ?1 ORDER BY replies.id",
            libsql::params![question_id],
        )
        .await
    }

    pub async fn reply_author(&self, reply: &Reply) -> Result<Option<User>, DatabaseError> {
        self.find_user(reply.user_id).await
    }

    /// The question this reply was posted under.
    pub async fn reply_question(&self, reply: &Reply) -> Result<Option<Question>, DatabaseError> {
        self.find_question(reply.question_id).await
    }

    /// The reply this one is nested under. No query is issued for a
    /// top-level reply.
    pub async fn reply_parent(&self, reply: &Reply) -> Result<Option<Reply>, DatabaseError> {
        match reply.parent_reply_id {
            Some(parent_id) => self.find_reply(parent_id).await,
            None => Ok(None),
        }
    }

    /// Direct children of this reply, oldest first.
    pub async fn reply_children(&self, reply: &Reply) -> Result<Vec<Reply>, DatabaseError> {
        let id = require_id(ENTITY, reply.id)?;
        self.query_all(
            "SELECT * FROM replies WHERE replies.parent_reply_id = ?1 ORDER BY replies.id",
            libsql::params![id],
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{seed_question, seed_reply, seed_user, test_service};
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn create_and_find_reply() {
        let svc = test_service().await;
        let user = seed_user(&svc, "Ada", "Lovelace").await;
        let question = seed_question(&svc, &user, "T").await;
        let mut reply = Reply::new(question.id.unwrap(), user.id.unwrap(), "an answer");
        assert!(!reply.is_persisted());
        let id = svc.create_reply(&mut reply).await.unwrap();
        assert!(reply.is_persisted());

        let fetched = svc.find_reply(id).await.unwrap().unwrap();
        assert_eq!(fetched, reply);
        assert_eq!(fetched.parent_reply_id, None);
    }

    #[tokio::test]
    async fn reply_question_is_a_question() {
        let svc = test_service().await;
        let user = seed_user(&svc, "Ada", "Lovelace").await;
        // Ids of the user and the question differ so a mix-up would show.
        seed_user(&svc, "Padding", "User").await;
        let other = seed_user(&svc, "Grace", "Hopper").await;
        let question = seed_question(&svc, &other, "T").await;
        let reply = seed_reply(&svc, &question, &user, None, "answer").await;

        assert_eq!(svc.reply_question(&reply).await.unwrap(), Some(question));
        assert_eq!(svc.reply_author(&reply).await.unwrap(), Some(user));
    }

    #[tokio::test]
    async fn parent_reply_lookup() {
        let svc = test_service().await;
        let user = seed_user(&svc, "Ada", "Lovelace").await;
        let question = seed_question(&svc, &user, "T").await;
        let parent = seed_reply(&svc, &question, &user, None, "parent").await;
        let child = seed_reply(&svc, &question, &user, Some(&parent), "child").await;

        assert_eq!(svc.reply_parent(&child).await.unwrap(), Some(parent.clone()));
        assert_eq!(svc.reply_parent(&parent).await.unwrap(), None);
    }

    #[tokio::test]
    async fn children_are_direct_descendants_only() {
        let svc = test_service().await;
        let user = seed_user(&svc, "Ada", "Lovelace").await;
        let question = seed_question(&svc, &user, "T").await;
        let root = seed_reply(&svc, &question, &user, None, "root").await;
        let a = seed_reply(&svc, &question, &user, Some(&root), "a").await;
        let b = seed_reply(&svc, &question, &user, Some(&root), "b").await;
        let grandchild = seed_reply(&svc, &question, &user, Some(&a), "a.1").await;

        assert_eq!(svc.reply_children(&root).await.unwrap(), vec![a.clone(), b]);
        assert_eq!(svc.reply_children(&a).await.unwrap(), vec![grandchild.clone()]);
        assert!(svc.reply_children(&grandchild).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn replies_by_user() {
        let svc = test_service().await;
        let ada = seed_user(&svc, "Ada", "Lovelace").await;
        let grace = seed_user(&svc, "Grace", "Hopper").await;
        let question = seed_question(&svc, &ada, "T").await;
        let r1 = seed_reply(&svc, &question, &grace, None, "one").await;
        seed_reply(&svc, &question, &ada, None, "two").await;
        let r3 = seed_reply(&svc, &question, &grace, None, "three").await;

        assert_eq!(
            svc.find_replies_by_user_id(grace.id.unwrap()).await.unwrap(),
            vec![r1, r3]
        );
    }

    #[tokio::test]
    async fn create_twice_is_rejected() {
        let svc = test_service().await;
        let user = seed_user(&svc, "Ada", "Lovelace").await;
        let question = seed_question(&svc, &user, "T").await;
        let mut reply = seed_reply(&svc, &question, &user, None, "once").await;

        assert!(matches!(
            svc.create_reply(&mut reply).await,
            Err(DatabaseError::AlreadyPersisted { entity: "Reply", .. })
        ));
        assert_eq!(svc.question_replies(&question).await.unwrap().len(), 1);
    }
}
