//! Question repository.

use qa_core::entities::{FollowCount, LikeCount, Question, Reply, User};

use crate::error::DatabaseError;
use crate::helpers::{FromRecord, Record};
use crate::service::{QaService, ensure_unsaved, require_id};

const ENTITY: &str = "Question";

impl FromRecord for Question {
    fn from_record(record: &Record) -> Result<Self, DatabaseError> {
        Ok(Self {
            id: record.opt_i64("id")?,
            title: record.string("title")?,
            body: record.string("body")?,
            author_id: record.i64("author_id")?,
        })
    }
}

impl QaService {
    /// Insert `question` and back-fill its id.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::AlreadyPersisted` if `question.id` is set, or
    /// `DatabaseError` if the insert fails (e.g. unknown author).
    pub async fn create_question(&self, question: &mut Question) -> Result<i64, DatabaseError> {
        ensure_unsaved(ENTITY, question.id)?;
        let id = self
            .insert(
                "questions",
                "INSERT INTO questions (title, body, author_id) VALUES (?1, ?2, ?3)",
                libsql::params![
                    question.title.as_str(),
                    question.body.as_str(),
                    question.author_id
                ],
            )
            .await?;
        question.id = Some(id);
        Ok(id)
    }

    pub async fn find_question(&self, id: i64) -> Result<Option<Question>, DatabaseError> {
        self.query_first(
            "SELECT * FROM questions WHERE questions.id = ?1",
            libsql::params![id],
        )
        .await
    }

    pub async fn find_questions_by_author_id(
        &self,
        author_id: i64,
    ) -> Result<Vec<Question>, DatabaseError> {
        self.query_all(
            "SELECT * FROM questions WHERE questions.author_id = ?1 ORDER BY questions.id",
            libsql::params![author_id],
        )
        .await
    }

    /// The user stored as this question's author.
    ///
    /// Reads `author_id` back from the row rather than trusting the in-memory
    /// value, so a question whose row is gone yields `None`.
    pub async fn question_author(&self, question: &Question) -> Result<Option<User>, DatabaseError> {
        let id = require_id(ENTITY, question.id)?;
        let records = self
            .query_records(
                "SELECT author_id FROM questions WHERE questions.id = ?1",
                libsql::params![id],
            )
            .await?;
        match records.first() {
            Some(record) => self.find_user(record.i64("author_id")?).await,
            None => Ok(None),
        }
    }

    pub async fn question_replies(&self, question: &Question) -> Result<Vec<Reply>, DatabaseError> {
        let id = require_id(ENTITY, question.id)?;
        self.find_replies_by_question_id(id).await
    }

    pub async fn question_followers(&self, question: &Question) -> Result<Vec<User>, DatabaseError> {
        let id = require_id(ENTITY, question.id)?;
        self.followers_for_question(id).await
    }

    pub async fn question_likers(&self, question: &Question) -> Result<Vec<User>, DatabaseError> {
        let id = require_id(ENTITY, question.id)?;
        self.likers_for_question(id).await
    }

    pub async fn question_num_likes(&self, question: &Question) -> Result<i64, DatabaseError> {
        let id = require_id(ENTITY, question.id)?;
        self.num_likes_for_question(id).await
    }

    /// The `n` most-followed questions, without their counts.
    pub async fn most_followed(&self, n: u32) -> Result<Vec<Question>, DatabaseError> {
        Ok(self
            .most_followed_questions(n)
            .await?
            .into_iter()
            .map(|FollowCount { question, .. }| question)
            .collect())
    }

    /// The `n` most-liked questions, without their counts.
    pub async fn most_liked(&self, n: u32) -> Result<Vec<Question>, DatabaseError> {
        Ok(self
            .most_liked_questions(n)
            .await?
            .into_iter()
            .map(|LikeCount { question, .. }| question)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{seed_question, seed_reply, seed_user, test_service};
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn create_and_find_question() {
        let svc = test_service().await;
        let author = seed_user(&svc, "Ada", "Lovelace").await;
        let mut question = Question::new("T", "B", author.id.unwrap());
        assert!(!question.is_persisted());
        let id = svc.create_question(&mut question).await.unwrap();
        assert!(question.is_persisted());

        let fetched = svc.find_question(id).await.unwrap().unwrap();
        assert_eq!(fetched, question);
    }

    #[tokio::test]
    async fn create_with_unknown_author_leaves_id_unset() {
        let svc = test_service().await;
        let mut question = Question::new("T", "B", 404);
        assert!(svc.create_question(&mut question).await.is_err());
        assert!(!question.is_persisted());
    }

    #[tokio::test]
    async fn find_by_author_id_empty_for_new_user() {
        let svc = test_service().await;
        let author = seed_user(&svc, "Ada", "Lovelace").await;
        let questions = svc
            .find_questions_by_author_id(author.id.unwrap())
            .await
            .unwrap();
        assert!(questions.is_empty());
    }

    #[tokio::test]
    async fn author_matches_creator() {
        let svc = test_service().await;
        let author = seed_user(&svc, "Ada", "Lovelace").await;
        let question = seed_question(&svc, &author, "T").await;

        let fetched = svc.question_author(&question).await.unwrap().unwrap();
        assert_eq!(fetched, author);
    }

    #[tokio::test]
    async fn author_of_deleted_question_is_none() {
        let svc = test_service().await;
        let author = seed_user(&svc, "Ada", "Lovelace").await;
        let question = seed_question(&svc, &author, "T").await;
        svc.db()
            .conn()
            .execute(
                "DELETE FROM questions WHERE id = ?1",
                libsql::params![question.id.unwrap()],
            )
            .await
            .unwrap();

        assert!(svc.question_author(&question).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn replies_belong_to_question() {
        let svc = test_service().await;
        let author = seed_user(&svc, "Ada", "Lovelace").await;
        let q1 = seed_question(&svc, &author, "one").await;
        let q2 = seed_question(&svc, &author, "two").await;
        let r1 = seed_reply(&svc, &q1, &author, None, "first").await;
        let r2 = seed_reply(&svc, &q1, &author, None, "second").await;
        seed_reply(&svc, &q2, &author, None, "elsewhere").await;

        assert_eq!(svc.question_replies(&q1).await.unwrap(), vec![r1, r2]);
    }

    #[tokio::test]
    async fn unsaved_question_has_no_author() {
        let svc = test_service().await;
        let question = Question::new("T", "B", 1);
        assert!(matches!(
            svc.question_author(&question).await,
            Err(DatabaseError::NotPersisted { entity: "Question" })
        ));
    }
}
