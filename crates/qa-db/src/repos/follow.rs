//! Question follow repository.
//!
//! `question_follows` is a join table between users and questions. The same
//! pair may appear more than once, so reads de-duplicate.

use qa_core::entities::{FollowCount, Question, QuestionFollow, User};

use crate::error::DatabaseError;
use crate::helpers::{FromRecord, Record};
use crate::service::{QaService, ensure_unsaved};

const ENTITY: &str = "QuestionFollow";

impl FromRecord for QuestionFollow {
    fn from_record(record: &Record) -> Result<Self, DatabaseError> {
        Ok(Self {
            id: record.opt_i64("id")?,
            user_id: record.i64("user_id")?,
            question_id: record.i64("question_id")?,
        })
    }
}

impl FromRecord for FollowCount {
    fn from_record(record: &Record) -> Result<Self, DatabaseError> {
        Ok(Self {
            question: Question::from_record(record)?,
            followers: record.i64("num_followers")?,
        })
    }
}

impl QaService {
    /// Insert `follow` into `question_follows` and back-fill its id.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::AlreadyPersisted` if `follow.id` is set, or
    /// `DatabaseError` if the insert fails.
    pub async fn create_question_follow(
        &self,
        follow: &mut QuestionFollow,
    ) -> Result<i64, DatabaseError> {
        ensure_unsaved(ENTITY, follow.id)?;
        let id = self
            .insert(
                "question_follows",
                "INSERT INTO question_follows (user_id, question_id) VALUES (?1, ?2)",
                libsql::params![follow.user_id, follow.question_id],
            )
            .await?;
        follow.id = Some(id);
        Ok(id)
    }

    pub async fn find_question_follow(
        &self,
        id: i64,
    ) -> Result<Option<QuestionFollow>, DatabaseError> {
        self.query_first(
            "SELECT * FROM question_follows WHERE question_follows.id = ?1",
            libsql::params![id],
        )
        .await
    }

    /// Distinct users following a question, by user id.
    pub async fn followers_for_question(
        &self,
        question_id: i64,
    ) -> Result<Vec<User>, DatabaseError> {
        self.query_all(
            "SELECT DISTINCT users.*
             FROM users
             JOIN question_follows ON users.id = question_follows.user_id
             WHERE question_follows.question_id = ?1
             ORDER BY users.id",
            libsql::params![question_id],
        )
        .await
    }

    /// Distinct questions a user follows, by question id.
    pub async fn followed_questions_for_user(
        &self,
        user_id: i64,
    ) -> Result<Vec<Question>, DatabaseError> {
        self.query_all(
            "SELECT DISTINCT questions.*
             FROM questions
             JOIN question_follows ON questions.id = question_follows.question_id
             JOIN users ON users.id = question_follows.user_id
             WHERE users.id = ?1
             ORDER BY questions.id",
            libsql::params![user_id],
        )
        .await
    }

    /// The `n` questions with the most distinct followers, highest first.
    ///
    /// Ties are broken by question id. Questions with no followers never appear.
    pub async fn most_followed_questions(&self, n: u32) -> Result<Vec<FollowCount>, DatabaseError> {
        self.query_all(
            "SELECT questions.*, COUNT(DISTINCT question_follows.user_id) AS num_followers
             FROM questions
             JOIN question_follows ON questions.id = question_follows.question_id
             GROUP BY questions.id
             ORDER BY num_followers DESC, questions.id ASC
             LIMIT ?1",
            libsql::params![i64::from(n)],
        )
        .await
    }
}
