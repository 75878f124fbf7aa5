//! Question like repository.
//!
//! `question_likes` records one vote per row. `user_likes = 0` is a
//! down-vote and is ignored by every "liked" read below.

use qa_core::entities::{LikeCount, Question, QuestionLike, User};

use crate::error::DatabaseError;
use crate::helpers::{FromRecord, Record};
use crate::service::{QaService, ensure_unsaved};

const ENTITY: &str = "QuestionLike";

impl FromRecord for QuestionLike {
    fn from_record(record: &Record) -> Result<Self, DatabaseError> {
        Ok(Self {
            id: record.opt_i64("id")?,
            question_id: record.i64("question_id")?,
            user_id: record.i64("user_id")?,
            user_likes: record.bool("user_likes")?,
        })
    }
}

impl FromRecord for LikeCount {
    fn from_record(record: &Record) -> Result<Self, DatabaseError> {
        Ok(Self {
            question: Question::from_record(record)?,
            likes: record.i64("num_likes")?,
        })
    }
}

impl QaService {
    /// Insert `like` into `question_likes` and back-fill its id.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::AlreadyPersisted` if `like.id` is set, or
    /// `DatabaseError` if the insert fails.
    pub async fn create_question_like(&self, like: &mut QuestionLike) -> Result<i64, DatabaseError> {
        ensure_unsaved(ENTITY, like.id)?;
        let id = self
            .insert(
                "question_likes",
                "INSERT INTO question_likes (question_id, user_id, user_likes) VALUES (?1, ?2, ?3)",
                libsql::params![like.question_id, like.user_id, like.user_likes],
            )
            .await?;
        like.id = Some(id);
        Ok(id)
    }

    pub async fn find_question_like(&self, id: i64) -> Result<Option<QuestionLike>, DatabaseError> {
        self.query_first(
            "SELECT * FROM question_likes WHERE question_likes.id = ?1",
            libsql::params![id],
        )
        .await
    }

    /// Distinct users who up-voted a question.
    pub async fn likers_for_question(&self, question_id: i64) -> Result<Vec<User>, DatabaseError> {
        self.query_all(
            "SELECT DISTINCT users.*
             FROM users
             JOIN question_likes ON users.id = question_likes.user_id
             WHERE question_likes.question_id = ?1 AND question_likes.user_likes != 0
             ORDER BY users.id",
            libsql::params![question_id],
        )
        .await
    }

    /// Number of distinct users who up-voted a question.
    pub async fn num_likes_for_question(&self, question_id: i64) -> Result<i64, DatabaseError> {
        let records = self
            .query_records(
                "SELECT COUNT(DISTINCT question_likes.user_id) AS num_likes
                 FROM question_likes
                 WHERE question_likes.question_id = ?1 AND question_likes.user_likes != 0",
                libsql::params![question_id],
            )
            .await?;
        records
            .first()
            .ok_or(DatabaseError::NoResult)?
            .i64("num_likes")
    }

    /// Distinct questions a user up-voted.
    pub async fn liked_questions_for_user(
        &self,
        user_id: i64,
    ) -> Result<Vec<Question>, DatabaseError> {
        self.query_all(
            "SELECT DISTINCT questions.*
             FROM questions
             JOIN question_likes ON questions.id = question_likes.question_id
             WHERE question_likes.user_id = ?1 AND question_likes.user_likes != 0
             ORDER BY questions.id",
            libsql::params![user_id],
        )
        .await
    }

    /// The `n` questions with the most distinct up-voters, highest first.
    pub async fn most_liked_questions(&self, n: u32) -> Result<Vec<LikeCount>, DatabaseError> {
        self.query_all(
            "SELECT questions.*, COUNT(DISTINCT question_likes.user_id) AS num_likes
             FROM questions
             JOIN question_likes ON questions.id = question_likes.question_id
             WHERE question_likes.user_likes != 0
             GROUP BY questions.id
             ORDER BY num_likes DESC, questions.id ASC
             LIMIT ?1",
            libsql::params![i64::from(n)],
        )
        .await
    }
}
