//! User repository.

use qa_core::entities::{Question, Reply, User};

use crate::error::DatabaseError;
use crate::helpers::{FromRecord, Record};
use crate::service::{QaService, ensure_unsaved, require_id};

const ENTITY: &str = "User";

impl FromRecord for User {
    fn from_record(record: &Record) -> Result<Self, DatabaseError> {
        Ok(Self {
            id: record.opt_i64("id")?,
            fname: record.string("fname")?,
            lname: record.string("lname")?,
        })
    }
}

impl QaService {
    /// Insert `user` and back-fill its id.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::AlreadyPersisted` if `user.id` is set, or
    /// `DatabaseError` if the insert fails (the id stays unset).
    pub async fn create_user(&self, user: &mut User) -> Result<i64, DatabaseError> {
        ensure_unsaved(ENTITY, user.id)?;
        let id = self
            .insert(
                "users",
                "INSERT INTO users (fname, lname) VALUES (?1, ?2)",
                libsql::params![user.fname.as_str(), user.lname.as_str()],
            )
            .await?;
        user.id = Some(id);
        Ok(id)
    }

    pub async fn find_user(&self, id: i64) -> Result<Option<User>, DatabaseError> {
        self.query_first("SELECT * FROM users WHERE users.id = ?1", libsql::params![id])
            .await
    }

    /// First user with exactly this first and last name.
    pub async fn find_user_by_name(
        &self,
        fname: &str,
        lname: &str,
    ) -> Result<Option<User>, DatabaseError> {
        self.query_first(
            "SELECT * FROM users WHERE users.fname = ?1 AND users.lname = ?2 ORDER BY users.id",
            libsql::params![fname, lname],
        )
        .await
    }

    pub async fn all_users(&self) -> Result<Vec<User>, DatabaseError> {
        self.query_all("SELECT * FROM users ORDER BY users.id", ())
            .await
    }

    pub async fn user_authored_questions(&self, user: &User) -> Result<Vec<Question>, DatabaseError> {
        let id = require_id(ENTITY, user.id)?;
        self.find_questions_by_author_id(id).await
    }

    pub async fn user_authored_replies(&self, user: &User) -> Result<Vec<Reply>, DatabaseError> {
        let id = require_id(ENTITY, user.id)?;
        self.find_replies_by_user_id(id).await
    }

    pub async fn user_followed_questions(&self, user: &User) -> Result<Vec<Question>, DatabaseError> {
        let id = require_id(ENTITY, user.id)?;
        self.followed_questions_for_user(id).await
    }

    pub async fn user_liked_questions(&self, user: &User) -> Result<Vec<Question>, DatabaseError> {
        let id = require_id(ENTITY, user.id)?;
        self.liked_questions_for_user(id).await
    }
}
