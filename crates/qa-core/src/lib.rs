//! # qa-core
//!
//! Entity types for the Q&A forum data-access layer.
//!
//! This crate holds the plain structs shared by every other crate:
//! - Forum entities (users, questions, replies)
//! - Join entities linking users to questions (follows, likes)
//! - Ranking rows returned by the "most followed" / "most liked" queries
//!
//! Nothing here touches the database. Persistence lives in `qa-db`.

pub mod entities;
