//! Repository modules implementing create/find and association traversal
//! for every forum entity.
//!
//! Each module adds methods to `QaService` via `impl QaService` blocks.

pub mod follow;
pub mod like;
pub mod question;
pub mod reply;
pub mod user;
