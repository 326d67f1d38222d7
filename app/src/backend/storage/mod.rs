//! # Storage Module
//!
//! Local persistence for the StoryPal client. The local database is a
//! cache: dialogue messages are appended so conversations survive
//! restarts, and the child profile lives here because it is created on
//! first use and only ever changed by explicit updates.
//!
//! The domain layer talks to storage exclusively through the traits in
//! [`traits`], so the SQLite implementation can be swapped without
//! touching any service.

pub mod sqlite;
pub mod traits;

pub use sqlite::connection::DbConnection;
pub use sqlite::repositories::{DialogueRepository, ProfileRepository};
pub use traits::{DialogueStorage, ProfileStorage};
