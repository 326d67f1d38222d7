//! # SQLite Storage Module
//!
//! SQLite-backed implementations of the storage traits.
//!
//! ## Components
//!
//! - **connection.rs** - database connection management and schema setup
//! - **repositories/** - one repository per table

pub mod connection;
pub mod repositories;

pub use connection::DbConnection;
pub use repositories::{DialogueRepository, ProfileRepository};
