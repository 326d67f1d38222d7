//! # Domain Module
//!
//! Use-case services for the StoryPal client. Each service is a
//! single-purpose orchestration over the remote AI gateway and/or the
//! local cache, exposed as async functions returning `anyhow::Result`.
//!
//! ## Module Organization
//!
//! - **profile_service**: child profile lifecycle and learning progress
//! - **story_service**: story generation from profile context
//! - **dialogue_service**: chat turns with local history caching
//! - **recognition_service**: camera image recognition uploads
//! - **stats_service**: learning statistics recomputed from cached data
//!
//! Failures are generic results carrying their underlying cause; the
//! presentation layer decides what the child actually sees.

pub mod dialogue_service;
pub mod profile_service;
pub mod recognition_service;
pub mod stats_service;
pub mod story_service;

pub use dialogue_service::DialogueService;
pub use profile_service::ProfileService;
pub use recognition_service::RecognitionService;
pub use stats_service::LearningStatsService;
pub use story_service::StoryService;
