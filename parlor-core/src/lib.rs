//! # parlor-core
//!
//! Core library for parlor - workspace and conversation records for AI
//! chat projects.
//!
//! This library provides:
//! - Domain types for projects, conversations, todos, and the
//!   project-scoped virtual file system
//! - A single canonical timestamp representation, with the textual form
//!   confined to the serde boundary
//! - Shape-conformance checks for records arriving from external code
//! - The declarative test-harness configuration record
//! - Configuration loading and logging infrastructure
//!
//! Lifecycle logic is out of scope: how records are created, persisted,
//! or synchronized is the consuming application's business. This crate
//! defines the records, their encoding, and nothing else.
//!
//! ## Example
//!
//! ```rust
//! use parlor_core::{codec, ConversationData, ConversationId, ConversationMetadata, Timestamp};
//!
//! let now = Timestamp::now();
//! let metadata = ConversationMetadata {
//!     id: ConversationId::first(),
//!     name: Some("kickoff".to_string()),
//!     created_at: now,
//!     last_modified: now,
//! };
//!
//! let data: ConversationData = ConversationData::new(metadata);
//! let text = codec::encode(&data).expect("encode");
//! let back: ConversationData = codec::decode(&text).expect("decode");
//! assert_eq!(back.metadata.id.to_string(), "conv-001");
//! ```

// Re-export commonly used items at the crate root
pub use config::{
    Config, CoverageConfig, CoverageProvider, CoverageReporter, Environment, HarnessConfig,
    LoggingConfig,
};
pub use error::{Error, Result};
pub use timestamp::Timestamp;
pub use types::*;

// Public modules
pub mod codec;
pub mod config;
pub mod error;
pub mod logging;
pub mod timestamp;
pub mod types;
