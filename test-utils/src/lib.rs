//! rpboard Test Utils
//!
//! Shared testing utilities for the rpboard server. Provides a builder for test contexts
//! backed by in-memory SQLite databases, entity factories and fixtures, and Serenity model
//! fixtures mirroring what Discord's API returns.
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::builder::TestBuilder;
//!
//! #[tokio::test]
//! async fn submits_application() -> Result<(), TestError> {
//!     let test = TestBuilder::new().with_rp_tables().build().await?;
//!
//!     let db = test.db.as_ref().unwrap();
//!     // Perform database operations...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
pub mod fixture;
pub mod serenity;
