//! Test factories for creating Serenity API objects.
//!
//! Objects are built by deserializing JSON shaped like Discord's API responses, so they
//! are valid Serenity structs without any network access.
//!
//! ```rust,ignore
//! use test_utils::serenity::create_test_user;
//!
//! let user = create_test_user(123456789, "steve", Some("Steve"));
//! ```

pub mod user;

pub use user::{create_test_user, test_user_json};
