//! Factory methods for creating test data in the database.
//!
//! Each entity has a `Factory` builder for customization and a `create_*` shorthand for
//! default values. Factories insert rows; for in-memory models see `fixture`.
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let user = factory::create_user(db).await?;
//! let application = factory::rp_application::RpApplicationFactory::new(db, &user.discord_id)
//!     .status("accepted")
//!     .build()
//!     .await?;
//! ```

pub mod helpers;
pub mod rp_application;
pub mod user;
pub mod verification_code;

pub use rp_application::create_application;
pub use user::create_user;
pub use verification_code::create_verification_code;
