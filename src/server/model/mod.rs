//! Server-side domain models and parameter types.
//!
//! Domain models are converted from entity models at the repository boundary and
//! transformed to DTOs at the controller boundary, keeping business logic apart from
//! database and API concerns.

pub mod moderation;
pub mod rp_application;
pub mod user;
pub mod verification_code;
