//! Service layer for business logic and orchestration.
//!
//! Services sit between the controllers and the repositories. They apply business rules,
//! coordinate repository calls with the Discord webhook and OAuth endpoints, and work with
//! domain models rather than DTOs or entity models.

pub mod auth;
pub mod discord_bridge;
pub mod moderation_token;
pub mod rp_application;
pub mod user;
pub mod verification;
