pub mod auth;
pub mod health;
pub mod profile;
pub mod rp_application;
pub mod verification;
