//! SeaORM entities for the rpboard database.
//!
//! One module per table. The `prelude` re-exports each `Entity` under its table name so
//! callers can write `entity::prelude::RpApplication::find()`.

pub mod prelude;

pub mod rp_application;
pub mod user;
pub mod verification_code;
