//! Database repository layer.
//!
//! Repositories wrap a borrowed `DatabaseConnection`, use SeaORM entity models internally
//! and hand domain models back to the service layer.

pub mod rp_application;
pub mod user;
pub mod verification_code;

#[cfg(test)]
mod test;
