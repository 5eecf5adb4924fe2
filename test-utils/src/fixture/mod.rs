//! Test fixtures providing in-memory entity models without database insertion.
//!
//! Use fixtures for unit tests of pure logic (payload building, conversions). Use
//! `factory` when the row must exist in the database.
//!
//! ```rust,ignore
//! use test_utils::fixture;
//!
//! let application = fixture::rp_application::entity_builder()
//!     .status("accepted")
//!     .build();
//! ```

pub mod rp_application;
