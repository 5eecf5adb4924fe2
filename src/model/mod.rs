//! Data transfer objects exchanged over the JSON API.
//!
//! These types define the wire format of the public HTTP surface and are documented in
//! the OpenAPI schema. Server-side domain models convert into them at the controller
//! boundary.

pub mod api;
pub mod rp_application;
pub mod user;
pub mod verification;
