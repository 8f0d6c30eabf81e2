//! Domain logic for the personnel records service.
//!
//! Everything here is pure: no database, no HTTP. The store and router
//! crates build on these types.

pub mod error;
pub mod ids;
pub mod validation;
