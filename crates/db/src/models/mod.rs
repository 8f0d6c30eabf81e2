//! Row structs and request DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` create and update DTOs using the UI's wire field names

pub mod department;
pub mod employee;
