//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` + `Validate` request DTOs for creates and patches
//! - Any fully-resolved insert struct the services hand to the stores

pub mod asset;
pub mod location;
pub mod ticket;
pub mod user;
