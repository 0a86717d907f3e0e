//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//!
//! Create/update DTOs derive `Validate`; the service layer calls
//! `validate()` before anything reaches a repository.

pub mod auth_token;
pub mod category;
pub mod permission;
pub mod portfolio;
pub mod profile;
pub mod role;
pub mod section;
pub mod task;
pub mod user;
pub mod work_item;
