//! Workbound domain core.
//!
//! Pure domain logic shared by the repository and API layers: the error
//! type, generated identifiers, float ordering, the permission vocabulary,
//! role levels, list filters, field validation and thumbnail generation.

pub mod error;
pub mod filters;
pub mod ids;
pub mod ordering;
pub mod permissions;
pub mod roles;
pub mod thumbnail;
pub mod types;
pub mod validation;
