//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`token`] -- Opaque API tokens (`Authorization: Token <key>`).
//! - [`identity`] -- External identity provider (`Authorization: Bearer <jwt>`).

pub mod identity;
pub mod password;
pub mod token;
