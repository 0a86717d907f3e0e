//! External delivery channels for account events.

pub mod email;
