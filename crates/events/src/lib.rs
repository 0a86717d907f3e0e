//! Workbound account events and outbound mail.
//!
//! - [`AccountEvent`] describes something a user must be told about
//!   (currently the email-verification link) and renders it to a message.
//! - [`delivery`] sends rendered messages over SMTP.

pub mod account;
pub mod delivery;

pub use account::{AccountEvent, EmailMessage};
pub use delivery::email::{EmailConfig, EmailDelivery, EmailError};
