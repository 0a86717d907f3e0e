//! Account lifecycle events and their email rendering.

use serde::Serialize;

/// Product name used in subjects and bodies.
const PRODUCT_NAME: &str = "Workbound";

/// A rendered email: plain-text body plus an optional HTML alternative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub text: String,
    pub html: Option<String>,
}

/// Something that happened to an account and needs to reach its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AccountEvent {
    /// A new account must confirm its address by following `link`.
    VerificationRequested { email: String, link: String },
}

impl AccountEvent {
    /// Stable name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            AccountEvent::VerificationRequested { .. } => "verification_requested",
        }
    }

    /// Render the event into the message sent to its recipient.
    pub fn to_email(&self) -> EmailMessage {
        match self {
            AccountEvent::VerificationRequested { email, link } => EmailMessage {
                to: email.clone(),
                subject: format!("{PRODUCT_NAME} Email verification link"),
                text: format!(
                    "Thanks for registering your account with {PRODUCT_NAME}\n\
                     Please verify your email address by visiting this link: {link}"
                ),
                html: Some(format!(
                    "<html>\n<body>\n\
                     <p>Thanks for registering your account with {PRODUCT_NAME}<br />\
                     Please verify your email address by visiting this link: \
                     <a href=\"{href}\">{text}</a></p>\
                     </body>\n</html>",
                    href = escape_attr(link),
                    text = escape_attr(link)
                )),
            },
        }
    }
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
