use serde::Serialize;

pub const THANK_YOU_MESSAGE: &str = "Thank you for your message! I will get back to you soon.";

/// Contents of the contact form at submit time. Only ever logged locally.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactMessage {
    /// Missing fields read as empty strings.
    pub fn from_fields(field_value: impl Fn(&str) -> Option<String>) -> Self {
        let read = |id: &str| field_value(id).unwrap_or_default();
        Self {
            name: read("name"),
            email: read("email"),
            subject: read("subject"),
            message: read("message"),
        }
    }

    pub fn log_fields(&self) -> serde_json::Value {
        serde_json::json!({ "form": self })
    }
}
