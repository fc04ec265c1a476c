//! Cookies written on a successful submit.
//!
//! Values the server reads verbatim (`gyms`, ids, enum names, `name`) are
//! written as-is; the JSON `remembered` record is percent-encoded.

use crate::config::{RememberedUser, COOKIE_PATH};
use std::borrow::Cow;

pub const CLIMB_TYPE: &str = "climb_type";
pub const GRADING_SYSTEM: &str = "grading_system";
pub const GYMS: &str = "gyms";
pub const UID: &str = "uid";
pub const NAME: &str = "name";
pub const REMEMBERED: &str = "remembered";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    pub name: &'static str,
    pub value: String,
    encoded: bool,
}

impl Cookie {
    pub fn plain(name: &'static str, value: impl Into<String>) -> Self {
        Self {
            name,
            value: value.into(),
            encoded: false,
        }
    }

    pub fn encoded(name: &'static str, value: impl Into<String>) -> Self {
        Self {
            name,
            value: value.into(),
            encoded: true,
        }
    }

    /// The value as it appears on the wire.
    pub fn wire_value(&self) -> Cow<'_, str> {
        if self.encoded {
            urlencoding::encode(&self.value)
        } else {
            Cow::Borrowed(&self.value)
        }
    }

    /// `document.cookie` assignment string expiring at `expires` (UTC date).
    pub fn to_assignment(&self, expires: &str) -> String {
        format!(
            "{}={};expires={};path={};",
            self.name,
            self.wire_value(),
            expires,
            COOKIE_PATH
        )
    }
}

/// The remembered-user cookie holds the record as JSON.
pub fn remembered_cookie(user: &RememberedUser) -> Result<Cookie, serde_json::Error> {
    Ok(Cookie::encoded(REMEMBERED, serde_json::to_string(user)?))
}
