//! Application-level configuration: constants plus the page bootstrap data
//! the server embeds next to the mount point.

use crate::error::ConfigError;
use crate::{GymId, GymOption, UserId};
use serde::{Deserialize, Serialize};

// Cookies
pub const COOKIE_TTL_MINUTES: u32 = 30;
pub const COOKIE_PATH: &str = "/";

// Form rules
pub const USER_ID_LEN: usize = 10;
pub const DISPLAY_NAME_MAX_CHARS: usize = 11;

// Placeholders
pub const GYM_LOOKUP_PLACEHOLDER: &str = "Select any gym with tops (last 60 days)";
pub const USER_PLACEHOLDER_NO_GYM: &str = "Select a gym first";
pub const USER_PLACEHOLDER_CHOOSE: &str = "Select your username";
pub const USER_PLACEHOLDER_LOADING: &str = "Loading users...";
pub const REMEMBERED_PLACEHOLDER: &str = "Select a remembered user";
pub const REMEMBERED_NONE: &str = "None";

// Alerts
pub const ALERT_NO_USER: &str = "You have to select whose stats you want to see";
pub const ALERT_BAD_USER_ID: &str = "Something went wrong determining who you are in TopLogger";
pub const ALERT_NO_GYM: &str = "You have to select at least one gym";
pub const ALERT_NO_USERS_FOUND: &str = "We couldn't find users, please select another gym";

// API
pub const USERS_ENDPOINT: &str = "/api/users";
pub const PRELOAD_ENDPOINT: &str = "/api/preload";

// UI behavior
pub const NARROW_LAYOUT_MAX_WIDTH: f64 = 1025.0;
pub const RESIZE_DEBOUNCE_MS: u32 = 150;

// DOM hooks provided by the server templates
pub const START_DATA_ID: &str = "start-data";
pub const START_ROOT_ID: &str = "start-app";
pub const PRELOAD_ID: &str = "preload";
pub const CHART_DATA_SELECTOR: &str = "script.chart-data";

/// A user stored through "remember me", rendered back into the page by the
/// server on the next visit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RememberedUser {
    pub name: String,
    pub uid: UserId,
    pub gym_name: String,
    pub gym_id: GymId,
}

/// Everything the start page needs from the server to boot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StartPageData {
    #[serde(default)]
    pub gyms: Vec<GymOption>,
    #[serde(default)]
    pub remembered_users: Vec<RememberedUser>,
}

impl StartPageData {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(text).map_err(|e| ConfigError::Malformed(e.to_string()))
    }

    /// Read the JSON document embedded in `#start-data`.
    pub fn load() -> Result<Self, ConfigError> {
        let element = gloo_utils::document()
            .get_element_by_id(START_DATA_ID)
            .ok_or(ConfigError::MissingElement(START_DATA_ID))?;
        Self::from_json(&element.text_content().unwrap_or_default())
    }
}

/// The fingerprint the server expects in preload requests, taken from the
/// `data-id` attribute of `#preload`.
pub fn preload_fingerprint() -> Result<String, ConfigError> {
    gloo_utils::document()
        .get_element_by_id(PRELOAD_ID)
        .and_then(|el| el.get_attribute("data-id"))
        .ok_or(ConfigError::MissingElement(PRELOAD_ID))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bootstrap_document() {
        let data = StartPageData::from_json(
            r#"{
                "gyms": [
                    {"id": 130, "name": "Monk Eindhoven", "search_key": "monk eindhoven", "boulder": true, "route": false},
                    {"id": 95, "name": "Neoliet", "search_key": "neoliet", "route": true}
                ],
                "remembered_users": [
                    {"name": "Marco", "uid": "6693546282", "gym_name": "Monk Eindhoven", "gym_id": 130}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(data.gyms.len(), 2);
        assert!(!data.gyms[1].boulder);
        assert_eq!(data.remembered_users[0].gym_id, 130);
    }

    #[test]
    fn missing_sections_default_to_empty() {
        assert_eq!(StartPageData::from_json("{}").unwrap(), StartPageData::default());
    }

    #[test]
    fn malformed_bootstrap_is_reported() {
        assert!(matches!(
            StartPageData::from_json("{\"gyms\": 3}"),
            Err(ConfigError::Malformed(_))
        ));
    }
}
