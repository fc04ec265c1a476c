use crate::config::{DISPLAY_NAME_MAX_CHARS, NARROW_LAYOUT_MAX_WIDTH, USER_ID_LEN};
use crate::{GymId, UserEntry};
use once_cell::sync::Lazy;
use regex::Regex;

static USER_ID_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"^[0-9]{{{}}}$", USER_ID_LEN)).unwrap());

/// A TopLogger user id is exactly ten ASCII digits.
pub fn is_valid_user_id(uid: &str) -> bool {
    USER_ID_REGEX.is_match(uid)
}

/// Name shown on the dashboard: the full name, or only the first name when
/// the full name is longer than eleven characters.
pub fn display_name(full_name: &str) -> String {
    let trimmed = full_name.trim();
    if trimmed.chars().count() > DISPLAY_NAME_MAX_CHARS {
        trimmed.split_whitespace().next().unwrap_or(trimmed).to_string()
    } else {
        trimmed.to_string()
    }
}

/// Sort users alphabetically by name, ignoring case.
pub fn sort_users(users: &mut [UserEntry]) {
    users.sort_by_cached_key(|u| u.name.to_lowercase());
}

pub fn join_gym_ids(ids: &[GymId]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Where the rest of the page is, relative to the form, for a viewport width.
pub fn directions(viewport_width: f64) -> (&'static str, &'static str) {
    if viewport_width <= NARROW_LAYOUT_MAX_WIDTH {
        ("Further down", "at the bottom")
    } else {
        ("To the right", "in the bottom-right corner")
    }
}
