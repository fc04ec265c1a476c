//! Gym search filtering.
//!
//! Visibility is recomputed from scratch on every keystroke: a gym is shown
//! when it hosts the active climb type and the search term is empty or a
//! case-insensitive substring of its search key.

use crate::{ClimbType, GymOption};

/// Lowercase and trim raw search box text.
pub fn normalize_term(raw: &str) -> String {
    raw.trim().to_lowercase()
}

pub fn is_visible(gym: &GymOption, climb_type: ClimbType, term: &str) -> bool {
    if !gym.supports(climb_type) {
        return false;
    }
    let term = normalize_term(term);
    term.is_empty() || gym.search_key.to_lowercase().contains(&term)
}

pub fn visible_gyms<'a>(
    gyms: &'a [GymOption],
    climb_type: ClimbType,
    term: &str,
) -> Vec<&'a GymOption> {
    gyms.iter()
        .filter(|g| is_visible(g, climb_type, term))
        .collect()
}
