use ascend_stats::filter::{is_visible, visible_gyms};
use ascend_stats::form::{FormAction, FormState};
use ascend_stats::{ClimbType, GymOption};
use quickcheck_macros::quickcheck;

fn gym(id: u32, key: &str, boulder: bool, route: bool) -> GymOption {
    GymOption {
        id,
        name: key.to_string(),
        search_key: key.to_lowercase(),
        boulder,
        route,
    }
}

fn climb_type(route: bool) -> ClimbType {
    if route {
        ClimbType::Route
    } else {
        ClimbType::Boulder
    }
}

fn ascii(text: &str) -> String {
    text.chars().filter(|c| c.is_ascii_alphanumeric()).collect()
}

fn pack() -> Vec<GymOption> {
    vec![
        gym(130, "Monk Eindhoven", true, false),
        gym(183, "Neoliet Delft", true, true),
        gym(95, "Klimmuur Haarlem", false, true),
        gym(12, "Boulderhal Sterk", true, false),
    ]
}

#[quickcheck]
fn hidden_climb_type_is_never_shown(key: String, term: String, route: bool) -> bool {
    let ct = climb_type(route);
    let gym = gym(1, &key, ct != ClimbType::Boulder, ct != ClimbType::Route);
    !is_visible(&gym, ct, &term)
}

#[quickcheck]
fn any_substring_of_the_key_matches(key: String, start: usize, len: usize) -> bool {
    let key = ascii(&key).to_lowercase();
    if key.is_empty() {
        return true;
    }
    let start = start % key.len();
    let end = start + len % (key.len() - start + 1);
    let gym = gym(1, &key, true, true);
    is_visible(&gym, ClimbType::Boulder, &key[start..end].to_uppercase())
}

#[quickcheck]
fn blank_term_shows_every_supporting_gym(spaces: u8, route: bool) -> bool {
    let ct = climb_type(route);
    let term = " ".repeat(usize::from(spaces % 8));
    let gyms = pack();
    let shown: Vec<u32> = visible_gyms(&gyms, ct, &term).iter().map(|g| g.id).collect();
    let expected: Vec<u32> = gyms.iter().filter(|g| g.supports(ct)).map(|g| g.id).collect();
    shown == expected
}

#[quickcheck]
fn switching_climb_type_twice_equals_once(term: String, checks: Vec<bool>, route: bool) -> bool {
    let gyms = pack();
    let mut form = FormState::new(gyms.clone());
    form.apply(FormAction::Search(term));
    for (gym, checked) in gyms.iter().zip(checks) {
        form.apply(FormAction::ToggleGym { id: gym.id, checked });
    }

    let target = climb_type(route);
    form.apply(FormAction::SwitchClimbType(target));
    let once = form.clone();
    form.apply(FormAction::SwitchClimbType(target));
    form == once
}

#[test]
fn search_narrows_within_climb_type() {
    let gyms = pack();
    let shown: Vec<u32> = visible_gyms(&gyms, ClimbType::Route, "  DELFT ")
        .iter()
        .map(|g| g.id)
        .collect();
    assert_eq!(shown, [183]);
    assert!(visible_gyms(&gyms, ClimbType::Route, "monk").is_empty());
}
