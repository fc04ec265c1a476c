//! State of the start-page selection wizard.
//!
//! `FormState` is a plain value driven by `FormAction`s; the Yew layer only
//! dispatches actions and performs the effects the state asks for (submit
//! plans, preloads). Invariants kept here:
//!
//! - at most one user is selected, either picked from a gym's user list or
//!   taken from a remembered record, never both;
//! - a checked gym always hosts the active climb type;
//! - the grading system always belongs to the active climb type.

use crate::api::{Preload, PreloadRequest};
use crate::config::{RememberedUser, GYM_LOOKUP_PLACEHOLDER};
use crate::cookies::{self, Cookie};
use crate::error::ValidationError;
use crate::filter;
use crate::utils::{display_name, is_valid_user_id, join_gym_ids, sort_users};
use crate::{ClimbType, GradingSystem, GymId, GymOption, UserEntry, UserId};
use log::debug;
use std::collections::BTreeSet;
use std::rc::Rc;
use yew::Reducible;

/// The user selector's state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserSelection {
    /// No gym chosen yet, or the chosen gym has no users.
    AwaitingGym,
    Loading,
    Choosing {
        users: Rc<[UserEntry]>,
        selected: Option<usize>,
    },
    /// Locked to a remembered record.
    Remembered(RememberedUser),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RememberMe {
    pub checked: bool,
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormAction {
    Search(String),
    SwitchClimbType(ClimbType),
    SetGradingSystem(GradingSystem),
    ToggleGym { id: GymId, checked: bool },
    /// A gym was picked in the user-lookup selector.
    BeginLookup(GymId),
    FinishLookup { gym: GymId, users: Rc<[UserEntry]> },
    SelectUser(usize),
    /// `None` is the "none" entry of the remembered-users dropdown.
    ChooseRemembered(Option<RememberedUser>),
    SetRememberMe(bool),
    StartLoading,
}

/// What a successful submit has to do: write cookies, then navigate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitPlan {
    pub cookies: Vec<Cookie>,
    pub destination: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    gyms: Rc<Vec<GymOption>>,
    pub climb_type: ClimbType,
    pub grading_system: GradingSystem,
    pub search: String,
    checked: BTreeSet<GymId>,
    pub lookup_gym: Option<GymId>,
    pub users: UserSelection,
    pub remember_me: RememberMe,
    pub loading: bool,
}

impl FormState {
    pub fn new(gyms: Vec<GymOption>) -> Self {
        let climb_type = ClimbType::Boulder;
        Self {
            gyms: Rc::new(gyms),
            climb_type,
            grading_system: climb_type.grading_systems()[0],
            search: String::new(),
            checked: BTreeSet::new(),
            lookup_gym: None,
            users: UserSelection::AwaitingGym,
            remember_me: RememberMe {
                checked: false,
                disabled: true,
            },
            loading: false,
        }
    }

    pub fn gyms(&self) -> &[GymOption] {
        &self.gyms
    }

    pub fn visible_gyms(&self) -> Vec<&GymOption> {
        filter::visible_gyms(&self.gyms, self.climb_type, &self.search)
    }

    pub fn is_checked(&self, gym: GymId) -> bool {
        self.checked.contains(&gym)
    }

    /// Checked gym ids in the order the gym list shows them.
    pub fn checked_gyms(&self) -> Vec<GymId> {
        self.gyms
            .iter()
            .filter(|g| self.checked.contains(&g.id))
            .map(|g| g.id)
            .collect()
    }

    /// `(uid, full name)` of the selected user, if any.
    pub fn selected_user(&self) -> Option<(&str, &str)> {
        match &self.users {
            UserSelection::Choosing {
                users,
                selected: Some(idx),
            } => users.get(*idx).map(|u| (u.id.as_str(), u.name.as_str())),
            UserSelection::Remembered(r) => Some((r.uid.as_str(), r.name.as_str())),
            _ => None,
        }
    }

    pub fn remembered(&self) -> Option<&RememberedUser> {
        match &self.users {
            UserSelection::Remembered(r) => Some(r),
            _ => None,
        }
    }

    /// The gym-lookup selector is locked while a remembered user is shown.
    pub fn lookup_locked(&self) -> bool {
        matches!(self.users, UserSelection::Remembered(_))
    }

    /// Text of the gym-lookup selector.
    pub fn lookup_label(&self) -> &str {
        if let UserSelection::Remembered(r) = &self.users {
            return &r.gym_name;
        }
        self.lookup_gym
            .and_then(|id| self.gyms.iter().find(|g| g.id == id))
            .map(|g| g.name.as_str())
            .unwrap_or(GYM_LOOKUP_PLACEHOLDER)
    }

    pub fn apply(&mut self, action: FormAction) {
        match action {
            FormAction::Search(term) => self.search = term,
            FormAction::SwitchClimbType(climb_type) => self.switch_climb_type(climb_type),
            FormAction::SetGradingSystem(system) => {
                if self.climb_type.grading_systems().contains(&system) {
                    self.grading_system = system;
                }
            }
            FormAction::ToggleGym { id, checked } => self.toggle_gym(id, checked),
            FormAction::BeginLookup(gym) => {
                self.lookup_gym = Some(gym);
                self.users = UserSelection::Loading;
                self.remember_me.disabled = true;
            }
            FormAction::FinishLookup { gym, users } => self.finish_lookup(gym, users),
            FormAction::SelectUser(idx) => {
                if let UserSelection::Choosing { users, selected } = &mut self.users {
                    if idx < users.len() {
                        *selected = Some(idx);
                        self.remember_me.disabled = false;
                    }
                }
            }
            FormAction::ChooseRemembered(choice) => {
                self.remember_me.disabled = true;
                match choice {
                    Some(record) => {
                        self.lookup_gym = Some(record.gym_id);
                        self.users = UserSelection::Remembered(record);
                    }
                    None => {
                        self.lookup_gym = None;
                        self.users = UserSelection::AwaitingGym;
                    }
                }
            }
            FormAction::SetRememberMe(checked) => {
                if !self.remember_me.disabled {
                    self.remember_me.checked = checked;
                }
            }
            FormAction::StartLoading => self.loading = true,
        }
    }

    fn switch_climb_type(&mut self, climb_type: ClimbType) {
        self.climb_type = climb_type;
        self.grading_system = climb_type.grading_systems()[0];
        self.search.clear();
        self.checked.clear();
    }

    fn toggle_gym(&mut self, id: GymId, checked: bool) {
        if !checked {
            self.checked.remove(&id);
            return;
        }
        let supported = self
            .gyms
            .iter()
            .any(|g| g.id == id && g.supports(self.climb_type));
        if supported {
            self.checked.insert(id);
        } else {
            debug!("Ignoring check of gym {} without {} climbs", id, self.climb_type);
        }
    }

    fn finish_lookup(&mut self, gym: GymId, users: Rc<[UserEntry]>) {
        if self.lookup_gym != Some(gym) || self.users != UserSelection::Loading {
            debug!("Lookup for gym {} finished after the selection moved on", gym);
            return;
        }
        self.users = if users.is_empty() {
            UserSelection::AwaitingGym
        } else {
            let mut sorted = users.to_vec();
            sort_users(&mut sorted);
            UserSelection::Choosing {
                users: sorted.into(),
                selected: None,
            }
        };
    }

    fn valid_user(&self) -> Result<(&str, &str), ValidationError> {
        let (uid, name) = self.selected_user().ok_or(ValidationError::NoUserSelected)?;
        if !is_valid_user_id(uid) {
            return Err(ValidationError::MalformedUserId);
        }
        Ok((uid, name))
    }

    /// Validate the form and describe the submit. Never mutates the form.
    pub fn plan_submission(&self) -> Result<SubmitPlan, ValidationError> {
        let (uid, full_name) = self.valid_user()?;
        let gyms = self.checked_gyms();
        let single_gym = *gyms.last().ok_or(ValidationError::NoGymSelected)?;

        let mut cookies = vec![
            Cookie::plain(cookies::CLIMB_TYPE, self.climb_type.as_str()),
            Cookie::plain(cookies::GRADING_SYSTEM, self.grading_system.as_str()),
            Cookie::plain(cookies::GYMS, join_gym_ids(&gyms)),
            Cookie::plain(cookies::UID, uid),
            Cookie::plain(cookies::NAME, display_name(full_name)),
        ];

        if self.remember_me.checked {
            let record = self.remembered_record(uid, full_name);
            // Serializing four strings/ints cannot fail; skip the cookie if it somehow does.
            if let Ok(cookie) = cookies::remembered_cookie(&record) {
                cookies.push(cookie);
            }
        }

        let destination = if gyms.len() > 1 {
            format!("/{}", uid)
        } else {
            format!("/{}/{}", uid, single_gym)
        };

        Ok(SubmitPlan {
            cookies,
            destination,
        })
    }

    fn remembered_record(&self, uid: &str, full_name: &str) -> RememberedUser {
        if let UserSelection::Remembered(r) = &self.users {
            return r.clone();
        }
        let gym_id = self.lookup_gym.unwrap_or_default();
        RememberedUser {
            name: full_name.trim().to_string(),
            uid: uid.to_string(),
            gym_name: self.lookup_label().to_string(),
            gym_id,
        }
    }

    /// The preload to send for the current selection, if it is complete.
    pub fn preload(&self, fingerprint: &str) -> Option<Preload> {
        let (uid, _) = self.valid_user().ok()?;
        let gym_ids = self.checked_gyms();
        if gym_ids.is_empty() {
            return None;
        }
        Some(Preload {
            uid: UserId::from(uid),
            body: PreloadRequest {
                climb_type: self.climb_type,
                gym_ids,
                fp: fingerprint.to_string(),
            },
        })
    }
}

impl Reducible for FormState {
    type Action = FormAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        next.apply(action);
        Rc::new(next)
    }
}
