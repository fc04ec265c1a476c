//! Pure Yew view components for the start page.
//!
//! Each component renders from props and reports user input through
//! callbacks; the state they display lives in `FormState`.

use crate::config::{
    RememberedUser, GYM_LOOKUP_PLACEHOLDER, REMEMBERED_NONE, REMEMBERED_PLACEHOLDER,
    USER_PLACEHOLDER_CHOOSE, USER_PLACEHOLDER_LOADING, USER_PLACEHOLDER_NO_GYM,
};
use crate::form::{RememberMe, UserSelection};
use crate::utils::directions;
use crate::{ClimbType, GradingSystem, GymId, GymOption};
use std::rc::Rc;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

fn select_value(e: &Event) -> String {
    e.target_unchecked_into::<HtmlSelectElement>().value()
}

#[derive(Properties, PartialEq)]
pub struct ClimbTypeSelectorProps {
    pub selected: ClimbType,
    pub on_change: Callback<ClimbType>,
}

#[function_component(ClimbTypeSelector)]
pub fn climb_type_selector(props: &ClimbTypeSelectorProps) -> Html {
    html! {
        <div id="climb-type">
            { ClimbType::ALL.iter().map(|&ct| {
                let on_change = props.on_change.clone();
                html! {
                    <div class="option">
                        <input type="radio"
                            name="climb-type"
                            id={format!("climb-type-{}", ct)}
                            value={ct.as_str()}
                            checked={ct == props.selected}
                            onchange={Callback::from(move |_| on_change.emit(ct))}
                        />
                        <label for={format!("climb-type-{}", ct)}>{ ct.label() }</label>
                    </div>
                }
            }).collect::<Html>() }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct GradingSystemPanelsProps {
    pub climb_type: ClimbType,
    pub selected: GradingSystem,
    pub on_change: Callback<GradingSystem>,
}

/// One panel per climb type; only the active climb type's panel is shown.
#[function_component(GradingSystemPanels)]
pub fn grading_system_panels(props: &GradingSystemPanelsProps) -> Html {
    ClimbType::ALL
        .iter()
        .map(|&ct| {
            let active = ct == props.climb_type;
            html! {
                <div id={format!("grading-system-{}", ct)} hidden={!active}>
                    { ct.grading_systems().iter().map(|&system| {
                        let on_change = props.on_change.clone();
                        let id = format!("grading-system-{}-{}", ct, system);
                        html! {
                            <div class="option">
                                <input type="radio"
                                    name="grading-system"
                                    id={id.clone()}
                                    value={system.as_str()}
                                    checked={active && system == props.selected}
                                    onchange={Callback::from(move |_| on_change.emit(system))}
                                />
                                <label for={id}>{ system.label() }</label>
                            </div>
                        }
                    }).collect::<Html>() }
                </div>
            }
        })
        .collect::<Html>()
}

#[derive(Properties, PartialEq)]
pub struct GymSearchProps {
    pub value: String,
    pub on_input: Callback<String>,
}

#[function_component(GymSearch)]
pub fn gym_search(props: &GymSearchProps) -> Html {
    let on_input = props.on_input.clone();
    html! {
        <input type="text"
            class="gym_search"
            placeholder="Search gyms"
            value={props.value.clone()}
            oninput={Callback::from(move |e: InputEvent| {
                let input: HtmlInputElement = e.target_unchecked_into();
                on_input.emit(input.value());
            })}
        />
    }
}

/// A gym checkbox row as the list shows it.
#[derive(Clone, PartialEq)]
pub struct GymRow {
    pub id: GymId,
    pub name: String,
    pub visible: bool,
    pub checked: bool,
}

#[derive(Properties, PartialEq)]
pub struct GymListProps {
    pub rows: Vec<GymRow>,
    pub on_toggle: Callback<(GymId, bool)>,
}

#[function_component(GymList)]
pub fn gym_list(props: &GymListProps) -> Html {
    html! {
        <div class="gyms">
            { props.rows.iter().map(|row| {
                let on_toggle = props.on_toggle.clone();
                let id = row.id;
                let input_id = format!("gym-{}", id);
                html! {
                    <div class="option" hidden={!row.visible}>
                        <input type="checkbox"
                            id={input_id.clone()}
                            name={id.to_string()}
                            checked={row.checked}
                            onchange={Callback::from(move |e: Event| {
                                let input: HtmlInputElement = e.target_unchecked_into();
                                on_toggle.emit((id, input.checked()));
                            })}
                        />
                        <label for={input_id}>{ &row.name }</label>
                    </div>
                }
            }).collect::<Html>() }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct LookupGymSelectProps {
    pub gyms: Rc<Vec<GymOption>>,
    pub selected: Option<GymId>,
    /// Set while a remembered user is shown: the selector is locked to it.
    pub locked_label: Option<String>,
    pub on_change: Callback<GymId>,
}

#[function_component(LookupGymSelect)]
pub fn lookup_gym_select(props: &LookupGymSelectProps) -> Html {
    if let Some(label) = &props.locked_label {
        return html! {
            <select id="username-gym" disabled=true>
                <option selected=true hidden=true>{ label }</option>
            </select>
        };
    }

    let on_change = props.on_change.clone();
    html! {
        <select id="username-gym"
            onchange={Callback::from(move |e: Event| {
                if let Ok(id) = select_value(&e).parse::<GymId>() {
                    on_change.emit(id);
                }
            })}
        >
            <option value="" disabled=true hidden=true selected={props.selected.is_none()}>
                { GYM_LOOKUP_PLACEHOLDER }
            </option>
            { props.gyms.iter().map(|gym| html! {
                <option value={gym.id.to_string()} selected={props.selected == Some(gym.id)}>
                    { &gym.name }
                </option>
            }).collect::<Html>() }
        </select>
    }
}

#[derive(Properties, PartialEq)]
pub struct UserSelectProps {
    pub selection: UserSelection,
    pub on_change: Callback<usize>,
}

#[function_component(UserSelect)]
pub fn user_select(props: &UserSelectProps) -> Html {
    let placeholder = |text: &str| {
        html! { <option value="" selected=true disabled=true hidden=true>{ text.to_string() }</option> }
    };

    match &props.selection {
        UserSelection::AwaitingGym => html! {
            <select id="username" disabled=true>{ placeholder(USER_PLACEHOLDER_NO_GYM) }</select>
        },
        UserSelection::Loading => html! {
            <select id="username" class="select-loading" disabled=true>
                { placeholder(USER_PLACEHOLDER_LOADING) }
            </select>
        },
        UserSelection::Remembered(record) => html! {
            <select id="username" disabled=true>{ placeholder(&record.name) }</select>
        },
        UserSelection::Choosing { users, selected } => {
            let on_change = props.on_change.clone();
            html! {
                <select id="username"
                    onchange={Callback::from(move |e: Event| {
                        if let Ok(idx) = select_value(&e).parse::<usize>() {
                            on_change.emit(idx);
                        }
                    })}
                >
                    <option value="" disabled=true selected={selected.is_none()}>
                        { USER_PLACEHOLDER_CHOOSE }
                    </option>
                    { users.iter().enumerate().map(|(idx, user)| html! {
                        <option value={idx.to_string()} selected={*selected == Some(idx)}>
                            { &user.name }
                        </option>
                    }).collect::<Html>() }
                </select>
            }
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct RememberedUsersSelectProps {
    pub users: Rc<Vec<RememberedUser>>,
    pub selected: Option<RememberedUser>,
    pub on_change: Callback<Option<RememberedUser>>,
}

#[function_component(RememberedUsersSelect)]
pub fn remembered_users_select(props: &RememberedUsersSelectProps) -> Html {
    if props.users.is_empty() {
        return html! {};
    }

    let on_change = {
        let users = props.users.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            let value = select_value(&e);
            if value == "none" {
                on_change.emit(None);
            } else if let Some(user) = value.parse::<usize>().ok().and_then(|i| users.get(i)) {
                on_change.emit(Some(user.clone()));
            }
        })
    };

    html! {
        <select id="remembered-users" onchange={on_change}>
            <option value="" disabled=true hidden=true selected={props.selected.is_none()}>
                { REMEMBERED_PLACEHOLDER }
            </option>
            <option value="none">{ REMEMBERED_NONE }</option>
            { props.users.iter().enumerate().map(|(idx, user)| html! {
                <option value={idx.to_string()} selected={props.selected.as_ref() == Some(user)}>
                    { format!("{} ({})", user.name, user.gym_name) }
                </option>
            }).collect::<Html>() }
        </select>
    }
}

#[derive(Properties, PartialEq)]
pub struct RememberMeProps {
    pub state: RememberMe,
    pub on_change: Callback<bool>,
}

#[function_component(RememberMeCheckbox)]
pub fn remember_me_checkbox(props: &RememberMeProps) -> Html {
    let on_change = props.on_change.clone();
    html! {
        <label id="remember-me">
            <input type="checkbox"
                class={classes!(props.state.disabled.then_some("remember-me-disabled"))}
                checked={props.state.checked}
                disabled={props.state.disabled}
                onchange={Callback::from(move |e: Event| {
                    let input: HtmlInputElement = e.target_unchecked_into();
                    on_change.emit(input.checked());
                })}
            />
            { "Remember me" }
        </label>
    }
}

#[derive(Properties, PartialEq)]
pub struct DirectionsProps {
    pub viewport_width: f64,
}

/// Tells the visitor where the rest of the page is for the current layout.
#[function_component(Directions)]
pub fn directions_hint(props: &DirectionsProps) -> Html {
    let (where_to, corner) = directions(props.viewport_width);
    html! {
        <p class="directions">
            <span id="direction-1">{ where_to }</span>
            { " you can pick the gyms to include; the button is " }
            <span id="direction-2">{ corner }</span>
            { "." }
        </p>
    }
}

#[function_component(LoadingScreen)]
pub fn loading_screen() -> Html {
    html! {
        <div id="loading">
            <div class="spinner"></div>
            <p>{ "Crunching your ascends..." }</p>
        </div>
    }
}
