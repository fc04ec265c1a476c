//! Start page entry point: the gym/user selection wizard.
//! Wires form state, user lookups, preloads and submission to the view
//! components.

use ascend_stats::{
    api::{resolve_lookup, send_preload, HttpApi, LookupResolution, StatsApi},
    browser,
    cache::{GymUserCache, LookupTracker},
    components::{
        ClimbTypeSelector, Directions, GradingSystemPanels, GymList, GymRow, GymSearch,
        LoadingScreen, LookupGymSelect, RememberMeCheckbox, RememberedUsersSelect, UserSelect,
    },
    config::{self, RememberedUser, StartPageData, ALERT_NO_USERS_FOUND, START_ROOT_ID},
    form::{FormAction, FormState},
    hooks::use_viewport_width,
    logging, nav, ClimbType, GradingSystem, GymId,
};
use log::{debug, error, info, warn, LevelFilter};
use std::rc::Rc;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
struct StartPageProps {
    data: Rc<StartPageData>,
    /// Absent when the page carries no preload marker; preloading is then off.
    fingerprint: Option<Rc<str>>,
}

/// Handles that live for the whole page and are shared with async tasks.
#[derive(Clone)]
struct Session {
    api: Rc<dyn StatsApi>,
    cache: GymUserCache,
    tracker: LookupTracker,
}

impl Session {
    fn new() -> Self {
        Self {
            api: Rc::new(HttpApi),
            cache: GymUserCache::new(),
            tracker: LookupTracker::new(),
        }
    }
}

#[function_component(StartPage)]
fn start_page(props: &StartPageProps) -> Html {
    let form = {
        let gyms = props.data.gyms.clone();
        use_reducer(move || FormState::new(gyms))
    };
    let session = use_memo((), |_| Session::new());
    let viewport_width = use_viewport_width();

    // Warm the server cache whenever the selection becomes complete or changes.
    {
        let session = session.clone();
        let preload = props
            .fingerprint
            .as_deref()
            .and_then(|fp| form.preload(fp));
        use_effect_with(preload, move |preload| {
            if let Some(preload) = preload.clone() {
                send_preload(session.api.clone(), preload);
            }
        });
    }

    let on_lookup_gym = {
        let form = form.clone();
        let session = session.clone();
        Callback::from(move |gym: GymId| {
            let ticket = session.tracker.begin(gym);
            form.dispatch(FormAction::BeginLookup(gym));

            let form = form.clone();
            let session = session.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let resolution = resolve_lookup(
                    &session.cache,
                    &session.tracker,
                    session.api.as_ref(),
                    ticket,
                )
                .await;
                match resolution {
                    LookupResolution::Users(users) => {
                        let empty = users.is_empty();
                        form.dispatch(FormAction::FinishLookup { gym, users });
                        if empty {
                            browser::alert(ALERT_NO_USERS_FOUND);
                        }
                    }
                    LookupResolution::Stale => {}
                }
            });
        })
    };

    let on_remembered = {
        let form = form.clone();
        let session = session.clone();
        Callback::from(move |choice: Option<RememberedUser>| {
            session.tracker.invalidate();
            form.dispatch(FormAction::ChooseRemembered(choice));
        })
    };

    let on_submit = {
        let form = form.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            match form.plan_submission() {
                Ok(plan) => {
                    form.dispatch(FormAction::StartLoading);
                    if let Err(e) = browser::execute(&plan) {
                        error!("Submitting the selection failed: {:?}", e);
                    }
                }
                Err(reason) => {
                    warn!("Submit rejected: {}", reason);
                    browser::alert(&reason.to_string());
                }
            }
        })
    };

    if form.loading {
        return html! { <LoadingScreen /> };
    }

    let rows: Vec<GymRow> = {
        let visible: Vec<GymId> = form.visible_gyms().iter().map(|g| g.id).collect();
        form.gyms()
            .iter()
            .map(|g| GymRow {
                id: g.id,
                name: g.name.clone(),
                visible: visible.contains(&g.id),
                checked: form.is_checked(g.id),
            })
            .collect()
    };

    let on_climb_type = {
        let form = form.clone();
        Callback::from(move |climb_type: ClimbType| {
            form.dispatch(FormAction::SwitchClimbType(climb_type))
        })
    };
    let on_grading_system = {
        let form = form.clone();
        Callback::from(move |system: GradingSystem| {
            form.dispatch(FormAction::SetGradingSystem(system))
        })
    };
    let on_search = {
        let form = form.clone();
        Callback::from(move |term: String| form.dispatch(FormAction::Search(term)))
    };
    let on_toggle_gym = {
        let form = form.clone();
        Callback::from(move |(id, checked): (GymId, bool)| {
            form.dispatch(FormAction::ToggleGym { id, checked })
        })
    };
    let on_user = {
        let form = form.clone();
        Callback::from(move |idx: usize| form.dispatch(FormAction::SelectUser(idx)))
    };
    let on_remember_me = {
        let form = form.clone();
        Callback::from(move |checked: bool| form.dispatch(FormAction::SetRememberMe(checked)))
    };

    html! {
        <form id="start-form" onsubmit={on_submit}>
            <Directions viewport_width={viewport_width} />

            <section class="selection">
                <ClimbTypeSelector
                    selected={form.climb_type}
                    on_change={on_climb_type}
                />
                <GradingSystemPanels
                    climb_type={form.climb_type}
                    selected={form.grading_system}
                    on_change={on_grading_system}
                />
                <GymSearch
                    value={form.search.clone()}
                    on_input={on_search}
                />
                <GymList
                    rows={rows}
                    on_toggle={on_toggle_gym}
                />
            </section>

            <section class="user">
                <RememberedUsersSelect
                    users={Rc::new(props.data.remembered_users.clone())}
                    selected={form.remembered().cloned()}
                    on_change={on_remembered}
                />
                <LookupGymSelect
                    gyms={Rc::new(form.gyms().to_vec())}
                    selected={form.lookup_gym}
                    locked_label={form.lookup_locked().then(|| form.lookup_label().to_string())}
                    on_change={on_lookup_gym}
                />
                <UserSelect
                    selection={form.users.clone()}
                    on_change={on_user}
                />
                <RememberMeCheckbox
                    state={form.remember_me}
                    on_change={on_remember_me}
                />
            </section>

            <button type="submit" id="submit">{ "Show my stats" }</button>
        </form>
    }
}

fn main() {
    logging::init(LevelFilter::Info);
    nav::install();

    let data = StartPageData::load().unwrap_or_else(|e| {
        error!("Start page data unavailable: {}", e);
        StartPageData::default()
    });
    let fingerprint = match config::preload_fingerprint() {
        Ok(fp) => Some(Rc::from(fp)),
        Err(e) => {
            debug!("Preloading disabled: {}", e);
            None
        }
    };
    info!(
        "Start page booting with {} gyms and {} remembered users",
        data.gyms.len(),
        data.remembered_users.len()
    );

    let props = StartPageProps {
        data: Rc::new(data),
        fingerprint,
    };
    match gloo_utils::document().get_element_by_id(START_ROOT_ID) {
        Some(root) => yew::Renderer::<StartPage>::with_root_and_props(root, props).render(),
        None => yew::Renderer::<StartPage>::with_props(props).render(),
    };
}
