//! Thin wrappers over the browser APIs the start page needs.

use crate::config::COOKIE_TTL_MINUTES;
use crate::cookies::Cookie;
use crate::form::SubmitPlan;
use js_sys::{Date, Function};
use log::{info, warn};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlDocument;

/// Blocking `window.alert`.
pub fn alert(message: &str) {
    if let Err(e) = gloo_utils::window().alert_with_message(message) {
        warn!("alert failed: {:?}", e);
    }
}

/// Attach a window event listener; returns whether the browser accepted it.
pub fn listen_window(event: &str, listener: &Function) -> bool {
    match gloo_utils::window().add_event_listener_with_callback(event, listener) {
        Ok(()) => true,
        Err(e) => {
            warn!("Could not attach {} listener: {:?}", event, e);
            false
        }
    }
}

pub fn unlisten_window(event: &str, listener: &Function) -> bool {
    match gloo_utils::window().remove_event_listener_with_callback(event, listener) {
        Ok(()) => true,
        Err(e) => {
            warn!("Could not detach {} listener: {:?}", event, e);
            false
        }
    }
}

pub fn viewport_width() -> f64 {
    gloo_utils::window()
        .inner_width()
        .ok()
        .and_then(|w| w.as_f64())
        .unwrap_or_default()
}

/// UTC date string `minutes` from now, as used in a cookie's `expires`.
pub fn expiry_in(minutes: u32) -> String {
    let date = Date::new_0();
    date.set_time(date.get_time() + f64::from(minutes) * 60_000.0);
    date.to_utc_string().into()
}

pub fn write_cookie(cookie: &Cookie, expires: &str) -> Result<(), JsValue> {
    let document: HtmlDocument = gloo_utils::document().dyn_into()?;
    document.set_cookie(&cookie.to_assignment(expires))
}

pub fn navigate(path: &str) -> Result<(), JsValue> {
    gloo_utils::window().location().set_href(path)
}

/// Write every cookie of the plan, then leave for its destination.
pub fn execute(plan: &SubmitPlan) -> Result<(), JsValue> {
    let expires = expiry_in(COOKIE_TTL_MINUTES);
    for cookie in &plan.cookies {
        write_cookie(cookie, &expires)?;
    }
    info!("Submitting selection, navigating to {}", plan.destination);
    navigate(&plan.destination)
}
