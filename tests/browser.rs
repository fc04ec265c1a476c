#![cfg(target_arch = "wasm32")]

use ascend_stats::browser::{expiry_in, write_cookie};
use ascend_stats::cookies::{self, Cookie};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::HtmlDocument;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn expiry_is_a_utc_date_in_the_future() {
    let expires = expiry_in(30);
    assert!(expires.ends_with("GMT"));
    let parsed = js_sys::Date::parse(&expires);
    assert!(parsed > js_sys::Date::now());
}

#[wasm_bindgen_test]
fn written_cookie_is_readable() {
    let cookie = Cookie::plain(cookies::GYMS, "130,183");
    write_cookie(&cookie, &expiry_in(30)).unwrap();

    let document: HtmlDocument = gloo_utils::document().dyn_into().unwrap();
    assert!(document.cookie().unwrap().contains("gyms=130,183"));
}

#[wasm_bindgen_test]
fn window_listener_attaches_and_detaches() {
    use ascend_stats::browser::{listen_window, unlisten_window};
    use wasm_bindgen::closure::Closure;

    let on_resize = Closure::<dyn Fn()>::new(|| {});
    assert!(listen_window("resize", on_resize.as_ref().unchecked_ref()));
    assert!(unlisten_window("resize", on_resize.as_ref().unchecked_ref()));
}
