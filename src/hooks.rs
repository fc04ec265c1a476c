use crate::browser;
use crate::config::RESIZE_DEBOUNCE_MS;
use gloo_timers::callback::Timeout;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use yew::prelude::*;

/// Current viewport width, updated once resizing has settled.
#[hook]
pub fn use_viewport_width() -> f64 {
    let width = use_state(browser::viewport_width);

    {
        let width = width.clone();
        use_effect_with((), move |_| {
            let pending: Rc<RefCell<Option<Timeout>>> = Rc::default();
            let on_resize = Closure::<dyn Fn()>::new(move || {
                let width = width.clone();
                // Replacing the pending timer drops it, which cancels it.
                *pending.borrow_mut() = Some(Timeout::new(RESIZE_DEBOUNCE_MS, move || {
                    width.set(browser::viewport_width());
                }));
            });

            browser::listen_window("resize", on_resize.as_ref().unchecked_ref());

            move || {
                browser::unlisten_window("resize", on_resize.as_ref().unchecked_ref());
            }
        });
    }

    *width
}
