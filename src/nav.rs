//! Slide-out navigation menu.
//!
//! The menu markup is server-rendered on every page. The burger button and the
//! overlay share one toggle, so the two entry points can never disagree about
//! whether the menu is open.

use log::{debug, warn};
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

pub const OVERLAY_ID: &str = "navoverlay";
pub const PANE_ID: &str = "navpane";
pub const BURGER_ID: &str = "burger";
pub const CONTENT_ID: &str = "content";

/// Visual configuration for one menu state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuLayout {
    pub overlay_display: &'static str,
    pub pane_display: &'static str,
    pub content_position: &'static str,
    pub content_margin_right: &'static str,
    pub burger_transform: &'static str,
}

impl MenuLayout {
    pub fn for_state(open: bool) -> Self {
        if open {
            Self {
                overlay_display: "block",
                pane_display: "block",
                content_position: "fixed",
                content_margin_right: "8px",
                burger_transform: "rotate(90deg)",
            }
        } else {
            Self {
                overlay_display: "none",
                pane_display: "none",
                content_position: "absolute",
                content_margin_right: "0px",
                burger_transform: "rotate(-180deg)",
            }
        }
    }
}

/// Open/closed state of the menu; starts closed on every page load.
#[derive(Debug, Default)]
pub struct MenuState {
    open: Cell<bool>,
}

impl MenuState {
    /// Flip the state and return the layout to apply.
    pub fn toggle(&self) -> MenuLayout {
        let open = !self.open.get();
        self.open.set(open);
        MenuLayout::for_state(open)
    }

    pub fn is_open(&self) -> bool {
        self.open.get()
    }
}

struct MenuElements {
    overlay: HtmlElement,
    pane: HtmlElement,
    burger: HtmlElement,
    content: HtmlElement,
}

fn html_element(id: &str) -> Option<HtmlElement> {
    gloo_utils::document()
        .get_element_by_id(id)?
        .dyn_into::<HtmlElement>()
        .ok()
}

impl MenuElements {
    fn find() -> Option<Self> {
        Some(Self {
            overlay: html_element(OVERLAY_ID)?,
            pane: html_element(PANE_ID)?,
            burger: html_element(BURGER_ID)?,
            content: html_element(CONTENT_ID)?,
        })
    }

    fn apply(&self, layout: &MenuLayout) -> Result<(), JsValue> {
        self.overlay
            .style()
            .set_property("display", layout.overlay_display)?;
        self.pane.style().set_property("display", layout.pane_display)?;
        let content = self.content.style();
        content.set_property("position", layout.content_position)?;
        content.set_property("margin-right", layout.content_margin_right)?;
        self.burger
            .style()
            .set_property("transform", layout.burger_transform)?;
        Ok(())
    }
}

/// Wire the burger button and the overlay to the shared toggle. Pages without
/// the menu markup are left alone.
pub fn install() {
    let Some(elements) = MenuElements::find() else {
        debug!("No navigation menu on this page");
        return;
    };
    let elements = Rc::new(elements);
    let state = Rc::new(MenuState::default());

    let toggle = {
        let elements = elements.clone();
        Closure::<dyn Fn()>::new(move || {
            let layout = state.toggle();
            if let Err(e) = elements.apply(&layout) {
                warn!("Could not update navigation menu: {:?}", e);
            }
        })
    };

    for target in [&elements.burger, &elements.overlay] {
        if let Err(e) =
            target.add_event_listener_with_callback("click", toggle.as_ref().unchecked_ref())
        {
            warn!("Could not attach navigation handler: {:?}", e);
        }
    }
    // The listeners live as long as the page.
    toggle.forget();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_alternates_layouts() {
        let state = MenuState::default();
        assert!(!state.is_open());

        let opened = state.toggle();
        assert!(state.is_open());
        assert_eq!(opened.overlay_display, "block");
        assert_eq!(opened.content_position, "fixed");
        assert_eq!(opened.burger_transform, "rotate(90deg)");

        let closed = state.toggle();
        assert!(!state.is_open());
        assert_eq!(closed, MenuLayout::for_state(false));
        assert_eq!(closed.content_margin_right, "0px");
    }

    #[test]
    fn overlay_and_pane_always_agree() {
        for open in [true, false] {
            let layout = MenuLayout::for_state(open);
            assert_eq!(layout.overlay_display, layout.pane_display);
        }
    }
}
