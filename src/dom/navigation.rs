use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use log::{info, warn};
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlElement, KeyboardEvent, Node};

use crate::config::SiteConfig;
use crate::dom::listener::Listener;
use crate::dom::page;
use crate::error::SiteError;
use crate::navigation::menu::{MenuEvent, MobileMenu};

/// Anchor links and hero buttons scroll smoothly; the mobile menu opens and
/// closes. Each part degrades on its own when its elements are missing.
pub fn bind(config: &SiteConfig) -> Result<Vec<Listener>, SiteError> {
    let mut listeners = Vec::new();
    let links = page::query_all(&config.selectors.nav_links)?;

    for link in &links {
        let Some(href) = link.get_attribute("href") else {
            continue;
        };
        let offset = config.header_offset;
        listeners.push(Listener::new(link, "click", move |e: Event| {
            e.prevent_default();
            if let Err(err) = page::scroll_to_section(&href, offset) {
                warn!("cannot scroll to {}: {}", href, err);
            }
        })?);
    }

    for hero in &config.hero_buttons {
        let button = match page::query(&hero.selector) {
            Ok(button) => button,
            Err(e) => {
                warn!("hero button skipped: {}", e);
                continue;
            }
        };
        let target = hero.target.clone();
        let focus = hero.focus.clone();
        let offset = config.header_offset;
        let focus_delay = config.timings.hero_focus_delay;
        let pending_focus: Rc<RefCell<Option<Timeout>>> = Rc::new(RefCell::new(None));
        listeners.push(Listener::new(&button, "click", move |e: Event| {
            e.prevent_default();
            if let Err(err) = page::scroll_to_section(&target, offset) {
                warn!("cannot scroll to {}: {}", target, err);
            }
            if let Some(selector) = focus.clone() {
                // a repeated click restarts the delay
                *pending_focus.borrow_mut() = Some(Timeout::new(focus_delay, move || {
                    if let Err(err) = focus_element(&selector) {
                        warn!("cannot focus {}: {}", selector, err);
                    }
                }));
            }
        })?);
    }

    match bind_mobile_menu(config, &links) {
        Ok(menu) => listeners.extend(menu),
        Err(e) => warn!("mobile navigation disabled: {}", e),
    }

    info!("navigation bound to {} links", links.len());
    Ok(listeners)
}

fn focus_element(selector: &str) -> Result<(), SiteError> {
    let element: HtmlElement = page::query(selector)?
        .dyn_into()
        .map_err(|_| SiteError::Dom(format!("`{}` cannot take focus", selector)))?;
    element.focus()?;
    Ok(())
}

struct MenuView {
    toggle: Element,
    menu: Element,
    body: HtmlElement,
}

impl MenuView {
    fn render(&self, open: bool) -> Result<(), SiteError> {
        self.toggle.class_list().toggle_with_force("active", open)?;
        self.menu.class_list().toggle_with_force("active", open)?;
        self.body.class_list().toggle_with_force("menu-open", open)?;
        Ok(())
    }
}

fn bind_mobile_menu(config: &SiteConfig, links: &[Element]) -> Result<Vec<Listener>, SiteError> {
    let view = MenuView {
        toggle: page::query(&config.selectors.nav_toggle)?,
        menu: page::query(&config.selectors.nav_menu)?,
        body: page::body()?,
    };
    let toggle = view.toggle.clone();
    let state = Rc::new(RefCell::new(MobileMenu::new(config.thresholds.mobile_breakpoint)));
    let dispatch: Rc<dyn Fn(MenuEvent)> = Rc::new(move |event| {
        let changed = state.borrow_mut().handle(event);
        if changed {
            let open = state.borrow().is_open();
            if let Err(e) = view.render(open) {
                warn!("menu update failed: {}", e);
            }
        }
    });

    let mut listeners = Vec::new();
    {
        let dispatch = dispatch.clone();
        listeners.push(Listener::new(&toggle, "click", move |_| dispatch(MenuEvent::Toggle))?);
    }

    for link in links {
        let dispatch = dispatch.clone();
        listeners.push(Listener::new(link, "click", move |_| dispatch(MenuEvent::LinkClicked))?);
    }

    let document = page::document()?;
    match page::query(&config.selectors.navbar) {
        Ok(navbar) => {
            let dispatch = dispatch.clone();
            listeners.push(Listener::new(&document, "click", move |e: Event| {
                let inside = e
                    .target()
                    .and_then(|t| t.dyn_into::<Node>().ok())
                    .map_or(false, |node| navbar.contains(Some(&node)));
                if !inside {
                    dispatch(MenuEvent::ClickedOutside);
                }
            })?);
        }
        Err(e) => warn!("outside-click close disabled: {}", e),
    }

    {
        let dispatch = dispatch.clone();
        listeners.push(Listener::new(&document, "keydown", move |e: Event| {
            if e.dyn_ref::<KeyboardEvent>().map_or(false, |k| k.key() == "Escape") {
                dispatch(MenuEvent::Escape);
            }
        })?);
    }

    // Installed with the rest of the menu: without a toggle the menu never
    // opens, so there is nothing for a resize to close.
    let window = page::window()?;
    listeners.push(Listener::new(&window, "resize", move |_| {
        match page::viewport_width() {
            Ok(viewport_width) => dispatch(MenuEvent::Resized { viewport_width }),
            Err(e) => warn!("resize ignored: {}", e),
        }
    })?);

    Ok(listeners)
}
