use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use log::{debug, warn};

use crate::config::SiteConfig;
use crate::dom::listener::Listener;
use crate::dom::page;
use crate::error::SiteError;
use crate::navigation::scroll::{self, SectionBox};

const NAVBAR_RESTING: [(&str, &str); 2] = [
    ("background", "rgba(255, 255, 255, 0.95)"),
    ("box-shadow", "0 4px 6px -1px rgb(0 0 0 / 0.1)"),
];
const NAVBAR_SCROLLED: [(&str, &str); 2] = [
    ("background", "rgba(255, 255, 255, 0.98)"),
    ("box-shadow", "0 10px 15px -3px rgb(0 0 0 / 0.1)"),
];

/// Navbar styling and reveal run on every scroll event; scroll-spy is
/// debounced.
pub fn bind(config: &SiteConfig) -> Result<Vec<Listener>, SiteError> {
    let config = Rc::new(config.clone());
    let navbar = match page::query(&config.selectors.navbar) {
        Ok(navbar) => Some(navbar),
        Err(e) => {
            warn!("navbar styling disabled: {}", e);
            None
        }
    };
    let pending_spy: Rc<RefCell<Option<Timeout>>> = Rc::new(RefCell::new(None));

    let window = page::window()?;
    let listener = Listener::new(&window, "scroll", move |_| {
        let scroll_y = match page::scroll_y() {
            Ok(y) => y,
            Err(e) => {
                warn!("scroll position unavailable: {}", e);
                return;
            }
        };

        if let Some(navbar) = &navbar {
            let styles = if scroll::navbar_scrolled(scroll_y, config.thresholds.navbar_scrolled) {
                &NAVBAR_SCROLLED
            } else {
                &NAVBAR_RESTING
            };
            if let Err(e) = page::set_styles(navbar, styles) {
                warn!("navbar styling failed: {}", e);
            }
        }

        if let Err(e) = reveal(&config) {
            warn!("reveal failed: {}", e);
        }

        let spy_config = config.clone();
        // replacing the pending timer cancels it
        *pending_spy.borrow_mut() = Some(Timeout::new(config.timings.scroll_debounce, move || {
            if let Err(e) = highlight_active_link(&spy_config) {
                warn!("scroll-spy failed: {}", e);
            }
        }));
    })?;

    listener.fire()?;
    Ok(vec![listener])
}

fn highlight_active_link(config: &SiteConfig) -> Result<(), SiteError> {
    let sections: Vec<SectionBox> = page::query_all(&config.selectors.sections)?
        .iter()
        .map(|section| {
            let rect = section.get_bounding_client_rect();
            SectionBox { id: section.id(), top: rect.top(), height: rect.height() }
        })
        .collect();
    let current = scroll::active_section(&sections, config.thresholds.active_section);

    for link in page::query_all(&config.selectors.nav_links)? {
        let href = link.get_attribute("href").unwrap_or_default();
        let active = current.map_or(false, |id| scroll::link_targets(&href, id));
        link.class_list().toggle_with_force("active", active)?;
    }
    debug!("active section: {:?}", current);
    Ok(())
}

fn reveal(config: &SiteConfig) -> Result<(), SiteError> {
    let viewport_height = page::viewport_height()?;
    for element in page::query_all(&config.selectors.reveal)? {
        let classes = element.class_list();
        if classes.contains("visible") {
            continue;
        }
        let top = element.get_bounding_client_rect().top();
        if scroll::should_reveal(top, viewport_height, config.thresholds.reveal_margin) {
            classes.add_1("visible")?;
        }
    }
    Ok(())
}
