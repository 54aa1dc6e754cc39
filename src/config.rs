use log::{warn, Level};
use serde::Deserialize;

use crate::error::SiteError;
use crate::navigation::scroll::HeaderOffset;
use crate::notifications::NotificationPolicy;

/// Id of the optional `<script type="application/json">` block that overrides
/// any of the defaults below.
pub const CONFIG_ELEMENT_ID: &str = "site-config";

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Selectors {
    pub navbar: String,
    pub nav_toggle: String,
    pub nav_menu: String,
    pub nav_links: String,
    pub sections: String,
    pub contact_form: String,
    pub form_fields: String,
    pub submit_button: String,
    pub reveal: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            navbar: ".navbar".to_string(),
            nav_toggle: "#navToggle".to_string(),
            nav_menu: ".nav-menu".to_string(),
            nav_links: ".nav-menu a[href^=\"#\"]".to_string(),
            sections: "section[id]".to_string(),
            contact_form: "#contactForm".to_string(),
            form_fields: "input, select, textarea".to_string(),
            submit_button: ".submit-btn".to_string(),
            reveal: ".reveal".to_string(),
        }
    }
}

/// A call-to-action button that scrolls to a section instead of navigating,
/// optionally focusing an element there once the scroll has had time to land.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct HeroButton {
    pub selector: String,
    pub target: String,
    #[serde(default)]
    pub focus: Option<String>,
}

/// All delays are in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Timings {
    pub submit_delay: u32,
    pub toast_ttl: u32,
    pub toast_enter: u32,
    pub toast_exit: u32,
    pub scroll_debounce: u32,
    pub hero_focus_delay: u32,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            submit_delay: 2000,
            toast_ttl: 5000,
            toast_enter: 100,
            toast_exit: 300,
            scroll_debounce: 10,
            hero_focus_delay: 800,
        }
    }
}

/// Pixel thresholds, all in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub navbar_scrolled: f64,
    pub active_section: f64,
    pub back_to_top: f64,
    pub reveal_margin: f64,
    pub mobile_breakpoint: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            navbar_scrolled: 50.0,
            active_section: 100.0,
            back_to_top: 300.0,
            reveal_margin: 100.0,
            mobile_breakpoint: 768.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub selectors: Selectors,
    pub hero_buttons: Vec<HeroButton>,
    pub timings: Timings,
    pub thresholds: Thresholds,
    pub header_offset: HeaderOffset,
    pub notification_policy: NotificationPolicy,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            selectors: Selectors::default(),
            hero_buttons: vec![
                HeroButton {
                    selector: "#btnFreeCounseling".to_string(),
                    target: "#contact".to_string(),
                    focus: Some("#contactForm input".to_string()),
                },
                HeroButton {
                    selector: "#btnViewCourses".to_string(),
                    target: "#courses".to_string(),
                    focus: None,
                },
            ],
            timings: Timings::default(),
            thresholds: Thresholds::default(),
            header_offset: HeaderOffset::default(),
            notification_policy: NotificationPolicy::default(),
        }
    }
}

impl SiteConfig {
    pub fn from_json(raw: &str) -> Result<Self, SiteError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Reads the inline config block if the page has one. A malformed block is
    /// reported and ignored.
    pub fn load() -> Self {
        let raw = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());

        match raw {
            Some(raw) if !raw.trim().is_empty() => Self::from_json(&raw).unwrap_or_else(|e| {
                warn!("{}, falling back to defaults", e);
                Self::default()
            }),
            _ => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let config = SiteConfig::from_json("{}").unwrap();
        assert_eq!(config, SiteConfig::default());
        assert_eq!(config.timings.toast_ttl, 5000);
        assert_eq!(config.header_offset, HeaderOffset::Fixed { px: 80.0 });
        assert_eq!(config.notification_policy, NotificationPolicy::Stack);
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config = SiteConfig::from_json(
            r##"{
                "timings": { "submit_delay": 500 },
                "selectors": { "contact_form": "#enquiry" },
                "header_offset": { "mode": "responsive", "narrow": 60, "wide": 80, "breakpoint": 768 },
                "notification_policy": "replace"
            }"##,
        )
        .unwrap();

        assert_eq!(config.timings.submit_delay, 500);
        assert_eq!(config.timings.toast_exit, 300);
        assert_eq!(config.selectors.contact_form, "#enquiry");
        assert_eq!(config.selectors.navbar, ".navbar");
        assert_eq!(config.notification_policy, NotificationPolicy::Replace);
        assert_eq!(config.header_offset.resolve(500.0), 60.0);
        assert_eq!(config.hero_buttons.len(), 2);
    }

    #[test]
    fn counseling_button_focuses_the_form_after_scrolling() {
        let config = SiteConfig::default();
        let counseling = config
            .hero_buttons
            .iter()
            .find(|b| b.selector == "#btnFreeCounseling")
            .unwrap();
        assert_eq!(counseling.target, "#contact");
        assert_eq!(counseling.focus.as_deref(), Some("#contactForm input"));
        assert_eq!(config.timings.hero_focus_delay, 800);

        let courses = config.hero_buttons.iter().find(|b| b.selector == "#btnViewCourses").unwrap();
        assert_eq!(courses.focus, None);
    }

    #[test]
    fn hero_button_focus_is_optional_in_json() {
        let config = SiteConfig::from_json(
            r##"{ "hero_buttons": [
                { "selector": "#cta", "target": "#pricing" },
                { "selector": "#enrol", "target": "#contact", "focus": "#name" }
            ] }"##,
        )
        .unwrap();
        assert_eq!(config.hero_buttons[0].focus, None);
        assert_eq!(config.hero_buttons[1].focus.as_deref(), Some("#name"));
        assert_eq!(config.timings.hero_focus_delay, 800);
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = SiteConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, SiteError::Config(_)));
    }
}
