use serde::Deserialize;

/// How far below the viewport top a scrolled-to section should land, to clear
/// the fixed header.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum HeaderOffset {
    Fixed { px: f64 },
    /// `narrow` below `breakpoint` viewport width, `wide` otherwise.
    Responsive { narrow: f64, wide: f64, breakpoint: f64 },
}

impl Default for HeaderOffset {
    fn default() -> Self {
        HeaderOffset::Fixed { px: 80.0 }
    }
}

impl HeaderOffset {
    pub fn resolve(&self, viewport_width: f64) -> f64 {
        match *self {
            HeaderOffset::Fixed { px } => px,
            HeaderOffset::Responsive { narrow, wide, breakpoint } => {
                if viewport_width < breakpoint {
                    narrow
                } else {
                    wide
                }
            }
        }
    }
}

/// Absolute page offset to scroll to, given the target's viewport-relative top.
pub fn scroll_target(element_top: f64, page_y: f64, header_offset: f64) -> f64 {
    (element_top + page_y - header_offset).max(0.0)
}

#[derive(Clone, Debug, PartialEq)]
pub struct SectionBox {
    pub id: String,
    /// Viewport-relative, as reported by `getBoundingClientRect`.
    pub top: f64,
    pub height: f64,
}

/// The section straddling `threshold`. When several do, the last one in
/// document order wins.
pub fn active_section(sections: &[SectionBox], threshold: f64) -> Option<&str> {
    sections
        .iter()
        .filter(|s| s.top <= threshold && s.top + s.height > threshold)
        .last()
        .map(|s| s.id.as_str())
}

pub fn link_targets(href: &str, section_id: &str) -> bool {
    href.strip_prefix('#') == Some(section_id)
}

pub fn navbar_scrolled(scroll_y: f64, threshold: f64) -> bool {
    scroll_y > threshold
}

pub fn back_to_top_visible(scroll_y: f64, threshold: f64) -> bool {
    scroll_y > threshold
}

/// Reveal once the element's top has come `margin` pixels into the viewport.
pub fn should_reveal(element_top: f64, viewport_height: f64, margin: f64) -> bool {
    element_top < viewport_height - margin
}
