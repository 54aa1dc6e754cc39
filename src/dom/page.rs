use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, NodeList, ScrollBehavior, ScrollToOptions, Window};

use crate::error::SiteError;
use crate::navigation::scroll::{self, HeaderOffset};

pub fn window() -> Result<Window, SiteError> {
    web_sys::window().ok_or_else(|| SiteError::MissingElement("window".to_string()))
}

pub fn document() -> Result<Document, SiteError> {
    window()?
        .document()
        .ok_or_else(|| SiteError::MissingElement("document".to_string()))
}

pub fn body() -> Result<HtmlElement, SiteError> {
    document()?
        .body()
        .ok_or_else(|| SiteError::MissingElement("body".to_string()))
}

pub fn query(selector: &str) -> Result<Element, SiteError> {
    document()?
        .query_selector(selector)?
        .ok_or_else(|| SiteError::MissingElement(selector.to_string()))
}

pub fn query_all(selector: &str) -> Result<Vec<Element>, SiteError> {
    Ok(elements(document()?.query_selector_all(selector)?))
}

pub fn query_all_in(root: &Element, selector: &str) -> Result<Vec<Element>, SiteError> {
    Ok(elements(root.query_selector_all(selector)?))
}

fn elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn viewport_width() -> Result<f64, SiteError> {
    window()?
        .inner_width()?
        .as_f64()
        .ok_or_else(|| SiteError::Dom("innerWidth is not a number".to_string()))
}

pub fn viewport_height() -> Result<f64, SiteError> {
    window()?
        .inner_height()?
        .as_f64()
        .ok_or_else(|| SiteError::Dom("innerHeight is not a number".to_string()))
}

pub fn scroll_y() -> Result<f64, SiteError> {
    Ok(window()?.scroll_y()?)
}

pub fn smooth_scroll_to(top: f64) -> Result<(), SiteError> {
    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(ScrollBehavior::Smooth);
    window()?.scroll_to_with_scroll_to_options(&options);
    Ok(())
}

/// Scrolls so the element matching `selector` lands just under the header.
pub fn scroll_to_section(selector: &str, offset: HeaderOffset) -> Result<(), SiteError> {
    let target = query(selector)?;
    let top = scroll::scroll_target(
        target.get_bounding_client_rect().top(),
        scroll_y()?,
        offset.resolve(viewport_width()?),
    );
    smooth_scroll_to(top)
}

pub fn set_styles(element: &Element, styles: &[(&str, &str)]) -> Result<(), SiteError> {
    let style = element
        .dyn_ref::<HtmlElement>()
        .ok_or_else(|| SiteError::Dom(format!("<{}> has no style", element.tag_name())))?
        .style();
    for (property, value) in styles {
        style.set_property(property, value)?;
    }
    Ok(())
}
