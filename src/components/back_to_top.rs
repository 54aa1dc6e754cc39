use log::warn;
use yew::prelude::*;
use yew_hooks::prelude::*;

use crate::dom::page;
use crate::navigation::scroll;

#[derive(Properties, PartialEq)]
pub struct BackToTopProps {
    pub threshold: f64,
}

#[function_component(BackToTop)]
pub fn back_to_top(props: &BackToTopProps) -> Html {
    let (_, scroll_y) = use_window_scroll();
    let visible = scroll::back_to_top_visible(scroll_y, props.threshold);

    let onclick = Callback::from(|_: MouseEvent| {
        if let Err(e) = page::smooth_scroll_to(0.0) {
            warn!("back to top failed: {}", e);
        }
    });

    html! {
        <button class={classes!("back-to-top", visible.then(|| "show"))} aria-label="Back to top" {onclick}>
            { "↑" }
        </button>
    }
}
