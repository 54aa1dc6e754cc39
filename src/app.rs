use std::rc::Rc;

use log::{info, warn};
use yew::prelude::*;

use crate::components::back_to_top::BackToTop;
use crate::components::toast::ToastStack;
use crate::config::SiteConfig;
use crate::dom;
use crate::notifications::{NotificationCenter, ToastAction};

#[derive(Properties, PartialEq)]
pub struct AppProps {
    pub config: Rc<SiteConfig>,
}

/// Renders the toast stack and back-to-top button, and attaches the page
/// behaviour to the existing markup for as long as it is mounted.
#[function_component(App)]
pub fn app(props: &AppProps) -> Html {
    let config = props.config.clone();
    let toasts = {
        let policy = config.notification_policy;
        use_reducer(move || NotificationCenter::new(policy))
    };
    let on_toast = {
        let toasts = toasts.clone();
        Callback::from(move |action: ToastAction| toasts.dispatch(action))
    };

    {
        let config = config.clone();
        let on_toast = on_toast.clone();
        use_effect_with_deps(
            move |_| {
                let mut listeners = Vec::new();
                match dom::navigation::bind(&config) {
                    Ok(bound) => listeners.extend(bound),
                    Err(e) => warn!("navigation disabled: {}", e),
                }
                match dom::scroll::bind(&config) {
                    Ok(bound) => listeners.extend(bound),
                    Err(e) => warn!("scroll effects disabled: {}", e),
                }
                match dom::form::bind(&config, on_toast) {
                    Ok(bound) => listeners.extend(bound),
                    Err(e) => warn!("contact form disabled: {}", e),
                }
                info!("site behaviour ready ({} listeners)", listeners.len());
                move || drop(listeners)
            },
            (),
        );
    }

    html! {
        <>
            <ToastStack toasts={toasts.toasts().to_vec()} timings={config.timings} on_action={on_toast} />
            <BackToTop threshold={config.thresholds.back_to_top} />
        </>
    }
}
