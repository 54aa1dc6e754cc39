use gloo_timers::callback::Timeout;
use yew::prelude::*;

use crate::config::Timings;
use crate::notifications::{Notification, Phase, ToastAction};

#[derive(Properties, PartialEq)]
pub struct ToastStackProps {
    pub toasts: Vec<Notification>,
    pub timings: Timings,
    pub on_action: Callback<ToastAction>,
}

#[function_component(ToastStack)]
pub fn toast_stack(props: &ToastStackProps) -> Html {
    html! {
        <div class="notification-stack" aria-live="polite">
            { for props.toasts.iter().map(|toast| html! {
                <ToastItem
                    key={toast.id.to_string()}
                    toast={toast.clone()}
                    timings={props.timings}
                    on_action={props.on_action.clone()}
                />
            }) }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ToastItemProps {
    pub toast: Notification,
    pub timings: Timings,
    pub on_action: Callback<ToastAction>,
}

#[function_component(ToastItem)]
fn toast_item(props: &ToastItemProps) -> Html {
    let id = props.toast.id;
    let phase = props.toast.phase;

    // Timers live in the effect: leaving re-runs it, and the cleanup drops the
    // pending auto-dismiss, which cancels it.
    {
        let on_action = props.on_action.clone();
        let timings = props.timings;
        let entering = phase == Phase::Entering;
        use_effect_with_deps(
            move |leaving: &bool| {
                let mut timers = Vec::new();
                if *leaving {
                    timers.push(Timeout::new(timings.toast_exit, move || {
                        on_action.emit(ToastAction::Remove(id))
                    }));
                } else {
                    if entering {
                        let on_action = on_action.clone();
                        timers.push(Timeout::new(timings.toast_enter, move || {
                            on_action.emit(ToastAction::Reveal(id))
                        }));
                    }
                    timers.push(Timeout::new(timings.toast_ttl, move || {
                        on_action.emit(ToastAction::Dismiss(id))
                    }));
                }
                move || drop(timers)
            },
            phase == Phase::Leaving,
        );
    }

    let dismiss = {
        let on_action = props.on_action.clone();
        Callback::from(move |_: MouseEvent| on_action.emit(ToastAction::Dismiss(id)))
    };

    html! {
        <div
            class={classes!("notification", props.toast.kind.class(), (phase == Phase::Visible).then(|| "show"))}
            role="status"
            data-created={props.toast.created_at.to_rfc3339()}
        >
            <div style="display: flex; justify-content: space-between; align-items: center;">
                <span>{ &props.toast.message }</span>
                <button
                    class="notification-close"
                    aria-label="Dismiss"
                    onclick={dismiss}
                    style="background: none; border: none; font-size: 1.5rem; cursor: pointer; margin-left: 1rem;"
                >
                    { "×" }
                </button>
            </div>
        </div>
    }
}
