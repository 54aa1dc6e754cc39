use std::rc::Rc;

use log::info;

mod app;
mod config;
mod error;
mod notifications;
mod form {
    pub mod controller;
    pub mod field;
}
mod navigation {
    pub mod menu;
    pub mod scroll;
}
mod dom {
    pub mod form;
    pub mod listener;
    pub mod navigation;
    pub mod page;
    pub mod scroll;
}
mod components {
    pub mod back_to_top;
    pub mod toast;
}

use app::{App, AppProps};
use config::SiteConfig;

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    console_log::init_with_level(config::log_level()).expect("error initializing log");

    let config = SiteConfig::load();
    info!("Starting site behaviour");
    yew::Renderer::<App>::with_props(AppProps { config: Rc::new(config) }).render();
}
