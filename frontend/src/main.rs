mod api;
mod app;
mod components;
mod config;
mod confirm;
mod day;
mod error;
mod form;
mod format;
mod hooks;
mod logging;
mod model;
mod pages;
mod query;
mod route;

use tracing::info;

use crate::config::AppConfig;

fn main() {
    let config = AppConfig::from_env();
    logging::init(config.log_level);
    info!(api = %config.api_base_url, "starting fintrack");

    yew::Renderer::<app::App>::new().render();
}
