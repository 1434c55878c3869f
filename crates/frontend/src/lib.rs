pub mod app;
pub mod dashboards;
pub mod domain;
pub mod layout;
pub mod routes;
pub mod shared;
pub mod system;

use wasm_bindgen::prelude::wasm_bindgen;

use crate::shared::config::{install, load_config};

#[wasm_bindgen(start)]
pub fn start() {
    // initializes logging using the `log` crate; narrowed once config is in
    _ = console_log::init_with_level(log::Level::Trace);
    console_error_panic_hook::set_once();

    wasm_bindgen_futures::spawn_local(async {
        let config = load_config().await;
        log::set_max_level(config.log_level().to_level_filter());
        install(config);
        domain::a005_payment::snap::ensure_script();

        leptos::mount::mount_to_body(app::App);
    });
}
