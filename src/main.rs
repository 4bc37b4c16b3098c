mod api;
mod app;
mod capture;
mod components;
mod model;
mod utils;

use crate::app::App;

fn main() {
    console_error_panic_hook::set_once();
    leptos::mount::mount_to_body(App);
}
