#![allow(warnings)]
//! XWidgets Frontend Entry Point

mod app;
mod chart;
mod components;
mod history;
mod markdown;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(App);
}
