//! # ops-app
//!
//! Facility Ops Dashboard entry point. Mounts the dashboard with the bundled
//! sample snapshot.

mod dashboard;
mod sample;

use dashboard::Dashboard;
use leptos::prelude::*;
use sample::FacilitySnapshot;

fn main() {
    console_error_panic_hook::set_once();
    init_tracing();

    tracing::info!("starting Facility Ops Dashboard");
    leptos::mount::mount_to_body(App);
}

#[cfg(target_arch = "wasm32")]
fn init_tracing() {
    tracing_wasm::set_as_global_default();
}

#[cfg(not(target_arch = "wasm32"))]
fn init_tracing() {
    tracing_subscriber::fmt::init();
}

#[component]
fn App() -> impl IntoView {
    match FacilitySnapshot::load() {
        Ok(snapshot) => view! { <Dashboard snapshot=snapshot /> }.into_any(),
        Err(err) => {
            tracing::error!(%err, "failed to load sample data");
            view! { <p class="load-error">"Sample data could not be loaded."</p> }.into_any()
        }
    }
}
