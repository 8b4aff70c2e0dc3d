//! Matchstick Board Client
//!
//! Yew WASM frontend: a canvas of draggable, rotatable matches.
//!
//! Build for the browser with `trunk build` or
//! `cargo build -p matchstick-client --target wasm32-unknown-unknown`.

mod app;
mod components;
mod hooks;
mod state;
mod storage;
mod surface;

use app::App;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Layer};
use tracing_web::MakeWebConsoleWriter;

fn main() {
    console_error_panic_hook::set_once();

    // Initialize tracing for wasm with tracing-web
    let filter = EnvFilter::new("info,matchstick_core=debug,matchstick_client=debug");

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .without_time()
        .with_writer(MakeWebConsoleWriter::new())
        .with_filter(filter);

    tracing_subscriber::registry().with(fmt_layer).init();

    yew::Renderer::<App>::new().render();
}
