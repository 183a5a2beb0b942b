#![allow(non_snake_case)]

use dioxus::{
    desktop::{Config, LogicalSize, WindowBuilder},
    logger::tracing::Level,
    prelude::*,
};
use volcano_atlas::atlas::MapWindow;

static MAIN_STYLE: Asset = asset!("/assets/main.css");

#[component]
fn App() -> Element {
    rsx! {
        document::Stylesheet { href: MAIN_STYLE }
        div { class: "main_div", MapWindow {} }
    }
}

fn main() {
    if let Err(e) = dioxus::logger::init(Level::INFO) {
        eprintln!("logger already initialised: {e}");
    }

    LaunchBuilder::new()
        .with_cfg(
            Config::new().with_window(
                WindowBuilder::new()
                    .with_title("Volcano Atlas")
                    .with_always_on_top(false)
                    .with_inner_size(LogicalSize::new(1200.0, 900.0)),
            ),
        )
        .launch(App);
}
