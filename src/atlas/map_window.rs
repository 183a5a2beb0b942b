#![allow(non_snake_case)]
use dioxus::prelude::*;
use plotters_dioxus::{PlotImage, render_png_data_uri, stretch_to};
use std::rc::Rc;
use std::sync::Arc;

use crate::atlas::frame::{FrameCompositor, FrameInput};
use crate::config::{AtlasConfig, DataPaths};
use crate::file_load::{load_map_image_async, load_records_async};

static CSS_STYLE: Asset = asset!("/assets/map_window.css");

const PATHS_FILE: &str = "data_paths.txt";
const DEFAULT_SURFACE: (u32, u32) = (1200, 900);

#[derive(Debug, Clone, PartialEq)]
struct RenderedFrame {
    src: String,
    hovering: bool,
}

#[component]
pub fn MapWindow() -> Element {
    let compositor = use_hook(|| Rc::new(FrameCompositor::new(AtlasConfig::default())));
    let paths = use_hook(|| DataPaths::from_file(PATHS_FILE));

    let records_path = paths.records.clone();
    let records = use_resource(move || {
        let path = records_path.clone();
        async move { load_records_async(path).await.map_err(Arc::new) }
    });

    let map_path = paths.map_image.clone();
    let map_image = use_resource(move || {
        let path = map_path.clone();
        async move { load_map_image_async(path).await.map_err(Arc::new) }
    });

    let mut surface = use_signal(|| DEFAULT_SURFACE);
    let mut mouse = use_signal(|| None::<(f64, f64)>);

    // re-stretched only when the viewport size changes
    let stretched_map = use_memo({
        let compositor = compositor.clone();
        move || {
            let Ok(compositor) = &*compositor else {
                return None;
            };
            let (w, h) = surface();
            let (vw, vh) = compositor.viewport((w as f64, h as f64)).pixel_size();
            match &*map_image.read() {
                Some(Ok(image)) => Some(Arc::new(stretch_to(image, vw, vh))),
                _ => None,
            }
        }
    });

    let frame = use_memo({
        let compositor = compositor.clone();
        move || -> Result<RenderedFrame, String> {
            let compositor = match &*compositor {
                Ok(c) => c,
                Err(e) => return Err(e.to_string()),
            };
            let (w, h) = surface();
            let records = match &*records.read() {
                Some(Ok(records)) => records.clone(),
                _ => Arc::new(Vec::new()),
            };
            let map = stretched_map.read().clone();
            let input = FrameInput {
                surface: (w as f64, h as f64),
                mouse: mouse(),
                records: &records,
            };

            let mut hovering = false;
            let src = render_png_data_uri(w, h, |canvas| {
                let plan = compositor.plan(&input, &*canvas);
                hovering = plan.hover.is_some();
                compositor.paint(&plan, map.as_deref(), canvas)
            })
            .map_err(|e| {
                tracing::error!("frame render failed: {e}");
                e.to_string()
            })?;
            Ok(RenderedFrame { src, hovering })
        }
    });

    let size = surface();

    rsx! {
        document::Stylesheet { href: CSS_STYLE }

        div { class: "map-window",
            div { class: "status-message",
                {
                    match (&*records.read(), &*map_image.read()) {
                        (Some(Err(e)), _) => rsx! {
                            p { class: "error-message", "Could not load volcano records: {e}" }
                        },
                        (_, Some(Err(e))) => rsx! {
                            p { class: "error-message", "Could not load map image: {e}" }
                        },
                        (None, _) | (_, None) => rsx! {
                            p { class: "loading-message", "Loading data..." }
                        },
                        (Some(Ok(r)), Some(Ok(_))) => rsx! {
                            p { class: "loading-message", "{r.len()} volcanoes" }
                        },
                    }
                }
            }

            div {
                class: "map-surface",
                onresize: move |evt| {
                    if let Ok(content) = evt.data().get_content_box_size() {
                        let next = (content.width.round() as u32, content.height.round() as u32);
                        if next.0 > 0 && next.1 > 0 && next != *surface.peek() {
                            surface.set(next);
                        }
                    }
                },
                {
                    match &*frame.read() {
                        Ok(rendered) => rsx! {
                            PlotImage {
                                src: rendered.src.clone(),
                                size,
                                pointer: rendered.hovering,
                                on_mousemove: move |data: Rc<MouseData>| {
                                    let local = data.coordinates().element();
                                    mouse.set(Some((local.x, local.y)));
                                },
                                on_mouseout: move |_| mouse.set(None),
                            }
                        },
                        Err(e) => rsx! {
                            p { class: "error-message", "Error: {e}" }
                        },
                    }
                }
            }
        }
    }
}
