#![allow(non_snake_case)]
use dioxus::prelude::*;
use std::rc::Rc;

/// Shows a rendered frame and forwards pointer events relative to the image.
#[component]
pub fn PlotImage(
    #[props] src: String,
    #[props] size: (u32, u32),
    #[props(default = false)] pointer: bool,
    #[props(optional)] on_mousemove: Option<EventHandler<Rc<MouseData>>>,
    #[props(optional)] on_mouseout: Option<EventHandler<Rc<MouseData>>>,
) -> Element {
    let cursor = if pointer { "pointer" } else { "default" };

    rsx! {
        img {
            style: "display: block; user-select: none; -webkit-user-select: none; cursor: {cursor};",
            src: "{src}",
            width: "{size.0}",
            height: "{size.1}",
            draggable: "false",
            onmousemove: move |evt| {
                if let Some(cb) = &on_mousemove {
                    cb.call(evt.data)
                }
            },
            onmouseout: move |evt| {
                if let Some(cb) = &on_mouseout {
                    cb.call(evt.data)
                }
            },
        }
    }
}
