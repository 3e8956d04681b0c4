/*
 * Copyright 2025 Security Union LLC
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 *
 * Unless you explicitly state otherwise, any contribution intentionally
 * submitted for inclusion in the work by you, as defined in the Apache-2.0
 * license, shall be dual licensed as above, without any additional terms or
 * conditions.
 */

use gloo::events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::KeyboardEvent;

use crate::host::{HostWindow, Subscription};
use crate::viewport::WindowSize;

/// The global `window`.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserWindow;

fn dimension(value: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>) -> u32 {
    value
        .ok()
        .and_then(|v| v.as_f64())
        .map(|v| v.max(0.0) as u32)
        .unwrap_or(0)
}

impl HostWindow for BrowserWindow {
    fn inner_size(&self) -> WindowSize {
        let window = gloo::utils::window();
        WindowSize::new(
            dimension(window.inner_width()),
            dimension(window.inner_height()),
        )
    }

    fn on_resize(&self, listener: Box<dyn Fn()>) -> Subscription {
        let window = gloo::utils::window();
        Subscription::new(EventListener::new(&window, "resize", move |_| listener()))
    }

    fn on_escape(&self, listener: Box<dyn Fn()>) -> Subscription {
        let window = gloo::utils::window();
        Subscription::new(EventListener::new(&window, "keydown", move |event| {
            let escape = event
                .dyn_ref::<KeyboardEvent>()
                .is_some_and(|key| key.key() == "Escape");
            if escape {
                listener();
            }
        }))
    }
}
