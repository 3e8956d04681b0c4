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
use web_sys::MessageEvent;

use crate::origin_policy::MessageDisposition;

/// Listen for `message` events meant for the host page.
///
/// Messages classified as belonging to the widget are not passed to
/// `handler`. They still reach the widget's own listener, which a
/// capture-phase `stopImmediatePropagation` would break.
pub fn listen_host_messages<C, H>(classify: C, handler: H) -> EventListener
where
    C: Fn(&str) -> MessageDisposition + 'static,
    H: Fn(&MessageEvent) + 'static,
{
    let window = gloo::utils::window();
    EventListener::new(&window, "message", move |event| {
        let Some(message) = event.dyn_ref::<MessageEvent>() else {
            return;
        };
        match classify(&message.origin()) {
            MessageDisposition::Widget => {
                log::trace!("messages: skipping widget message from {}", message.origin())
            }
            MessageDisposition::Host => handler(message),
        }
    })
}
