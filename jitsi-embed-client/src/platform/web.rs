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

//! WASM (browser) platform primitives, built on `gloo` and
//! `wasm-bindgen-futures`.

use std::future::Future;
use std::time::Duration;

/// A one-shot timer. Wraps `gloo::timers::callback::Timeout`, which clears the
/// browser timeout when dropped.
pub struct TimeoutHandle {
    _timeout: gloo::timers::callback::Timeout,
}

impl TimeoutHandle {
    pub fn new<F: FnOnce() + 'static>(delay: Duration, callback: F) -> Self {
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        Self {
            _timeout: gloo::timers::callback::Timeout::new(millis, callback),
        }
    }
}

/// Spawn an async task on the browser's microtask queue.
pub fn spawn<F: Future<Output = ()> + 'static>(future: F) {
    wasm_bindgen_futures::spawn_local(future);
}
