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

//! Browser implementations of the controller's seams.
//!
//! Only compiled for `wasm32`. [`browser_deps`] wires the real widget
//! factory, script host, window and timer into a [`ControllerDeps`].

mod browser_window;
mod config;
mod jitsi_api;
mod messages;
mod script_host;

use std::rc::Rc;

use wasm_bindgen::{JsCast, JsValue};

pub use browser_window::BrowserWindow;
pub use config::{load_embed_config, CONFIG_GLOBAL};
pub use jitsi_api::{JitsiFactory, JitsiWidget};
pub use messages::listen_host_messages;
pub use script_host::DomScriptHost;

use crate::controller::ControllerDeps;
use crate::host::MeetingHost;
use crate::scheduler::PlatformScheduler;

/// Controller dependencies backed by the current browser window.
pub fn browser_deps(host: Rc<dyn MeetingHost>) -> ControllerDeps {
    ControllerDeps {
        factory: Rc::new(JitsiFactory),
        script_host: Rc::new(DomScriptHost),
        window: Rc::new(BrowserWindow),
        host,
        scheduler: Rc::new(PlatformScheduler),
    }
}

/// Best-effort text for a thrown JS value.
pub fn js_error_message(value: &JsValue) -> String {
    value
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| value.as_string())
        .unwrap_or_else(|| format!("{value:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::HostWindow;
    use crate::loader::ScriptHost;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn config_falls_back_to_defaults() {
        let config = load_embed_config().unwrap();
        assert_eq!(config, crate::config::EmbedConfig::default());
    }

    #[wasm_bindgen_test]
    fn browser_window_reports_a_size() {
        let size = BrowserWindow.inner_size();
        assert!(size.width > 0);
        assert!(size.height > 0);
    }

    #[wasm_bindgen_test]
    fn constructor_is_absent_until_loaded() {
        assert!(!DomScriptHost.widget_available());
    }

    #[wasm_bindgen_test]
    fn js_errors_are_readable() {
        let error: JsValue = js_sys::Error::new("boom").into();
        assert_eq!(js_error_message(&error), "boom");
        assert_eq!(js_error_message(&JsValue::from_str("plain")), "plain");
    }
}
