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

use std::cell::RefCell;
use std::rc::Rc;

use futures::channel::oneshot;
use futures::FutureExt;
use gloo::events::EventListener;
use log::debug;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlScriptElement;

use super::js_error_message;
use crate::error::LoadError;
use crate::loader::{ScriptHost, ScriptLoad};

const CONSTRUCTOR: &str = "JitsiMeetExternalAPI";

/// Injects `<script>` elements into the current document's `<head>`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DomScriptHost;

impl ScriptHost for DomScriptHost {
    fn widget_available(&self) -> bool {
        js_sys::Reflect::get(&gloo::utils::window(), &JsValue::from_str(CONSTRUCTOR))
            .map(|value| value.is_function())
            .unwrap_or(false)
    }

    fn inject(&self, url: &str) -> Result<ScriptLoad, LoadError> {
        let injection_error = |reason: String| LoadError::Injection {
            url: url.to_string(),
            reason,
        };

        let document = gloo::utils::document();
        let script: HtmlScriptElement = document
            .create_element("script")
            .map_err(|e| injection_error(js_error_message(&e)))?
            .dyn_into()
            .map_err(|_| injection_error("created element is not a <script>".to_string()))?;
        script.set_src(url);
        script.set_async(true);

        let (tx, rx) = oneshot::channel();
        let tx = Rc::new(RefCell::new(Some(tx)));
        let on_load = {
            let tx = tx.clone();
            EventListener::once(&script, "load", move |_| {
                if let Some(tx) = tx.borrow_mut().take() {
                    let _ = tx.send(Ok(()));
                }
            })
        };
        let on_error = {
            let failed = LoadError::Failed(url.to_string());
            EventListener::once(&script, "error", move |_| {
                if let Some(tx) = tx.borrow_mut().take() {
                    let _ = tx.send(Err(failed));
                }
            })
        };

        let head = document
            .head()
            .ok_or_else(|| injection_error("document has no <head>".to_string()))?;
        head.append_child(&script)
            .map_err(|e| injection_error(js_error_message(&e)))?;
        debug!("loader: appended <script src={url}>");

        let url = url.to_string();
        Ok(async move {
            // The listeners live as long as the load is awaited.
            let _listeners = (on_load, on_error);
            rx.await.unwrap_or(Err(LoadError::Abandoned(url)))
        }
        .boxed_local())
    }
}
