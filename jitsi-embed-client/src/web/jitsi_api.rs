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

//! Bindings to `JitsiMeetExternalAPI`.

use js_sys::{Function, Object, Reflect};
use log::{debug, warn};
use serde::Deserialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use super::js_error_message;
use crate::error::WidgetError;
use crate::viewport::Dimensions;
use crate::widget::{
    ConferenceWidget, WidgetCommand, WidgetEvent, WidgetEventSink, WidgetFactory, WidgetOptions,
};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = JitsiMeetExternalAPI)]
    type JitsiMeetExternalApi;

    #[wasm_bindgen(constructor, catch, js_class = "JitsiMeetExternalAPI")]
    fn new(domain: &str, options: &Object) -> Result<JitsiMeetExternalApi, JsValue>;

    #[wasm_bindgen(method, catch, js_name = executeCommand)]
    fn execute_command(this: &JitsiMeetExternalApi, command: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = executeCommand)]
    fn execute_command_with(
        this: &JitsiMeetExternalApi,
        command: &str,
        argument: &JsValue,
    ) -> Result<(), JsValue>;

    #[wasm_bindgen(method, js_name = on)]
    fn on(this: &JitsiMeetExternalApi, event: &str, listener: &Function);

    #[wasm_bindgen(method, js_name = removeListener)]
    fn remove_listener(this: &JitsiMeetExternalApi, event: &str, listener: &Function);

    #[wasm_bindgen(method, catch)]
    fn dispose(this: &JitsiMeetExternalApi) -> Result<(), JsValue>;

    #[wasm_bindgen(method, js_name = getIFrame)]
    fn get_iframe(this: &JitsiMeetExternalApi) -> Option<HtmlElement>;
}

#[derive(Deserialize)]
struct TileViewPayload {
    enabled: bool,
}

#[derive(Deserialize)]
struct FilmstripPayload {
    visible: bool,
}

fn decode(name: &str, payload: JsValue) -> Option<WidgetEvent> {
    let event = match name {
        "videoConferenceJoined" => Ok(WidgetEvent::ConferenceJoined),
        "readyToClose" => Ok(WidgetEvent::ReadyToClose),
        "tileViewChanged" => serde_wasm_bindgen::from_value::<TileViewPayload>(payload)
            .map(|p| WidgetEvent::TileViewChanged { enabled: p.enabled }),
        "filmstripDisplayChanged" => serde_wasm_bindgen::from_value::<FilmstripPayload>(payload)
            .map(|p| WidgetEvent::FilmstripDisplayChanged { visible: p.visible }),
        _ => return None,
    };
    match event {
        Ok(event) => Some(event),
        Err(e) => {
            warn!("jitsi: malformed {name} payload: {e}");
            None
        }
    }
}

fn set(target: &Object, key: &str, value: &JsValue) -> Result<(), WidgetError> {
    Reflect::set(target, &JsValue::from_str(key), value)
        .map(|_| ())
        .map_err(|e| WidgetError::Construction(js_error_message(&e)))
}

/// A live `JitsiMeetExternalAPI` instance and the callbacks it holds.
pub struct JitsiWidget {
    api: JitsiMeetExternalApi,
    listeners: Vec<(&'static str, Closure<dyn FnMut(JsValue)>)>,
    _onload: Closure<dyn FnMut()>,
}

impl ConferenceWidget for JitsiWidget {
    fn execute(&mut self, command: &WidgetCommand) -> Result<(), WidgetError> {
        let result = match command {
            WidgetCommand::Subject(subject) => {
                self.api
                    .execute_command_with(command.name(), &JsValue::from_str(subject))
            }
            _ => self.api.execute_command(command.name()),
        };
        result.map_err(|e| WidgetError::Command {
            command: command.name().to_string(),
            reason: js_error_message(&e),
        })
    }

    fn resize(&mut self, dimensions: Dimensions) -> Result<(), WidgetError> {
        let iframe = self
            .api
            .get_iframe()
            .ok_or_else(|| WidgetError::Resize("widget has no iframe".to_string()))?;
        let style = iframe.style();
        style
            .set_property("width", &dimensions.css_width())
            .and_then(|()| style.set_property("height", &dimensions.css_height()))
            .map_err(|e| WidgetError::Resize(js_error_message(&e)))
    }

    fn dispose(&mut self) {
        for (name, listener) in self.listeners.drain(..) {
            self.api.remove_listener(name, listener.as_ref().unchecked_ref());
        }
        if let Err(e) = self.api.dispose() {
            warn!("jitsi: dispose failed: {}", js_error_message(&e));
        }
    }
}

/// Builds widgets with the global `JitsiMeetExternalAPI` constructor.
#[derive(Debug, Default, Clone, Copy)]
pub struct JitsiFactory;

impl WidgetFactory for JitsiFactory {
    fn create(
        &self,
        domain: &str,
        options: WidgetOptions,
        events: WidgetEventSink,
    ) -> Result<Box<dyn ConferenceWidget>, WidgetError> {
        let parent = gloo::utils::document()
            .get_element_by_id(&options.parent_node_id)
            .ok_or_else(|| {
                WidgetError::Construction(format!("no element with id {}", options.parent_node_id))
            })?;

        let onload = {
            let events = events.clone();
            Closure::<dyn FnMut()>::new(move || events.emit(WidgetEvent::Loaded))
        };

        let init = Object::new();
        set(&init, "roomName", &JsValue::from_str(&options.room_name))?;
        set(&init, "width", &JsValue::from(options.dimensions.width))?;
        set(&init, "height", &JsValue::from(options.dimensions.height))?;
        if let Some(jwt) = options.jwt.as_deref() {
            set(&init, "jwt", &JsValue::from_str(jwt))?;
        }
        set(&init, "noSSL", &JsValue::from_bool(options.no_ssl))?;
        set(&init, "parentNode", &parent)?;
        set(&init, "onload", onload.as_ref())?;

        let api = JitsiMeetExternalApi::new(domain, &init)
            .map_err(|e| WidgetError::Construction(js_error_message(&e)))?;

        let listeners = WidgetEvent::SUBSCRIBED
            .iter()
            .map(|&name| {
                let events = events.clone();
                let listener = Closure::<dyn FnMut(JsValue)>::new(move |payload: JsValue| {
                    if let Some(event) = decode(name, payload) {
                        events.emit(event);
                    }
                });
                api.on(name, listener.as_ref().unchecked_ref());
                (name, listener)
            })
            .collect();

        debug!("jitsi: created widget for room {} on {domain}", options.room_name);
        Ok(Box::new(JitsiWidget {
            api,
            listeners,
            _onload: onload,
        }))
    }
}
