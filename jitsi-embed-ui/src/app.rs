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

//! The mounted overlay: owns the controller and bridges it to Yew and to the
//! host page's JavaScript.

use std::cell::RefCell;
use std::rc::Rc;

use jitsi_embed_client::web::{browser_deps, listen_host_messages, load_embed_config};
use jitsi_embed_client::{
    spawn, Dimensions, Dock, EmbedConfig, EmbedError, MeetingController, MeetingHost,
    MessageDisposition, Phase, SessionView, Subscription,
};
use jitsi_embed_types::{OpenMeeting, UserStatus};
use jitsi_plugin_client::{AuthMode, PluginApiClient};
use log::{debug, error, info, warn};
use serde::Deserialize;
use wasm_bindgen::prelude::*;
use yew::html::Scope;
use yew::prelude::*;

use crate::components::Conference;
use crate::requests::OpenRequests;

/// Page-level settings the host exposes as `window.__JITSI_PLUGIN`.
#[derive(Debug, Clone, PartialEq, Deserialize, Properties)]
#[serde(rename_all = "camelCase", default)]
pub struct EmbedRootProps {
    pub site_url: String,
    pub plugin_id: String,
    /// Presence updates are skipped without a user id.
    pub user_id: Option<String>,
}

impl Default for EmbedRootProps {
    fn default() -> Self {
        let site_url = gloo_utils::window().location().origin().unwrap_or_default();
        Self {
            site_url,
            plugin_id: "jitsi".to_string(),
            user_id: None,
        }
    }
}

impl EmbedRootProps {
    pub const GLOBAL: &'static str = "__JITSI_PLUGIN";

    pub fn from_page() -> anyhow::Result<Self> {
        let value = js_sys::Reflect::get(&gloo_utils::window(), &JsValue::from_str(Self::GLOBAL))
            .unwrap_or(JsValue::UNDEFINED);
        if value.is_undefined() || value.is_null() {
            return Ok(Self::default());
        }
        serde_wasm_bindgen::from_value(value)
            .map_err(|e| anyhow::anyhow!("failed to parse window.{}: {e}", Self::GLOBAL))
    }
}

pub enum Msg {
    /// The host asked for a meeting; its JWT may still need enriching.
    Open(OpenMeeting),
    /// Open the meeting if no later open or close arrived meanwhile.
    Launch(u64, OpenMeeting),
    Changed(SessionView),
    Minimize,
    Maximize,
    Reposition,
    OpenExternally,
    Close,
    Closed,
}

struct ScopeHost {
    link: Scope<EmbedRoot>,
    api: Option<PluginApiClient>,
    user_id: Option<String>,
}

impl MeetingHost for ScopeHost {
    fn meeting_closed(&self) {
        self.link.send_message(Msg::Closed);
    }

    fn open_failed(&self, error: &EmbedError) {
        error!("embed: could not open meeting: {error}");
    }

    fn set_presence(&self, status: UserStatus) {
        let (Some(api), Some(user_id)) = (self.api.clone(), self.user_id.clone()) else {
            return;
        };
        spawn(async move {
            if let Err(e) = api.set_user_status(&user_id, status).await {
                warn!("embed: failed to set presence to {status:?}: {e}");
            }
        });
    }

    fn session_changed(&self, view: &SessionView) {
        self.link.send_message(Msg::Changed(view.clone()));
    }
}

#[derive(Default)]
struct Registry {
    scope: Option<Scope<EmbedRoot>>,
    controller: Option<Rc<MeetingController>>,
    message_listeners: Vec<Subscription>,
    closed_handlers: Vec<js_sys::Function>,
}

thread_local! {
    static REGISTRY: RefCell<Registry> = RefCell::new(Registry::default());
}

fn dispatch(msg: Msg) -> Result<(), JsValue> {
    REGISTRY.with(|registry| match registry.borrow().scope.as_ref() {
        Some(scope) => {
            scope.send_message(msg);
            Ok(())
        }
        None => Err(JsValue::from_str("jitsi embed is not mounted")),
    })
}

/// Show a meeting in the embedded window. Takes
/// `{meeting: {meeting_id, meeting_link, ...}, jwt}`.
#[wasm_bindgen]
pub fn open_meeting(request: JsValue) -> Result<(), JsValue> {
    let request: OpenMeeting = serde_wasm_bindgen::from_value(request)?;
    dispatch(Msg::Open(request))
}

#[wasm_bindgen]
pub fn close_meeting() -> Result<(), JsValue> {
    dispatch(Msg::Close)
}

/// Whether a `postMessage` from `origin` belongs to the embedded widget.
#[wasm_bindgen]
pub fn is_widget_message(origin: &str) -> bool {
    REGISTRY.with(|registry| {
        registry
            .borrow()
            .controller
            .as_ref()
            .is_some_and(|c| c.message_disposition(origin) == MessageDisposition::Widget)
    })
}

/// Register a callback run each time the embedded meeting has closed.
#[wasm_bindgen]
pub fn on_meeting_closed(handler: js_sys::Function) {
    REGISTRY.with(|registry| registry.borrow_mut().closed_handlers.push(handler));
}

fn notify_meeting_closed() {
    // Handlers may call back into the exports, so none runs under the borrow.
    let handlers = REGISTRY.with(|registry| registry.borrow().closed_handlers.clone());
    for handler in handlers {
        if let Err(e) = handler.call0(&JsValue::NULL) {
            warn!("embed: meeting closed handler threw: {e:?}");
        }
    }
}

/// Register a `message` handler that never sees the widget's own traffic.
#[wasm_bindgen]
pub fn on_host_message(handler: js_sys::Function) {
    let listener = listen_host_messages(
        |origin| {
            if is_widget_message(origin) {
                MessageDisposition::Widget
            } else {
                MessageDisposition::Host
            }
        },
        move |event| {
            if let Err(e) = handler.call1(&JsValue::NULL, event) {
                warn!("embed: host message handler threw: {e:?}");
            }
        },
    );
    REGISTRY.with(|registry| {
        registry
            .borrow_mut()
            .message_listeners
            .push(Subscription::new(listener))
    });
}

fn idle_view() -> SessionView {
    SessionView {
        phase: Phase::Idle,
        meeting: None,
        minimized: true,
        dock: Dock::Bottom,
        loading: false,
        dimensions: Dimensions::new(0, 0),
    }
}

pub struct EmbedRoot {
    controller: Option<Rc<MeetingController>>,
    api: Option<PluginApiClient>,
    view: SessionView,
    parent_node_id: AttrValue,
    requests: OpenRequests,
}

impl Component for EmbedRoot {
    type Message = Msg;
    type Properties = EmbedRootProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let config = load_embed_config().unwrap_or_else(|e| {
            error!("embed: {e}, falling back to defaults");
            EmbedConfig::default()
        });
        let parent_node_id = AttrValue::from(config.parent_node_id.clone());

        let api = PluginApiClient::new(&props.site_url, &props.plugin_id, AuthMode::Cookie)
            .map_err(|e| error!("embed: plugin API unavailable: {e}"))
            .ok();
        let host = Rc::new(ScopeHost {
            link: ctx.link().clone(),
            api: api.clone(),
            user_id: props.user_id.clone(),
        });
        let controller = MeetingController::new(config, browser_deps(host))
            .map(Rc::new)
            .map_err(|e| error!("embed: {e}"))
            .ok();
        let view = controller
            .as_ref()
            .map(|c| c.view())
            .unwrap_or_else(idle_view);

        REGISTRY.with(|registry| {
            let mut registry = registry.borrow_mut();
            registry.scope = Some(ctx.link().clone());
            registry.controller = controller.clone();
        });
        info!("embed: mounted");

        Self {
            controller,
            api,
            view,
            parent_node_id,
            requests: OpenRequests::default(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        let Some(controller) = self.controller.clone() else {
            warn!("embed: no controller, ignoring message");
            return false;
        };
        match msg {
            Msg::Open(request) => {
                let ticket = self.requests.begin();
                let meeting = &request.meeting;
                let post_jwt = meeting
                    .jwt_meeting
                    .then(|| meeting.meeting_jwt.clone())
                    .flatten();
                match (request.jwt.is_none(), post_jwt, self.api.clone()) {
                    (true, Some(post_jwt), Some(api)) => {
                        let link = ctx.link().clone();
                        spawn(async move {
                            let jwt = match api.enrich_meeting_jwt(&post_jwt).await {
                                Ok(jwt) => jwt,
                                Err(e) => {
                                    warn!("embed: enrich failed, using post JWT: {e}");
                                    post_jwt
                                }
                            };
                            link.send_message(Msg::Launch(
                                ticket,
                                OpenMeeting {
                                    jwt: Some(jwt),
                                    ..request
                                },
                            ));
                        });
                    }
                    _ => ctx.link().send_message(Msg::Launch(ticket, request)),
                }
                false
            }
            Msg::Launch(ticket, request) => {
                if !self.requests.is_current(ticket) {
                    debug!(
                        "embed: dropping superseded open of {}",
                        request.meeting.meeting_id
                    );
                    return false;
                }
                spawn(async move {
                    if let Err(e) = controller.open(request).await {
                        debug!("embed: open ended with {e}");
                    }
                });
                false
            }
            Msg::Changed(view) => {
                let changed = self.view != view;
                self.view = view;
                changed
            }
            Msg::Minimize => {
                controller.minimize();
                false
            }
            Msg::Maximize => {
                controller.maximize();
                false
            }
            Msg::Reposition => {
                controller.reposition();
                false
            }
            Msg::OpenExternally => {
                self.requests.cancel();
                controller.open_externally();
                false
            }
            Msg::Close => {
                self.requests.cancel();
                controller.close();
                false
            }
            Msg::Closed => {
                info!("embed: meeting closed");
                notify_meeting_closed();
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        html! {
            <Conference
                view={self.view.clone()}
                parent_node_id={self.parent_node_id.clone()}
                on_minimize={link.callback(|_| Msg::Minimize)}
                on_maximize={link.callback(|_| Msg::Maximize)}
                on_reposition={link.callback(|_| Msg::Reposition)}
                on_open_externally={link.callback(|_| Msg::OpenExternally)}
                on_close={link.callback(|_| Msg::Close)}
            />
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        if let Some(controller) = self.controller.take() {
            controller.unmount();
        }
        REGISTRY.with(|registry| *registry.borrow_mut() = Registry::default());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn counter() -> f64 {
        js_sys::Reflect::get(&gloo_utils::window(), &JsValue::from_str("__closedCount"))
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0)
    }

    #[wasm_bindgen_test]
    fn closed_handlers_are_called() {
        REGISTRY.with(|registry| registry.borrow_mut().closed_handlers.clear());
        on_meeting_closed(js_sys::Function::new_no_args(
            "window.__closedCount = (window.__closedCount || 0) + 1;",
        ));
        let before = counter();
        notify_meeting_closed();
        assert_eq!(counter(), before + 1.0);
    }

    #[wasm_bindgen_test]
    fn throwing_handler_does_not_stop_the_rest() {
        REGISTRY.with(|registry| registry.borrow_mut().closed_handlers.clear());
        on_meeting_closed(js_sys::Function::new_no_args("throw new Error('boom');"));
        on_meeting_closed(js_sys::Function::new_no_args(
            "window.__closedCount = (window.__closedCount || 0) + 1;",
        ));
        let before = counter();
        notify_meeting_closed();
        assert_eq!(counter(), before + 1.0);
    }
}
