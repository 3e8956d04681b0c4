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

use std::rc::Rc;

use jitsi_embed_client::web::{js_error_message, BrowserWindow, DomScriptHost, JitsiFactory};
use jitsi_embed_client::{
    spawn, ConferenceWidget, Dimensions, HostWindow, Subscription, WidgetEvent, WidgetEventSink,
    WidgetFactory, WidgetLoader,
};
use jitsi_embed_types::{JaasSettings, JAAS_DOMAIN};
use jitsi_plugin_client::{AuthMode, PluginApiClient};
use log::{debug, error, info, warn};
use yew::prelude::*;

use crate::jaas::{script_url, JaasLaunch, JAAS_PARENT_NODE_ID};

#[derive(Properties, Debug, Clone, PartialEq)]
pub struct JaasWindowProps {
    pub site_url: String,
    pub plugin_id: String,
}

pub enum JaasMsg {
    Settings(JaasSettings),
    Failed(String),
    Resized,
    Widget(WidgetEvent),
}

/// A JaaS meeting filling the whole page.
pub struct JaasWindow {
    launch: Option<JaasLaunch>,
    widget: Option<Box<dyn ConferenceWidget>>,
    error: Option<String>,
    _resize: Subscription,
}

fn page_launch() -> Result<JaasLaunch, String> {
    let href = gloo_utils::window()
        .location()
        .href()
        .map_err(|e| js_error_message(&e))?;
    JaasLaunch::from_page_url(&href).map_err(|e| format!("bad page url {href}: {e}"))
}

impl Component for JaasWindow {
    type Message = JaasMsg;
    type Properties = JaasWindowProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let link = ctx.link().clone();
        let resize = BrowserWindow.on_resize(Box::new(move || link.send_message(JaasMsg::Resized)));

        let launch = match page_launch() {
            Ok(launch) => launch,
            Err(e) => {
                error!("jaas: {e}");
                return Self {
                    launch: None,
                    widget: None,
                    error: Some(e),
                    _resize: resize,
                };
            }
        };

        let api = PluginApiClient::new(&props.site_url, &props.plugin_id, AuthMode::Cookie);
        let script = script_url(&props.plugin_id);
        let request = launch.clone();
        let link = ctx.link().clone();
        spawn(async move {
            let loader = WidgetLoader::new(Rc::new(DomScriptHost));
            let settings = async {
                loader
                    .ensure_loaded(&script)
                    .await
                    .map_err(|e| e.to_string())?;
                api.map_err(|e| e.to_string())?
                    .start_jaas_meeting_window(request.jwt.as_deref(), &request.path)
                    .await
                    .map_err(|e| e.to_string())
            }
            .await;
            link.send_message(match settings {
                Ok(settings) => JaasMsg::Settings(settings),
                Err(e) => JaasMsg::Failed(e),
            });
        });

        Self {
            launch: Some(launch),
            widget: None,
            error: None,
            _resize: resize,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            JaasMsg::Settings(settings) => {
                let Some(launch) = self.launch.as_ref() else {
                    return false;
                };
                if self.widget.is_some() {
                    return false;
                }
                let options = launch.widget_options(&settings, BrowserWindow.inner_size());
                let link = ctx.link().clone();
                let sink = WidgetEventSink::new(move |event| link.send_message(JaasMsg::Widget(event)));
                match JitsiFactory.create(JAAS_DOMAIN, options, sink) {
                    Ok(widget) => {
                        info!("jaas: joined room {}", settings.room);
                        self.widget = Some(widget);
                        false
                    }
                    Err(e) => {
                        error!("jaas: could not build the widget: {e}");
                        self.error = Some(e.to_string());
                        true
                    }
                }
            }
            JaasMsg::Failed(e) => {
                error!("jaas: could not start the meeting window: {e}");
                self.error = Some(e);
                true
            }
            JaasMsg::Resized => {
                if let Some(widget) = self.widget.as_mut() {
                    let size = BrowserWindow.inner_size();
                    if let Err(e) = widget.resize(Dimensions::new(size.width, size.height)) {
                        warn!("jaas: {e}");
                    }
                }
                false
            }
            JaasMsg::Widget(event) => {
                debug!("jaas: widget event {event:?}");
                false
            }
        }
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        html! {
            <>
                <div id={JAAS_PARENT_NODE_ID} style="width: 100%; height: 100%; display: flex;" />
                if let Some(error) = self.error.as_ref() {
                    <div class="jaas-error">{ error.clone() }</div>
                }
            </>
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        if let Some(mut widget) = self.widget.take() {
            widget.dispose();
        }
    }
}
