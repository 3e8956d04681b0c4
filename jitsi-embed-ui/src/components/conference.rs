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

use jitsi_embed_client::SessionView;
use yew::prelude::*;

use crate::layout::{conference_layout, MoveControl, SizeControl};

#[derive(Properties, Debug, PartialEq)]
pub struct ConferenceProps {
    pub view: SessionView,
    /// Id of the element the widget mounts its iframe into.
    pub parent_node_id: AttrValue,
    pub on_minimize: Callback<()>,
    pub on_maximize: Callback<()>,
    pub on_reposition: Callback<()>,
    pub on_open_externally: Callback<()>,
    pub on_close: Callback<()>,
}

fn emit(callback: &Callback<()>) -> Callback<MouseEvent> {
    let callback = callback.clone();
    Callback::from(move |_: MouseEvent| callback.emit(()))
}

/// The floating meeting window: widget container, backdrop, spinner and the
/// control strip.
#[function_component(Conference)]
pub fn conference(props: &ConferenceProps) -> Html {
    let layout = conference_layout(&props.view);
    let external_link = props.view.external_link().unwrap_or_default();

    let move_button = layout.move_control.map(|direction| {
        let (label, rotate) = match direction {
            MoveControl::Down => ("Move down", 270),
            MoveControl::Up => ("Move up", 90),
        };
        html! {
            <i
                onclick={emit(&props.on_reposition)}
                style={format!("transform: rotate({rotate}deg); display: inline-block;")}
                class="icon icon-arrow-left"
                aria-label={label}
                title={label}
            />
        }
    });

    let size_button = match layout.size_control {
        SizeControl::Minimize => html! {
            <i onclick={emit(&props.on_minimize)} class="icon icon-arrow-collapse"
               aria-label="Minimize" title="Minimize" />
        },
        SizeControl::Maximize => html! {
            <i onclick={emit(&props.on_maximize)} class="icon icon-arrow-expand"
               aria-label="Maximize" title="Maximize" />
        },
    };

    html! {
        <>
            <div id={props.parent_node_id.clone()} style={layout.container} />
            if let Some(style) = layout.backdrop {
                <div class="jitsi-backdrop" {style} />
            }
            if let Some(style) = layout.loading {
                <div class="jitsi-loading" {style}>
                    <i class="fa fa-spinner fa-fw fa-pulse spinner" />
                </div>
            }
            if let Some(style) = layout.buttons {
                <div class="jitsi-controls" {style}>
                    { for move_button }
                    { size_button }
                    <a
                        style="color: white;"
                        onclick={emit(&props.on_open_externally)}
                        target="_blank"
                        rel="noopener noreferrer"
                        href={external_link}
                    >
                        <i
                            style="transform: rotate(135deg); display: inline-block;"
                            class="icon icon-arrow-left"
                            aria-label="Open in new tab"
                            title="Open in new tab"
                        />
                    </a>
                    <i onclick={emit(&props.on_close)} class="icon icon-close"
                       aria-label="Close" title="Close" />
                </div>
            }
        </>
    }
}
