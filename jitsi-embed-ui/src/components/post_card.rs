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

use jitsi_embed_types::MeetingDescriptor;
use wasm_bindgen::JsValue;
use yew::prelude::*;

use crate::post_card::PostCardModel;

#[derive(Properties, Debug, PartialEq)]
pub struct PostCardProps {
    pub creator_name: AttrValue,
    pub meeting: MeetingDescriptor,
    /// JWT returned by the enrich endpoint for the current user.
    #[prop_or_default]
    pub enriched_jwt: Option<String>,
    /// Open in the embedded window instead of following the link.
    #[prop_or_default]
    pub embedded: bool,
    #[prop_or_default]
    pub on_join: Callback<MeetingDescriptor>,
}

fn format_valid_until(seconds: i64) -> String {
    let date = js_sys::Date::new(&JsValue::from_f64(seconds as f64 * 1000.0));
    if date.get_time().is_nan() {
        seconds.to_string()
    } else {
        String::from(date.to_string())
    }
}

#[function_component(PostCard)]
pub fn post_card(props: &PostCardProps) -> Html {
    let card = PostCardModel::new(&props.creator_name, &props.meeting, props.enriched_jwt.as_deref());

    let on_join = {
        let embedded = props.embedded;
        let meeting = props.meeting.clone();
        let on_join = props.on_join.clone();
        Callback::from(move |e: MouseEvent| {
            if embedded {
                e.prevent_default();
                on_join.emit(meeting.clone());
            }
        })
    };

    html! {
        <div>
            { &card.pre_text }
            <div class="jitsi-post">
                <h1 class="jitsi-post-title">{ &card.title }</h1>
                <span>
                    { card.subtitle_label }
                    <a target="_blank" rel="noopener noreferrer" href={card.join_link.clone()}>
                        { &card.meeting_id }
                    </a>
                </span>
                <div class="jitsi-post-body">
                    <a
                        class="btn btn-lg btn-primary"
                        target="_blank"
                        rel="noopener noreferrer"
                        href={card.join_link.clone()}
                        onclick={on_join}
                    >
                        {"JOIN MEETING"}
                    </a>
                    if let Some(seconds) = card.valid_until {
                        <div class="jitsi-post-valid-until">
                            {" Meeting link valid until: "}
                            <b>{ format_valid_until(seconds) }</b>
                        </div>
                    }
                </div>
            </div>
        </div>
    }
}
