// Copyright 2025 Security Union LLC
// Licensed under MIT OR Apache-2.0
//
// Shared helpers for jitsi-embed-ui component tests.
#![allow(dead_code)]

use jitsi_embed_client::{Dimensions, Dock, Phase, SessionView};
use jitsi_embed_types::{MeetingDescriptor, OpenMeeting};

/// Create a fresh `<div>`, attach it to `<body>`, and return it.
pub fn create_mount_point() -> web_sys::Element {
    let document = gloo_utils::document();
    let div = document.create_element("div").unwrap();
    document.body().unwrap().append_child(&div).unwrap();
    div
}

/// Remove the mount-point from `<body>` so subsequent tests start clean.
pub fn cleanup(mount: &web_sys::Element) {
    gloo_utils::document()
        .body()
        .unwrap()
        .remove_child(mount)
        .ok();
}

pub fn meeting() -> MeetingDescriptor {
    MeetingDescriptor::new("standup-42", "https://meet.jit.si/standup-42").with_topic("Standup")
}

pub fn active_view(minimized: bool) -> SessionView {
    SessionView {
        phase: Phase::Active,
        meeting: Some(OpenMeeting::new(meeting(), None)),
        minimized,
        dock: Dock::Bottom,
        loading: false,
        dimensions: if minimized {
            Dimensions::new(320, 240)
        } else {
            Dimensions::new(1240, 760)
        },
    }
}
