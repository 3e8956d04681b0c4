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

#[cfg(target_arch = "wasm32")]
fn main() {
    use jitsi_embed_ui::app::{EmbedRoot, EmbedRootProps};
    use jitsi_embed_ui::components::jaas_window::{JaasWindow, JaasWindowProps};
    use jitsi_embed_ui::jaas::JAAS_ROOT_ID;

    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let props = EmbedRootProps::from_page().unwrap_or_else(|e| {
        log::error!("{e:#}, using page defaults");
        EmbedRootProps::default()
    });

    // The JaaS meeting window page carries its own mount point.
    match gloo_utils::document().get_element_by_id(JAAS_ROOT_ID) {
        Some(root) => {
            let props = JaasWindowProps {
                site_url: props.site_url,
                plugin_id: props.plugin_id,
            };
            yew::Renderer::<JaasWindow>::with_root_and_props(root, props).render();
        }
        None => {
            yew::Renderer::<EmbedRoot>::with_props(props).render();
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("jitsi-embed-ui only runs in the browser; build it for wasm32-unknown-unknown");
}
