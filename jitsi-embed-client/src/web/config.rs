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

use log::info;
use serde_wasm_bindgen::from_value;
use wasm_bindgen::JsValue;

use crate::config::EmbedConfig;
use crate::error::EmbedError;

/// Name of the global the host page may set to configure the embed.
pub const CONFIG_GLOBAL: &str = "__JITSI_EMBED_CONFIG";

/// Read `window.__JITSI_EMBED_CONFIG`, falling back to defaults when the
/// page does not define it.
pub fn load_embed_config() -> Result<EmbedConfig, EmbedError> {
    let window = gloo::utils::window();
    let value = js_sys::Reflect::get(&window, &JsValue::from_str(CONFIG_GLOBAL))
        .unwrap_or(JsValue::UNDEFINED);
    if value.is_undefined() || value.is_null() {
        info!("config: window.{CONFIG_GLOBAL} not set, using defaults");
        return Ok(EmbedConfig::default());
    }
    let config: EmbedConfig = from_value(value)
        .map_err(|e| EmbedError::Config(format!("failed to parse {CONFIG_GLOBAL}: {e}")))?;
    config.validate()?;
    Ok(config)
}
