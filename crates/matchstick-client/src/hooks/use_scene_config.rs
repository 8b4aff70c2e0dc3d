//! Scene configuration from the page URL.
//!
//! `?config={"drag_mode":"snap"}` overrides any subset of [`SceneConfig`].

use matchstick_core::SceneConfig;
use yew::prelude::*;

const CONFIG_QUERY_KEY: &str = "config";

fn query_value(key: &str) -> Option<String> {
    let window = web_sys::window()?;
    let search = window.location().search().ok()?;
    let params = web_sys::UrlSearchParams::new_with_str(&search).ok()?;
    params.get(key)
}

/// Parses a raw query value, falling back to defaults when absent or invalid.
pub(crate) fn parse_scene_config(raw: Option<&str>) -> SceneConfig {
    let Some(raw) = raw else {
        return SceneConfig::default();
    };
    match SceneConfig::from_json(raw) {
        Ok(config) => {
            tracing::info!("using scene config from query string");
            config
        }
        Err(e) => {
            tracing::warn!("ignoring invalid scene config: {e}");
            SceneConfig::default()
        }
    }
}

/// Reads the scene configuration once per component lifetime.
#[hook]
pub fn use_scene_config() -> SceneConfig {
    let config = use_memo((), |_| {
        parse_scene_config(query_value(CONFIG_QUERY_KEY).as_deref())
    });
    (*config).clone()
}
