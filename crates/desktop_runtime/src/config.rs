//! Shell configuration embedded from `shell.toml` at build time.

use std::time::Duration;

use leptos::logging;
use serde::{Deserialize, Serialize};

use crate::model::{WindowRect, WindowSize};

mod generated {
    include!(concat!(env!("OUT_DIR"), "/shell_config_generated.rs"));
}

/// Window manager tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowManagerConfig {
    /// Floating geometry given to newly opened windows.
    pub default_rect: WindowRect,
    /// Floor enforced by resize gestures.
    pub min_size: WindowSize,
    pub floating_animation_ms: u64,
    pub minimize_animation_ms: u64,
    pub maximize_animation_ms: u64,
    /// Scale a window shrinks to when it is minimized into the dock.
    pub minimized_scale: f64,
    /// Gap kept around a maximized window.
    pub maximize_margin: i32,
    pub menu_bar_height: i32,
    /// Strip at the bottom of the viewport left free for the dock.
    pub dock_reserved_height: i32,
}

impl Default for WindowManagerConfig {
    fn default() -> Self {
        Self {
            default_rect: WindowRect::default(),
            min_size: WindowSize::min_window(),
            floating_animation_ms: 200,
            minimize_animation_ms: 300,
            maximize_animation_ms: 300,
            minimized_scale: 0.05,
            maximize_margin: 10,
            menu_bar_height: 32,
            dock_reserved_height: 140,
        }
    }
}

impl WindowManagerConfig {
    pub fn floating_animation(&self) -> Duration {
        Duration::from_millis(self.floating_animation_ms)
    }

    pub fn minimize_animation(&self) -> Duration {
        Duration::from_millis(self.minimize_animation_ms)
    }

    pub fn maximize_animation(&self) -> Duration {
        Duration::from_millis(self.maximize_animation_ms)
    }
}

/// Catalog entry declared in `shell.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppManifest {
    pub name: String,
    pub title: String,
    pub icon_url: String,
}

impl AppManifest {
    fn new(name: &str, title: &str, icon_url: &str) -> Self {
        Self {
            name: name.to_string(),
            title: title.to_string(),
            icon_url: icon_url.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    pub window_manager: WindowManagerConfig,
    pub applications: Vec<AppManifest>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            window_manager: WindowManagerConfig::default(),
            applications: vec![
                AppManifest::new("safari", "Safari", "/safari-icon.png"),
                AppManifest::new("settings", "Settings", "/settings-icon.png"),
                AppManifest::new("terminal", "Terminal", "/terminal-icon.png"),
            ],
        }
    }
}

impl ShellConfig {
    /// Parses a shell configuration from its JSON form.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Returns the configuration embedded at build time, or the defaults if it fails to parse.
    pub fn builtin() -> Self {
        match Self::from_json(generated::SHELL_CONFIG_JSON) {
            Ok(config) => config,
            Err(err) => {
                logging::warn!("embedded shell config is invalid, using defaults: {err}");
                Self::default()
            }
        }
    }
}
