//! Browser-side [`WindowSurface`] and [`ShellEnvironment`] implementations.
//!
//! Both go through `web_sys`; only the desktop components construct them, after the DOM nodes
//! they wrap are mounted.

use std::time::Duration;

use desktop_app_contract::dock_icon_dom_id;
use leptos::logging;

use crate::{
    model::{WindowRect, WindowSize},
    surface::{ShellEnvironment, SurfaceCommand, WindowSurface},
};

const FALLBACK_VIEWPORT: WindowSize = WindowSize {
    width: 1024,
    height: 768,
};

fn rect_from_dom(rect: &web_sys::DomRect) -> WindowRect {
    WindowRect {
        x: rect.x().round() as i32,
        y: rect.y().round() as i32,
        width: rect.width().round() as i32,
        height: rect.height().round() as i32,
    }
}

/// Mounted window element driven through inline styles.
pub struct DomWindowSurface {
    element: web_sys::HtmlElement,
}

impl DomWindowSurface {
    pub fn new(element: web_sys::HtmlElement) -> Self {
        Self { element }
    }

    fn set_style(&self, property: &str, value: &str) {
        if let Err(err) = self.element.style().set_property(property, value) {
            logging::warn!("failed to set window style `{property}`: {err:?}");
        }
    }
}

impl WindowSurface for DomWindowSurface {
    fn apply(&self, command: &SurfaceCommand) {
        match command {
            SurfaceCommand::SetVisible(visible) => {
                self.set_style("display", if *visible { "block" } else { "none" });
            }
            SurfaceCommand::SetTransition(Some(duration)) => {
                self.set_style("transition-property", "all");
                self.set_style("transition-duration", &format!("{}ms", duration.as_millis()));
            }
            SurfaceCommand::SetTransition(None) => self.set_style("transition-property", "none"),
            SurfaceCommand::SetTransform(transform) => {
                self.set_style("transform", &transform.to_css());
            }
            SurfaceCommand::SetSize(size) => {
                self.set_style("width", &format!("{}px", size.width));
                self.set_style("height", &format!("{}px", size.height));
            }
            SurfaceCommand::SetPointerEvents(enabled) => {
                self.set_style("pointer-events", if *enabled { "auto" } else { "none" });
            }
        }
    }

    fn bounding_rect(&self) -> WindowRect {
        rect_from_dom(&self.element.get_bounding_client_rect())
    }
}

/// Reads the viewport and dock icon positions from the live document.
#[derive(Debug, Clone, Copy, Default)]
pub struct DomShellEnvironment;

impl ShellEnvironment for DomShellEnvironment {
    fn viewport(&self) -> WindowSize {
        #[cfg(target_arch = "wasm32")]
        {
            if let Some(window) = web_sys::window() {
                let width = window
                    .inner_width()
                    .ok()
                    .and_then(|value| value.as_f64())
                    .map(|value| value as i32)
                    .unwrap_or(FALLBACK_VIEWPORT.width);
                let height = window
                    .inner_height()
                    .ok()
                    .and_then(|value| value.as_f64())
                    .map(|value| value as i32)
                    .unwrap_or(FALLBACK_VIEWPORT.height);
                return WindowSize { width, height };
            }
        }

        FALLBACK_VIEWPORT
    }

    fn dock_icon_rect(&self, application_name: &str) -> Option<WindowRect> {
        #[cfg(target_arch = "wasm32")]
        {
            let document = web_sys::window()?.document()?;
            let element = document.get_element_by_id(&dock_icon_dom_id(application_name))?;
            Some(rect_from_dom(&element.get_bounding_client_rect()))
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            logging::debug_warn!(
                "no document to look up `{}`",
                dock_icon_dom_id(application_name)
            );
            None
        }
    }
}

/// Monotonic time used to drive the frame scheduler.
///
/// The browser reads `performance.now()` and only falls back to `Date.now()` when the window has
/// no `Performance` object. Natively the clock counts from its first reading.
pub fn frame_clock_now() -> Duration {
    #[cfg(target_arch = "wasm32")]
    {
        let millis = web_sys::window()
            .and_then(|window| window.performance())
            .map(|performance| performance.now())
            .unwrap_or_else(js_sys::Date::now);
        Duration::from_secs_f64(millis.max(0.0) / 1000.0)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        static START: std::sync::OnceLock<std::time::Instant> = std::sync::OnceLock::new();
        START.get_or_init(std::time::Instant::now).elapsed()
    }
}
