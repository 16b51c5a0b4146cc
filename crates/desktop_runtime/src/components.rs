//! Desktop shell UI composition.

mod dock;
mod window;

use leptos::*;

use self::{dock::Dock, window::DesktopWindow};
use crate::model::PointerPosition;

pub use crate::runtime_context::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext};

#[component]
/// Renders the full desktop shell: screen overlay, desktop, and menu bar.
pub fn DesktopShell() -> impl IntoView {
    view! {
        <div id="desktop-shell-root" class="desktop-shell">
            <ScreenOverlay />
            <Desktop />
            <MenuBar />
        </div>
    }
}

#[component]
fn Desktop() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let instances = move || {
        runtime
            .read(|windows| windows.tasks().instances().to_vec())
            .unwrap_or_default()
    };

    view! {
        <main class="desktop">
            <div class="desktop-wallpaper" aria-hidden="true" />
            <div class="desktop-window-layer">
                <For each=instances key=|instance| instance.instance_id let:instance>
                    <DesktopWindow instance />
                </For>
            </div>
            <Dock />
        </main>
    }
}

#[component]
fn MenuBar() -> impl IntoView {
    view! {
        <header class="menu-bar">
            <span class="menu-bar-logo" aria-hidden="true" />
            <span class="menu-bar-app">"Finder"</span>
        </header>
    }
}

#[component]
fn ScreenOverlay() -> impl IntoView {
    view! {
        <div class="screen-overlay" aria-hidden="true">
            <div class="screen-notch" />
        </div>
    }
}

fn pointer_from_mouse_event(ev: &web_sys::MouseEvent) -> PointerPosition {
    PointerPosition {
        x: ev.client_x(),
        y: ev.client_y(),
    }
}
