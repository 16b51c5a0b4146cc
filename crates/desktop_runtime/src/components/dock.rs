use std::rc::Rc;

use desktop_app_contract::{dock_icon_dom_id, ApplicationDescriptor};
use leptos::*;

use super::use_desktop_runtime;

#[component]
pub(super) fn Dock() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let applications = runtime
        .read_untracked(|windows| windows.tasks().catalog().iter().cloned().collect::<Vec<_>>())
        .unwrap_or_default();

    view! {
        <nav class="dock" aria-label="Dock">
            <ul class="dock-apps">
                {applications
                    .into_iter()
                    .map(|application| view! { <DockItem application /> })
                    .collect_view()}
            </ul>
        </nav>
    }
}

#[component]
fn DockItem(application: Rc<ApplicationDescriptor>) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let name = application.name().to_string();
    let title = application.title().to_string();

    let running = {
        let name = name.clone();
        move || {
            runtime
                .read(|windows| windows.tasks().exists_instance_of_app(&name).is_some())
                .unwrap_or(false)
        }
    };
    let open = {
        let name = name.clone();
        move |_: web_sys::MouseEvent| {
            let _ = runtime.dispatch("open application", |windows| {
                windows.request_app_open(&name)
            });
        }
    };

    view! {
        <li id=dock_icon_dom_id(&name) class="dock-app" class:running=running>
            <button type="button" class="dock-app-button" aria-label=title.clone() on:click=open>
                <img src=application.icon_url().to_string() alt="" draggable="false" />
            </button>
            <span class="dock-app-tooltip">{title}</span>
            <span class="dock-app-indicator" aria-hidden="true" />
        </li>
    }
}
