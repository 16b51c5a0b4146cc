//! Built-in toy application bodies. Window chrome is rendered by the shell; these only fill the
//! window body.

use desktop_app_contract::AppMountContext;
use leptos::*;

/// Resolves the bundled body for an application name.
pub(super) fn mount_fn_for(name: &str) -> fn(AppMountContext) -> View {
    match name {
        "safari" => mount_safari_placeholder_app,
        "settings" => mount_settings_placeholder_app,
        "terminal" => mount_terminal_placeholder_app,
        _ => mount_blank_app,
    }
}

fn mount_safari_placeholder_app(context: AppMountContext) -> View {
    view! {
        <div class="app-body app-safari" data-instance=context.instance_id.to_string()>
            <div class="app-safari-toolbar">
                <input class="app-safari-address" type="text" placeholder="Search or enter website name" />
            </div>
            <div class="app-safari-page" />
        </div>
    }
    .into_view()
}

fn mount_settings_placeholder_app(context: AppMountContext) -> View {
    view! {
        <div class="app-body app-settings" data-instance=context.instance_id.to_string()>
            <aside class="app-settings-sidebar">
                <p>"General"</p>
                <p>"Appearance"</p>
                <p>"Desktop & Dock"</p>
            </aside>
            <section class="app-settings-pane" />
        </div>
    }
    .into_view()
}

fn mount_terminal_placeholder_app(context: AppMountContext) -> View {
    view! {
        <div class="app-body app-terminal" data-instance=context.instance_id.to_string()>
            <pre class="app-terminal-output">{format!("{} % ", context.instance_id)}</pre>
        </div>
    }
    .into_view()
}

fn mount_blank_app(context: AppMountContext) -> View {
    view! { <div class="app-body" data-instance=context.instance_id.to_string() /> }.into_view()
}
