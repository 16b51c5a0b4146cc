//! Runtime provider and context wiring for the desktop shell.
//!
//! The session's [`WindowManager`] lives in a [`StoredValue`] so window geometry never re-renders
//! the view tree. Components mutate it through [`DesktopRuntimeContext::dispatch`]; a revision
//! signal tracks instance-set changes, and a `requestAnimationFrame` loop drains scheduled draws.
#![allow(clippy::clone_on_copy)]

use leptos::*;

use crate::{
    apps::ApplicationCatalog,
    config::ShellConfig,
    host::{frame_clock_now, DomShellEnvironment},
    task_manager::TaskManager,
    window_manager::{WindowError, WindowManager},
};

#[derive(Clone, Copy)]
/// Leptos context for reading and mutating the desktop session.
pub struct DesktopRuntimeContext {
    /// Window coordinator for the session, owning the task directory.
    pub windows: StoredValue<WindowManager>,
    /// Mirrors the task directory revision; bumps whenever instances are created or closed.
    pub revision: RwSignal<u64>,
    frame_loop_running: StoredValue<bool>,
}

impl DesktopRuntimeContext {
    /// Runs a window operation and logs its failure under `label`.
    ///
    /// Returns the operation's value, or `None` if it failed.
    pub fn dispatch<T>(
        &self,
        label: &str,
        operation: impl FnOnce(&mut WindowManager) -> Result<T, WindowError>,
    ) -> Option<T> {
        let outcome = self.windows.try_update_value(|windows| {
            let result = operation(windows);
            (
                result,
                windows.tasks().revision(),
                windows.has_pending_frames(),
            )
        });
        let Some((result, revision, frames_pending)) = outcome else {
            logging::debug_warn!("{label}: desktop runtime already disposed");
            return None;
        };

        if frames_pending {
            self.ensure_frame_loop();
        }
        if self.revision.get_untracked() != revision {
            self.revision.set(revision);
        }

        match result {
            Ok(value) => Some(value),
            Err(err) => {
                logging::warn!("{label} failed: {err}");
                None
            }
        }
    }

    /// Reads the session, subscribing the caller to instance-set changes.
    pub fn read<T>(&self, reader: impl FnOnce(&WindowManager) -> T) -> Option<T> {
        let _ = self.revision.get();
        self.windows.try_with_value(reader)
    }

    pub fn read_untracked<T>(&self, reader: impl FnOnce(&WindowManager) -> T) -> Option<T> {
        self.windows.try_with_value(reader)
    }

    fn ensure_frame_loop(self) {
        let already_running = self
            .frame_loop_running
            .try_update_value(|running| std::mem::replace(running, true))
            .unwrap_or(true);
        if !already_running {
            request_animation_frame(move || self.run_frame());
        }
    }

    fn run_frame(self) {
        let now = frame_clock_now();
        let frames_pending = self
            .windows
            .try_update_value(|windows| {
                windows.tick(now);
                windows.has_pending_frames()
            })
            .unwrap_or(false);

        if frames_pending {
            request_animation_frame(move || self.run_frame());
        } else {
            let _ = self
                .frame_loop_running
                .try_update_value(|running| *running = false);
        }
    }
}

#[component]
/// Provides [`DesktopRuntimeContext`] to descendant components.
pub fn DesktopProvider(
    /// Shell configuration; defaults to the one embedded at build time.
    #[prop(optional)]
    config: Option<ShellConfig>,
    children: Children,
) -> impl IntoView {
    let config = config.unwrap_or_else(ShellConfig::builtin);
    let catalog = ApplicationCatalog::from_manifests(&config.applications);
    logging::log!("desktop session starting with {} applications", catalog.len());
    let windows = WindowManager::new(
        TaskManager::new(catalog),
        DomShellEnvironment,
        config.window_manager,
    );

    let runtime = DesktopRuntimeContext {
        windows: store_value(windows),
        revision: create_rw_signal(0),
        frame_loop_running: store_value(false),
    };

    provide_context(runtime.clone());

    children().into_view()
}

/// Returns the current [`DesktopRuntimeContext`].
///
/// # Panics
///
/// Panics if called outside [`DesktopProvider`].
pub fn use_desktop_runtime() -> DesktopRuntimeContext {
    use_context::<DesktopRuntimeContext>().expect("DesktopRuntimeContext not provided")
}
