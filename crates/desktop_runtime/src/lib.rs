//! Window and task management core of the desktop shell, plus the Leptos components that mount it.
//!
//! [`task_manager`] owns running instances, [`window_manager`] owns their window state and draws
//! them through [`surface::WindowSurface`] on animation frames. Everything below
//! [`components`] runs natively against the headless surfaces in [`surface`].

pub mod animation;
pub mod apps;
pub mod components;
pub mod config;
pub mod geometry;
pub mod gestures;
pub mod host;
pub mod identity;
pub mod model;
mod runtime_context;
pub mod surface;
pub mod task_manager;
pub mod window_manager;

pub use apps::ApplicationCatalog;
pub use components::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext, DesktopShell};
pub use config::{ShellConfig, WindowManagerConfig};
pub use model::*;
pub use task_manager::{TaskError, TaskEvent, TaskManager};
pub use window_manager::{WindowError, WindowManager};
