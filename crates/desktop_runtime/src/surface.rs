//! Seams between the window manager and whatever displays its windows.
//!
//! [`WindowSurface`] is one mounted window, [`ShellEnvironment`] answers viewport and dock
//! queries. The browser implementations live in [`crate::host`]; the headless ones here back
//! native tests and non-browser builds.

use std::{cell::RefCell, collections::BTreeMap, rc::Rc, time::Duration};

use crate::{
    geometry::{transformed_bounds, SurfaceTransform},
    model::{WindowRect, WindowSize},
};

/// Single visual write against a window surface.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCommand {
    SetVisible(bool),
    /// `Some` animates every property over the duration, `None` disables transitions.
    SetTransition(Option<Duration>),
    SetTransform(SurfaceTransform),
    SetSize(WindowSize),
    SetPointerEvents(bool),
}

/// A mounted window the window manager can draw into.
pub trait WindowSurface {
    fn apply(&self, command: &SurfaceCommand);

    /// Current on-screen bounding box.
    fn bounding_rect(&self) -> WindowRect;
}

/// Environment queries the window manager needs to compute maximize and minimize targets.
pub trait ShellEnvironment {
    fn viewport(&self) -> WindowSize;

    /// On-screen box of an application's dock icon, if the dock shows it.
    fn dock_icon_rect(&self, application_name: &str) -> Option<WindowRect>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessSurfaceState {
    pub visible: bool,
    pub transition: Option<Duration>,
    pub transform: SurfaceTransform,
    pub size: WindowSize,
    pub pointer_events: bool,
    /// Every command applied so far, oldest first.
    pub applied: Vec<SurfaceCommand>,
}

impl Default for HeadlessSurfaceState {
    fn default() -> Self {
        Self {
            visible: false,
            transition: None,
            transform: SurfaceTransform::translate(0.0, 0.0),
            size: WindowSize {
                width: 0,
                height: 0,
            },
            pointer_events: false,
            applied: Vec::new(),
        }
    }
}

/// In-memory [`WindowSurface`]. Clones share state, so a caller can keep a handle after binding
/// one to the window manager.
#[derive(Debug, Clone, Default)]
pub struct HeadlessSurface {
    state: Rc<RefCell<HeadlessSurfaceState>>,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> HeadlessSurfaceState {
        self.state.borrow().clone()
    }

    /// Drains the applied-command log.
    pub fn take_applied(&self) -> Vec<SurfaceCommand> {
        std::mem::take(&mut self.state.borrow_mut().applied)
    }
}

impl WindowSurface for HeadlessSurface {
    fn apply(&self, command: &SurfaceCommand) {
        let mut state = self.state.borrow_mut();
        match command {
            SurfaceCommand::SetVisible(visible) => state.visible = *visible,
            SurfaceCommand::SetTransition(transition) => state.transition = *transition,
            SurfaceCommand::SetTransform(transform) => state.transform = *transform,
            SurfaceCommand::SetSize(size) => state.size = *size,
            SurfaceCommand::SetPointerEvents(enabled) => state.pointer_events = *enabled,
        }
        state.applied.push(command.clone());
    }

    fn bounding_rect(&self) -> WindowRect {
        let state = self.state.borrow();
        transformed_bounds(state.transform, state.size)
    }
}

pub const HEADLESS_DOCK_ICON_SIZE: i32 = 80;
const HEADLESS_DOCK_GAP: i32 = 20;
const HEADLESS_DOCK_BOTTOM_OFFSET: i32 = 32;

/// Fixed-size [`ShellEnvironment`] with explicitly placed dock icons.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessEnvironment {
    viewport: WindowSize,
    dock_icons: BTreeMap<String, WindowRect>,
}

impl HeadlessEnvironment {
    pub fn new(viewport: WindowSize) -> Self {
        Self {
            viewport,
            dock_icons: BTreeMap::new(),
        }
    }

    /// Lays out one dock icon per name, centered along the bottom of the viewport.
    pub fn with_dock<'a>(viewport: WindowSize, names: impl IntoIterator<Item = &'a str>) -> Self {
        let names: Vec<&str> = names.into_iter().collect();
        let count = names.len() as i32;
        let dock_width =
            count * HEADLESS_DOCK_ICON_SIZE + (count - 1).max(0) * HEADLESS_DOCK_GAP;
        let start_x = (viewport.width - dock_width) / 2;
        let y = viewport.height - HEADLESS_DOCK_BOTTOM_OFFSET - HEADLESS_DOCK_ICON_SIZE;

        let mut environment = Self::new(viewport);
        for (index, name) in names.into_iter().enumerate() {
            let x = start_x + index as i32 * (HEADLESS_DOCK_ICON_SIZE + HEADLESS_DOCK_GAP);
            environment = environment.with_dock_icon(
                name,
                WindowRect {
                    x,
                    y,
                    width: HEADLESS_DOCK_ICON_SIZE,
                    height: HEADLESS_DOCK_ICON_SIZE,
                },
            );
        }
        environment
    }

    pub fn with_dock_icon(mut self, application_name: &str, rect: WindowRect) -> Self {
        self.dock_icons.insert(application_name.to_string(), rect);
        self
    }
}

impl ShellEnvironment for HeadlessEnvironment {
    fn viewport(&self) -> WindowSize {
        self.viewport
    }

    fn dock_icon_rect(&self, application_name: &str) -> Option<WindowRect> {
        self.dock_icons.get(application_name).copied()
    }
}
