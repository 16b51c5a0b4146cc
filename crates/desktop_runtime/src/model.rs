use std::rc::Rc;

use desktop_app_contract::ApplicationDescriptor;
use serde::{Deserialize, Serialize};

pub use desktop_app_contract::InstanceId;

pub const DEFAULT_WINDOW_X: i32 = 100;
pub const DEFAULT_WINDOW_Y: i32 = 100;
pub const DEFAULT_WINDOW_WIDTH: i32 = 1500;
pub const DEFAULT_WINDOW_HEIGHT: i32 = 800;
pub const MIN_WINDOW_WIDTH: i32 = 480;
pub const MIN_WINDOW_HEIGHT: i32 = 320;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl WindowRect {
    pub fn origin(self) -> PointerPosition {
        PointerPosition {
            x: self.x,
            y: self.y,
        }
    }

    pub fn size(self) -> WindowSize {
        WindowSize {
            width: self.width,
            height: self.height,
        }
    }
}

impl Default for WindowRect {
    fn default() -> Self {
        Self {
            x: DEFAULT_WINDOW_X,
            y: DEFAULT_WINDOW_Y,
            width: DEFAULT_WINDOW_WIDTH,
            height: DEFAULT_WINDOW_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSize {
    pub width: i32,
    pub height: i32,
}

impl WindowSize {
    pub fn min_window() -> Self {
        Self {
            width: MIN_WINDOW_WIDTH,
            height: MIN_WINDOW_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: i32,
    pub y: i32,
}

impl PointerPosition {
    pub fn minus(self, other: PointerPosition) -> PointerPosition {
        PointerPosition {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

/// Visual lifecycle of a managed window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WindowLifecycle {
    #[default]
    Floating,
    Maximized,
    Minimized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResizeEdge {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl ResizeEdge {
    /// Every handle rendered around a window, clockwise from the top edge.
    pub const ALL: [ResizeEdge; 8] = [
        ResizeEdge::North,
        ResizeEdge::NorthEast,
        ResizeEdge::East,
        ResizeEdge::SouthEast,
        ResizeEdge::South,
        ResizeEdge::SouthWest,
        ResizeEdge::West,
        ResizeEdge::NorthWest,
    ];

    pub const fn token(self) -> &'static str {
        match self {
            Self::North => "n",
            Self::NorthEast => "ne",
            Self::East => "e",
            Self::SouthEast => "se",
            Self::South => "s",
            Self::SouthWest => "sw",
            Self::West => "w",
            Self::NorthWest => "nw",
        }
    }
}

/// Mutable per-instance window state owned by the window manager.
///
/// `rect` is the restored floating geometry. Maximizing and minimizing only change `state`, so
/// returning to [`WindowLifecycle::Floating`] puts the window back where it was.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowState {
    pub rect: WindowRect,
    pub min_size: WindowSize,
    pub state: WindowLifecycle,
    pub dragging: bool,
    pub drag_offset: PointerPosition,
}

impl WindowState {
    pub fn new(rect: WindowRect, min_size: WindowSize) -> Self {
        Self {
            rect,
            min_size,
            state: WindowLifecycle::Floating,
            dragging: false,
            drag_offset: PointerPosition::default(),
        }
    }
}

impl Default for WindowState {
    fn default() -> Self {
        Self::new(WindowRect::default(), WindowSize::min_window())
    }
}

/// One running application.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    pub instance_id: InstanceId,
    pub application: Rc<ApplicationDescriptor>,
}

impl Instance {
    pub fn application_name(&self) -> &str {
        self.application.name()
    }
}
