//! Pointer gesture state for window chrome.
//!
//! These are plain state machines over a [`WindowManager`]; the components wire them to DOM
//! events. A gesture starts on pointer-down over its hit region and follows window-level move and
//! up events until released.

use crate::{
    model::{InstanceId, PointerPosition, ResizeEdge},
    window_manager::{WindowError, WindowManager},
};

/// Title-bar drag gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragArea {
    instance_id: InstanceId,
    listening: bool,
}

impl DragArea {
    pub fn new(instance_id: InstanceId) -> Self {
        Self {
            instance_id,
            listening: false,
        }
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn pointer_down(&mut self) {
        self.listening = true;
    }

    /// Moves the window while the gesture is active.
    ///
    /// # Errors
    ///
    /// Propagates [`WindowManager::on_drag`] failures.
    pub fn pointer_move(
        &self,
        windows: &mut WindowManager,
        pointer: PointerPosition,
    ) -> Result<(), WindowError> {
        if !self.listening {
            return Ok(());
        }
        windows.on_drag(self.instance_id, pointer)
    }

    /// Ends the gesture. Releases outside an active gesture are ignored.
    ///
    /// # Errors
    ///
    /// Propagates [`WindowManager::on_drag_end`] failures.
    pub fn pointer_up(&mut self, windows: &mut WindowManager) -> Result<(), WindowError> {
        if !self.listening {
            return Ok(());
        }
        self.listening = false;
        windows.on_drag_end(self.instance_id)
    }
}

/// Resize gesture for one window edge or corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resizer {
    instance_id: InstanceId,
    edge: ResizeEdge,
    listening: bool,
}

impl Resizer {
    pub fn new(instance_id: InstanceId, edge: ResizeEdge) -> Self {
        Self {
            instance_id,
            edge,
            listening: false,
        }
    }

    pub fn edge(&self) -> ResizeEdge {
        self.edge
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn pointer_down(&mut self) {
        self.listening = true;
    }

    /// # Errors
    ///
    /// Propagates [`WindowManager::on_resize`] failures.
    pub fn pointer_move(
        &self,
        windows: &mut WindowManager,
        pointer: PointerPosition,
    ) -> Result<(), WindowError> {
        if !self.listening {
            return Ok(());
        }
        windows.on_resize(self.instance_id, pointer, self.edge)
    }

    pub fn pointer_up(&mut self) {
        self.listening = false;
    }
}

/// Title-bar window buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrafficLight {
    Close,
    Minimize,
    Zoom,
}

impl TrafficLight {
    /// Render order, left to right.
    pub const ALL: [TrafficLight; 3] = [
        TrafficLight::Close,
        TrafficLight::Minimize,
        TrafficLight::Zoom,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Close => "close",
            Self::Minimize => "minimize",
            Self::Zoom => "zoom",
        }
    }

    /// Runs the button's action on `instance_id`.
    ///
    /// # Errors
    ///
    /// Propagates the failure of the underlying window operation.
    pub fn press(
        self,
        windows: &mut WindowManager,
        instance_id: InstanceId,
    ) -> Result<(), WindowError> {
        match self {
            Self::Close => windows.close(instance_id),
            Self::Minimize => windows.minimize(instance_id),
            Self::Zoom => windows.zoom(instance_id),
        }
    }
}
