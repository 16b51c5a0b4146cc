//! Window geometry helpers shared by the window manager and its gesture handlers.

use serde::{Deserialize, Serialize};

use crate::{
    config::WindowManagerConfig,
    model::{PointerPosition, ResizeEdge, WindowRect, WindowSize},
};

/// Transform applied to a window surface, scaled around the surface center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceTransform {
    pub translate_x: f64,
    pub translate_y: f64,
    pub scale: f64,
}

impl SurfaceTransform {
    pub fn translate(x: f64, y: f64) -> Self {
        Self {
            translate_x: x,
            translate_y: y,
            scale: 1.0,
        }
    }

    pub fn to_css(&self) -> String {
        let translate = format!(
            "translateX({}px) translateY({}px)",
            self.translate_x, self.translate_y
        );
        if (self.scale - 1.0).abs() < f64::EPSILON {
            translate
        } else {
            format!("{translate} scale({})", self.scale)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AxisSide {
    /// Top or left: the offset moves with the pointer.
    Leading,
    /// Bottom or right: only the size changes.
    Trailing,
}

fn vertical_side(edge: ResizeEdge) -> Option<AxisSide> {
    match edge {
        ResizeEdge::North | ResizeEdge::NorthEast | ResizeEdge::NorthWest => Some(AxisSide::Leading),
        ResizeEdge::South | ResizeEdge::SouthEast | ResizeEdge::SouthWest => {
            Some(AxisSide::Trailing)
        }
        ResizeEdge::East | ResizeEdge::West => None,
    }
}

fn horizontal_side(edge: ResizeEdge) -> Option<AxisSide> {
    match edge {
        ResizeEdge::West | ResizeEdge::NorthWest | ResizeEdge::SouthWest => Some(AxisSide::Leading),
        ResizeEdge::East | ResizeEdge::NorthEast | ResizeEdge::SouthEast => Some(AxisSide::Trailing),
        ResizeEdge::North | ResizeEdge::South => None,
    }
}

/// Applies a resize drag on `edge` to `rect` in place.
///
/// `bounds` is the window's current on-screen bounding box. Trailing sides size from the bounding
/// box origin to the pointer; leading sides move the offset to the pointer and grow the size by
/// the distance moved. A candidate below `min_size` leaves that axis untouched rather than
/// clamping it, and each axis of a corner is decided independently.
///
/// Returns `true` when any axis changed.
pub fn resize_rect(
    rect: &mut WindowRect,
    bounds: WindowRect,
    edge: ResizeEdge,
    pointer: PointerPosition,
    min_size: WindowSize,
) -> bool {
    let mut changed = false;
    if let Some(side) = vertical_side(edge) {
        changed |= resize_axis(
            &mut rect.y,
            &mut rect.height,
            bounds.y,
            pointer.y,
            min_size.height,
            side,
        );
    }
    if let Some(side) = horizontal_side(edge) {
        changed |= resize_axis(
            &mut rect.x,
            &mut rect.width,
            bounds.x,
            pointer.x,
            min_size.width,
            side,
        );
    }
    changed
}

fn resize_axis(
    offset: &mut i32,
    size: &mut i32,
    bounds_offset: i32,
    pointer: i32,
    min: i32,
    side: AxisSide,
) -> bool {
    match side {
        AxisSide::Trailing => {
            let candidate = pointer - bounds_offset;
            if candidate < min {
                return false;
            }
            *size = candidate;
        }
        AxisSide::Leading => {
            let candidate = *offset - pointer + *size;
            if candidate < min {
                return false;
            }
            *offset = pointer;
            *size = candidate;
        }
    }
    true
}

pub fn floating_transform(rect: WindowRect) -> SurfaceTransform {
    SurfaceTransform::translate(f64::from(rect.x), f64::from(rect.y))
}

/// Transform that centers a window of `window` bounds on `dock_icon` and shrinks it to `scale`.
pub fn dock_target_transform(
    window: WindowRect,
    dock_icon: WindowRect,
    scale: f64,
) -> SurfaceTransform {
    SurfaceTransform {
        translate_x: f64::from(dock_icon.x) - f64::from(window.width) / 2.0
            + f64::from(dock_icon.width) / 2.0,
        translate_y: f64::from(dock_icon.y) - f64::from(window.height) / 2.0
            + f64::from(dock_icon.height) / 2.0,
        scale,
    }
}

/// Transform and size of a maximized window: pinned under the menu bar with a margin, filling the
/// viewport minus the dock strip.
pub fn maximized_frame(
    viewport: WindowSize,
    config: &WindowManagerConfig,
) -> (SurfaceTransform, WindowSize) {
    let margin = config.maximize_margin;
    let transform = SurfaceTransform::translate(
        f64::from(margin),
        f64::from(config.menu_bar_height + margin),
    );
    let size = WindowSize {
        width: (viewport.width - margin * 2).max(0),
        height: (viewport.height - margin * 2 - config.dock_reserved_height).max(0),
    };
    (transform, size)
}

/// On-screen box of a surface with `size` under `transform`, scaled around its center.
pub fn transformed_bounds(transform: SurfaceTransform, size: WindowSize) -> WindowRect {
    let width = f64::from(size.width) * transform.scale;
    let height = f64::from(size.height) * transform.scale;
    WindowRect {
        x: (transform.translate_x + (f64::from(size.width) - width) / 2.0).round() as i32,
        y: (transform.translate_y + (f64::from(size.height) - height) / 2.0).round() as i32,
        width: width.round() as i32,
        height: height.round() as i32,
    }
}
