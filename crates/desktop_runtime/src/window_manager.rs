//! Window coordinator: per-instance window state, lifecycle transitions, and redraw scheduling.
//!
//! The [`WindowManager`] owns the [`TaskManager`] and keeps one [`WindowState`] per live instance.
//! Geometry changes never re-render the shell; they become [`DrawPlan`]s released frame by frame
//! through [`WindowManager::tick`] into each instance's bound [`WindowSurface`].

use std::{collections::BTreeMap, time::Duration};

use leptos::logging;
use thiserror::Error;

use crate::{
    animation::{DrawPlan, FrameScheduler},
    config::WindowManagerConfig,
    geometry::{dock_target_transform, floating_transform, maximized_frame, resize_rect},
    model::{
        InstanceId, PointerPosition, ResizeEdge, WindowLifecycle, WindowRect, WindowSize,
        WindowState,
    },
    surface::{ShellEnvironment, SurfaceCommand, WindowSurface},
    task_manager::{TaskError, TaskManager},
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Errors for window operations against missing instances, state, or surfaces.
pub enum WindowError {
    /// The task directory rejected the operation.
    #[error(transparent)]
    Task(#[from] TaskError),
    /// The instance has no registered window state.
    #[error("no window state for {0}")]
    NoWindowState(InstanceId),
    /// The instance's window has not mounted a surface yet.
    #[error("no window element to resize for {0}")]
    NoWindowElement(InstanceId),
    /// Minimize was requested for an instance without window state.
    #[error("no window to minimize for {0}")]
    NoWindowToMinimize(InstanceId),
    /// The dock has no icon to minimize the application into.
    #[error("could not find `{0}` in the dock")]
    DockIconNotFound(String),
}

struct WindowEntry {
    state: WindowState,
    surface: Option<Box<dyn WindowSurface>>,
    /// Last size written to the surface, used to center minimize animations.
    displayed_size: Option<WindowSize>,
}

impl WindowEntry {
    fn new(state: WindowState) -> Self {
        Self {
            state,
            surface: None,
            displayed_size: None,
        }
    }
}

/// Window coordinator for one desktop session.
pub struct WindowManager {
    tasks: TaskManager,
    entries: BTreeMap<InstanceId, WindowEntry>,
    scheduler: FrameScheduler,
    environment: Box<dyn ShellEnvironment>,
    config: WindowManagerConfig,
}

impl WindowManager {
    /// Creates a coordinator over `tasks`, with window state for any instances already running.
    pub fn new(
        tasks: TaskManager,
        environment: impl ShellEnvironment + 'static,
        config: WindowManagerConfig,
    ) -> Self {
        let mut manager = Self {
            tasks,
            entries: BTreeMap::new(),
            scheduler: FrameScheduler::default(),
            environment: Box::new(environment),
            config,
        };
        manager.reconcile();
        manager
    }

    pub fn tasks(&self) -> &TaskManager {
        &self.tasks
    }

    pub fn config(&self) -> &WindowManagerConfig {
        &self.config
    }

    pub fn environment(&self) -> &dyn ShellEnvironment {
        self.environment.as_ref()
    }

    /// Syncs window state with the live instance set.
    ///
    /// New instances get default state; entries for closed instances are dropped together with
    /// any pending frames.
    pub fn reconcile(&mut self) {
        let live = self.tasks.instance_ids();
        for instance_id in &live {
            self.ensure_window_state(*instance_id);
        }
        let stale: Vec<InstanceId> = self
            .entries
            .keys()
            .filter(|instance_id| !live.contains(*instance_id))
            .copied()
            .collect();
        for instance_id in stale {
            self.entries.remove(&instance_id);
            self.scheduler.cancel(instance_id);
        }
    }

    /// Creates default window state for `instance_id` unless it already has some.
    ///
    /// Returns `true` when state was created.
    pub fn ensure_window_state(&mut self, instance_id: InstanceId) -> bool {
        if self.entries.contains_key(&instance_id) {
            return false;
        }
        let state = WindowState::new(self.config.default_rect, self.config.min_size);
        self.entries.insert(instance_id, WindowEntry::new(state));
        true
    }

    /// # Errors
    ///
    /// Returns [`WindowError::NoWindowState`] when the instance has no window state.
    pub fn get_window_state_for_instance(
        &self,
        instance_id: InstanceId,
    ) -> Result<&WindowState, WindowError> {
        self.entries
            .get(&instance_id)
            .map(|entry| &entry.state)
            .ok_or(WindowError::NoWindowState(instance_id))
    }

    pub fn window_states(&self) -> impl Iterator<Item = (InstanceId, &WindowState)> {
        self.entries
            .iter()
            .map(|(instance_id, entry)| (*instance_id, &entry.state))
    }

    pub fn is_window_bound(&self, instance_id: InstanceId) -> bool {
        self.entries
            .get(&instance_id)
            .map(|entry| entry.surface.is_some())
            .unwrap_or(false)
    }

    /// Opens an application from the dock.
    ///
    /// An application with a live instance is restored to floating with an animation instead of
    /// being started twice. Returns the instance that was restored or created.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::UnknownApplication`] (wrapped) for names missing from the catalog.
    pub fn request_app_open(&mut self, application_name: &str) -> Result<InstanceId, WindowError> {
        let existing = self
            .tasks
            .exists_instance_of_app(application_name)
            .map(|instance| instance.instance_id);
        if let Some(instance_id) = existing {
            let entry = self
                .entries
                .get_mut(&instance_id)
                .ok_or(WindowError::NoWindowState(instance_id))?;
            entry.state.state = WindowLifecycle::Floating;
            self.draw_instance(instance_id, true)?;
            return Ok(instance_id);
        }

        let instance = self.tasks.create_instance(application_name)?;
        self.reconcile();
        Ok(instance.instance_id)
    }

    /// Binds the mounted surface for `instance_id` and places it at its current state.
    ///
    /// A surface from a previous mount is replaced.
    ///
    /// # Errors
    ///
    /// Returns [`WindowError::NoWindowState`] when the instance has no window state.
    pub fn set_window_element(
        &mut self,
        instance_id: InstanceId,
        surface: impl WindowSurface + 'static,
    ) -> Result<(), WindowError> {
        let entry = self
            .entries
            .get_mut(&instance_id)
            .ok_or(WindowError::NoWindowState(instance_id))?;
        if entry.surface.is_some() {
            logging::debug_warn!("replacing window element for {instance_id}");
        }
        surface.apply(&SurfaceCommand::SetPointerEvents(true));
        entry.surface = Some(Box::new(surface));
        entry.displayed_size = None;
        self.draw_instance(instance_id, false)
    }

    /// Releases the surface of an unmounted window and drops its pending frames.
    pub fn unbind_window_element(&mut self, instance_id: InstanceId) -> bool {
        self.scheduler.cancel(instance_id);
        let Some(entry) = self.entries.get_mut(&instance_id) else {
            return false;
        };
        entry.state.dragging = false;
        entry.displayed_size = None;
        entry.surface.take().is_some()
    }

    /// Moves a window with the pointer.
    ///
    /// The first move of a gesture records the pointer offset from the window's on-screen origin
    /// and disables pointer events on the surface. Every move forces the window back to floating.
    /// Moves before the surface mounts are logged and ignored.
    ///
    /// # Errors
    ///
    /// Returns [`WindowError::NoWindowState`] when the instance has no window state.
    pub fn on_drag(
        &mut self,
        instance_id: InstanceId,
        pointer: PointerPosition,
    ) -> Result<(), WindowError> {
        let entry = self
            .entries
            .get_mut(&instance_id)
            .ok_or(WindowError::NoWindowState(instance_id))?;
        let Some(surface) = entry.surface.as_deref() else {
            logging::warn!("could not find window element for {instance_id}; ignoring drag");
            return Ok(());
        };

        if !entry.state.dragging {
            let bounds = surface.bounding_rect();
            entry.state.dragging = true;
            entry.state.drag_offset = pointer.minus(bounds.origin());
            surface.apply(&SurfaceCommand::SetPointerEvents(false));
        }

        entry.state.rect.x = pointer.x - entry.state.drag_offset.x;
        entry.state.rect.y = pointer.y - entry.state.drag_offset.y;
        entry.state.state = WindowLifecycle::Floating;
        self.draw_instance(instance_id, false)
    }

    /// Ends a drag gesture and restores pointer events on the surface.
    ///
    /// # Errors
    ///
    /// Returns [`WindowError::NoWindowState`] when the instance has no window state.
    pub fn on_drag_end(&mut self, instance_id: InstanceId) -> Result<(), WindowError> {
        let entry = self
            .entries
            .get_mut(&instance_id)
            .ok_or(WindowError::NoWindowState(instance_id))?;
        let Some(surface) = entry.surface.as_deref() else {
            logging::warn!("could not find window element for {instance_id}; ignoring drag end");
            return Ok(());
        };
        entry.state.dragging = false;
        surface.apply(&SurfaceCommand::SetPointerEvents(true));
        Ok(())
    }

    /// Resizes a window from `edge` toward the pointer, respecting its minimum size.
    ///
    /// # Errors
    ///
    /// Returns [`WindowError::NoWindowState`] without window state and
    /// [`WindowError::NoWindowElement`] before the surface mounts.
    pub fn on_resize(
        &mut self,
        instance_id: InstanceId,
        pointer: PointerPosition,
        edge: ResizeEdge,
    ) -> Result<(), WindowError> {
        let entry = self
            .entries
            .get_mut(&instance_id)
            .ok_or(WindowError::NoWindowState(instance_id))?;
        let surface = entry
            .surface
            .as_deref()
            .ok_or(WindowError::NoWindowElement(instance_id))?;
        let bounds = surface.bounding_rect();
        let min_size = entry.state.min_size;
        resize_rect(&mut entry.state.rect, bounds, edge, pointer, min_size);
        self.draw_instance(instance_id, false)
    }

    /// Minimizes a window into its dock icon.
    ///
    /// # Errors
    ///
    /// Returns [`WindowError::NoWindowToMinimize`] without window state and
    /// [`WindowError::DockIconNotFound`] when the dock has no icon for the application.
    pub fn minimize(&mut self, instance_id: InstanceId) -> Result<(), WindowError> {
        let entry = self
            .entries
            .get_mut(&instance_id)
            .ok_or(WindowError::NoWindowToMinimize(instance_id))?;
        entry.state.state = WindowLifecycle::Minimized;
        self.draw_instance(instance_id, true)
    }

    /// Maximizes a window, or returns a maximized window to floating.
    ///
    /// # Errors
    ///
    /// Returns [`WindowError::NoWindowState`] when the instance has no window state.
    pub fn zoom(&mut self, instance_id: InstanceId) -> Result<(), WindowError> {
        let entry = self
            .entries
            .get_mut(&instance_id)
            .ok_or(WindowError::NoWindowState(instance_id))?;
        entry.state.state = match entry.state.state {
            WindowLifecycle::Maximized => WindowLifecycle::Floating,
            WindowLifecycle::Floating | WindowLifecycle::Minimized => WindowLifecycle::Maximized,
        };
        self.draw_instance(instance_id, true)
    }

    /// Closes an instance and drops its window state.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::UnknownInstance`] (wrapped) when the instance is not live.
    pub fn close(&mut self, instance_id: InstanceId) -> Result<(), WindowError> {
        self.tasks.close_instance(instance_id)?;
        self.reconcile();
        Ok(())
    }

    /// Schedules a redraw of `instance_id` for the next frame, replacing any pending one.
    ///
    /// Minimize and maximize always animate; `animate` only affects floating redraws. Windows
    /// without a mounted surface are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`WindowError::NoWindowState`] without window state, and for minimized windows
    /// [`TaskError::UnknownInstance`] (wrapped) or [`WindowError::DockIconNotFound`] when no
    /// animation target can be resolved.
    pub fn draw_instance(&mut self, instance_id: InstanceId, animate: bool) -> Result<(), WindowError> {
        let Some((plan, displayed_size)) = self.build_draw_plan(instance_id, animate)? else {
            return Ok(());
        };
        if let (Some(size), Some(entry)) = (displayed_size, self.entries.get_mut(&instance_id)) {
            entry.displayed_size = Some(size);
        }
        self.scheduler.schedule(instance_id, plan);
        Ok(())
    }

    /// Applies the frame steps due at `now` to their bound surfaces.
    pub fn tick(&mut self, now: Duration) {
        for (instance_id, commands) in self.scheduler.tick(now) {
            let Some(surface) = self
                .entries
                .get(&instance_id)
                .and_then(|entry| entry.surface.as_deref())
            else {
                continue;
            };
            for command in &commands {
                surface.apply(command);
            }
        }
    }

    pub fn has_pending_frames(&self) -> bool {
        !self.scheduler.is_idle()
    }

    fn build_draw_plan(
        &self,
        instance_id: InstanceId,
        animate: bool,
    ) -> Result<Option<(DrawPlan, Option<WindowSize>)>, WindowError> {
        let entry = self
            .entries
            .get(&instance_id)
            .ok_or(WindowError::NoWindowState(instance_id))?;
        if entry.surface.is_none() {
            logging::debug_warn!("skipping draw for {instance_id}: window element not mounted");
            return Ok(None);
        }

        let config = &self.config;
        let rect = entry.state.rect;
        let planned = match entry.state.state {
            WindowLifecycle::Floating if animate => {
                let duration = config.floating_animation();
                let plan = DrawPlan::new()
                    .then(
                        Duration::ZERO,
                        vec![
                            SurfaceCommand::SetTransition(Some(duration)),
                            SurfaceCommand::SetVisible(true),
                        ],
                    )
                    .then(
                        Duration::ZERO,
                        vec![
                            SurfaceCommand::SetTransform(floating_transform(rect)),
                            SurfaceCommand::SetSize(rect.size()),
                        ],
                    )
                    .then(duration, vec![SurfaceCommand::SetTransition(None)]);
                (plan, Some(rect.size()))
            }
            WindowLifecycle::Floating => {
                let plan = DrawPlan::new().then(
                    Duration::ZERO,
                    vec![
                        SurfaceCommand::SetTransition(None),
                        SurfaceCommand::SetVisible(true),
                        SurfaceCommand::SetTransform(floating_transform(rect)),
                        SurfaceCommand::SetSize(rect.size()),
                    ],
                );
                (plan, Some(rect.size()))
            }
            WindowLifecycle::Minimized => {
                let application_name = self
                    .tasks
                    .get_instance(instance_id)
                    .ok_or(TaskError::UnknownInstance(instance_id))?
                    .application_name();
                let dock_icon = self
                    .environment
                    .dock_icon_rect(application_name)
                    .ok_or_else(|| WindowError::DockIconNotFound(application_name.to_string()))?;
                let displayed = entry.displayed_size.unwrap_or(rect.size());
                let window = WindowRect {
                    x: 0,
                    y: 0,
                    width: displayed.width,
                    height: displayed.height,
                };
                let target = dock_target_transform(window, dock_icon, config.minimized_scale);
                let duration = config.minimize_animation();
                let plan = DrawPlan::new()
                    .then(
                        Duration::ZERO,
                        vec![
                            SurfaceCommand::SetTransition(Some(duration)),
                            SurfaceCommand::SetTransform(target),
                        ],
                    )
                    .then(
                        duration,
                        vec![
                            SurfaceCommand::SetTransition(None),
                            SurfaceCommand::SetVisible(false),
                        ],
                    );
                (plan, None)
            }
            WindowLifecycle::Maximized => {
                let (transform, size) = maximized_frame(self.environment.viewport(), config);
                let duration = config.maximize_animation();
                let plan = DrawPlan::new()
                    .then(
                        Duration::ZERO,
                        vec![
                            SurfaceCommand::SetTransition(Some(duration)),
                            SurfaceCommand::SetVisible(true),
                        ],
                    )
                    .then(
                        Duration::ZERO,
                        vec![
                            SurfaceCommand::SetTransform(transform),
                            SurfaceCommand::SetSize(size),
                        ],
                    )
                    .then(duration, vec![SurfaceCommand::SetTransition(None)]);
                (plan, Some(size))
            }
        };
        Ok(Some(planned))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        apps::ApplicationCatalog,
        geometry::SurfaceTransform,
        surface::{HeadlessEnvironment, HeadlessSurface},
    };

    const VIEWPORT: WindowSize = WindowSize {
        width: 1920,
        height: 1080,
    };
    const FRAME: Duration = Duration::from_millis(16);

    struct Harness {
        wm: WindowManager,
        clock: Duration,
    }

    impl Harness {
        fn new() -> Self {
            let catalog = ApplicationCatalog::builtin();
            let environment =
                HeadlessEnvironment::with_dock(VIEWPORT, catalog.iter().map(|app| app.name()));
            Self::with_environment(catalog, environment)
        }

        fn with_environment(catalog: ApplicationCatalog, environment: HeadlessEnvironment) -> Self {
            Self {
                wm: WindowManager::new(
                    TaskManager::new(catalog),
                    environment,
                    WindowManagerConfig::default(),
                ),
                clock: Duration::from_secs(10),
            }
        }

        fn open_mounted(&mut self, name: &str) -> (InstanceId, HeadlessSurface) {
            let id = self.wm.request_app_open(name).expect("open app");
            let surface = HeadlessSurface::new();
            self.wm
                .set_window_element(id, surface.clone())
                .expect("bind surface");
            self.settle();
            surface.take_applied();
            (id, surface)
        }

        fn frame(&mut self) {
            self.clock += FRAME;
            self.wm.tick(self.clock);
        }

        fn settle(&mut self) {
            for _ in 0..64 {
                if !self.wm.has_pending_frames() {
                    return;
                }
                self.frame();
            }
            panic!("frames never settled");
        }

        fn state(&self, id: InstanceId) -> WindowState {
            self.wm
                .get_window_state_for_instance(id)
                .expect("window state")
                .clone()
        }
    }

    fn pointer(x: i32, y: i32) -> PointerPosition {
        PointerPosition { x, y }
    }

    #[test]
    fn opened_instances_get_default_window_state() {
        let mut harness = Harness::new();

        let id = harness.wm.request_app_open("terminal").unwrap();

        let state = harness.state(id);
        assert_eq!(
            state.rect,
            WindowRect {
                x: 100,
                y: 100,
                width: 1500,
                height: 800
            }
        );
        assert_eq!(
            state.min_size,
            WindowSize {
                width: 480,
                height: 320
            }
        );
        assert_eq!(state.state, WindowLifecycle::Floating);
        assert!(!state.dragging);
        assert!(!harness.wm.is_window_bound(id));
    }

    #[test]
    fn binding_a_surface_places_it_at_the_floating_rect() {
        let (_, surface) = Harness::new().open_mounted("safari");

        let snapshot = surface.snapshot();
        assert!(snapshot.visible);
        assert!(snapshot.pointer_events);
        assert_eq!(snapshot.transition, None);
        assert_eq!(snapshot.transform, SurfaceTransform::translate(100.0, 100.0));
        assert_eq!(
            snapshot.size,
            WindowSize {
                width: 1500,
                height: 800
            }
        );
    }

    #[test]
    fn request_app_open_restores_instead_of_duplicating() {
        let mut harness = Harness::new();
        let (id, surface) = harness.open_mounted("terminal");
        let rect_before = harness.state(id).rect;

        harness.wm.minimize(id).unwrap();
        harness.settle();
        assert_eq!(harness.state(id).state, WindowLifecycle::Minimized);
        assert!(!surface.snapshot().visible);

        let reopened = harness.wm.request_app_open("terminal").unwrap();
        harness.settle();

        assert_eq!(reopened, id);
        assert_eq!(harness.wm.tasks().len(), 1);
        assert_eq!(harness.state(id).state, WindowLifecycle::Floating);
        assert_eq!(harness.state(id).rect, rect_before);
        let snapshot = surface.snapshot();
        assert!(snapshot.visible);
        assert_eq!(snapshot.transform, SurfaceTransform::translate(100.0, 100.0));
    }

    #[test]
    fn animated_restore_enables_transition_a_frame_before_geometry() {
        let mut harness = Harness::new();
        let (id, surface) = harness.open_mounted("terminal");
        harness.wm.minimize(id).unwrap();
        harness.settle();
        surface.take_applied();

        harness.wm.request_app_open("terminal").unwrap();

        harness.frame();
        assert_eq!(
            surface.take_applied(),
            vec![
                SurfaceCommand::SetTransition(Some(Duration::from_millis(200))),
                SurfaceCommand::SetVisible(true),
            ]
        );
        harness.frame();
        assert_eq!(
            surface.take_applied(),
            vec![
                SurfaceCommand::SetTransform(SurfaceTransform::translate(100.0, 100.0)),
                SurfaceCommand::SetSize(WindowSize {
                    width: 1500,
                    height: 800
                }),
            ]
        );
        harness.settle();
        assert_eq!(surface.take_applied(), vec![SurfaceCommand::SetTransition(None)]);
    }

    #[test]
    fn minimize_shrinks_the_window_into_its_dock_icon_then_hides_it() {
        let mut harness = Harness::new();
        let (id, surface) = harness.open_mounted("terminal");

        harness.wm.minimize(id).unwrap();
        harness.frame();
        let mid_animation = surface.snapshot();
        assert!(mid_animation.visible);
        assert_eq!(mid_animation.transition, Some(Duration::from_millis(300)));
        assert_eq!(
            mid_animation.transform,
            SurfaceTransform {
                translate_x: 310.0,
                translate_y: 608.0,
                scale: 0.05
            }
        );

        harness.settle();
        let settled = surface.snapshot();
        assert!(!settled.visible);
        assert_eq!(settled.transition, None);
        assert_eq!(harness.state(id).rect.width, 1500);
    }

    #[test]
    fn minimizing_a_maximized_window_centres_the_maximized_frame_on_the_dock() {
        let mut harness = Harness::new();
        let (id, surface) = harness.open_mounted("terminal");
        harness.wm.zoom(id).unwrap();
        harness.settle();

        harness.wm.minimize(id).unwrap();
        harness.frame();

        let dock_icon = harness.wm.environment().dock_icon_rect("terminal").unwrap();
        let maximized = WindowRect {
            x: 0,
            y: 0,
            width: 1900,
            height: 920,
        };
        let expected =
            dock_target_transform(maximized, dock_icon, harness.wm.config().minimized_scale);
        assert_eq!(
            expected,
            SurfaceTransform {
                translate_x: 110.0,
                translate_y: 548.0,
                scale: 0.05
            }
        );
        assert_eq!(surface.snapshot().transform, expected);

        harness.settle();
        assert!(!surface.snapshot().visible);
        assert_eq!(harness.state(id).rect.width, 1500);
    }

    #[test]
    fn minimize_without_window_state_fails() {
        let mut harness = Harness::new();

        assert_eq!(
            harness.wm.minimize(InstanceId(42)),
            Err(WindowError::NoWindowToMinimize(InstanceId(42)))
        );
    }

    #[test]
    fn minimize_without_dock_icon_is_fatal() {
        let mut harness = Harness::with_environment(
            ApplicationCatalog::builtin(),
            HeadlessEnvironment::new(VIEWPORT),
        );
        let (id, _) = harness.open_mounted("terminal");

        assert_eq!(
            harness.wm.minimize(id),
            Err(WindowError::DockIconNotFound("terminal".to_string()))
        );
    }

    #[test]
    fn zoom_maximizes_then_restores_the_floating_rect() {
        let mut harness = Harness::new();
        let (id, surface) = harness.open_mounted("safari");

        harness.wm.zoom(id).unwrap();
        harness.settle();
        assert_eq!(harness.state(id).state, WindowLifecycle::Maximized);
        assert_eq!(harness.state(id).rect.width, 1500);
        let maximized = surface.snapshot();
        assert_eq!(maximized.transform, SurfaceTransform::translate(10.0, 42.0));
        assert_eq!(
            maximized.size,
            WindowSize {
                width: 1900,
                height: 920
            }
        );

        harness.wm.zoom(id).unwrap();
        harness.settle();
        assert_eq!(harness.state(id).state, WindowLifecycle::Floating);
        assert_eq!(
            surface.snapshot().size,
            WindowSize {
                width: 1500,
                height: 800
            }
        );
    }

    #[test]
    fn restore_after_minimize_and_zoom_keeps_a_moved_and_resized_rect() {
        let mut harness = Harness::new();
        let (id, surface) = harness.open_mounted("terminal");

        harness.wm.on_drag(id, pointer(150, 120)).unwrap();
        harness.wm.on_drag(id, pointer(350, 220)).unwrap();
        harness.wm.on_drag_end(id).unwrap();
        harness.settle();
        // Height candidate is negative, so only the width changes.
        harness
            .wm
            .on_resize(id, pointer(1200, 0), ResizeEdge::SouthEast)
            .unwrap();
        harness.settle();
        let moved = WindowRect {
            x: 300,
            y: 200,
            width: 900,
            height: 800,
        };
        assert_eq!(harness.state(id).rect, moved);

        harness.wm.minimize(id).unwrap();
        harness.settle();
        harness.wm.zoom(id).unwrap();
        harness.settle();
        assert_eq!(harness.state(id).state, WindowLifecycle::Maximized);
        assert_eq!(harness.wm.request_app_open("terminal"), Ok(id));
        harness.settle();

        let state = harness.state(id);
        assert_eq!(state.state, WindowLifecycle::Floating);
        assert_eq!(state.rect, moved);
        let snapshot = surface.snapshot();
        assert!(snapshot.visible);
        assert_eq!(snapshot.transform, SurfaceTransform::translate(300.0, 200.0));
        assert_eq!(
            snapshot.size,
            WindowSize {
                width: 900,
                height: 800
            }
        );
    }

    #[test]
    fn dragging_a_maximized_window_floats_it_on_first_move() {
        let mut harness = Harness::new();
        let (id, surface) = harness.open_mounted("safari");
        harness.wm.zoom(id).unwrap();
        harness.settle();

        harness.wm.on_drag(id, pointer(500, 60)).unwrap();

        let state = harness.state(id);
        assert_eq!(state.state, WindowLifecycle::Floating);
        assert!(state.dragging);
        assert_eq!(state.drag_offset, pointer(490, 18));
        assert_eq!((state.rect.x, state.rect.y), (10, 42));
        assert!(!surface.snapshot().pointer_events);

        harness.wm.on_drag(id, pointer(600, 160)).unwrap();
        assert_eq!(
            (harness.state(id).rect.x, harness.state(id).rect.y),
            (110, 142)
        );

        harness.wm.on_drag_end(id).unwrap();
        harness.settle();
        assert!(!harness.state(id).dragging);
        let snapshot = surface.snapshot();
        assert!(snapshot.pointer_events);
        assert_eq!(snapshot.transform, SurfaceTransform::translate(110.0, 142.0));
        assert_eq!(
            snapshot.size,
            WindowSize {
                width: 1500,
                height: 800
            }
        );
    }

    #[test]
    fn drag_keeps_the_grab_offset_for_the_whole_gesture() {
        let mut harness = Harness::new();
        let (id, _) = harness.open_mounted("terminal");

        harness.wm.on_drag(id, pointer(150, 120)).unwrap();
        assert_eq!(harness.state(id).rect.origin(), pointer(100, 100));

        harness.wm.on_drag(id, pointer(250, 320)).unwrap();
        harness.wm.on_drag(id, pointer(260, 330)).unwrap();
        assert_eq!(harness.state(id).rect.origin(), pointer(210, 310));
    }

    #[test]
    fn drag_before_mount_is_ignored() {
        let mut harness = Harness::new();
        let id = harness.wm.request_app_open("terminal").unwrap();

        assert_eq!(harness.wm.on_drag(id, pointer(400, 400)), Ok(()));
        assert_eq!(harness.wm.on_drag_end(id), Ok(()));

        let state = harness.state(id);
        assert!(!state.dragging);
        assert_eq!(state.rect.origin(), pointer(100, 100));
        assert!(!harness.wm.has_pending_frames());
    }

    #[test]
    fn resize_requires_a_mounted_window() {
        let mut harness = Harness::new();
        let id = harness.wm.request_app_open("terminal").unwrap();

        assert_eq!(
            harness.wm.on_resize(id, pointer(900, 500), ResizeEdge::East),
            Err(WindowError::NoWindowElement(id))
        );
    }

    #[test]
    fn resize_below_minimum_leaves_the_axis_unchanged() {
        let mut harness = Harness::new();
        let (id, surface) = harness.open_mounted("terminal");

        harness
            .wm
            .on_resize(id, pointer(400, 500), ResizeEdge::East)
            .unwrap();
        assert_eq!(harness.state(id).rect.width, 1500);
        assert_eq!(harness.state(id).rect.x, 100);

        harness
            .wm
            .on_resize(id, pointer(1100, 500), ResizeEdge::East)
            .unwrap();
        harness.settle();
        assert_eq!(harness.state(id).rect.width, 1000);
        assert_eq!(surface.snapshot().size.width, 1000);
    }

    #[test]
    fn close_prunes_window_state_and_pending_frames() {
        let mut harness = Harness::new();
        let (id, _) = harness.open_mounted("terminal");
        harness.wm.zoom(id).unwrap();
        assert!(harness.wm.has_pending_frames());

        harness.wm.close(id).unwrap();

        assert!(harness.wm.tasks().is_empty());
        assert_eq!(
            harness.wm.get_window_state_for_instance(id),
            Err(WindowError::NoWindowState(id))
        );
        assert!(!harness.wm.has_pending_frames());

        let reopened = harness.wm.request_app_open("terminal").unwrap();
        assert_ne!(reopened, id);
        assert_eq!(harness.state(reopened).state, WindowLifecycle::Floating);
    }

    #[test]
    fn close_unknown_instance_fails_without_side_effects() {
        let mut harness = Harness::new();
        let (id, _) = harness.open_mounted("terminal");

        assert_eq!(
            harness.wm.close(InstanceId(77)),
            Err(WindowError::Task(TaskError::UnknownInstance(InstanceId(77))))
        );
        assert_eq!(harness.wm.tasks().instance_ids(), vec![id]);
        assert!(harness.wm.get_window_state_for_instance(id).is_ok());
    }

    #[test]
    fn unknown_application_is_reported() {
        let mut harness = Harness::new();

        assert_eq!(
            harness.wm.request_app_open("finder"),
            Err(WindowError::Task(TaskError::UnknownApplication(
                "finder".to_string()
            )))
        );
    }

    #[test]
    fn newer_redraw_supersedes_a_pending_minimize() {
        let mut harness = Harness::new();
        let (id, surface) = harness.open_mounted("terminal");

        harness.wm.minimize(id).unwrap();
        harness.wm.request_app_open("terminal").unwrap();
        harness.settle();

        let snapshot = surface.snapshot();
        assert!(snapshot.visible);
        assert_eq!(snapshot.transform, SurfaceTransform::translate(100.0, 100.0));
        assert!(!surface
            .take_applied()
            .contains(&SurfaceCommand::SetVisible(false)));
    }

    #[test]
    fn reconcile_covers_instances_created_before_the_coordinator() {
        let mut tasks = TaskManager::new(ApplicationCatalog::builtin());
        let early = tasks.create_instance("settings").unwrap();
        let mut wm = WindowManager::new(
            tasks,
            HeadlessEnvironment::new(VIEWPORT),
            WindowManagerConfig::default(),
        );

        assert!(wm.get_window_state_for_instance(early.instance_id).is_ok());
        assert!(!wm.ensure_window_state(early.instance_id));
        assert_eq!(wm.window_states().count(), 1);
    }

    #[test]
    fn remounting_draws_into_the_new_surface() {
        let mut harness = Harness::new();
        let (id, old_surface) = harness.open_mounted("terminal");

        assert!(harness.wm.unbind_window_element(id));
        assert!(!harness.wm.is_window_bound(id));
        let new_surface = HeadlessSurface::new();
        harness.wm.set_window_element(id, new_surface.clone()).unwrap();
        harness.settle();

        assert!(old_surface.take_applied().is_empty());
        assert_eq!(
            new_surface.snapshot().transform,
            SurfaceTransform::translate(100.0, 100.0)
        );
    }
}
