//! Viewport: pan, zoom and pointer gestures.
//!
//! Mouse and touch input are first normalized into [`PointerEvent`]s, which
//! drive a single drag state machine:
//!
//! ```text
//! Idle --Down--> Dragging --Up/Leave--> Idle
//!                   |  ^
//!                   +--+ Move: pan = pointer - start
//! ```
//!
//! The world-to-screen transform is `translate(pan)` followed by
//! `scale(zoom)`, applied to nodes and connectors alike.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::config::{
    DEFAULT_DESKTOP_MAX_SCALE, DEFAULT_DESKTOP_MIN_SCALE, DEFAULT_DESKTOP_RESET_TOP,
    DEFAULT_DESKTOP_SCALE, DEFAULT_TOUCH_MAX_SCALE, DEFAULT_TOUCH_MIN_SCALE,
    DEFAULT_TOUCH_RESET_TOP, DEFAULT_TOUCH_SCALE, DEFAULT_ZOOM_STEP,
};
use crate::layout::{DisplayPreset, LayoutMetrics, NodePositions, Point};
use crate::member::MemberId;

/// Zoom limits and reset placement for one display class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomSettings {
    /// Scale after a reset
    pub default_scale: f64,
    pub min_scale: f64,
    pub max_scale: f64,
    /// Scale change per zoom step
    pub step: f64,
    /// Vertical pan offset after a reset
    pub reset_top: f64,
}

impl ZoomSettings {
    pub fn for_preset(preset: DisplayPreset) -> Self {
        match preset {
            DisplayPreset::Desktop => Self {
                default_scale: DEFAULT_DESKTOP_SCALE,
                min_scale: DEFAULT_DESKTOP_MIN_SCALE,
                max_scale: DEFAULT_DESKTOP_MAX_SCALE,
                step: DEFAULT_ZOOM_STEP,
                reset_top: DEFAULT_DESKTOP_RESET_TOP,
            },
            DisplayPreset::Touch => Self {
                default_scale: DEFAULT_TOUCH_SCALE,
                min_scale: DEFAULT_TOUCH_MIN_SCALE,
                max_scale: DEFAULT_TOUCH_MAX_SCALE,
                step: DEFAULT_ZOOM_STEP,
                reset_top: DEFAULT_TOUCH_RESET_TOP,
            },
        }
    }

    fn clamp(&self, scale: f64) -> f64 {
        scale.max(self.min_scale).min(self.max_scale)
    }
}

impl Default for ZoomSettings {
    fn default() -> Self {
        Self::for_preset(DisplayPreset::Desktop)
    }
}

/// Where a pointer event came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerSource {
    Mouse,
    Touch,
}

/// Raw input as delivered by a front-end, before normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum RawPointer {
    MouseDown(Point),
    MouseMove(Point),
    MouseUp,
    MouseLeave,
    /// Active touch points, first one drives the gesture
    TouchStart(Vec<Point>),
    TouchMove(Vec<Point>),
    TouchEnd,
    TouchCancel,
}

impl RawPointer {
    pub fn source(&self) -> PointerSource {
        match self {
            RawPointer::MouseDown(_)
            | RawPointer::MouseMove(_)
            | RawPointer::MouseUp
            | RawPointer::MouseLeave => PointerSource::Mouse,
            _ => PointerSource::Touch,
        }
    }

    /// Normalizes to the unified event model.
    ///
    /// Touch events without any touch point carry no position and are
    /// dropped.
    pub fn normalize(&self) -> Option<PointerEvent> {
        match self {
            RawPointer::MouseDown(p) => Some(PointerEvent::Down(*p)),
            RawPointer::MouseMove(p) => Some(PointerEvent::Move(*p)),
            RawPointer::MouseUp | RawPointer::TouchEnd => Some(PointerEvent::Up),
            RawPointer::MouseLeave | RawPointer::TouchCancel => Some(PointerEvent::Leave),
            RawPointer::TouchStart(points) => points.first().copied().map(PointerEvent::Down),
            RawPointer::TouchMove(points) => points.first().copied().map(PointerEvent::Move),
        }
    }
}

/// Unified pointer event, in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Point),
    Move(Point),
    Up,
    /// Pointer left the interactive surface; handled exactly like `Up`
    Leave,
}

/// Drag state machine.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        /// Pointer position minus pan offset at pointer-down
        start: Point,
    },
}

/// Current pan offset and zoom scale of the tree canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    pan: Point,
    scale: f64,
    zoom: ZoomSettings,
    drag: DragState,
}

impl Viewport {
    /// A viewport at the origin with the default scale.
    pub fn new(zoom: ZoomSettings) -> Self {
        Self {
            pan: Point::ORIGIN,
            scale: zoom.clamp(zoom.default_scale),
            zoom,
            drag: DragState::Idle,
        }
    }

    pub fn pan(&self) -> Point {
        self.pan
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn zoom_settings(&self) -> &ZoomSettings {
        &self.zoom
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    /// Replaces the zoom settings, e.g. after switching display preset.
    /// The current scale is clamped into the new range.
    pub fn set_zoom_settings(&mut self, zoom: ZoomSettings) {
        self.zoom = zoom;
        self.scale = zoom.clamp(self.scale);
    }

    pub fn set_pan(&mut self, pan: Point) {
        self.pan = pan;
    }

    /// Moves the canvas by a screen-space delta.
    pub fn pan_by(&mut self, delta: Point) {
        self.pan = self.pan + delta;
    }

    /// Feeds one pointer event through the drag state machine.
    ///
    /// Returns true if the pan offset changed.
    pub fn handle(&mut self, event: PointerEvent) -> bool {
        match (self.drag, event) {
            (_, PointerEvent::Down(pointer)) => {
                self.drag = DragState::Dragging {
                    start: pointer - self.pan,
                };
                trace!(?pointer, "drag started");
                false
            }
            (DragState::Dragging { start }, PointerEvent::Move(pointer)) => {
                let pan = pointer - start;
                let changed = pan != self.pan;
                self.pan = pan;
                changed
            }
            (DragState::Idle, PointerEvent::Move(_)) => false,
            (_, PointerEvent::Up | PointerEvent::Leave) => {
                if self.is_dragging() {
                    trace!(pan = ?self.pan, "drag ended");
                }
                self.drag = DragState::Idle;
                false
            }
        }
    }

    /// Normalizes and handles raw input in one step.
    pub fn handle_raw(&mut self, raw: &RawPointer) -> bool {
        raw.normalize().is_some_and(|event| self.handle(event))
    }

    pub fn zoom_in(&mut self) -> f64 {
        self.set_scale(self.scale + self.zoom.step)
    }

    pub fn zoom_out(&mut self) -> f64 {
        self.set_scale(self.scale - self.zoom.step)
    }

    /// Restores the default scale and re-centers the canvas horizontally on
    /// the container, near its top.
    pub fn reset(&mut self, container_width: f64) {
        self.scale = self.zoom.clamp(self.zoom.default_scale);
        self.pan = Point::new(container_width / 2.0, self.zoom.reset_top);
        self.drag = DragState::Idle;
    }

    /// Maps a world (layout) point to the screen.
    pub fn to_screen(&self, world: Point) -> Point {
        Point::new(
            self.pan.x + world.x * self.scale,
            self.pan.y + world.y * self.scale,
        )
    }

    /// Maps a screen point back to world (layout) space.
    pub fn to_world(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.pan.x) / self.scale,
            (screen.y - self.pan.y) / self.scale,
        )
    }

    /// Screen length of a world length.
    pub fn scale_length(&self, world: f64) -> f64 {
        world * self.scale
    }

    /// Member whose node box contains the screen point.
    ///
    /// Overlapping boxes resolve to the one drawn last.
    pub fn hit_test<'a>(
        &self,
        positions: &'a NodePositions,
        metrics: &LayoutMetrics,
        screen: Point,
    ) -> Option<&'a MemberId> {
        let world = self.to_world(screen);
        let half_width = metrics.node_width / 2.0;
        positions
            .iter()
            .filter(|(_, p)| {
                world.x >= p.x - half_width
                    && world.x <= p.x + half_width
                    && world.y >= p.y
                    && world.y <= p.y + metrics.node_height
            })
            .last()
            .map(|(id, _)| id)
    }

    /// Sets the scale, clamped and rounded to hundredths so repeated steps
    /// do not drift. Returns the new scale.
    fn set_scale(&mut self, scale: f64) -> f64 {
        let rounded = (scale * 100.0).round() / 100.0;
        self.scale = self.zoom.clamp(rounded);
        self.scale
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(ZoomSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_tracks_pointer_one_to_one() {
        let mut viewport = Viewport::default();
        viewport.set_pan(Point::new(50.0, 50.0));

        viewport.handle(PointerEvent::Down(Point::new(100.0, 100.0)));
        assert!(viewport.is_dragging());
        assert!(viewport.handle(PointerEvent::Move(Point::new(130.0, 120.0))));
        assert_eq!(viewport.pan(), Point::new(80.0, 70.0));

        viewport.handle(PointerEvent::Up);
        assert!(!viewport.handle(PointerEvent::Move(Point::new(500.0, 500.0))));
        assert_eq!(viewport.pan(), Point::new(80.0, 70.0));
    }

    #[test]
    fn test_leave_ends_drag() {
        let mut viewport = Viewport::default();
        viewport.handle(PointerEvent::Down(Point::new(10.0, 10.0)));
        viewport.handle(PointerEvent::Leave);
        assert_eq!(viewport.drag_state(), DragState::Idle);
    }

    #[test]
    fn test_touch_and_mouse_share_state_machine() {
        let mut mouse = Viewport::default();
        let mut touch = Viewport::default();

        mouse.handle_raw(&RawPointer::MouseDown(Point::new(10.0, 10.0)));
        mouse.handle_raw(&RawPointer::MouseMove(Point::new(40.0, 25.0)));
        touch.handle_raw(&RawPointer::TouchStart(vec![
            Point::new(10.0, 10.0),
            Point::new(300.0, 300.0),
        ]));
        touch.handle_raw(&RawPointer::TouchMove(vec![Point::new(40.0, 25.0)]));

        assert_eq!(mouse.pan(), touch.pan());
        assert_eq!(RawPointer::TouchEnd.source(), PointerSource::Touch);
        assert_eq!(RawPointer::TouchMove(vec![]).normalize(), None);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut viewport = Viewport::default();
        assert_eq!(viewport.zoom_in(), 1.1);
        for _ in 0..20 {
            viewport.zoom_in();
        }
        assert_eq!(viewport.scale(), DEFAULT_DESKTOP_MAX_SCALE);
        for _ in 0..30 {
            viewport.zoom_out();
        }
        assert_eq!(viewport.scale(), DEFAULT_DESKTOP_MIN_SCALE);
    }

    #[test]
    fn test_touch_zoom_range_differs() {
        let mut viewport = Viewport::new(ZoomSettings::for_preset(DisplayPreset::Touch));
        assert_eq!(viewport.scale(), DEFAULT_TOUCH_SCALE);
        for _ in 0..30 {
            viewport.zoom_out();
        }
        assert_eq!(viewport.scale(), DEFAULT_TOUCH_MIN_SCALE);
    }

    #[test]
    fn test_reset_centers_horizontally() {
        let mut viewport = Viewport::default();
        viewport.zoom_in();
        viewport.set_pan(Point::new(-40.0, 900.0));
        viewport.reset(800.0);
        assert_eq!(viewport.pan(), Point::new(400.0, DEFAULT_DESKTOP_RESET_TOP));
        assert_eq!(viewport.scale(), DEFAULT_DESKTOP_SCALE);
    }

    #[test]
    fn test_screen_world_round_trip() {
        let mut viewport = Viewport::default();
        viewport.set_pan(Point::new(400.0, 100.0));
        for _ in 0..5 {
            viewport.zoom_out();
        }
        assert_eq!(viewport.scale(), 0.5);
        let world = Point::new(-200.0, 150.0);
        let screen = viewport.to_screen(world);
        assert_eq!(screen, Point::new(300.0, 175.0));
        assert_eq!(viewport.to_world(screen), world);
    }
}
