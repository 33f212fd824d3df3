use egui::{Pos2, Vec2};
use log::debug;

use super::{PageNavigation, TouchPhase, TouchPoint};

/// Thresholds for gesture recognition.
#[derive(Debug, Clone)]
pub struct GestureConfig {
    /// Minimum horizontal displacement for a page-flip swipe.
    pub swipe_min_horizontal: f32,
    /// Vertical displacement must stay below this fraction of the
    /// horizontal for a swipe to count.
    pub swipe_max_vertical_ratio: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            swipe_min_horizontal: 120.0,
            swipe_max_vertical_ratio: 0.5,
        }
    }
}

/// Per-event context the interpreter cannot know on its own.
#[derive(Debug, Clone, Copy)]
pub struct GestureContext {
    /// Two-finger pan/zoom/rotate runs only under the select tool.
    pub two_finger_enabled: bool,
    /// Swipe navigation requires rest zoom and an empty selection.
    pub swipe_enabled: bool,
}

/// What the interpreter decided about an input batch.
#[derive(Debug, Clone, PartialEq)]
pub enum GestureEvent {
    /// Route to the active tool as a pointer press (screen space).
    ToolPointerDown(Pos2),
    ToolPointerMove(Pos2),
    ToolPointerUp(Pos2),
    /// A two-finger gesture started mid-drag; the tool must abandon
    /// its in-progress action without committing it.
    CancelActiveDrag,
    /// Single-touch swipe recognized as a page flip.
    Navigate(PageNavigation),
}

/// Accumulated viewport change, drained once per animation frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportUpdate {
    /// Multiplicative zoom factor.
    pub scale: f32,
    /// Rotation delta in degrees.
    pub rotation: f32,
    /// Pan delta in screen pixels.
    pub pan: Vec2,
}

#[derive(Debug, Clone, Copy)]
struct PinchState {
    last_distance: f32,
    last_angle: f32,
    last_midpoint: Pos2,
}

#[derive(Debug, Clone, Copy)]
struct SingleTouch {
    id: u64,
    start: Pos2,
}

/// Classifies pointer/touch input into tool actions, two-finger
/// pan/zoom/rotate, and swipe navigation.
///
/// Viewport deltas are accumulated and handed out through
/// [`GestureInterpreter::take_viewport_update`], which the frame loop
/// calls once per frame, so several touch-move events within one
/// frame collapse into a single viewport mutation.
#[derive(Debug)]
pub struct GestureInterpreter {
    config: GestureConfig,
    pinch: Option<PinchState>,
    single: Option<SingleTouch>,
    pending_scale: f32,
    pending_rotation: f32,
    pending_pan: Vec2,
    dirty: bool,
}

impl Default for GestureInterpreter {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}

impl GestureInterpreter {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            pinch: None,
            single: None,
            pending_scale: 1.0,
            pending_rotation: 0.0,
            pending_pan: Vec2::ZERO,
            dirty: false,
        }
    }

    /// Feed one batch of touch points (all live contacts, with their
    /// phase for this event). Returns the resulting gesture events in
    /// order.
    pub fn handle_touches(&mut self, touches: &[TouchPoint], ctx: GestureContext) -> Vec<GestureEvent> {
        let live: Vec<&TouchPoint> = touches
            .iter()
            .filter(|t| !matches!(t.phase, TouchPhase::Ended | TouchPhase::Cancelled))
            .collect();

        // Multi-touch state must reset the moment fewer than two
        // contacts remain, so a stale pinch never leaks into the next
        // single-touch gesture.
        if live.len() < 2 {
            self.pinch = None;
        }

        if live.len() >= 2 && ctx.two_finger_enabled {
            return self.handle_two_finger(live[0], live[1]);
        }

        let mut events = Vec::new();
        for touch in touches {
            events.extend(self.handle_single(*touch, ctx));
        }
        events
    }

    fn handle_two_finger(&mut self, a: &TouchPoint, b: &TouchPoint) -> Vec<GestureEvent> {
        let distance = (b.pos - a.pos).length();
        let angle = (b.pos - a.pos).angle().to_degrees();
        let midpoint = a.pos + (b.pos - a.pos) / 2.0;

        let mut events = Vec::new();
        match self.pinch {
            None => {
                // Two fingers landed: abandon any single-pointer drag
                // before it commits a half-finished action.
                if self.single.take().is_some() {
                    events.push(GestureEvent::CancelActiveDrag);
                }
                self.pinch = Some(PinchState {
                    last_distance: distance,
                    last_angle: angle,
                    last_midpoint: midpoint,
                });
                debug!("gesture: two-finger start (distance {distance:.1})");
            }
            Some(state) => {
                if state.last_distance > 0.0 {
                    self.pending_scale *= distance / state.last_distance;
                }
                self.pending_rotation += angle - state.last_angle;
                self.pending_pan += midpoint - state.last_midpoint;
                self.dirty = true;
                self.pinch = Some(PinchState {
                    last_distance: distance,
                    last_angle: angle,
                    last_midpoint: midpoint,
                });
            }
        }
        events
    }

    fn handle_single(&mut self, touch: TouchPoint, ctx: GestureContext) -> Vec<GestureEvent> {
        match touch.phase {
            TouchPhase::Started => {
                // A second finger under a non-select tool is ignored
                // rather than starting a parallel tool action.
                if self.single.is_some() {
                    return Vec::new();
                }
                self.single = Some(SingleTouch {
                    id: touch.id,
                    start: touch.pos,
                });
                vec![GestureEvent::ToolPointerDown(touch.pos)]
            }
            TouchPhase::Moved => {
                if self.single.is_some_and(|s| s.id == touch.id) {
                    vec![GestureEvent::ToolPointerMove(touch.pos)]
                } else {
                    Vec::new()
                }
            }
            TouchPhase::Ended => {
                let Some(single) = self.single.take_if(|s| s.id == touch.id) else {
                    return Vec::new();
                };
                if ctx.swipe_enabled {
                    if let Some(direction) = self.swipe_direction(single.start, touch.pos) {
                        // A page flip, not a failed drag: drop the
                        // in-progress tool action instead of
                        // finalizing it.
                        return vec![
                            GestureEvent::CancelActiveDrag,
                            GestureEvent::Navigate(direction),
                        ];
                    }
                }
                vec![GestureEvent::ToolPointerUp(touch.pos)]
            }
            TouchPhase::Cancelled => {
                if self.single.take_if(|s| s.id == touch.id).is_some() {
                    vec![GestureEvent::CancelActiveDrag]
                } else {
                    Vec::new()
                }
            }
        }
    }

    fn swipe_direction(&self, start: Pos2, end: Pos2) -> Option<PageNavigation> {
        let dx = end.x - start.x;
        let dy = end.y - start.y;
        if dx.abs() > self.config.swipe_min_horizontal
            && dy.abs() < dx.abs() * self.config.swipe_max_vertical_ratio
        {
            if dx < 0.0 {
                Some(PageNavigation::Next)
            } else {
                Some(PageNavigation::Previous)
            }
        } else {
            None
        }
    }

    /// Drain the viewport delta accumulated since the last frame.
    /// Returns `None` when nothing changed.
    pub fn take_viewport_update(&mut self) -> Option<ViewportUpdate> {
        if !self.dirty {
            return None;
        }
        let update = ViewportUpdate {
            scale: self.pending_scale,
            rotation: self.pending_rotation,
            pan: self.pending_pan,
        };
        self.pending_scale = 1.0;
        self.pending_rotation = 0.0;
        self.pending_pan = Vec2::ZERO;
        self.dirty = false;
        Some(update)
    }

    /// True while a two-finger gesture owns the input stream.
    pub fn is_zooming(&self) -> bool {
        self.pinch.is_some()
    }
}
