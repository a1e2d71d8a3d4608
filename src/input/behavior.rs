use crate::core::geo::Point;
use crate::core::transform::ViewTransform;
use crate::input::events::{InputEvent, Trigger, Triggers, ZoomEvent, ZoomPhase};

/// Pan bounds that never clamp
pub const UNBOUNDED_TRANSLATE_EXTENT: (Point, Point) = (
    Point {
        x: f64::NEG_INFINITY,
        y: f64::NEG_INFINITY,
    },
    Point {
        x: f64::INFINITY,
        y: f64::INFINITY,
    },
);

/// Gesture-driven zoom-and-pan behavior over a [`ViewTransform`]
///
/// The d3-zoom analogue: it owns the current transform, clamps scale and
/// translation to the configured extents, filters events by trigger class
/// and dispatches start/zoom/end sequences. Events are returned to the
/// caller rather than pushed through stored callbacks, the same shape as
/// a recognizer that processes input and returns what it produced.
#[derive(Debug, Clone)]
pub struct ZoomBehavior {
    transform: ViewTransform,
    scale_extent: (f64, f64),
    translate_extent: (Point, Point),
    triggers: Triggers,
    gesture_active: bool,
}

impl ZoomBehavior {
    pub fn new(scale_extent: (f64, f64)) -> Self {
        Self {
            transform: ViewTransform::identity(),
            scale_extent,
            translate_extent: UNBOUNDED_TRANSLATE_EXTENT,
            triggers: Triggers::all(),
            gesture_active: false,
        }
    }

    /// The behavior's current transform
    pub fn transform(&self) -> ViewTransform {
        self.transform
    }

    pub fn scale_extent(&self) -> (f64, f64) {
        self.scale_extent
    }

    pub fn set_scale_extent(&mut self, extent: (f64, f64)) {
        self.scale_extent = extent;
    }

    pub fn translate_extent(&self) -> (Point, Point) {
        self.translate_extent
    }

    pub fn set_translate_extent(&mut self, extent: (Point, Point)) {
        self.translate_extent = extent;
    }

    pub fn set_trigger(&mut self, trigger: Trigger, enabled: bool) {
        self.triggers.set(trigger, enabled);
    }

    pub fn trigger_enabled(&self, trigger: Trigger) -> bool {
        self.triggers.enabled(trigger)
    }

    /// Whether a press/touch gesture session is currently open
    pub fn gesture_active(&self) -> bool {
        self.gesture_active
    }

    /// Sets the transform without dispatching any events
    ///
    /// Used for the one-time initial fit at mount; everything else goes
    /// through the dispatching paths.
    pub fn jump_to(&mut self, transform: ViewTransform) {
        self.transform = self.constrain(transform);
    }

    /// Programmatic settled move: dispatches a full start/zoom/end sequence
    pub fn set_transform(
        &mut self,
        transform: ViewTransform,
        source: Option<InputEvent>,
    ) -> Vec<ZoomEvent> {
        let mut events = vec![self.event(ZoomPhase::Start, source.clone())];
        self.transform = self.constrain(transform);
        events.push(self.event(ZoomPhase::Zoom, source.clone()));
        events.push(self.event(ZoomPhase::End, source));
        events
    }

    /// Opens a programmatic sequence owned by a transition
    pub fn begin_programmatic(&mut self) -> ZoomEvent {
        self.event(ZoomPhase::Start, None)
    }

    /// Applies one interpolated step of a transition
    pub fn apply_programmatic(&mut self, transform: ViewTransform) -> ZoomEvent {
        self.transform = self.constrain(transform);
        self.event(ZoomPhase::Zoom, None)
    }

    /// Closes a programmatic sequence at the current transform
    pub fn end_programmatic(&mut self) -> ZoomEvent {
        self.event(ZoomPhase::End, None)
    }

    /// Processes a recognized gesture event and returns the dispatched
    /// zoom events
    ///
    /// Events whose trigger class is disabled are swallowed: no dispatch,
    /// no state change. Wheel and double-click are discrete gestures and
    /// settle within a single call; drags and touches are sessions opened
    /// by their start event and closed by their end event.
    pub fn handle_event(&mut self, event: InputEvent) -> Vec<ZoomEvent> {
        if !self.triggers.enabled(event.trigger()) {
            log::trace!("swallowed {:?}: trigger disabled", event.trigger());
            return Vec::new();
        }

        let mut events = Vec::new();
        match event {
            InputEvent::DragStart { .. } | InputEvent::TouchStart { .. } => {
                self.gesture_active = true;
                events.push(self.event(ZoomPhase::Start, Some(event)));
            }
            InputEvent::Drag { delta } => {
                self.ensure_gesture_started(&event, &mut events);
                let moved = ViewTransform::new(
                    self.transform.x + delta.x,
                    self.transform.y + delta.y,
                    self.transform.k,
                );
                self.transform = self.constrain(moved);
                events.push(self.event(ZoomPhase::Zoom, Some(event)));
            }
            InputEvent::TouchMove {
                delta,
                scale,
                center,
            } => {
                self.ensure_gesture_started(&event, &mut events);
                let rescaled = self.rescale_about(&center, scale);
                let moved =
                    ViewTransform::new(rescaled.x + delta.x, rescaled.y + delta.y, rescaled.k);
                self.transform = self.constrain(moved);
                events.push(self.event(ZoomPhase::Zoom, Some(event)));
            }
            InputEvent::DragEnd | InputEvent::TouchEnd => {
                if self.gesture_active {
                    self.gesture_active = false;
                    events.push(self.event(ZoomPhase::End, Some(event)));
                }
            }
            InputEvent::Wheel { delta, position } => {
                let rescaled = self.rescale_about(&position, 2_f64.powf(delta));
                events.push(self.event(ZoomPhase::Start, Some(event.clone())));
                self.transform = self.constrain(rescaled);
                events.push(self.event(ZoomPhase::Zoom, Some(event.clone())));
                events.push(self.event(ZoomPhase::End, Some(event)));
            }
            InputEvent::DoubleClick { position } => {
                let rescaled = self.rescale_about(&position, 2.0);
                events.push(self.event(ZoomPhase::Start, Some(event.clone())));
                self.transform = self.constrain(rescaled);
                events.push(self.event(ZoomPhase::Zoom, Some(event.clone())));
                events.push(self.event(ZoomPhase::End, Some(event)));
            }
        }

        events
    }

    fn ensure_gesture_started(&mut self, event: &InputEvent, events: &mut Vec<ZoomEvent>) {
        if !self.gesture_active {
            self.gesture_active = true;
            events.push(self.event(ZoomPhase::Start, Some(event.clone())));
        }
    }

    /// Rescales about an anchor point, keeping the world point under the
    /// anchor stationary
    fn rescale_about(&self, anchor: &Point, factor: f64) -> ViewTransform {
        let k = self.clamp_scale(self.transform.k * factor);
        let world = self.transform.invert_point(anchor);
        ViewTransform::new(anchor.x - world.x * k, anchor.y - world.y * k, k)
    }

    fn clamp_scale(&self, k: f64) -> f64 {
        k.clamp(self.scale_extent.0, self.scale_extent.1)
    }

    fn constrain(&self, transform: ViewTransform) -> ViewTransform {
        let (min, max) = self.translate_extent;
        ViewTransform::new(
            transform.x.clamp(min.x, max.x),
            transform.y.clamp(min.y, max.y),
            self.clamp_scale(transform.k),
        )
    }

    fn event(&self, phase: ZoomPhase, source: Option<InputEvent>) -> ZoomEvent {
        ZoomEvent {
            phase,
            transform: self.transform,
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn phases(events: &[ZoomEvent]) -> Vec<ZoomPhase> {
        events.iter().map(|e| e.phase).collect()
    }

    #[test]
    fn test_drag_translates() {
        let mut behavior = ZoomBehavior::new((1.0, 8.0));

        behavior.handle_event(InputEvent::DragStart {
            position: Point::new(10.0, 10.0),
        });
        let events = behavior.handle_event(InputEvent::Drag {
            delta: Point::new(5.0, -3.0),
        });

        assert_eq!(phases(&events), vec![ZoomPhase::Zoom]);
        assert_eq!(behavior.transform(), ViewTransform::new(5.0, -3.0, 1.0));

        let events = behavior.handle_event(InputEvent::DragEnd);
        assert_eq!(phases(&events), vec![ZoomPhase::End]);
        assert!(!behavior.gesture_active());
    }

    #[test]
    fn test_wheel_is_discrete_sequence() {
        let mut behavior = ZoomBehavior::new((1.0, 8.0));
        let events = behavior.handle_event(InputEvent::Wheel {
            delta: 1.0,
            position: Point::new(0.0, 0.0),
        });

        assert_eq!(
            phases(&events),
            vec![ZoomPhase::Start, ZoomPhase::Zoom, ZoomPhase::End]
        );
        assert_eq!(behavior.transform().k, 2.0);
    }

    #[test]
    fn test_scale_extent_clamps_gesture() {
        let mut behavior = ZoomBehavior::new((1.0, 8.0));

        // A wheel step asking for k = 12 settles at the configured max.
        behavior.jump_to(ViewTransform::new(0.0, 0.0, 6.0));
        behavior.handle_event(InputEvent::Wheel {
            delta: 1.0,
            position: Point::new(100.0, 100.0),
        });
        assert_eq!(behavior.transform().k, 8.0);

        // And zooming far out settles at the min.
        behavior.handle_event(InputEvent::Wheel {
            delta: -10.0,
            position: Point::new(100.0, 100.0),
        });
        assert_eq!(behavior.transform().k, 1.0);
    }

    #[test]
    fn test_anchor_point_stays_fixed() {
        let mut behavior = ZoomBehavior::new((1.0, 8.0));
        let anchor = Point::new(120.0, 80.0);
        let world_before = behavior.transform().invert_point(&anchor);

        behavior.handle_event(InputEvent::Wheel {
            delta: 1.0,
            position: anchor,
        });

        let world_after = behavior.transform().invert_point(&anchor);
        assert_relative_eq!(world_after.x, world_before.x, max_relative = 1e-12);
        assert_relative_eq!(world_after.y, world_before.y, max_relative = 1e-12);
    }

    #[test]
    fn test_disabled_trigger_swallows_event() {
        let mut behavior = ZoomBehavior::new((1.0, 8.0));
        behavior.set_trigger(Trigger::Wheel, false);

        let events = behavior.handle_event(InputEvent::Wheel {
            delta: 1.0,
            position: Point::new(0.0, 0.0),
        });

        assert!(events.is_empty());
        assert_eq!(behavior.transform(), ViewTransform::identity());
    }

    #[test]
    fn test_touch_pinch_combined() {
        let mut behavior = ZoomBehavior::new((1.0, 8.0));

        behavior.handle_event(InputEvent::TouchStart {
            position: Point::new(100.0, 100.0),
        });
        let events = behavior.handle_event(InputEvent::TouchMove {
            delta: Point::new(10.0, 0.0),
            scale: 2.0,
            center: Point::new(100.0, 100.0),
        });

        assert_eq!(phases(&events), vec![ZoomPhase::Zoom]);
        let t = behavior.transform();
        assert_eq!(t.k, 2.0);
        // rescale about (100,100) then pan by (10,0)
        assert_relative_eq!(t.x, -100.0 + 10.0, max_relative = 1e-12);
        assert_relative_eq!(t.y, -100.0, max_relative = 1e-12);
    }

    #[test]
    fn test_set_transform_settled_sequence() {
        let mut behavior = ZoomBehavior::new((1.0, 8.0));
        let events = behavior.set_transform(ViewTransform::new(-140.0, -240.0, 2.7), None);

        assert_eq!(
            phases(&events),
            vec![ZoomPhase::Start, ZoomPhase::Zoom, ZoomPhase::End]
        );
        assert!(events.iter().all(|e| e.source.is_none()));
        assert_eq!(events[2].transform, ViewTransform::new(-140.0, -240.0, 2.7));
    }

    #[test]
    fn test_jump_to_is_silent_but_constrained() {
        let mut behavior = ZoomBehavior::new((1.0, 8.0));
        behavior.jump_to(ViewTransform::new(50.0, 60.0, 20.0));

        assert_eq!(behavior.transform(), ViewTransform::new(50.0, 60.0, 8.0));
    }

    #[test]
    fn test_translate_extent_clamps_pan() {
        let mut behavior = ZoomBehavior::new((1.0, 8.0));
        behavior.set_translate_extent((Point::new(-10.0, -10.0), Point::new(10.0, 10.0)));

        behavior.handle_event(InputEvent::DragStart {
            position: Point::new(0.0, 0.0),
        });
        behavior.handle_event(InputEvent::Drag {
            delta: Point::new(100.0, -100.0),
        });

        assert_eq!(behavior.transform(), ViewTransform::new(10.0, -10.0, 1.0));
    }
}
