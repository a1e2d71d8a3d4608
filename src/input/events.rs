use crate::core::geo::Point;
use crate::core::transform::ViewTransform;
use serde::{Deserialize, Serialize};

/// Recognized gesture events consumed by the zoom behavior
///
/// Raw pointer streams are translated into these by the host's gesture
/// recognition engine; this crate only interprets the recognized deltas.
/// Wheel and touch `delta` values are expressed in zoom levels: a delta of
/// `d` multiplies the scale by `2^d`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Start of a primary-button press-drag
    DragStart { position: Point },
    /// Drag in progress, pixel delta since the last event
    Drag { delta: Point },
    /// End of a drag operation
    DragEnd,
    /// Scroll wheel step, anchored at the cursor position
    Wheel { delta: f64, position: Point },
    /// Double click/tap
    DoubleClick { position: Point },
    /// First touch contact of a touch gesture
    TouchStart { position: Point },
    /// Combined touch pan/pinch update: pan delta plus a scale factor
    /// applied about `center`
    TouchMove {
        delta: Point,
        scale: f64,
        center: Point,
    },
    /// All touch contacts lifted
    TouchEnd,
}

impl InputEvent {
    /// Gets the primary position associated with this event, if any
    pub fn position(&self) -> Option<Point> {
        match self {
            InputEvent::DragStart { position } => Some(*position),
            InputEvent::Wheel { position, .. } => Some(*position),
            InputEvent::DoubleClick { position } => Some(*position),
            InputEvent::TouchStart { position } => Some(*position),
            InputEvent::TouchMove { center, .. } => Some(*center),
            _ => None,
        }
    }

    /// The trigger class this event activates through
    pub fn trigger(&self) -> Trigger {
        match self {
            InputEvent::DragStart { .. } | InputEvent::Drag { .. } | InputEvent::DragEnd => {
                Trigger::Drag
            }
            InputEvent::Wheel { .. } => Trigger::Wheel,
            InputEvent::DoubleClick { .. } => Trigger::DoubleClick,
            InputEvent::TouchStart { .. }
            | InputEvent::TouchMove { .. }
            | InputEvent::TouchEnd => Trigger::Touch,
        }
    }
}

/// The gesture classes a zoom behavior can be activated through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trigger {
    Drag,
    Wheel,
    DoubleClick,
    Touch,
}

/// Enabled/disabled state per trigger class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Triggers {
    pub drag: bool,
    pub wheel: bool,
    pub double_click: bool,
    pub touch: bool,
}

impl Triggers {
    /// All trigger classes enabled
    pub fn all() -> Self {
        Self {
            drag: true,
            wheel: true,
            double_click: true,
            touch: true,
        }
    }

    pub fn enabled(&self, trigger: Trigger) -> bool {
        match trigger {
            Trigger::Drag => self.drag,
            Trigger::Wheel => self.wheel,
            Trigger::DoubleClick => self.double_click,
            Trigger::Touch => self.touch,
        }
    }

    pub fn set(&mut self, trigger: Trigger, enabled: bool) {
        match trigger {
            Trigger::Drag => self.drag = enabled,
            Trigger::Wheel => self.wheel = enabled,
            Trigger::DoubleClick => self.double_click = enabled,
            Trigger::Touch => self.touch = enabled,
        }
    }
}

impl Default for Triggers {
    fn default() -> Self {
        Self::all()
    }
}

/// Lifecycle phase of a zoom event sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoomPhase {
    Start,
    Zoom,
    End,
}

/// An event dispatched by the zoom behavior
///
/// `source` carries the input event that produced the change, or `None`
/// when the transform was set programmatically (animated transitions and
/// direct transform calls).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoomEvent {
    pub phase: ZoomPhase,
    pub transform: ViewTransform,
    pub source: Option<InputEvent>,
}
