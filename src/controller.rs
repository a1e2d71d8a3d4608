use crate::animation::transition::Transition;
use crate::core::config::{ZoomConfig, ZoomParams};
use crate::core::geo::{LonLat, Point};
use crate::core::transform::ViewTransform;
use crate::data::geojson::Geometry;
use crate::input::behavior::{ZoomBehavior, UNBOUNDED_TRANSLATE_EXTENT};
use crate::input::events::{InputEvent, Trigger, ZoomEvent, ZoomPhase};
use crate::projection::{path_bounds, Projection};
use crate::Result;
use serde::{Deserialize, Serialize};

/// Derived record handed to start/end listener hooks: the geographic
/// coordinate at the viewport center and the settled zoom level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoveEvent {
    pub coordinates: LonLat,
    pub zoom: f64,
}

/// The controller's current view position
///
/// Mirrors the behavior's transform after every dispatched zoom event.
/// `dragging` carries the input event that caused the latest move, `None`
/// when it came from a transition or another programmatic path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewPosition {
    pub x: f64,
    pub y: f64,
    pub k: f64,
    pub dragging: Option<InputEvent>,
}

impl ViewPosition {
    fn from_transform(transform: ViewTransform, dragging: Option<InputEvent>) -> Self {
        Self {
            x: transform.x,
            y: transform.y,
            k: transform.k,
            dragging,
        }
    }

    pub fn transform(&self) -> ViewTransform {
        ViewTransform::new(self.x, self.y, self.k)
    }
}

impl Default for ViewPosition {
    fn default() -> Self {
        Self::from_transform(ViewTransform::identity(), None)
    }
}

/// Style hints for the rendering surface
///
/// Stroke width scales inversely with zoom so line widths stay visually
/// constant across zoom levels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewStyle {
    pub stroke_width: f64,
}

/// Lifecycle hooks invoked around view movement
///
/// All methods have empty default bodies, so implementors override only
/// the hooks they care about. Hooks are fire-and-forget: the controller
/// does not catch panics from listener code.
pub trait MoveListener {
    fn on_move_start(&mut self, _event: &MoveEvent, _raw: &ZoomEvent) {}
    fn on_move(&mut self, _position: &ViewPosition, _raw: &ZoomEvent) {}
    fn on_move_end(&mut self, _event: &MoveEvent, _raw: &ZoomEvent) {}
}

/// Binds zoom-and-pan gestures on a geographic view to a projection and
/// animates "zoom to bounding box" moves
///
/// The controller owns a [`ZoomBehavior`] bound with the configured scale
/// extent, unbounded pan extent and the drag, wheel and double-click
/// triggers disabled, so the view moves only through touch gestures or the
/// programmatic paths. `bounds_from` is fitted once at construction
/// without animation; [`ZoomController::set_bounds_to`] and
/// [`ZoomController::configure`] retarget the animator, and the host's
/// frame loop advances in-flight transitions through
/// [`ZoomController::tick`].
pub struct ZoomController<P: Projection> {
    params: ZoomParams,
    bounds_to: Option<Geometry>,
    projection: P,
    behavior: ZoomBehavior,
    position: ViewPosition,
    settled: ViewTransform,
    transition: Option<Transition>,
    listener: Option<Box<dyn MoveListener + Send>>,
}

impl<P: Projection> ZoomController<P> {
    /// Creates a controller with no listener attached
    pub fn new(config: ZoomConfig, projection: P) -> Result<Self> {
        Self::build(config, projection, None)
    }

    /// Creates a controller with the listener injected before the mount
    /// steps run, so a `bounds_to` supplied at construction animates with
    /// hooks attached
    pub fn with_listener(
        config: ZoomConfig,
        projection: P,
        listener: Box<dyn MoveListener + Send>,
    ) -> Result<Self> {
        Self::build(config, projection, Some(listener))
    }

    fn build(
        config: ZoomConfig,
        projection: P,
        listener: Option<Box<dyn MoveListener + Send>>,
    ) -> Result<Self> {
        config.validate()?;

        let mut behavior = ZoomBehavior::new(config.scale_extent);
        behavior.set_translate_extent(UNBOUNDED_TRANSLATE_EXTENT);
        behavior.set_trigger(Trigger::Drag, false);
        behavior.set_trigger(Trigger::DoubleClick, false);
        behavior.set_trigger(Trigger::Wheel, false);

        let mut controller = Self {
            params: ZoomParams::from(&config),
            bounds_to: config.bounds_to,
            projection,
            behavior,
            position: ViewPosition::default(),
            settled: ViewTransform::identity(),
            transition: None,
            listener,
        };

        // The initial fit fires exactly once per mount and dispatches no
        // listener calls; later reconfiguration cannot reach this path.
        if let Some(bounds_from) = &config.bounds_from {
            let initial = controller.fit_transform(Some(bounds_from));
            controller.behavior.jump_to(initial);
            controller.position = ViewPosition::from_transform(controller.behavior.transform(), None);
            controller.settled = controller.behavior.transform();
        }

        if controller.bounds_to.is_some() {
            controller.retarget();
        }

        Ok(controller)
    }

    /// Computes the target transform for a geometry, or identity when no
    /// geometry is given
    pub fn fit_transform(&self, geometry: Option<&Geometry>) -> ViewTransform {
        match geometry {
            Some(geometry) => {
                let bounds = path_bounds(geometry, &self.projection);
                ViewTransform::fit(
                    &bounds,
                    self.params.width,
                    self.params.height,
                    self.params.bounds_margin,
                    self.params.scale_extent.1,
                )
            }
            None => ViewTransform::identity(),
        }
    }

    /// Retargets the animator at a new geometry
    ///
    /// Equal target and current transforms (all of x, y, k) skip the
    /// transition entirely; otherwise an in-flight transition ends where
    /// it is and a new one starts from the current transform.
    pub fn set_bounds_to(&mut self, geometry: Option<Geometry>) {
        self.bounds_to = geometry;
        self.retarget();
    }

    /// Applies new parameters and re-binds the behavior
    ///
    /// The explicit replacement for dependency-triggered re-binding:
    /// viewport size, margin, duration and scale extent all flow through
    /// here, and a present target is re-fitted under the new parameters.
    pub fn configure(&mut self, params: ZoomParams) -> Result<()> {
        params.validate()?;
        self.params = params;
        self.behavior.set_scale_extent(params.scale_extent);
        self.behavior.set_translate_extent(UNBOUNDED_TRANSLATE_EXTENT);
        if self.bounds_to.is_some() {
            self.retarget();
        }
        Ok(())
    }

    /// Replaces (or clears) the lifecycle listener
    pub fn set_listener(&mut self, listener: Option<Box<dyn MoveListener + Send>>) {
        self.listener = listener;
    }

    /// Forwards a recognized gesture event to the behavior
    pub fn handle_event(&mut self, event: InputEvent) {
        let events = self.behavior.handle_event(event);
        self.dispatch(events);
    }

    /// Advances an in-flight transition by `delta_ms` milliseconds
    ///
    /// Interpolated steps go through the behavior's programmatic path, so
    /// the listener sees the same move/end stream as for a user gesture.
    pub fn tick(&mut self, delta_ms: f64) {
        let mut events = Vec::new();
        let mut finished = false;

        if let Some(transition) = self.transition.as_mut() {
            if let Some(step) = transition.update(delta_ms) {
                events.push(self.behavior.apply_programmatic(step));
            }
            finished = transition.is_finished();
        }

        if finished {
            events.push(self.behavior.end_programmatic());
            self.transition = None;
            log::debug!("transition settled at {:?}", self.behavior.transform());
        }

        self.dispatch(events);
    }

    /// The current view position, including the source of the last move
    pub fn position(&self) -> &ViewPosition {
        &self.position
    }

    /// The behavior's current transform
    pub fn transform(&self) -> ViewTransform {
        self.behavior.transform()
    }

    /// The transform at the end of the most recent settled sequence
    pub fn settled_transform(&self) -> ViewTransform {
        self.settled
    }

    /// CSS/SVG-style transform string for the rendering surface
    pub fn transform_string(&self) -> String {
        self.position.transform().transform_string()
    }

    /// Style hints scaled to the current zoom
    pub fn view_style(&self) -> ViewStyle {
        ViewStyle {
            stroke_width: 1.0 / self.position.k,
        }
    }

    /// Whether a transition is currently in flight
    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    /// Direct access to the underlying behavior (trigger toggling,
    /// extents)
    pub fn behavior_mut(&mut self) -> &mut ZoomBehavior {
        &mut self.behavior
    }

    fn retarget(&mut self) {
        let target = self.fit_transform(self.bounds_to.as_ref());
        let current = self.behavior.transform();

        // Only zoom-pan if we're actually going somewhere.
        if target == current {
            log::debug!("retarget to current transform, skipping");
            return;
        }

        let mut events = Vec::new();
        if let Some(transition) = self.transition.as_mut() {
            if !transition.is_finished() {
                transition.stop();
                events.push(self.behavior.end_programmatic());
            }
        }

        log::debug!("transition {:?} -> {:?}", current, target);
        self.transition = Some(Transition::new(current, target, self.params.duration_ms));
        events.push(self.behavior.begin_programmatic());
        self.dispatch(events);
    }

    fn derive_move_event(&self, transform: &ViewTransform) -> MoveEvent {
        let center = Point::new(self.params.width / 2.0, self.params.height / 2.0);
        let world = transform.invert_point(&center);
        MoveEvent {
            coordinates: self.projection.invert(&world),
            zoom: transform.k,
        }
    }

    fn dispatch(&mut self, events: Vec<ZoomEvent>) {
        for event in events {
            match event.phase {
                ZoomPhase::Start => {
                    let derived = self.derive_move_event(&event.transform);
                    if let Some(listener) = self.listener.as_mut() {
                        listener.on_move_start(&derived, &event);
                    }
                }
                ZoomPhase::Zoom => {
                    self.position =
                        ViewPosition::from_transform(event.transform, event.source.clone());
                    let position = self.position.clone();
                    if let Some(listener) = self.listener.as_mut() {
                        listener.on_move(&position, &event);
                    }
                }
                ZoomPhase::End => {
                    self.settled = event.transform;
                    let derived = self.derive_move_event(&event.transform);
                    if let Some(listener) = self.listener.as_mut() {
                        listener.on_move_end(&derived, &event);
                    }
                }
            }
        }
    }
}
