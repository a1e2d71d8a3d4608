use crate::animation::easing::EasingFunction;
use crate::core::transform::ViewTransform;
use instant::Instant;

/// State of a transition
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransitionState {
    NotStarted,
    Running,
    Completed,
    Cancelled,
}

/// A timed, eased interpolation between two view transforms
///
/// Progress is driven by accumulated tick deltas from the host's frame
/// loop, which keeps it deterministic under test; the wall-clock start
/// timestamp is only recorded for diagnostics.
#[derive(Debug, Clone)]
pub struct Transition {
    from: ViewTransform,
    to: ViewTransform,
    duration_ms: f64,
    easing: EasingFunction,
    state: TransitionState,
    start_time: Option<Instant>,
    elapsed_ms: f64,
    current: ViewTransform,
}

impl Transition {
    pub fn new(from: ViewTransform, to: ViewTransform, duration_ms: f64) -> Self {
        Self {
            from,
            to,
            duration_ms,
            easing: EasingFunction::EaseInOutCubic,
            state: TransitionState::NotStarted,
            start_time: None,
            elapsed_ms: 0.0,
            current: from,
        }
    }

    /// Set the easing function
    pub fn with_easing(mut self, easing: EasingFunction) -> Self {
        self.easing = easing;
        self
    }

    pub fn target(&self) -> ViewTransform {
        self.to
    }

    pub fn current(&self) -> ViewTransform {
        self.current
    }

    pub fn state(&self) -> TransitionState {
        self.state
    }

    /// Wall-clock instant the transition started, if it has
    pub fn started_at(&self) -> Option<Instant> {
        self.start_time
    }

    /// Start the transition
    pub fn start(&mut self) {
        if self.state == TransitionState::NotStarted {
            self.start_time = Some(Instant::now());
            self.state = TransitionState::Running;
            self.elapsed_ms = 0.0;
        }
    }

    /// Cancel the transition where it is
    pub fn stop(&mut self) {
        self.state = TransitionState::Cancelled;
    }

    /// Advance by a tick delta and return the interpolated transform,
    /// or `None` once the transition is finished
    pub fn update(&mut self, delta_ms: f64) -> Option<ViewTransform> {
        match self.state {
            TransitionState::NotStarted => {
                self.start();
                self.step(delta_ms)
            }
            TransitionState::Running => self.step(delta_ms),
            _ => None,
        }
    }

    fn step(&mut self, delta_ms: f64) -> Option<ViewTransform> {
        self.elapsed_ms += delta_ms;
        let progress = self.progress();
        self.current = self.from.lerp_with_easing(&self.to, progress, self.easing);

        if progress >= 1.0 {
            self.state = TransitionState::Completed;
            self.current = self.to;
        }

        Some(self.current)
    }

    /// Get the current progress (0.0 to 1.0)
    pub fn progress(&self) -> f64 {
        if self.duration_ms == 0.0 {
            1.0
        } else {
            (self.elapsed_ms / self.duration_ms).clamp(0.0, 1.0)
        }
    }

    /// Check if the transition is finished
    pub fn is_finished(&self) -> bool {
        matches!(
            self.state,
            TransitionState::Completed | TransitionState::Cancelled
        )
    }
}
