pub mod easing;
pub mod transition;

// Re-export commonly used types for convenience
pub use easing::EasingFunction;
pub use transition::{Transition, TransitionState};
