pub mod behavior;
pub mod events;

// Re-export the essential types
pub use behavior::{ZoomBehavior, UNBOUNDED_TRANSLATE_EXTENT};
pub use events::{InputEvent, Trigger, Triggers, ZoomEvent, ZoomPhase};
