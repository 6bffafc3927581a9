//! Application-Layer: Compositor, Eingabe-Zustandsmaschine und Intents.

pub mod compositor;
mod input;
pub mod intent;

pub use compositor::{FrameStats, MapHit, MinimapCompositor};
pub use intent::MinimapIntent;
