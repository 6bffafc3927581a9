//! Geteilte Konfiguration und Konstanten.
//!
//! Enthält Typen, die zwischen `core`, `render` und `app` geteilt werden,
//! um direkte Abhängigkeiten zu vermeiden.

pub mod options;

pub use options::{MinimapColors, MinimapConfiguration};
pub use options::{MAP_SCALE_DEFAULT, MAP_SCALE_MAX, MAP_SCALE_MIN, MAP_SCALE_ZOOM_FACTOR};
