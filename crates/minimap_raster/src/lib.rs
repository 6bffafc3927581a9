//! `minimap_raster` — Off-Screen-Raster für Minimap-Overlays.
//!
//! Stellt quadratische RGBA-Puffer bereit, in die Objekt-Punkte und
//! Parzellen-Overlays gezeichnet werden:
//! - Pixel setzen und Alpha-Blending
//! - Rechtecke füllen, horizontale und vertikale Linien
//! - Marker-Footprints (Quadrat, Kreuz, T-Formen)
//! - Seitenlänge als Zweierpotenz aus der Viewport-Diagonale
//!
//! Schreibzugriffe außerhalb des Puffers werden stillschweigend verworfen.
//!
//! # Beispiel
//! ```
//! use minimap_raster::{draw_marker, MarkerShape, PixelBuffer, Rgba};
//!
//! let mut buffer = PixelBuffer::new(64);
//! draw_marker(&mut buffer, 32, 32, 3, MarkerShape::Square, Rgba([255, 0, 0, 255]));
//! assert_eq!(buffer.get_pixel(32, 32), Some(Rgba([255, 0, 0, 255])));
//! ```

pub mod buffer;
pub mod marker;
pub mod sizing;

pub use buffer::{blend_over, PixelBuffer, TRANSPARENT};
pub use image::{Rgba, RgbaImage};
pub use marker::{draw_marker, MarkerShape};
pub use sizing::{required_side, viewport_diagonal, MAX_BUFFER_SIDE, MIN_BUFFER_SIDE};
