//! Marker-Footprints für Objekt- und Avatar-Punkte.
//!
//! Die Form zeigt an, ob ein Objekt auf Höhe der Kamera liegt
//! oder deutlich darüber bzw. darunter.

use image::Rgba;

use crate::buffer::PixelBuffer;

/// Footprint eines Markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerShape {
    /// Gefülltes Quadrat
    Square,
    /// Plus-Zeichen (mittlere Zeile + mittlere Spalte)
    Cross,
    /// "T": obere Zeile + mittlere Spalte (Objekt über der Kamera)
    Tee,
    /// Umgedrehtes "T": untere Zeile + mittlere Spalte (Objekt unter der Kamera)
    InvertedTee,
}

/// Zeichnet einen Marker mit Durchmesser `diameter` um Texel `(x, y)`.
///
/// Der Footprint überdeckt `[x - d/2, x - d/2 + d)` in beiden Achsen.
/// Pixel außerhalb des Puffers werden verworfen, auch bei Texel-Indizes
/// nahe `i32::MIN`/`i32::MAX`. Gibt zurück, ob der Footprint den Puffer
/// überhaupt berührt.
pub fn draw_marker(
    buffer: &mut PixelBuffer,
    x: i32,
    y: i32,
    diameter: i32,
    shape: MarkerShape,
    color: Rgba<u8>,
) -> bool {
    if diameter <= 0 {
        return false;
    }
    let neg_radius = diameter / 2;
    let pos_radius = diameter - neg_radius;
    let (left, right) = (x.saturating_sub(neg_radius), x.saturating_add(pos_radius));
    let (bottom, top) = (y.saturating_sub(neg_radius), y.saturating_add(pos_radius));

    if !buffer.intersects_rect(left, bottom, right, top) {
        return false;
    }

    match shape {
        MarkerShape::Square => buffer.fill_rect(left, bottom, right, top, color),
        MarkerShape::Cross => {
            buffer.hline(left, right, y, color);
            buffer.vline(x, bottom, top, color);
        }
        MarkerShape::Tee => {
            buffer.hline(left, right, top - 1, color);
            buffer.vline(x, bottom, top, color);
        }
        MarkerShape::InvertedTee => {
            buffer.hline(left, right, bottom, color);
            buffer.vline(x, bottom, top, color);
        }
    }
    true
}
