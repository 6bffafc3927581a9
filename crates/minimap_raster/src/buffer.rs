//! Quadratischer RGBA-Puffer mit geclippten Schreiboperationen.

use image::{Rgba, RgbaImage};

/// Vollständig transparenter Pixel.
pub const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Quadratischer RGBA-Rasterpuffer.
///
/// Texel-Zeile 0 liegt am Süd-Rand, y wächst nach Norden (wie die
/// Welt-Achsen der Minimap). Für den Export als Bild liefert
/// [`PixelBuffer::to_image_top_down`] eine vertikal gespiegelte Kopie.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    image: RgbaImage,
}

impl PixelBuffer {
    /// Erstellt einen transparenten Puffer mit Seitenlänge `side`.
    pub fn new(side: u32) -> Self {
        Self {
            image: RgbaImage::from_pixel(side, side, TRANSPARENT),
        }
    }

    /// Seitenlänge in Pixeln.
    pub fn side(&self) -> u32 {
        self.image.width()
    }

    /// Setzt alle Pixel auf transparent.
    pub fn clear(&mut self) {
        self.fill(TRANSPARENT);
    }

    /// Füllt den gesamten Puffer mit einer Farbe.
    pub fn fill(&mut self, color: Rgba<u8>) {
        for pixel in self.image.pixels_mut() {
            *pixel = color;
        }
    }

    /// Prüft, ob eine Texel-Koordinate im Puffer liegt.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        let side = self.side() as i32;
        x >= 0 && y >= 0 && x < side && y < side
    }

    /// Liest einen Pixel (None außerhalb des Puffers).
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<Rgba<u8>> {
        if self.contains(x, y) {
            Some(*self.image.get_pixel(x as u32, y as u32))
        } else {
            None
        }
    }

    /// Schreibt einen Pixel. Gibt `false` zurück, wenn er außerhalb liegt.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Rgba<u8>) -> bool {
        if !self.contains(x, y) {
            return false;
        }
        self.image.put_pixel(x as u32, y as u32, color);
        true
    }

    /// Blendet eine Farbe ("over") auf einen Pixel.
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Rgba<u8>) -> bool {
        if !self.contains(x, y) {
            return false;
        }
        let dst = self.image.get_pixel_mut(x as u32, y as u32);
        *dst = blend_over(*dst, color);
        true
    }

    /// Füllt das halboffene Rechteck `[x0, x1) × [y0, y1)` (geclippt).
    pub fn fill_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgba<u8>) {
        let side = self.side();
        let (Some((cx0, cx1)), Some((cy0, cy1))) =
            (clip_span(x0, x1, side), clip_span(y0, y1, side))
        else {
            return;
        };
        for y in cy0..cy1 {
            for x in cx0..cx1 {
                self.image.put_pixel(x, y, color);
            }
        }
    }

    /// Wie [`PixelBuffer::fill_rect`], aber mit Alpha-Blending.
    pub fn blend_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgba<u8>) {
        let side = self.side();
        let (Some((cx0, cx1)), Some((cy0, cy1))) =
            (clip_span(x0, x1, side), clip_span(y0, y1, side))
        else {
            return;
        };
        for y in cy0..cy1 {
            for x in cx0..cx1 {
                let dst = self.image.get_pixel_mut(x, y);
                *dst = blend_over(*dst, color);
            }
        }
    }

    /// Horizontale Linie über `[x0, x1)` in Zeile `y`.
    pub fn hline(&mut self, x0: i32, x1: i32, y: i32, color: Rgba<u8>) {
        self.fill_rect(x0, y, x1, y + 1, color);
    }

    /// Vertikale Linie über `[y0, y1)` in Spalte `x`.
    pub fn vline(&mut self, x: i32, y0: i32, y1: i32, color: Rgba<u8>) {
        self.fill_rect(x, y0, x + 1, y1, color);
    }

    /// Prüft, ob sich das halboffene Rechteck mit dem Puffer überschneidet.
    pub fn intersects_rect(&self, x0: i32, y0: i32, x1: i32, y1: i32) -> bool {
        let side = self.side();
        clip_span(x0, x1, side).is_some() && clip_span(y0, y1, side).is_some()
    }

    /// Übernimmt den Inhalt eines anderen Puffers.
    ///
    /// Bei gleicher Seitenlänge wird die bestehende Allokation wiederverwendet.
    pub fn copy_from(&mut self, other: &PixelBuffer) {
        if self.side() == other.side() {
            let dst: &mut [u8] = &mut self.image;
            dst.copy_from_slice(other.as_raw());
        } else {
            log::debug!(
                "Rasterpuffer neu alloziert: {}px -> {}px",
                self.side(),
                other.side()
            );
            self.image = other.image.clone();
        }
    }

    /// Rohdaten (RGBA, Zeile 0 = Süden).
    pub fn as_raw(&self) -> &[u8] {
        self.image.as_raw()
    }

    /// Zugriff auf das zugrunde liegende Bild (Zeile 0 = Süden).
    pub fn as_image(&self) -> &RgbaImage {
        &self.image
    }

    /// Kopie mit Zeile 0 = Norden, z.B. für PNG-Export.
    pub fn to_image_top_down(&self) -> RgbaImage {
        image::imageops::flip_vertical(&self.image)
    }
}

/// Straight-Alpha-Blending `src` über `dst`.
pub fn blend_over(dst: Rgba<u8>, src: Rgba<u8>) -> Rgba<u8> {
    let sa = src[3] as u32;
    if sa == 255 {
        return src;
    }
    if sa == 0 {
        return dst;
    }
    let da = dst[3] as u32;
    let dst_weight = da * (255 - sa) / 255;
    let out_a = sa + dst_weight;
    if out_a == 0 {
        return TRANSPARENT;
    }
    let channel = |i: usize| ((src[i] as u32 * sa + dst[i] as u32 * dst_weight) / out_a) as u8;
    Rgba([channel(0), channel(1), channel(2), out_a.min(255) as u8])
}

/// Clippt das halboffene Intervall `[lo, hi)` auf `[0, limit)`.
fn clip_span(lo: i32, hi: i32, limit: u32) -> Option<(u32, u32)> {
    let lo = lo.max(0);
    let hi = hi.min(limit as i32);
    if lo >= hi {
        None
    } else {
        Some((lo as u32, hi as u32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);

    #[test]
    fn test_new_buffer_is_transparent() {
        let buffer = PixelBuffer::new(64);
        assert_eq!(buffer.side(), 64);
        assert!(buffer.as_raw().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_set_pixel_out_of_bounds_is_ignored() {
        let mut buffer = PixelBuffer::new(64);
        assert!(!buffer.set_pixel(-1, 10, RED));
        assert!(!buffer.set_pixel(64, 10, RED));
        assert!(!buffer.set_pixel(10, 64, RED));
        assert!(buffer.set_pixel(63, 63, RED));
        assert_eq!(buffer.get_pixel(63, 63), Some(RED));
        assert_eq!(buffer.get_pixel(64, 63), None);
    }

    #[test]
    fn test_fill_rect_is_clipped_and_half_open() {
        let mut buffer = PixelBuffer::new(64);
        buffer.fill_rect(-10, -10, 2, 3, RED);

        assert_eq!(buffer.get_pixel(0, 0), Some(RED));
        assert_eq!(buffer.get_pixel(1, 2), Some(RED));
        assert_eq!(buffer.get_pixel(2, 0), Some(TRANSPARENT));
        assert_eq!(buffer.get_pixel(0, 3), Some(TRANSPARENT));
    }

    #[test]
    fn test_fill_rect_entirely_outside_writes_nothing() {
        let mut buffer = PixelBuffer::new(64);
        buffer.fill_rect(100, 100, 200, 200, RED);
        buffer.fill_rect(5, 5, 5, 10, RED); // leere Breite
        assert!(buffer.as_raw().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_lines() {
        let mut buffer = PixelBuffer::new(64);
        buffer.hline(2, 6, 10, RED);
        buffer.vline(20, 0, 4, RED);

        for x in 2..6 {
            assert_eq!(buffer.get_pixel(x, 10), Some(RED));
        }
        assert_eq!(buffer.get_pixel(6, 10), Some(TRANSPARENT));
        for y in 0..4 {
            assert_eq!(buffer.get_pixel(20, y), Some(RED));
        }
        assert_eq!(buffer.get_pixel(20, 4), Some(TRANSPARENT));
    }

    #[test]
    fn test_blend_over_transparent_keeps_source() {
        let tint = Rgba([255, 128, 0, 100]);
        assert_eq!(blend_over(TRANSPARENT, tint), tint);
    }

    #[test]
    fn test_blend_over_opaque_destination_stays_opaque() {
        let out = blend_over(Rgba([0, 0, 255, 255]), Rgba([255, 0, 0, 128]));
        assert_eq!(out[3], 255);
        assert!(out[0] > 120 && out[0] < 135);
        assert!(out[2] > 120 && out[2] < 135);
    }

    #[test]
    fn test_copy_from_reuses_same_side() {
        let mut a = PixelBuffer::new(64);
        let mut b = PixelBuffer::new(64);
        b.set_pixel(1, 1, RED);
        a.copy_from(&b);
        assert_eq!(a, b);

        let c = PixelBuffer::new(128);
        a.copy_from(&c);
        assert_eq!(a.side(), 128);
    }

    #[test]
    fn test_top_down_export_flips_rows() {
        let mut buffer = PixelBuffer::new(64);
        buffer.set_pixel(0, 0, RED);
        let exported = buffer.to_image_top_down();
        assert_eq!(*exported.get_pixel(0, 63), RED);
    }
}
