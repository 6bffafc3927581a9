//! Seitenlänge der Rasterpuffer.
//!
//! Ein Layer-Puffer muss die Diagonale des Viewports abdecken, damit er
//! bei Rotation nach Blickrichtung keine leeren Ecken zeigt.

/// Kleinste erlaubte Seitenlänge.
pub const MIN_BUFFER_SIDE: u32 = 64;
/// Größte erlaubte Seitenlänge.
pub const MAX_BUFFER_SIDE: u32 = 512;

/// Diagonale eines Viewports in Pixeln.
pub fn viewport_diagonal(width: f32, height: f32) -> f32 {
    (width * width + height * height).sqrt()
}

/// Kleinste Zweierpotenz ≥ `diagonal`, begrenzt auf `[64, 512]`.
pub fn required_side(diagonal: f32) -> u32 {
    if !diagonal.is_finite() || diagonal <= MIN_BUFFER_SIDE as f32 {
        return MIN_BUFFER_SIDE;
    }
    let needed = (diagonal.ceil() as u32).min(MAX_BUFFER_SIDE);
    needed.next_power_of_two().clamp(MIN_BUFFER_SIDE, MAX_BUFFER_SIDE)
}
