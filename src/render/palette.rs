//! Farbzuordnung für Layer und Frame-Komposition.

use minimap_raster::Rgba;

use crate::core::ColorCategory;
use crate::shared::MinimapColors;

/// Konvertiert eine Konfigurationsfarbe in einen Pixelwert.
pub fn rgba(color: [u8; 4]) -> Rgba<u8> {
    Rgba(color)
}

/// Farbe eines Objekt- oder Avatar-Punkts.
pub fn entity_color(category: ColorCategory, colors: &MinimapColors) -> Rgba<u8> {
    rgba(match category {
        ColorCategory::YouOwn => colors.object_you_own,
        ColorCategory::GroupOwn => colors.object_group_own,
        ColorCategory::OtherOwn => colors.object_other_own,
        ColorCategory::Avatar => colors.avatar,
        ColorCategory::Friend => colors.avatar_friend,
    })
}

/// Multipliziert eine Farbe kanalweise mit einem Tint (Alpha bleibt).
pub fn multiply(color: Rgba<u8>, tint: [u8; 4]) -> Rgba<u8> {
    let mul = |c: u8, t: u8| ((c as u16 * t as u16) / 255) as u8;
    Rgba([
        mul(color[0], tint[0]),
        mul(color[1], tint[1]),
        mul(color[2], tint[2]),
        color[3],
    ])
}
