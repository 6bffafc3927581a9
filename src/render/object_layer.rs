//! Rasterisierung der Objekt- und Avatar-Punkte in den Objekt-Layer.

use minimap_raster::{draw_marker, MarkerShape};

use super::layer::LayerCanvas;
use super::palette::entity_color;
use crate::core::{EntityKind, EntityView, RelativeHeight};
use crate::shared::MinimapColors;

/// Ergebnis eines Objekt-Rebuilds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ObjectLayerStats {
    /// Gezeichnete Marker
    pub drawn: usize,
    /// Außerhalb des Puffers verworfene Entitäten
    pub culled: usize,
}

/// Footprint je nach Art und Höhenlage.
fn marker_shape(kind: EntityKind, height: RelativeHeight) -> MarkerShape {
    match (kind, height) {
        (_, RelativeHeight::Above) => MarkerShape::Tee,
        (_, RelativeHeight::Below) => MarkerShape::InvertedTee,
        (EntityKind::Object, RelativeHeight::Level) => MarkerShape::Square,
        (EntityKind::Avatar, RelativeHeight::Level) => MarkerShape::Cross,
    }
}

/// Durchmesser in Texeln für einen Radius in Metern (mindestens 1).
fn diameter_texels(radius_meters: f32, texels_per_meter: f32) -> i32 {
    ((2.0 * radius_meters * texels_per_meter).round() as i32).max(1)
}

/// Zeichnet alle Entitäten in die Zeichenfläche.
///
/// `avatar_radius_meters` ist der Avatar-Punkt-Radius der aktuellen Ansicht
/// (Screen-Radius / Pixel pro Meter).
pub fn rasterize_objects(
    canvas: &mut LayerCanvas<'_>,
    entities: &[EntityView],
    camera_z: f64,
    avatar_radius_meters: f32,
    colors: &MinimapColors,
) -> ObjectLayerStats {
    let tpm = canvas.texels_per_meter();
    let avatar_diameter = diameter_texels(avatar_radius_meters, tpm);
    let mut stats = ObjectLayerStats::default();

    for entity in entities {
        let (x, y) = canvas.world_to_texel_index(entity.position);
        let diameter = match entity.kind {
            EntityKind::Object => diameter_texels(entity.radius_meters, tpm),
            EntityKind::Avatar => avatar_diameter,
        };
        let shape = marker_shape(entity.kind, entity.height_relative_to(camera_z));
        let color = entity_color(entity.category, colors);

        if draw_marker(canvas.buffer(), x, y, diameter, shape, color) {
            stats.drawn += 1;
        } else {
            stats.culled += 1;
        }
    }
    stats
}
