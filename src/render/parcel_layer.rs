//! Rasterisierung von Parzellen-Overlay und Regionsgrenzen.
//!
//! Pro Region werden die Texel-Kanten des 64×64-Rasters einmal vorberechnet,
//! damit benachbarte Zellen lückenlos aneinanderstoßen. Reihenfolge:
//! Zellfüllung, Grundstückslinien, danach Nord- und Ost-Grenze der Region.

use minimap_raster::PixelBuffer;

use super::layer::LayerCanvas;
use super::palette::rgba;
use crate::core::{
    RegionView, PARCEL_GRID_CELLS_PER_EDGE, PARCEL_GRID_STEP_METERS, REGION_WIDTH_METERS,
};
use crate::shared::MinimapConfiguration;

/// Ergebnis eines Parzellen-Rebuilds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParcelLayerStats {
    /// Regionen mit mindestens einem sichtbaren Texel
    pub regions_drawn: usize,
    /// Regionen ohne Overlay-Daten (nur Grenze gezeichnet)
    pub regions_without_overlay: usize,
    /// Regionen außerhalb des Puffers
    pub regions_culled: usize,
}

/// Texel-Kanten einer Achse: `edges[i]` ist die Startkante von Zelle `i`.
fn grid_edges(start_texel: f32, texels_per_meter: f32) -> [i32; PARCEL_GRID_CELLS_PER_EDGE + 1] {
    let step = PARCEL_GRID_STEP_METERS * texels_per_meter;
    std::array::from_fn(|i| (start_texel + i as f32 * step).floor() as i32)
}

/// Zeichnet alle Regionen, die den Puffer berühren.
pub fn rasterize_parcels(
    canvas: &mut LayerCanvas<'_>,
    regions: &[RegionView],
    config: &MinimapConfiguration,
) -> ParcelLayerStats {
    let tpm = canvas.texels_per_meter();
    let region_texels = REGION_WIDTH_METERS * tpm;
    let mut stats = ParcelLayerStats::default();

    for region in regions {
        let south_west = canvas.world_to_texel(region.origin);
        let left = south_west.x.floor() as i32;
        let bottom = south_west.y.floor() as i32;
        let right = (south_west.x + region_texels).floor() as i32;
        let top = (south_west.y + region_texels).floor() as i32;

        if !canvas.buffer().intersects_rect(left, bottom, right, top) {
            stats.regions_culled += 1;
            continue;
        }
        stats.regions_drawn += 1;

        let col_edges = grid_edges(south_west.x, tpm);
        let row_edges = grid_edges(south_west.y, tpm);

        if region.parcel_overlay.is_some() {
            draw_cells(canvas.buffer(), region, &row_edges, &col_edges, config);
        } else {
            stats.regions_without_overlay += 1;
        }

        let border = if region.alive {
            config.colors.region_border
        } else {
            config.colors.region_border_warning
        };
        let border = rgba(border);
        let north = row_edges[PARCEL_GRID_CELLS_PER_EDGE];
        let east = col_edges[PARCEL_GRID_CELLS_PER_EDGE];
        canvas.buffer().hline(left, east, north - 1, border);
        canvas.buffer().vline(east - 1, bottom, north, border);
    }

    log::debug!(
        "Parzellen-Layer: {} Regionen gezeichnet, {} verworfen",
        stats.regions_drawn,
        stats.regions_culled
    );
    stats
}

/// Füllungen und Grenzlinien aller sichtbaren Zellen einer Region.
fn draw_cells(
    buffer: &mut PixelBuffer,
    region: &RegionView,
    row_edges: &[i32; PARCEL_GRID_CELLS_PER_EDGE + 1],
    col_edges: &[i32; PARCEL_GRID_CELLS_PER_EDGE + 1],
    config: &MinimapConfiguration,
) {
    let Some(overlay) = &region.parcel_overlay else {
        return;
    };
    let side = buffer.side() as i32;
    let for_sale = rgba(config.colors.for_sale);
    let collision = rgba(config.colors.collision);
    let line = rgba(config.colors.property_line);

    for row in 0..PARCEL_GRID_CELLS_PER_EDGE {
        let (y0, y1) = (row_edges[row], row_edges[row + 1]);
        if y1 <= 0 || y0 >= side {
            continue;
        }
        for col in 0..PARCEL_GRID_CELLS_PER_EDGE {
            let (x0, x1) = (col_edges[col], col_edges[col + 1]);
            if x1 <= 0 || x0 >= side {
                continue;
            }
            let cell = overlay.cell(row, col);

            if config.show_for_sale_parcels && cell.is_for_sale() {
                buffer.fill_rect(x0, y0, x1, y1, for_sale);
            } else if config.show_collision_parcels
                && region
                    .collision
                    .as_ref()
                    .is_some_and(|bitmap| bitmap.is_set(row, col))
            {
                buffer.fill_rect(x0, y0, x1, y1, collision);
            }

            if config.show_property_lines {
                if cell.has_south_line() {
                    buffer.hline(x0, x1, y0, line);
                }
                if cell.has_west_line() {
                    buffer.vline(x0, y0, y1, line);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{OwnershipCategory, ParcelCell, ParcelOverlay};
    use crate::render::layer::RasterLayer;
    use glam::DVec3;
    use minimap_raster::{Rgba, TRANSPARENT};
    use std::time::Instant;

    /// Puffer 256 Texel, 1 Texel pro Meter, zentriert auf die Regionsmitte.
    fn rebuild(region: &RegionView, config: &MinimapConfiguration) -> (RasterLayer, ParcelLayerStats) {
        let mut layer = RasterLayer::new("parcels", 256);
        layer.update_texels_per_meter(1.0, 256.0);
        let center = region.origin + DVec3::new(128.0, 128.0, 0.0);
        let stats = layer.rebuild(center, Instant::now(), |canvas| {
            rasterize_parcels(canvas, std::slice::from_ref(region), config)
        });
        (layer, stats)
    }

    fn region() -> RegionView {
        RegionView::new("Test", DVec3::new(256_000.0, 256_000.0, 0.0))
    }

    #[test]
    fn test_grid_edges_are_contiguous() {
        let edges = grid_edges(10.5, 1.0);
        assert_eq!(edges[0], 10);
        assert_eq!(edges[1], 14);
        assert_eq!(edges[PARCEL_GRID_CELLS_PER_EDGE], 266);
    }

    #[test]
    fn test_border_north_and_east() {
        let config = MinimapConfiguration::default();
        let (layer, stats) = rebuild(&region(), &config);
        assert_eq!(stats.regions_drawn, 1);
        assert_eq!(stats.regions_without_overlay, 1);

        let buffer = layer.committed().buffer();
        let border = Some(Rgba(config.colors.region_border));
        assert_eq!(buffer.get_pixel(10, 255), border);
        assert_eq!(buffer.get_pixel(255, 10), border);
        assert_eq!(buffer.get_pixel(10, 0), Some(TRANSPARENT));
        assert_eq!(buffer.get_pixel(0, 10), Some(TRANSPARENT));
    }

    #[test]
    fn test_property_lines_follow_flags() {
        let mut region = region();
        let mut overlay = ParcelOverlay::new();
        overlay.set_cell(2, 3, ParcelCell::new(OwnershipCategory::Owned, true, true));
        region.parcel_overlay = Some(overlay);

        let config = MinimapConfiguration::default();
        let (layer, _) = rebuild(&region, &config);
        let buffer = layer.committed().buffer();
        let line = Some(Rgba(config.colors.property_line));
        // Zelle (2, 3) beginnt bei Texel (12, 8)
        assert_eq!(buffer.get_pixel(13, 8), line);
        assert_eq!(buffer.get_pixel(12, 10), line);
        assert_eq!(buffer.get_pixel(14, 10), Some(TRANSPARENT));

        let hidden = MinimapConfiguration {
            show_property_lines: false,
            ..config
        };
        let (layer, _) = rebuild(&region, &hidden);
        assert_eq!(layer.committed().buffer().get_pixel(13, 8), Some(TRANSPARENT));
    }

    #[test]
    fn test_far_region_is_culled() {
        let mut far = region();
        far.origin.x += 4096.0;
        let mut layer = RasterLayer::new("parcels", 256);
        layer.update_texels_per_meter(1.0, 256.0);
        let center = region().origin + DVec3::new(128.0, 128.0, 0.0);
        let stats = layer.rebuild(center, Instant::now(), |canvas| {
            rasterize_parcels(canvas, &[far], &MinimapConfiguration::default())
        });
        assert_eq!(stats.regions_culled, 1);
        assert_eq!(stats.regions_drawn, 0);
    }
}
