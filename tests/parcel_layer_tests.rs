//! Integrationstests für den Parzellen-Layer (Grenzen, Verkauf, Kollision).

use std::time::Instant;

use glam::DVec3;
use minimap_raster::{Rgba, TRANSPARENT};
use sl_minimap::render::{rasterize_parcels, ParcelLayerStats, RasterLayer};
use sl_minimap::{
    CollisionBitmap, MinimapConfiguration, OwnershipCategory, ParcelCell, ParcelOverlay,
    RegionView,
};

/// 256er Puffer mit 1 Texel pro Meter, zentriert auf die Mitte von `region`.
/// Texel (x, y) entspricht dann regionslokal (x, y) Metern.
fn rasterize(region: &RegionView, config: &MinimapConfiguration) -> (RasterLayer, ParcelLayerStats) {
    let mut layer = RasterLayer::new("parcels", 256);
    layer.update_texels_per_meter(1.0, 256.0);
    let center = region.origin + DVec3::new(128.0, 128.0, 0.0);
    let stats = layer.rebuild(center, Instant::now(), |canvas| {
        rasterize_parcels(canvas, std::slice::from_ref(region), config)
    });
    (layer, stats)
}

/// Alle Texel einer 4-m-Zelle.
fn cell_texels(row: usize, col: usize) -> impl Iterator<Item = (i32, i32)> {
    let (x0, y0) = (col as i32 * 4, row as i32 * 4);
    (y0..y0 + 4).flat_map(move |y| (x0..x0 + 4).map(move |x| (x, y)))
}

fn overlay_with(row: usize, col: usize, ownership: OwnershipCategory) -> ParcelOverlay {
    let mut overlay = ParcelOverlay::new();
    overlay.set_cell(row, col, ParcelCell::new(ownership, false, false));
    overlay
}

#[test]
fn test_dead_region_border_uses_warning_color() {
    let mut region = RegionView::new("Tot", DVec3::ZERO);
    region.alive = false;
    region.parcel_overlay = Some(ParcelOverlay::new());
    let config = MinimapConfiguration::default();
    let (layer, _) = rasterize(&region, &config);

    let buffer = layer.committed().buffer();
    let warning = Some(Rgba(config.colors.region_border_warning));
    for x in [0, 100, 255] {
        assert_eq!(buffer.get_pixel(x, 255), warning, "Nordkante x={x}");
    }
    for y in [0, 100, 255] {
        assert_eq!(buffer.get_pixel(255, y), warning, "Ostkante y={y}");
    }
    assert_ne!(warning, Some(Rgba(config.colors.region_border)));
}

#[test]
fn test_alive_region_border_uses_normal_color() {
    let region = RegionView::new("Lebt", DVec3::new(256.0, 512.0, 0.0));
    let config = MinimapConfiguration::default();
    let (layer, _) = rasterize(&region, &config);
    assert_eq!(
        layer.committed().buffer().get_pixel(10, 255),
        Some(Rgba(config.colors.region_border))
    );
}

#[test]
fn test_for_sale_fill_follows_option() {
    let mut region = RegionView::new("Verkauf", DVec3::new(256_000.0, 256_000.0, 0.0));
    region.parcel_overlay = Some(overlay_with(10, 20, OwnershipCategory::ForSale));

    let shown = MinimapConfiguration {
        show_for_sale_parcels: true,
        ..MinimapConfiguration::default()
    };
    let (layer, _) = rasterize(&region, &shown);
    let buffer = layer.committed().buffer();
    let tint = Some(Rgba(shown.colors.for_sale));
    for (x, y) in cell_texels(10, 20) {
        assert_eq!(buffer.get_pixel(x, y), tint, "Texel ({x}, {y})");
    }
    // Nachbarzelle bleibt leer
    assert_eq!(buffer.get_pixel(84, 40), Some(TRANSPARENT));

    let hidden = MinimapConfiguration {
        show_for_sale_parcels: false,
        ..MinimapConfiguration::default()
    };
    let (layer, _) = rasterize(&region, &hidden);
    let buffer = layer.committed().buffer();
    for (x, y) in cell_texels(10, 20) {
        assert_eq!(buffer.get_pixel(x, y), Some(TRANSPARENT));
    }
}

#[test]
fn test_for_sale_takes_precedence_over_collision() {
    let mut region = RegionView::new("Beides", DVec3::new(256_000.0, 256_000.0, 0.0));
    region.parcel_overlay = Some(overlay_with(5, 5, OwnershipCategory::ForSale));
    let mut collision = CollisionBitmap::new();
    collision.set(5, 5, true);
    collision.set(6, 6, true);
    region.collision = Some(collision);

    let config = MinimapConfiguration {
        show_for_sale_parcels: true,
        show_collision_parcels: true,
        ..MinimapConfiguration::default()
    };
    let (layer, _) = rasterize(&region, &config);
    let buffer = layer.committed().buffer();
    assert_eq!(buffer.get_pixel(21, 21), Some(Rgba(config.colors.for_sale)));
    assert_eq!(buffer.get_pixel(25, 25), Some(Rgba(config.colors.collision)));

    // Ohne Verkaufsanzeige greift die Kollisionsfüllung
    let no_sale = MinimapConfiguration {
        show_for_sale_parcels: false,
        ..config
    };
    let (layer, _) = rasterize(&region, &no_sale);
    assert_eq!(
        layer.committed().buffer().get_pixel(21, 21),
        Some(Rgba(no_sale.colors.collision))
    );
}

#[test]
fn test_region_without_overlay_draws_border_only() {
    let mut region = RegionView::new("Leer", DVec3::new(256_000.0, 256_000.0, 0.0));
    let mut collision = CollisionBitmap::new();
    collision.set(0, 0, true);
    region.collision = Some(collision);

    let config = MinimapConfiguration::default();
    let (layer, stats) = rasterize(&region, &config);
    assert_eq!(stats.regions_without_overlay, 1);
    let buffer = layer.committed().buffer();
    assert_eq!(buffer.get_pixel(1, 1), Some(TRANSPARENT));
    assert_eq!(buffer.get_pixel(1, 255), Some(Rgba(config.colors.region_border)));
}
