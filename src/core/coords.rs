//! Koordinatensysteme: global (f64), regionslokal (f32) und Parzellen-Raster.
//!
//! Globale Positionen sind doppelt genau, weil Weltkoordinaten weit über
//! den f32-Bereich mit Zentimeter-Auflösung hinausgehen. Lokale Werte
//! (relativ zu Region oder Kamera) passen wieder in f32.

use glam::{DVec3, Vec3};

/// Kantenlänge einer Region in Metern.
pub const REGION_WIDTH_METERS: f32 = 256.0;
/// Kantenlänge einer Parzellen-Rasterzelle in Metern.
pub const PARCEL_GRID_STEP_METERS: f32 = 4.0;
/// Anzahl Rasterzellen pro Regionskante.
pub const PARCEL_GRID_CELLS_PER_EDGE: usize =
    (REGION_WIDTH_METERS / PARCEL_GRID_STEP_METERS) as usize;

/// Süd-West-Ecke der Region, die eine globale Position enthält.
pub fn region_origin_of(global: DVec3) -> DVec3 {
    let width = REGION_WIDTH_METERS as f64;
    DVec3::new(
        (global.x / width).floor() * width,
        (global.y / width).floor() * width,
        0.0,
    )
}

/// Globale Position → regionslokale Position.
pub fn global_to_region_local(global: DVec3, region_origin: DVec3) -> Vec3 {
    (global - region_origin).as_vec3()
}

/// Regionslokale Position → globale Position.
pub fn region_local_to_global(local: Vec3, region_origin: DVec3) -> DVec3 {
    region_origin + local.as_dvec3()
}

/// Rasterzelle (Zeile, Spalte) für eine regionslokale Position.
///
/// Zeile 0 liegt am Süd-Rand. Positionen außerhalb der Region liefern `None`.
pub fn parcel_cell_of(local: Vec3) -> Option<(usize, usize)> {
    if local.x < 0.0
        || local.y < 0.0
        || local.x >= REGION_WIDTH_METERS
        || local.y >= REGION_WIDTH_METERS
    {
        return None;
    }
    let col = (local.x / PARCEL_GRID_STEP_METERS) as usize;
    let row = (local.y / PARCEL_GRID_STEP_METERS) as usize;
    Some((
        row.min(PARCEL_GRID_CELLS_PER_EDGE - 1),
        col.min(PARCEL_GRID_CELLS_PER_EDGE - 1),
    ))
}
