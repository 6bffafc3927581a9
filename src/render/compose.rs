//! Frame-Komposition: Hintergrund, Layer-Texturen und Kamera-Overlays.
//!
//! Die Layer sind weltausgerichtet (Norden oben). Die Rotation zur
//! Blickrichtung passiert ausschließlich hier beim Abtasten.

use glam::{DVec3, Mat2, Vec2};
use minimap_raster::{blend_over, Rgba, RgbaImage};

use super::layer::LayerTexture;
use super::palette::{multiply, rgba};
use crate::core::{CameraState, RegionView, ViewState, WorldSource, REGION_WIDTH_METERS};
use crate::shared::MinimapConfiguration;

/// Alles, was für einen Frame gelesen wird.
pub struct FrameContext<'a> {
    pub view: &'a ViewState,
    pub camera: &'a CameraState,
    /// Kartenrotation (Blickrichtung oder 0)
    pub rotation: f32,
    pub config: &'a MinimapConfiguration,
    pub parcels: &'a LayerTexture,
    pub objects: &'a LayerTexture,
}

/// Sichtkegel in Screen-Koordinaten.
struct FrustumWedge {
    apex: Vec2,
    direction: Vec2,
    cos_half_fov: f32,
    length: f32,
}

impl FrustumWedge {
    fn new(ctx: &FrameContext<'_>, apex: Vec2) -> Self {
        let direction = Mat2::from_angle(-ctx.rotation) * ctx.camera.look_direction();
        Self {
            apex,
            direction: direction.normalize_or_zero(),
            cos_half_fov: (ctx.camera.horizontal_fov * 0.5).cos(),
            length: ctx.camera.far_clip_meters * ctx.view.pixels_per_meter(),
        }
    }

    fn contains(&self, point: Vec2) -> bool {
        let offset = point - self.apex;
        let distance = offset.length();
        if distance <= f32::EPSILON || distance > self.length {
            return false;
        }
        offset.dot(self.direction) / distance >= self.cos_half_fov
    }
}

/// Hintergrundfarbe einer Region an einer globalen Position.
fn region_background(region: &RegionView, global: DVec3, config: &MinimapConfiguration) -> Rgba<u8> {
    let tile_color = config
        .use_baked_map_tiles
        .then_some(region.map_tile.as_deref())
        .flatten()
        .filter(|tile| tile.width() > 0 && tile.height() > 0)
        .map(|tile| {
            let width = REGION_WIDTH_METERS as f64;
            let u = ((global.x - region.origin.x) / width).clamp(0.0, 1.0);
            let v = ((global.y - region.origin.y) / width).clamp(0.0, 1.0);
            // Tile-Zeile 0 = Norden
            let x = ((u * tile.width() as f64) as u32).min(tile.width() - 1);
            let y = (((1.0 - v) * tile.height() as f64) as u32).min(tile.height() - 1);
            *tile.get_pixel(x, y)
        });

    let color = tile_color
        .unwrap_or_else(|| rgba(region.terrain_color.unwrap_or(config.colors.land)));

    if region.alive {
        color
    } else {
        multiply(color, config.colors.dead_region_tint)
    }
}

/// Setzt den Frame für den aktuellen Viewport zusammen (Zeile 0 = oben).
pub fn compose<W: WorldSource + ?Sized>(ctx: &FrameContext<'_>, world: &W) -> RgbaImage {
    let size = ctx.view.viewport_size();
    let width = size.x.round().max(0.0) as u32;
    let height = size.y.round().max(0.0) as u32;
    let mut image = RgbaImage::new(width, height);
    if width == 0 || height == 0 {
        return image;
    }

    // screen_to_world ist affin: Basis plus Schritte pro Pixel
    let to_world = |p: Vec2| ctx.view.screen_to_world(p, ctx.camera, ctx.rotation);
    let origin = to_world(Vec2::splat(0.5));
    let step_x = to_world(Vec2::new(1.5, 0.5)) - origin;
    let step_y = to_world(Vec2::new(0.5, 1.5)) - origin;

    let colors = &ctx.config.colors;
    let background = rgba(colors.background);
    let frustum_color = rgba(colors.frustum);
    let self_color = rgba(colors.self_marker);

    let camera_screen = ctx
        .view
        .world_to_screen(ctx.camera.global_position, ctx.camera, ctx.rotation);
    let camera_screen = Vec2::new(camera_screen.x, camera_screen.y);
    let wedge = FrustumWedge::new(ctx, camera_screen);
    let dot_radius_sq = ctx.view.dot_radius() * ctx.view.dot_radius();

    let mut cached_region: Option<&RegionView> = None;

    for sy in 0..height {
        let row_start = origin + step_y * sy as f64;
        let image_row = height - 1 - sy;
        for sx in 0..width {
            let global = row_start + step_x * sx as f64;
            let screen = Vec2::new(sx as f32 + 0.5, sy as f32 + 0.5);

            if !cached_region.is_some_and(|r| r.contains_xy(global)) {
                cached_region = world.region_at(global);
            }
            let mut pixel = background;
            if let Some(region) = cached_region {
                pixel = blend_over(pixel, region_background(region, global, ctx.config));
            }
            if let Some(parcel) = ctx.parcels.sample(global) {
                pixel = blend_over(pixel, parcel);
            }
            if let Some(object) = ctx.objects.sample(global) {
                pixel = blend_over(pixel, object);
            }
            if wedge.contains(screen) {
                pixel = blend_over(pixel, frustum_color);
            }
            if screen.distance_squared(camera_screen) <= dot_radius_sq {
                pixel = blend_over(pixel, self_color);
            }

            image.put_pixel(sx, image_row, pixel);
        }
    }
    image
}
