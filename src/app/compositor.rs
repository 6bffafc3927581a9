//! Minimap-Compositor: Ansichtszustand, Layer-Caches und Rebuild-Takt.

use std::time::{Duration, Instant};

use glam::{DVec3, Vec2, Vec3};
use minimap_raster::{required_side, viewport_diagonal, RgbaImage};

use crate::core::coords::{global_to_region_local, parcel_cell_of};
use crate::core::{CameraState, ParcelCell, RegionView, ViewState, WorldSource};
use crate::render::{
    compose, rasterize_objects, rasterize_parcels, FrameContext, ObjectLayerStats,
    ParcelLayerStats, RasterLayer,
};
use crate::shared::options::{OBJECT_LAYER_REFRESH_SECS, PARCEL_LAYER_MOVE_THRESHOLD_METERS};
use crate::shared::MinimapConfiguration;

/// Was ein `update` neu aufgebaut hat.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Ergebnis des Objekt-Rebuilds (None = Cache weiterverwendet)
    pub objects: Option<ObjectLayerStats>,
    /// Ergebnis des Parzellen-Rebuilds (None = Cache weiterverwendet)
    pub parcels: Option<ParcelLayerStats>,
}

impl FrameStats {
    pub fn object_rebuilt(&self) -> bool {
        self.objects.is_some()
    }

    pub fn parcel_rebuilt(&self) -> bool {
        self.parcels.is_some()
    }
}

/// Treffer unter einer Screen-Position.
#[derive(Debug, Clone, Copy)]
pub struct MapHit<'a> {
    pub region: &'a RegionView,
    /// Globale Position (z = 0)
    pub global: DVec3,
    /// Rasterzelle (Zeile, Spalte)
    pub cell_index: (usize, usize),
    /// Overlay-Zelle, falls die Region schon Overlay-Daten hat
    pub cell: Option<ParcelCell>,
    /// Kollisions-Bit der Zelle
    pub collision: bool,
}

/// Zustand und Caches einer Minimap-Instanz.
#[derive(Debug)]
pub struct MinimapCompositor {
    pub(super) config: MinimapConfiguration,
    pub(super) view: ViewState,
    camera: CameraState,
    object_layer: RasterLayer,
    parcel_layer: RasterLayer,
    last_update: Option<Instant>,
}

impl MinimapCompositor {
    /// Erstellt den Compositor für eine Viewport-Größe in Pixeln.
    pub fn new(config: MinimapConfiguration, viewport_size: Vec2) -> Self {
        let view = ViewState::new(config.initial_scale, viewport_size.max(Vec2::ZERO));
        let side = required_side(viewport_diagonal(view.viewport_size().x, view.viewport_size().y));
        let mut compositor = Self {
            config,
            view,
            camera: CameraState::default(),
            object_layer: RasterLayer::new("objects", side),
            parcel_layer: RasterLayer::new("parcels", side),
            last_update: None,
        };
        compositor.refresh_texel_scale();
        compositor
    }

    fn viewport_diagonal(&self) -> f32 {
        let size = self.view.viewport_size();
        viewport_diagonal(size.x, size.y)
    }

    /// Texel-Skalierung beider Layer nachziehen (markiert beide dirty).
    fn refresh_texel_scale(&mut self) {
        let ppm = self.view.pixels_per_meter();
        let diagonal = self.viewport_diagonal();
        self.object_layer.update_texels_per_meter(ppm, diagonal);
        self.parcel_layer.update_texels_per_meter(ppm, diagonal);
    }

    // ── Ansicht ─────────────────────────────────────────────────────

    /// Setzt die Skalierung (geclampt). Beide Layer werden neu aufgebaut.
    ///
    /// Die Puffergröße hängt nur von der Viewport-Diagonale ab: Zoomen
    /// ändert die Texel pro Meter, alloziert die Layer-Puffer aber nie neu.
    pub fn set_scale(&mut self, scale: f32) -> f32 {
        let applied = self.view.set_scale(scale);
        self.refresh_texel_scale();
        applied
    }

    pub fn scale(&self) -> f32 {
        self.view.scale()
    }

    /// Übernimmt eine neue Viewport-Größe.
    ///
    /// Die Puffer werden nur neu alloziert, wenn sich die benötigte
    /// Zweierpotenz ändert.
    pub fn set_viewport_size(&mut self, size: Vec2) {
        if size == self.view.viewport_size() {
            return;
        }
        self.view.set_viewport_size(size);
        let side = required_side(self.viewport_diagonal());
        self.object_layer.ensure_side(side);
        self.parcel_layer.ensure_side(side);
        self.refresh_texel_scale();
    }

    pub fn viewport_size(&self) -> Vec2 {
        self.view.viewport_size()
    }

    /// Übernimmt Position und Blickrichtung der Kamera.
    pub fn set_camera(&mut self, camera: CameraState) {
        self.camera = camera;
    }

    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    /// Übernimmt eine neue Konfiguration.
    ///
    /// Layer, deren Darstellung sich ändert, werden dirty markiert.
    pub fn set_configuration(&mut self, config: MinimapConfiguration) {
        if self.config.parcel_layer_differs(&config) {
            self.parcel_layer.mark_dirty();
        }
        if self.config.object_layer_differs(&config) {
            self.object_layer.mark_dirty();
        }
        if config.auto_center_pan && !self.config.auto_center_pan && !self.view.is_panning() {
            self.view.target_pan = Vec2::ZERO;
        }
        if !config.auto_center_pan && self.config.auto_center_pan {
            // Pan bleibt dort stehen, wo er gerade ist
            self.view.target_pan = self.view.current_pan;
        }
        self.config = config;
    }

    pub fn configuration(&self) -> &MinimapConfiguration {
        &self.config
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Aktuelle Kartenrotation: Blickrichtung oder 0.
    pub fn view_rotation(&self) -> f32 {
        if self.config.rotate_to_heading {
            self.camera.heading
        } else {
            0.0
        }
    }

    /// Globale Position → Screen-Position (z in Metern relativ zur Kamera).
    pub fn world_to_screen(&self, global: DVec3) -> Vec3 {
        self.view
            .world_to_screen(global, &self.camera, self.view_rotation())
    }

    /// Screen-Position → globale Position (z = 0).
    pub fn screen_to_world(&self, screen: Vec2) -> DVec3 {
        self.view
            .screen_to_world(screen, &self.camera, self.view_rotation())
    }

    /// Weltpunkt unter der Viewport-Mitte.
    pub fn view_center_global(&self) -> DVec3 {
        self.view
            .view_center_global(&self.camera, self.view_rotation())
    }

    // ── Layer ───────────────────────────────────────────────────────

    pub fn object_layer(&self) -> &RasterLayer {
        &self.object_layer
    }

    pub fn parcel_layer(&self) -> &RasterLayer {
        &self.parcel_layer
    }

    /// Objekt-Layer beim nächsten Update neu aufbauen.
    pub fn invalidate_objects(&mut self) {
        self.object_layer.mark_dirty();
    }

    /// Parzellen-Layer beim nächsten Update neu aufbauen (z.B. neue Overlay-Daten).
    pub fn invalidate_parcels(&mut self) {
        self.parcel_layer.mark_dirty();
    }

    /// Baut den Objekt-Layer um die aktuelle View-Mitte neu auf.
    pub fn rebuild_object_layer<W: WorldSource + ?Sized>(
        &mut self,
        world: &W,
        now: Instant,
    ) -> ObjectLayerStats {
        let center = self.view_center_global();
        let avatar_radius_meters = self.view.dot_radius() / self.view.pixels_per_meter();
        let show_objects = self.config.show_objects;
        let colors = &self.config.colors;
        let camera_z = self.camera.global_position.z;

        let stats = self.object_layer.rebuild(center, now, |canvas| {
            if show_objects {
                rasterize_objects(
                    canvas,
                    world.entities(),
                    camera_z,
                    avatar_radius_meters,
                    colors,
                )
            } else {
                ObjectLayerStats::default()
            }
        });
        log::debug!(
            "Objekt-Layer neu aufgebaut: {} Marker, {} verworfen",
            stats.drawn,
            stats.culled
        );
        stats
    }

    /// Baut den Parzellen-Layer um die aktuelle View-Mitte neu auf.
    pub fn rebuild_parcel_layer<W: WorldSource + ?Sized>(
        &mut self,
        world: &W,
        now: Instant,
    ) -> ParcelLayerStats {
        let center = self.view_center_global();
        let config = &self.config;
        self.parcel_layer.rebuild(center, now, |canvas| {
            rasterize_parcels(canvas, world.regions(), config)
        })
    }

    fn object_layer_due(&self, now: Instant) -> bool {
        if self.object_layer.is_dirty() {
            return true;
        }
        let interval = Duration::from_secs_f32(OBJECT_LAYER_REFRESH_SECS);
        self.object_layer
            .elapsed_since_rebuild(now)
            .is_none_or(|elapsed| elapsed >= interval)
    }

    fn parcel_layer_due(&self, center: DVec3) -> bool {
        if self.parcel_layer.is_dirty() || self.parcel_layer.last_rebuild().is_none() {
            return true;
        }
        let last = self.parcel_layer.center_global();
        let moved = (center.truncate() - last.truncate()).length();
        moved > PARCEL_LAYER_MOVE_THRESHOLD_METERS
    }

    /// Pro Frame: Pan-Rückführung und fällige Layer-Rebuilds.
    pub fn update<W: WorldSource + ?Sized>(&mut self, world: &W, now: Instant) -> FrameStats {
        let dt = self
            .last_update
            .map(|last| now.saturating_duration_since(last).as_secs_f32())
            .unwrap_or(0.0);
        self.last_update = Some(now);

        if self.config.auto_center_pan && !self.view.is_panning() {
            self.view.ease_pan(dt);
        }

        let mut stats = FrameStats::default();
        if self.object_layer_due(now) {
            stats.objects = Some(self.rebuild_object_layer(world, now));
        }
        if self.parcel_layer_due(self.view_center_global()) {
            stats.parcels = Some(self.rebuild_parcel_layer(world, now));
        }
        stats
    }

    /// Setzt den aktuellen Frame aus den committeten Layern zusammen.
    pub fn compose<W: WorldSource + ?Sized>(&self, world: &W) -> RgbaImage {
        let ctx = FrameContext {
            view: &self.view,
            camera: &self.camera,
            rotation: self.view_rotation(),
            config: &self.config,
            parcels: self.parcel_layer.committed(),
            objects: self.object_layer.committed(),
        };
        compose(&ctx, world)
    }

    /// Region und Parzellen-Zelle unter einer Screen-Position.
    pub fn hit_test<'w, W: WorldSource + ?Sized>(
        &self,
        world: &'w W,
        screen: Vec2,
    ) -> Option<MapHit<'w>> {
        let global = self.screen_to_world(screen);
        let region = world.region_at(global)?;
        let local = global_to_region_local(global, region.origin);
        let cell_index = parcel_cell_of(local)?;
        let (row, col) = cell_index;
        Some(MapHit {
            region,
            global,
            cell_index,
            cell: region
                .parcel_overlay
                .as_ref()
                .map(|overlay| overlay.cell(row, col)),
            collision: region
                .collision
                .as_ref()
                .is_some_and(|bitmap| bitmap.is_set(row, col)),
        })
    }
}
