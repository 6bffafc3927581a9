//! Ansichts-Zustand: Skalierung, Pan und Transformationen Welt ↔ Screen.
//!
//! Screen-Koordinaten sind lokal zum Minimap-Viewport, Ursprung unten links,
//! y nach oben (wie die Welt-Achsen). Der Host spiegelt bei Bedarf selbst.

use glam::{DVec3, Mat2, Vec2, Vec3};

use super::camera::CameraState;
use super::coords::REGION_WIDTH_METERS;
use crate::shared::options::{
    DOT_SCALE, MAP_SCALE_MAX, MAP_SCALE_MIN, MIN_DOT_RADIUS, PAN_EASE_TIME_CONSTANT_SECS,
};

/// Zustand der Pan-Geste.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PanState {
    #[default]
    Idle,
    /// Shift-Klick gehalten
    Panning {
        /// Screen-Position beim Drücken
        origin: Vec2,
        /// Pan beim Drücken
        start_pan: Vec2,
        /// Slop überschritten, Pan folgt der Maus
        dragging: bool,
    },
}

/// View-bezogener Zustand der Minimap.
#[derive(Debug, Clone)]
pub struct ViewState {
    /// Pixel pro Regionsbreite
    scale: f32,
    /// Abgeleitet: `scale / REGION_WIDTH_METERS`
    pixels_per_meter: f32,
    /// Aktueller Pan-Versatz in Screen-Pixeln
    pub(crate) current_pan: Vec2,
    /// Ziel-Pan, dem `current_pan` bei Auto-Center folgt
    pub(crate) target_pan: Vec2,
    /// Viewport-Größe in Pixeln
    viewport_size: Vec2,
    /// Pan-Geste
    pub(crate) pan_state: PanState,
}

impl ViewState {
    /// Erstellt den View-Zustand mit Start-Skalierung und Viewport-Größe.
    pub fn new(scale: f32, viewport_size: Vec2) -> Self {
        let scale = clamp_scale(scale);
        Self {
            scale,
            pixels_per_meter: scale / REGION_WIDTH_METERS,
            current_pan: Vec2::ZERO,
            target_pan: Vec2::ZERO,
            viewport_size,
            pan_state: PanState::Idle,
        }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn pixels_per_meter(&self) -> f32 {
        self.pixels_per_meter
    }

    pub fn viewport_size(&self) -> Vec2 {
        self.viewport_size
    }

    /// Aktueller Pan-Versatz in Screen-Pixeln.
    pub fn current_pan(&self) -> Vec2 {
        self.current_pan
    }

    /// Ziel-Pan der Auto-Center-Rückführung.
    pub fn target_pan(&self) -> Vec2 {
        self.target_pan
    }

    pub fn pan_state(&self) -> PanState {
        self.pan_state
    }

    /// Läuft die Pan-Rückführung noch?
    pub fn is_easing(&self) -> bool {
        self.current_pan != self.target_pan
    }

    pub fn set_viewport_size(&mut self, size: Vec2) {
        self.viewport_size = size.max(Vec2::ZERO);
    }

    pub fn half_viewport(&self) -> Vec2 {
        self.viewport_size * 0.5
    }

    /// Läuft gerade eine Pan-Geste?
    pub fn is_panning(&self) -> bool {
        matches!(self.pan_state, PanState::Panning { .. })
    }

    /// Setzt die Skalierung (geclampt) und skaliert den Pan proportional mit.
    ///
    /// Gibt die tatsächlich gesetzte Skalierung zurück.
    pub fn set_scale(&mut self, new_scale: f32) -> f32 {
        let new_scale = clamp_scale(new_scale);
        let ratio = new_scale / self.scale;
        self.current_pan *= ratio;
        self.target_pan *= ratio;
        self.scale = new_scale;
        self.pixels_per_meter = new_scale / REGION_WIDTH_METERS;
        new_scale
    }

    /// Radius der Avatar-Punkte in Screen-Pixeln.
    pub fn dot_radius(&self) -> f32 {
        (DOT_SCALE * self.pixels_per_meter).max(MIN_DOT_RADIUS)
    }

    /// Globale Position → Screen-Position.
    ///
    /// `rotation` ist die Kartenrotation (Blickrichtung oder 0). Z bleibt in
    /// Metern relativ zur Kamera und dient nur der Höhen-Darstellung.
    pub fn world_to_screen(&self, world: DVec3, camera: &CameraState, rotation: f32) -> Vec3 {
        let relative = (world - camera.global_position).as_vec3();
        let mut xy = Vec2::new(relative.x, relative.y) * self.pixels_per_meter;
        if rotation != 0.0 {
            xy = Mat2::from_angle(-rotation) * xy;
        }
        xy += self.half_viewport() + self.current_pan;
        Vec3::new(xy.x, xy.y, relative.z)
    }

    /// Screen-Position → globale Position (z = 0).
    ///
    /// Exakte Umkehrung von [`ViewState::world_to_screen`] in der XY-Ebene.
    pub fn screen_to_world(&self, screen: Vec2, camera: &CameraState, rotation: f32) -> DVec3 {
        let mut xy = screen - self.half_viewport() - self.current_pan;
        if rotation != 0.0 {
            xy = Mat2::from_angle(rotation) * xy;
        }
        xy /= self.pixels_per_meter;
        DVec3::new(
            camera.global_position.x + xy.x as f64,
            camera.global_position.y + xy.y as f64,
            0.0,
        )
    }

    /// Weltpunkt unter der Viewport-Mitte (z = Kamerahöhe).
    pub fn view_center_global(&self, camera: &CameraState, rotation: f32) -> DVec3 {
        let mut center = self.screen_to_world(self.half_viewport(), camera, rotation);
        center.z = camera.global_position.z;
        center
    }

    /// Führt `current_pan` weich an `target_pan` heran.
    pub fn ease_pan(&mut self, dt: f32) {
        if dt <= 0.0 {
            return;
        }
        let t = 1.0 - 0.5f32.powf(dt / PAN_EASE_TIME_CONSTANT_SECS);
        self.current_pan = self.current_pan.lerp(self.target_pan, t);
        if self.current_pan.distance_squared(self.target_pan) < 0.01 {
            self.current_pan = self.target_pan;
        }
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(crate::shared::MAP_SCALE_DEFAULT, Vec2::new(200.0, 200.0))
    }
}

/// Begrenzt eine Skalierung auf den erlaubten Bereich (NaN → Minimum).
fn clamp_scale(scale: f32) -> f32 {
    if scale.is_nan() {
        return MAP_SCALE_MIN;
    }
    scale.clamp(MAP_SCALE_MIN, MAP_SCALE_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn camera() -> CameraState {
        CameraState::new(DVec3::new(256_128.0, 256_064.0, 25.0))
    }

    #[test]
    fn test_set_scale_clamps() {
        let mut view = ViewState::default();
        assert_eq!(view.set_scale(1.0), MAP_SCALE_MIN);
        assert_eq!(view.set_scale(1.0e9), MAP_SCALE_MAX);
        assert_eq!(view.set_scale(f32::NAN), MAP_SCALE_MIN);
        assert_eq!(view.set_scale(f32::INFINITY), MAP_SCALE_MAX);
        assert_relative_eq!(view.pixels_per_meter(), MAP_SCALE_MAX / 256.0);
    }

    #[test]
    fn test_set_scale_rescales_pan() {
        let mut view = ViewState::new(128.0, Vec2::new(200.0, 200.0));
        view.current_pan = Vec2::new(10.0, -4.0);
        view.set_scale(256.0);
        assert_relative_eq!(view.current_pan.x, 20.0);
        assert_relative_eq!(view.current_pan.y, -8.0);
    }

    #[test]
    fn test_camera_maps_to_viewport_center() {
        let view = ViewState::new(256.0, Vec2::new(200.0, 100.0));
        let cam = camera();
        let screen = view.world_to_screen(cam.global_position, &cam, 0.0);
        assert_relative_eq!(screen.x, 100.0);
        assert_relative_eq!(screen.y, 50.0);
        assert_relative_eq!(screen.z, 0.0);
    }

    #[test]
    fn test_world_to_screen_scales_and_keeps_z_in_meters() {
        // 256 px pro Region → 1 px pro Meter
        let view = ViewState::new(256.0, Vec2::new(200.0, 200.0));
        let cam = camera();
        let world = cam.global_position + DVec3::new(10.0, -20.0, 7.5);
        let screen = view.world_to_screen(world, &cam, 0.0);
        assert_relative_eq!(screen.x, 110.0);
        assert_relative_eq!(screen.y, 80.0);
        assert_relative_eq!(screen.z, 7.5);
    }

    #[test]
    fn test_rotation_turns_heading_up() {
        let view = ViewState::new(256.0, Vec2::new(200.0, 200.0));
        let cam = camera().with_heading(std::f32::consts::FRAC_PI_2);
        // Kamera blickt nach Westen; ein Punkt westlich muss oberhalb liegen
        let world = cam.global_position + DVec3::new(-10.0, 0.0, 0.0);
        let screen = view.world_to_screen(world, &cam, cam.heading);
        assert_relative_eq!(screen.x, 100.0, epsilon = 1e-3);
        assert_relative_eq!(screen.y, 110.0, epsilon = 1e-3);
    }

    #[test]
    fn test_screen_world_roundtrip_with_rotation_and_pan() {
        let mut view = ViewState::new(300.0, Vec2::new(240.0, 180.0));
        view.current_pan = Vec2::new(-13.0, 27.5);
        let cam = camera().with_heading(0.7);

        for &(x, y) in &[(0.0, 0.0), (120.0, 90.0), (239.0, 5.0), (17.5, 170.25)] {
            let p = Vec2::new(x, y);
            let world = view.screen_to_world(p, &cam, cam.heading);
            assert_eq!(world.z, 0.0);
            let back = view.world_to_screen(world, &cam, cam.heading);
            assert_relative_eq!(back.x, p.x, epsilon = 1e-2);
            assert_relative_eq!(back.y, p.y, epsilon = 1e-2);
        }
    }

    #[test]
    fn test_view_center_follows_pan() {
        let mut view = ViewState::new(256.0, Vec2::new(200.0, 200.0));
        let cam = camera();
        view.current_pan = Vec2::new(30.0, 0.0);
        let center = view.view_center_global(&cam, 0.0);
        // Karte nach rechts verschoben → Mitte zeigt 30 m westlich der Kamera
        assert_relative_eq!(center.x, cam.global_position.x - 30.0);
        assert_relative_eq!(center.y, cam.global_position.y);
        assert_relative_eq!(center.z, cam.global_position.z);
    }

    #[test]
    fn test_dot_radius_has_minimum() {
        let mut view = ViewState::new(MAP_SCALE_MIN, Vec2::new(200.0, 200.0));
        assert_relative_eq!(view.dot_radius(), MIN_DOT_RADIUS);
        view.set_scale(2048.0);
        assert_relative_eq!(view.dot_radius(), DOT_SCALE * 8.0);
    }

    #[test]
    fn test_ease_pan_converges_to_target() {
        let mut view = ViewState::default();
        view.current_pan = Vec2::new(100.0, -50.0);
        view.target_pan = Vec2::ZERO;

        view.ease_pan(PAN_EASE_TIME_CONSTANT_SECS);
        assert_relative_eq!(view.current_pan.x, 50.0, epsilon = 1e-3);

        for _ in 0..60 {
            view.ease_pan(0.05);
        }
        assert_eq!(view.current_pan, Vec2::ZERO);
    }

    #[test]
    fn test_pan_accessors_reflect_easing() {
        let mut view = ViewState::default();
        assert!(!view.is_easing());
        assert_eq!(view.pan_state(), PanState::Idle);

        view.current_pan = Vec2::new(8.0, 0.0);
        assert_eq!(view.current_pan(), Vec2::new(8.0, 0.0));
        assert_eq!(view.target_pan(), Vec2::ZERO);
        assert!(view.is_easing());

        for _ in 0..40 {
            view.ease_pan(0.05);
        }
        assert!(!view.is_easing());
    }
}
