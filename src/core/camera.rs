//! Kamera-Zustand, wie ihn der Host pro Frame meldet.

use glam::{DVec3, Vec2};
use serde::{Deserialize, Serialize};

/// Position und Blickrichtung der Weltkamera.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraState {
    /// Globale Kameraposition (Meter, doppelt genau)
    pub global_position: DVec3,
    /// Blickrichtung in Radiant, gegen den Uhrzeigersinn ab Norden (+Y)
    pub heading: f32,
    /// Horizontaler Öffnungswinkel in Radiant
    pub horizontal_fov: f32,
    /// Sichtweite in Metern
    pub far_clip_meters: f32,
}

impl CameraState {
    /// Erstellt eine Kamera an einer globalen Position mit Blick nach Norden.
    pub fn new(global_position: DVec3) -> Self {
        Self {
            global_position,
            ..Self::default()
        }
    }

    /// Setzt die Blickrichtung.
    pub fn with_heading(mut self, heading: f32) -> Self {
        self.heading = heading;
        self
    }

    /// Horizontale Blickrichtung als Einheitsvektor (Welt-XY).
    pub fn look_direction(&self) -> Vec2 {
        Vec2::new(-self.heading.sin(), self.heading.cos())
    }
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            global_position: DVec3::ZERO,
            heading: 0.0,
            horizontal_fov: 60f32.to_radians(),
            far_clip_meters: 64.0,
        }
    }
}
