//! Tastatur-Steuerung der Demo-Kamera.
//!
//! W/S bzw. Pfeil hoch/runter bewegen entlang der Blickrichtung,
//! A/D bzw. links/rechts drehen, Q/E heben und senken. +/- zoomen.

use glam::DVec3;

use crate::app::MinimapIntent;
use crate::core::CameraState;
use crate::shared::options::MAP_SCALE_ZOOM_FACTOR;

/// Laufgeschwindigkeit in Metern pro Sekunde.
const MOVE_SPEED_METERS_PER_SEC: f64 = 24.0;
/// Drehgeschwindigkeit in Radiant pro Sekunde.
const TURN_SPEED_RAD_PER_SEC: f32 = 1.6;

/// Verarbeitet gehaltene Tasten und gibt Intents zurück.
pub fn collect_keyboard_intents(
    ctx: &egui::Context,
    camera: &CameraState,
    scale: f32,
) -> Vec<MinimapIntent> {
    use egui::Key;

    let mut events = Vec::new();
    let (dt, forward, back, left, right, up, down, zoom_in, zoom_out) = ctx.input(|i| {
        (
            i.stable_dt,
            i.key_down(Key::W) || i.key_down(Key::ArrowUp),
            i.key_down(Key::S) || i.key_down(Key::ArrowDown),
            i.key_down(Key::A) || i.key_down(Key::ArrowLeft),
            i.key_down(Key::D) || i.key_down(Key::ArrowRight),
            i.key_down(Key::E),
            i.key_down(Key::Q),
            i.key_pressed(Key::Plus) || i.key_pressed(Key::Equals),
            i.key_pressed(Key::Minus),
        )
    });

    let mut moved = *camera;
    let turn = (left as i32 - right as i32) as f32;
    moved.heading += turn * TURN_SPEED_RAD_PER_SEC * dt;

    let step = (forward as i32 - back as i32) as f64 * MOVE_SPEED_METERS_PER_SEC * dt as f64;
    let lift = (up as i32 - down as i32) as f64 * MOVE_SPEED_METERS_PER_SEC * dt as f64;
    let look = moved.look_direction().as_dvec2();
    moved.global_position += DVec3::new(look.x * step, look.y * step, lift);

    if moved != *camera {
        events.push(MinimapIntent::CameraMoved { camera: moved });
    }
    if zoom_in {
        events.push(MinimapIntent::ScaleRequested {
            scale: scale * MAP_SCALE_ZOOM_FACTOR.powi(8),
        });
    }
    if zoom_out {
        events.push(MinimapIntent::ScaleRequested {
            scale: scale / MAP_SCALE_ZOOM_FACTOR.powi(8),
        });
    }
    events
}
