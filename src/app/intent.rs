//! Host-Ereignisse als Intents und ihre Zuordnung auf den Compositor.

use glam::Vec2;

use super::compositor::MinimapCompositor;
use crate::core::CameraState;
use crate::shared::MinimapConfiguration;

/// Eingaben des Hosts ohne eigene Mutationslogik.
#[derive(Debug, Clone)]
pub enum MinimapIntent {
    /// Kamera hat sich bewegt oder gedreht
    CameraMoved { camera: CameraState },
    /// Viewport-Größe hat sich geändert
    ViewportResized { size: [f32; 2] },
    /// Maustaste gedrückt (Screen-Koordinaten, Ursprung unten links)
    MouseDown { pos: Vec2, shift: bool },
    /// Maus bewegt
    MouseMove { pos: Vec2 },
    /// Maustaste losgelassen
    MouseUp { pos: Vec2 },
    /// Mausrad-Rasten (positiv = herauszoomen)
    ScrollWheel { pos: Vec2, clicks: f32 },
    /// Skalierung direkt setzen (Pixel pro Regionsbreite)
    ScaleRequested { scale: f32 },
    /// Optionen wurden geändert
    ConfigurationChanged { config: Box<MinimapConfiguration> },
    /// Neue Parzellen-Overlay-Daten eingetroffen
    ParcelDataChanged,
    /// Objekte oder Avatare haben sich geändert
    ObjectsChanged,
}

impl MinimapIntent {
    /// Ändert der Intent den sichtbaren Zustand? Resize allein nicht.
    pub fn is_meaningful(&self) -> bool {
        !matches!(self, Self::ViewportResized { .. })
    }
}

impl MinimapCompositor {
    /// Verarbeitet einen Intent. Gibt zurück, ob er verbraucht wurde.
    pub fn handle_intent(&mut self, intent: MinimapIntent) -> bool {
        log::trace!("Minimap-Intent: {:?}", intent);
        match intent {
            MinimapIntent::CameraMoved { camera } => {
                self.set_camera(camera);
                true
            }
            MinimapIntent::ViewportResized { size } => {
                self.set_viewport_size(Vec2::from(size));
                true
            }
            MinimapIntent::MouseDown { pos, shift } => self.mouse_down(pos, shift),
            MinimapIntent::MouseMove { pos } => self.mouse_move(pos),
            MinimapIntent::MouseUp { pos } => self.mouse_up(pos),
            MinimapIntent::ScrollWheel { pos, clicks } => self.scroll_wheel(pos, clicks),
            MinimapIntent::ScaleRequested { scale } => {
                self.set_scale(scale);
                true
            }
            MinimapIntent::ConfigurationChanged { config } => {
                self.set_configuration(*config);
                true
            }
            MinimapIntent::ParcelDataChanged => {
                self.invalidate_parcels();
                true
            }
            MinimapIntent::ObjectsChanged => {
                self.invalidate_objects();
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::WorldSnapshot;
    use std::time::Instant;

    #[test]
    fn test_intents_drive_compositor() {
        let world = WorldSnapshot::demo();
        let mut compositor =
            MinimapCompositor::new(MinimapConfiguration::default(), Vec2::new(100.0, 100.0));

        assert!(compositor.handle_intent(MinimapIntent::CameraMoved {
            camera: world.camera
        }));
        assert_eq!(compositor.camera(), &world.camera);

        compositor.handle_intent(MinimapIntent::ViewportResized {
            size: [300.0, 200.0],
        });
        assert_eq!(compositor.viewport_size(), Vec2::new(300.0, 200.0));

        compositor.update(&world, Instant::now());
        assert!(compositor.handle_intent(MinimapIntent::ParcelDataChanged));
        assert!(compositor.parcel_layer().is_dirty());
        assert!(!compositor.object_layer().is_dirty());
    }

    #[test]
    fn test_plain_click_not_consumed() {
        let mut compositor =
            MinimapCompositor::new(MinimapConfiguration::default(), Vec2::new(100.0, 100.0));
        assert!(!compositor.handle_intent(MinimapIntent::MouseDown {
            pos: Vec2::new(5.0, 5.0),
            shift: false,
        }));
        assert!(!MinimapIntent::ViewportResized { size: [1.0, 1.0] }.is_meaningful());
    }
}
