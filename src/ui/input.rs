//! Viewport-Input: egui-Zeigerereignisse → `MinimapIntent`.
//!
//! egui liefert Positionen mit y nach unten relativ zum Fenster. Die
//! Minimap erwartet Viewport-Koordinaten mit Ursprung unten links.

use glam::Vec2;

use crate::app::MinimapIntent;

/// Pixel Scroll-Weg pro Mausrad-Raste.
const SCROLL_PIXELS_PER_CLICK: f32 = 50.0;

/// Wandelt eine egui-Position in Minimap-Screen-Koordinaten um.
pub fn egui_to_minimap(pos: egui::Pos2, rect: egui::Rect) -> Vec2 {
    Vec2::new(pos.x - rect.min.x, rect.max.y - pos.y)
}

/// Merkt sich Viewport-Größe und Maustasten-Zustand zwischen Frames.
#[derive(Debug, Default)]
pub struct InputState {
    last_viewport_size: Option<[f32; 2]>,
    primary_held: bool,
    last_pointer: Option<Vec2>,
}

impl InputState {
    /// Erstellt einen neuen, leeren Input-Zustand.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sammelt die Intents des Minimap-Viewports für diesen Frame.
    pub fn collect_viewport_events(
        &mut self,
        ui: &egui::Ui,
        response: &egui::Response,
    ) -> Vec<MinimapIntent> {
        let mut events = Vec::new();
        let rect = response.rect;

        let size = [rect.width(), rect.height()];
        if self.last_viewport_size != Some(size) {
            self.last_viewport_size = Some(size);
            events.push(MinimapIntent::ViewportResized { size });
        }

        let (pressed, released, shift, scroll, latest) = ui.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
                i.modifiers.shift,
                i.smooth_scroll_delta.y,
                i.pointer.latest_pos(),
            )
        });
        let pointer = latest.map(|p| egui_to_minimap(p, rect));

        if pressed && response.hovered() {
            if let Some(pos) = pointer {
                self.primary_held = true;
                events.push(MinimapIntent::MouseDown { pos, shift });
            }
        }

        if self.primary_held && pointer.is_some() && pointer != self.last_pointer {
            if let Some(pos) = pointer {
                events.push(MinimapIntent::MouseMove { pos });
            }
        }

        if released && self.primary_held {
            self.primary_held = false;
            let pos = pointer.or(self.last_pointer).unwrap_or(Vec2::ZERO);
            events.push(MinimapIntent::MouseUp { pos });
        }

        // egui: positiv = nach oben scrollen = hineinzoomen
        if scroll != 0.0 {
            if let Some(pos) = response.hover_pos().map(|p| egui_to_minimap(p, rect)) {
                events.push(MinimapIntent::ScrollWheel {
                    pos,
                    clicks: -scroll / SCROLL_PIXELS_PER_CLICK,
                });
            }
        }

        self.last_pointer = pointer;
        events
    }
}
