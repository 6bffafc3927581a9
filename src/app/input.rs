//! Eingabe-Zustandsmaschine: Shift-Drag-Pan und Mausrad-Zoom.
//!
//! Alle Positionen sind Screen-Koordinaten im Minimap-Viewport
//! (Ursprung unten links).

use glam::Vec2;

use super::compositor::MinimapCompositor;
use crate::core::PanState;
use crate::shared::options::{MAP_SCALE_ZOOM_FACTOR, PAN_DRAG_SLOP_PX};

impl MinimapCompositor {
    /// Maustaste gedrückt. Mit Shift beginnt eine Pan-Geste.
    ///
    /// Gibt zurück, ob das Ereignis verbraucht wurde.
    pub fn mouse_down(&mut self, pos: Vec2, shift: bool) -> bool {
        if !shift {
            return false;
        }
        self.view.pan_state = PanState::Panning {
            origin: pos,
            start_pan: self.view.current_pan,
            dragging: false,
        };
        true
    }

    /// Mausbewegung. Während einer Pan-Geste folgt der Pan der Maus,
    /// sobald der Slop überschritten ist.
    pub fn mouse_move(&mut self, pos: Vec2) -> bool {
        let PanState::Panning {
            origin,
            start_pan,
            dragging,
        } = &mut self.view.pan_state
        else {
            return false;
        };

        if !*dragging && pos.distance(*origin) > PAN_DRAG_SLOP_PX {
            *dragging = true;
        }
        if *dragging {
            let pan = *start_pan + (pos - *origin);
            self.view.current_pan = pan;
            self.view.target_pan = pan;
        }
        true
    }

    /// Maustaste losgelassen. Beendet eine Pan-Geste.
    ///
    /// Mit Auto-Center läuft der Pan danach weich zur Mitte zurück.
    pub fn mouse_up(&mut self, _pos: Vec2) -> bool {
        let PanState::Panning { dragging, .. } = self.view.pan_state else {
            return false;
        };
        self.view.pan_state = PanState::Idle;
        if self.config.auto_center_pan {
            self.view.target_pan = Vec2::ZERO;
        }
        log::debug!(
            "Pan-Geste beendet (gezogen: {}), Pan {:?}",
            dragging,
            self.view.current_pan
        );
        true
    }

    /// Mausrad: `clicks > 0` zoomt heraus, `clicks < 0` hinein.
    ///
    /// Ohne Auto-Center bleibt der Punkt unter dem Cursor stehen.
    pub fn scroll_wheel(&mut self, pos: Vec2, clicks: f32) -> bool {
        if self.view.is_panning() || clicks == 0.0 || !clicks.is_finite() {
            return false;
        }
        let old_scale = self.scale();
        let new_scale = self.set_scale(old_scale * MAP_SCALE_ZOOM_FACTOR.powf(-clicks));

        if !self.config.auto_center_pan {
            let ratio = new_scale / old_scale;
            let offset = pos - self.view.half_viewport();
            self.view.current_pan -= offset * ratio - offset;
            self.view.target_pan = self.view.current_pan;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::MinimapConfiguration;
    use approx::assert_relative_eq;

    fn compositor(auto_center_pan: bool) -> MinimapCompositor {
        let config = MinimapConfiguration {
            auto_center_pan,
            ..MinimapConfiguration::default()
        };
        MinimapCompositor::new(config, Vec2::new(200.0, 200.0))
    }

    #[test]
    fn test_click_without_shift_is_ignored() {
        let mut compositor = compositor(true);
        assert!(!compositor.mouse_down(Vec2::new(10.0, 10.0), false));
        assert!(!compositor.view().is_panning());
        assert!(!compositor.mouse_move(Vec2::new(50.0, 50.0)));
    }

    #[test]
    fn test_drag_below_slop_does_not_pan() {
        let mut compositor = compositor(false);
        compositor.mouse_down(Vec2::new(100.0, 100.0), true);
        compositor.mouse_move(Vec2::new(102.0, 101.0));
        assert_eq!(compositor.view().current_pan(), Vec2::ZERO);
    }

    #[test]
    fn test_drag_pans_and_sticks_without_auto_center() {
        let mut compositor = compositor(false);
        compositor.mouse_down(Vec2::new(100.0, 100.0), true);
        compositor.mouse_move(Vec2::new(120.0, 90.0));
        assert_eq!(compositor.view().current_pan(), Vec2::new(20.0, -10.0));
        assert!(compositor.mouse_up(Vec2::new(120.0, 90.0)));
        assert!(!compositor.view().is_panning());
        assert_eq!(compositor.view().target_pan(), Vec2::new(20.0, -10.0));
    }

    #[test]
    fn test_mouse_up_with_auto_center_targets_zero() {
        let mut compositor = compositor(true);
        compositor.mouse_down(Vec2::new(100.0, 100.0), true);
        compositor.mouse_move(Vec2::new(140.0, 100.0));
        compositor.mouse_up(Vec2::new(140.0, 100.0));
        assert_eq!(compositor.view().current_pan(), Vec2::new(40.0, 0.0));
        assert_eq!(compositor.view().target_pan(), Vec2::ZERO);
    }

    #[test]
    fn test_scroll_positive_zooms_out() {
        let mut compositor = compositor(true);
        let before = compositor.scale();
        compositor.scroll_wheel(Vec2::new(100.0, 100.0), 1.0);
        assert_relative_eq!(compositor.scale(), before / MAP_SCALE_ZOOM_FACTOR);
    }

    #[test]
    fn test_zoom_to_cursor_keeps_point_fixed() {
        let mut compositor = compositor(false);
        let cursor = Vec2::new(150.0, 60.0);
        let before = compositor.screen_to_world(cursor);
        compositor.scroll_wheel(cursor, -5.0);
        let after = compositor.screen_to_world(cursor);
        assert_relative_eq!(before.x, after.x, epsilon = 1e-2);
        assert_relative_eq!(before.y, after.y, epsilon = 1e-2);
    }

    #[test]
    fn test_scroll_ignored_while_panning() {
        let mut compositor = compositor(true);
        compositor.mouse_down(Vec2::new(100.0, 100.0), true);
        let before = compositor.scale();
        assert!(!compositor.scroll_wheel(Vec2::new(100.0, 100.0), 3.0));
        assert_eq!(compositor.scale(), before);
    }
}
