//! Gecachter Raster-Layer mit eigenem Zentrum und eigener Invalidierung.
//!
//! Jeder Layer besitzt einen Arbeits-Puffer und eine committete Textur.
//! Ein Rebuild löscht den Arbeits-Puffer, zeichnet vollständig neu und
//! committet erst danach zusammen mit Zentrum und Texel-Skalierung. Die
//! committete Textur mischt deshalb nie zwei Zentren.

use std::time::{Duration, Instant};

use glam::{DVec3, Vec2};
use minimap_raster::{PixelBuffer, Rgba};

/// Abbildung Welt → Texel für einen Puffer mit Seitenlänge `side`.
fn world_to_texel(global: DVec3, center: DVec3, texels_per_meter: f32, side: u32) -> Vec2 {
    let offset = Vec2::new((global.x - center.x) as f32, (global.y - center.y) as f32);
    offset * texels_per_meter + Vec2::splat(side as f32 * 0.5)
}

/// Für den Renderer freigegebener Layer-Inhalt.
#[derive(Debug, Clone)]
pub struct LayerTexture {
    buffer: PixelBuffer,
    center_global: DVec3,
    texels_per_meter: f32,
    epoch: u64,
}

impl LayerTexture {
    fn empty(side: u32) -> Self {
        Self {
            buffer: PixelBuffer::new(side),
            center_global: DVec3::ZERO,
            texels_per_meter: 0.0,
            epoch: 0,
        }
    }

    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    /// Weltposition, auf die die Textur beim Commit zentriert war.
    pub fn center_global(&self) -> DVec3 {
        self.center_global
    }

    pub fn texels_per_meter(&self) -> f32 {
        self.texels_per_meter
    }

    /// Anzahl bisheriger Commits (0 = noch nie gezeichnet).
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Globale Position → Texel-Koordinate dieser Textur.
    pub fn world_to_texel(&self, global: DVec3) -> Vec2 {
        world_to_texel(
            global,
            self.center_global,
            self.texels_per_meter,
            self.buffer.side(),
        )
    }

    /// Nearest-Sample an einer globalen Position (None außerhalb/ungezeichnet).
    pub fn sample(&self, global: DVec3) -> Option<Rgba<u8>> {
        if self.epoch == 0 {
            return None;
        }
        let texel = self.world_to_texel(global).floor();
        self.buffer.get_pixel(texel.x as i32, texel.y as i32)
    }
}

/// Zeichenfläche während eines Rebuilds.
pub struct LayerCanvas<'a> {
    buffer: &'a mut PixelBuffer,
    center_global: DVec3,
    texels_per_meter: f32,
}

impl LayerCanvas<'_> {
    pub fn buffer(&mut self) -> &mut PixelBuffer {
        &mut *self.buffer
    }

    pub fn side(&self) -> u32 {
        self.buffer.side()
    }

    pub fn center_global(&self) -> DVec3 {
        self.center_global
    }

    pub fn texels_per_meter(&self) -> f32 {
        self.texels_per_meter
    }

    /// Globale Position → Texel-Koordinate (kontinuierlich).
    pub fn world_to_texel(&self, global: DVec3) -> Vec2 {
        world_to_texel(
            global,
            self.center_global,
            self.texels_per_meter,
            self.buffer.side(),
        )
    }

    /// Globale Position → ganzzahliger Texel-Index.
    pub fn world_to_texel_index(&self, global: DVec3) -> (i32, i32) {
        let texel = self.world_to_texel(global).floor();
        (texel.x as i32, texel.y as i32)
    }

    /// Halbe Kantenlänge des abgedeckten Bereichs in Metern.
    pub fn half_extent_meters(&self) -> f64 {
        if self.texels_per_meter <= 0.0 {
            return 0.0;
        }
        (self.side() as f64 * 0.5) / self.texels_per_meter as f64
    }
}

/// Ein Cache-Eintrag der Minimap (Objekte oder Parzellen).
#[derive(Debug)]
pub struct RasterLayer {
    name: &'static str,
    working: PixelBuffer,
    committed: LayerTexture,
    center_global: DVec3,
    texels_per_meter: f32,
    dirty: bool,
    last_rebuild: Option<Instant>,
    allocations: u64,
}

impl RasterLayer {
    /// Erstellt einen Layer mit Seitenlänge `side`. Startet als dirty.
    pub fn new(name: &'static str, side: u32) -> Self {
        Self {
            name,
            working: PixelBuffer::new(side),
            committed: LayerTexture::empty(side),
            center_global: DVec3::ZERO,
            texels_per_meter: 0.0,
            dirty: true,
            last_rebuild: None,
            allocations: 1,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn side(&self) -> u32 {
        self.working.side()
    }

    /// Zentrum des letzten Rebuilds.
    pub fn center_global(&self) -> DVec3 {
        self.center_global
    }

    /// Aktuelle Texel-Skalierung (gilt ab dem nächsten Rebuild).
    pub fn texels_per_meter(&self) -> f32 {
        self.texels_per_meter
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Erzwingt einen vollständigen Neuaufbau beim nächsten Update.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn last_rebuild(&self) -> Option<Instant> {
        self.last_rebuild
    }

    /// Zeit seit dem letzten Rebuild (None = noch nie).
    pub fn elapsed_since_rebuild(&self, now: Instant) -> Option<Duration> {
        self.last_rebuild
            .map(|last| now.saturating_duration_since(last))
    }

    /// Anzahl Puffer-Allokationen seit Erstellung.
    pub fn allocation_count(&self) -> u64 {
        self.allocations
    }

    /// Committete Textur für den Renderer.
    pub fn committed(&self) -> &LayerTexture {
        &self.committed
    }

    /// Passt die Puffergröße an. Alloziert nur, wenn sich die Seitenlänge ändert.
    pub fn ensure_side(&mut self, side: u32) -> bool {
        if side == self.side() {
            return false;
        }
        log::info!(
            "Minimap-Layer '{}': Puffer {}px -> {}px",
            self.name,
            self.side(),
            side
        );
        self.working = PixelBuffer::new(side);
        self.allocations += 1;
        self.dirty = true;
        true
    }

    /// Berechnet die Texel-Skalierung: der Puffer deckt die Viewport-Diagonale ab.
    pub fn update_texels_per_meter(&mut self, pixels_per_meter: f32, viewport_diagonal: f32) {
        if viewport_diagonal > 0.0 {
            self.texels_per_meter = self.side() as f32 * pixels_per_meter / viewport_diagonal;
        }
        self.dirty = true;
    }

    /// Löscht, zeichnet über `draw` und committet in einem Schritt.
    pub fn rebuild<R>(
        &mut self,
        center_global: DVec3,
        now: Instant,
        draw: impl FnOnce(&mut LayerCanvas<'_>) -> R,
    ) -> R {
        self.center_global = center_global;
        self.working.clear();

        let result = {
            let mut canvas = LayerCanvas {
                buffer: &mut self.working,
                center_global,
                texels_per_meter: self.texels_per_meter,
            };
            draw(&mut canvas)
        };

        self.committed.buffer.copy_from(&self.working);
        self.committed.center_global = center_global;
        self.committed.texels_per_meter = self.texels_per_meter;
        self.committed.epoch += 1;
        self.dirty = false;
        self.last_rebuild = Some(now);
        result
    }
}
