//! Schmale, schreibgeschützte Sicht auf den Weltzustand.
//!
//! Der Compositor kennt weder Objektgraph noch Netzwerk. Pro Rebuild fragt
//! er eine [`WorldSource`] nach Regionen und Entitäten; der Host liefert
//! dafür Momentaufnahmen.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use glam::DVec3;
use image::RgbaImage;
use serde::{Deserialize, Serialize};

use super::camera::CameraState;
use super::coords::{PARCEL_GRID_CELLS_PER_EDGE, REGION_WIDTH_METERS};
use super::parcel::{CollisionBitmap, OwnershipCategory, ParcelCell, ParcelOverlay};
use crate::shared::options::HEIGHT_LEVEL_THRESHOLD_METERS;

/// Momentaufnahme einer bekannten Region.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionView {
    /// Anzeigename
    pub name: String,
    /// Globale Süd-West-Ecke
    pub origin: DVec3,
    /// Region erreichbar?
    pub alive: bool,
    /// Parzellen-Overlay (None solange noch nicht empfangen)
    #[serde(default)]
    pub parcel_overlay: Option<ParcelOverlay>,
    /// Kollisions-Bitmap (optional)
    #[serde(default)]
    pub collision: Option<CollisionBitmap>,
    /// Hintergrundfarbe ohne Tile
    #[serde(default)]
    pub terrain_color: Option<[u8; 4]>,
    /// Pfad zum gebackenen Karten-Tile (relativ zur Snapshot-Datei)
    #[serde(default)]
    pub map_tile_path: Option<String>,
    /// Geladenes Karten-Tile (Zeile 0 = Norden)
    #[serde(skip)]
    pub map_tile: Option<Arc<RgbaImage>>,
}

impl RegionView {
    /// Erstellt eine erreichbare Region ohne Overlay-Daten.
    pub fn new(name: impl Into<String>, origin: DVec3) -> Self {
        Self {
            name: name.into(),
            origin,
            alive: true,
            parcel_overlay: None,
            collision: None,
            terrain_color: None,
            map_tile_path: None,
            map_tile: None,
        }
    }

    /// Prüft, ob eine globale Position (XY) in der Region liegt.
    pub fn contains_xy(&self, global: DVec3) -> bool {
        let width = REGION_WIDTH_METERS as f64;
        global.x >= self.origin.x
            && global.y >= self.origin.y
            && global.x < self.origin.x + width
            && global.y < self.origin.y + width
    }
}

/// Art einer Entität.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Object,
    Avatar,
}

/// Farbkategorie einer Entität.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorCategory {
    YouOwn,
    GroupOwn,
    OtherOwn,
    Avatar,
    Friend,
}

/// Höhe relativ zur Kamera (bestimmt den Marker-Footprint).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativeHeight {
    Above,
    Level,
    Below,
}

/// Momentaufnahme eines Objekts oder Avatars.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityView {
    pub id: u64,
    pub kind: EntityKind,
    /// Globale Position
    pub position: DVec3,
    pub category: ColorCategory,
    /// Ungefährer Radius in Metern (nur für Objekte relevant)
    #[serde(default = "default_entity_radius")]
    pub radius_meters: f32,
}

fn default_entity_radius() -> f32 {
    0.5
}

impl EntityView {
    /// Höhenlage relativ zur Kamera-Höhe.
    pub fn height_relative_to(&self, camera_z: f64) -> RelativeHeight {
        let dz = (self.position.z - camera_z) as f32;
        if dz > HEIGHT_LEVEL_THRESHOLD_METERS {
            RelativeHeight::Above
        } else if dz < -HEIGHT_LEVEL_THRESHOLD_METERS {
            RelativeHeight::Below
        } else {
            RelativeHeight::Level
        }
    }
}

/// Lieferant der Weltdaten für einen Rebuild.
pub trait WorldSource {
    /// Alle bekannten Regionen.
    fn regions(&self) -> &[RegionView];
    /// Alle lebenden Entitäten.
    fn entities(&self) -> &[EntityView];

    /// Region, die eine globale Position enthält.
    fn region_at(&self, global: DVec3) -> Option<&RegionView> {
        self.regions().iter().find(|r| r.contains_xy(global))
    }
}

/// Serialisierbare Welt-Momentaufnahme (Demo-Viewer, Tests, Benchmarks).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub regions: Vec<RegionView>,
    pub entities: Vec<EntityView>,
    /// Startkamera
    #[serde(default)]
    pub camera: CameraState,
}

impl WorldSource for WorldSnapshot {
    fn regions(&self) -> &[RegionView] {
        &self.regions
    }

    fn entities(&self) -> &[EntityView] {
        &self.entities
    }
}

impl WorldSnapshot {
    /// Lädt eine Momentaufnahme aus einer JSON-Datei inkl. Karten-Tiles.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Welt-Snapshot nicht lesbar: {}", path.display()))?;
        let mut snapshot: Self = serde_json::from_str(&content)
            .with_context(|| format!("Welt-Snapshot ungültig: {}", path.display()))?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        snapshot.load_map_tiles(base_dir);
        log::info!(
            "Welt-Snapshot geladen: {} Regionen, {} Entitäten",
            snapshot.regions.len(),
            snapshot.entities.len()
        );
        Ok(snapshot)
    }

    /// Speichert die Momentaufnahme als JSON.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Welt-Snapshot nicht schreibbar: {}", path.display()))?;
        Ok(())
    }

    /// Lädt alle referenzierten Karten-Tiles. Fehlende Tiles werden geloggt
    /// und übersprungen; die Region fällt dann auf ihre Terrainfarbe zurück.
    pub fn load_map_tiles(&mut self, base_dir: &Path) -> usize {
        let mut loaded = 0;
        for region in &mut self.regions {
            let Some(tile_path) = &region.map_tile_path else {
                continue;
            };
            let full_path = base_dir.join(tile_path);
            match image::open(&full_path) {
                Ok(img) => {
                    region.map_tile = Some(Arc::new(img.to_rgba8()));
                    loaded += 1;
                }
                Err(e) => log::warn!(
                    "Karten-Tile für '{}' nicht ladbar ({}): {}",
                    region.name,
                    full_path.display(),
                    e
                ),
            }
        }
        loaded
    }

    /// Erzeugt eine deterministische Demo-Welt aus 3×3 Regionen.
    ///
    /// Die Mittelregion hat 64-m-Parzellen, ein Teil steht zum Verkauf und
    /// eine Parzelle ist kollisionsmarkiert. Die Region im Nord-Osten ist
    /// nicht erreichbar; die im Süd-Westen hat noch kein Overlay.
    pub fn demo() -> Self {
        let width = REGION_WIDTH_METERS as f64;
        let base = DVec3::new(1000.0 * width, 1000.0 * width, 0.0);
        let mut regions = Vec::new();

        for ry in 0..3 {
            for rx in 0..3 {
                let origin = base + DVec3::new(rx as f64 * width, ry as f64 * width, 0.0);
                let mut region = RegionView::new(format!("Demo {}-{}", rx, ry), origin);
                let shade = (40 + 12 * ((rx + ry) % 3)) as u8;
                region.terrain_color = Some([shade, shade + 30, shade - 10, 255]);
                region.alive = !(rx == 2 && ry == 2);
                if !(rx == 0 && ry == 0) {
                    region.parcel_overlay = Some(demo_overlay(rx + ry * 3));
                }
                if rx == 1 && ry == 1 {
                    let mut collision = CollisionBitmap::new();
                    for row in 16..32 {
                        for col in 16..32 {
                            collision.set(row, col, true);
                        }
                    }
                    region.collision = Some(collision);
                }
                regions.push(region);
            }
        }

        let center = base + DVec3::new(1.5 * width, 1.5 * width, 30.0);
        let mut entities = Vec::new();
        for i in 0..240u64 {
            // Deterministisch gestreut (goldener Winkel)
            let angle = i as f64 * 2.399_963;
            let radius = 6.0 + (i as f64).sqrt() * 14.0;
            let offset = DVec3::new(
                angle.cos() * radius,
                angle.sin() * radius,
                ((i % 7) as f64 - 3.0) * 6.0,
            );
            let (kind, category) = match i % 12 {
                0 => (EntityKind::Avatar, ColorCategory::Friend),
                1 | 2 => (EntityKind::Avatar, ColorCategory::Avatar),
                3 => (EntityKind::Object, ColorCategory::YouOwn),
                4 | 5 => (EntityKind::Object, ColorCategory::GroupOwn),
                _ => (EntityKind::Object, ColorCategory::OtherOwn),
            };
            entities.push(EntityView {
                id: i + 1,
                kind,
                position: center + offset,
                category,
                radius_meters: 0.5 + (i % 5) as f32,
            });
        }

        Self {
            regions,
            entities,
            camera: CameraState::new(center),
        }
    }
}

/// Overlay mit 64-m-Parzellen; `seed` variiert Verkaufsflächen.
fn demo_overlay(seed: usize) -> ParcelOverlay {
    const PARCEL_CELLS: usize = 16;
    let mut overlay = ParcelOverlay::new();
    for row in 0..PARCEL_GRID_CELLS_PER_EDGE {
        for col in 0..PARCEL_GRID_CELLS_PER_EDGE {
            let parcel_index = (row / PARCEL_CELLS) * 4 + col / PARCEL_CELLS;
            let ownership = if (parcel_index + seed) % 5 == 0 {
                OwnershipCategory::ForSale
            } else if parcel_index % 3 == 0 {
                OwnershipCategory::Group
            } else {
                OwnershipCategory::Owned
            };
            let south = row % PARCEL_CELLS == 0 && row > 0;
            let west = col % PARCEL_CELLS == 0 && col > 0;
            overlay.set_cell(row, col, ParcelCell::new(ownership, south, west));
        }
    }
    overlay
}
