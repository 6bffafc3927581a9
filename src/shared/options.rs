//! Zentrale Konfiguration für den Minimap-Compositor.
//!
//! `MinimapConfiguration` ersetzt verstreute globale Settings-Abfragen
//! im Zeichencode. Sie wird beim Erstellen bzw. per Update übergeben.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use serde::{Deserialize, Serialize};

// ── Skalierung ──────────────────────────────────────────────────────

/// Minimale Skalierung (Pixel pro Regionsbreite).
pub const MAP_SCALE_MIN: f32 = 32.0;
/// Maximale Skalierung (Pixel pro Regionsbreite).
pub const MAP_SCALE_MAX: f32 = 4096.0;
/// Standard-Skalierung beim Start.
pub const MAP_SCALE_DEFAULT: f32 = 128.0;
/// Zoom-Faktor pro Mausrad-Raste (geometrisch, 4 %).
pub const MAP_SCALE_ZOOM_FACTOR: f32 = 1.04;

// ── Punkte ──────────────────────────────────────────────────────────

/// Minimaler Avatar-Punkt-Radius in Screen-Pixeln.
pub const MIN_DOT_RADIUS: f32 = 3.5;
/// Avatar-Punkt-Radius in Metern (wird mit Pixel/Meter skaliert).
pub const DOT_SCALE: f32 = 0.75;
/// Höhendifferenz (Meter), ab der ein Objekt als "darüber"/"darunter" gilt.
pub const HEIGHT_LEVEL_THRESHOLD_METERS: f32 = 8.0;

// ── Cache-Layer ─────────────────────────────────────────────────────

/// Neuaufbau-Intervall des Objekt-Layers in Sekunden.
pub const OBJECT_LAYER_REFRESH_SECS: f32 = 0.5;
/// Horizontale Bewegung (Meter), ab der der Parzellen-Layer neu aufgebaut wird.
pub const PARCEL_LAYER_MOVE_THRESHOLD_METERS: f64 = 3.0;

// ── Pan ─────────────────────────────────────────────────────────────

/// Halbwertszeit der Pan-Rückführung bei Auto-Center (Sekunden).
pub const PAN_EASE_TIME_CONSTANT_SECS: f32 = 0.1;
/// Mausweg in Pixeln, ab dem ein Shift-Klick zum Drag wird.
pub const PAN_DRAG_SLOP_PX: f32 = 3.0;

// ── Farben ──────────────────────────────────────────────────────────

/// Konfigurierbare Farben der Minimap (RGBA, straight alpha).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MinimapColors {
    /// Hintergrund außerhalb bekannter Regionen
    pub background: [u8; 4],
    /// Fallback-Terrainfarbe einer Region ohne Tile
    pub land: [u8; 4],
    /// Multiplikativer Tint für nicht erreichbare Regionen
    pub dead_region_tint: [u8; 4],
    /// Regionsgrenze (Nord/Ost) einer erreichbaren Region
    pub region_border: [u8; 4],
    /// Regionsgrenze einer nicht erreichbaren Region
    pub region_border_warning: [u8; 4],
    /// Parzellen-Grenzlinien
    pub property_line: [u8; 4],
    /// Füllung für Parzellen, die zum Verkauf stehen
    pub for_sale: [u8; 4],
    /// Füllung für Parzellen mit Kollisions-/Bann-Markierung
    pub collision: [u8; 4],
    /// Objekte im eigenen Besitz
    pub object_you_own: [u8; 4],
    /// Objekte im Gruppenbesitz
    pub object_group_own: [u8; 4],
    /// Objekte anderer Besitzer
    pub object_other_own: [u8; 4],
    /// Andere Avatare
    pub avatar: [u8; 4],
    /// Avatare von Freunden
    pub avatar_friend: [u8; 4],
    /// Eigener Standort
    pub self_marker: [u8; 4],
    /// Sichtkegel der Kamera
    pub frustum: [u8; 4],
}

impl Default for MinimapColors {
    fn default() -> Self {
        Self {
            background: [0, 0, 0, 77],
            land: [62, 82, 48, 255],
            dead_region_tint: [255, 128, 128, 255],
            region_border: [255, 255, 255, 128],
            region_border_warning: [255, 64, 64, 255],
            property_line: [255, 255, 0, 166],
            for_sale: [255, 128, 0, 102],
            collision: [255, 0, 0, 77],
            object_you_own: [105, 230, 105, 255],
            object_group_own: [115, 140, 255, 255],
            object_other_own: [150, 150, 150, 255],
            avatar: [0, 255, 0, 255],
            avatar_friend: [255, 255, 0, 255],
            self_marker: [255, 255, 255, 255],
            frustum: [255, 255, 255, 51],
        }
    }
}

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle zur Laufzeit änderbaren Minimap-Optionen.
/// Wird als `sl_minimap.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MinimapConfiguration {
    /// Karte dreht sich mit der Kamera-Blickrichtung
    pub rotate_to_heading: bool,
    /// Pan kehrt nach dem Loslassen automatisch zur Mitte zurück
    pub auto_center_pan: bool,
    /// Zum Verkauf stehende Parzellen einfärben
    pub show_for_sale_parcels: bool,
    /// Parzellen mit Kollisions-/Bann-Markierung einfärben
    pub show_collision_parcels: bool,
    /// Parzellen-Grenzlinien zeichnen
    pub show_property_lines: bool,
    /// Objekt- und Avatar-Punkte zeichnen
    pub show_objects: bool,
    /// Gebackene Karten-Tiles als Regionshintergrund verwenden
    pub use_baked_map_tiles: bool,
    /// Skalierung beim Start (Pixel pro Regionsbreite)
    #[serde(default = "default_initial_scale")]
    pub initial_scale: f32,
    /// Farben
    #[serde(default)]
    pub colors: MinimapColors,
}

impl Default for MinimapConfiguration {
    fn default() -> Self {
        Self {
            rotate_to_heading: false,
            auto_center_pan: true,
            show_for_sale_parcels: false,
            show_collision_parcels: true,
            show_property_lines: true,
            show_objects: true,
            use_baked_map_tiles: true,
            initial_scale: MAP_SCALE_DEFAULT,
            colors: MinimapColors::default(),
        }
    }
}

/// Serde-Default für `initial_scale` (Abwärtskompatibilität).
fn default_initial_scale() -> f32 {
    MAP_SCALE_DEFAULT
}

impl MinimapConfiguration {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Minimap-Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Minimap-Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("sl_minimap"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("sl_minimap.toml")
    }

    /// Prüft, ob sich Optionen geändert haben, die den Parzellen-Layer betreffen.
    pub fn parcel_layer_differs(&self, other: &Self) -> bool {
        self.show_for_sale_parcels != other.show_for_sale_parcels
            || self.show_collision_parcels != other.show_collision_parcels
            || self.show_property_lines != other.show_property_lines
            || self.colors.region_border != other.colors.region_border
            || self.colors.region_border_warning != other.colors.region_border_warning
            || self.colors.property_line != other.colors.property_line
            || self.colors.for_sale != other.colors.for_sale
            || self.colors.collision != other.colors.collision
    }

    /// Prüft, ob sich Optionen geändert haben, die den Objekt-Layer betreffen.
    pub fn object_layer_differs(&self, other: &Self) -> bool {
        self.show_objects != other.show_objects
            || self.colors.object_you_own != other.colors.object_you_own
            || self.colors.object_group_own != other.colors.object_group_own
            || self.colors.object_other_own != other.colors.object_other_own
            || self.colors.avatar != other.colors.avatar
            || self.colors.avatar_friend != other.colors.avatar_friend
    }
}
