//! Parzellen-Overlay und Kollisions-Bitmap einer Region.
//!
//! Pro Region liegt ein festes Raster aus 64×64 Zellen à 4 m vor.
//! Jede Zelle ist ein Byte:
//! - Bits 0–2: Besitz-Kategorie
//! - `0x40`: West-Kante ist Grundstücksgrenze
//! - `0x80`: Süd-Kante ist Grundstücksgrenze

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use super::coords::PARCEL_GRID_CELLS_PER_EDGE;

/// Maske der Besitz-Kategorie.
pub const PARCEL_OWNERSHIP_MASK: u8 = 0x07;
/// West-Kante der Zelle ist eine Grundstücksgrenze.
pub const PARCEL_WEST_LINE: u8 = 0x40;
/// Süd-Kante der Zelle ist eine Grundstücksgrenze.
pub const PARCEL_SOUTH_LINE: u8 = 0x80;

/// Anzahl Zellen pro Region.
const CELL_COUNT: usize = PARCEL_GRID_CELLS_PER_EDGE * PARCEL_GRID_CELLS_PER_EDGE;

/// Besitz-Kategorie einer Parzellen-Zelle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnershipCategory {
    Public,
    Owned,
    Group,
    SelfOwned,
    ForSale,
    Auction,
    /// Unbekannter Wert (6, 7) – wird wie fremder Besitz behandelt
    Unknown(u8),
}

impl OwnershipCategory {
    /// Dekodiert die unteren drei Bits eines Overlay-Bytes.
    pub fn from_bits(bits: u8) -> Self {
        match bits & PARCEL_OWNERSHIP_MASK {
            0 => Self::Public,
            1 => Self::Owned,
            2 => Self::Group,
            3 => Self::SelfOwned,
            4 => Self::ForSale,
            5 => Self::Auction,
            other => Self::Unknown(other),
        }
    }

    /// Kodiert die Kategorie zurück in die unteren drei Bits.
    pub fn bits(self) -> u8 {
        match self {
            Self::Public => 0,
            Self::Owned => 1,
            Self::Group => 2,
            Self::SelfOwned => 3,
            Self::ForSale => 4,
            Self::Auction => 5,
            Self::Unknown(bits) => bits & PARCEL_OWNERSHIP_MASK,
        }
    }
}

/// Dekodierte Sicht auf ein Overlay-Byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParcelCell(pub u8);

impl ParcelCell {
    /// Baut ein Overlay-Byte aus Kategorie und Grenz-Flags.
    pub fn new(ownership: OwnershipCategory, south_line: bool, west_line: bool) -> Self {
        let mut bits = ownership.bits();
        if south_line {
            bits |= PARCEL_SOUTH_LINE;
        }
        if west_line {
            bits |= PARCEL_WEST_LINE;
        }
        Self(bits)
    }

    pub fn ownership(self) -> OwnershipCategory {
        OwnershipCategory::from_bits(self.0)
    }

    /// Steht die Zelle zum Verkauf?
    pub fn is_for_sale(self) -> bool {
        self.ownership() == OwnershipCategory::ForSale
    }

    pub fn has_south_line(self) -> bool {
        self.0 & PARCEL_SOUTH_LINE != 0
    }

    pub fn has_west_line(self) -> bool {
        self.0 & PARCEL_WEST_LINE != 0
    }
}

/// Parzellen-Overlay einer Region (Zeile 0 = Süden, zeilenweise).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct ParcelOverlay {
    cells: Vec<u8>,
}

impl ParcelOverlay {
    /// Overlay ohne Grenzen, komplett öffentlich.
    pub fn new() -> Self {
        Self {
            cells: vec![0; CELL_COUNT],
        }
    }

    /// Übernimmt rohe Overlay-Bytes. Die Länge muss 64×64 betragen.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        if bytes.len() != CELL_COUNT {
            bail!(
                "Parzellen-Overlay hat {} Bytes, erwartet {}",
                bytes.len(),
                CELL_COUNT
            );
        }
        Ok(Self { cells: bytes })
    }

    /// Liest eine Zelle. Zeile/Spalte außerhalb des Rasters → öffentliche Zelle.
    pub fn cell(&self, row: usize, col: usize) -> ParcelCell {
        if row >= PARCEL_GRID_CELLS_PER_EDGE || col >= PARCEL_GRID_CELLS_PER_EDGE {
            return ParcelCell(0);
        }
        ParcelCell(self.cells[row * PARCEL_GRID_CELLS_PER_EDGE + col])
    }

    /// Schreibt eine Zelle (ignoriert Indizes außerhalb des Rasters).
    pub fn set_cell(&mut self, row: usize, col: usize, cell: ParcelCell) {
        if row < PARCEL_GRID_CELLS_PER_EDGE && col < PARCEL_GRID_CELLS_PER_EDGE {
            self.cells[row * PARCEL_GRID_CELLS_PER_EDGE + col] = cell.0;
        }
    }

    /// Rohdaten.
    pub fn as_bytes(&self) -> &[u8] {
        &self.cells
    }
}

impl Default for ParcelOverlay {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<Vec<u8>> for ParcelOverlay {
    type Error = anyhow::Error;

    fn try_from(bytes: Vec<u8>) -> Result<Self> {
        Self::from_bytes(bytes)
    }
}

impl From<ParcelOverlay> for Vec<u8> {
    fn from(overlay: ParcelOverlay) -> Self {
        overlay.cells
    }
}

/// Kollisions-Bitmap: ein Bit pro Rasterzelle, LSB zuerst.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct CollisionBitmap {
    bits: Vec<u8>,
}

impl CollisionBitmap {
    /// Anzahl Bytes einer vollständigen Bitmap.
    pub const BYTE_LEN: usize = CELL_COUNT / 8;

    /// Bitmap ohne gesetzte Zellen.
    pub fn new() -> Self {
        Self {
            bits: vec![0; Self::BYTE_LEN],
        }
    }

    /// Übernimmt rohe Bitmap-Bytes. Die Länge muss 512 betragen.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        if bytes.len() != Self::BYTE_LEN {
            bail!(
                "Kollisions-Bitmap hat {} Bytes, erwartet {}",
                bytes.len(),
                Self::BYTE_LEN
            );
        }
        Ok(Self { bits: bytes })
    }

    pub fn is_set(&self, row: usize, col: usize) -> bool {
        if row >= PARCEL_GRID_CELLS_PER_EDGE || col >= PARCEL_GRID_CELLS_PER_EDGE {
            return false;
        }
        let index = row * PARCEL_GRID_CELLS_PER_EDGE + col;
        self.bits[index / 8] & (1 << (index % 8)) != 0
    }

    pub fn set(&mut self, row: usize, col: usize, value: bool) {
        if row >= PARCEL_GRID_CELLS_PER_EDGE || col >= PARCEL_GRID_CELLS_PER_EDGE {
            return;
        }
        let index = row * PARCEL_GRID_CELLS_PER_EDGE + col;
        if value {
            self.bits[index / 8] |= 1 << (index % 8);
        } else {
            self.bits[index / 8] &= !(1 << (index % 8));
        }
    }
}

impl Default for CollisionBitmap {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<Vec<u8>> for CollisionBitmap {
    type Error = anyhow::Error;

    fn try_from(bytes: Vec<u8>) -> Result<Self> {
        Self::from_bytes(bytes)
    }
}

impl From<CollisionBitmap> for Vec<u8> {
    fn from(bitmap: CollisionBitmap) -> Self {
        bitmap.bits
    }
}
