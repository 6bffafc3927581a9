//! Minimap-Compositor für einen Second-Life-Viewer.
//! Core-Funktionalität als Library exportiert für Viewer, Tests und Benchmarks.

pub mod app;
pub mod core;
pub mod render;
pub mod shared;
pub mod ui;

pub use app::{FrameStats, MapHit, MinimapCompositor, MinimapIntent};
pub use crate::core::{
    CameraState, CollisionBitmap, ColorCategory, EntityKind, EntityView, OwnershipCategory,
    PanState, ParcelCell, ParcelOverlay, RegionView, RelativeHeight, ViewState, WorldSnapshot,
    WorldSource,
};
pub use render::{LayerTexture, RasterLayer};
pub use shared::{MinimapColors, MinimapConfiguration};
