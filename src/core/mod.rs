//! Core-Domänentypen: Koordinaten, Kamera, Ansicht, Parzellen, Weltsicht.

pub mod camera;
pub mod coords;
pub mod parcel;
pub mod view;
pub mod world;

pub use camera::CameraState;
pub use coords::{PARCEL_GRID_CELLS_PER_EDGE, PARCEL_GRID_STEP_METERS, REGION_WIDTH_METERS};
pub use parcel::{CollisionBitmap, OwnershipCategory, ParcelCell, ParcelOverlay};
pub use view::{PanState, ViewState};
pub use world::{
    ColorCategory, EntityKind, EntityView, RegionView, RelativeHeight, WorldSnapshot, WorldSource,
};
