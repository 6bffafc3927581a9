//! CPU-Rendering der Minimap: gecachte Layer und Frame-Komposition.

pub mod compose;
pub mod layer;
pub mod object_layer;
pub mod palette;
pub mod parcel_layer;

pub use compose::{compose, FrameContext};
pub use layer::{LayerCanvas, LayerTexture, RasterLayer};
pub use object_layer::{rasterize_objects, ObjectLayerStats};
pub use parcel_layer::{rasterize_parcels, ParcelLayerStats};
