//! Export of decoded assets
//!
//! - `obj` / `mtl` - Wavefront geometry and material libraries
//! - `png` - decoded images and track composites
//! - `listing` - sprite and position side files
//! - `export` - writing whole asset sets to a directory

pub mod export;
pub mod listing;
pub mod mtl;
pub mod obj;
pub mod options;
pub mod png;

pub use export::{
    ExportSummary, ImageLayout, export_images, export_materials, export_objects, export_track,
};
pub use mtl::{UNTEXTURED_MATERIAL, WHITE_TEXTURE, material_name, write_mtl};
pub use obj::{ObjWriter, write_points};
pub use options::ExportOptions;
pub use png::{image_to_png_bytes, tiles_to_raster, white_pixel, write_png};
