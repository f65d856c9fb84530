//! Shared steps: container images and object sets

use std::path::Path;

use tracing::{info, warn};

use crate::converter::{
    ExportOptions, ExportSummary, ImageLayout, export_images, export_materials, export_objects,
};
use crate::error::Result;
use crate::formats::cmp::read_container;
use crate::formats::prm::Object;
use crate::formats::tim::{Image, decode_images};
use crate::mesh::{ReconstructedMesh, reconstruct_object};

/// Unpack a `.CMP` container and decode every image in it.
///
/// # Errors
/// Returns an error if the container cannot be read.
pub fn load_images<P: AsRef<Path>>(path: P) -> Result<Vec<Image>> {
    let container = read_container(&path)?;
    let images = decode_images(&container.files);
    info!("{}: {} images", path.as_ref().display(), images.len());
    Ok(images)
}

/// Place and reconstruct every object. Meshes are named `<name>_<index>`.
#[must_use]
pub fn reconstruct_objects(
    objects: Vec<Object>,
    images: &[Image],
    options: &ExportOptions,
) -> Vec<ReconstructedMesh> {
    let mode = options.position_mode();
    let mesh_options = options.mesh_options();
    objects
        .into_iter()
        .enumerate()
        .map(|(index, object)| {
            let placed = object.place(mode);
            let mut mesh = reconstruct_object(&placed, images, &mesh_options);
            mesh.name = format!("{}_{index}", mesh.name);
            mesh
        })
        .collect()
}

/// Write a set of objects with the images they are textured from.
///
/// Creates `dir` if needed. Returns the number of objects written.
///
/// # Errors
/// Returns an error if a file cannot be written.
pub fn export_object_set(
    objects: Vec<Object>,
    images: &[Image],
    dir: &Path,
    prefix: &str,
    options: &ExportOptions,
    summary: &mut ExportSummary,
) -> Result<usize> {
    std::fs::create_dir_all(dir)?;

    export_images(images, dir, prefix, ImageLayout::Raster, summary)?;
    if options.write_materials {
        export_materials(dir, &format!("{prefix}model.mtl"), prefix, images.len(), summary)?;
    }

    let meshes = reconstruct_objects(objects, images, options);
    let missing: usize = meshes.iter().map(|m| m.stats.missing_textures).sum();
    if missing > 0 {
        warn!("{}: {} faces reference missing textures", prefix, missing);
        summary
            .warnings
            .push(format!("{prefix}: {missing} textured faces written without UVs"));
    }
    let invalid: usize = meshes.iter().map(|m| m.stats.invalid_faces).sum();
    if invalid > 0 {
        summary
            .warnings
            .push(format!("{prefix}: {invalid} faces skipped for missing vertices"));
    }

    export_objects(&meshes, dir, prefix, options, summary)?;
    info!("Wrote {} objects to {}", meshes.len(), dir.display());
    Ok(meshes.len())
}
