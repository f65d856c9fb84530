//! Writing reconstructed meshes and images to an output directory

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use glam::IVec3;
use tracing::{debug, warn};

use super::listing::{write_positions, write_sprites};
use super::mtl::{WHITE_TEXTURE, write_mtl};
use super::obj::{ObjWriter, write_points};
use super::png::{tiles_to_raster, white_pixel, write_png};
use super::ExportOptions;
use crate::error::Result;
use crate::formats::tim::Image;
use crate::mesh::ReconstructedMesh;

/// What an export wrote.
#[derive(Debug, Clone, Default)]
pub struct ExportSummary {
    /// Every file created, in write order.
    pub files: Vec<PathBuf>,
    pub faces: usize,
    pub sprites: usize,
    /// Non-fatal problems, such as images that could not be written.
    pub warnings: Vec<String>,
}

/// Layout of image data being exported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageLayout {
    /// Ordinary row-major images.
    Raster,
    /// Track composites made of concatenated tiles.
    TileComposite,
}

fn create(path: &Path, summary: &mut ExportSummary) -> Result<BufWriter<File>> {
    let file = File::create(path)?;
    summary.files.push(path.to_path_buf());
    Ok(BufWriter::new(file))
}

/// Keep object names usable as file names.
fn file_safe(name: &str) -> String {
    let safe: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
        .collect();
    if safe.is_empty() { "object".to_string() } else { safe }
}

/// Write every image as `<prefix><index>.png`.
///
/// Empty images, left behind by failed decodes, are skipped with a warning
/// so the remaining indices stay aligned with their materials.
///
/// # Errors
/// Returns an error if a file cannot be written.
pub fn export_images(
    images: &[Image],
    dir: &Path,
    prefix: &str,
    layout: ImageLayout,
    summary: &mut ExportSummary,
) -> Result<()> {
    for (index, image) in images.iter().enumerate() {
        let path = dir.join(format!("{prefix}{index}.png"));
        if image.width == 0 || image.height == 0 {
            warn!("Skipping empty image {}", path.display());
            summary
                .warnings
                .push(format!("image {prefix}{index} is empty and was not written"));
            continue;
        }
        match layout {
            ImageLayout::Raster => write_png(image, &path)?,
            ImageLayout::TileComposite => write_png(&tiles_to_raster(image), &path)?,
        }
        summary.files.push(path);
    }
    debug!("Wrote {} images with prefix {}", images.len(), prefix);
    Ok(())
}

/// Write `mtl_name` with one material per image, and `white.png` beside it.
///
/// # Errors
/// Returns an error if a file cannot be written.
pub fn export_materials(
    dir: &Path,
    mtl_name: &str,
    prefix: &str,
    image_count: usize,
    summary: &mut ExportSummary,
) -> Result<()> {
    let mut out = create(&dir.join(mtl_name), summary)?;
    write_mtl(&mut out, prefix, image_count)?;
    out.flush()?;

    let white = dir.join(WHITE_TEXTURE);
    write_png(&white_pixel(), &white)?;
    summary.files.push(white);
    Ok(())
}

/// Write object meshes as `<prefix>model.obj`, or one OBJ per mesh when
/// objects are not merged, plus the position and sprite side files.
///
/// # Errors
/// Returns an error if a file cannot be written.
pub fn export_objects(
    meshes: &[ReconstructedMesh],
    dir: &Path,
    prefix: &str,
    options: &ExportOptions,
    summary: &mut ExportSummary,
) -> Result<()> {
    let mtl_name = format!("{prefix}model.mtl");

    if options.merge_objects {
        let out = create(&dir.join(format!("{prefix}model.obj")), summary)?;
        let mut writer = ObjWriter::new(out, prefix, options.write_materials);
        writer.mtllib(&mtl_name)?;
        for mesh in meshes {
            writer.write_mesh(mesh)?;
        }
        writer.finish()?;

        if !options.bake_position {
            let mut out = create(&dir.join(format!("{prefix}model_pos.txt")), summary)?;
            write_positions(&mut out, meshes)?;
            out.flush()?;
        }
    } else {
        for mesh in meshes {
            let stem = format!("{prefix}{}", file_safe(&mesh.name));
            let out = create(&dir.join(format!("{stem}.obj")), summary)?;
            let mut writer = ObjWriter::new(out, prefix, options.write_materials);
            writer.mtllib(&mtl_name)?;
            writer.write_mesh(mesh)?;
            writer.finish()?;

            if !options.bake_position {
                let mut out = create(&dir.join(format!("{stem}_pos.txt")), summary)?;
                write_positions(&mut out, std::slice::from_ref(mesh))?;
                out.flush()?;
            }
        }
    }

    if options.include_sprites {
        let mut out = create(&dir.join(format!("{prefix}model.spr")), summary)?;
        summary.sprites += write_sprites(&mut out, meshes, prefix)?;
        out.flush()?;
    }

    summary.faces += meshes.iter().map(|m| m.faces.len()).sum::<usize>();
    Ok(())
}

/// Write the track surface as `track.obj` and, when enabled, its sections as
/// `sections.obj`.
///
/// # Errors
/// Returns an error if a file cannot be written.
pub fn export_track(
    mesh: &ReconstructedMesh,
    sections: &[IVec3],
    dir: &Path,
    prefix: &str,
    options: &ExportOptions,
    summary: &mut ExportSummary,
) -> Result<()> {
    let out = create(&dir.join("track.obj"), summary)?;
    let mut writer = ObjWriter::new(out, prefix, options.write_materials);
    writer.mtllib("track.mtl")?;
    writer.write_mesh(mesh)?;
    writer.finish()?;
    summary.faces += mesh.faces.len();

    if options.include_sections {
        let mut out = create(&dir.join("sections.obj"), summary)?;
        write_points(&mut out, sections)?;
        out.flush()?;
    }
    Ok(())
}
