//! Wavefront MTL output

use std::io::Write;

use crate::error::Result;
use crate::mesh::Material;

/// Material used by untextured faces.
pub const UNTEXTURED_MATERIAL: &str = "dummy";

/// Texture file bound to [`UNTEXTURED_MATERIAL`].
pub const WHITE_TEXTURE: &str = "white.png";

/// Name of a material as written to `usemtl` and `newmtl`.
///
/// Textures and track tiles are both named `<prefix><index>`.
#[must_use]
pub fn material_name(material: Material, prefix: &str) -> String {
    match material {
        Material::Untextured => UNTEXTURED_MATERIAL.to_string(),
        Material::Texture(index) => format!("{prefix}{index}"),
        Material::TrackTile(tile) => format!("{prefix}{tile}"),
    }
}

/// Write one material per image plus the untextured fallback.
///
/// # Errors
/// Returns an error if writing fails.
pub fn write_mtl<W: Write>(out: &mut W, prefix: &str, image_count: usize) -> Result<()> {
    for index in 0..image_count {
        writeln!(out, "newmtl {prefix}{index}")?;
        writeln!(out, "map_Kd {prefix}{index}.png")?;
    }
    writeln!(out, "newmtl {UNTEXTURED_MATERIAL}")?;
    writeln!(out, "map_Kd {WHITE_TEXTURE}")?;
    Ok(())
}
