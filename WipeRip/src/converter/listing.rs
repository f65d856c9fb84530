//! Plain-text side files: sprite listings and object positions

use std::io::Write;

use glam::IVec3;

use crate::error::Result;
use crate::formats::prm::SpriteAnchor;
use crate::mesh::ReconstructedMesh;

/// Write every sprite of `meshes` as a numbered `.spr` entry.
///
/// Returns the number of sprites written.
///
/// # Errors
/// Returns an error if writing fails.
pub fn write_sprites<W: Write>(
    out: &mut W,
    meshes: &[ReconstructedMesh],
    texture_prefix: &str,
) -> Result<usize> {
    let mut count = 0;
    for sprite in meshes.iter().flat_map(|m| &m.sprites) {
        let p = sprite.position;
        let c = sprite.color;
        writeln!(out, "o sprite_{count}")?;
        writeln!(out, "v {} {} {}", p.x, p.y, p.z)?;
        writeln!(out, "# color:{} {} {}", c.r, c.g, c.b)?;
        writeln!(out, "# texture:{texture_prefix}{}", sprite.texture)?;
        writeln!(out, "# width:{}", sprite.width)?;
        writeln!(out, "# height:{}", sprite.height)?;
        let anchor = match sprite.anchor {
            SpriteAnchor::Top => "top",
            SpriteAnchor::Bottom => "bottom",
        };
        writeln!(out, "# anchor:{anchor}")?;
        count += 1;
    }
    Ok(count)
}

/// Write one `x y z` line per mesh with the offset it still needs.
///
/// # Errors
/// Returns an error if writing fails.
pub fn write_positions<W: Write>(out: &mut W, meshes: &[ReconstructedMesh]) -> Result<()> {
    for mesh in meshes {
        let p = mesh.offset.unwrap_or(IVec3::ZERO);
        writeln!(out, "{} {} {}", p.x, p.y, p.z)?;
    }
    Ok(())
}
