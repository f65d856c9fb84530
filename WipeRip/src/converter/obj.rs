//! Wavefront OBJ output
//!
//! Vertex colors have no standard OBJ syntax, so they are written as
//! comments: `#vcolor r g b` for each color and `#fvcolorindex` after each
//! face listing its corners' color indices.

use std::io::Write;

use glam::IVec3;

use super::mtl::material_name;
use crate::error::Result;
use crate::mesh::{Material, MeshFace, ReconstructedMesh};

/// Streams meshes into one OBJ file.
///
/// Position, UV and color indices continue across every mesh written, so a
/// file may hold many objects.
pub struct ObjWriter<W: Write> {
    out: W,
    material_prefix: String,
    write_materials: bool,
    positions_written: usize,
    uvs_written: usize,
    colors_written: usize,
}

impl<W: Write> ObjWriter<W> {
    /// `material_prefix` names texture materials; with `write_materials` off
    /// no `mtllib` or `usemtl` lines are written.
    pub fn new(out: W, material_prefix: impl Into<String>, write_materials: bool) -> Self {
        Self {
            out,
            material_prefix: material_prefix.into(),
            write_materials,
            positions_written: 0,
            uvs_written: 0,
            colors_written: 0,
        }
    }

    /// Reference a material library.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn mtllib(&mut self, name: &str) -> Result<()> {
        if self.write_materials {
            writeln!(self.out, "mtllib {name}")?;
        }
        Ok(())
    }

    /// Append one mesh as an `o` group.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn write_mesh(&mut self, mesh: &ReconstructedMesh) -> Result<()> {
        writeln!(self.out, "o {}", mesh.name)?;

        for p in &mesh.positions {
            writeln!(self.out, "v {} {} {}", p.x, p.y, p.z)?;
        }
        for uv in &mesh.uvs {
            writeln!(self.out, "vt {:.6} {:.6}", uv.x, uv.y)?;
        }
        for c in &mesh.colors {
            writeln!(self.out, "#vcolor {} {} {}", c.r, c.g, c.b)?;
        }

        writeln!(self.out, "s off")?;

        let mut current: Option<Material> = None;
        for face in &mesh.faces {
            if self.write_materials && current != Some(face.material) {
                writeln!(
                    self.out,
                    "usemtl {}",
                    material_name(face.material, &self.material_prefix)
                )?;
                current = Some(face.material);
            }
            let (indices, colors) = self.face_lines(face);
            writeln!(self.out, "f{indices}")?;
            writeln!(self.out, "#fvcolorindex{colors}")?;
        }

        self.positions_written += mesh.positions.len();
        self.uvs_written += mesh.uvs.len();
        self.colors_written += mesh.colors.len();
        Ok(())
    }

    fn face_lines(&self, face: &MeshFace) -> (String, String) {
        let mut indices = String::new();
        let mut colors = String::new();
        for corner in &face.corners {
            let position = self.positions_written + corner.position + 1;
            let index = match corner.uv {
                Some(uv) => format!(" {position}/{}", self.uvs_written + uv + 1),
                None => format!(" {position}"),
            };
            indices.push_str(&index);
            colors.push_str(&format!(" {}", self.colors_written + corner.color + 1));
        }
        (indices, colors)
    }

    /// Flush and return the underlying writer.
    ///
    /// # Errors
    /// Returns an error if flushing fails.
    pub fn finish(mut self) -> Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}

/// Write a bare point list, one `v` line per point.
///
/// # Errors
/// Returns an error if writing fails.
pub fn write_points<W: Write>(out: &mut W, points: &[IVec3]) -> Result<()> {
    for p in points {
        writeln!(out, "v {} {} {}", p.x, p.y, p.z)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::common::Rgb;
    use crate::mesh::Corner;
    use glam::Vec2;
    use pretty_assertions::assert_eq;

    fn corner(position: usize, uv: Option<usize>, color: usize) -> Corner {
        Corner { position, uv, color }
    }

    fn textured_triangle(name: &str) -> ReconstructedMesh {
        let mut mesh = ReconstructedMesh::new(
            name,
            vec![IVec3::new(0, 0, 0), IVec3::new(1, 0, 0), IVec3::new(0, -1, 2)],
        );
        mesh.uvs = vec![Vec2::new(0.0, 1.0), Vec2::new(0.5, 0.25), Vec2::new(1.0, 0.0)];
        mesh.colors = vec![Rgb::new(255, 128, 0)];
        mesh.faces.push(MeshFace {
            corners: vec![corner(2, Some(2), 0), corner(1, Some(1), 0), corner(0, Some(0), 0)],
            material: Material::Texture(1),
        });
        mesh
    }

    #[test]
    fn test_single_mesh() {
        let mut writer = ObjWriter::new(Vec::new(), "scene_", true);
        writer.mtllib("scene_model.mtl").unwrap();
        writer.write_mesh(&textured_triangle("pylon_0")).unwrap();
        let text = String::from_utf8(writer.finish().unwrap()).unwrap();

        assert_eq!(
            text,
            "mtllib scene_model.mtl\n\
             o pylon_0\n\
             v 0 0 0\nv 1 0 0\nv 0 -1 2\n\
             vt 0.000000 1.000000\nvt 0.500000 0.250000\nvt 1.000000 0.000000\n\
             #vcolor 255 128 0\n\
             s off\n\
             usemtl scene_1\n\
             f 3/3 2/2 1/1\n\
             #fvcolorindex 1 1 1\n"
        );
    }

    #[test]
    fn test_indices_continue_across_meshes() {
        let mut untextured = ReconstructedMesh::new("flat_1", vec![IVec3::ZERO; 4]);
        untextured.colors = vec![Rgb::default(); 4];
        untextured.faces.push(MeshFace {
            corners: vec![corner(3, None, 3), corner(1, None, 1), corner(0, None, 0), corner(2, None, 2)],
            material: Material::Untextured,
        });

        let mut writer = ObjWriter::new(Vec::new(), "scene_", true);
        writer.write_mesh(&textured_triangle("pylon_0")).unwrap();
        writer.write_mesh(&untextured).unwrap();
        let text = String::from_utf8(writer.finish().unwrap()).unwrap();

        assert!(text.contains("usemtl dummy\nf 7 5 4 6\n#fvcolorindex 5 3 2 4\n"));
    }

    #[test]
    fn test_material_lines_only_on_change() {
        let mut mesh = textured_triangle("a");
        let face = mesh.faces[0].clone();
        mesh.faces.push(face);
        let mut writer = ObjWriter::new(Vec::new(), "x_", true);
        writer.write_mesh(&mesh).unwrap();
        let text = String::from_utf8(writer.finish().unwrap()).unwrap();
        assert_eq!(text.matches("usemtl").count(), 1);
    }

    #[test]
    fn test_without_materials() {
        let mut writer = ObjWriter::new(Vec::new(), "x_", false);
        writer.mtllib("x_model.mtl").unwrap();
        writer.write_mesh(&textured_triangle("a")).unwrap();
        let text = String::from_utf8(writer.finish().unwrap()).unwrap();
        assert!(!text.contains("mtllib"));
        assert!(!text.contains("usemtl"));
        assert!(text.contains("f 3/3 2/2 1/1\n"));
    }

    #[test]
    fn test_points() {
        let mut out = Vec::new();
        write_points(&mut out, &[IVec3::new(1, 2, 3), IVec3::new(-4, 5, -6)]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "v 1 2 3\nv -4 5 -6\n");
    }

    #[test]
    fn test_face_lines_per_corner_colors() {
        let mut mesh = ReconstructedMesh::new("quad_0", vec![IVec3::ZERO; 4]);
        mesh.uvs = vec![Vec2::ZERO; 4];
        mesh.colors = vec![Rgb::default(); 4];
        mesh.faces.push(MeshFace {
            corners: vec![corner(3, Some(3), 3), corner(1, Some(1), 1), corner(0, Some(0), 0), corner(2, Some(2), 2)],
            material: Material::Texture(0),
        });

        let mut writer = ObjWriter::new(Vec::new(), "q_", true);
        writer.write_mesh(&textured_triangle("first")).unwrap();
        writer.write_mesh(&mesh).unwrap();
        let text = String::from_utf8(writer.finish().unwrap()).unwrap();
        assert!(text.ends_with("usemtl q_0\nf 7/7 5/5 4/4 6/6\n#fvcolorindex 5 3 2 4\n"));
    }
}
