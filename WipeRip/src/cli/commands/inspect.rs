//! CLI command for inspecting a .PRM file

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;

use crate::formats::prm::{Object, Polygon, read_objects};

#[derive(Debug, Serialize)]
struct ObjectSummary {
    name: String,
    vertices: usize,
    polygons: usize,
    byte_length: usize,
    position: [i32; 3],
    degenerate_faces: usize,
    textures: Vec<u16>,
    kinds: BTreeMap<String, usize>,
}

impl ObjectSummary {
    fn new(object: &Object) -> Self {
        let mut kinds = BTreeMap::new();
        let mut textures = Vec::new();
        let mut degenerate_faces = 0;

        for polygon in &object.polygons {
            let kind = match polygon.kind() {
                Some(kind) => format!("{kind:?}"),
                None => "Unknown".to_string(),
            };
            *kinds.entry(kind).or_insert(0) += 1;

            let (degenerate, texture) = match polygon {
                Polygon::Triangle(face) => {
                    (face.is_degenerate(), face.texturing.as_ref().map(|t| t.texture))
                }
                Polygon::Quad(face) => {
                    (face.is_degenerate(), face.texturing.as_ref().map(|t| t.texture))
                }
                Polygon::Sprite(sprite) => (false, Some(sprite.texture)),
                Polygon::Reserved { .. } | Polygon::Unknown { .. } => (false, None),
            };
            if degenerate {
                degenerate_faces += 1;
            }
            if let Some(texture) = texture {
                textures.push(texture);
            }
        }
        textures.sort_unstable();
        textures.dedup();

        Self {
            name: object.header.name.clone(),
            vertices: object.vertices.len(),
            polygons: object.polygons.len(),
            byte_length: object.byte_length,
            position: object.header.position.to_array(),
            degenerate_faces,
            textures,
            kinds,
        }
    }
}

pub fn execute(source: &Path, output: Option<&Path>) -> anyhow::Result<()> {
    let objects = read_objects(source)?;
    let summaries: Vec<ObjectSummary> = objects.iter().map(ObjectSummary::new).collect();

    if let Some(path) = output {
        let json = serde_json::to_string_pretty(&summaries)?;
        std::fs::write(path, json)?;
        println!("Wrote {} object summaries to {}", summaries.len(), path.display());
        return Ok(());
    }

    println!("{}: {} objects", source.display(), summaries.len());
    println!();
    for (index, summary) in summaries.iter().enumerate() {
        println!(
            "{:>4}  {:<16} {:>5} verts {:>5} polys {:>7} bytes  at {:?}",
            index,
            summary.name,
            summary.vertices,
            summary.polygons,
            summary.byte_length,
            summary.position
        );
        for (kind, count) in &summary.kinds {
            println!("        {kind:<24} {count:>5}");
        }
        if summary.degenerate_faces > 0 {
            println!("        degenerate faces         {:>5}", summary.degenerate_faces);
        }
    }
    Ok(())
}
