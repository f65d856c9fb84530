//! Export options

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::formats::prm::PositionMode;
use crate::mesh::MeshOptions;

/// Options controlling what an export writes.
///
/// Can be loaded from a TOML file; missing keys keep their defaults:
///
/// ```toml
/// merge_objects = false
/// suppress_degenerates = true
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Write all objects of a file into one OBJ instead of one OBJ each.
    pub merge_objects: bool,
    /// Drop faces that reference the same vertex more than once.
    pub suppress_degenerates: bool,
    /// Add each object's position to its vertices. When off the offsets are
    /// written to a `_pos.txt` file instead.
    pub bake_position: bool,
    /// Write MTL files, `usemtl` lines and `white.png`.
    pub write_materials: bool,
    /// Write sprite anchors to a `.spr` listing.
    pub include_sprites: bool,
    /// Write track section positions to `sections.obj`.
    pub include_sections: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            merge_objects: true,
            suppress_degenerates: false,
            bake_position: true,
            write_materials: true,
            include_sprites: false,
            include_sections: true,
        }
    }
}

impl ExportOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load options from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Parse options from TOML text.
    ///
    /// # Errors
    /// Returns an error if the text is not valid TOML for these options.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Write one OBJ per object
    #[must_use]
    pub fn per_object(mut self) -> Self {
        self.merge_objects = false;
        self
    }

    #[must_use]
    pub fn with_suppress_degenerates(mut self, suppress: bool) -> Self {
        self.suppress_degenerates = suppress;
        self
    }

    #[must_use]
    pub fn with_bake_position(mut self, bake: bool) -> Self {
        self.bake_position = bake;
        self
    }

    #[must_use]
    pub fn with_materials(mut self, write: bool) -> Self {
        self.write_materials = write;
        self
    }

    #[must_use]
    pub fn with_sprites(mut self, include: bool) -> Self {
        self.include_sprites = include;
        self
    }

    #[must_use]
    pub fn with_sections(mut self, include: bool) -> Self {
        self.include_sections = include;
        self
    }

    /// The reconstruction options these export options imply.
    #[must_use]
    pub fn mesh_options(&self) -> MeshOptions {
        MeshOptions::new()
            .with_suppress_degenerates(self.suppress_degenerates)
            .with_sprites(self.include_sprites)
    }

    #[must_use]
    pub fn position_mode(&self) -> PositionMode {
        if self.bake_position {
            PositionMode::Bake
        } else {
            PositionMode::Separate
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_defaults() {
        let options = ExportOptions::default();
        assert!(options.merge_objects);
        assert!(!options.suppress_degenerates);
        assert_eq!(options.position_mode(), PositionMode::Bake);
        assert_eq!(options.mesh_options(), MeshOptions::default());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let options = ExportOptions::from_toml_str(
            "merge_objects = false\nsuppress_degenerates = true\nbake_position = false\n",
        )
        .unwrap();
        assert!(!options.merge_objects);
        assert!(options.mesh_options().suppress_degenerates);
        assert_eq!(options.position_mode(), PositionMode::Separate);
        assert!(options.write_materials);
        assert!(options.include_sections);
    }

    #[test]
    fn test_bad_toml() {
        let result = ExportOptions::from_toml_str("merge_objects = \"yes\"");
        assert!(matches!(result, Err(Error::ConfigError(_))));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.toml");
        std::fs::write(&path, "include_sprites = true\n").unwrap();
        let options = ExportOptions::from_toml_file(&path).unwrap();
        assert_eq!(options, ExportOptions::new().with_sprites(true));
    }
}
