//! Types for rip operations

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::converter::ExportSummary;
use crate::error::Result;

// ============================================================================
// Progress Types
// ============================================================================

/// Progress callback type for rip operations
pub type RipProgressCallback<'a> = &'a (dyn Fn(&RipProgress) + Sync + Send);

/// Progress information during a rip
#[derive(Debug, Clone)]
pub struct RipProgress {
    /// Current operation phase
    pub phase: RipPhase,
    /// Current step number (1-indexed)
    pub current: usize,
    /// Total number of steps
    pub total: usize,
    /// Asset being processed (if applicable)
    pub current_file: Option<String>,
}

impl RipProgress {
    #[must_use]
    pub fn new(phase: RipPhase, current: usize, total: usize) -> Self {
        Self {
            phase,
            current,
            total,
            current_file: None,
        }
    }

    #[must_use]
    pub fn with_file(phase: RipPhase, current: usize, total: usize, file: impl Into<String>) -> Self {
        Self {
            phase,
            current,
            total,
            current_file: Some(file.into()),
        }
    }

    /// Get the progress percentage (0.0 - 1.0)
    #[must_use]
    pub fn percentage(&self) -> f32 {
        if self.total == 0 {
            1.0
        } else {
            self.current as f32 / self.total as f32
        }
    }
}

/// Phase of a rip operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RipPhase {
    /// Unpacking a container and decoding its images
    UnpackingImages,
    /// Reading track record files
    ReadingTrack,
    /// Writing the track surface
    WritingTrack,
    /// Decoding and writing objects
    WritingObjects,
    /// Operation complete
    Complete,
}

impl RipPhase {
    /// Get a human-readable description of this phase
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::UnpackingImages => "Unpacking images",
            Self::ReadingTrack => "Reading track",
            Self::WritingTrack => "Writing track",
            Self::WritingObjects => "Writing objects",
            Self::Complete => "Complete",
        }
    }
}

// ============================================================================
// Result Types
// ============================================================================

/// Result of a rip
#[derive(Debug, Clone, Default, Serialize)]
pub struct RipReport {
    /// Directory the rip wrote into
    pub output_dir: PathBuf,
    /// Every file written
    pub files: Vec<PathBuf>,
    /// Images decoded from containers
    pub images: usize,
    /// Objects exported
    pub objects: usize,
    /// Faces written across all OBJ files
    pub faces: usize,
    /// Sprites written to listings
    pub sprites: usize,
    /// Non-fatal problems encountered
    pub warnings: Vec<String>,
}

impl RipReport {
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            ..Self::default()
        }
    }

    /// Fold an export summary into the report
    pub fn absorb(&mut self, summary: ExportSummary) {
        self.files.extend(summary.files);
        self.faces += summary.faces;
        self.sprites += summary.sprites;
        self.warnings.extend(summary.warnings);
    }

    /// Write the report as pretty-printed JSON.
    ///
    /// # Errors
    /// Returns an error if serialization or writing fails.
    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
