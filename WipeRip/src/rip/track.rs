//! Ripping a track directory

use std::path::{Path, PathBuf};

use tracing::info;

use super::assets::{export_object_set, load_images};
use super::{RipPhase, RipProgress, RipProgressCallback, RipReport};
use crate::converter::{
    ExportOptions, ExportSummary, ImageLayout, export_images, export_materials, export_track,
};
use crate::error::Result;
use crate::formats::prm::read_objects;
use crate::formats::track::{Game, TrackFiles, read_track};
use crate::mesh::{reconstruct_sections, reconstruct_track};
use crate::utils::require_file;

/// Output folder for the track surface.
pub const TRACK_DIR: &str = "ripped_track";
/// Output folder for scenery objects.
pub const OBJECTS_DIR: &str = "ripped_objects";
/// Output folder for the sky.
pub const SKY_DIR: &str = "ripped_sky";

/// Every input of a track directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackInputs {
    pub library: PathBuf,
    pub scene_images: PathBuf,
    pub sky_images: PathBuf,
    pub scene_objects: PathBuf,
    pub sky_objects: PathBuf,
    pub track: TrackFiles,
}

impl TrackInputs {
    /// Locate all inputs in `dir`.
    ///
    /// # Errors
    /// Returns [`Error::MissingInput`](crate::Error::MissingInput) for the
    /// first file that is missing.
    pub fn in_dir<P: AsRef<Path>>(dir: P, game: Game) -> Result<Self> {
        let dir = dir.as_ref();
        Ok(Self {
            library: require_file(dir, "LIBRARY.CMP")?,
            scene_images: require_file(dir, "SCENE.CMP")?,
            sky_images: require_file(dir, "SKY.CMP")?,
            scene_objects: require_file(dir, "SCENE.PRM")?,
            sky_objects: require_file(dir, "SKY.PRM")?,
            track: TrackFiles::in_dir(dir, game)?,
        })
    }
}

/// Rip a track directory into `output`.
///
/// # Errors
/// Returns an error if an input is missing or an output cannot be written.
pub fn rip_track<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    game: Game,
    options: &ExportOptions,
) -> Result<RipReport> {
    rip_track_with_progress(input, output, game, options, &|_| {})
}

/// Rip a track directory into `output` with progress callback
///
/// # Errors
/// Returns an error if an input is missing or an output cannot be written.
pub fn rip_track_with_progress<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    game: Game,
    options: &ExportOptions,
    progress: RipProgressCallback,
) -> Result<RipReport> {
    const STEPS: usize = 4;
    let output = output.as_ref();
    info!("Ripping {} track from {:?}", game, input.as_ref());

    let inputs = TrackInputs::in_dir(&input, game)?;
    let mut report = RipReport::new(output);

    progress(&RipProgress::with_file(RipPhase::UnpackingImages, 1, STEPS, "LIBRARY.CMP"));
    let library = load_images(&inputs.library)?;
    report.images += library.len();

    progress(&RipProgress::with_file(RipPhase::ReadingTrack, 2, STEPS, "TRACK"));
    let track = read_track(&inputs.track, &library)?;

    progress(&RipProgress::with_file(RipPhase::WritingTrack, 3, STEPS, TRACK_DIR));
    let mut summary = ExportSummary::default();
    let track_dir = output.join(TRACK_DIR);
    std::fs::create_dir_all(&track_dir)?;
    export_images(&track.images, &track_dir, "track_", ImageLayout::TileComposite, &mut summary)?;
    if options.write_materials {
        export_materials(&track_dir, "track.mtl", "track_", track.images.len(), &mut summary)?;
    }
    let mesh = reconstruct_track(&track);
    if mesh.stats.invalid_faces > 0 {
        summary.warnings.push(format!(
            "track: {} faces skipped for missing vertices",
            mesh.stats.invalid_faces
        ));
    }
    export_track(
        &mesh,
        &reconstruct_sections(&track),
        &track_dir,
        "track_",
        options,
        &mut summary,
    )?;

    progress(&RipProgress::with_file(RipPhase::WritingObjects, 4, STEPS, "SCENE / SKY"));
    for (images, objects, dir, prefix) in [
        (&inputs.scene_images, &inputs.scene_objects, OBJECTS_DIR, "object_"),
        (&inputs.sky_images, &inputs.sky_objects, SKY_DIR, "sky_"),
    ] {
        let images = load_images(images)?;
        report.images += images.len();
        let objects = read_objects(objects)?;
        report.objects +=
            export_object_set(objects, &images, &output.join(dir), prefix, options, &mut summary)?;
    }

    report.absorb(summary);
    progress(&RipProgress::new(RipPhase::Complete, STEPS, STEPS));
    info!(
        "Track rip complete: {} files, {} objects, {} faces",
        report.files.len(),
        report.objects,
        report.faces
    );
    Ok(report)
}
