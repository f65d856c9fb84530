//! Ripping a folder of common data
//!
//! Each `NAME.CMP` goes to `ripped_NAME/` with prefix `NAME_`, together with
//! `NAME.PRM` when one exists. A `.PRM` with no container is exported
//! untextured.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{info, warn};
use walkdir::WalkDir;

use super::assets::{export_object_set, load_images};
use super::{RipPhase, RipProgress, RipProgressCallback, RipReport};
use crate::converter::{ExportOptions, ExportSummary, ImageLayout, export_images};
use crate::error::Result;
use crate::formats::prm::read_objects;
use crate::utils::{asset_stem, has_extension};

/// Containers and object files found in one folder, paired by stem.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetPair {
    pub images: Option<PathBuf>,
    pub objects: Option<PathBuf>,
}

/// Scan `dir` (not recursively) for `.CMP` and `.PRM` files.
///
/// # Errors
/// Returns an error if the directory cannot be read.
pub fn scan_assets<P: AsRef<Path>>(dir: P) -> Result<BTreeMap<String, AssetPair>> {
    let mut assets: BTreeMap<String, AssetPair> = BTreeMap::new();
    for entry in WalkDir::new(dir.as_ref()).min_depth(1).max_depth(1) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let Some(stem) = asset_stem(path) else {
            continue;
        };
        if has_extension(path, "CMP") {
            assets.entry(stem).or_default().images = Some(path.to_path_buf());
        } else if has_extension(path, "PRM") {
            assets.entry(stem).or_default().objects = Some(path.to_path_buf());
        }
    }
    Ok(assets)
}

/// Rip every asset in `input` into `output`.
///
/// # Errors
/// Returns an error if the input folder cannot be scanned. Failures of
/// single assets are recorded in the report's warnings.
pub fn rip_common<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    options: &ExportOptions,
) -> Result<RipReport> {
    rip_common_with_progress(input, output, options, &|_| {})
}

/// Rip every asset in `input` into `output` with progress callback
///
/// # Errors
/// Returns an error if the input folder cannot be scanned.
pub fn rip_common_with_progress<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    options: &ExportOptions,
    progress: RipProgressCallback,
) -> Result<RipReport> {
    let output = output.as_ref();
    let assets = scan_assets(&input)?;
    let total = assets.len();
    info!("Found {} assets in {:?}", total, input.as_ref());

    let mut report = RipReport::new(output);
    for (current, (stem, pair)) in assets.iter().enumerate() {
        let phase = if pair.objects.is_some() {
            RipPhase::WritingObjects
        } else {
            RipPhase::UnpackingImages
        };
        progress(&RipProgress::with_file(phase, current + 1, total, stem.as_str()));

        let mut summary = ExportSummary::default();
        match rip_asset(stem, pair, output, options, &mut summary) {
            Ok((images, objects)) => {
                report.images += images;
                report.objects += objects;
            }
            Err(e) => {
                warn!("Failed to rip {}: {}", stem, e);
                summary.warnings.push(format!("{stem}: {e}"));
            }
        }
        report.absorb(summary);
    }

    progress(&RipProgress::new(RipPhase::Complete, total, total));
    Ok(report)
}

fn rip_asset(
    stem: &str,
    pair: &AssetPair,
    output: &Path,
    options: &ExportOptions,
    summary: &mut ExportSummary,
) -> Result<(usize, usize)> {
    let dir = output.join(format!("ripped_{stem}"));
    let prefix = format!("{stem}_");

    let images = match &pair.images {
        Some(path) => load_images(path)?,
        None => {
            info!("{}: no container, exporting untextured", stem);
            Vec::new()
        }
    };

    let objects = match &pair.objects {
        Some(path) => {
            let objects = read_objects(path)?;
            export_object_set(objects, &images, &dir, &prefix, options, summary)?
        }
        None => {
            std::fs::create_dir_all(&dir)?;
            export_images(&images, &dir, &prefix, ImageLayout::Raster, summary)?;
            0
        }
    };

    Ok((images.len(), objects))
}
