//! CLI command for unpacking a container

use std::path::Path;
use std::time::Instant;

use crate::cli::progress::{DISK, PACKAGE, PICTURE, print_done, print_step};
use crate::converter::{ExportSummary, ImageLayout, export_images};
use crate::formats::cmp::read_container;
use crate::formats::tim::decode_images;
use crate::utils::asset_stem;

pub fn execute(source: &Path, output: &Path, raw: bool) -> anyhow::Result<()> {
    let started = Instant::now();
    let stem = asset_stem(source).unwrap_or_else(|| "container".to_string());
    let total = if raw { 3 } else { 2 };

    print_step(1, total, PACKAGE, &format!("Unpacking {}...", source.display()));
    let container = read_container(source)?;

    print_step(2, total, PICTURE, &format!("Decoding {} images...", container.len()));
    let images = decode_images(&container.files);
    std::fs::create_dir_all(output)?;
    let mut summary = ExportSummary::default();
    export_images(&images, output, &format!("{stem}_"), ImageLayout::Raster, &mut summary)?;

    if raw {
        print_step(3, total, DISK, "Writing raw files...");
        for (index, data) in container.files.iter().enumerate() {
            std::fs::write(output.join(format!("{stem}_{index}.tim")), data)?;
        }
    }

    for msg in &summary.warnings {
        println!("  warning: {msg}");
    }
    println!("Wrote {} images to {}", summary.files.len(), output.display());
    print_done(started.elapsed());
    Ok(())
}
