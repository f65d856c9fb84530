//! CLI command for ripping a folder of common data

use std::path::Path;
use std::time::Instant;

use super::{ExportArgs, print_report};
use crate::cli::progress::{LOOKING_GLASS, print_done, rip_bar, update_bar};
use crate::rip::{RipProgress, rip_common, rip_common_with_progress};

pub fn execute(source: &Path, output: &Path, export: &ExportArgs) -> anyhow::Result<()> {
    let options = export.options()?;
    let started = Instant::now();

    let report = if export.quiet {
        rip_common(source, output, &options)?
    } else {
        println!("{}Scanning {}", LOOKING_GLASS, source.display());
        let pb = rip_bar(0);
        let result = rip_common_with_progress(source, output, &options, &|progress: &RipProgress| {
            update_bar(&pb, progress);
        });
        pb.finish_and_clear();
        result?
    };

    if report.files.is_empty() && report.warnings.is_empty() {
        println!("No .CMP or .PRM files found in: {}", source.display());
        return Ok(());
    }

    if let Some(path) = &export.report {
        report.write_json(path)?;
    }

    if !export.quiet {
        print_report(&report, output);
        print_done(started.elapsed());
    }
    Ok(())
}
