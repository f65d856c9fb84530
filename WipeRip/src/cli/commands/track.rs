//! CLI command for ripping a track folder

use std::path::Path;
use std::time::Instant;

use super::{ExportArgs, print_report};
use crate::cli::progress::{print_done, rip_bar, update_bar};
use crate::formats::track::Game;
use crate::rip::{RipProgress, rip_track, rip_track_with_progress};

pub fn execute(source: &Path, output: &Path, game: Game, export: &ExportArgs) -> anyhow::Result<()> {
    let options = export.options()?;
    let started = Instant::now();

    let report = if export.quiet {
        rip_track(source, output, game, &options)?
    } else {
        println!("Ripping {game} track from {}", source.display());
        let pb = rip_bar(4);
        let result = rip_track_with_progress(source, output, game, &options, &|progress: &RipProgress| {
            update_bar(&pb, progress);
        });
        pb.finish_and_clear();
        result?
    };

    if let Some(path) = &export.report {
        report.write_json(path)?;
    }

    if !export.quiet {
        print_report(&report, output);
        print_done(started.elapsed());
    }
    Ok(())
}
