use clap::{Args, Subcommand};
use std::path::{Path, PathBuf};

use crate::converter::ExportOptions;
use crate::formats::track::Game;
use crate::rip::RipReport;

pub mod common;
pub mod inspect;
pub mod track;
pub mod unpack;

/// Flags shared by the rip commands.
#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    /// Write one OBJ per object instead of one per file
    #[arg(long)]
    pub per_object: bool,

    /// Drop faces that use the same vertex twice
    #[arg(long)]
    pub suppress_degenerates: bool,

    /// Keep vertices local and write object positions to _pos.txt
    #[arg(long)]
    pub no_bake_position: bool,

    /// Skip MTL files and usemtl lines
    #[arg(long)]
    pub no_materials: bool,

    /// Write sprite anchors to a .spr listing
    #[arg(long)]
    pub sprites: bool,

    /// Skip sections.obj for tracks
    #[arg(long)]
    pub no_sections: bool,

    /// TOML file with export options; flags override it
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Also write the rip report as JSON to this file
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Suppress progress bar
    #[arg(short, long)]
    pub quiet: bool,
}

impl ExportArgs {
    /// Build export options from the config file, then apply flags.
    ///
    /// # Errors
    /// Returns an error if the config file cannot be loaded.
    pub fn options(&self) -> anyhow::Result<ExportOptions> {
        let mut options = match &self.config {
            Some(path) => ExportOptions::from_toml_file(path)?,
            None => ExportOptions::default(),
        };
        if self.per_object {
            options = options.per_object();
        }
        if self.suppress_degenerates {
            options = options.with_suppress_degenerates(true);
        }
        if self.no_bake_position {
            options = options.with_bake_position(false);
        }
        if self.no_materials {
            options = options.with_materials(false);
        }
        if self.sprites {
            options = options.with_sprites(true);
        }
        if self.no_sections {
            options = options.with_sections(false);
        }
        Ok(options)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rip a track folder (LIBRARY/SCENE/SKY containers, objects and track files)
    Track {
        /// Folder holding the track files
        source: PathBuf,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// Game the track comes from (wipeout, 2097)
        #[arg(short, long, default_value = "wipeout")]
        game: Game,

        #[command(flatten)]
        export: ExportArgs,
    },

    /// Rip every container and object file in a folder
    Common {
        /// Folder to scan (not recursive)
        source: PathBuf,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        #[command(flatten)]
        export: ExportArgs,
    },

    /// Unpack a container and write its images as PNG
    Unpack {
        /// Source .CMP file
        source: PathBuf,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// Also write the unpacked image files as they are stored
        #[arg(long)]
        raw: bool,
    },

    /// Show the objects and polygons of a .PRM file
    Inspect {
        /// Source .PRM file
        source: PathBuf,

        /// Write the summary as JSON to this file instead of printing it
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

impl Commands {
    /// Execute the selected command.
    ///
    /// # Errors
    /// Returns an error if the underlying command fails.
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            Commands::Track {
                source,
                output,
                game,
                export,
            } => track::execute(source, output, *game, export),
            Commands::Common {
                source,
                output,
                export,
            } => common::execute(source, output, export),
            Commands::Unpack { source, output, raw } => unpack::execute(source, output, *raw),
            Commands::Inspect { source, output } => inspect::execute(source, output.as_deref()),
        }
    }
}

/// Print the outcome of a rip.
pub(crate) fn print_report(report: &RipReport, output: &Path) {
    println!();
    println!("Rip complete: {}", output.display());
    println!("  Images:  {}", report.images);
    println!("  Objects: {}", report.objects);
    println!("  Faces:   {}", report.faces);
    if report.sprites > 0 {
        println!("  Sprites: {}", report.sprites);
    }
    println!("  Files:   {}", report.files.len());

    if !report.warnings.is_empty() {
        println!();
        println!("Warnings:");
        for msg in &report.warnings {
            println!("  {msg}");
        }
    }
}
