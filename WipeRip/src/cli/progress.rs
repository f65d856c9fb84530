//! Terminal output for rips: step lines, the rip progress bar and the
//! closing summary line.

use std::time::Duration;

use console::{Emoji, style};
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};

use crate::rip::RipProgress;

/// Scanning a common-data folder.
pub static LOOKING_GLASS: Emoji<'_, '_> = Emoji("🔍 ", "");
/// Unpacking a `.CMP` container.
pub static PACKAGE: Emoji<'_, '_> = Emoji("📦 ", "");
/// Writing raw image buffers.
pub static DISK: Emoji<'_, '_> = Emoji("💾 ", "");
/// Rip finished.
pub static SPARKLE: Emoji<'_, '_> = Emoji("✨ ", "");
/// Decoding TIM images to PNG.
pub static PICTURE: Emoji<'_, '_> = Emoji("🖼️  ", "");

/// `[2/3] 🖼️  Decoding 12 images...`
pub fn print_step(current: usize, total: usize, emoji: Emoji, msg: &str) {
    println!(
        "{} {}{}",
        style(format!("[{current}/{total}]")).bold().dim(),
        emoji,
        msg
    );
}

/// `✨ Done in 2s`
pub fn print_done(elapsed: Duration) {
    println!("{} Done in {}", SPARKLE, HumanDuration(elapsed));
}

/// Bar showing the rip phase and the asset being written, e.g.
/// `Writing objects SHIPS [###>------] 3/7`.
///
/// # Panics
/// Never in practice; the template is a fixed string.
#[must_use]
pub fn rip_bar_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{msg:<32} [{bar:30.green/white}] {pos}/{len}")
        .expect("valid template")
        .progress_chars("#>-")
}

/// A bar for `steps` rip steps. Track rips have a fixed step count;
/// common-data rips start at zero and learn the asset count from the
/// first progress update.
#[must_use]
pub fn rip_bar(steps: u64) -> ProgressBar {
    let pb = ProgressBar::new(steps);
    pb.set_style(rip_bar_style());
    pb
}

/// Mirror a rip progress update onto the bar.
pub fn update_bar(pb: &ProgressBar, progress: &RipProgress) {
    pb.set_length(progress.total as u64);
    pb.set_position(progress.current as u64);
    match &progress.current_file {
        Some(name) => pb.set_message(format!("{} {name}", progress.phase.as_str())),
        None => pb.set_message(progress.phase.as_str()),
    }
}
