//! Checkpoint file layout under a model directory.
//!
//! Step `N` of a model lives at `<dir>/checkpoints/model_stepN.pth`.

use std::io;
use std::path::{Path, PathBuf};

use crate::probe::PathProbe;

/// Subdirectory of a model directory holding checkpoints.
pub const CHECKPOINT_DIR: &str = "checkpoints";

const PREFIX: &str = "model_step";
const EXTENSION: &str = ".pth";

/// Returns the checkpoint file name for `step`.
pub fn checkpoint_file_name(step: u64) -> String {
    format!("{PREFIX}{step}{EXTENSION}")
}

/// Returns the checkpoint path for `step` under a model directory.
pub fn checkpoint_path(model_dir: &Path, step: u64) -> PathBuf {
    model_dir.join(CHECKPOINT_DIR).join(checkpoint_file_name(step))
}

/// Parses the step out of a checkpoint file name.
pub fn parse_checkpoint_step(file_name: &str) -> Option<u64> {
    let digits = file_name.strip_prefix(PREFIX)?.strip_suffix(EXTENSION)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Lists the checkpoint steps present under a model directory, ascending.
pub fn list_steps(probe: &dyn PathProbe, model_dir: &Path) -> io::Result<Vec<u64>> {
    let mut steps: Vec<u64> = probe
        .list_dir(&model_dir.join(CHECKPOINT_DIR))?
        .iter()
        .filter_map(|name| parse_checkpoint_step(name))
        .collect();
    steps.sort_unstable();
    steps.dedup();
    Ok(steps)
}

/// Returns the highest checkpoint step under a model directory, if any.
pub fn latest_step(probe: &dyn PathProbe, model_dir: &Path) -> io::Result<Option<u64>> {
    Ok(list_steps(probe, model_dir)?.last().copied())
}
