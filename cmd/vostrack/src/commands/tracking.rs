//! Tracking parameter and frame naming commands.

use std::collections::BTreeMap;

use clap::Args;

use vostrack_config::{FilenameFormat, TrackingParams};

use super::{get_config, output_result};
use crate::Cli;

/// Print the effective tracking parameters.
///
/// Values missing from tracker.params are filled with their defaults.
#[derive(Args)]
pub struct TrackingCommand {
    /// Print the built-in defaults without reading a configuration
    #[arg(long)]
    defaults: bool,
}

impl TrackingCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let params = if self.defaults {
            TrackingParams::default()
        } else {
            get_config(cli)?.tracker.effective_params()
        };
        output_result(&params, cli.output.as_deref(), cli.json)
    }
}

/// Extract frame numbers from frame file names.
#[derive(Args)]
pub struct FrameNumberCommand {
    /// Naming scheme: frame, sequence_frame, sequence-frame or fbms
    #[arg(long)]
    format: FilenameFormat,

    /// File stems or names (extensions are stripped)
    #[arg(required = true)]
    names: Vec<String>,
}

impl FrameNumberCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let mut frames = BTreeMap::new();
        for name in &self.names {
            let stem = std::path::Path::new(name)
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or(name);
            frames.insert(name.as_str(), self.format.frame_number(stem)?);
        }
        output_result(&frames, cli.output.as_deref(), cli.json)
    }
}
