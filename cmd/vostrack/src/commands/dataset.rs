//! Dataset split and output listing commands.

use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use vostrack_config::{Dataset, paths};

use super::{get_config, output_result};
use crate::Cli;

/// List the allowed splits of each dataset.
///
/// This does not need a configuration file.
#[derive(Args)]
pub struct SplitsCommand {
    /// Only this dataset (fbms, davis16, davis17, ytvos)
    dataset: Option<String>,
}

impl SplitsCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let datasets = match &self.dataset {
            Some(name) => vec![name.parse::<Dataset>()?],
            None => Dataset::ALL.to_vec(),
        };

        let splits: BTreeMap<&str, &[&str]> = datasets
            .into_iter()
            .map(|d| (d.key(), d.allowed_splits()))
            .collect();
        output_result(&splits, cli.output.as_deref(), cli.json)
    }
}

#[derive(Debug, Serialize)]
struct SplitOutput {
    dataset: Dataset,
    split: String,
    output_dir: PathBuf,
}

/// List where results for every configured split are written.
#[derive(Args)]
pub struct OutputsCommand {
    /// Print resolved absolute paths
    #[arg(long)]
    resolve: bool,
}

impl OutputsCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let cfg = get_config(cli)?;
        let base_dir = std::env::current_dir()?;

        let mut outputs = Vec::new();
        for view in cfg.datasets() {
            for split in view.splits {
                let mut output_dir = view.split_output_dir(split);
                if self.resolve {
                    output_dir = paths::resolve(&output_dir, &base_dir)?;
                }
                outputs.push(SplitOutput {
                    dataset: view.dataset,
                    split: split.clone(),
                    output_dir,
                });
            }
        }

        if cli.json {
            return output_result(&outputs, cli.output.as_deref(), true);
        }
        let mut text = String::new();
        for o in &outputs {
            text.push_str(&format!(
                "{:<10} {:<14} {}\n",
                o.dataset.key(),
                o.split,
                o.output_dir.display()
            ));
        }
        super::output_text(&text, cli.output.as_deref())
    }
}
