//! Model checkpoint resolution.

use clap::Args;

use vostrack_config::{FsProbe, ModelVariant, checkpoint, paths};

use super::{get_config, output_result, output_text, print_warning};
use crate::Cli;

/// Resolve a model checkpoint.
///
/// Prints `<dir>/checkpoints/model_step<step>.pth` for the configured step,
/// or with --list the steps actually present under the model directory.
#[derive(Args)]
pub struct CheckpointCommand {
    /// Model variant (joint, joint_no_ytvos, appearance, motion)
    variant: String,

    /// List available checkpoint steps instead
    #[arg(long)]
    list: bool,
}

impl CheckpointCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let variant: ModelVariant = self.variant.parse()?;
        let cfg = get_config(cli)?;
        let entry = cfg
            .model(variant)
            .ok_or_else(|| anyhow::anyhow!("model.{variant} is not configured"))?;

        let dir = paths::resolve(&entry.dir, &std::env::current_dir()?)?;

        if self.list {
            let steps = checkpoint::list_steps(&FsProbe, &dir)?;
            if cli.json {
                return output_result(&steps, cli.output.as_deref(), true);
            }
            let text: String = steps.iter().map(|s| format!("{s}\n")).collect();
            return output_text(&text, cli.output.as_deref());
        }

        let path = checkpoint::checkpoint_path(&dir, entry.step);
        if !path.exists() {
            print_warning(&format!("{} does not exist", path.display()));
        }
        output_text(&format!("{}\n", path.display()), cli.output.as_deref())
    }
}
