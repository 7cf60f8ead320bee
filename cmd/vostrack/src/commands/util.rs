//! Utility functions for CLI commands.

use std::path::{Path, PathBuf};

use vostrack_config::{PipelineConfig, load};

use crate::Cli;

/// Finds the configuration file to use.
pub fn config_path(cli: &Cli) -> anyhow::Result<PathBuf> {
    Ok(load::discover(cli.config.as_deref().map(Path::new))?)
}

/// Loads the configuration.
pub fn get_config(cli: &Cli) -> anyhow::Result<PipelineConfig> {
    let path = config_path(cli)?;
    Ok(load::load(&path)?)
}

/// Outputs result as JSON or YAML.
pub fn output_result<T: serde::Serialize>(
    result: &T,
    output_path: Option<&str>,
    as_json: bool,
) -> anyhow::Result<()> {
    let output = if as_json {
        serde_json::to_string_pretty(result)? + "\n"
    } else {
        serde_yaml::to_string(result)?
    };
    output_text(&output, output_path)
}

/// Outputs plain text to a file or stdout.
pub fn output_text(text: &str, output_path: Option<&str>) -> anyhow::Result<()> {
    match output_path {
        Some(path) => std::fs::write(path, text)?,
        None => print!("{}", text),
    }
    Ok(())
}

/// Prints success message.
pub fn print_success(msg: &str) {
    eprintln!("\x1b[32m✓\x1b[0m {}", msg);
}

/// Prints error message.
pub fn print_error(msg: &str) {
    eprintln!("\x1b[31m✗\x1b[0m {}", msg);
}

/// Prints warning message.
pub fn print_warning(msg: &str) {
    eprintln!("\x1b[33m⚠\x1b[0m {}", msg);
}

#[cfg(test)]
pub(crate) const TEST_CONFIG: &str = r#"
general:
  num_workers: 4
  gpus: [0, 1]

flow:
  flownet2_dir: /opt/flownet2

tracker:
  visualize: false

model:
  joint:
    dir: release/model/joint/
    step: 4999

fbms:
  root: /data/FBMS
  images_highres:
    test: /data/FBMS/TestSet-highres
  splits: [test]
  output_dir: release/outputs/fbms
  eval_dir: /opt/fbms-eval

davis16:
  root: /data/DAVIS16
  splits: [moving_val]
  output_dir: release/outputs/davis16

davis17:
  root: /data/DAVIS17
  splits: [moving_val, test-dev]
  output_dir: release/outputs/davis17

ytvos:
  root: /data/ytvos
  splits: [moving_val]
  output_dir: /scratch/ytvos
"#;

/// Writes `text` as `config.yaml` under `dir` and returns its path as a string.
#[cfg(test)]
pub(crate) fn write_config(dir: &Path, text: &str) -> String {
    let path = dir.join("config.yaml");
    std::fs::write(&path, text).unwrap();
    path.to_str().unwrap().to_string()
}
