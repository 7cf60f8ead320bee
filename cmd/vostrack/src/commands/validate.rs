//! Configuration validation command.

use std::path::PathBuf;

use clap::Args;
use tracing::debug;

use vostrack_config::{ConfigError, FsProbe, ValidateOptions, Validator, load, placeholder};

use super::{config_path, output_result, print_error, print_success, print_warning};
use crate::Cli;

/// Validate the configuration.
///
/// Every check runs before anything is reported: placeholder paths, missing
/// directories, unknown splits, missing checkpoints and out-of-range values
/// all appear in one report. Exits non-zero when any issue is found.
#[derive(Args)]
pub struct ValidateCommand {
    /// Skip filesystem checks (paths and checkpoints)
    #[arg(long)]
    offline: bool,

    /// Directory relative paths are resolved against (default: current directory)
    #[arg(long)]
    base_dir: Option<PathBuf>,
}

impl ValidateCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let path = config_path(cli)?;
        let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::ReadFile {
            path: path.clone(),
            source,
        })?;
        let cfg = load::parse(text.as_bytes(), &path)?;

        let mut options = ValidateOptions {
            check_filesystem: !self.offline,
            ..Default::default()
        };
        if let Some(base_dir) = &self.base_dir {
            options.base_dir = base_dir.clone();
        }
        debug!(base_dir = %options.base_dir.display(), offline = self.offline, "validating");

        let report = Validator::new(&FsProbe, options).validate(&cfg);

        if cli.json {
            output_result(&report, cli.output.as_deref(), true)?;
        } else if report.is_ok() {
            print_success(&format!("{} is valid", path.display()));
        } else {
            print_error(&report.to_string());
        }

        let marked = placeholder::marked_lines(&text);
        if !marked.is_empty() && !cli.json {
            let lines: Vec<String> = marked
                .iter()
                .map(|m| format!("{} (line {})", m.key, m.line))
                .collect();
            print_warning(&format!(
                "lines still marked '# UPDATE': {}",
                lines.join(", ")
            ));
        }

        if !report.is_ok() {
            anyhow::bail!("{} has {} issue(s)", path.display(), report.len());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::commands::{TEST_CONFIG, write_config};

    #[test]
    fn test_validate_offline_passes() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(dir.path(), TEST_CONFIG);

        let cli = Cli::try_parse_from([
            "vostrack",
            "validate",
            "--offline",
            "--config",
            config.as_str(),
        ])
        .unwrap();
        crate::run(&cli).unwrap();
    }

    #[test]
    fn test_validate_fails_on_issues() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(dir.path(), vostrack_config::TEMPLATE);
        let report_path = dir.path().join("report.json");

        let cli = Cli::try_parse_from([
            "vostrack",
            "validate",
            "--offline",
            "--json",
            "--config",
            config.as_str(),
            "-o",
            report_path.to_str().unwrap(),
        ])
        .unwrap();
        let err = crate::run(&cli).unwrap_err();
        assert!(err.to_string().contains("issue(s)"), "{err}");

        let report: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&report_path).unwrap()).unwrap();
        let issues = report["issues"].as_array().unwrap();
        assert!(!issues.is_empty());
        assert!(issues.iter().all(|i| i["kind"] == "placeholder"));
        assert!(issues.iter().any(|i| i["key"] == "flow.flownet2_dir"));
    }

    #[test]
    fn test_validate_checks_filesystem_against_base_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(dir.path(), TEST_CONFIG);

        let cli = Cli::try_parse_from([
            "vostrack",
            "validate",
            "--config",
            config.as_str(),
            "--base-dir",
            dir.path().to_str().unwrap(),
        ])
        .unwrap();
        assert!(crate::run(&cli).is_err());
    }
}
