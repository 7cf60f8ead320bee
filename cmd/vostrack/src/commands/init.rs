//! Template initialization.

use std::path::PathBuf;

use clap::Args;

use vostrack_config::{TEMPLATE, load, placeholder};

use super::print_success;
use crate::Cli;

/// Write the configuration template.
///
/// Paths marked "# UPDATE" in the template must be edited before the
/// configuration validates.
#[derive(Args)]
pub struct InitCommand {
    /// Destination (default: --config, or ./config.yaml)
    path: Option<PathBuf>,

    /// Overwrite an existing file
    #[arg(long)]
    force: bool,
}

impl InitCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let path = self
            .path
            .clone()
            .or_else(|| cli.config.as_ref().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("config.yaml"));

        if path.exists() && !self.force {
            anyhow::bail!(
                "{} already exists, use --force to overwrite it",
                path.display()
            );
        }

        load::write_file(&path, TEMPLATE)?;
        print_success(&format!("Wrote {}", path.display()));

        let marked = placeholder::marked_lines(TEMPLATE);
        eprintln!("Edit the {} paths marked '# UPDATE' before running:", marked.len());
        for line in marked {
            eprintln!("  line {}: {}", line.line, line.key);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");
        let path_arg = path.to_str().unwrap();

        let cli = Cli::try_parse_from(["vostrack", "init", path_arg]).unwrap();
        crate::run(&cli).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), TEMPLATE);

        std::fs::write(&path, "edited").unwrap();
        let err = crate::run(&cli).unwrap_err();
        assert!(err.to_string().contains("--force"), "{err}");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "edited");

        let cli = Cli::try_parse_from(["vostrack", "init", path_arg, "--force"]).unwrap();
        crate::run(&cli).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), TEMPLATE);
    }

    #[test]
    fn test_init_defaults_to_config_flag() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vostrack.yaml");

        let cli = Cli::try_parse_from(["vostrack", "init", "--config", path.to_str().unwrap()])
            .unwrap();
        crate::run(&cli).unwrap();
        assert!(path.exists());
    }
}
