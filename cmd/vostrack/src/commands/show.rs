//! Commands that print the document or parts of it.

use clap::Args;

use vostrack_config::{PipelineConfig, load};

use super::{get_config, output_result, output_text};
use crate::Cli;

/// Print the parsed configuration.
#[derive(Args)]
pub struct ShowCommand {}

impl ShowCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let cfg = get_config(cli)?;
        output_result(&cfg, cli.output.as_deref(), cli.json)
    }
}

/// Print one value by dotted key.
///
/// Scalars print bare so the output can be used from shell scripts:
///
///   STEP=$(vostrack get model.joint.step)
#[derive(Args)]
pub struct GetCommand {
    /// Dotted key, e.g. model.joint.step or general.gpus.0
    key: String,
}

impl GetCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let cfg = get_config(cli)?;
        let value = load::lookup(&cfg, &self.key)?
            .ok_or_else(|| anyhow::anyhow!("key '{}' not found", self.key))?;

        match scalar_text(&value) {
            Some(text) if !cli.json => output_text(&format!("{text}\n"), cli.output.as_deref()),
            _ => output_result(&value, cli.output.as_deref(), cli.json),
        }
    }
}

fn scalar_text(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Print the JSON Schema of the configuration.
#[derive(Args)]
pub struct SchemaCommand {}

impl SchemaCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let schema = schemars::schema_for!(PipelineConfig);
        output_result(&schema, cli.output.as_deref(), true)
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::commands::{TEST_CONFIG, write_config};

    fn get(key: &str, extra: &[&str]) -> anyhow::Result<String> {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(dir.path(), TEST_CONFIG);
        let out = dir.path().join("out");

        let mut args = vec![
            "vostrack",
            "get",
            key,
            "--config",
            config.as_str(),
            "-o",
            out.to_str().unwrap(),
        ];
        args.extend_from_slice(extra);
        crate::run(&Cli::try_parse_from(args).unwrap())?;
        Ok(std::fs::read_to_string(&out).unwrap())
    }

    #[test]
    fn test_get_prints_scalars_bare() {
        assert_eq!(get("model.joint.step", &[]).unwrap(), "4999\n");
        assert_eq!(get("model.joint.dir", &[]).unwrap(), "release/model/joint/\n");
        assert_eq!(get("tracker.visualize", &[]).unwrap(), "false\n");
        assert_eq!(get("general.gpus.1", &[]).unwrap(), "1\n");
    }

    #[test]
    fn test_get_structured_values() {
        assert_eq!(get("general.gpus", &[]).unwrap(), "- 0\n- 1\n");

        let json: serde_json::Value =
            serde_json::from_str(&get("model.joint", &["--json"]).unwrap()).unwrap();
        assert_eq!(json["step"], 4999);
    }

    #[test]
    fn test_get_missing_key() {
        let err = get("model.motion.step", &[]).unwrap_err();
        assert!(err.to_string().contains("model.motion.step"), "{err}");
    }

    #[test]
    fn test_scalar_text() {
        let step: serde_yaml::Value = serde_yaml::from_str("4999").unwrap();
        assert_eq!(scalar_text(&step).as_deref(), Some("4999"));

        let dir: serde_yaml::Value = serde_yaml::from_str("release/model/joint/").unwrap();
        assert_eq!(scalar_text(&dir).as_deref(), Some("release/model/joint/"));

        let gpus: serde_yaml::Value = serde_yaml::from_str("[0, 1]").unwrap();
        assert_eq!(scalar_text(&gpus), None);
    }

    #[test]
    fn test_schema_lists_sections() {
        let schema = serde_json::to_value(schemars::schema_for!(PipelineConfig)).unwrap();
        let properties = schema["properties"].as_object().unwrap();
        for key in ["general", "flow", "tracker", "model", "fbms", "davis16", "davis17", "ytvos"] {
            assert!(properties.contains_key(key), "{key}");
        }
    }
}
