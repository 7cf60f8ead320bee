//! Loading, saving and querying configuration documents.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{ConfigError, Result};
use crate::paths::{self, DEFAULT_CONFIG_FILE};
use crate::schema::PipelineConfig;

/// Serialization format of a configuration document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Yaml,
    Json,
}

impl Format {
    /// Picks the format from a file extension. Unknown extensions read as YAML,
    /// which also accepts JSON documents.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        match ext.as_deref() {
            Some("json") => Format::Json,
            _ => Format::Yaml,
        }
    }
}

/// Parses a document from text.
pub fn from_str(text: &str, format: Format) -> Result<PipelineConfig> {
    match format {
        Format::Yaml => Ok(serde_yaml::from_str(text)?),
        Format::Json => Ok(serde_json::from_str(text)?),
    }
}

/// Parses document bytes, picking the format from `path`'s extension.
pub fn parse(data: &[u8], path: impl AsRef<Path>) -> Result<PipelineConfig> {
    match Format::from_path(path) {
        Format::Yaml => Ok(serde_yaml::from_slice(data)?),
        Format::Json => Ok(serde_json::from_slice(data)?),
    }
}

/// Reads and parses a document from disk.
pub fn load(path: impl AsRef<Path>) -> Result<PipelineConfig> {
    let path = path.as_ref();
    let data = fs::read(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    let mut cfg = parse(&data, path)?;
    cfg.set_source(path.to_path_buf());
    info!(path = %path.display(), "loaded configuration");
    Ok(cfg)
}

/// Serializes a document.
pub fn to_string(cfg: &PipelineConfig, format: Format) -> Result<String> {
    match format {
        Format::Yaml => Ok(serde_yaml::to_string(cfg)?),
        Format::Json => Ok(serde_json::to_string_pretty(cfg)?),
    }
}

/// Writes a document to disk, in the format implied by `path`.
pub fn save(cfg: &PipelineConfig, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let content = to_string(cfg, Format::from_path(path))?;
    write_file(path, &content)
}

/// Writes `content` to `path`, creating parent directories.
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    let write_err = |source: std::io::Error| ConfigError::WriteFile {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    fs::write(path, content).map_err(write_err)
}

/// Finds the configuration file to use.
///
/// An explicit path wins. Otherwise `./config.yaml`, then
/// `~/.vostrack/config.yaml`.
pub fn discover(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        if path.is_file() {
            return Ok(path.to_path_buf());
        }
        return Err(ConfigError::NotFound {
            tried: vec![path.to_path_buf()],
        });
    }

    let mut tried = vec![PathBuf::from(DEFAULT_CONFIG_FILE)];
    if let Some(home) = paths::default_config_path() {
        tried.push(home);
    }

    for candidate in &tried {
        debug!(path = %candidate.display(), "looking for configuration");
        if candidate.is_file() {
            return Ok(candidate.clone());
        }
    }
    Err(ConfigError::NotFound { tried })
}

/// Looks up a value by dotted key, e.g. `model.joint.step` or `general.gpus.0`.
pub fn lookup(cfg: &PipelineConfig, key: &str) -> Result<Option<serde_yaml::Value>> {
    let mut current = serde_yaml::to_value(cfg)?;

    for part in key.split('.').filter(|p| !p.is_empty()) {
        let next = match &current {
            serde_yaml::Value::Mapping(map) => map.get(part).cloned(),
            serde_yaml::Value::Sequence(seq) => {
                part.parse::<usize>().ok().and_then(|i| seq.get(i).cloned())
            }
            _ => None,
        };
        match next {
            Some(value) => current = value,
            None => return Ok(None),
        }
    }

    Ok(Some(current))
}
