//! The configuration template shipped with the pipeline.

use crate::error::Result;
use crate::load::{self, Format};
use crate::schema::PipelineConfig;

/// Template text, with `# UPDATE` markers on the paths to edit.
pub const TEMPLATE: &str = include_str!("../config.template.yaml");

/// Parses [`TEMPLATE`].
pub fn template() -> Result<PipelineConfig> {
    load::from_str(TEMPLATE, Format::Yaml)
}
