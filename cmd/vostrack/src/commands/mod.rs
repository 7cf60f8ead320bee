//! CLI commands module.

mod checkpoint;
mod dataset;
mod init;
mod show;
mod tracking;
mod util;
mod validate;

pub use checkpoint::CheckpointCommand;
pub use dataset::{OutputsCommand, SplitsCommand};
pub use init::InitCommand;
pub use show::{GetCommand, SchemaCommand, ShowCommand};
pub use tracking::{FrameNumberCommand, TrackingCommand};
pub use validate::ValidateCommand;

pub(crate) use util::*;
