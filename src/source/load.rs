//! Reading input files from disk.

use crate::Result;
use crate::source::raw::{ConversationFile, MiniAppRunsFile, RunLogsFile, StepLogsFile};
use anyhow::Context;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

/// Locations of the four inputs. Only the conversation is required.
#[derive(Debug, Clone, Default)]
pub struct SourcePaths {
    pub conversation: PathBuf,
    pub step_logs: Option<PathBuf>,
    pub mini_apps: Option<PathBuf>,
    pub run_logs: Option<PathBuf>,
}

/// Decoded input payloads, ready for the builder.
#[derive(Debug, Clone, Default)]
pub struct SourceFiles {
    pub conversation: ConversationFile,
    pub step_logs: Option<StepLogsFile>,
    pub mini_apps: Option<MiniAppRunsFile>,
    pub run_logs: Option<RunLogsFile>,
}

impl SourceFiles {
    pub fn load(paths: &SourcePaths) -> Result<Self> {
        Ok(Self {
            conversation: read_json(&paths.conversation)
                .context("conversation file is required")?,
            step_logs: paths.step_logs.as_deref().map(read_json).transpose()?,
            mini_apps: paths.mini_apps.as_deref().map(read_json).transpose()?,
            run_logs: paths.run_logs.as_deref().map(read_json).transpose()?,
        })
    }
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text =
        fs::read_to_string(path).with_context(|| format!("read file {}", path.display()))?;
    let value = serde_json::from_str(&text)
        .with_context(|| format!("decode JSON in {}", path.display()))?;
    Ok(value)
}
