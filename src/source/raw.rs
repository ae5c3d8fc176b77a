//! Raw JSON shapes of the four input files.
//!
//! Every field that may be missing carries `#[serde(default)]`; normalization
//! into the indexed records happens in [`crate::source::parse`].

use serde::Deserialize;
use serde_json::{Map, Value};

/// `conversation.json`: the only required input.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConversationFile {
    #[serde(default)]
    pub conversation_id: String,
    #[serde(default)]
    pub steps: Vec<RawStep>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawStep {
    pub step_id: String,
    #[serde(default)]
    pub ts: Option<String>,
    #[serde(default)]
    pub user: Option<RawText>,
    #[serde(default)]
    pub bot: Option<RawText>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawText {
    #[serde(default)]
    pub text: Option<String>,
}

/// `stepLogs.json`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StepLogsFile {
    #[serde(default)]
    pub conversation_id: String,
    #[serde(default)]
    pub step_logs: Vec<RawStepLog>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawStepLog {
    pub step_id: String,
    #[serde(default)]
    pub events: Vec<Value>,
}

/// `miniAppRuns.json`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MiniAppRunsFile {
    #[serde(default)]
    pub conversation_id: String,
    #[serde(default)]
    pub mini_app_runs: Vec<RawStepRuns>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawStepRuns {
    pub step_id: String,
    #[serde(default)]
    pub runs: Vec<RawRun>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawRun {
    pub run_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub order: Option<i64>,
    #[serde(default)]
    pub depends_on: Option<Vec<String>>,
}

/// `runLogs.json`.
///
/// Entries stay as JSON objects: a record without `raw` keeps the whole
/// entry as its raw payload, so nothing may be dropped during decoding.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RunLogsFile {
    #[serde(default)]
    pub run_logs: Vec<Map<String, Value>>,
}
