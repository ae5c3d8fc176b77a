use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

pub type StepId = String;
pub type RunId = String;

/// Placeholder `order` for runs that declare none; sorts after any real order.
pub const MISSING_ORDER: i64 = 10_000;

/// `order` with the sentinel applied.
pub fn effective_order(order: Option<i64>) -> i64 {
    order.unwrap_or(MISSING_ORDER)
}

/// One conversational turn with the dialogue text flattened.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationStep {
    pub step_id: StepId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ts: Option<String>,
    pub user_text: String,
    pub bot_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedConversation {
    pub conversation_id: String,
    /// File order is canonical.
    pub steps: Vec<ConversationStep>,
}

/// Step id -> opaque event records.
pub type StepLogIndex = BTreeMap<StepId, Vec<Value>>;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MiniAppRun {
    pub run_id: RunId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    pub depends_on: Vec<RunId>,
}

impl MiniAppRun {
    pub fn sort_key(&self) -> i64 {
        effective_order(self.order)
    }
}

/// Step id -> runs sorted by `order` (sentinel-defaulted) ascending.
pub type RunIndex = BTreeMap<StepId, Vec<MiniAppRun>>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunLog {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kvps: Option<Map<String, Value>>,
    pub raw: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http: Option<Vec<Value>>,
}

/// Run id -> log record. Global namespace, independent of steps.
pub type RunLogIndex = BTreeMap<RunId, RunLog>;
