use crate::source::raw::{ConversationFile, MiniAppRunsFile, RunLogsFile, StepLogsFile};
use crate::source::record::{
    ConversationStep, MiniAppRun, ParsedConversation, RunLog, RunLogIndex, RunIndex,
    StepLogIndex,
};
use serde_json::Value;
use tracing::{debug, warn};

/// Flatten `conversation.json` into ordered steps.
///
/// Missing `user.text` / `bot.text` become empty strings.
pub fn parse_conversation(file: &ConversationFile) -> ParsedConversation {
    let steps = file
        .steps
        .iter()
        .map(|s| ConversationStep {
            step_id: s.step_id.clone(),
            ts: s.ts.clone(),
            user_text: s
                .user
                .as_ref()
                .and_then(|t| t.text.clone())
                .unwrap_or_default(),
            bot_text: s
                .bot
                .as_ref()
                .and_then(|t| t.text.clone())
                .unwrap_or_default(),
        })
        .collect::<Vec<_>>();

    debug!(
        conversation_id = %file.conversation_id,
        steps = steps.len(),
        "parsed conversation"
    );

    ParsedConversation {
        conversation_id: file.conversation_id.clone(),
        steps,
    }
}

/// Index step events by step id. An absent file yields an empty index.
pub fn parse_step_logs(file: Option<&StepLogsFile>) -> StepLogIndex {
    let mut out = StepLogIndex::new();
    let Some(file) = file else {
        return out;
    };

    for item in &file.step_logs {
        out.insert(item.step_id.clone(), item.events.clone());
    }

    debug!(steps = out.len(), "parsed step logs");
    out
}

/// Index mini-app runs by step id.
///
/// Each step's runs are sorted by `order` ascending (missing orders last,
/// stable among equals) and `depends_on` is always materialized.
pub fn parse_mini_apps(file: Option<&MiniAppRunsFile>) -> RunIndex {
    let mut out = RunIndex::new();
    let Some(file) = file else {
        return out;
    };

    for item in &file.mini_app_runs {
        let mut runs: Vec<MiniAppRun> = item
            .runs
            .iter()
            .map(|r| MiniAppRun {
                run_id: r.run_id.clone(),
                name: r.name.clone(),
                order: r.order,
                depends_on: r.depends_on.clone().unwrap_or_default(),
            })
            .collect();
        runs.sort_by_key(MiniAppRun::sort_key);
        out.insert(item.step_id.clone(), runs);
    }

    debug!(
        steps = out.len(),
        runs = out.values().map(Vec::len).sum::<usize>(),
        "parsed mini-app runs"
    );
    out
}

/// Index run logs by run id.
///
/// A record without `raw` stores the whole record as its raw payload.
pub fn parse_run_logs(file: Option<&RunLogsFile>) -> RunLogIndex {
    let mut out = RunLogIndex::new();
    let Some(file) = file else {
        return out;
    };

    for (idx, entry) in file.run_logs.iter().enumerate() {
        let Some(run_id) = entry.get("run_id").and_then(Value::as_str) else {
            warn!(index = idx, "run log entry has no string run_id; skipped");
            continue;
        };

        let kvps = entry.get("kvps").and_then(Value::as_object).cloned();
        let http = entry.get("http").and_then(Value::as_array).cloned();
        let raw = match entry.get("raw") {
            Some(v) if !v.is_null() => v.clone(),
            _ => Value::Object(entry.clone()),
        };

        out.insert(run_id.to_string(), RunLog { kvps, raw, http });
    }

    debug!(runs = out.len(), "parsed run logs");
    out
}
