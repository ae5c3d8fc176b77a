//! Shared input fixtures for scenario tests.
use botflow_graph::SourceFiles;
use serde_json::{Value, json};

fn decode<T: serde::de::DeserializeOwned>(v: Value) -> T {
    serde_json::from_value(v).expect("fixture decodes")
}

/// Conversation `s1, s2, s3`; `s2` carries the diamond r1 -> {r2, r3} -> r4.
#[allow(dead_code)]
pub fn diamond_files() -> SourceFiles {
    SourceFiles {
        conversation: decode(json!({
            "conversation_id": "conv_1",
            "steps": [
                { "step_id": "s1", "ts": "2026-02-17T10:00:00Z", "user": { "text": "Hola" }, "bot": { "text": "Hi" } },
                { "step_id": "s2", "user": { "text": "Transfer to Spain" } },
                { "step_id": "s3" }
            ]
        })),
        step_logs: Some(decode(json!({
            "conversation_id": "conv_1",
            "step_logs": [
                { "step_id": "s1", "events": [{ "level": "info", "msg": "route=help" }] },
                { "step_id": "ghost", "events": [{ "level": "debug" }] }
            ]
        }))),
        mini_apps: Some(decode(json!({
            "conversation_id": "conv_1",
            "mini_app_runs": [
                {
                    "step_id": "s1",
                    "runs": [
                        { "run_id": "a2", "name": "fetch_context", "order": 2 },
                        { "run_id": "a1", "name": "intent_classifier", "order": 1 }
                    ]
                },
                {
                    "step_id": "s2",
                    "runs": [
                        { "run_id": "r4", "name": "compose_reply", "order": 4, "depends_on": ["r2", "r3"] },
                        { "run_id": "r1", "name": "kyc_check", "order": 1 },
                        { "run_id": "r2", "name": "limits_check", "order": 2, "depends_on": ["r1"] },
                        { "run_id": "r3", "name": "fx_quote", "order": 3, "depends_on": ["r1"] }
                    ]
                },
                {
                    "step_id": "ghost",
                    "runs": [{ "run_id": "g1", "name": "orphan" }]
                }
            ]
        }))),
        run_logs: Some(decode(json!({
            "run_logs": [
                { "run_id": "r1", "kvps": { "kyc": "ok" } },
                { "run_id": "r2", "kvps": { "limit": 5000 }, "raw": { "limit_eur": 5000 }, "http": [{ "status": 200 }] },
                { "run_id": "unused", "kvps": {} }
            ]
        }))),
    }
}

/// A single step whose runs come from `runs`.
#[allow(dead_code)]
pub fn single_step_files(runs: Value) -> SourceFiles {
    SourceFiles {
        conversation: decode(json!({
            "conversation_id": "conv_2",
            "steps": [{ "step_id": "s1" }]
        })),
        step_logs: None,
        mini_apps: Some(decode(json!({
            "conversation_id": "conv_2",
            "mini_app_runs": [{ "step_id": "s1", "runs": runs }]
        }))),
        run_logs: None,
    }
}
