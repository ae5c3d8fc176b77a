//! Input files: raw JSON shapes, normalized records, and the four parsers.
//!
//! Parsers never read another file's data and never fail on missing
//! optional arrays or fields.

pub mod load;
pub mod parse;
pub mod raw;
pub mod record;

pub use load::{SourceFiles, SourcePaths};
pub use parse::{parse_conversation, parse_mini_apps, parse_run_logs, parse_step_logs};
pub use raw::{ConversationFile, MiniAppRunsFile, RunLogsFile, StepLogsFile};
pub use record::{
    ConversationStep, MISSING_ORDER, MiniAppRun, ParsedConversation, RunId, RunIndex, RunLog,
    RunLogIndex, StepId, StepLogIndex, effective_order,
};
