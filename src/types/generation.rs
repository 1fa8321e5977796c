//! Completion outcome metadata.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Why the endpoint stopped generating.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FinishReason {
    Stop,
    Length,
    ToolCalls,
    ContentFilter,
}
