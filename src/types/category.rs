//! Message category

use serde::{Deserialize, Serialize};

/// Scheduling priority the CBC applies to a message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    #[default]
    Normal,
    HighPriority,
    Background,
}

wire_vocabulary!(Category, "category" {
    Normal => "normal",
    HighPriority => "high_priority",
    Background => "background",
});
