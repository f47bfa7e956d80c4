use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Outstanding change queued by the backend for the bot to apply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingUpdate {
    /// Queue entry id, used to acknowledge the update
    pub id: u64,

    /// Payload of the update (member, server, action...)
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}
