pub mod project;
pub mod task;
pub mod transaction;
pub mod user;

pub use project::{NewProject, Project, ProjectPatch, ProjectStats};
pub use task::{NewTask, Task, TaskPatch, TaskPriority, TaskStatus};
pub use transaction::{DebitCredit, NewTransaction, Transaction, TransactionKind, TransactionPatch};
pub use user::User;

use serde::Serialize;
use serde_json::{Map, Value};

/// Render a patch or create payload as the field map sent to the remote
/// store. Unset options serialize to nothing, so the payload carries exactly
/// the fields the type can express.
pub(crate) fn to_fields<T: Serialize>(payload: &T) -> Map<String, Value> {
    match serde_json::to_value(payload) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}
