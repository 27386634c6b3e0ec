/// Data structures shared between the API client, the formatter and the
/// poll loop.
use serde::Deserialize;
use serde_json::Value;

/// One homework submission record as returned by the review API.
///
/// Owned by the remote service; this side only reads it. Unknown fields are
/// ignored on deserialization.
///
/// # Fields
/// * `homework_name` - Identifying name of the submission
/// * `status` - Review status string (`approved`, `reviewing`, `rejected`)
/// * `data` - Optional payload attached to the entry
#[derive(Debug, Clone, Deserialize)]
pub struct Homework {
    pub homework_name: String,
    pub status: String,
    #[serde(default)]
    pub data: Option<Value>,
}

/// Snapshot of the most recently observed homework, used for change
/// detection across loop iterations.
///
/// `Default` is the synthetic empty baseline, so the first real entry always
/// counts as a change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    pub name: String,
    pub payload: Option<Value>,
}

impl Report {
    pub fn from_homework(homework: &Homework) -> Self {
        Self {
            name: homework.homework_name.clone(),
            payload: homework.data.clone(),
        }
    }
}
