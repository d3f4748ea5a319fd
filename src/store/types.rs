use serde::{Deserialize, Serialize};

/// Title given to records that reach disk without one. Completion state
/// still means something even when the text is gone, so such records are
/// recovered instead of dropped.
pub const UNTITLED_PLACEHOLDER: &str = "(untitled)";

/// One to-do entry.
///
/// Field order is the on-disk field order of the structured format and must
/// stay `title`, `date`, `done` for round-trip compatibility with files
/// written by older builds. No id, no extra metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(default)]
    pub title: String,
    /// Due date in `YYYY-MM-DD` form, empty when none was set. The earliest
    /// line-format files predate due dates entirely.
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub done: bool,
}

impl Task {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            date: String::new(),
            done: false,
        }
    }

    pub fn has_date(&self) -> bool {
        !self.date.is_empty()
    }
}

/// The ordered task collection. Order reflects display order and survives
/// manual reordering, so it is significant end to end.
pub type TaskList = Vec<Task>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_task_is_pending() {
        let task = Task::new("Buy milk");
        assert_eq!(task.title, "Buy milk");
        assert!(!task.done);
        assert!(!task.has_date());
    }

    #[test]
    fn test_record_field_order_is_stable() {
        let task = Task {
            title: "Pay rent".to_string(),
            date: "2026-08-01".to_string(),
            done: true,
        };
        let json = serde_json::to_string(&task).unwrap();
        assert_eq!(
            json,
            r#"{"title":"Pay rent","date":"2026-08-01","done":true}"#
        );
    }

    #[test]
    fn test_missing_fields_default() {
        let task: Task = serde_json::from_str(r#"{"title":"x"}"#).unwrap();
        assert_eq!(task.date, "");
        assert!(!task.done);
    }
}
