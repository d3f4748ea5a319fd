//! Codecs for the two on-disk schema generations.
//!
//! The generation is an explicit enum resolved from the file extension,
//! never sniffed from content. Decoding is tolerant: records that do not
//! match the expected shape are logged and skipped, never a load abort.

use super::types::{Task, TaskList, UNTITLED_PLACEHOLDER};
use crate::shared::errors::StoreError;
use std::path::Path;

/// On-disk schema generation of a backing file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaVersion {
    /// The earliest format: one task per line, `<0|1>|<title>`.
    LegacyLines,
    /// The current format: a JSON array of `{title, date, done}` records.
    Structured,
}

impl SchemaVersion {
    /// Resolves the generation from the file extension: `.json` files are
    /// structured, everything else is the legacy line format.
    pub fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => SchemaVersion::Structured,
            _ => SchemaVersion::LegacyLines,
        }
    }
}

pub fn decode(format: SchemaVersion, content: &str) -> TaskList {
    match format {
        SchemaVersion::LegacyLines => decode_legacy(content),
        SchemaVersion::Structured => decode_structured(content),
    }
}

pub fn encode(format: SchemaVersion, tasks: &[Task]) -> Result<String, StoreError> {
    match format {
        SchemaVersion::LegacyLines => Ok(encode_legacy(tasks)),
        SchemaVersion::Structured => {
            let mut content = serde_json::to_string_pretty(tasks)?;
            content.push('\n');
            Ok(content)
        }
    }
}

fn decode_legacy(content: &str) -> TaskList {
    let mut tasks = Vec::new();

    for (lineno, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        // Split on the first delimiter only; the title may contain `|`
        // and then reloads wrong, a known limitation of this format.
        let Some((flag, title)) = line.split_once('|') else {
            tracing::warn!(
                target: "store",
                line = lineno + 1,
                "Skipping line without delimiter"
            );
            continue;
        };

        let done = match flag {
            "1" => true,
            "0" => false,
            other => {
                tracing::warn!(
                    target: "store",
                    line = lineno + 1,
                    flag = other,
                    "Skipping line with unrecognized done flag"
                );
                continue;
            }
        };

        tasks.push(Task {
            title: recover_title(title, lineno + 1),
            date: String::new(),
            done,
        });
    }

    tasks
}

fn encode_legacy(tasks: &[Task]) -> String {
    let mut out = String::new();

    for task in tasks {
        if task.title.contains('|') {
            tracing::warn!(
                target: "store",
                title = %task.title,
                "Title contains the line-format delimiter and will not reload cleanly"
            );
        }
        if task.has_date() {
            tracing::warn!(
                target: "store",
                title = %task.title,
                "Due date cannot be represented in the line format and is dropped"
            );
        }

        out.push_str(if task.done { "1" } else { "0" });
        out.push('|');
        out.push_str(&task.title);
        out.push('\n');
    }

    out
}

fn decode_structured(content: &str) -> TaskList {
    let records: Vec<serde_json::Value> = match serde_json::from_str(content) {
        Ok(records) => records,
        Err(err) => {
            tracing::warn!(
                target: "store",
                %err,
                "Backing file is not a JSON array, starting empty"
            );
            return Vec::new();
        }
    };

    let mut tasks = Vec::new();

    for (pos, record) in records.into_iter().enumerate() {
        match serde_json::from_value::<Task>(record) {
            Ok(mut task) => {
                task.title = recover_title(&task.title, pos + 1);
                tasks.push(task);
            }
            Err(err) => {
                tracing::warn!(
                    target: "store",
                    record = pos + 1,
                    %err,
                    "Skipping malformed record"
                );
            }
        }
    }

    tasks
}

/// Old builds could write records with an empty title. The done flag still
/// carries meaning, so keep the record under a placeholder title.
fn recover_title(raw: &str, position: usize) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        tracing::warn!(
            target: "store",
            record = position,
            "Record has an empty title, keeping it as {:?}",
            UNTITLED_PLACEHOLDER
        );
        UNTITLED_PLACEHOLDER.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(title: &str, date: &str, done: bool) -> Task {
        Task {
            title: title.to_string(),
            date: date.to_string(),
            done,
        }
    }

    #[test]
    fn test_format_resolved_by_extension() {
        assert_eq!(
            SchemaVersion::for_path(Path::new("/tmp/todo_data.json")),
            SchemaVersion::Structured
        );
        assert_eq!(
            SchemaVersion::for_path(Path::new("/tmp/todo_list.txt")),
            SchemaVersion::LegacyLines
        );
        assert_eq!(
            SchemaVersion::for_path(Path::new("/tmp/no_extension")),
            SchemaVersion::LegacyLines
        );
    }

    #[test]
    fn test_legacy_decode_basic() {
        let tasks = decode_legacy("0|Buy milk\n1|Pay rent\n");
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].title, "Buy milk");
        assert!(!tasks[0].done);
        assert_eq!(tasks[1].title, "Pay rent");
        assert!(tasks[1].done);
    }

    #[test]
    fn test_legacy_decode_skips_malformed_lines() {
        let tasks = decode_legacy("no delimiter here\n0|Kept\nmaybe|Bad flag\n");
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "Kept");
    }

    #[test]
    fn test_legacy_decode_recovers_empty_title() {
        let tasks = decode_legacy("1|\n");
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, UNTITLED_PLACEHOLDER);
        assert!(tasks[0].done);
    }

    #[test]
    fn test_legacy_title_splits_on_first_delimiter_only() {
        let tasks = decode_legacy("0|a|b\n");
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "a|b");
    }

    #[test]
    fn test_legacy_round_trip() {
        let list = vec![task("Buy milk", "", false), task("Pay rent", "", true)];
        let encoded = encode(SchemaVersion::LegacyLines, &list).unwrap();
        assert_eq!(encoded, "0|Buy milk\n1|Pay rent\n");
        assert_eq!(decode(SchemaVersion::LegacyLines, &encoded), list);
    }

    #[test]
    fn test_structured_round_trip() {
        let list = vec![
            task("Buy milk", "2026-08-07", false),
            task("Pay rent", "", true),
        ];
        let encoded = encode(SchemaVersion::Structured, &list).unwrap();
        assert_eq!(decode(SchemaVersion::Structured, &encoded), list);
    }

    #[test]
    fn test_encode_is_deterministic() {
        let list = vec![task("Buy milk", "", false)];
        let first = encode(SchemaVersion::Structured, &list).unwrap();
        let second = encode(SchemaVersion::Structured, &list).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_structured_decode_recovers_empty_title() {
        let content = r#"[{"title": "", "date": "2025-01-01", "done": true}]"#;
        let tasks = decode_structured(content);
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, UNTITLED_PLACEHOLDER);
        assert_eq!(tasks[0].date, "2025-01-01");
        assert!(tasks[0].done);
    }

    #[test]
    fn test_structured_decode_skips_malformed_records() {
        let content = r#"[{"title": "Kept", "date": "", "done": false}, 42, "nope"]"#;
        let tasks = decode_structured(content);
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "Kept");
    }

    #[test]
    fn test_structured_decode_tolerates_garbage_file() {
        assert!(decode_structured("not json at all").is_empty());
        assert!(decode_structured("{\"title\": \"object not array\"}").is_empty());
    }

    #[test]
    fn test_structured_records_carry_no_extra_metadata() {
        let list = vec![task("Buy milk", "", false)];
        let encoded = encode(SchemaVersion::Structured, &list).unwrap();
        assert!(!encoded.contains("version"));
        assert!(!encoded.contains("id"));
    }
}
