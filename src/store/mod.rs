//! The task store: sole owner of the task list and its backing file.
//!
//! Every mutating operation validates its input, applies the change in
//! memory, and rewrites the backing file before returning, so the list and
//! the file never diverge between two user-visible actions.

pub mod format;
pub mod storage;
pub mod types;

use crate::settings::IndexPolicy;
use crate::shared::errors::StoreError;
use crate::shared::paths::get_data_dir;
use chrono::NaiveDate;
use format::SchemaVersion;
use std::path::{Path, PathBuf};
use types::{Task, TaskList};

pub struct TaskStore {
    path: PathBuf,
    format: SchemaVersion,
    policy: IndexPolicy,
    tasks: TaskList,
}

impl TaskStore {
    /// Binds the store to an explicit backing file. A missing or unreadable
    /// file loads as the empty list.
    pub fn open(path: PathBuf, format: SchemaVersion, policy: IndexPolicy) -> Self {
        let tasks = storage::load_tasks(&path, format);
        tracing::info!(
            target: "store",
            path = %path.display(),
            tasks = tasks.len(),
            "Task store opened"
        );
        Self {
            path,
            format,
            policy,
            tasks,
        }
    }

    /// Opens the store in the given directory, migrating any legacy line
    /// file forward first.
    pub fn open_dir(dir: &Path, policy: IndexPolicy) -> Result<Self, StoreError> {
        let (path, tasks) = storage::load_or_migrate(dir)?;
        tracing::info!(target: "store", tasks = tasks.len(), "Task store initialized");
        Ok(Self {
            path,
            format: SchemaVersion::Structured,
            policy,
            tasks,
        })
    }

    /// Opens the store in the app data directory.
    pub fn open_default(policy: IndexPolicy) -> Result<Self, StoreError> {
        Self::open_dir(&get_data_dir(), policy)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Appends a task at the end of the list. The title is trimmed and must
    /// not be empty; the due date, when given, must be `YYYY-MM-DD`.
    pub fn append(&mut self, title: &str, date: Option<&str>) -> Result<(), StoreError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(StoreError::EmptyTitle);
        }

        let date = match date.map(str::trim) {
            Some(raw) if !raw.is_empty() => {
                NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .map_err(|_| StoreError::BadDate(raw.to_string()))?;
                raw.to_string()
            }
            _ => String::new(),
        };

        self.tasks.push(Task {
            title: title.to_string(),
            date,
            done: false,
        });
        self.save()
    }

    pub fn set_done(&mut self, index: usize, value: bool) -> Result<(), StoreError> {
        if !self.check_index(index)? {
            return Ok(());
        }
        self.tasks[index].done = value;
        self.save()
    }

    pub fn toggle(&mut self, index: usize) -> Result<(), StoreError> {
        if !self.check_index(index)? {
            return Ok(());
        }
        self.tasks[index].done = !self.tasks[index].done;
        self.save()
    }

    /// Replaces the title in place, keeping the done flag and due date.
    pub fn rename(&mut self, index: usize, new_title: &str) -> Result<(), StoreError> {
        let new_title = new_title.trim();
        if new_title.is_empty() {
            return Err(StoreError::EmptyTitle);
        }
        if !self.check_index(index)? {
            return Ok(());
        }
        self.tasks[index].title = new_title.to_string();
        self.save()
    }

    /// Removes the task at `index`, shifting later tasks to close the gap.
    pub fn remove(&mut self, index: usize) -> Result<(), StoreError> {
        if !self.check_index(index)? {
            return Ok(());
        }
        self.tasks.remove(index);
        self.save()
    }

    /// Moves the task at `from` to position `to`, keeping the relative
    /// order of everything else.
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<(), StoreError> {
        if !self.check_index(from)? || !self.check_index(to)? {
            return Ok(());
        }
        let task = self.tasks.remove(from);
        self.tasks.insert(to, task);
        self.save()
    }

    /// Case-insensitive substring match on the title. Pure: indices refer
    /// to the stored list, which is left untouched.
    pub fn filter(&self, query: &str) -> Vec<(usize, &Task)> {
        let needle = query.to_lowercase();
        self.tasks
            .iter()
            .enumerate()
            .filter(|(_, task)| task.title.to_lowercase().contains(&needle))
            .collect()
    }

    /// Drops every completed task, keeping the rest in order. Returns how
    /// many were removed.
    pub fn purge_completed(&mut self) -> Result<usize, StoreError> {
        let before = self.tasks.len();
        self.tasks.retain(|task| !task.done);
        let removed = before - self.tasks.len();
        self.save()?;
        Ok(removed)
    }

    fn save(&self) -> Result<(), StoreError> {
        storage::save_tasks(&self.path, self.format, &self.tasks)
    }

    /// Ok(true) when the index is usable, Ok(false) for a lenient no-op.
    fn check_index(&self, index: usize) -> Result<bool, StoreError> {
        if index < self.tasks.len() {
            return Ok(true);
        }
        match self.policy {
            IndexPolicy::Strict => Err(StoreError::IndexOutOfRange {
                index,
                len: self.tasks.len(),
            }),
            IndexPolicy::Lenient => {
                tracing::warn!(
                    target: "store",
                    index,
                    len = self.tasks.len(),
                    "Ignoring out-of-range index"
                );
                Ok(false)
            }
        }
    }
}
