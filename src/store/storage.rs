//! File access and the startup migration chain.
//!
//! The store of record is `todo_data.json` in the app data directory.
//! Installations that still carry the pipe-delimited `todo_list.txt` from
//! the earliest builds are migrated forward once: the line file is loaded,
//! rewritten as structured JSON, and retired to a `.bak` file.

use super::format::{self, SchemaVersion};
use super::types::TaskList;
use crate::shared::errors::StoreError;
use crate::shared::paths::ensure_dir;
use std::path::{Path, PathBuf};

pub const STRUCTURED_FILE: &str = "todo_data.json";
pub const LEGACY_FILE: &str = "todo_list.txt";

pub fn structured_path(dir: &Path) -> PathBuf {
    dir.join(STRUCTURED_FILE)
}

pub fn legacy_path(dir: &Path) -> PathBuf {
    dir.join(LEGACY_FILE)
}

/// Reads the backing file in the given format.
///
/// A missing file is the first run and an unreadable one is logged; both
/// load as the empty list rather than an error.
pub fn load_tasks(path: &Path, format: SchemaVersion) -> TaskList {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
        Err(err) => {
            tracing::warn!(
                target: "store",
                path = %path.display(),
                %err,
                "Cannot read backing file, starting empty"
            );
            return Vec::new();
        }
    };

    format::decode(format, &content)
}

/// Serializes the full list to the backing file, truncating prior contents.
pub fn save_tasks(path: &Path, format: SchemaVersion, tasks: &TaskList) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }

    let content = format::encode(format, tasks)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Startup chain: prefer the structured file, migrating the legacy line
/// file forward if it is all we have. Returns the structured path and the
/// loaded list.
pub fn load_or_migrate(dir: &Path) -> Result<(PathBuf, TaskList), StoreError> {
    let json_path = structured_path(dir);
    if json_path.exists() {
        let tasks = load_tasks(&json_path, SchemaVersion::Structured);
        return Ok((json_path, tasks));
    }

    let old_path = legacy_path(dir);
    if old_path.exists() {
        tracing::info!(
            target: "store",
            "Found legacy {}, migrating to {}",
            LEGACY_FILE,
            STRUCTURED_FILE
        );
        let tasks = load_tasks(&old_path, SchemaVersion::LegacyLines);
        save_tasks(&json_path, SchemaVersion::Structured, &tasks)?;

        let backup_path = old_path.with_extension("txt.bak");
        if let Err(err) = std::fs::rename(&old_path, &backup_path) {
            tracing::warn!(target: "store", %err, "Could not retire the legacy file");
        } else {
            tracing::info!(target: "store", "Legacy file backed up to {:?}", backup_path);
        }

        return Ok((json_path, tasks));
    }

    Ok((json_path, Vec::new()))
}
