use std::path::{Path, PathBuf};

/// Get the base storage directory following XDG Base Directory Specification.
/// Returns `$XDG_DATA_HOME/taskpad`, falling back to the platform data dir.
pub fn get_data_dir() -> PathBuf {
    if let Ok(xdg_data) = std::env::var("XDG_DATA_HOME") {
        return PathBuf::from(xdg_data).join("taskpad");
    }

    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("taskpad")
}

/// Get the logs directory path.
/// Returns `{data_dir}/logs`.
pub fn get_log_dir() -> PathBuf {
    get_data_dir().join("logs")
}

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_dir_structure() {
        let data = get_data_dir();
        assert!(data.ends_with("taskpad"));

        let logs = get_log_dir();
        assert!(logs.ends_with("logs"));
    }

    #[test]
    fn test_ensure_dir_creates_nested() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("a").join("b");
        ensure_dir(&nested).unwrap();
        assert!(nested.is_dir());

        // Second call is a no-op on an existing directory
        ensure_dir(&nested).unwrap();
    }
}
