//! JSON file backed [StateContainer].
//!
//! The whole container (every namespace) is rewritten on each store using an
//! exclusive lock and a temp-file rename, so a crash never leaves a torn file.
use anyhow::{anyhow, Result};
use fs2::FileExt;
use log::{debug, info};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::store::{MemoryState, StateContainer};

#[derive(Debug)]
pub struct JsonStateFile {
    path: PathBuf,
    state: MemoryState,
}

impl JsonStateFile {
    /// Open the state file, starting empty if it does not exist yet.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let state = match fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => MemoryState::new(),
            Ok(content) => serde_json::from_str(&content)
                .map_err(|e| anyhow!("Failed to parse state file {}: {}", path.display(), e))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No state file at {}; starting empty", path.display());
                MemoryState::new()
            }
            Err(e) => return Err(anyhow!("Failed to read state file {}: {}", path.display(), e)),
        };
        Ok(Self { path, state })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, state: &MemoryState) -> Result<()> {
        let content = serde_json::to_string_pretty(state)
            .map_err(|e| anyhow!("Failed to serialize state: {}", e))?;
        write_file_locked(&self.path, &content)?;
        debug!("Persisted state to {}", self.path.display());
        Ok(())
    }
}

impl StateContainer for JsonStateFile {
    fn load(&self, namespace: &str, key: &str) -> Option<String> {
        self.state.load(namespace, key)
    }

    /// The in-memory copy only changes once the file write has succeeded.
    fn store(&mut self, namespace: &str, key: &str, value: &str) -> Result<()> {
        let mut next = self.state.clone();
        next.put(namespace, key, value);
        self.persist(&next)?;
        self.state = next;
        Ok(())
    }
}

fn write_file_locked(path: &Path, content: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let lock_file = OpenOptions::new()
        .create(true)
        .read(true)
        .write(true)
        .truncate(false)
        .open(path)?;
    lock_file.lock_exclusive()?;

    let base = path.file_name().and_then(|s| s.to_str()).unwrap_or("state.json");
    let mut counter = 0u32;
    let tmp_path = loop {
        let candidate = dir.join(format!(".{}.tmp-{}-{}", base, std::process::id(), counter));
        match OpenOptions::new().write(true).create_new(true).open(&candidate) {
            Ok(mut tmp) => {
                tmp.write_all(content.as_bytes())?;
                tmp.flush()?;
                let _ = tmp.sync_all();
                break candidate;
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                counter = counter.saturating_add(1);
            }
            Err(e) => return Err(anyhow!("Failed to create temp file for state write: {}", e)),
        }
    };

    fs::rename(&tmp_path, path)?;
    if let Ok(dir_file) = File::open(dir) {
        let _ = dir_file.sync_all();
    }
    drop(lock_file);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state").join("state.json");
        {
            let mut file = JsonStateFile::open(&path).unwrap();
            file.store("Kit", "valueName", "val2").unwrap();
        }
        let reopened = JsonStateFile::open(&path).unwrap();
        assert_eq!(reopened.load("Kit", "valueName").as_deref(), Some("val2"));
    }

    #[test]
    fn layout_is_namespace_then_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        let mut file = JsonStateFile::open(&path).unwrap();
        file.store("Kit", "announceChanges", "false").unwrap();
        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["Kit"]["announceChanges"], "false");
    }

    #[test]
    fn failed_write_keeps_previous_value() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("sub");
        let path = sub.join("state.json");
        let mut file = JsonStateFile::open(&path).unwrap();
        file.store("Kit", "valueName", "val1").unwrap();

        // Replace the directory with a plain file so the next write cannot land.
        std::fs::remove_dir_all(&sub).unwrap();
        std::fs::write(&sub, "blocked").unwrap();

        assert!(file.store("Kit", "valueName", "val2").is_err());
        assert_eq!(file.load("Kit", "valueName").as_deref(), Some("val1"));
        assert!(file.store("Kit", "statusMarker", "blue").is_err());
        assert_eq!(file.load("Kit", "statusMarker"), None);
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(JsonStateFile::open(&path).is_err());
    }
}
