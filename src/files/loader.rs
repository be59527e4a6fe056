//! Background file loading with stale-completion rejection
//!
//! File reads run on a short-lived background thread and complete through a
//! channel polled once per frame, so a slow read never blocks the UI. Each
//! load carries a generation number; starting a new load or editing the
//! document bumps the generation, and completions from a superseded
//! generation are discarded instead of overwriting newer content.
//! No cancellation of the read itself and no timeouts.

use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;

use log::debug;

use crate::error::{Error, Result};

/// A completed background read.
pub struct LoadedFile {
    /// Generation this load was started under
    pub generation: u64,
    /// Source path of the read
    pub path: PathBuf,
    /// File contents, or the read error
    pub result: Result<String>,
}

/// Coordinates background file reads for the app.
pub struct FileLoader {
    tx: Sender<LoadedFile>,
    rx: Receiver<LoadedFile>,
    generation: u64,
}

impl Default for FileLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl FileLoader {
    pub fn new() -> Self {
        let (tx, rx) = channel();
        Self {
            tx,
            rx,
            generation: 0,
        }
    }

    /// Start reading `path` on a background thread.
    ///
    /// Any in-flight load becomes stale. Returns the new generation.
    pub fn begin_load(&mut self, path: PathBuf) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        let generation = self.generation;
        let tx = self.tx.clone();
        thread::spawn(move || {
            let result = std::fs::read_to_string(&path).map_err(|source| Error::FileRead {
                path: path.clone(),
                source,
            });
            // The receiver may be gone during shutdown
            let _ = tx.send(LoadedFile {
                generation,
                path,
                result,
            });
        });
        generation
    }

    /// Mark any in-flight load as stale without starting a new one.
    ///
    /// Called when the user edits the document, so a read that completes
    /// afterwards cannot overwrite the edit.
    pub fn supersede(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    /// Whether a generation is still the latest.
    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }

    /// Drain completed loads, returning the first non-stale one.
    pub fn poll(&mut self) -> Option<LoadedFile> {
        while let Ok(loaded) = self.rx.try_recv() {
            if self.is_current(loaded.generation) {
                return Some(loaded);
            }
            debug!(
                "Discarding stale file load (generation {} < {}): {}",
                loaded.generation,
                self.generation,
                loaded.path.display()
            );
        }
        None
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::{Duration, Instant};

    fn write_temp(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    fn poll_until(loader: &mut FileLoader, deadline: Duration) -> Option<LoadedFile> {
        let start = Instant::now();
        while start.elapsed() < deadline {
            if let Some(loaded) = loader.poll() {
                return Some(loaded);
            }
            thread::sleep(Duration::from_millis(5));
        }
        None
    }

    #[test]
    fn test_load_completes_with_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(&dir, "doc.md", "# Loaded\n");

        let mut loader = FileLoader::new();
        let generation = loader.begin_load(path.clone());

        let loaded = poll_until(&mut loader, Duration::from_secs(5)).expect("load timed out");
        assert_eq!(loaded.generation, generation);
        assert_eq!(loaded.path, path);
        assert_eq!(loaded.result.unwrap(), "# Loaded\n");
    }

    #[test]
    fn test_missing_file_reports_error() {
        let mut loader = FileLoader::new();
        loader.begin_load(PathBuf::from("/no/such/file.md"));

        let loaded = poll_until(&mut loader, Duration::from_secs(5)).expect("load timed out");
        assert!(matches!(loaded.result, Err(Error::FileRead { .. })));
    }

    #[test]
    fn test_newer_load_supersedes_older() {
        let dir = tempfile::tempdir().unwrap();
        let first = write_temp(&dir, "first.md", "first");
        let second = write_temp(&dir, "second.md", "second");

        let mut loader = FileLoader::new();
        let old_generation = loader.begin_load(first);
        let new_generation = loader.begin_load(second);
        assert!(!loader.is_current(old_generation));
        assert!(loader.is_current(new_generation));

        // Only the second load may ever surface
        let start = Instant::now();
        let mut delivered = Vec::new();
        while start.elapsed() < Duration::from_secs(5) && delivered.is_empty() {
            if let Some(loaded) = loader.poll() {
                delivered.push(loaded);
            }
            thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].generation, new_generation);
        assert_eq!(delivered[0].result.as_ref().unwrap(), "second");
    }

    #[test]
    fn test_edit_supersedes_inflight_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(&dir, "doc.md", "stale content");

        let mut loader = FileLoader::new();
        loader.begin_load(path);
        loader.supersede();

        // The completed read must never be delivered
        assert!(poll_until(&mut loader, Duration::from_millis(300)).is_none());
    }
}
