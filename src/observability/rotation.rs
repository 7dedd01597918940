//! Size-capped append-only file used by the span exporter.

use chrono::Local;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Number of rotated backups kept next to the live file.
pub const BACKUP_COUNT: usize = 3;

const BACKUP_STAMP_FORMAT: &str = "%Y%m%dT%H%M%S%.3f";

/// Line-oriented file that rolls over once it grows past `max_bytes`.
///
/// A rolled file is renamed to `<name>.<local timestamp>` and only the newest
/// [`BACKUP_COUNT`] backups survive.
pub struct RotatingFile {
    path: PathBuf,
    max_bytes: u64,
    handle: Mutex<Option<File>>,
}

impl RotatingFile {
    #[must_use]
    pub const fn new(path: PathBuf, max_bytes: u64) -> Self {
        Self {
            path,
            max_bytes,
            handle: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends `line` and a newline, rolling the file first if it is over the cap.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if rolling, opening or writing fails.
    pub fn append_line(&self, line: &str) -> io::Result<()> {
        let mut handle = self
            .handle
            .lock()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("trace file lock poisoned: {e}")))?;

        if self.is_over_cap() {
            *handle = None;
            self.roll()?;
        }

        let file = match handle.take() {
            Some(file) => file,
            None => OpenOptions::new().create(true).append(true).open(&self.path)?,
        };
        let file = handle.insert(file);

        writeln!(file, "{line}")?;
        file.flush()
    }

    fn is_over_cap(&self) -> bool {
        fs::metadata(&self.path).is_ok_and(|meta| meta.len() > self.max_bytes)
    }

    fn roll(&self) -> io::Result<()> {
        let stamp = Local::now().format(BACKUP_STAMP_FORMAT);
        let mut backup = self.path.clone().into_os_string();
        backup.push(format!(".{stamp}"));
        fs::rename(&self.path, PathBuf::from(backup))?;

        self.prune_backups()
    }

    /// Backups of this file, oldest first.
    fn backups(&self) -> io::Result<Vec<PathBuf>> {
        let Some(name) = self.path.file_name().and_then(|n| n.to_str()) else {
            return Ok(Vec::new());
        };
        let prefix = format!("{name}.");
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut backups: Vec<PathBuf> = fs::read_dir(dir)?
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with(&prefix))
            })
            .collect();

        // The stamp sorts lexicographically in time order.
        backups.sort();
        Ok(backups)
    }

    fn prune_backups(&self) -> io::Result<()> {
        let backups = self.backups()?;
        let excess = backups.len().saturating_sub(BACKUP_COUNT);
        for stale in &backups[..excess] {
            if let Err(e) = fs::remove_file(stale) {
                tracing::debug!(path = %stale.display(), error = %e, "failed to remove old trace backup");
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for RotatingFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingFile")
            .field("path", &self.path)
            .field("max_bytes", &self.max_bytes)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn appends_lines_below_cap() {
        let dir = TempDir::new().unwrap();
        let file = RotatingFile::new(dir.path().join("spans.jsonl"), 1024);

        file.append_line("{\"a\":1}").unwrap();
        file.append_line("{\"b\":2}").unwrap();

        let text = fs::read_to_string(file.path()).unwrap();
        assert_eq!(text, "{\"a\":1}\n{\"b\":2}\n");
        assert!(file.backups().unwrap().is_empty());
    }

    #[test]
    fn rolls_over_cap_and_keeps_three_backups() {
        let dir = TempDir::new().unwrap();
        let file = RotatingFile::new(dir.path().join("spans.jsonl"), 4);

        for i in 0..6 {
            file.append_line(&format!("line-{i}")).unwrap();
            // Distinct millisecond stamps per backup.
            std::thread::sleep(std::time::Duration::from_millis(5));
        }

        let backups = file.backups().unwrap();
        assert_eq!(backups.len(), BACKUP_COUNT);
        assert_eq!(fs::read_to_string(file.path()).unwrap(), "line-5\n");
        assert_eq!(fs::read_to_string(backups.last().unwrap()).unwrap(), "line-4\n");
    }
}
