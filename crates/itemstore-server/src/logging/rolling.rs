//! Size-based rolling file writer.
//!
//! `tracing-appender`'s rolling appender only rotates on time boundaries,
//! so file sinks use this writer instead: when the active file would grow
//! past the size threshold it is renamed to `<stem>.<timestamp>.log` and a
//! fresh file is opened. Rotated siblings older than the retention age are
//! pruned after each rotation.
//!
//! The writer is wrapped in `tracing_appender::non_blocking`, which moves
//! all writes (and thus rotations) onto a single worker thread.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

/// A log file that rotates once it exceeds `max_size` bytes.
pub struct RollingFileWriter {
    dir: PathBuf,
    path: PathBuf,
    stem: String,
    max_size: u64,
    retention: Duration,
    file: File,
    written: u64,
}

impl RollingFileWriter {
    /// Open (or create) the active file `dir/file_name` in append mode.
    pub fn new(
        dir: &Path,
        file_name: &str,
        max_size: u64,
        retention: Duration,
    ) -> io::Result<Self> {
        let path = dir.join(file_name);
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let written = file.metadata()?.len();

        let stem = Path::new(file_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(file_name)
            .to_string();

        Ok(Self {
            dir: dir.to_path_buf(),
            path,
            stem,
            max_size,
            retention,
            file,
            written,
        })
    }

    /// Rename the active file aside and start a fresh one.
    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;

        // Microsecond suffix keeps names unique under rapid rotation.
        let timestamp = chrono::Local::now().format("%Y-%m-%d_%H-%M-%S_%6f");
        let rotated = self.dir.join(format!("{}.{}.log", self.stem, timestamp));
        fs::rename(&self.path, &rotated)?;

        self.file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        self.written = 0;

        self.prune();
        Ok(())
    }

    /// Remove rotated files past the retention age. Best effort: errors
    /// are reported to stderr, never propagated (this runs on the
    /// logging worker thread and must not log through the pipeline).
    fn prune(&self) {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(_) => return,
        };

        let prefix = format!("{}.", self.stem);
        let now = SystemTime::now();

        for entry in entries.flatten() {
            let name = entry.file_name();
            let name = match name.to_str() {
                Some(name) => name,
                None => continue,
            };
            if !name.starts_with(&prefix) || entry.path() == self.path {
                continue;
            }

            let modified = match entry.metadata().and_then(|m| m.modified()) {
                Ok(modified) => modified,
                Err(_) => continue,
            };
            let expired = now
                .duration_since(modified)
                .map(|age| age >= self.retention)
                .unwrap_or(false);

            if expired {
                if let Err(e) = fs::remove_file(entry.path()) {
                    eprintln!("Failed to prune rotated log {}: {}", name, e);
                }
            }
        }
    }
}

impl Write for RollingFileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.written > 0 && self.written + buf.len() as u64 > self.max_size {
            self.rotate()?;
        }
        let n = self.file.write(buf)?;
        self.written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}
