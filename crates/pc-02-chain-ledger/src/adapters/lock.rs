//! # Data Directory Lock
//!
//! Uses `fs2` for cross-platform file locking (flock on Unix, LockFile on
//! Windows). One process may hold a data directory at a time, which keeps the
//! ledger a single writer across processes.

use fs2::FileExt;
use shared_types::StorageError;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Lock file name inside the data directory.
pub const LOCK_FILE: &str = "LOCK";

/// How long `acquire` keeps retrying a held lock.
const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(2);

/// Exclusive lock on a data directory, released on drop.
#[derive(Debug)]
pub struct DataDirLock {
    /// Kept open to maintain the lock.
    file: File,
    path: PathBuf,
    pid: u32,
}

impl DataDirLock {
    /// Acquire the lock, retrying with backoff for up to two seconds.
    pub fn acquire(data_dir: &Path) -> Result<Self, StorageError> {
        Self::acquire_with_timeout(data_dir, DEFAULT_LOCK_TIMEOUT)
    }

    pub fn acquire_with_timeout(data_dir: &Path, timeout: Duration) -> Result<Self, StorageError> {
        std::fs::create_dir_all(data_dir).map_err(|e| StorageError::Io(e.to_string()))?;

        let deadline = Instant::now() + timeout;
        let lock_path = data_dir.join(LOCK_FILE);
        let mut retry_delay = Duration::from_millis(50);

        loop {
            // Opened without truncation so a holder's PID stays readable.
            let file = OpenOptions::new()
                .create(true)
                .read(true)
                .write(true)
                .truncate(false)
                .open(&lock_path)
                .map_err(|e| StorageError::Io(e.to_string()))?;

            if file.try_lock_exclusive().is_ok() {
                let pid = std::process::id();
                let mut file = file;
                write_pid(&mut file, pid).map_err(|e| StorageError::Io(e.to_string()))?;

                tracing::info!("[pc-02] 🔒 Acquired data directory lock {}", lock_path.display());
                return Ok(Self {
                    file,
                    path: lock_path,
                    pid,
                });
            }
            drop(file);

            if Instant::now() >= deadline {
                let holder = read_existing_pid(&lock_path)
                    .map(|pid| format!("held by process {}", pid))
                    .unwrap_or_else(|| "held by another process".to_string());
                return Err(StorageError::Locked(format!(
                    "{} ({})",
                    lock_path.display(),
                    holder
                )));
            }

            std::thread::sleep(retry_delay);
            retry_delay = (retry_delay * 2).min(Duration::from_millis(500));
        }
    }

    /// PID of the process holding the lock.
    pub fn pid(&self) -> u32 {
        self.pid
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for DataDirLock {
    fn drop(&mut self) {
        #[allow(clippy::incompatible_msrv)]
        let _ = self.file.unlock();
        let _ = std::fs::remove_file(&self.path);
    }
}

fn write_pid(file: &mut File, pid: u32) -> std::io::Result<()> {
    file.set_len(0)?;
    writeln!(file, "{}", pid)?;
    file.sync_all()
}

fn read_existing_pid(path: &Path) -> Option<u32> {
    std::fs::read_to_string(path)
        .ok()
        .and_then(|s| s.trim().parse().ok())
}
