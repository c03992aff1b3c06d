use crate::ports::outbound::LedgerStore;
use shared_types::{Block, StorageError};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// File name of the chain inside the data directory.
pub const CHAIN_FILE: &str = "chain.jsonl";

/// Append-only JSON-lines block store.
///
/// One block per line, in sequence order. Appends are a single write
/// followed by `sync_data`; a failed append truncates the file back to its
/// previous length so no partial line survives.
pub struct FileLedgerStore {
    path: PathBuf,
    file: File,
    len: u64,
}

impl FileLedgerStore {
    /// Open (or create) `<data_dir>/chain.jsonl`.
    pub fn open(data_dir: &Path) -> Result<Self, StorageError> {
        std::fs::create_dir_all(data_dir).map_err(io_error)?;
        let path = data_dir.join(CHAIN_FILE);

        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&path)
            .map_err(io_error)?;
        let len = file.metadata().map_err(io_error)?.len();

        if len > 0 {
            tracing::info!(
                "[pc-02] 💾 Found existing chain file: {} ({} bytes)",
                path.display(),
                len
            );
        } else {
            tracing::info!("[pc-02] 📁 New chain file at {}", path.display());
        }

        Ok(Self { path, file, len })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn rollback(&mut self) {
        if let Err(e) = self.file.set_len(self.len) {
            tracing::error!(
                "[pc-02] failed to roll back partial append on {}: {}",
                self.path.display(),
                e
            );
        }
    }
}

impl LedgerStore for FileLedgerStore {
    fn load(&self) -> Result<Vec<Block>, StorageError> {
        let file = File::open(&self.path).map_err(io_error)?;
        let mut blocks = Vec::new();

        for (number, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(io_error)?;
            if line.trim().is_empty() {
                continue;
            }
            let block: Block = serde_json::from_str(&line).map_err(|e| {
                StorageError::Serialization(format!(
                    "{} line {}: {}",
                    self.path.display(),
                    number + 1,
                    e
                ))
            })?;
            blocks.push(block);
        }

        tracing::debug!(
            "[pc-02] loaded {} blocks from {}",
            blocks.len(),
            self.path.display()
        );
        Ok(blocks)
    }

    fn append(&mut self, block: &Block) -> Result<(), StorageError> {
        let mut line =
            serde_json::to_vec(block).map_err(|e| StorageError::Serialization(e.to_string()))?;
        line.push(b'\n');

        let written = self
            .file
            .write_all(&line)
            .and_then(|()| self.file.sync_data());
        if let Err(e) = written {
            self.rollback();
            return Err(io_error(e));
        }

        self.len += line.len() as u64;
        Ok(())
    }
}

fn io_error(e: std::io::Error) -> StorageError {
    StorageError::Io(e.to_string())
}
