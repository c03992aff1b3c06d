//! # Persistence Scenarios
//!
//! File-backed ledger across restarts, with the data directory lock held the
//! way the node holds it.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use pc_02_chain_ledger::{
        DataDirLock, FileLedgerStore, Ledger, NullScorer, SystemTimeSource, CHAIN_FILE,
    };
    use shared_types::{ChainIntegrityError, LedgerError, VoteType};
    use std::path::Path;

    fn open(dir: &Path) -> Result<Ledger, LedgerError> {
        let store = FileLedgerStore::open(dir)?;
        Ledger::open(store, NullScorer, SystemTimeSource)
    }

    fn rewrite_chain(dir: &Path, from: &str, to: &str) {
        let path = dir.join(CHAIN_FILE);
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains(from));
        std::fs::write(&path, contents.replacen(from, to, 1)).unwrap();
    }

    #[test]
    fn test_restart_restores_identical_state() {
        let dir = tempfile::tempdir().unwrap();
        let before = {
            let _lock = DataDirLock::acquire(dir.path()).unwrap();
            let ledger = open(dir.path()).unwrap();
            ledger.submit(register("alice")).unwrap();
            ledger.submit(register("bob")).unwrap();
            let post = ledger.submit(post_image("alice", "cat.png")).unwrap();
            ledger.submit(vote("bob", &post, VoteType::Believe)).unwrap();
            ledger.submit(follow("bob", "alice")).unwrap();
            ledger.snapshot()
        };

        let _lock = DataDirLock::acquire(dir.path()).unwrap();
        let ledger = open(dir.path()).unwrap();
        let after = ledger.snapshot();

        assert_eq!(after, before);
        assert_eq!(
            serde_json::to_vec(&after).unwrap(),
            serde_json::to_vec(&before).unwrap()
        );
        assert_eq!(ledger.audit().unwrap().blocks_verified, 6);
    }

    #[test]
    fn test_tampered_file_is_refused_on_open() {
        let dir = tempfile::tempdir().unwrap();
        {
            let ledger = open(dir.path()).unwrap();
            ledger.submit(register("alice")).unwrap();
            ledger.submit(register("bob")).unwrap();
        }

        rewrite_chain(dir.path(), r#""Sender":"bob""#, r#""Sender":"eve""#);

        let err = open(dir.path()).err().unwrap();
        assert!(matches!(
            err,
            LedgerError::Integrity(ChainIntegrityError::HashMismatch { .. })
        ));
    }

    #[test]
    fn test_tamper_while_running_halts_ledger() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = open(dir.path()).unwrap();
        ledger.submit(register("alice")).unwrap();
        ledger.submit(register("bob")).unwrap();

        rewrite_chain(dir.path(), r#""Sender":"alice""#, r#""Sender":"mallory""#);

        assert!(matches!(ledger.audit(), Err(LedgerError::Integrity(_))));
        assert!(ledger.is_halted());

        let err = ledger.submit(register("carol")).unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Integrity(ChainIntegrityError::Halted { .. })
        ));
        // Reads keep serving the last good state
        assert_eq!(ledger.len(), 3);
        assert!(ledger.snapshot().users.contains_key("alice"));
    }

    #[test]
    fn test_second_writer_is_locked_out() {
        let dir = tempfile::tempdir().unwrap();
        let _held = DataDirLock::acquire(dir.path()).unwrap();
        let second =
            DataDirLock::acquire_with_timeout(dir.path(), std::time::Duration::from_millis(100));
        assert!(second.is_err());
    }
}
