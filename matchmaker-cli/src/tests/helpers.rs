//! Filesystem fixtures shared by the CLI tests.

use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

/// Temporary directory with a UTF-8 root path.
pub(super) fn utf8_tempdir() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    (tmp, root)
}

/// Write `contents` to `path`, creating or truncating it.
pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path, contents).expect("write fixture file");
}

/// Create an empty neighborhood database at `path`.
pub(super) fn create_database(path: &Utf8Path) {
    matchmaker_data::SqliteNeighborhoodStore::open(path.as_std_path())
        .expect("create neighborhood database");
}
