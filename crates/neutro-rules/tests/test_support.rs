//! Shared capability-based filesystem helpers for neutro-rules tests.

use camino::Utf8PathBuf;
use cap_std::ambient_authority;
use cap_std::fs::Dir;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Create a unique temp file path under `target/neutro-rules-tests`.
///
/// # Errors
///
/// Returns any filesystem errors encountered while creating the temp directory.
pub fn unique_temp_path(prefix: &str, file_name: &str) -> io::Result<Utf8PathBuf> {
    static TEMP_COUNTER: AtomicUsize = AtomicUsize::new(0);
    let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let process_id = std::process::id();
    let dir_name = format!("{prefix}-{process_id}-{counter}");
    let dir = Utf8PathBuf::from("target")
        .join("neutro-rules-tests")
        .join(dir_name);
    let root = Dir::open_ambient_dir(".", ambient_authority())?;
    root.create_dir_all(&dir)?;
    Ok(dir.join(file_name))
}

/// Write `contents` to a fresh temp file and return its path.
///
/// # Errors
///
/// Returns any filesystem errors encountered while writing the file.
pub fn write_temp_file(prefix: &str, file_name: &str, contents: &str) -> io::Result<Utf8PathBuf> {
    let path = unique_temp_path(prefix, file_name)?;
    let root = Dir::open_ambient_dir(".", ambient_authority())?;
    root.write(&path, contents)?;
    Ok(path)
}
