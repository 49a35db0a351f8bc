//! Capability-scoped file reads.
//!
//! Files are read through a `cap_std` directory handle opened on the
//! parent directory, so a path can only reach the file it names.

use std::io;

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs::Dir;

/// Reads a UTF-8 file relative to its parent directory.
///
/// # Errors
///
/// Returns an I/O error if the path has no file name, the parent directory
/// cannot be opened, or the file cannot be read as UTF-8.
pub(crate) fn read_to_string(path: &Utf8Path) -> io::Result<String> {
    let file_name = path.file_name().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "path must name a file")
    })?;
    let dir = open_parent_dir(path)?;
    dir.read_to_string(file_name)
}

/// Opens the parent directory of `path` with ambient authority.
///
/// # Errors
///
/// Returns any filesystem error raised while opening the directory.
fn open_parent_dir(path: &Utf8Path) -> io::Result<Dir> {
    let parent = path
        .parent()
        .filter(|dir| !dir.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    Dir::open_ambient_dir(parent, ambient_authority())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_paths_without_file_name() {
        let err = read_to_string(Utf8Path::new("..")).expect_err("expected error");
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn reads_fixture_relative_to_crate_root() {
        let path = Utf8Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("fixtures")
            .join("materials.json");
        let contents = read_to_string(&path).expect("read fixture");
        assert!(contents.contains("\"version\": 1"));
    }
}
