//! Filesystem utilities shared by the loader and the recorder.

use std::path::Path;

use crate::error::Result;

/// Ensure a directory exists, creating it and any parents if necessary.
pub fn ensure_dir(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if !path.is_dir() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Read a file to string, returning `None` if it doesn't exist.
///
/// Any other IO failure (permissions, invalid UTF-8) is still an error.
pub fn read_optional(path: impl AsRef<Path>) -> Result<Option<String>> {
    match std::fs::read_to_string(path.as_ref()) {
        Ok(content) => Ok(Some(content)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err.into()),
    }
}

/// Count lines the way skill budgets are measured: newline separators plus one.
///
/// A trailing newline therefore contributes an extra, empty line, and an
/// empty document still counts as a single line.
#[must_use]
pub fn count_lines(content: &str) -> usize {
    memchr::memchr_iter(b'\n', content.as_bytes()).count() + 1
}
