//! Output file handling

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Write a token listing next to the source file, with a `.tokens`
/// extension. Returns the path written.
pub fn write_token_listing(source: &Path, listing: &str) -> io::Result<PathBuf> {
    let mut path = source.to_path_buf();
    path.set_extension("tokens");
    fs::write(&path, listing)?;
    Ok(path)
}
