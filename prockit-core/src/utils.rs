//! Small file utilities.

use std::fs::OpenOptions;
use std::path::Path;
use std::time::SystemTime;

use crate::error::CoreResult;

/// Creates `path` if it does not exist, otherwise bumps its modification
/// time to now. Pipeline scripts use the timestamp as a cheap done-marker.
pub fn touch_file(path: &Path) -> CoreResult<()> {
    let file = OpenOptions::new().append(true).create(true).open(path)?;
    file.set_modified(SystemTime::now())?;
    Ok(())
}
