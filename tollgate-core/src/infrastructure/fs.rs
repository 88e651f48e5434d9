// tollgate-core/src/infrastructure/fs.rs

use crate::infrastructure::error::InfrastructureError;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// Writes `content` next to `path` in a temporary file, then renames it over `path`.
///
/// Readers either see the previous document or the new one, never a truncated file.
/// Missing parent directories are created first.
pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(
    path: P,
    content: C,
) -> Result<(), InfrastructureError> {
    let path = path.as_ref();
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;

    // Same directory as the target so the rename never crosses filesystems
    let mut temp_file = tempfile::NamedTempFile::new_in(parent)?;
    temp_file.write_all(content.as_ref())?;
    temp_file
        .persist(path)
        .map_err(|e| InfrastructureError::Io(e.error))?;

    Ok(())
}

/// Serializes `data` as YAML and writes it atomically.
pub fn atomic_write_yaml<T: Serialize>(path: &Path, data: &T) -> Result<(), InfrastructureError> {
    let content = serde_yaml::to_string(data)?;
    atomic_write(path, content)
}
