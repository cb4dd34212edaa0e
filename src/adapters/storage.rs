use crate::domain::ports::Storage;
use crate::utils::error::{ExportError, Result};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn resolve(&self, path: &str) -> PathBuf {
        self.base_path.join(path)
    }
}

/// Where the finished output is parked when it cannot be moved onto
/// `destination`: `out.csv` becomes `out_TEMP.csv` in the same directory.
pub fn fallback_path(destination: &Path) -> PathBuf {
    let stem = destination
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("output");

    let name = match destination.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => format!("{}_TEMP.{}", stem, ext),
        None => format!("{}_TEMP", stem),
    };
    destination.with_file_name(name)
}

fn write_atomic(destination: &Path, data: &[u8]) -> Result<()> {
    replace_with(destination, |temp| {
        temp.write_all(data)?;
        temp.flush()?;
        temp.as_file().sync_all()
    })
}

/// Fills a temp file next to `destination` with `fill`, then renames it over
/// `destination`.
fn replace_with<F>(destination: &Path, fill: F) -> Result<()>
where
    F: FnOnce(&mut NamedTempFile) -> std::io::Result<()>,
{
    let dir = match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir)?;

    // Dropping `temp` on any early return removes it.
    let mut temp = tempfile::Builder::new()
        .prefix(".stations-csv-")
        .suffix(".tmp")
        .tempfile_in(&dir)?;
    fill(&mut temp)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        temp.as_file()
            .set_permissions(fs::Permissions::from_mode(0o644))?;
    }

    tracing::debug!(
        "Wrote {}, replacing {}",
        temp.path().display(),
        destination.display()
    );

    let tempfile::PersistError { error, file } = match temp.persist(destination) {
        Ok(_) => return Ok(()),
        Err(err) => err,
    };

    let fallback = fallback_path(destination);
    tracing::warn!(
        "Could not replace {}: {}. Keeping output as {}",
        destination.display(),
        error,
        fallback.display()
    );

    match file.persist(&fallback) {
        Ok(_) => Err(ExportError::ReplaceFailed {
            destination: destination.to_path_buf(),
            fallback,
            source: error,
        }),
        Err(second) => {
            tracing::error!(
                "Could not keep output as {} either: {}",
                fallback.display(),
                second.error
            );
            Err(ExportError::IoError(error))
        }
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = self.resolve(path);
        match fs::read(&full_path) {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(ExportError::SourceNotFound { path: full_path })
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        write_atomic(&self.resolve(path), data)
    }
}
