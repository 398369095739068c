//! File I/O utilities with atomic writes
//!
//! Working files are rewritten through a temp file and a rename, so a crash
//! mid-write leaves the previous version in place.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::error::MonitorError;

/// Open an input file, reporting a missing file as `NotFound`
pub fn open_input<P: AsRef<Path>>(path: P) -> Result<File, MonitorError> {
    let path = path.as_ref();

    File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => MonitorError::NotFound {
            entity_type: "File",
            identifier: path.display().to_string(),
        },
        _ => MonitorError::Io(format!("Failed to open {}: {}", path.display(), e)),
    })
}

/// Write a file atomically (write to temp, then rename)
///
/// `write` receives a buffered writer for the temp file.
pub fn write_atomic<P, F>(path: P, write: F) -> Result<(), MonitorError>
where
    P: AsRef<Path>,
    F: FnOnce(&mut BufWriter<File>) -> Result<(), MonitorError>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| {
                MonitorError::Storage(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    // Temp file in the same directory so the rename stays on one filesystem
    let mut temp_name = path.as_os_str().to_os_string();
    temp_name.push(".tmp");
    let temp_path = std::path::PathBuf::from(temp_name);

    let file = File::create(&temp_path)
        .map_err(|e| MonitorError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    if let Err(e) = write(&mut writer) {
        drop(writer);
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }

    writer
        .flush()
        .map_err(|e| MonitorError::Storage(format!("Failed to flush data: {}", e)))?;

    writer
        .get_ref()
        .sync_all()
        .map_err(|e| MonitorError::Storage(format!("Failed to sync data: {}", e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        MonitorError::Storage(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}

/// Write JSON to a file atomically
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), MonitorError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    write_atomic(path, |writer| {
        serde_json::to_writer_pretty(writer, data)
            .map_err(|e| MonitorError::Storage(format!("Failed to serialize data: {}", e)))
    })
}
