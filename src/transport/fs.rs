use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::constants::output::TEMP_EXTENSION;
use crate::errors::InsightsError;

/// Line-by-line reader over a local text file.
///
/// Lines are yielded without their terminator. Invalid UTF-8 is replaced
/// rather than failing the file, so downstream JSON decoding decides whether
/// the line is usable.
pub struct LineFile {
    path: PathBuf,
    reader: BufReader<File>,
    buffer: Vec<u8>,
}

impl LineFile {
    /// Open `path` for line reading.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, InsightsError> {
        let path = path.into();
        let file = File::open(&path).map_err(|err| InsightsError::InputUnavailable {
            path: path.clone(),
            reason: err.to_string(),
        })?;
        Ok(Self {
            path,
            reader: BufReader::new(file),
            buffer: Vec::new(),
        })
    }

    /// Path this reader was opened on.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Iterator for LineFile {
    type Item = Result<String, InsightsError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buffer.clear();
        match self.reader.read_until(b'\n', &mut self.buffer) {
            Ok(0) => None,
            Ok(_) => {
                while matches!(self.buffer.last(), Some(b'\n' | b'\r')) {
                    self.buffer.pop();
                }
                Some(Ok(String::from_utf8_lossy(&self.buffer).into_owned()))
            }
            Err(err) => Some(Err(InsightsError::InputUnavailable {
                path: self.path.clone(),
                reason: format!("read failed: {err}"),
            })),
        }
    }
}

/// Read and decode a whole-file JSON document.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, InsightsError> {
    let raw = fs::read_to_string(path).map_err(|err| InsightsError::InputUnavailable {
        path: path.to_path_buf(),
        reason: err.to_string(),
    })?;
    serde_json::from_str(&raw).map_err(|err| InsightsError::InputInconsistent {
        path: path.to_path_buf(),
        details: err.to_string(),
    })
}

/// Sibling temp file used while writing `path`: the full file name plus a
/// `.tmp` suffix, so `reviews.json` stages through `reviews.json.tmp`.
pub fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".");
    name.push(TEMP_EXTENSION);
    path.with_file_name(name)
}

/// Write `value` as pretty JSON, replacing `path` atomically.
///
/// The payload goes to a sibling temp file first and is renamed into place,
/// so a failed write never leaves a partial file at `path`.
pub fn write_json_atomic<T: Serialize + ?Sized>(
    path: &Path,
    value: &T,
) -> Result<(), InsightsError> {
    let output_failed = |reason: String| InsightsError::OutputFailed {
        path: path.to_path_buf(),
        reason,
    };

    let parent = path.parent().filter(|dir| !dir.as_os_str().is_empty());
    if let Some(parent) = parent {
        fs::create_dir_all(parent).map_err(|err| {
            output_failed(format!("failed creating dir {}: {err}", parent.display()))
        })?;
    }

    let raw = serde_json::to_vec_pretty(value)
        .map_err(|err| output_failed(format!("failed encoding JSON: {err}")))?;

    let tmp_path = temp_path_for(path);
    fs::write(&tmp_path, raw).map_err(|err| {
        output_failed(format!("failed writing temp {}: {err}", tmp_path.display()))
    })?;
    if let Err(err) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(output_failed(format!("failed replacing output: {err}")));
    }
    debug!("[reviews:fs] wrote {}", path.display());
    Ok(())
}
