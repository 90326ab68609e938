//! Persistence for LPF documents - save/load JSON files.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde_json::Value;

use crate::error::{ConflateError, Result};

use super::document::FeatureCollection;

impl FeatureCollection {
    /// Save the collection as pretty-printed JSON.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use lpconflate::FeatureCollection;
    /// # fn example(collection: &FeatureCollection) -> lpconflate::Result<()> {
    /// collection.save("battles.lpf.json")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    ConflateError::Persistence(format!(
                        "Failed to create directory '{}': {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let file = File::create(path).map_err(|e| {
            ConflateError::Persistence(format!("Failed to create file '{}': {}", path.display(), e))
        })?;

        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)
            .map_err(|e| ConflateError::Persistence(format!("Failed to serialize document: {}", e)))?;
        writer
            .flush()
            .map_err(|e| ConflateError::Persistence(format!("Failed to write file '{}': {}", path.display(), e)))?;

        Ok(())
    }
}

/// Load any JSON document for validation.
///
/// The result is deliberately untyped: the validator must be able to report on
/// documents that do not match [`FeatureCollection`].
pub fn load_document(path: impl AsRef<Path>) -> Result<Value> {
    let path = path.as_ref();

    let file = File::open(path)
        .map_err(|e| ConflateError::Persistence(format!("Failed to open file '{}': {}", path.display(), e)))?;

    let reader = BufReader::new(file);
    serde_json::from_reader(reader)
        .map_err(|e| ConflateError::Persistence(format!("Failed to parse document '{}': {}", path.display(), e)))
}
