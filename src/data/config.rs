use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DatasetError, Result};

// ---------------------------------------------------------------------------
// SegmentationDatasetConfig – what a segmentation dataset is built from
// ---------------------------------------------------------------------------

/// Configuration of a segmentation dataset.
///
/// Expected JSON:
///
/// ```json
/// {
///   "data_dir": "/data/amazon_rainforest/train",
///   "transforms": ["min_max_norm_transpose"],
///   "target_transforms": ["transpose"]
/// }
/// ```
///
/// `transforms` and `target_transforms` name built-in transforms, applied in
/// listed order. An empty list means no transform.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SegmentationDatasetConfig {
    /// Root holding the `images` and `masks` subdirectories.
    pub data_dir: PathBuf,
    #[serde(default)]
    pub transforms: Vec<String>,
    #[serde(default)]
    pub target_transforms: Vec<String>,
}

impl SegmentationDatasetConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        SegmentationDatasetConfig {
            data_dir: data_dir.into(),
            ..Default::default()
        }
    }

    pub fn with_transforms<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.transforms = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_target_transforms<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.target_transforms = names.into_iter().map(Into::into).collect();
        self
    }

    /// Parse a config from a JSON string. The result is not validated.
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read and parse a JSON config file. The result is not validated.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| DatasetError::io(path, e))?;
        Self::from_json_str(&text)
    }

    /// Schema check: `data_dir` must be set and name an existing directory.
    pub fn validate(&self) -> Result<()> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(DatasetError::Config("data_dir is required".into()));
        }
        if !self.data_dir.is_dir() {
            return Err(DatasetError::Config(format!(
                "data_dir '{}' is not an existing directory",
                self.data_dir.display()
            )));
        }
        Ok(())
    }

    pub fn images_dir(&self) -> PathBuf {
        self.data_dir.join("images")
    }

    pub fn masks_dir(&self) -> PathBuf {
        self.data_dir.join("masks")
    }
}
