use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

use ndarray::Axis;

use super::config::SegmentationDatasetConfig;
use super::loader::{image_loader, list_files};
use super::mask::one_hot;
use super::model::{Label, Layout, Sample, LABELS};
use super::transform::{load_transforms, Transform};
use crate::error::{DatasetError, Result};

// ---------------------------------------------------------------------------
// SegmentationDataset – the protocol every segmentation dataset follows
// ---------------------------------------------------------------------------

/// Indexed collection of `(image, one-hot mask)` samples.
///
/// Implementations must be `Send + Sync` so a pipeline may share them across
/// threads; whether concurrent reads are useful is up to the transforms.
pub trait SegmentationDataset: Send + Sync {
    /// Human-readable dataset name.
    fn name(&self) -> &str;

    /// Ordered labels; label `i` is mask channel `i`.
    fn labels(&self) -> &[Label];

    /// Number of samples.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Load and encode sample `index`.
    fn get(&self, index: usize) -> Result<Sample>;

    /// Axis order of `Sample::image` as returned by [`get`](Self::get).
    fn image_layout(&self) -> Layout {
        Layout::ChannelsLast
    }

    /// Axis order of `Sample::mask` as returned by [`get`](Self::get).
    fn mask_layout(&self) -> Layout {
        Layout::ChannelsLast
    }

    fn label_names(&self) -> Vec<&'static str> {
        self.labels().iter().map(|l| l.name).collect()
    }

    fn color_mapping(&self) -> Vec<[u8; 3]> {
        self.labels().iter().map(|l| l.color).collect()
    }

    /// Iterate over all samples in index order.
    fn iter(&self) -> SampleIter<'_, Self>
    where
        Self: Sized,
    {
        SampleIter {
            dataset: self,
            next: 0,
        }
    }
}

/// Sequential iterator over a dataset's samples.
pub struct SampleIter<'a, D: SegmentationDataset> {
    dataset: &'a D,
    next: usize,
}

impl<D: SegmentationDataset> Iterator for SampleIter<'_, D> {
    type Item = Result<Sample>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.dataset.len() {
            return None;
        }
        let item = self.dataset.get(self.next);
        self.next += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = self.dataset.len().saturating_sub(self.next);
        (rest, Some(rest))
    }
}

// ---------------------------------------------------------------------------
// AmazonRainforestDataset
// ---------------------------------------------------------------------------

/// The Amazon Rainforest semantic segmentation dataset.
///
/// GeoTIFF tiles of 512x512 pixels with PNG masks in which forest is white
/// and non-forest is black:
///
/// ```text
///  data_dir/
///    images/<id>.tif
///    masks/<id>.png
/// ```
///
/// Masks are paired to images by file stem only; a missing mask surfaces
/// when that index is read, not at construction.
pub struct AmazonRainforestDataset {
    config: SegmentationDatasetConfig,
    images: Vec<PathBuf>,
    masks: Vec<PathBuf>,
    transform: Option<Box<dyn Transform>>,
    target_transform: Option<Box<dyn Transform>>,
}

impl AmazonRainforestDataset {
    pub const NAME: &'static str = "Amazon Rainforest dataset";
    pub const URL: &'static str = "https://zenodo.org/record/3233081#.YTYm_44zaUk";

    /// Validate the config, build the named transforms and pair every file
    /// in `data_dir/images` with its mask path.
    pub fn new(config: SegmentationDatasetConfig) -> Result<Self> {
        config.validate()?;
        let transform = load_transforms(&config.transforms)?;
        let target_transform = load_transforms(&config.target_transforms)?;

        let mut dataset = AmazonRainforestDataset {
            config,
            images: Vec::new(),
            masks: Vec::new(),
            transform,
            target_transform,
        };
        dataset.load_dataset()?;
        Ok(dataset)
    }

    /// Convenience: `new(SegmentationDatasetConfig::new(data_dir))`.
    pub fn open(data_dir: impl Into<PathBuf>) -> Result<Self> {
        Self::new(SegmentationDatasetConfig::new(data_dir))
    }

    /// Replace the image transform.
    ///
    /// A closure is taken to keep the `(H, W, C)` layout; a transform that
    /// moves channels first must say so through [`Transform::channels_first`].
    pub fn with_transform(mut self, transform: impl Transform + 'static) -> Self {
        self.transform = Some(Box::new(transform));
        self
    }

    /// Replace the mask transform.
    pub fn with_target_transform(mut self, transform: impl Transform + 'static) -> Self {
        self.target_transform = Some(Box::new(transform));
        self
    }

    fn load_dataset(&mut self) -> Result<()> {
        if self.labels().is_empty() {
            return Err(DatasetError::Config(
                "You need to provide the list of labels for the dataset".into(),
            ));
        }

        let masks_dir = self.config.masks_dir();
        let images = list_files(&self.config.images_dir())?;
        if images.is_empty() {
            log::warn!("No images found in {}", self.config.images_dir().display());
        }

        self.masks = images
            .iter()
            .map(|p| masks_dir.join(mask_file_name(p)))
            .collect();
        self.images = images;

        log::info!(
            "{}: {} samples under {}",
            Self::NAME,
            self.images.len(),
            self.config.data_dir.display()
        );
        Ok(())
    }

    pub fn config(&self) -> &SegmentationDatasetConfig {
        &self.config
    }

    pub fn image_path(&self, index: usize) -> Option<&Path> {
        self.images.get(index).map(PathBuf::as_path)
    }

    pub fn mask_path(&self, index: usize) -> Option<&Path> {
        self.masks.get(index).map(PathBuf::as_path)
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.images.len() {
            return Err(DatasetError::IndexOutOfRange {
                index,
                len: self.images.len(),
            });
        }
        Ok(())
    }
}

impl SegmentationDataset for AmazonRainforestDataset {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn labels(&self) -> &[Label] {
        &LABELS
    }

    fn len(&self) -> usize {
        self.images.len()
    }

    fn image_layout(&self) -> Layout {
        layout_of(self.transform.as_deref())
    }

    fn mask_layout(&self) -> Layout {
        layout_of(self.target_transform.as_deref())
    }

    fn get(&self, index: usize) -> Result<Sample> {
        self.check_index(index)?;
        let image_path = &self.images[index];
        let mask_path = &self.masks[index];
        log::debug!("Loading sample {index}: {}", image_path.display());

        let image = image_loader(image_path, false)?;
        let raw_mask = image_loader(mask_path, true)?;

        let (ih, iw, _) = image.dim();
        let (mh, mw, _) = raw_mask.dim();
        if (ih, iw) != (mh, mw) {
            return Err(DatasetError::ShapeMismatch {
                index,
                image: (ih, iw),
                mask: (mh, mw),
            });
        }

        let mask = one_hot(raw_mask.index_axis(Axis(2), 0), self.labels().len());

        let image = match &self.transform {
            Some(t) => t.apply(image),
            None => image,
        };
        let mask = match &self.target_transform {
            Some(t) => t.apply(mask),
            None => mask,
        };
        Ok(Sample { image, mask })
    }
}

impl fmt::Debug for AmazonRainforestDataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AmazonRainforestDataset")
            .field("data_dir", &self.config.data_dir)
            .field("len", &self.images.len())
            .field("transform", &self.transform.is_some())
            .field("target_transform", &self.target_transform.is_some())
            .finish()
    }
}

fn layout_of(transform: Option<&dyn Transform>) -> Layout {
    Layout::from_channels_first(transform.is_some_and(|t| t.channels_first()))
}

/// `<stem>.png` for an image path; the stem is everything before the last `.`.
/// A name without a dot keeps its full name as the stem. Works on the raw
/// `OsStr`, so names that are not valid UTF-8 still pair.
fn mask_file_name(image: &Path) -> OsString {
    let mut name = image.file_stem().unwrap_or_default().to_os_string();
    name.push(".png");
    name
}
