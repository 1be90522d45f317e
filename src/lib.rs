//! # rainforest-seg
//!
//! Loader for the Amazon Rainforest forest/non-forest segmentation dataset.
//!
//! - [`AmazonRainforestDataset`] pairs `images/<id>.<ext>` with `masks/<id>.png`
//!   and returns `(image, one-hot mask)` samples
//! - [`Transform`] hooks for the image and the mask
//! - [`render`](render::render) builds a side-by-side diagnostic figure
//!
//! ```no_run
//! use rainforest_seg::{AmazonRainforestDataset, SegmentationDataset};
//!
//! let ds = AmazonRainforestDataset::open("data/amazon/train")?;
//! let (image, mask) = ds.get(0)?.into_parts();
//! assert_eq!(mask.shape()[2], ds.labels().len());
//! # let _ = image;
//! # Ok::<(), rainforest_seg::DatasetError>(())
//! ```

pub mod color;
pub mod data;
pub mod error;
pub mod render;

pub use color::ColorMap;
pub use data::config::SegmentationDatasetConfig;
pub use data::dataset::{AmazonRainforestDataset, SampleIter, SegmentationDataset};
pub use data::loader::image_loader;
pub use data::model::{Label, Layout, Sample, LABELS};
pub use data::transform::{Compose, MinMaxNorm, Transform, Transpose};
pub use error::{DatasetError, Result};
pub use render::{render, Figure, LegendEntry};
