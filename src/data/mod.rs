/// Data layer: configuration, decoding, mask encoding and the dataset itself.
///
/// Architecture:
/// ```text
///  data_dir/images/<id>.tif      data_dir/masks/<id>.png
///        │                               │
///        ▼                               ▼
///   ┌──────────┐                   ┌──────────┐
///   │  loader   │ RGB (H,W,3)      │  loader   │ luma (H,W,1)
///   └──────────┘                   └──────────┘
///        │                               │
///        │                               ▼
///        │                         ┌──────────┐
///        │                         │   mask    │  /255, one-hot → (H,W,L)
///        │                         └──────────┘
///        ▼                               ▼
///   ┌─────────────────────────────────────────┐
///   │ transform (optional, image then mask)    │
///   └─────────────────────────────────────────┘
///        │
///        ▼
///     Sample { image, mask }
/// ```

pub mod config;
pub mod dataset;
pub mod loader;
pub mod mask;
pub mod model;
pub mod transform;
