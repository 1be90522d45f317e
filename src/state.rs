use std::path::PathBuf;

use rainforest_seg::render::{render, Figure};
use rainforest_seg::{AmazonRainforestDataset, SegmentationDataset};

// ---------------------------------------------------------------------------
// Viewer state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct ViewerState {
    /// Loaded dataset (None until user opens a folder).
    pub dataset: Option<AmazonRainforestDataset>,

    /// Index of the sample on screen.
    pub index: usize,

    /// Figure for `index` (None if loading it failed).
    pub figure: Option<Figure>,

    /// Draw the mask over the image instead of next to it.
    pub show_overlay: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Set whenever `figure` changes so the app re-uploads textures.
    figure_changed: bool,
}

impl ViewerState {
    /// Open the dataset rooted at `data_dir` and show its first sample.
    pub fn open_dataset(&mut self, data_dir: PathBuf) {
        match AmazonRainforestDataset::open(&data_dir) {
            Ok(dataset) => {
                log::info!("Opened {} with {} samples", data_dir.display(), dataset.len());
                self.dataset = Some(dataset);
                self.status_message = None;
                self.index = 0;
                self.figure = None;
                self.figure_changed = true;
                self.go_to(0);
            }
            Err(e) => {
                log::error!("Failed to open dataset: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Number of samples in the open dataset.
    pub fn len(&self) -> usize {
        self.dataset.as_ref().map_or(0, |ds| ds.len())
    }

    /// Jump to `index` and rebuild the figure. Out-of-range indices are ignored.
    pub fn go_to(&mut self, index: usize) {
        let Some(dataset) = &self.dataset else {
            return;
        };
        if index >= dataset.len() {
            return;
        }
        self.index = index;
        match render(dataset, index) {
            Ok(figure) => {
                self.figure = Some(figure);
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to render sample {index}: {e}");
                self.figure = None;
                self.status_message = Some(format!("Error: {e}"));
            }
        }
        self.figure_changed = true;
    }

    pub fn next(&mut self) {
        self.go_to(self.index + 1);
    }

    pub fn previous(&mut self) {
        if let Some(i) = self.index.checked_sub(1) {
            self.go_to(i);
        }
    }

    /// Return and clear the "figure changed" flag.
    pub fn take_figure_changed(&mut self) -> bool {
        std::mem::take(&mut self.figure_changed)
    }
}
