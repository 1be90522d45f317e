use std::fmt;

use ndarray::Array3;

// ---------------------------------------------------------------------------
// Label – a named semantic class with its display colour
// ---------------------------------------------------------------------------

/// A semantic class of the segmentation task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Label {
    pub name: &'static str,
    /// Display colour as `[r, g, b]`.
    pub color: [u8; 3],
}

impl Label {
    pub const fn new(name: &'static str, color: [u8; 3]) -> Self {
        Label { name, color }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Labels of the Amazon Rainforest masks, in channel order.
/// Forest is white in the masks, non-forest is black.
pub const LABELS: [Label; 2] = [
    Label::new("Background", [0, 0, 0]),
    Label::new("Forest", [255, 255, 255]),
];

// ---------------------------------------------------------------------------
// Layout – axis order of a sample array
// ---------------------------------------------------------------------------

/// Axis order of an image or mask after transforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// `(H, W, C)`, as decoded.
    #[default]
    ChannelsLast,
    /// `(C, H, W)`.
    ChannelsFirst,
}

impl Layout {
    pub fn from_channels_first(channels_first: bool) -> Self {
        if channels_first {
            Layout::ChannelsFirst
        } else {
            Layout::ChannelsLast
        }
    }
}

// ---------------------------------------------------------------------------
// Sample – one (image, one-hot mask) pair
// ---------------------------------------------------------------------------

/// A decoded sample as returned by random access.
///
/// Without transforms the image is `(H, W, C)` with raw pixel values and the
/// mask is `(H, W, num_labels)` with `0.0`/`1.0` entries.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub image: Array3<f32>,
    pub mask: Array3<f32>,
}

impl Sample {
    /// Split into the `(image, mask)` tuple consumed by training loops.
    pub fn into_parts(self) -> (Array3<f32>, Array3<f32>) {
        (self.image, self.mask)
    }
}
