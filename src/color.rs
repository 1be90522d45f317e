use image::{Rgb, RgbImage};
use ndarray::{Array3, Axis};
use palette::{LinSrgb, Mix, Srgb};

use crate::data::model::Label;

// ---------------------------------------------------------------------------
// Colour blending
// ---------------------------------------------------------------------------

/// Blend `over` onto `base` with weight `alpha` in linear RGB.
pub fn blend(base: [u8; 3], over: [u8; 3], alpha: f32) -> [u8; 3] {
    let mixed = to_linear(base).mix(to_linear(over), alpha.clamp(0.0, 1.0));
    let out: Srgb<u8> = Srgb::<f32>::from_linear(mixed).into_format();
    [out.red, out.green, out.blue]
}

/// Perceived brightness of a colour in `[0, 1]` (linear-light luminance).
pub fn luminance(c: [u8; 3]) -> f32 {
    let lin = to_linear(c);
    0.2126 * lin.red + 0.7152 * lin.green + 0.0722 * lin.blue
}

fn to_linear(c: [u8; 3]) -> LinSrgb<f32> {
    Srgb::new(c[0], c[1], c[2]).into_format::<f32>().into_linear()
}

// ---------------------------------------------------------------------------
// Colour mapping: label → RGB
// ---------------------------------------------------------------------------

/// Maps mask channels to the display colours of their labels.
#[derive(Debug, Clone)]
pub struct ColorMap {
    entries: Vec<(String, [u8; 3])>,
}

impl ColorMap {
    /// Channel `i` takes the colour of `labels[i]`.
    pub fn new(labels: &[Label]) -> Self {
        ColorMap {
            entries: labels
                .iter()
                .map(|l| (l.name.to_string(), l.color))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Colour for a channel index, if it has a label.
    pub fn color_for(&self, channel: usize) -> Option<[u8; 3]> {
        self.entries.get(channel).map(|(_, c)| *c)
    }

    /// Return the legend entries (label name → colour) for display.
    pub fn legend_entries(&self) -> Vec<(String, [u8; 3])> {
        self.entries.clone()
    }

    /// Paint a one-hot `(H, W, L)` mask.
    ///
    /// Every pixel whose channel `i` equals `1.0` gets colour `i`; later
    /// channels win on overlap and pixels with no active channel stay black.
    /// Channels beyond the label list are ignored.
    pub fn colorize(&self, mask: &Array3<f32>) -> RgbImage {
        let (height, width, channels) = mask.dim();
        let mut out = RgbImage::new(width as u32, height as u32);
        for (i, (_, color)) in self.entries.iter().enumerate().take(channels) {
            let plane = mask.index_axis(Axis(2), i);
            for ((y, x), &v) in plane.indexed_iter() {
                if v == 1.0 {
                    out.put_pixel(x as u32, y as u32, Rgb(*color));
                }
            }
        }
        out
    }

    /// Blend the colourised mask over an RGB image.
    ///
    /// Both images must have the same dimensions; the result has the
    /// dimensions of `image`.
    pub fn overlay(&self, image: &RgbImage, colorized: &RgbImage, alpha: f32) -> RgbImage {
        RgbImage::from_fn(image.width(), image.height(), |x, y| {
            let base = image.get_pixel(x, y).0;
            match colorized.get_pixel_checked(x, y) {
                Some(over) => Rgb(blend(base, over.0, alpha)),
                None => Rgb(base),
            }
        })
    }
}
