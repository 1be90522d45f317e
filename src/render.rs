//! Diagnostic rendering of a sample: the image next to its colourised mask.
//!
//! Kept apart from the data protocol so training code never links a GUI;
//! the interactive window lives in the `viewer` binary.

use std::path::Path;

use image::imageops;
use image::{Rgb, RgbImage};
use ndarray::{Array3, ArrayView3};

use crate::color::{luminance, ColorMap};
use crate::data::dataset::SegmentationDataset;
use crate::data::model::Layout;
use crate::error::{DatasetError, Result};

/// Opacity of the mask when drawn over the image.
pub const OVERLAY_ALPHA: f32 = 0.45;

const LEGEND_HEIGHT: u32 = 24;
const SWATCH: u32 = 16;
const GAP: u32 = 8;
const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegendEntry {
    pub name: String,
    pub color: [u8; 3],
}

/// Everything needed to draw one sample.
#[derive(Debug, Clone)]
pub struct Figure {
    pub index: usize,
    pub title: String,
    pub image: RgbImage,
    pub mask: RgbImage,
    pub overlay: RgbImage,
    pub legend: Vec<LegendEntry>,
}

/// Build the figure for sample `index`.
///
/// The mask is painted with the label colours; the image is brought to
/// 8-bit RGB. The axis order of both comes from the dataset's layouts.
pub fn render<D>(dataset: &D, index: usize) -> Result<Figure>
where
    D: SegmentationDataset + ?Sized,
{
    let sample = dataset.get(index)?;
    let color_map = ColorMap::new(dataset.labels());

    let image = to_display_rgb(&sample.image, dataset.image_layout())?;
    let mask = channels_last(&sample.mask, dataset.mask_layout()).to_owned();
    let mask = color_map.colorize(&mask);
    let overlay = color_map.overlay(&image, &mask, OVERLAY_ALPHA);

    let legend = color_map
        .legend_entries()
        .into_iter()
        .map(|(name, color)| LegendEntry { name, color })
        .collect();

    Ok(Figure {
        index,
        title: format!(
            "Image and mask with index {index} from the dataset {}",
            dataset.name()
        ),
        image,
        mask,
        overlay,
        legend,
    })
}

impl Figure {
    /// Legend strip on top, image and mask side by side below.
    pub fn compose(&self) -> RgbImage {
        self.compose_panels(&[&self.image, &self.mask])
    }

    /// Like [`Figure::compose`] with the overlay as a third panel.
    pub fn compose_with_overlay(&self) -> RgbImage {
        self.compose_panels(&[&self.image, &self.mask, &self.overlay])
    }

    /// Write the composed figure; the format follows the extension.
    pub fn save(&self, path: &Path, with_overlay: bool) -> Result<()> {
        let canvas = if with_overlay {
            self.compose_with_overlay()
        } else {
            self.compose()
        };
        canvas.save(path).map_err(|e| match e {
            image::ImageError::IoError(source) => DatasetError::io(path, source),
            other => DatasetError::Render(format!("{}: {other}", path.display())),
        })?;
        log::info!("Saved figure for sample {} to {}", self.index, path.display());
        Ok(())
    }

    fn compose_panels(&self, panels: &[&RgbImage]) -> RgbImage {
        let legend_width = self.legend.len() as u32 * (SWATCH + GAP) + GAP;
        let gaps = GAP * panels.len().saturating_sub(1) as u32;
        let panels_width = panels.iter().map(|p| p.width()).sum::<u32>() + gaps;
        let width = panels_width.max(legend_width);
        let height = LEGEND_HEIGHT + panels.iter().map(|p| p.height()).max().unwrap_or(0);

        let mut canvas = RgbImage::from_pixel(width, height, BACKGROUND);

        // legend swatches, outlined so black and white both show
        let mut x = GAP;
        let y = (LEGEND_HEIGHT - SWATCH) / 2;
        for entry in &self.legend {
            let border = if luminance(entry.color) > 0.5 {
                Rgb([64, 64, 64])
            } else {
                Rgb([192, 192, 192])
            };
            for dy in 0..SWATCH {
                for dx in 0..SWATCH {
                    let edge = dx == 0 || dy == 0 || dx == SWATCH - 1 || dy == SWATCH - 1;
                    let px = if edge { border } else { Rgb(entry.color) };
                    canvas.put_pixel(x + dx, y + dy, px);
                }
            }
            x += SWATCH + GAP;
        }

        let mut x = 0i64;
        for panel in panels {
            imageops::replace(&mut canvas, *panel, x, LEGEND_HEIGHT as i64);
            x += panel.width() as i64 + GAP as i64;
        }
        canvas
    }
}

/// View an array as `(H, W, C)`.
fn channels_last(a: &Array3<f32>, layout: Layout) -> ArrayView3<'_, f32> {
    match layout {
        Layout::ChannelsLast => a.view(),
        Layout::ChannelsFirst => a.view().permuted_axes([1, 2, 0]),
    }
}

/// Convert an image array to 8-bit RGB for display.
///
/// Values in `[0, 1]` are stretched to `[0, 255]`, values above 255 (16-bit
/// tiles) are scaled down by the maximum; everything is clamped. One or two
/// channels are shown as grey from the first, channels past three are dropped.
pub fn to_display_rgb(image: &Array3<f32>, layout: Layout) -> Result<RgbImage> {
    let view = channels_last(image, layout);
    let (height, width, channels) = view.dim();
    if channels == 0 {
        return Err(DatasetError::Render(
            "cannot display an image with 0 channels".into(),
        ));
    }

    let max = view.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
    let scale = if max <= 1.0 {
        255.0
    } else if max <= 255.0 {
        1.0
    } else {
        255.0 / max
    };
    let to_u8 = |v: f32| (v * scale).round().clamp(0.0, 255.0) as u8;

    Ok(RgbImage::from_fn(width as u32, height as u32, |x, y| {
        let (x, y) = (x as usize, y as usize);
        if channels < 3 {
            let g = to_u8(view[[y, x, 0]]);
            Rgb([g, g, g])
        } else {
            Rgb([
                to_u8(view[[y, x, 0]]),
                to_u8(view[[y, x, 1]]),
                to_u8(view[[y, x, 2]]),
            ])
        }
    }))
}
