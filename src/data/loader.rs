use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageBuffer, ImageReader, Pixel};
use ndarray::Array3;

use crate::error::{DatasetError, Result};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Decode an image file into an `(H, W, C)` array.
///
/// * `grayscale = false` – the decoded samples as stored: 8-bit, 16-bit or
///   float values and the file's own band count (1 to 4)
/// * `grayscale = true`  – converted to 8-bit luma, `C == 1`, values `0..=255`
///
/// The container format is guessed from the file contents first and from the
/// extension otherwise, so GeoTIFF tiles and PNG masks go through the same call.
/// The file handle does not outlive the call.
pub fn image_loader(path: &Path, grayscale: bool) -> Result<Array3<f32>> {
    let img = decode(path)?;
    if grayscale {
        return native_to_array(img.to_luma8());
    }
    match img {
        DynamicImage::ImageLuma8(buf) => native_to_array(buf),
        DynamicImage::ImageLumaA8(buf) => native_to_array(buf),
        DynamicImage::ImageRgb8(buf) => native_to_array(buf),
        DynamicImage::ImageRgba8(buf) => native_to_array(buf),
        DynamicImage::ImageLuma16(buf) => native_to_array(buf),
        DynamicImage::ImageLumaA16(buf) => native_to_array(buf),
        DynamicImage::ImageRgb16(buf) => native_to_array(buf),
        DynamicImage::ImageRgba16(buf) => native_to_array(buf),
        DynamicImage::ImageRgb32F(buf) => native_to_array(buf),
        DynamicImage::ImageRgba32F(buf) => native_to_array(buf),
        other => {
            log::warn!("{}: unrecognised pixel type, converting to 32-bit RGBA", path.display());
            native_to_array(other.to_rgba32f())
        }
    }
}

/// List the regular files of a directory, sorted by file name.
///
/// Sorting pins index `i` to the same file on every run regardless of the
/// order the filesystem enumerates entries in.
pub fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(|e| DatasetError::io(dir, e))? {
        let entry = entry.map_err(|e| DatasetError::io(dir, e))?;
        let path = entry.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

// ---------------------------------------------------------------------------
// Decoding helpers
// ---------------------------------------------------------------------------

fn decode(path: &Path) -> Result<DynamicImage> {
    let reader = ImageReader::open(path)
        .map_err(|e| DatasetError::io(path, e))?
        .with_guessed_format()
        .map_err(|e| DatasetError::io(path, e))?;

    reader.decode().map_err(|source| match source {
        image::ImageError::IoError(e) => DatasetError::io(path, e),
        other => DatasetError::Decode {
            path: path.to_path_buf(),
            source: other,
        },
    })
}

/// Copy an image buffer's samples, widened to `f32`, into an `(H, W, C)` array.
fn native_to_array<P>(buf: ImageBuffer<P, Vec<P::Subpixel>>) -> Result<Array3<f32>>
where
    P: Pixel,
    P::Subpixel: Into<f32>,
{
    let (w, h) = buf.dimensions();
    let raw: Vec<f32> = buf.into_raw().into_iter().map(Into::into).collect();
    interleaved_to_array(raw, h as usize, w as usize, usize::from(P::CHANNEL_COUNT))
}

/// Reshape an interleaved `HWC` pixel buffer into an ndarray.
fn interleaved_to_array<T>(
    raw: Vec<T>,
    height: usize,
    width: usize,
    channels: usize,
) -> Result<Array3<T>> {
    Ok(Array3::from_shape_vec((height, width, channels), raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, ImageBuffer, Luma, Rgb, RgbImage, Rgba, RgbaImage};
    use tempfile::TempDir;

    #[test]
    fn loads_rgb_image_as_hwc() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tile.tif");
        let img = RgbImage::from_fn(4, 3, |x, y| Rgb([x as u8, y as u8, 7]));
        img.save(&path).unwrap();

        let arr = image_loader(&path, false).unwrap();
        assert_eq!(arr.shape(), &[3, 4, 3]);
        assert_eq!(arr[[2, 3, 0]], 3.0);
        assert_eq!(arr[[2, 3, 1]], 2.0);
        assert_eq!(arr[[2, 3, 2]], 7.0);
    }

    #[test]
    fn keeps_sixteen_bit_samples() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tile16.tif");
        let img: ImageBuffer<Rgb<u16>, Vec<u16>> =
            ImageBuffer::from_fn(3, 2, |x, _| Rgb([1000 + x as u16, 2000, 60000]));
        img.save(&path).unwrap();

        let arr = image_loader(&path, false).unwrap();
        assert_eq!(arr.shape(), &[2, 3, 3]);
        assert_eq!(arr[[1, 2, 0]], 1002.0);
        assert_eq!(arr[[0, 0, 1]], 2000.0);
        assert_eq!(arr[[0, 0, 2]], 60000.0);
    }

    #[test]
    fn keeps_alpha_band() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rgba.png");
        let img = RgbaImage::from_pixel(2, 2, Rgba([10, 20, 30, 40]));
        img.save(&path).unwrap();

        let arr = image_loader(&path, false).unwrap();
        assert_eq!(arr.shape(), &[2, 2, 4]);
        assert_eq!(arr[[1, 1, 3]], 40.0);
    }

    #[test]
    fn loads_grayscale_mask_with_single_channel() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mask.png");
        let img = GrayImage::from_fn(5, 2, |x, _| Luma([if x < 2 { 0 } else { 255 }]));
        img.save(&path).unwrap();

        let arr = image_loader(&path, true).unwrap();
        assert_eq!(arr.shape(), &[2, 5, 1]);
        assert_eq!(arr[[0, 0, 0]], 0.0);
        assert_eq!(arr[[1, 4, 0]], 255.0);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = TempDir::new().unwrap();
        let err = image_loader(&dir.path().join("nope.png"), true).unwrap_err();
        assert!(matches!(err, DatasetError::Io { .. }));
    }

    #[test]
    fn garbage_file_is_a_decode_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"definitely not a png").unwrap();
        let err = image_loader(&path, false).unwrap_err();
        assert!(matches!(err, DatasetError::Decode { .. }));
    }

    #[test]
    fn list_files_is_sorted_and_skips_directories() {
        let dir = TempDir::new().unwrap();
        for name in ["c.tif", "a.tif", "b.tif"] {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested")).unwrap();

        let names: Vec<String> = list_files(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.tif", "b.tif", "c.tif"]);
    }
}
