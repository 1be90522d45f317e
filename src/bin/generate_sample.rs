use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use image::{GrayImage, Luma, Rgb, RgbImage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Write a small synthetic dataset in the Amazon Rainforest layout:
/// `images/<id>.tif` RGB tiles and `masks/<id>.png` masks (forest = 255).
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Output dataset root
    #[arg(short, long, default_value = "sample_data")]
    out: PathBuf,

    /// Number of tiles
    #[arg(short, long, default_value_t = 8)]
    count: usize,

    /// Tile edge length in pixels
    #[arg(short, long, default_value_t = 128)]
    size: u32,

    /// RNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

/// A circular patch of forest.
struct Patch {
    cx: f32,
    cy: f32,
    radius: f32,
}

fn random_patches(rng: &mut StdRng, size: u32) -> Vec<Patch> {
    let n = rng.gen_range(2..6);
    let s = size as f32;
    (0..n)
        .map(|_| Patch {
            cx: rng.gen_range(0.0..s),
            cy: rng.gen_range(0.0..s),
            radius: rng.gen_range(s * 0.1..s * 0.35),
        })
        .collect()
}

fn is_forest(patches: &[Patch], x: u32, y: u32) -> bool {
    patches.iter().any(|p| {
        let dx = x as f32 - p.cx;
        let dy = y as f32 - p.cy;
        dx * dx + dy * dy <= p.radius * p.radius
    })
}

fn generate_tile(rng: &mut StdRng, size: u32) -> (RgbImage, GrayImage) {
    let patches = random_patches(rng, size);
    let mut image = RgbImage::new(size, size);
    let mut mask = GrayImage::new(size, size);

    for y in 0..size {
        for x in 0..size {
            let jitter: i16 = rng.gen_range(-12..=12);
            let shade = |base: u8| (base as i16 + jitter).clamp(0, 255) as u8;
            if is_forest(&patches, x, y) {
                image.put_pixel(x, y, Rgb([shade(34), shade(100), shade(40)]));
                mask.put_pixel(x, y, Luma([255]));
            } else {
                image.put_pixel(x, y, Rgb([shade(150), shade(120), shade(80)]));
                mask.put_pixel(x, y, Luma([0]));
            }
        }
    }
    (image, mask)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let images_dir = args.out.join("images");
    let masks_dir = args.out.join("masks");
    std::fs::create_dir_all(&images_dir)
        .with_context(|| format!("creating {}", images_dir.display()))?;
    std::fs::create_dir_all(&masks_dir)
        .with_context(|| format!("creating {}", masks_dir.display()))?;

    let mut rng = StdRng::seed_from_u64(args.seed);
    for i in 0..args.count {
        let (image, mask) = generate_tile(&mut rng, args.size);
        let id = format!("tile_{i:03}");

        let image_path = images_dir.join(format!("{id}.tif"));
        image
            .save(&image_path)
            .with_context(|| format!("writing {}", image_path.display()))?;

        let mask_path = masks_dir.join(format!("{id}.png"));
        mask.save(&mask_path)
            .with_context(|| format!("writing {}", mask_path.display()))?;
    }

    log::info!("Wrote {} tiles to {}", args.count, args.out.display());
    println!(
        "Wrote {} tiles ({}x{}) to {}",
        args.count,
        args.size,
        args.size,
        args.out.display()
    );
    Ok(())
}
