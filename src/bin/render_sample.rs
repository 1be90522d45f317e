use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use rainforest_seg::{render, AmazonRainforestDataset, SegmentationDatasetConfig};

/// Render one sample (image | mask, with legend) to an image file, no GUI needed.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Dataset root containing `images/` and `masks/`
    #[arg(required_unless_present = "config")]
    data_dir: Option<PathBuf>,

    /// JSON dataset config, used instead of DATA_DIR
    #[arg(long)]
    config: Option<PathBuf>,

    /// Sample index
    #[arg(short, long, default_value_t = 0)]
    index: usize,

    /// Output file (format from extension)
    #[arg(short, long, default_value = "figure.png")]
    out: PathBuf,

    /// Add a third panel with the mask blended over the image
    #[arg(long)]
    overlay: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match (&args.config, &args.data_dir) {
        (Some(path), _) => SegmentationDatasetConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        (None, Some(dir)) => SegmentationDatasetConfig::new(dir),
        (None, None) => anyhow::bail!("either DATA_DIR or --config is required"),
    };

    let dataset = AmazonRainforestDataset::new(config).context("opening dataset")?;
    let figure = render(&dataset, args.index)
        .with_context(|| format!("rendering sample {}", args.index))?;
    figure.save(&args.out, args.overlay)?;

    println!("{}", figure.title);
    for entry in &figure.legend {
        println!("  {:<12} {:?}", entry.name, entry.color);
    }
    println!("saved to {}", args.out.display());
    Ok(())
}
