use anyhow::{Context, Result};
use clap::Parser;
use image::{ImageFormat, RgbImage};
use log::{debug, info, warn};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use trimosaic::{Config, Distribution, Mosaic, Pass, Point};

#[derive(Parser)]
#[command(about = "Render Delaunay and furthest-site Delaunay mosaics of an image")]
pub struct Options {
    #[arg(long, short)]
    input: PathBuf,

    /// Standard Delaunay mosaic
    #[arg(long, short, default_value = "delaunay_art.png")]
    output: PathBuf,

    /// Furthest-site mosaic, defaults to `<output>_furthest.png`
    #[arg(long)]
    furthest_output: Option<PathBuf>,

    #[arg(long, short, default_value = "1000")]
    num_points: usize,

    /// random (0) or uniform (1)
    #[arg(long, short, default_value = "random")]
    distribution: Distribution,

    #[arg(long)]
    seed: Option<u64>,

    /// Write original and both mosaics side by side
    #[arg(long)]
    comparison: Option<PathBuf>,

    /// Dump the sampled points as JSON
    #[arg(long)]
    points_json: Option<PathBuf>,
}

fn furthest_path(output: &Path) -> PathBuf {
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "delaunay_art".to_string());

    output.with_file_name(format!("{stem}_furthest.png"))
}

/// An output file, fully encoded before anything touches the disk.
struct Output {
    path: PathBuf,
    data: Vec<u8>,
}

impl Output {
    fn image(image: &RgbImage, path: &Path) -> Result<Self> {
        let format = ImageFormat::from_path(path)
            .with_context(|| format!("Unsupported output format {}", path.display()))?;
        let mut data = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut data), format)
            .with_context(|| format!("Failed to encode {}", path.display()))?;

        Ok(Output {
            path: path.to_path_buf(),
            data,
        })
    }

    fn points(points: &[Point], path: &Path) -> Result<Self> {
        Ok(Output {
            path: path.to_path_buf(),
            data: serde_json::to_vec(points)?,
        })
    }
}

/// Write all outputs or none: files already written are removed again if a later one fails.
fn write_all(outputs: &[Output]) -> Result<()> {
    for (index, output) in outputs.iter().enumerate() {
        if let Err(err) = std::fs::write(&output.path, &output.data) {
            for written in &outputs[..index] {
                if let Err(err) = std::fs::remove_file(&written.path) {
                    warn!("Failed to remove {}: {}", written.path.display(), err);
                }
            }

            return Err(err).with_context(|| format!("Failed to write {}", output.path.display()));
        }

        info!("Result saved at {}", output.path.display());
    }

    Ok(())
}

fn report(name: &str, pass: &Pass) {
    info!("{} triangulation: {} triangles", name, pass.triangulation.len());
}

fn main() -> Result<()> {
    env_logger::init();

    let opt = Options::parse();

    let config = Config {
        num_points: opt.num_points,
        distribution: opt.distribution,
        seed: opt.seed,
    };
    config.validate()?;

    let img = image::open(&opt.input)
        .with_context(|| format!("Failed to open {}", opt.input.display()))?
        .to_rgb8();
    let (width, height) = img.dimensions();
    info!("Loaded {}x{} image", width, height);

    info!(
        "Sample {} points with {} distribution",
        config.num_points, config.distribution
    );
    let mosaic = Mosaic::generate(&img, &config)?;
    info!("Generated {} points", mosaic.points.len());
    debug!("Points: {:?}", mosaic.points);

    report("Delaunay", &mosaic.nearest);
    report("Furthest-site Delaunay", &mosaic.furthest);

    let furthest_output = opt
        .furthest_output
        .clone()
        .unwrap_or_else(|| furthest_path(&opt.output));

    let mut outputs = vec![
        Output::image(&mosaic.nearest.image, &opt.output)?,
        Output::image(&mosaic.furthest.image, &furthest_output)?,
    ];

    if let Some(path) = &opt.comparison {
        outputs.push(Output::image(&mosaic.comparison(&img), path)?);
    }

    if let Some(path) = &opt.points_json {
        outputs.push(Output::points(&mosaic.points, path)?);
    }

    write_all(&outputs)
}
