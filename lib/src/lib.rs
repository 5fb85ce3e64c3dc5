//! Low-poly mosaics from raster images.
//!
//! Points are scattered over the image, triangulated under the standard and the furthest-site
//! Delaunay rule, and every triangle is filled with the mean color of the pixels at its vertices.

pub mod color;
pub mod point;
pub mod render;
pub mod sample;
pub mod triangulate;

pub use point::Point;
pub use sample::{generate_points, Distribution};
pub use triangulate::{triangulate, Site, Triangle, Triangulation};

use image::RgbImage;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Degenerate geometry: {points} points contain fewer than three non-collinear ones")]
    DegenerateGeometry { points: usize },

    #[error("Sample coordinate ({x}, {y}) cannot be mapped into a {width}x{height} image")]
    OutOfRangeSample {
        x: f64,
        y: f64,
        width: u32,
        height: u32,
    },

    #[error("Triangle index {index} out of range for {len} points")]
    IndexConsistency { index: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Parameters of one run.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub num_points: usize,
    pub distribution: Distribution,
    /// Seed for the random distribution; fresh entropy when unset.
    pub seed: Option<u64>,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.num_points < 1 {
            return Err(Error::InvalidInput(
                "number of points must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// One triangulation of the shared point set together with its rendering.
#[derive(Clone, Debug)]
pub struct Pass {
    pub triangulation: Triangulation,
    pub image: RgbImage,
}

impl Pass {
    fn new(image: &RgbImage, points: &[Point], site: Site) -> Result<Self> {
        let triangulation = triangulate(points, site)?;
        let image = render::render(image, &triangulation, points)?;

        Ok(Pass {
            triangulation,
            image,
        })
    }
}

/// Both mosaics of an image, built from one point set.
#[derive(Clone, Debug)]
pub struct Mosaic {
    pub points: Vec<Point>,
    pub nearest: Pass,
    pub furthest: Pass,
}

impl Mosaic {
    /// Sample points once and render them under both Delaunay rules.
    ///
    /// Nothing is returned unless both passes succeed.
    pub fn generate(image: &RgbImage, config: &Config) -> Result<Self> {
        config.validate()?;

        let (width, height) = image.dimensions();
        let points = generate_points(
            width,
            height,
            config.num_points,
            config.distribution,
            &mut config.rng(),
        )?;

        let nearest = Pass::new(image, &points, Site::Nearest)?;
        let furthest = Pass::new(image, &points, Site::Furthest)?;

        Ok(Mosaic {
            points,
            nearest,
            furthest,
        })
    }

    /// Source, standard and furthest-site mosaic next to each other.
    pub fn comparison(&self, source: &RgbImage) -> RgbImage {
        render::side_by_side(&[source, &self.nearest.image, &self.furthest.image])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_points() {
        let config = Config {
            num_points: 0,
            distribution: Distribution::Uniform,
            seed: None,
        };
        let image = RgbImage::new(10, 10);

        assert!(matches!(config.validate(), Err(Error::InvalidInput(_))));
        assert!(matches!(
            Mosaic::generate(&image, &config),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn seed_makes_random_runs_repeatable() {
        let image = RgbImage::from_fn(40, 30, |x, y| image::Rgb([x as u8, y as u8, 0]));
        let config = Config {
            num_points: 50,
            distribution: Distribution::Random,
            seed: Some(3),
        };

        let a = Mosaic::generate(&image, &config).unwrap();
        let b = Mosaic::generate(&image, &config).unwrap();

        assert_eq!(a.points, b.points);
        assert_eq!(a.nearest.image, b.nearest.image);
        assert_eq!(a.furthest.image, b.furthest.image);
    }
}
