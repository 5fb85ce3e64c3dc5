use crate::point::Point;
use crate::{Error, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the main body of the point set is spread over the image.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Distribution {
    Random,
    Uniform,
}

impl FromStr for Distribution {
    type Err = Error;

    /// Accepts the names as well as the numeric codes `0` (random) and `1` (uniform).
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "random" | "0" => Ok(Distribution::Random),
            "uniform" | "1" => Ok(Distribution::Uniform),
            other => Err(Error::InvalidInput(format!(
                "unknown distribution '{other}', expected random (0) or uniform (1)"
            ))),
        }
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distribution::Random => write!(f, "random"),
            Distribution::Uniform => write!(f, "uniform"),
        }
    }
}

/// Points inset by one pixel from each image corner, in the order they are appended.
pub fn corners(width: u32, height: u32) -> [Point; 4] {
    let right = width.saturating_sub(1) as f64;
    let bottom = height.saturating_sub(1) as f64;

    [
        Point::new(1.0, 1.0),
        Point::new(right, 1.0),
        Point::new(1.0, bottom),
        Point::new(right, bottom),
    ]
}

/// Grid step along an axis of `extent` pixels. Truncated like the point count it derives from, but
/// never zero.
fn grid_step(extent: u32, count: usize) -> usize {
    ((extent as f64 / (count as f64).sqrt()) as usize).max(1)
}

/// Generate the triangulation vertices for a `width` x `height` image.
///
/// The `count` sampled points come first and the four [`corners`] are always appended after them,
/// even if they duplicate sampled points. In uniform mode the grid starts at 1 on both axes and
/// runs up to and including the image extent, so the number of grid points only approximates
/// `count`.
pub fn generate_points<R: Rng + ?Sized>(
    width: u32,
    height: u32,
    count: usize,
    distribution: Distribution,
    rng: &mut R,
) -> Result<Vec<Point>> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidInput(format!(
            "image dimensions must be positive, got {width}x{height}"
        )));
    }

    if count < 1 {
        return Err(Error::InvalidInput(
            "number of points must be at least 1".to_string(),
        ));
    }

    let mut points = match distribution {
        Distribution::Random => (0..count)
            .map(|_| {
                let x = rng.gen::<f64>() * width as f64;
                let y = rng.gen::<f64>() * height as f64;
                Point::new(x, y)
            })
            .collect::<Vec<_>>(),
        Distribution::Uniform => {
            let step_x = grid_step(width, count);
            let step_y = grid_step(height, count);
            let mut points = Vec::new();

            for x in (1..=width).step_by(step_x) {
                for y in (1..=height).step_by(step_y) {
                    points.push(Point::new(x as f64, y as f64));
                }
            }

            points
        }
    };

    points.extend_from_slice(&corners(width, height));

    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn corners_are_appended_last() {
        for distribution in [Distribution::Random, Distribution::Uniform] {
            let points = generate_points(640, 480, 50, distribution, &mut rng()).unwrap();
            let tail = &points[points.len() - 4..];

            assert_eq!(tail, &corners(640, 480)[..]);
            assert_eq!(tail[3], Point::new(639.0, 479.0));
        }
    }

    #[test]
    fn point_count_is_at_least_requested() {
        for &(width, height, count) in &[(1, 1, 1), (4, 4, 4), (10, 10, 10), (300, 200, 1000), (7, 90, 33)] {
            for distribution in [Distribution::Random, Distribution::Uniform] {
                let points = generate_points(width, height, count, distribution, &mut rng()).unwrap();
                assert!(
                    points.len() >= count,
                    "{distribution} {width}x{height}: {} < {count}",
                    points.len()
                );
            }
        }
    }

    #[test]
    fn random_points_stay_in_bounds() {
        let points = generate_points(120, 80, 5000, Distribution::Random, &mut rng()).unwrap();
        let sampled = &points[..points.len() - 4];

        assert_eq!(sampled.len(), 5000);
        assert!(sampled
            .iter()
            .all(|p| (0.0..120.0).contains(&p.x) && (0.0..80.0).contains(&p.y)));
    }

    #[test]
    fn random_points_depend_on_seed() {
        let a = generate_points(100, 100, 20, Distribution::Random, &mut StdRng::seed_from_u64(1)).unwrap();
        let b = generate_points(100, 100, 20, Distribution::Random, &mut StdRng::seed_from_u64(1)).unwrap();
        let c = generate_points(100, 100, 20, Distribution::Random, &mut StdRng::seed_from_u64(2)).unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn uniform_grid_follows_step_formula() {
        // step = trunc(100 / sqrt(10)) = 31 horizontally, trunc(50 / sqrt(10)) = 15 vertically
        let points = generate_points(100, 50, 10, Distribution::Uniform, &mut rng()).unwrap();
        let grid = &points[..points.len() - 4];

        let xs = [1.0, 32.0, 63.0, 94.0];
        let ys = [1.0, 16.0, 31.0, 46.0];
        assert_eq!(grid.len(), xs.len() * ys.len());

        for (i, p) in grid.iter().enumerate() {
            assert_eq!(*p, Point::new(xs[i / ys.len()], ys[i % ys.len()]));
        }
    }

    #[test]
    fn uniform_grid_is_deterministic() {
        let a = generate_points(333, 217, 400, Distribution::Uniform, &mut StdRng::seed_from_u64(1)).unwrap();
        let b = generate_points(333, 217, 400, Distribution::Uniform, &mut StdRng::seed_from_u64(99)).unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn uniform_grid_reaches_image_extent() {
        // 4x4 with four points: step 2, x and y in {1, 3}
        let points = generate_points(4, 4, 4, Distribution::Uniform, &mut rng()).unwrap();

        assert_eq!(
            points,
            vec![
                Point::new(1.0, 1.0),
                Point::new(1.0, 3.0),
                Point::new(3.0, 1.0),
                Point::new(3.0, 3.0),
                Point::new(1.0, 1.0),
                Point::new(3.0, 1.0),
                Point::new(1.0, 3.0),
                Point::new(3.0, 3.0),
            ]
        );
    }

    #[test]
    fn dense_uniform_grid_does_not_stall() {
        let points = generate_points(3, 3, 100, Distribution::Uniform, &mut rng()).unwrap();

        assert_eq!(points.len(), 9 + 4);
    }

    #[test]
    fn rejects_invalid_input() {
        assert!(matches!(
            generate_points(0, 10, 5, Distribution::Random, &mut rng()),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            generate_points(10, 0, 5, Distribution::Uniform, &mut rng()),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            generate_points(10, 10, 0, Distribution::Random, &mut rng()),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn parses_distribution_names_and_codes() {
        assert_eq!("random".parse::<Distribution>().unwrap(), Distribution::Random);
        assert_eq!("0".parse::<Distribution>().unwrap(), Distribution::Random);
        assert_eq!("Uniform".parse::<Distribution>().unwrap(), Distribution::Uniform);
        assert_eq!("1".parse::<Distribution>().unwrap(), Distribution::Uniform);
        assert!(matches!("2".parse::<Distribution>(), Err(Error::InvalidInput(_))));
    }
}
