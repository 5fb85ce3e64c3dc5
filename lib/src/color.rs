use crate::point::Point;
use crate::{Error, Result};
use image::{Rgb, RgbImage};

/// Map a coordinate onto the pixel grid: truncate towards zero, then clamp into the image.
///
/// Coordinates exactly on the right or bottom border (and slightly past any border) land on the
/// nearest edge pixel. Only non-finite coordinates fail.
pub fn pixel_index(image: &RgbImage, p: &Point) -> Result<(u32, u32)> {
    let (width, height) = image.dimensions();

    if !p.is_finite() || width == 0 || height == 0 {
        return Err(Error::OutOfRangeSample {
            x: p.x,
            y: p.y,
            width,
            height,
        });
    }

    let clamp = |v: f64, extent: u32| (v.trunc() as i64).clamp(0, extent as i64 - 1) as u32;

    Ok((clamp(p.x, width), clamp(p.y, height)))
}

pub fn sample_pixel(image: &RgbImage, p: &Point) -> Result<Rgb<u8>> {
    let (x, y) = pixel_index(image, p)?;
    Ok(*image.get_pixel(x, y))
}

/// Fill color of a triangle: per-channel mean of the pixels under its vertices, truncated.
pub fn resolve_color(image: &RgbImage, vertices: &[Point; 3]) -> Result<Rgb<u8>> {
    let mut sum = [0u32; 3];

    for vertex in vertices {
        let pixel = sample_pixel(image, vertex)?;

        for (acc, channel) in sum.iter_mut().zip(pixel.0.iter()) {
            *acc += *channel as u32;
        }
    }

    Ok(Rgb(sum.map(|channel| (channel / 3) as u8)))
}
