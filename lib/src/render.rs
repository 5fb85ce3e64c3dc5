use crate::color;
use crate::point::Point;
use crate::triangulate::Triangulation;
use crate::Result;
use image::{imageops, Rgb, RgbImage};
use imageproc::drawing::{draw_line_segment_mut, draw_polygon_mut};

pub const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);

fn fill_triangle(canvas: &mut RgbImage, vertices: &[Point; 3], color: Rgb<u8>) {
    let corners = vertices.map(|p| imageproc::point::Point::new(p.x.round() as i32, p.y.round() as i32));

    if corners[0] != corners[1] && corners[1] != corners[2] && corners[0] != corners[2] {
        draw_polygon_mut(canvas, &corners, color);
        return;
    }

    // Collapsed to a segment or a single pixel, which the polygon filler refuses.
    for (start, end) in [(0, 1), (1, 2), (2, 0)] {
        draw_line_segment_mut(
            canvas,
            (corners[start].x as f32, corners[start].y as f32),
            (corners[end].x as f32, corners[end].y as f32),
            color,
        );
    }
}

/// Paint every triangle with the mean color of the source pixels under its vertices.
///
/// The canvas has the size of `image` and starts out white. Triangles are painted in order as
/// solid polygons including their outline, so later triangles overwrite shared edges.
pub fn render(image: &RgbImage, triangulation: &Triangulation, points: &[Point]) -> Result<RgbImage> {
    let (width, height) = image.dimensions();
    let mut canvas = RgbImage::from_pixel(width, height, BACKGROUND);

    for triangle in &triangulation.triangles {
        let vertices = triangle.vertices(points)?;
        let color = color::resolve_color(image, &vertices)?;
        fill_triangle(&mut canvas, &vertices, color);
    }

    Ok(canvas)
}

/// Place images next to each other, top-aligned, on a white strip.
pub fn side_by_side(images: &[&RgbImage]) -> RgbImage {
    let width = images.iter().map(|img| img.width()).sum();
    let height = images.iter().map(|img| img.height()).max().unwrap_or(0);
    let mut strip = RgbImage::from_pixel(width, height, BACKGROUND);
    let mut x = 0i64;

    for img in images {
        imageops::replace(&mut strip, *img, x, 0);
        x += img.width() as i64;
    }

    strip
}
