use crate::point::Point;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use voronator::delaunator;

/// Which Delaunay rule builds the triangles.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Site {
    /// Standard Delaunay triangulation: no point lies inside any circumcircle.
    Nearest,
    /// Furthest-site Delaunay triangulation: every circumcircle encloses all points. Only convex
    /// hull vertices take part.
    Furthest,
}

/// Three distinct indices into the point set the triangle was built from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Triangle(pub [usize; 3]);

impl Triangle {
    /// Look up the vertex coordinates. An index outside `points` means the triangle belongs to a
    /// different point set.
    pub fn vertices(&self, points: &[Point]) -> Result<[Point; 3]> {
        let lookup = |index: usize| {
            points.get(index).copied().ok_or(Error::IndexConsistency {
                index,
                len: points.len(),
            })
        };

        Ok([lookup(self.0[0])?, lookup(self.0[1])?, lookup(self.0[2])?])
    }

    /// Unsigned area, zero for degenerate triangles.
    pub fn area(&self, points: &[Point]) -> Result<f64> {
        let [a, b, c] = self.vertices(points)?;
        Ok(Point::cross(&a, &b, &c).abs() / 2.0)
    }
}

#[derive(Clone, Debug)]
pub struct Triangulation {
    pub site: Site,
    pub triangles: Vec<Triangle>,
}

impl Triangulation {
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Sum of all triangle areas.
    pub fn area(&self, points: &[Point]) -> Result<f64> {
        self.triangles.iter().map(|t| t.area(points)).sum()
    }
}

/// Triangulate `points` under the given rule.
///
/// Both rules tile the convex hull of `points`. Fails with [`Error::DegenerateGeometry`] unless
/// the set contains at least three non-collinear points.
pub fn triangulate(points: &[Point], site: Site) -> Result<Triangulation> {
    let degenerate = || Error::DegenerateGeometry {
        points: points.len(),
    };

    if points.iter().any(|p| !p.is_finite()) {
        return Err(degenerate());
    }

    // delaunator cannot seed a triangle when every point coincides
    match points.first() {
        Some(first) if points.iter().any(|p| p != first) => {}
        _ => return Err(degenerate()),
    }

    let input = points
        .iter()
        .map(delaunator::Point::from)
        .collect::<Vec<_>>();

    let delaunay = delaunator::triangulate(&input).ok_or_else(degenerate)?;

    let triangles = match site {
        Site::Nearest => delaunay
            .triangles
            .chunks_exact(3)
            .map(|t| Triangle([t[0], t[1], t[2]]))
            .collect::<Vec<_>>(),
        Site::Furthest => furthest_site(points, &delaunay.hull),
    };

    if triangles.is_empty() {
        return Err(degenerate());
    }

    Ok(Triangulation { site, triangles })
}

/// Positive if `p` lies strictly inside the circumcircle of `a`, `b`, `c`, negative if outside,
/// independent of the winding of `a`, `b`, `c`.
fn in_circle(a: &Point, b: &Point, c: &Point, p: &Point) -> f64 {
    let d = *a - *p;
    let e = *b - *p;
    let f = *c - *p;

    let ap = d.x * d.x + d.y * d.y;
    let bp = e.x * e.x + e.y * e.y;
    let cp = f.x * f.x + f.y * f.y;

    let det = d.x * (e.y * cp - bp * f.y) - d.y * (e.x * cp - bp * f.x) + ap * (e.x * f.y - e.y * f.x);

    det * Point::cross(a, b, c).signum()
}

/// Hull vertices with the ones lying on a straight hull edge removed.
fn strictly_convex(points: &[Point], hull: &[usize]) -> Vec<usize> {
    let n = hull.len();

    if n < 3 {
        return hull.to_vec();
    }

    (0..n)
        .filter(|&i| {
            let prev = &points[hull[(i + n - 1) % n]];
            let next = &points[hull[(i + 1) % n]];
            Point::cross(prev, &points[hull[i]], next) != 0.0
        })
        .map(|i| hull[i])
        .collect()
}

/// Triangulate the convex hull so that every circumcircle contains all hull vertices.
///
/// Starting from a hull edge, the apex over a chord is the chain vertex seen under the smallest
/// angle, i.e. the one whose circle through the chord no other chain vertex escapes. Each chord then
/// splits the chain in two.
fn furthest_site(points: &[Point], hull: &[usize]) -> Vec<Triangle> {
    let polygon = strictly_convex(points, hull);

    if polygon.len() < 3 {
        return Vec::new();
    }

    let mut triangles = Vec::with_capacity(polygon.len() - 2);
    let mut chords = vec![(0, polygon.len() - 1)];

    while let Some((lo, hi)) = chords.pop() {
        if hi - lo < 2 {
            continue;
        }

        let a = &points[polygon[lo]];
        let b = &points[polygon[hi]];
        let mut apex = lo + 1;

        for candidate in lo + 2..hi {
            if in_circle(a, b, &points[polygon[apex]], &points[polygon[candidate]]) < 0.0 {
                apex = candidate;
            }
        }

        triangles.push(Triangle([polygon[lo], polygon[apex], polygon[hi]]));
        chords.push((lo, apex));
        chords.push((apex, hi));
    }

    triangles
}
