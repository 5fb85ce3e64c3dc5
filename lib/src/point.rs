use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Sub;
use voronator::delaunator;

#[derive(Copy, Clone, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    pub fn distance_squared(&self, other: &Self) -> f64 {
        let xs = self.x - other.x;
        let ys = self.y - other.y;
        (xs * xs) + (ys * ys)
    }

    /// Z component of `(b - a) × (c - a)`. Positive if `a`, `b`, `c` turn counter-clockwise in a
    /// y-up frame.
    pub fn cross(a: &Self, b: &Self, c: &Self) -> f64 {
        (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Point")
            .field("x", &self.x)
            .field("y", &self.y)
            .finish()
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

impl From<&Point> for delaunator::Point {
    fn from(p: &Point) -> Self {
        delaunator::Point { x: p.x, y: p.y }
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.distance_squared(other) < 0.00001 * 0.00001
    }
}
