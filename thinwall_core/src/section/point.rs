//! Planar points in the section's local (y, z) plane, in meters.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// A point (or vector) in the section plane.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate
    pub y: f64,
    /// Vertical coordinate
    pub z: f64,
}

impl Point {
    /// Create a point from explicit coordinates.
    pub const fn new(y: f64, z: f64) -> Self {
        Point { y, z }
    }

    /// The origin of the section plane.
    pub const fn origin() -> Self {
        Point { y: 0.0, z: 0.0 }
    }

    /// Scalar cross product `self × other` (positive when `other` is counter-clockwise).
    pub fn cross(self, other: Point) -> f64 {
        self.y * other.z - self.z * other.y
    }

    /// Dot product.
    pub fn dot(self, other: Point) -> f64 {
        self.y * other.y + self.z * other.z
    }

    /// Euclidean norm.
    pub fn norm(self) -> f64 {
        self.y.hypot(self.z)
    }

    /// Distance to another point.
    pub fn distance_to(self, other: Point) -> f64 {
        (other - self).norm()
    }

    /// True when both coordinates are finite.
    pub fn is_finite(self) -> bool {
        self.y.is_finite() && self.z.is_finite()
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Point {
    type Output = Point;
    fn mul(self, rhs: f64) -> Point {
        Point::new(self.y * rhs, self.z * rhs)
    }
}

impl From<(f64, f64)> for Point {
    fn from((y, z): (f64, f64)) -> Self {
        Point::new(y, z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cross_orientation() {
        let east = Point::new(1.0, 0.0);
        let north = Point::new(0.0, 1.0);
        assert_eq!(east.cross(north), 1.0);
        assert_eq!(north.cross(east), -1.0);
    }

    #[test]
    fn test_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(0.2, 0.15);
        assert!((a.distance_to(b) - 0.25).abs() < 1e-15);
    }

    #[test]
    fn test_arithmetic() {
        let p = Point::new(1.0, 2.0) + Point::new(0.5, -1.0) * 2.0;
        assert_eq!(p, Point::new(2.0, 0.0));
        assert_eq!(p - Point::new(2.0, 0.0), Point::origin());
    }
}
