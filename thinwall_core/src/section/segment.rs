//! # Wall Segments
//!
//! A segment is one straight piece of wall mid-line with its own thickness,
//! bending modulus and shear modulus. Segments are validated when built and
//! cannot be mutated afterwards.

use serde::{Deserialize, Serialize};

use super::point::Point;
use crate::errors::{AnalysisError, AnalysisResult};
use crate::materials::WallMaterial;

/// A straight wall piece of a cross-section.
///
/// ## JSON Example
///
/// ```json
/// {
///   "start": { "y": -0.1, "z": 0.05 },
///   "end": { "y": 0.1, "z": 0.05 },
///   "thickness": 0.002,
///   "modulus": 20.0e9,
///   "shear_modulus": 20.0e9,
///   "label": "top cover"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    start: Point,
    end: Point,
    thickness: f64,
    modulus: f64,
    shear_modulus: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,
}

impl Segment {
    /// Build a validated segment.
    ///
    /// Errors raised here report segment index 0; [`Section`](super::Section)
    /// re-validates and reports the segment's real position in the chain.
    ///
    /// # Example
    ///
    /// ```rust
    /// use thinwall_core::section::{Point, Segment};
    ///
    /// let web = Segment::new(Point::new(0.0, -0.05), Point::new(0.0, 0.05), 0.001, 35.0e9, 35.0e9).unwrap();
    /// assert!((web.length() - 0.1).abs() < 1e-12);
    ///
    /// assert!(Segment::new(Point::new(0.0, 0.0), Point::new(1.0, 0.0), 0.0, 1.0e9, 1.0e9).is_err());
    /// ```
    pub fn new(start: Point, end: Point, thickness: f64, modulus: f64, shear_modulus: f64) -> AnalysisResult<Self> {
        let segment = Segment {
            start,
            end,
            thickness,
            modulus,
            shear_modulus,
            label: None,
        };
        segment.validate(0, 0.0)?;
        Ok(segment)
    }

    /// Build a segment whose moduli come from a wall material.
    pub fn with_material(start: Point, end: Point, thickness: f64, material: &WallMaterial) -> AnalysisResult<Self> {
        Segment::new(start, end, thickness, material.modulus, material.shear_modulus)
    }

    /// Attach a display label (e.g. "web", "top cover").
    pub fn labeled(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Check the segment's physical invariants.
    ///
    /// `min_length` is the connection tolerance of the owning section; a segment
    /// not longer than that has no direction.
    pub fn validate(&self, index: usize, min_length: f64) -> AnalysisResult<()> {
        if !self.start.is_finite() || !self.end.is_finite() {
            return Err(AnalysisError::invalid_input(
                format!("segments[{}]", index),
                format!("{:?} -> {:?}", self.start, self.end),
                "Endpoint coordinates must be finite",
            ));
        }
        let properties = [
            ("thickness", self.thickness),
            ("modulus", self.modulus),
            ("shear_modulus", self.shear_modulus),
        ];
        for (property, value) in properties {
            if value.is_nan() || value.is_infinite() {
                return Err(AnalysisError::invalid_input(
                    format!("segments[{}].{}", index, property),
                    value.to_string(),
                    "Value must be finite",
                ));
            }
            if value <= 0.0 {
                return Err(AnalysisError::zero_rigidity(index, property, value));
            }
        }
        if self.length() <= min_length {
            return Err(AnalysisError::malformed_topology(index, "segment has zero length"));
        }
        Ok(())
    }

    /// Start point of the mid-line
    pub fn start(&self) -> Point {
        self.start
    }

    /// End point of the mid-line
    pub fn end(&self) -> Point {
        self.end
    }

    /// Wall thickness (m)
    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    /// Elastic modulus used for bending (Pa)
    pub fn modulus(&self) -> f64 {
        self.modulus
    }

    /// Shear modulus used for torsion and shear (Pa)
    pub fn shear_modulus(&self) -> f64 {
        self.shear_modulus
    }

    /// Optional display label
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Mid-line length (m)
    pub fn length(&self) -> f64 {
        self.start.distance_to(self.end)
    }

    /// Mid-line midpoint
    pub fn midpoint(&self) -> Point {
        (self.start + self.end) * 0.5
    }

    /// Unit tangent from start to end
    pub fn direction(&self) -> Point {
        (self.end - self.start) * (1.0 / self.length())
    }

    /// Unit normal pointing to the left of the tangent
    pub fn left_normal(&self) -> Point {
        let t = self.direction();
        Point::new(-t.z, t.y)
    }

    /// Point at arc length `s` from the start
    pub fn point_at(&self, s: f64) -> Point {
        self.start + self.direction() * s
    }

    /// Modulus-weighted area E·t·L (N)
    pub fn axial_stiffness(&self) -> f64 {
        self.modulus * self.thickness * self.length()
    }

    /// Torsional compliance of the wall, L / (G·t) (1/(N/m))
    pub fn shear_compliance(&self) -> f64 {
        self.length() / (self.shear_modulus * self.thickness)
    }

    /// Signed perpendicular distance from `pole` to the tangent line, r × t.
    ///
    /// Positive when the wall runs counter-clockwise around the pole.
    pub fn perpendicular_distance(&self, pole: Point) -> f64 {
        (self.start - pole).cross(self.direction())
    }

    /// Tangential projection of the radius vector from `pole`, evaluated at `s`.
    pub fn tangential_distance(&self, pole: Point, s: f64) -> f64 {
        (self.point_at(s) - pole).dot(self.direction())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cover() -> Segment {
        Segment::new(Point::new(0.1, 0.05), Point::new(-0.1, 0.05), 0.002, 20.0e9, 20.0e9).unwrap()
    }

    #[test]
    fn test_derived_geometry() {
        let seg = cover();
        assert!((seg.length() - 0.2).abs() < 1e-12);
        assert_eq!(seg.midpoint(), Point::new(0.0, 0.05));
        assert_eq!(seg.direction(), Point::new(-1.0, 0.0));
        assert_eq!(seg.left_normal(), Point::new(0.0, -1.0));
    }

    #[test]
    fn test_perpendicular_distance_sign() {
        // Top cover running in -y direction circulates counter-clockwise about the origin
        let seg = cover();
        assert!((seg.perpendicular_distance(Point::origin()) - 0.05).abs() < 1e-15);
    }

    #[test]
    fn test_compliance() {
        let seg = cover();
        // 0.2 / (20e9 * 0.002) = 5e-9
        assert!((seg.shear_compliance() - 5.0e-9).abs() < 1e-20);
    }

    #[test]
    fn test_zero_thickness_is_zero_rigidity() {
        let err = Segment::new(Point::origin(), Point::new(1.0, 0.0), 0.0, 1.0e9, 1.0e9).unwrap_err();
        assert_eq!(err.error_code(), "ZERO_RIGIDITY");
    }

    #[test]
    fn test_negative_shear_modulus_is_zero_rigidity() {
        let err = Segment::new(Point::origin(), Point::new(1.0, 0.0), 0.001, 1.0e9, -1.0).unwrap_err();
        assert!(matches!(err, AnalysisError::ZeroRigidity { ref property, .. } if property == "shear_modulus"));
    }

    #[test]
    fn test_nan_modulus_is_invalid_input() {
        let err = Segment::new(Point::origin(), Point::new(1.0, 0.0), 0.001, f64::NAN, 1.0e9).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_zero_length_is_malformed() {
        let err = Segment::new(Point::origin(), Point::origin(), 0.001, 1.0e9, 1.0e9).unwrap_err();
        assert_eq!(err.error_code(), "MALFORMED_TOPOLOGY");
    }

    #[test]
    fn test_serialization() {
        let seg = cover().labeled("top cover");
        let json = serde_json::to_string(&seg).unwrap();
        assert!(json.contains("top cover"));
        let roundtrip: Segment = serde_json::from_str(&json).unwrap();
        assert_eq!(seg, roundtrip);
    }
}
