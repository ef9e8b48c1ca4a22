//! # Warping Evaluator
//!
//! Out-of-plane (axial) warping displacement of a twisting section, from the
//! area swept by the radius vector drawn from the twist centre to the wall
//! mid-line.
//!
//! ## Formulas
//!
//! With `A_R(P)` the swept area from the zero-warping reference point to `P`
//! (counter-clockwise positive):
//!
//! - **Open**: `u = −θ'·(2·A_R + n·r_t)`, the primary sectorial term plus the
//!   secondary through-thickness term (`n` = offset along the wall's left
//!   normal, `r_t` = tangential projection of the radius vector).
//! - **Closed**: `u = −2·θ'·(A_R − A·C(P)/C)`, where `C(P) = ∫ ds/(G t)` from the
//!   reference to `P` and `C` is the whole loop. The correction term is the
//!   shear strain of the Bredt flow; it makes `u` single-valued around the loop.
//!
//! ## Indeterminacy
//!
//! Warping is defined up to an additive constant. The caller picks the point
//! where `u = 0` (a point of symmetry when one exists). Choosing another
//! reference shifts every value by the same constant; differences between
//! points do not change.

use serde::{Deserialize, Serialize};

use crate::equations::registry::Equation;
use crate::equations::thin_wall::sectorial_warping;
use crate::errors::{AnalysisError, AnalysisResult};
use crate::section::{NamedPoint, Point, Section, SectionPoint, Topology};

/// Twist centre and zero-warping reference.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WarpingOptions {
    /// Pole of the swept area; the modulus-weighted centroid when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twist_center: Option<Point>,
    /// Point of zero warping; the start of segment 0 when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<SectionPoint>,
}

impl WarpingOptions {
    /// Options with both the twist centre and the zero-warping point fixed.
    pub fn new(twist_center: Point, reference: SectionPoint) -> Self {
        WarpingOptions {
            twist_center: Some(twist_center),
            reference: Some(reference),
        }
    }
}

/// Warping at one named point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointWarping {
    /// Caller's name for the point
    pub name: String,
    /// Where on the wall
    pub point: SectionPoint,
    /// Swept area from the reference (m²)
    pub swept_area: f64,
    /// Axial displacement (m)
    pub displacement: f64,
}

/// Warping displacements for a given twist rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarpingResult {
    /// Twist rate used (rad/m)
    pub twist_rate: f64,
    /// Resolved twist centre
    pub twist_center: Point,
    /// Resolved zero-warping reference
    pub reference: SectionPoint,
    /// One entry per requested point, in request order
    pub displacements: Vec<PointWarping>,
    /// Formula identifier
    pub equation: Equation,
}

impl WarpingResult {
    /// Entry by point name.
    pub fn get(&self, name: &str) -> AnalysisResult<&PointWarping> {
        self.displacements
            .iter()
            .find(|w| w.name == name)
            .ok_or_else(|| AnalysisError::unknown_point(name))
    }
}

/// Warping at `reference_points` with default options.
pub fn compute_warping(section: &Section, twist_rate: f64, reference_points: &[NamedPoint]) -> AnalysisResult<WarpingResult> {
    compute_warping_with(section, twist_rate, reference_points, &WarpingOptions::default())
}

/// Warping at `points` about an explicit twist centre and reference.
///
/// # Example
///
/// ```rust
/// use thinwall_core::calculations::warping::{compute_warping_with, WarpingOptions};
/// use thinwall_core::section::{NamedPoint, Point, Section, SectionPoint, Segment};
///
/// // Web then half a flange of an I-section, twisting about the web centre
/// let web = Segment::new(Point::new(0.0, 0.0), Point::new(0.0, 0.05), 0.005, 54.0e9, 20.9e9).unwrap();
/// let flange = Segment::new(Point::new(0.0, 0.05), Point::new(-0.025, 0.05), 0.001, 42.0e9, 16.3e9).unwrap();
/// let section = Section::new(vec![web, flange]).unwrap();
///
/// let options = WarpingOptions::new(Point::origin(), SectionPoint::new(0, 0.0));
/// let tip = NamedPoint::new("tip", SectionPoint::new(1, 0.025));
/// let result = compute_warping_with(&section, 1.0e-3, &[tip], &options).unwrap();
/// assert!((result.get("tip").unwrap().swept_area - 6.25e-4).abs() < 1e-15);
/// ```
pub fn compute_warping_with(
    section: &Section,
    twist_rate: f64,
    points: &[NamedPoint],
    options: &WarpingOptions,
) -> AnalysisResult<WarpingResult> {
    AnalysisError::require_finite("twist_rate", twist_rate)?;
    let twist_center = match options.twist_center {
        Some(p) if p.is_finite() => p,
        Some(p) => {
            return Err(AnalysisError::invalid_input(
                "twist_center",
                format!("{:?}", p),
                "Coordinates must be finite",
            ))
        }
        None => section.weighted_centroid(),
    };
    let reference = options.reference.unwrap_or(SectionPoint::new(0, 0.0));

    let sweep = SweptArea::new(section, twist_center);
    let (closed_area, equation) = match section.topology() {
        Topology::Open => (None, Equation::OpenSectionWarping),
        Topology::ClosedSingleCell { signed_area } => {
            if signed_area.abs() <= section.settings().area_tolerance {
                return Err(AnalysisError::degenerate_geometry(format!(
                    "enclosed area {:.3e} m² leaves closed-cell warping undefined",
                    signed_area
                )));
            }
            (Some(signed_area), Equation::ClosedSectionWarping)
        }
    };

    // Warping relative to the start of segment 0, before the reference shift
    let raw = |point: &SectionPoint| -> AnalysisResult<(f64, f64)> {
        section.check_point(point)?;
        let area = sweep.from_start(point);
        match closed_area {
            None => {
                let seg = &section.segments()[point.segment];
                let secondary = point.offset * seg.tangential_distance(twist_center, point.s);
                Ok((area, -twist_rate * (2.0 * area + secondary)))
            }
            Some(enclosed) => {
                if point.offset != 0.0 {
                    return Err(AnalysisError::invalid_input(
                        "offset",
                        point.offset.to_string(),
                        "closed-cell warping is evaluated on the mid-line",
                    ));
                }
                let effective = area - enclosed * sweep.compliance_from_start(point) / sweep.total_compliance;
                Ok((area, sectorial_warping(effective, twist_rate)))
            }
        }
    };

    let (reference_area, reference_warping) = raw(&reference)?;
    let mut displacements = Vec::with_capacity(points.len());
    for named in points {
        let (area, warping) = raw(&named.point)?;
        let displacement = warping - reference_warping;
        log::debug!("warping at '{}': A_R = {:.6e} m², u = {:.6e} m", named.name, area - reference_area, displacement);
        displacements.push(PointWarping {
            name: named.name.clone(),
            point: named.point,
            swept_area: area - reference_area,
            displacement,
        });
    }

    Ok(WarpingResult {
        twist_rate,
        twist_center,
        reference,
        displacements,
        equation,
    })
}

/// Running swept area and shear compliance along the chain.
struct SweptArea<'a> {
    section: &'a Section,
    pole: Point,
    /// ½∫p ds up to the start of each segment
    area_starts: Vec<f64>,
    /// ∫ds/(G t) up to the start of each segment
    compliance_starts: Vec<f64>,
    total_compliance: f64,
}

impl<'a> SweptArea<'a> {
    fn new(section: &'a Section, pole: Point) -> Self {
        let mut area_starts = Vec::with_capacity(section.len());
        let mut compliance_starts = Vec::with_capacity(section.len());
        let (mut area, mut compliance) = (0.0, 0.0);
        for seg in section.segments() {
            area_starts.push(area);
            compliance_starts.push(compliance);
            area += 0.5 * seg.perpendicular_distance(pole) * seg.length();
            compliance += seg.shear_compliance();
        }
        SweptArea {
            section,
            pole,
            area_starts,
            compliance_starts,
            total_compliance: compliance,
        }
    }

    fn from_start(&self, point: &SectionPoint) -> f64 {
        let seg = &self.section.segments()[point.segment];
        self.area_starts[point.segment] + 0.5 * seg.perpendicular_distance(self.pole) * point.s
    }

    fn compliance_from_start(&self, point: &SectionPoint) -> f64 {
        let seg = &self.section.segments()[point.segment];
        self.compliance_starts[point.segment] + point.s / (seg.shear_modulus() * seg.thickness())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::torsion::compute_torsion;
    use crate::section::fixtures::*;
    use approx::assert_relative_eq;

    fn box_corners() -> Vec<NamedPoint> {
        vec![
            NamedPoint::new("bottom right", SectionPoint::new(0, 0.0)),
            NamedPoint::new("top right", SectionPoint::new(1, 0.0)),
            NamedPoint::new("top left", SectionPoint::new(2, 0.0)),
            NamedPoint::new("bottom left", SectionPoint::new(3, 0.0)),
        ]
    }

    #[test]
    fn test_composite_box_corner_warping() {
        let section = composite_box();
        let torsion = compute_torsion(&section, 10_000.0).unwrap();
        let options = WarpingOptions::new(Point::origin(), SectionPoint::new(1, 0.1));
        let result = compute_warping_with(&section, torsion.twist_rate, &box_corners(), &options).unwrap();

        assert_relative_eq!(result.get("top right").unwrap().displacement, -0.1339e-3, max_relative = 1e-3);
        assert_relative_eq!(result.get("top left").unwrap().displacement, 0.1339e-3, max_relative = 1e-3);
        // Antisymmetric about both axes
        assert_relative_eq!(
            result.get("bottom right").unwrap().displacement,
            result.get("top left").unwrap().displacement,
            max_relative = 1e-9
        );
        assert_eq!(result.equation, Equation::ClosedSectionWarping);
    }

    #[test]
    fn test_closed_warping_is_single_valued() {
        let section = composite_box();
        let options = WarpingOptions::new(Point::new(0.02, -0.01), SectionPoint::new(0, 0.0));
        let points = [
            NamedPoint::new("start", SectionPoint::new(0, 0.0)),
            NamedPoint::new("end", SectionPoint::new(3, 0.2)),
        ];
        let result = compute_warping_with(&section, 0.1, &points, &options).unwrap();
        assert!(result.displacements[1].displacement.abs() < 1e-15);
    }

    #[test]
    fn test_homogeneous_square_does_not_warp() {
        // A uniform square tube warps nowhere
        let section = homogeneous_box(0.1, 0.1, 0.002, 70.0e9, 27.0e9);
        let result = compute_warping(&section, 0.05, &box_corners()).unwrap();
        for w in &result.displacements {
            assert!(w.displacement.abs() < 1e-15, "{} warps by {}", w.name, w.displacement);
        }
    }

    #[test]
    fn test_reference_shift_adds_a_constant() {
        let section = composite_box();
        let twist = 0.0982;
        let a = compute_warping_with(&section, twist, &box_corners(), &WarpingOptions::new(Point::origin(), SectionPoint::new(1, 0.1))).unwrap();
        let b = compute_warping_with(&section, twist, &box_corners(), &WarpingOptions::new(Point::origin(), SectionPoint::new(2, 0.03))).unwrap();
        let shift = b.displacements[0].displacement - a.displacements[0].displacement;
        assert!(shift.abs() > 1e-6);
        for (x, y) in a.displacements.iter().zip(&b.displacements) {
            assert_relative_eq!(y.displacement - x.displacement, shift, epsilon = 1e-15);
        }
    }

    #[test]
    fn test_open_reference_shift_adds_a_constant() {
        let section = channel(0.025, 0.05, 0.0015, 0.0025, 52.0e9, 20.0e9);
        let points = [
            NamedPoint::new("tip", SectionPoint::new(0, 0.0)),
            NamedPoint::new("corner", SectionPoint::new(1, 0.0)),
            NamedPoint::new("outer face", SectionPoint::with_offset(1, 0.02, 0.001)),
        ];
        let pole = Point::new(-0.01, 0.0);
        let a = compute_warping_with(&section, 0.002, &points, &WarpingOptions::new(pole, SectionPoint::new(1, 0.025))).unwrap();
        let b = compute_warping_with(&section, 0.002, &points, &WarpingOptions::new(pole, SectionPoint::new(2, 0.01))).unwrap();
        let shift = b.displacements[0].displacement - a.displacements[0].displacement;
        for (x, y) in a.displacements.iter().zip(&b.displacements) {
            assert_relative_eq!(y.displacement - x.displacement, shift, epsilon = 1e-18);
        }
    }

    #[test]
    fn test_open_i_section_half_flange() {
        let section = open_polyline(&[(0.0, 0.0), (0.0, 0.05), (-0.025, 0.05)], &[(0.005, 54.0e9, 20.9e9), (0.001, 42.0e9, 16.3e9)]);
        let twist = 0.5 / 87.62667;
        let options = WarpingOptions::new(Point::origin(), SectionPoint::new(0, 0.0));
        let result = compute_warping_with(&section, twist, &[NamedPoint::new("1", SectionPoint::new(1, 0.025))], &options).unwrap();
        let w = result.get("1").unwrap();
        assert_relative_eq!(w.swept_area, 6.25e-4, max_relative = 1e-12);
        assert_relative_eq!(w.displacement, -2.0 * 6.25e-4 * twist, max_relative = 1e-12);
        assert_eq!(result.equation, Equation::OpenSectionWarping);
    }

    #[test]
    fn test_secondary_warping_through_thickness() {
        let section = open_polyline(&[(0.0, 0.0), (0.1, 0.0)], &[(0.004, 70.0e9, 27.0e9)]);
        let pole = Point::origin();
        let options = WarpingOptions::new(pole, SectionPoint::new(0, 0.0));
        let points = [
            NamedPoint::new("mid", SectionPoint::new(0, 0.05)),
            NamedPoint::new("face", SectionPoint::with_offset(0, 0.05, 0.002)),
        ];
        let result = compute_warping_with(&section, 0.1, &points, &options).unwrap();
        // Pole on the strip line: no sectorial term, only −θ'·n·r_t
        assert!(result.displacements[0].displacement.abs() < 1e-18);
        assert_relative_eq!(result.displacements[1].displacement, -0.1 * 0.002 * 0.05, max_relative = 1e-12);
    }

    #[test]
    fn test_closed_offset_rejected() {
        let section = composite_box();
        let points = [NamedPoint::new("face", SectionPoint::with_offset(0, 0.05, 0.0004))];
        let err = compute_warping(&section, 0.1, &points).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_bad_reference_point() {
        let section = composite_box();
        let options = WarpingOptions::new(Point::origin(), SectionPoint::new(8, 0.0));
        assert!(compute_warping_with(&section, 0.1, &[], &options).is_err());
        assert!(compute_warping(&section, f64::NAN, &[]).is_err());
    }
}
