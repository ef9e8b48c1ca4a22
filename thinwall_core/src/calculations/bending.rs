//! # Bending Stress
//!
//! Direct stress at named wall points under biaxial bending of a
//! heterogeneous section. The strain field is linear over the section; the
//! stress at a point is that strain times the modulus of the wall it sits in,
//! so stress jumps where walls of different moduli meet.
//!
//! Coordinates are taken relative to the modulus-weighted centroid, so the
//! stiffness tensor must be centroidal.

use serde::{Deserialize, Serialize};

use crate::calculations::stiffness::StiffnessTensor;
use crate::equations::registry::Equation;
use crate::equations::thin_wall::bending_strain;
use crate::errors::{AnalysisError, AnalysisResult};
use crate::section::{NamedPoint, Point, Section, SectionPoint};

/// Bending moments about the centroidal axes (N·m).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BendingMoments {
    /// M_y, positive stretches +z fibres
    #[serde(default)]
    pub m_y: f64,
    /// M_z, positive compresses +y fibres
    #[serde(default)]
    pub m_z: f64,
}

impl BendingMoments {
    /// Moments about the y and z axes (N·m).
    pub fn new(m_y: f64, m_z: f64) -> Self {
        BendingMoments { m_y, m_z }
    }
}

/// Stress at one named point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointStress {
    /// Caller's name for the point
    pub name: String,
    /// Where on the wall
    pub point: SectionPoint,
    /// Absolute coordinates
    pub location: Point,
    /// Modulus of the wall at the point (Pa)
    pub modulus: f64,
    /// Axial strain
    pub strain: f64,
    /// Axial stress (Pa), tension positive
    pub stress: f64,
}

/// Bending stresses at a set of points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BendingStressResult {
    /// Applied moments
    pub moments: BendingMoments,
    /// One entry per requested point, in request order
    pub stresses: Vec<PointStress>,
    /// Formula identifier
    pub equation: Equation,
}

impl BendingStressResult {
    /// Stress entry by point name.
    pub fn get(&self, name: &str) -> AnalysisResult<&PointStress> {
        self.stresses
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| AnalysisError::unknown_point(name))
    }
}

/// Direct stress at each of `points` under `moments`.
///
/// # Example
///
/// ```rust
/// use thinwall_core::calculations::bending::{compute_bending_stress, BendingMoments};
/// use thinwall_core::calculations::stiffness::{compute_stiffness, ReferenceAxis};
/// use thinwall_core::section::{NamedPoint, Section, SectionPoint, Segment};
///
/// let pts = [(0.05, 0.05), (0.0, 0.05), (0.0, -0.05), (-0.05, -0.05)];
/// let segments = (0..3)
///     .map(|i| Segment::new(pts[i].into(), pts[i + 1].into(), 0.002, 50.0e9, 19.0e9).unwrap())
///     .collect();
/// let section = Section::new(segments).unwrap();
/// let k = compute_stiffness(&section, ReferenceAxis::Centroid).unwrap();
///
/// let top = NamedPoint::new("web top", SectionPoint::new(1, 0.0));
/// let result = compute_bending_stress(&section, &k, BendingMoments::new(1000.0, 0.0), &[top]).unwrap();
/// assert!(result.get("web top").unwrap().stress > 0.0);
/// ```
pub fn compute_bending_stress(
    section: &Section,
    stiffness: &StiffnessTensor,
    moments: BendingMoments,
    points: &[NamedPoint],
) -> AnalysisResult<BendingStressResult> {
    stiffness.require_centroidal(section.tolerance(), "bending stress")?;
    AnalysisError::require_finite("m_y", moments.m_y)?;
    AnalysisError::require_finite("m_z", moments.m_z)?;

    let mut stresses = Vec::with_capacity(points.len());
    for named in points {
        let location = section.locate(&named.point)?;
        let rel = stiffness.relative(location);
        let strain = bending_strain(
            stiffness.ei_yy,
            stiffness.ei_zz,
            stiffness.ei_yz,
            moments.m_y,
            moments.m_z,
            rel.y,
            rel.z,
        );
        let modulus = section.segment(named.point.segment)?.modulus();
        log::debug!("bending stress at '{}': {:.6e} Pa", named.name, modulus * strain);
        stresses.push(PointStress {
            name: named.name.clone(),
            point: named.point,
            location,
            modulus,
            strain,
            stress: modulus * strain,
        });
    }

    Ok(BendingStressResult {
        moments,
        stresses,
        equation: Equation::BendingStress,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::stiffness::{compute_stiffness, ReferenceAxis};
    use crate::section::fixtures::*;
    use approx::assert_relative_eq;

    const H: f64 = 0.1;
    const B: f64 = 0.05;
    const EF: f64 = 50.0e9;
    const EW: f64 = 15.0e9;

    fn z_section() -> Section {
        open_polyline(
            &[(B, H / 2.0), (0.0, H / 2.0), (0.0, -H / 2.0), (-B, -H / 2.0)],
            &[(0.002, EF, 19.0e9), (0.001, EW, 6.0e9), (0.002, EF, 19.0e9)],
        )
    }

    #[test]
    fn test_z_section_web_and_flange_tip() {
        let section = z_section();
        let k = compute_stiffness(&section, ReferenceAxis::Centroid).unwrap();
        let my = 1000.0;
        let points = [
            NamedPoint::new("web top", SectionPoint::new(1, 0.0)),
            NamedPoint::new("flange tip", SectionPoint::new(0, 0.0)),
        ];
        let result = compute_bending_stress(&section, &k, BendingMoments::new(my, 0.0), &points).unwrap();

        let web = result.get("web top").unwrap();
        assert_relative_eq!(web.stress, EW * k.ei_zz * my * (H / 2.0) / k.determinant, max_relative = 1e-12);

        let tip = result.get("flange tip").unwrap();
        let expected = EF * (k.ei_zz * my * H / 2.0 - k.ei_yz * my * B) / k.determinant;
        assert_relative_eq!(tip.stress, expected, max_relative = 1e-12);
    }

    #[test]
    fn test_stress_jumps_at_material_interface() {
        let section = z_section();
        let k = compute_stiffness(&section, ReferenceAxis::Centroid).unwrap();
        let points = [
            NamedPoint::new("flange root", SectionPoint::new(0, B)),
            NamedPoint::new("web top", SectionPoint::new(1, 0.0)),
        ];
        let result = compute_bending_stress(&section, &k, BendingMoments::new(1000.0, 0.0), &points).unwrap();
        let (a, b) = (&result.stresses[0], &result.stresses[1]);
        assert_relative_eq!(a.strain, b.strain, max_relative = 1e-12);
        assert_relative_eq!(a.stress / b.stress, EF / EW, max_relative = 1e-12);
    }

    #[test]
    fn test_symmetric_box_mz() {
        let section = composite_box();
        let k = compute_stiffness(&section, ReferenceAxis::Centroid).unwrap();
        // Right web mid-height, y = 0.1
        let points = [NamedPoint::new("right web", SectionPoint::new(0, 0.05))];
        let result = compute_bending_stress(&section, &k, BendingMoments::new(0.0, 500.0), &points).unwrap();
        assert_relative_eq!(result.stresses[0].stress, -35.0e9 * 500.0 * 0.1 / k.ei_zz, max_relative = 1e-9);
    }

    #[test]
    fn test_requires_centroidal_tensor() {
        let section = channel(0.025, 0.05, 0.0015, 0.0025, 52.0e9, 20.0e9);
        let k = compute_stiffness(&section, ReferenceAxis::Origin).unwrap();
        let err = compute_bending_stress(&section, &k, BendingMoments::new(1.0, 0.0), &[]).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_unknown_point_name() {
        let section = z_section();
        let k = compute_stiffness(&section, ReferenceAxis::Centroid).unwrap();
        let result = compute_bending_stress(&section, &k, BendingMoments::new(1.0, 0.0), &[]).unwrap();
        assert!(matches!(result.get("nowhere"), Err(AnalysisError::UnknownPoint { .. })));
    }
}
