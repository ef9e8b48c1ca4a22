//! # Shear Flow Solver
//!
//! Shear flow in a thin-walled section under a transverse shear load.
//!
//! ## Method
//!
//! 1. **Open flow.** Starting from the free edge (open section) or a cut at the
//!    start of a chosen segment (closed cell), the modulus-weighted first
//!    moments `Q_y = ∫E t y ds` and `Q_z = ∫E t z ds` are accumulated along the
//!    wall. On a straight segment they are quadratic in `s`, so each segment's
//!    flow is stored as an exact quadratic.
//! 2. **Closing flow** (closed cells only). A uniform flow `q0` restores moment
//!    equivalence about the moment centre: `q0 = −∮ p q_o ds / (2A)`. The
//!    signed enclosed area is used, so the result does not depend on the
//!    loop orientation or the cut.
//!
//! Positive flow runs along the segment direction (start to end). With this
//! sign the resultant of the flow is `−V`, acting through the moment centre.
//!
//! Coordinates in the first moments are centroidal, so the stiffness tensor
//! must be about the centroid.

use serde::{Deserialize, Serialize};

use crate::calculations::stiffness::StiffnessTensor;
use crate::equations::registry::Equation;
use crate::equations::thin_wall::{closing_shear_flow, open_shear_flow};
use crate::errors::{AnalysisError, AnalysisResult};
use crate::section::{Point, Section, SectionPoint, Topology};

/// A transverse shear load.
///
/// ## JSON Example
///
/// ```json
/// { "force_y": 0.0, "force_z": 2000.0, "moment_center": { "y": -0.2, "z": 0.0 } }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ShearLoad {
    /// V_y (N)
    #[serde(default)]
    pub force_y: f64,
    /// V_z (N)
    #[serde(default)]
    pub force_z: f64,
    /// Point the load acts through; the centroid when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moment_center: Option<Point>,
}

impl ShearLoad {
    /// Vertical shear through the centroid.
    pub fn vertical(force_z: f64) -> Self {
        ShearLoad {
            force_y: 0.0,
            force_z,
            moment_center: None,
        }
    }

    /// Shear with both components through the centroid.
    pub fn new(force_y: f64, force_z: f64) -> Self {
        ShearLoad {
            force_y,
            force_z,
            moment_center: None,
        }
    }

    /// Apply the load through `center`.
    pub fn through(mut self, center: Point) -> Self {
        self.moment_center = Some(center);
        self
    }
}

/// Exact flow on one segment: `q(s) = c0 + c1·s + c2·s² + q0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentFlow {
    /// Segment index
    pub segment: usize,
    /// Segment length (m)
    pub length: f64,
    /// Open-flow polynomial coefficients `[c0, c1, c2]`
    pub open_coefficients: [f64; 3],
    /// Final flow at the segment start (N/m)
    pub start_value: f64,
    /// Final flow at the segment end (N/m)
    pub end_value: f64,
    /// ∫q ds over the segment, final flow (N)
    pub resultant: f64,
}

impl SegmentFlow {
    fn open_at(&self, s: f64) -> f64 {
        let [c0, c1, c2] = self.open_coefficients;
        c0 + s * (c1 + s * c2)
    }

    fn open_integral(&self) -> f64 {
        let [c0, c1, c2] = self.open_coefficients;
        let l = self.length;
        l * (c0 + l * (c1 / 2.0 + l * c2 / 3.0))
    }
}

/// One sampled station of the flow.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShearFlowSample {
    /// Segment index
    pub segment: usize,
    /// Arc length from the segment start (m)
    pub s: f64,
    /// Shear flow (N/m)
    pub value: f64,
}

/// Shear flow over the whole section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShearFlowField {
    /// Applied load
    pub load: ShearLoad,
    /// Resolved moment centre
    pub moment_center: Point,
    /// Segment at whose start the loop was cut (closed cells only)
    pub cut_segment: Option<usize>,
    /// Uniform closing flow q0 (closed cells only, N/m)
    pub closing_flow: Option<f64>,
    /// Per-segment exact flow, in segment order
    pub segments: Vec<SegmentFlow>,
    /// Stations in segment order, `samples_per_segment` per segment
    pub samples: Vec<ShearFlowSample>,
    /// Formula identifier
    pub equation: Equation,
}

impl ShearFlowField {
    /// Final flow at arc length `s` on `segment`.
    pub fn value_at(&self, segment: usize, s: f64) -> AnalysisResult<f64> {
        let flow = self.segments.get(segment).ok_or_else(|| {
            AnalysisError::invalid_input("segment", segment.to_string(), format!("section has {} segments", self.segments.len()))
        })?;
        let slack = 1e-9 * flow.length.max(1.0);
        if !(s.is_finite() && s >= -slack && s <= flow.length + slack) {
            return Err(AnalysisError::invalid_input(
                "s",
                s.to_string(),
                format!("must lie within [0, {}] on segment {}", flow.length, segment),
            ));
        }
        Ok(flow.open_at(s) + self.closing_flow.unwrap_or(0.0))
    }

    /// Final flow at a section point.
    pub fn value_at_point(&self, point: &SectionPoint) -> AnalysisResult<f64> {
        self.value_at(point.segment, point.s)
    }

    /// Largest |q| among the stations and segment ends.
    pub fn max_abs(&self) -> ShearFlowSample {
        self.samples
            .iter()
            .copied()
            .fold(ShearFlowSample { segment: 0, s: 0.0, value: 0.0 }, |best, sample| {
                if sample.value.abs() > best.value.abs() {
                    sample
                } else {
                    best
                }
            })
    }
}

/// Shear flow under a vertical shear `shear_load_z` acting through the centroid.
///
/// Closed cells are cut at the start of segment 0.
///
/// # Example
///
/// ```rust
/// use thinwall_core::calculations::shear_flow::compute_shear_flow;
/// use thinwall_core::calculations::stiffness::{compute_stiffness, ReferenceAxis};
/// use thinwall_core::section::{Section, Segment};
///
/// let pts = [(0.025, 0.025), (0.0, 0.025), (0.0, -0.025), (0.025, -0.025)];
/// let segments = (0..3)
///     .map(|i| Segment::new(pts[i].into(), pts[i + 1].into(), 0.0015, 50.0e9, 20.0e9).unwrap())
///     .collect();
/// let section = Section::new(segments).unwrap();
/// let k = compute_stiffness(&section, ReferenceAxis::Centroid).unwrap();
///
/// let field = compute_shear_flow(&section, &k, 1000.0).unwrap();
/// // Zero at both free edges
/// assert!(field.value_at(0, 0.0).unwrap().abs() < 1e-9);
/// assert!(field.value_at(2, 0.025).unwrap().abs() < 1e-6);
/// ```
pub fn compute_shear_flow(section: &Section, stiffness: &StiffnessTensor, shear_load_z: f64) -> AnalysisResult<ShearFlowField> {
    compute_shear_flow_for(section, stiffness, &ShearLoad::vertical(shear_load_z), 0)
}

/// Shear flow under a general shear load, cutting a closed cell at the start of `cut`.
///
/// The cut is ignored for open sections, which always integrate from the
/// free edge at the start of segment 0.
pub fn compute_shear_flow_for(
    section: &Section,
    stiffness: &StiffnessTensor,
    load: &ShearLoad,
    cut: usize,
) -> AnalysisResult<ShearFlowField> {
    stiffness.require_centroidal(section.tolerance(), "shear flow")?;
    AnalysisError::require_finite("force_y", load.force_y)?;
    AnalysisError::require_finite("force_z", load.force_z)?;
    let moment_center = load.moment_center.unwrap_or(stiffness.centroid);
    if !moment_center.is_finite() {
        return Err(AnalysisError::invalid_input(
            "moment_center",
            format!("{:?}", moment_center),
            "Coordinates must be finite",
        ));
    }
    if cut >= section.len() {
        return Err(AnalysisError::invalid_input(
            "cut",
            cut.to_string(),
            format!("section has {} segments", section.len()),
        ));
    }

    let signed_area = closed_area(section)?;
    let mut segments = open_flow(section, stiffness, load.force_y, load.force_z, cut);

    let (cut_segment, closing_flow, equation) = match signed_area {
        None => (None, None, Equation::OpenShearFlow),
        Some(area) => {
            let moment: f64 = section
                .segments()
                .iter()
                .zip(&segments)
                .map(|(seg, flow)| seg.perpendicular_distance(moment_center) * flow.open_integral())
                .sum();
            let q0 = closing_shear_flow(moment, area);
            log::debug!(
                "closing flow: cut at segment {}, ∮p·q_o ds = {:.6e}, A = {:.6e}, q0 = {:.6e} N/m",
                cut,
                moment,
                area,
                q0
            );
            (Some(cut), Some(q0), Equation::ClosingShearFlow)
        }
    };

    let q0 = closing_flow.unwrap_or(0.0);
    for flow in &mut segments {
        flow.start_value = flow.open_at(0.0) + q0;
        flow.end_value = flow.open_at(flow.length) + q0;
        flow.resultant = flow.open_integral() + q0 * flow.length;
    }

    let stations = section.settings().samples_per_segment;
    let samples = segments
        .iter()
        .flat_map(|flow| {
            (0..stations).map(move |i| {
                let s = flow.length * i as f64 / (stations - 1) as f64;
                ShearFlowSample {
                    segment: flow.segment,
                    s,
                    value: flow.open_at(s) + q0,
                }
            })
        })
        .collect();

    Ok(ShearFlowField {
        load: *load,
        moment_center,
        cut_segment,
        closing_flow,
        segments,
        samples,
        equation,
    })
}

/// Result of [`compute_shear_center`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShearCenter {
    /// Shear centre location
    pub location: Point,
    /// Formula identifier
    pub equation: Equation,
}

/// Point through which a shear load produces no twist.
///
/// Unit loads V_y = 1 and V_z = 1 are applied in turn; the moment of each
/// flow about the origin locates the line of action. For a closed cell the
/// closing flow is chosen so that the cell does not twist,
/// `q0 = −∮ q_o/(G t) ds / ∮ ds/(G t)`.
pub fn compute_shear_center(section: &Section, stiffness: &StiffnessTensor) -> AnalysisResult<ShearCenter> {
    stiffness.require_centroidal(section.tolerance(), "shear centre")?;
    let closed = closed_area(section)?.is_some();

    let moment_of = |vy: f64, vz: f64| -> f64 {
        let flows = open_flow(section, stiffness, vy, vz, 0);
        let q0 = if closed {
            let weighted: f64 = section
                .segments()
                .iter()
                .zip(&flows)
                .map(|(seg, flow)| flow.open_integral() / (seg.shear_modulus() * seg.thickness()))
                .sum();
            let compliance: f64 = section.segments().iter().map(|seg| seg.shear_compliance()).sum();
            -weighted / compliance
        } else {
            0.0
        };
        section
            .segments()
            .iter()
            .zip(&flows)
            .map(|(seg, flow)| seg.perpendicular_distance(Point::origin()) * (flow.open_integral() + q0 * flow.length))
            .sum()
    };

    // Flow resultant is −V at the shear centre
    let location = Point::new(-moment_of(0.0, 1.0), moment_of(1.0, 0.0));
    log::debug!("shear centre at ({:.6}, {:.6})", location.y, location.z);

    Ok(ShearCenter {
        location,
        equation: Equation::ShearCenter,
    })
}

/// Signed area of a closed cell, rejecting degenerate cells; `None` for open sections.
fn closed_area(section: &Section) -> AnalysisResult<Option<f64>> {
    match section.topology() {
        Topology::Open => Ok(None),
        Topology::ClosedSingleCell { signed_area } => {
            if signed_area.abs() <= section.settings().area_tolerance {
                return Err(AnalysisError::degenerate_geometry(format!(
                    "enclosed area {:.3e} m² is too small for a closing flow",
                    signed_area
                )));
            }
            Ok(Some(signed_area))
        }
    }
}

/// Open flow for every segment (indexed by segment) integrated in walk order from `cut`.
fn open_flow(section: &Section, stiffness: &StiffnessTensor, vy: f64, vz: f64, cut: usize) -> Vec<SegmentFlow> {
    // q_o is linear in the first moments, which are quadratic in s on a straight wall
    let flow_for = |q_y: f64, q_z: f64| open_shear_flow(stiffness.ei_yy, stiffness.ei_zz, stiffness.ei_yz, vy, vz, q_y, q_z);

    let mut flows: Vec<SegmentFlow> = section
        .segments()
        .iter()
        .enumerate()
        .map(|(index, seg)| SegmentFlow {
            segment: index,
            length: seg.length(),
            open_coefficients: [0.0; 3],
            start_value: 0.0,
            end_value: 0.0,
            resultant: 0.0,
        })
        .collect();

    let mut running = 0.0;
    for index in section.walk_from(cut) {
        let seg = &section.segments()[index];
        let et = seg.modulus() * seg.thickness();
        let a = stiffness.relative(seg.start());
        let dir = seg.direction();
        let c1 = flow_for(et * a.y, et * a.z);
        let c2 = flow_for(0.5 * et * dir.y, 0.5 * et * dir.z);
        let flow = &mut flows[index];
        flow.open_coefficients = [running, c1, c2];
        running = flow.open_at(flow.length);
        log::trace!("segment {}: q_o start {:.6e}, end {:.6e}", index, flow.open_coefficients[0], running);
    }
    flows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::stiffness::{compute_stiffness, ReferenceAxis};
    use crate::section::fixtures::*;
    use approx::assert_relative_eq;

    /// Triangular cell A(−0.2, 0) → B(0, 0.15) → C(0, −0.15): legs 45 GPa / 2 mm, web 20 GPa / 1.5 mm.
    fn triangle() -> Section {
        let leg = (0.002, 45.0e9, 17.0e9);
        let web = (0.0015, 20.0e9, 8.0e9);
        closed_polygon(&[(-0.2, 0.0), (0.0, 0.15), (0.0, -0.15)], &[leg, web, leg])
    }

    #[test]
    fn test_triangle_open_and_closing_flow() {
        let section = triangle();
        let k = compute_stiffness(&section, ReferenceAxis::Centroid).unwrap();
        assert_relative_eq!(k.ei_yy, 405.0e3, max_relative = 1e-12);

        let load = ShearLoad::vertical(2000.0).through(Point::new(-0.2, 0.0));
        let field = compute_shear_flow_for(&section, &k, &load, 0).unwrap();

        let open_b = field.segments[0].open_at(0.25);
        assert_relative_eq!(open_b, 8333.333, max_relative = 1e-6);
        assert_relative_eq!(field.segments[1].open_at(0.15), 10_000.0, max_relative = 1e-9);

        let q0 = field.closing_flow.unwrap();
        assert_relative_eq!(q0, -9444.444, max_relative = 1e-6);
        assert_relative_eq!(field.value_at(1, 0.0).unwrap(), -1111.111, max_relative = 1e-5);
    }

    #[test]
    fn test_cut_point_invariance() {
        let section = triangle();
        let k = compute_stiffness(&section, ReferenceAxis::Centroid).unwrap();
        let load = ShearLoad::new(700.0, 2000.0).through(Point::new(-0.05, 0.02));
        let reference = compute_shear_flow_for(&section, &k, &load, 0).unwrap();
        for cut in 1..section.len() {
            let other = compute_shear_flow_for(&section, &k, &load, cut).unwrap();
            for (a, b) in reference.samples.iter().zip(&other.samples) {
                let scale = a.value.abs().max(1.0);
                assert!((a.value - b.value).abs() / scale < 1e-9, "cut {} differs at {:?}", cut, a);
            }
        }
    }

    #[test]
    fn test_cut_invariance_on_box_with_offset_center() {
        let section = composite_box();
        let k = compute_stiffness(&section, ReferenceAxis::Centroid).unwrap();
        let load = ShearLoad::new(-300.0, 1500.0).through(Point::new(0.03, -0.01));
        let a = compute_shear_flow_for(&section, &k, &load, 0).unwrap();
        let b = compute_shear_flow_for(&section, &k, &load, 3).unwrap();
        for (x, y) in a.samples.iter().zip(&b.samples) {
            assert!((x.value - y.value).abs() <= 1e-9 * x.value.abs().max(1.0));
        }
    }

    #[test]
    fn test_open_flow_vanishes_at_both_free_edges() {
        let section = channel(0.025, 0.05, 0.0015, 0.0025, 52.0e9, 20.0e9);
        let k = compute_stiffness(&section, ReferenceAxis::Centroid).unwrap();
        let field = compute_shear_flow_for(&section, &k, &ShearLoad::new(400.0, 1000.0), 0).unwrap();
        assert!(field.closing_flow.is_none());
        assert_eq!(field.equation, Equation::OpenShearFlow);
        assert!(field.segments[0].start_value.abs() < 1e-12);
        let peak = field.max_abs().value.abs();
        assert!(field.segments[2].end_value.abs() < 1e-9 * peak);
    }

    #[test]
    fn test_flow_resultant_balances_load() {
        let section = composite_box();
        let k = compute_stiffness(&section, ReferenceAxis::Centroid).unwrap();
        let field = compute_shear_flow(&section, &k, 1000.0).unwrap();
        let (fy, fz) = section
            .segments()
            .iter()
            .zip(&field.segments)
            .fold((0.0, 0.0), |(fy, fz), (seg, flow)| {
                let d = seg.direction();
                (fy + d.y * flow.resultant, fz + d.z * flow.resultant)
            });
        assert_relative_eq!(fz, -1000.0, max_relative = 1e-9);
        assert!(fy.abs() < 1e-9);
    }

    #[test]
    fn test_symmetric_box_flow_is_antisymmetric_in_covers() {
        let section = composite_box();
        let k = compute_stiffness(&section, ReferenceAxis::Centroid).unwrap();
        let field = compute_shear_flow(&section, &k, 1000.0).unwrap();
        // Top cover runs from y = 0.1 to y = −0.1; flow crosses zero at its middle
        assert!(field.value_at(1, 0.1).unwrap().abs() < 1e-9 * field.max_abs().value.abs());
        assert_relative_eq!(field.value_at(1, 0.0).unwrap(), -field.value_at(1, 0.2).unwrap(), max_relative = 1e-9);
    }

    #[test]
    fn test_samples_cover_every_segment() {
        let section = composite_box();
        let k = compute_stiffness(&section, ReferenceAxis::Centroid).unwrap();
        let field = compute_shear_flow(&section, &k, 1000.0).unwrap();
        assert_eq!(field.samples.len(), 4 * section.settings().samples_per_segment);
        let last = field.samples.last().unwrap();
        assert_eq!(last.segment, 3);
        assert_relative_eq!(last.s, 0.2, epsilon = 1e-15);
    }

    #[test]
    fn test_degenerate_cell_rejected() {
        let sliver = closed_polygon(&[(0.0, 0.0), (0.1, 0.0), (0.2, 0.0), (0.1, 1e-12)], &[(0.001, 70.0e9, 27.0e9)]);
        let k = compute_stiffness(&sliver, ReferenceAxis::Centroid).unwrap();
        let err = compute_shear_flow(&sliver, &k, 100.0).unwrap_err();
        assert!(matches!(err, AnalysisError::DegenerateGeometry { .. }));
    }

    #[test]
    fn test_bad_inputs() {
        let section = composite_box();
        let k = compute_stiffness(&section, ReferenceAxis::Centroid).unwrap();
        assert!(compute_shear_flow(&section, &k, f64::NAN).is_err());
        assert!(compute_shear_flow_for(&section, &k, &ShearLoad::vertical(1.0), 4).is_err());
        let field = compute_shear_flow(&section, &k, 1.0).unwrap();
        assert!(field.value_at(0, 0.2).is_err());
        assert!(field.value_at(7, 0.0).is_err());
    }

    #[test]
    fn test_channel_shear_center() {
        let (b, h, t) = (0.025, 0.05, 0.0015);
        let section = channel(b, h, t, t, 70.0e9, 27.0e9);
        let k = compute_stiffness(&section, ReferenceAxis::Centroid).unwrap();
        let sc = compute_shear_center(&section, &k).unwrap();
        // e = 3b²/(6b + h) behind the web
        assert_relative_eq!(sc.location.y, -3.0 * b * b / (6.0 * b + h), max_relative = 1e-9);
        assert!(sc.location.z.abs() < 1e-12);
    }

    #[test]
    fn test_heterogeneous_channel_shear_center() {
        let (b, h) = (0.025, 0.05);
        let (ef, tf, ew, tw) = (50.0e9, 0.0015, 15.0e9, 0.0025);
        let section = open_polyline(
            &[(b, h / 2.0), (0.0, h / 2.0), (0.0, -h / 2.0), (b, -h / 2.0)],
            &[(tf, ef, 20.0e9), (tw, ew, 15.0e9), (tf, ef, 20.0e9)],
        );
        let k = compute_stiffness(&section, ReferenceAxis::Centroid).unwrap();
        let sc = compute_shear_center(&section, &k).unwrap();
        let e = 3.0 * b * b * ef * tf / (6.0 * b * ef * tf + h * ew * tw);
        assert_relative_eq!(sc.location.y, -e, max_relative = 1e-9);
    }

    #[test]
    fn test_doubly_symmetric_box_shear_center_at_centroid() {
        let section = composite_box();
        let k = compute_stiffness(&section, ReferenceAxis::Centroid).unwrap();
        let sc = compute_shear_center(&section, &k).unwrap();
        assert!(sc.location.norm() < 1e-12);
    }
}
