//! # Section Model
//!
//! A [`Section`] is an ordered chain of [`Segment`]s forming either a single
//! open polyline or a single closed cell. The topology is decided once, at
//! construction, and carried as a tagged variant so that solvers dispatch on
//! [`Topology`] instead of re-inspecting geometry.
//!
//! ## Example
//!
//! ```rust
//! use thinwall_core::section::{Point, Section, Segment, Topology};
//!
//! // 0.2 m x 0.1 m box, walked counter-clockwise
//! let corners = [(0.1, -0.05), (0.1, 0.05), (-0.1, 0.05), (-0.1, -0.05)];
//! let segments: Vec<Segment> = (0..4)
//!     .map(|i| {
//!         let (a, b) = (corners[i], corners[(i + 1) % 4]);
//!         Segment::new(a.into(), b.into(), 0.002, 20.0e9, 20.0e9).unwrap()
//!     })
//!     .collect();
//!
//! let section = Section::new(segments).unwrap();
//! assert!(section.is_closed());
//! assert!((section.enclosed_area().unwrap() - 0.02).abs() < 1e-12);
//! ```

pub mod point;
pub mod segment;

pub use point::Point;
pub use segment::Segment;

use serde::{Deserialize, Serialize};

use crate::errors::{AnalysisError, AnalysisResult};
use crate::settings::AnalysisSettings;

/// Section topology, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Topology {
    /// Single open polyline with two free edges
    Open,
    /// Single closed loop
    ClosedSingleCell {
        /// Signed enclosed area (m²), positive for a counter-clockwise loop
        signed_area: f64,
    },
}

/// A location on the wall: segment index, arc length from that segment's
/// start, and an optional through-thickness offset along the left normal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionPoint {
    /// Index of the segment in the section's chain
    pub segment: usize,
    /// Arc length from the segment start (m)
    pub s: f64,
    /// Through-thickness coordinate (m), positive along the left normal
    #[serde(default)]
    pub offset: f64,
}

impl SectionPoint {
    /// A mid-line point.
    pub fn new(segment: usize, s: f64) -> Self {
        SectionPoint { segment, s, offset: 0.0 }
    }

    /// A point off the mid-line.
    pub fn with_offset(segment: usize, s: f64, offset: f64) -> Self {
        SectionPoint { segment, s, offset }
    }
}

/// A section point with a caller-facing name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedPoint {
    /// Display name (e.g. "A", "flange tip")
    pub name: String,
    /// Location on the wall
    pub point: SectionPoint,
}

impl NamedPoint {
    /// Create a named point.
    pub fn new(name: impl Into<String>, point: SectionPoint) -> Self {
        NamedPoint { name: name.into(), point }
    }
}

/// A validated thin-walled cross-section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    segments: Vec<Segment>,
    topology: Topology,
    #[serde(skip)]
    arc_starts: Vec<f64>,
    #[serde(skip)]
    settings: AnalysisSettings,
}

impl Section {
    /// Build a section with default settings.
    pub fn new(segments: Vec<Segment>) -> AnalysisResult<Self> {
        Section::with_settings(segments, &AnalysisSettings::default())
    }

    /// Build a section, validating every segment and the chain connectivity.
    ///
    /// The section is closed when the end of the last segment meets the start
    /// of the first within `settings.connection_tolerance`.
    pub fn with_settings(segments: Vec<Segment>, settings: &AnalysisSettings) -> AnalysisResult<Self> {
        settings.validate()?;
        let tolerance = settings.connection_tolerance;

        if segments.is_empty() {
            return Err(AnalysisError::degenerate_section("section has no segments"));
        }

        for (index, segment) in segments.iter().enumerate() {
            segment.validate(index, tolerance)?;
        }

        for (index, pair) in segments.windows(2).enumerate() {
            let gap = pair[0].end().distance_to(pair[1].start());
            if gap > tolerance {
                return Err(AnalysisError::malformed_topology(
                    index + 1,
                    format!("start is {:.3e} m away from the end of segment {}", gap, index),
                ));
            }
        }

        let mut arc_starts = Vec::with_capacity(segments.len());
        let mut running = 0.0;
        for segment in &segments {
            arc_starts.push(running);
            running += segment.length();
        }

        let first = &segments[0];
        let last = &segments[segments.len() - 1];
        let topology = if segments.len() >= 2 && last.end().distance_to(first.start()) <= tolerance {
            // Shoelace over segment starts
            let twice_area: f64 = segments.iter().map(|seg| seg.start().cross(seg.end())).sum();
            Topology::ClosedSingleCell {
                signed_area: 0.5 * twice_area,
            }
        } else {
            Topology::Open
        };

        log::debug!(
            "section built: {} segments, topology {:?}, perimeter {:.6} m",
            segments.len(),
            topology,
            running
        );

        Ok(Section {
            segments,
            topology,
            arc_starts,
            settings: settings.clone(),
        })
    }

    /// Build a section from a JSON segment list.
    pub fn from_json(json: &str, settings: &AnalysisSettings) -> AnalysisResult<Self> {
        let segments: Vec<Segment> = serde_json::from_str(json)?;
        Section::with_settings(segments, settings)
    }

    /// The segment chain, in order
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of segments
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false for a constructed section
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Topology tag
    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// True for a closed single cell
    pub fn is_closed(&self) -> bool {
        matches!(self.topology, Topology::ClosedSingleCell { .. })
    }

    /// Enclosed area magnitude (m²); `None` for open sections
    pub fn enclosed_area(&self) -> Option<f64> {
        self.signed_area().map(f64::abs)
    }

    /// Signed enclosed area (m²), counter-clockwise positive; `None` for open sections
    pub fn signed_area(&self) -> Option<f64> {
        match self.topology {
            Topology::Open => None,
            Topology::ClosedSingleCell { signed_area } => Some(signed_area),
        }
    }

    /// Total mid-line length (m)
    pub fn perimeter(&self) -> f64 {
        self.segments.iter().map(Segment::length).sum()
    }

    /// Axial stiffness EA = Σ E t l (N)
    pub fn axial_stiffness(&self) -> f64 {
        self.segments.iter().map(Segment::axial_stiffness).sum()
    }

    /// Modulus-weighted centroid, the EA-weighted mean of the segment midpoints.
    pub fn weighted_centroid(&self) -> Point {
        let moment = self
            .segments
            .iter()
            .fold(Point::origin(), |acc, seg| acc + seg.midpoint() * seg.axial_stiffness());
        moment * (1.0 / self.axial_stiffness())
    }

    /// Settings the section was built with
    pub fn settings(&self) -> &AnalysisSettings {
        &self.settings
    }

    /// Connection tolerance the section was built with (m)
    pub fn tolerance(&self) -> f64 {
        self.settings.connection_tolerance
    }

    /// Segment by index
    pub fn segment(&self, index: usize) -> AnalysisResult<&Segment> {
        self.segments.get(index).ok_or_else(|| {
            AnalysisError::invalid_input(
                "segment",
                index.to_string(),
                format!("section has {} segments", self.segments.len()),
            )
        })
    }

    /// Arc length from the start of segment 0 to the start of `index`
    pub fn arc_start(&self, index: usize) -> f64 {
        self.arc_starts.get(index).copied().unwrap_or_else(|| self.perimeter())
    }

    /// Check a section point lies on the wall.
    pub fn check_point(&self, point: &SectionPoint) -> AnalysisResult<()> {
        let segment = self.segment(point.segment)?;
        let tol = self.tolerance();
        let s_ok = point.s.is_finite() && point.s >= -tol && point.s <= segment.length() + tol;
        if !s_ok {
            return Err(AnalysisError::invalid_input(
                "s",
                point.s.to_string(),
                format!("must lie within [0, {}] on segment {}", segment.length(), point.segment),
            ));
        }
        if !(point.offset.is_finite() && point.offset.abs() <= 0.5 * segment.thickness() + tol) {
            return Err(AnalysisError::invalid_input(
                "offset",
                point.offset.to_string(),
                "must lie within the wall thickness",
            ));
        }
        Ok(())
    }

    /// Global arc-length coordinate of a section point, measured from the start of segment 0.
    pub fn arc_position(&self, point: &SectionPoint) -> AnalysisResult<f64> {
        self.check_point(point)?;
        Ok(self.arc_start(point.segment) + point.s)
    }

    /// Coordinates of a section point (mid-line plus offset).
    pub fn locate(&self, point: &SectionPoint) -> AnalysisResult<Point> {
        self.check_point(point)?;
        let segment = &self.segments[point.segment];
        Ok(segment.point_at(point.s) + segment.left_normal() * point.offset)
    }

    /// Segment indices in integration order starting from `cut`.
    ///
    /// Open sections always start at the free edge (segment 0); a closed loop
    /// is cut at the start of segment `cut` and walked once around.
    pub fn walk_from(&self, cut: usize) -> Vec<usize> {
        let n = self.segments.len();
        match self.topology {
            Topology::Open => (0..n).collect(),
            Topology::ClosedSingleCell { .. } => (0..n).map(|k| (cut + k) % n).collect(),
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! Sections shared by the solver tests.

    use super::*;

    /// Closed polygon through `corners` with per-wall (thickness, E, G).
    pub fn closed_polygon(corners: &[(f64, f64)], walls: &[(f64, f64, f64)]) -> Section {
        let n = corners.len();
        let segments = (0..n)
            .map(|i| {
                let (t, e, g) = walls[i % walls.len()];
                Segment::new(corners[i].into(), corners[(i + 1) % n].into(), t, e, g).unwrap()
            })
            .collect();
        Section::new(segments).unwrap()
    }

    /// Open polyline through `points` with per-wall (thickness, E, G).
    pub fn open_polyline(points: &[(f64, f64)], walls: &[(f64, f64, f64)]) -> Section {
        let segments = points
            .windows(2)
            .enumerate()
            .map(|(i, w)| {
                let (t, e, g) = walls[i % walls.len()];
                Segment::new(w[0].into(), w[1].into(), t, e, g).unwrap()
            })
            .collect();
        Section::new(segments).unwrap()
    }

    /// The 0.2 m x 0.1 m composite box: covers 20 GPa / 2 mm, webs 35 GPa / 1 mm.
    ///
    /// Walked counter-clockwise starting with the right web.
    pub fn composite_box() -> Section {
        closed_polygon(
            &[(0.1, -0.05), (0.1, 0.05), (-0.1, 0.05), (-0.1, -0.05)],
            &[(0.001, 35.0e9, 35.0e9), (0.002, 20.0e9, 20.0e9)],
        )
    }

    /// Homogeneous closed rectangle b x h with uniform wall (t, E, G).
    pub fn homogeneous_box(b: f64, h: f64, t: f64, e: f64, g: f64) -> Section {
        let (hb, hh) = (0.5 * b, 0.5 * h);
        closed_polygon(&[(hb, -hh), (hb, hh), (-hb, hh), (-hb, -hh)], &[(t, e, g)])
    }

    /// Open channel opening to +y: flanges b, web h.
    pub fn channel(b: f64, h: f64, tf: f64, tw: f64, e: f64, g: f64) -> Section {
        let hh = 0.5 * h;
        open_polyline(
            &[(b, hh), (0.0, hh), (0.0, -hh), (b, -hh)],
            &[(tf, e, g), (tw, e, g), (tf, e, g)],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_weighted_centroid_favours_stiffer_wall() {
        // 1 GPa and 3 GPa strips of equal size: centroid sits 3/4 of the way to the stiffer one
        let section = open_polyline(&[(0.0, 0.0), (0.1, 0.0), (0.2, 0.0)], &[(0.001, 1.0e9, 0.4e9), (0.001, 3.0e9, 1.2e9)]);
        let centroid = section.weighted_centroid();
        assert!((centroid.y - 0.125).abs() < 1e-12);
        assert!(centroid.z.abs() < 1e-12);
        assert!((section.axial_stiffness() - 4.0e5).abs() < 1e-6);
    }

    #[test]
    fn test_box_is_closed_with_signed_area() {
        let section = composite_box();
        assert_eq!(section.len(), 4);
        assert!(section.is_closed());
        let area = section.signed_area().unwrap();
        assert!((area - 0.02).abs() < 1e-12, "counter-clockwise loop should be positive, got {}", area);
        assert!((section.perimeter() - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_clockwise_loop_has_negative_area() {
        let section = closed_polygon(
            &[(-0.1, -0.05), (-0.1, 0.05), (0.1, 0.05), (0.1, -0.05)],
            &[(0.002, 20.0e9, 20.0e9)],
        );
        assert!((section.signed_area().unwrap() + 0.02).abs() < 1e-12);
        assert!((section.enclosed_area().unwrap() - 0.02).abs() < 1e-12);
    }

    #[test]
    fn test_channel_is_open() {
        let section = channel(0.025, 0.05, 0.0015, 0.0025, 50.0e9, 20.0e9);
        assert_eq!(section.topology(), Topology::Open);
        assert!(section.enclosed_area().is_none());
    }

    #[test]
    fn test_gap_is_malformed_topology() {
        let a = Segment::new(Point::new(0.0, 0.0), Point::new(1.0, 0.0), 0.01, 1.0e9, 1.0e9).unwrap();
        let b = Segment::new(Point::new(1.001, 0.0), Point::new(1.0, 1.0), 0.01, 1.0e9, 1.0e9).unwrap();
        let err = Section::new(vec![a, b]).unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedTopology { segment: 1, .. }));
    }

    #[test]
    fn test_empty_is_degenerate_section() {
        let err = Section::new(Vec::new()).unwrap_err();
        assert_eq!(err.error_code(), "DEGENERATE_SECTION");
    }

    #[test]
    fn test_deserialized_segment_is_revalidated() {
        let json = r#"[{"start":{"y":0.0,"z":0.0},"end":{"y":1.0,"z":0.0},"thickness":0.0,"modulus":1e9,"shear_modulus":1e9}]"#;
        let err = Section::from_json(json, &AnalysisSettings::default()).unwrap_err();
        assert!(matches!(err, AnalysisError::ZeroRigidity { segment: 0, .. }));
    }

    #[test]
    fn test_walk_from_cut() {
        let closed = composite_box();
        assert_eq!(closed.walk_from(2), vec![2, 3, 0, 1]);
        let open = channel(0.025, 0.05, 0.0015, 0.0025, 50.0e9, 20.0e9);
        assert_eq!(open.walk_from(2), vec![0, 1, 2]);
    }

    #[test]
    fn test_locate_and_arc_position() {
        let section = composite_box();
        let p = SectionPoint::new(1, 0.05);
        assert!((section.arc_position(&p).unwrap() - 0.15).abs() < 1e-12);
        let loc = section.locate(&p).unwrap();
        assert!((loc.y - 0.05).abs() < 1e-12 && (loc.z - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_point_outside_segment_rejected() {
        let section = composite_box();
        assert!(section.check_point(&SectionPoint::new(0, 0.5)).is_err());
        assert!(section.check_point(&SectionPoint::new(9, 0.0)).is_err());
        assert!(section.check_point(&SectionPoint::with_offset(0, 0.0, 0.01)).is_err());
    }
}
