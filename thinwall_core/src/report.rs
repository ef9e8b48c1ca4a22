//! # Report Lines
//!
//! Flattened, labelled results: each line is a value, its SI unit and the
//! equation that produced it. Every result type implements [`ToReport`], so a
//! caller can print or serialize any analysis the same way.
//!
//! ## Example
//!
//! ```rust
//! use thinwall_core::calculations::torsion::compute_torsion;
//! use thinwall_core::report::ToReport;
//! use thinwall_core::section::{Section, Segment};
//!
//! let web = Segment::new((0.0, 0.0).into(), (0.0, 0.1).into(), 0.002, 70.0e9, 27.0e9).unwrap();
//! let section = Section::new(vec![web]).unwrap();
//! let lines = compute_torsion(&section, 1.0).unwrap().report_lines();
//! assert_eq!(lines[0].label, "Torsional rigidity GJ");
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::analysis::StudyReport;
use crate::calculations::bending::BendingStressResult;
use crate::calculations::composite_bar::CompositeBarResult;
use crate::calculations::shear_flow::{ShearCenter, ShearFlowField};
use crate::calculations::stiffness::StiffnessTensor;
use crate::calculations::torsion::TorsionResult;
use crate::calculations::warping::WarpingResult;
use crate::equations::registry::Equation;
use crate::materials::micromechanics::PlyProperties;

/// One labelled value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportLine {
    /// What the value is
    pub label: String,
    /// Value in SI units
    pub value: f64,
    /// SI unit
    pub unit: String,
    /// Formula that produced the value, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equation: Option<Equation>,
}

impl ReportLine {
    /// A line produced by `equation`.
    pub fn new(label: impl Into<String>, value: f64, unit: impl Into<String>, equation: Equation) -> Self {
        ReportLine {
            label: label.into(),
            value,
            unit: unit.into(),
            equation: Some(equation),
        }
    }

    /// A line not tied to a formula (an input echo or a coordinate).
    pub fn plain(label: impl Into<String>, value: f64, unit: impl Into<String>) -> Self {
        ReportLine {
            label: label.into(),
            value,
            unit: unit.into(),
            equation: None,
        }
    }

    /// Value with four significant digits and its unit.
    pub fn display_value(&self) -> String {
        let number = format_significant(self.value, 4);
        if self.unit.is_empty() {
            number
        } else {
            format!("{} {}", number, self.unit)
        }
    }
}

/// Conversion of a result into report lines.
pub trait ToReport {
    fn report_lines(&self) -> Vec<ReportLine>;
}

/// Render lines as an aligned text table.
pub fn render_lines(lines: &[ReportLine]) -> String {
    let width = lines.iter().map(|l| l.label.chars().count()).max().unwrap_or(0);
    let mut output = String::new();
    for line in lines {
        let formula = line
            .equation
            .map(|eq| format!("   [{}]", eq.metadata().formula_plain))
            .unwrap_or_default();
        output.push_str(&format!("  {:<width$}  {}{}\n", line.label, line.display_value(), formula, width = width));
    }
    output
}

/// Format with `digits` significant digits, switching to exponent form for
/// very large or very small magnitudes.
pub fn format_significant(value: f64, digits: usize) -> String {
    if value == 0.0 || !value.is_finite() {
        return format!("{}", value);
    }
    let exponent = value.abs().log10().floor() as i32;
    if !(-3..6).contains(&exponent) {
        return format!("{:.*e}", digits.saturating_sub(1), value);
    }
    let decimals = (digits as i32 - 1 - exponent).max(0) as usize;
    format!("{:.*}", decimals, value)
}

impl ToReport for StiffnessTensor {
    fn report_lines(&self) -> Vec<ReportLine> {
        vec![
            ReportLine::new("Axial stiffness EA", self.axial_stiffness, "N", Equation::AxialStiffness),
            ReportLine::new("Centroid y", self.centroid.y, "m", Equation::ModulusWeightedCentroid),
            ReportLine::new("Centroid z", self.centroid.z, "m", Equation::ModulusWeightedCentroid),
            ReportLine::new("EI_yy", self.ei_yy, "N·m²", self.equation),
            ReportLine::new("EI_zz", self.ei_zz, "N·m²", self.equation),
            ReportLine::new("EI_yz", self.ei_yz, "N·m²", self.equation),
            ReportLine::new("Determinant D", self.determinant, "N²·m⁴", Equation::StiffnessDeterminant),
        ]
    }
}

impl ToReport for ShearCenter {
    fn report_lines(&self) -> Vec<ReportLine> {
        vec![
            ReportLine::new("Shear centre y", self.location.y, "m", self.equation),
            ReportLine::new("Shear centre z", self.location.z, "m", self.equation),
        ]
    }
}

impl ToReport for BendingStressResult {
    fn report_lines(&self) -> Vec<ReportLine> {
        self.stresses
            .iter()
            .map(|p| ReportLine::new(format!("Stress at {}", p.name), p.stress, "Pa", self.equation))
            .collect()
    }
}

impl ToReport for ShearFlowField {
    fn report_lines(&self) -> Vec<ReportLine> {
        let mut lines = Vec::new();
        for flow in &self.segments {
            lines.push(ReportLine::new(
                format!("q at start of segment {}", flow.segment),
                flow.start_value,
                "N/m",
                Equation::OpenShearFlow,
            ));
            lines.push(ReportLine::new(
                format!("q at end of segment {}", flow.segment),
                flow.end_value,
                "N/m",
                Equation::OpenShearFlow,
            ));
        }
        if let Some(q0) = self.closing_flow {
            lines.push(ReportLine::new("Closing flow q0", q0, "N/m", Equation::ClosingShearFlow));
        }
        let peak = self.max_abs();
        lines.push(ReportLine::new(
            format!("Peak |q| (segment {}, s = {:.4} m)", peak.segment, peak.s),
            peak.value.abs(),
            "N/m",
            self.equation,
        ));
        lines
    }
}

impl ToReport for TorsionResult {
    fn report_lines(&self) -> Vec<ReportLine> {
        let mut lines = vec![ReportLine::new("Torsional rigidity GJ", self.rigidity, "N·m²", self.equation)];
        if let Some(compliance) = self.compliance {
            lines.push(ReportLine::new("Compliance ∮ds/(G t)", compliance, "m/N", self.equation));
        }
        if let Some(q) = self.shear_flow {
            lines.push(ReportLine::new("Bredt shear flow q", q, "N/m", Equation::BredtShearFlow));
        }
        lines.push(ReportLine::new("Rate of twist θ'", self.twist_rate, "rad/m", Equation::TwistRate));
        for wall in &self.wall_stresses {
            lines.push(ReportLine::new(format!("τ in segment {}", wall.segment), wall.stress, "Pa", wall.equation));
        }
        lines
    }
}

impl ToReport for WarpingResult {
    fn report_lines(&self) -> Vec<ReportLine> {
        let mut lines = Vec::new();
        for w in &self.displacements {
            lines.push(ReportLine::plain(format!("Swept area to {}", w.name), w.swept_area, "m²"));
            lines.push(ReportLine::new(format!("Warping at {}", w.name), w.displacement, "m", self.equation));
        }
        lines
    }
}

impl ToReport for PlyProperties {
    fn report_lines(&self) -> Vec<ReportLine> {
        let mut lines = vec![
            ReportLine::new("Longitudinal modulus E_x", self.longitudinal_modulus, "Pa", Equation::LongitudinalModulus),
            ReportLine::new("Transverse modulus E_y", self.transverse_modulus, "Pa", Equation::TransverseModulus),
        ];
        if let Some(g) = self.shear_modulus {
            lines.push(ReportLine::new("Shear modulus G_xy", g, "Pa", Equation::InPlaneShearModulus));
        }
        lines
    }
}

impl ToReport for CompositeBarResult {
    fn report_lines(&self) -> Vec<ReportLine> {
        let mut lines = self.ply.report_lines();
        lines.push(ReportLine::plain("Cross-section area", self.area, "m²"));
        lines.push(ReportLine::new("Axial stress σ", self.stress, "Pa", Equation::AxialStress));
        lines.push(ReportLine::plain("Axial strain ε", self.strain, ""));
        lines.push(ReportLine::new("Elongation ΔL", self.elongation, "m", Equation::AxialElongation));
        lines
    }
}

impl ToReport for StudyReport {
    fn report_lines(&self) -> Vec<ReportLine> {
        let mut lines = Vec::new();
        if let Some(stiffness) = &self.stiffness {
            lines.extend(stiffness.report_lines());
        }
        if let Some(centre) = &self.shear_center {
            lines.extend(centre.report_lines());
        }
        if let Some(bending) = &self.bending {
            lines.extend(bending.report_lines());
        }
        if let Some(flow) = &self.shear_flow {
            lines.extend(flow.report_lines());
        }
        if let Some(torsion) = &self.torsion {
            lines.extend(torsion.report_lines());
        }
        if let Some(warping) = &self.warping {
            lines.extend(warping.report_lines());
        }
        lines
    }
}
