//! # Worked Cases
//!
//! Six textbook examples of composite thin-walled sections, rebuilt as engine
//! inputs. Every value in a case report is computed by the solvers; the
//! textbook figures live in this module's tests as regression expectations.
//!
//! | # | Case | Solvers |
//! |---|------|---------|
//! | 1 | Unidirectional bar under axial load | micromechanics, composite bar |
//! | 2 | Z-section in bending | stiffness, bending stress |
//! | 3 | Closed triangular section in shear | stiffness, shear flow |
//! | 4 | Rectangular box in torsion | torsion, warping |
//! | 5 | Open C-section in torsion | torsion |
//! | 6 | I-section in torsion | strip torsion, warping |
//!
//! Where the textbook gives only shear moduli (cases 4 to 6) the bending
//! moduli are filled in as isotropic with ν = 0.3; they do not affect the
//! torsion results.
//!
//! ## Example
//!
//! ```rust
//! use thinwall_core::worked_cases;
//!
//! let case = worked_cases::run(4).unwrap();
//! let q = case.line("Bredt shear flow q").unwrap();
//! assert!((q.value - 250_000.0).abs() < 1e-6);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::bending::{compute_bending_stress, BendingMoments};
use crate::calculations::composite_bar::{self, CompositeBarInput};
use crate::calculations::shear_flow::{compute_shear_flow_for, ShearLoad};
use crate::calculations::stiffness::{compute_stiffness, ReferenceAxis};
use crate::calculations::torsion::{compute_strip_torsion, compute_torsion};
use crate::calculations::warping::{compute_warping_with, WarpingOptions};
use crate::equations::registry::{Equation, EquationTracker};
use crate::errors::{AnalysisError, AnalysisResult};
use crate::materials::micromechanics::PlyInput;
use crate::materials::WallMaterial;
use crate::report::{ReportLine, ToReport};
use crate::section::{NamedPoint, Point, Section, SectionPoint, Segment};
use crate::settings::AnalysisSettings;
use crate::units::{gpa, mm, KilonewtonMeters, KilonewtonMillimeters, Kilonewtons, NewtonMeters, Newtons};

/// Number of worked cases.
pub const CASE_COUNT: usize = 6;

/// Poisson's ratio assumed when a case gives only shear moduli.
const ASSUMED_POISSON_RATIO: f64 = 0.3;

static TITLES: [&str; CASE_COUNT] = [
    "Micromechanics of a composite bar",
    "Bending of a composite Z-section",
    "Shear of a closed triangular section",
    "Torsion of a rectangular box",
    "Torsion of an open C-section",
    "Torsion of an I-section",
];

/// Result of one worked case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkedCase {
    /// Case number, 1 to 6
    pub number: usize,
    /// Short title
    pub title: String,
    /// Computed values in presentation order
    pub lines: Vec<ReportLine>,
    /// Equations the case applied
    pub equations: EquationTracker,
}

impl WorkedCase {
    fn new(number: usize, lines: Vec<ReportLine>) -> Self {
        let title = TITLES[number - 1].to_string();
        let mut equations = EquationTracker::new();
        for line in &lines {
            if let Some(eq) = line.equation {
                equations.record_for_study(eq, line.label.clone(), title.clone());
            }
        }
        WorkedCase {
            number,
            title,
            lines,
            equations,
        }
    }

    /// Line by label.
    pub fn line(&self, label: &str) -> AnalysisResult<&ReportLine> {
        self.lines
            .iter()
            .find(|l| l.label == label)
            .ok_or_else(|| AnalysisError::invalid_input("label", label, format!("no such line in case {}", self.number)))
    }
}

/// Case titles, numbered from 1.
pub fn titles() -> impl Iterator<Item = (usize, &'static str)> {
    TITLES.iter().enumerate().map(|(i, t)| (i + 1, *t))
}

/// Run one case.
pub fn run(number: usize) -> AnalysisResult<WorkedCase> {
    let lines = match number {
        1 => composite_bar_case()?,
        2 => z_section_bending()?,
        3 => triangle_shear()?,
        4 => box_torsion()?,
        5 => c_section_torsion()?,
        6 => i_section_torsion()?,
        _ => {
            return Err(AnalysisError::invalid_input(
                "case",
                number.to_string(),
                format!("cases are numbered 1 to {}", CASE_COUNT),
            ))
        }
    };
    log::debug!("worked case {} produced {} lines", number, lines.len());
    Ok(WorkedCase::new(number, lines))
}

/// Run every case in order.
pub fn all() -> AnalysisResult<Vec<WorkedCase>> {
    (1..=CASE_COUNT).map(run).collect()
}

fn polyline(points: &[(f64, f64)], walls: &[(f64, &WallMaterial)]) -> AnalysisResult<Vec<Segment>> {
    points
        .windows(2)
        .zip(walls)
        .map(|(pair, (t, material))| Segment::with_material(pair[0].into(), pair[1].into(), *t, material))
        .collect()
}

fn closed_polygon(corners: &[(f64, f64)], walls: &[(f64, &WallMaterial)]) -> AnalysisResult<Section> {
    let mut points = corners.to_vec();
    points.push(corners[0]);
    Section::new(polyline(&points, walls)?)
}

/// 80 mm x 50 mm bar, 0.5 m long, 100 kN; 20 % carbon fibres in epoxy.
fn composite_bar_case() -> AnalysisResult<Vec<ReportLine>> {
    let input = CompositeBarInput {
        label: "Bar".to_string(),
        ply: PlyInput::new(gpa(200.0), gpa(5.0), 0.2, 0.8),
        force: Newtons::from(Kilonewtons(100.0)).0,
        width: mm(80.0),
        height: mm(50.0),
        length: 0.5,
    };
    Ok(composite_bar::calculate(&input)?.report_lines())
}

/// Z-section h = 100 mm, flanges 50 mm: flanges 50 GPa / 2 mm, web 15 GPa / 1 mm, M_y = 1 kN·m.
fn z_section_bending() -> AnalysisResult<Vec<ReportLine>> {
    let (h, b) = (mm(100.0), mm(50.0));
    let flange = WallMaterial::isotropic("Flange", gpa(50.0), ASSUMED_POISSON_RATIO)?;
    let web = WallMaterial::isotropic("Web", gpa(15.0), ASSUMED_POISSON_RATIO)?;
    let section = Section::new(polyline(
        &[(b, h / 2.0), (0.0, h / 2.0), (0.0, -h / 2.0), (-b, -h / 2.0)],
        &[(mm(2.0), &flange), (mm(1.0), &web), (mm(2.0), &flange)],
    )?)?;

    let stiffness = compute_stiffness(&section, ReferenceAxis::Centroid)?;
    let moments = BendingMoments::new(NewtonMeters::from(KilonewtonMeters(1.0)).0, 0.0);
    let points = [
        NamedPoint::new("web top", SectionPoint::new(1, 0.0)),
        NamedPoint::new("flange junction", SectionPoint::new(0, b)),
        NamedPoint::new("flange tip", SectionPoint::new(0, 0.0)),
    ];
    let stresses = compute_bending_stress(&section, &stiffness, moments, &points)?;

    let mut lines = stiffness.report_lines();
    lines.extend(stresses.report_lines());
    Ok(lines)
}

/// Triangle A(−200, 0), B(0, 150), C(0, −150) mm: legs 45 GPa / 2 mm,
/// web BC 20 GPa / 1.5 mm, T_z = 2 kN through A.
fn triangle_shear() -> AnalysisResult<Vec<ReportLine>> {
    let leg = WallMaterial::isotropic("Leg", gpa(45.0), ASSUMED_POISSON_RATIO)?;
    let web = WallMaterial::isotropic("Web", gpa(20.0), ASSUMED_POISSON_RATIO)?;
    let apex = (mm(-200.0), 0.0);
    let section = closed_polygon(
        &[apex, (0.0, mm(150.0)), (0.0, mm(-150.0))],
        &[(mm(2.0), &leg), (mm(1.5), &web), (mm(2.0), &leg)],
    )?;

    let stiffness = compute_stiffness(&section, ReferenceAxis::Centroid)?;
    let load = ShearLoad::vertical(Newtons::from(Kilonewtons(2.0)).0).through(apex.into());
    let field = compute_shear_flow_for(&section, &stiffness, &load, 0)?;
    let q0 = field.closing_flow.unwrap_or(0.0);
    let web_length = section.segment(1)?.length();

    let mut lines = vec![ReportLine::new("EI_yy", stiffness.ei_yy, "N·m²", stiffness.equation)];
    lines.push(ReportLine::new("Open flow at B", field.value_at(1, 0.0)? - q0, "N/m", Equation::OpenShearFlow));
    lines.push(ReportLine::new(
        "Open flow at web middle",
        field.value_at(1, 0.5 * web_length)? - q0,
        "N/m",
        Equation::OpenShearFlow,
    ));
    lines.push(ReportLine::new("Closing flow q0", q0, "N/m", Equation::ClosingShearFlow));
    lines.push(ReportLine::new("Final flow at B", field.value_at(1, 0.0)?, "N/m", Equation::ClosingShearFlow));
    lines.push(ReportLine::new(
        "Final flow at web middle",
        field.value_at(1, 0.5 * web_length)?,
        "N/m",
        Equation::ClosingShearFlow,
    ));
    Ok(lines)
}

/// 200 mm x 100 mm box: covers 20 GPa / 2 mm, webs 35 GPa / 1 mm (shear moduli), T = 10 kN·m.
fn box_torsion() -> AnalysisResult<Vec<ReportLine>> {
    let web = WallMaterial::isotropic_from_shear("Web", gpa(35.0), ASSUMED_POISSON_RATIO)?;
    let cover = WallMaterial::isotropic_from_shear("Cover", gpa(20.0), ASSUMED_POISSON_RATIO)?;
    let (hb, hh) = (mm(100.0), mm(50.0));
    let section = closed_polygon(
        &[(hb, -hh), (hb, hh), (-hb, hh), (-hb, -hh)],
        &[(mm(1.0), &web), (mm(2.0), &cover), (mm(1.0), &web), (mm(2.0), &cover)],
    )?;

    let torsion = compute_torsion(&section, NewtonMeters::from(KilonewtonMeters(10.0)).0)?;
    // Zero warping at the middle of the top cover
    let options = WarpingOptions::new(Point::origin(), SectionPoint::new(1, hb));
    let corners = [
        NamedPoint::new("top right corner", SectionPoint::new(1, 0.0)),
        NamedPoint::new("top left corner", SectionPoint::new(2, 0.0)),
    ];
    let warping = compute_warping_with(&section, torsion.twist_rate, &corners, &options)?;

    let mut lines = torsion.report_lines();
    lines.extend(warping.report_lines());
    Ok(lines)
}

/// C-section: flanges 25 mm, 20 GPa / 1.5 mm; web 50 mm, 15 GPa / 2.5 mm (shear moduli); T = 10 N·m.
fn c_section_torsion() -> AnalysisResult<Vec<ReportLine>> {
    let flange = WallMaterial::isotropic_from_shear("Flange", gpa(20.0), ASSUMED_POISSON_RATIO)?;
    let web = WallMaterial::isotropic_from_shear("Web", gpa(15.0), ASSUMED_POISSON_RATIO)?;
    let (b, h) = (mm(25.0), mm(50.0));
    let section = Section::new(polyline(
        &[(b, h / 2.0), (0.0, h / 2.0), (0.0, -h / 2.0), (b, -h / 2.0)],
        &[(mm(1.5), &flange), (mm(2.5), &web), (mm(1.5), &flange)],
    )?)?;

    let torsion = compute_torsion(&section, 10.0)?;
    let mut lines = torsion.report_lines();
    lines.push(ReportLine::new(
        "Max shear stress (web)",
        torsion.wall_stresses[1].stress,
        "Pa",
        Equation::OpenWallShearStress,
    ));
    lines.push(ReportLine::new(
        "Max shear stress (flange)",
        torsion.wall_stresses[0].stress,
        "Pa",
        Equation::OpenWallShearStress,
    ));
    Ok(lines)
}

/// I-section h = 100 mm, flanges 50 mm: flanges 16.3 GPa / 1 mm, web 20.9 GPa / 5 mm
/// (shear moduli); T = 0.5 kN·mm. Warping at a flange tip, zero at the web centre.
fn i_section_torsion() -> AnalysisResult<Vec<ReportLine>> {
    let flange = WallMaterial::isotropic_from_shear("Flange", gpa(16.3), ASSUMED_POISSON_RATIO)?;
    let web = WallMaterial::isotropic_from_shear("Web", gpa(20.9), ASSUMED_POISSON_RATIO)?;
    let (h, b) = (mm(100.0), mm(50.0));
    let (tf, tw) = (mm(1.0), mm(5.0));

    // The I is branched, so torsion sums its strips directly
    let top = Segment::with_material(Point::new(-b / 2.0, h / 2.0), Point::new(b / 2.0, h / 2.0), tf, &flange)?;
    let bottom = Segment::with_material(Point::new(-b / 2.0, -h / 2.0), Point::new(b / 2.0, -h / 2.0), tf, &flange)?;
    let middle = Segment::with_material(Point::new(0.0, -h / 2.0), Point::new(0.0, h / 2.0), tw, &web)?;
    let torque = NewtonMeters::from(KilonewtonMillimeters(0.5)).0;
    let torsion = compute_strip_torsion(&[top, bottom, middle], torque, &AnalysisSettings::default())?;

    // Swept area along the unbranched path web centre -> flange root -> flange tip
    let path = Section::new(polyline(
        &[(0.0, 0.0), (0.0, h / 2.0), (-b / 2.0, h / 2.0)],
        &[(tw, &web), (tf, &flange)],
    )?)?;
    let options = WarpingOptions::new(Point::origin(), SectionPoint::new(0, 0.0));
    let tip = [NamedPoint::new("point 1", SectionPoint::new(1, b / 2.0))];
    let warping = compute_warping_with(&path, torsion.twist_rate, &tip, &options)?;

    let mut lines = torsion.report_lines();
    lines.push(ReportLine::new(
        "Max shear stress (web)",
        torsion.wall_stresses[2].stress,
        "Pa",
        Equation::OpenWallShearStress,
    ));
    lines.push(ReportLine::new(
        "Max shear stress (flange)",
        torsion.wall_stresses[0].stress,
        "Pa",
        Equation::OpenWallShearStress,
    ));
    lines.extend(warping.report_lines());
    // Lecture-note figure, which takes the full flange width as the lever arm
    lines.push(ReportLine::plain("Notes swept area 0.5·b·h/2", 0.5 * b * (h / 2.0), "m²"));
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn value(case: &WorkedCase, label: &str) -> f64 {
        case.line(label).unwrap().value
    }

    #[test]
    fn test_all_cases_run() {
        let cases = all().unwrap();
        assert_eq!(cases.len(), CASE_COUNT);
        for (i, case) in cases.iter().enumerate() {
            assert_eq!(case.number, i + 1);
            assert!(!case.lines.is_empty());
            assert!(!case.equations.usages().is_empty());
        }
        assert_eq!(titles().count(), CASE_COUNT);
    }

    #[test]
    fn test_case_out_of_range() {
        assert!(run(0).is_err());
        assert!(run(7).is_err());
    }

    #[test]
    fn test_case_1_bar() {
        let case = run(1).unwrap();
        assert_relative_eq!(value(&case, "Longitudinal modulus E_x"), 44.0e9, max_relative = 1e-12);
        assert_relative_eq!(value(&case, "Transverse modulus E_y"), 6.2112e9, max_relative = 1e-4);
        assert_relative_eq!(value(&case, "Axial stress σ"), 25.0e6, max_relative = 1e-12);
        assert_relative_eq!(value(&case, "Elongation ΔL"), 25.0e6 * 0.5 / 44.0e9, max_relative = 1e-12);
    }

    #[test]
    fn test_case_2_z_section() {
        let case = run(2).unwrap();
        assert_relative_eq!(value(&case, "EI_yy"), 26_250.0, max_relative = 1e-9);
        assert_relative_eq!(value(&case, "EI_zz"), 8_333.333, max_relative = 1e-6);
        assert_relative_eq!(value(&case, "EI_yz"), 12_500.0, max_relative = 1e-9);
        assert_relative_eq!(value(&case, "Stress at web top"), 100.0e6, max_relative = 1e-6);
        assert_relative_eq!(value(&case, "Stress at flange junction"), 333.333e6, max_relative = 1e-6);
        assert_relative_eq!(value(&case, "Stress at flange tip"), -166.667e6, max_relative = 1e-5);
    }

    #[test]
    fn test_case_3_triangle() {
        let case = run(3).unwrap();
        assert_relative_eq!(value(&case, "EI_yy"), 405.0e3, max_relative = 1e-12);
        assert_relative_eq!(value(&case, "Open flow at B"), 8_333.333, max_relative = 1e-6);
        assert_relative_eq!(value(&case, "Open flow at web middle"), 10_000.0, max_relative = 1e-9);
        assert_relative_eq!(value(&case, "Closing flow q0"), -9_444.444, max_relative = 1e-6);
        assert_relative_eq!(value(&case, "Final flow at B"), -1_111.111, max_relative = 1e-5);
    }

    #[test]
    fn test_case_4_box() {
        let case = run(4).unwrap();
        assert_relative_eq!(value(&case, "Bredt shear flow q"), 250_000.0, max_relative = 1e-12);
        assert_relative_eq!(value(&case, "Compliance ∮ds/(G t)"), 1.5714286e-8, max_relative = 1e-6);
        assert_relative_eq!(value(&case, "Torsional rigidity GJ"), 101_818.18, max_relative = 1e-6);
        assert_relative_eq!(value(&case, "Rate of twist θ'"), 0.0982143, max_relative = 1e-5);
        assert_relative_eq!(value(&case, "Warping at top right corner"), -0.1339e-3, max_relative = 1e-3);
        assert_relative_eq!(value(&case, "Warping at top left corner"), 0.1339e-3, max_relative = 1e-3);
    }

    #[test]
    fn test_case_5_c_section() {
        let case = run(5).unwrap();
        let gj = 5.03125;
        assert_relative_eq!(value(&case, "Torsional rigidity GJ"), gj, max_relative = 1e-12);
        assert_relative_eq!(value(&case, "Rate of twist θ'"), 1.987578, max_relative = 1e-6);
        assert_relative_eq!(value(&case, "Max shear stress (web)"), 74.534e6, max_relative = 1e-5);
        assert_relative_eq!(value(&case, "Max shear stress (web)"), 15.0e9 * 0.0025 * 10.0 / gj, max_relative = 1e-12);
        assert_relative_eq!(value(&case, "Max shear stress (flange)"), 20.0e9 * 0.0015 * 10.0 / gj, max_relative = 1e-12);
    }

    #[test]
    fn test_case_6_i_section() {
        let case = run(6).unwrap();
        let gj = 87.62667;
        let twist = 0.5 / gj;
        assert_relative_eq!(value(&case, "Torsional rigidity GJ"), gj, max_relative = 1e-6);
        assert_relative_eq!(value(&case, "Rate of twist θ'"), 5.706026e-3, max_relative = 1e-6);
        assert_relative_eq!(value(&case, "Max shear stress (web)"), 596.28e3, max_relative = 1e-5);
        assert_relative_eq!(value(&case, "Warping at point 1"), -7.1325e-6, max_relative = 1e-4);
        assert_relative_eq!(value(&case, "Max shear stress (web)"), 20.9e9 * 0.005 * twist, max_relative = 1e-6);
        assert_relative_eq!(value(&case, "Swept area to point 1"), 6.25e-4, max_relative = 1e-12);
        assert_relative_eq!(value(&case, "Notes swept area 0.5·b·h/2"), 1.25e-3, max_relative = 1e-12);
        assert_relative_eq!(value(&case, "Warping at point 1"), -2.0 * 6.25e-4 * twist, max_relative = 1e-6);
    }

    #[test]
    fn test_unknown_line() {
        let case = run(1).unwrap();
        assert!(case.line("nothing").is_err());
    }
}
