//! # Torsion Solver
//!
//! Torsional rigidity and twist rate, dispatched once on the section's
//! [`Topology`]:
//!
//! - **Open**: thin-strip summation `GJ = Σ G l t³/3`
//! - **Closed single cell**: `GJ = 4A² / ∮ ds/(G t)`, the Bredt–Batho
//!   formula with the loop integral summed wall by wall
//!
//! Both report the twist rate `θ' = T/GJ` and the maximum shear stress in
//! every wall. Closed cells also report the Bredt shear flow `q = T/(2A)`.
//!
//! Positive torque turns counter-clockwise in the (y, z) plane.

use serde::{Deserialize, Serialize};

use crate::equations::registry::Equation;
use crate::equations::thin_wall;
use crate::errors::{AnalysisError, AnalysisResult};
use crate::section::{Section, Segment, Topology};
use crate::settings::AnalysisSettings;

/// Shear stress carried by one wall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallShearStress {
    /// Segment index
    pub segment: usize,
    /// Wall thickness (m)
    pub thickness: f64,
    /// Maximum shear stress in the wall (Pa). Closed cells: along the segment
    /// direction, from the uniform flow. Open strips: magnitude at the faces.
    pub stress: f64,
    /// Formula identifier
    pub equation: Equation,
}

/// Torsional response of a section to a torque.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TorsionResult {
    /// Applied torque (N·m)
    pub torque: f64,
    /// Torsional rigidity GJ (N·m²)
    pub rigidity: f64,
    /// Rate of twist θ' (rad/m)
    pub twist_rate: f64,
    /// Topology the formula was chosen for
    pub topology: Topology,
    /// Bredt shear flow T/(2A), counter-clockwise positive (closed cells only, N/m)
    pub shear_flow: Option<f64>,
    /// ∮ ds/(G t) (closed cells only, m/N)
    pub compliance: Option<f64>,
    /// Per-wall maximum shear stress
    pub wall_stresses: Vec<WallShearStress>,
    /// Formula identifier for the rigidity
    pub equation: Equation,
}

impl TorsionResult {
    /// Largest |τ| over the walls, with its segment index.
    pub fn max_shear_stress(&self) -> Option<(usize, f64)> {
        self.wall_stresses
            .iter()
            .map(|w| (w.segment, w.stress.abs()))
            .fold(None, |best, (seg, tau)| match best {
                Some((_, b)) if b >= tau => best,
                _ => Some((seg, tau)),
            })
    }
}

/// Torsional rigidity and twist rate of `section` under `torque`.
///
/// # Example
///
/// ```rust
/// use thinwall_core::calculations::torsion::compute_torsion;
/// use thinwall_core::section::{Section, Segment};
///
/// // 0.2 m x 0.1 m box: covers 20 GPa / 2 mm, webs 35 GPa / 1 mm
/// let corners = [(0.1, -0.05), (0.1, 0.05), (-0.1, 0.05), (-0.1, -0.05)];
/// let segments = (0..4)
///     .map(|i| {
///         let (t, g) = if i % 2 == 0 { (0.001, 35.0e9) } else { (0.002, 20.0e9) };
///         Segment::new(corners[i].into(), corners[(i + 1) % 4].into(), t, g, g).unwrap()
///     })
///     .collect();
/// let section = Section::new(segments).unwrap();
///
/// let result = compute_torsion(&section, 10_000.0).unwrap();
/// assert!((result.shear_flow.unwrap() - 250_000.0).abs() < 1e-6);
/// assert!((result.rigidity - 101_818.18).abs() < 0.01);
/// ```
pub fn compute_torsion(section: &Section, torque: f64) -> AnalysisResult<TorsionResult> {
    AnalysisError::require_finite("torque", torque)?;

    // Segments are immutable, but a section can be fed deserialized walls
    for (index, seg) in section.segments().iter().enumerate() {
        seg.validate(index, section.tolerance())?;
    }

    match section.topology() {
        Topology::Open => open_torsion(section.segments(), torque, section.settings()),
        Topology::ClosedSingleCell { signed_area } => {
            closed_torsion(section.segments(), signed_area, torque, section.settings())
        }
    }
}

/// Thin-strip torsion of an arbitrary set of open walls.
///
/// The walls need not form a chain, so branched open sections such as an
/// I-section can be passed as their individual strips.
pub fn compute_strip_torsion(walls: &[Segment], torque: f64, settings: &AnalysisSettings) -> AnalysisResult<TorsionResult> {
    AnalysisError::require_finite("torque", torque)?;
    if walls.is_empty() {
        return Err(AnalysisError::degenerate_section("no walls to carry torque"));
    }
    for (index, seg) in walls.iter().enumerate() {
        seg.validate(index, settings.connection_tolerance)?;
    }
    open_torsion(walls, torque, settings)
}

fn open_torsion(walls: &[Segment], torque: f64, settings: &AnalysisSettings) -> AnalysisResult<TorsionResult> {
    let mut rigidity = 0.0;
    for (index, seg) in walls.iter().enumerate() {
        let slenderness = seg.length() / seg.thickness();
        if slenderness < settings.slender_strip_ratio {
            log::warn!(
                "segment {} has length/thickness = {:.2}; thin-strip torsion is inaccurate below {}",
                index,
                slenderness,
                settings.slender_strip_ratio
            );
        }
        let gj = thin_wall::strip_torsional_rigidity(seg.shear_modulus(), seg.length(), seg.thickness());
        log::trace!("segment {}: GJ_i = {:.6e}", index, gj);
        rigidity += gj;
    }

    let twist_rate = thin_wall::twist_rate(torque, rigidity);
    let wall_stresses = walls
        .iter()
        .enumerate()
        .map(|(index, seg)| WallShearStress {
            segment: index,
            thickness: seg.thickness(),
            stress: thin_wall::open_wall_max_shear_stress(seg.shear_modulus(), seg.thickness(), twist_rate),
            equation: Equation::OpenWallShearStress,
        })
        .collect();

    log::debug!("open torsion: GJ = {:.6e} N·m², θ' = {:.6e} rad/m", rigidity, twist_rate);

    Ok(TorsionResult {
        torque,
        rigidity,
        twist_rate,
        topology: Topology::Open,
        shear_flow: None,
        compliance: None,
        wall_stresses,
        equation: Equation::OpenSectionTorsionalRigidity,
    })
}

fn closed_torsion(walls: &[Segment], signed_area: f64, torque: f64, settings: &AnalysisSettings) -> AnalysisResult<TorsionResult> {
    let area = signed_area.abs();
    if area <= settings.area_tolerance {
        return Err(AnalysisError::degenerate_geometry(format!(
            "enclosed area {:.3e} m² cannot carry a Bredt shear flow",
            signed_area
        )));
    }

    let compliance: f64 = walls.iter().map(Segment::shear_compliance).sum();
    let rigidity = thin_wall::closed_cell_torsional_rigidity(area, compliance);
    let twist_rate = thin_wall::twist_rate(torque, rigidity);
    let shear_flow = thin_wall::bredt_shear_flow(torque, area);

    // Flow along each segment's own direction follows the loop orientation
    let directed_flow = thin_wall::bredt_shear_flow(torque, signed_area);
    let wall_stresses = walls
        .iter()
        .enumerate()
        .map(|(index, seg)| WallShearStress {
            segment: index,
            thickness: seg.thickness(),
            stress: thin_wall::closed_wall_shear_stress(directed_flow, seg.thickness()),
            equation: Equation::ClosedWallShearStress,
        })
        .collect();

    log::debug!(
        "closed torsion: A = {:.6e} m², ∮ds/Gt = {:.6e}, GJ = {:.6e} N·m², θ' = {:.6e} rad/m, q = {:.6e} N/m",
        area,
        compliance,
        rigidity,
        twist_rate,
        shear_flow
    );

    Ok(TorsionResult {
        torque,
        rigidity,
        twist_rate,
        topology: Topology::ClosedSingleCell { signed_area },
        shear_flow: Some(shear_flow),
        compliance: Some(compliance),
        wall_stresses,
        equation: Equation::ClosedSectionTorsionalRigidity,
    })
}
