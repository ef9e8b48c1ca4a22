//! # Thin-Walled Section Formulas
//!
//! Closed-form building blocks used by the solvers in [`crate::calculations`].
//! Straight segments make every line integral a polynomial in the arc length,
//! so the integrals below are exact antiderivatives in the segment endpoints.
//!
//! ## Notation
//!
//! - `s` = arc length along the wall mid-line
//! - `t` = wall thickness, `E` = bending modulus, `G` = shear modulus
//! - `D` = EI_yy·EI_zz − EI_yz²
//! - `A` = enclosed area of a closed cell
//! - `θ'` = twist rate
//!
//! ## Sign Conventions
//!
//! - EI_yy integrates z², EI_zz integrates y²
//! - Positive M_y puts +z fibres in tension; positive M_z puts +y fibres in compression
//! - Swept areas are positive when the radius vector turns counter-clockwise

use crate::section::Point;

// =============================================================================
// SECTION INTEGRALS
// =============================================================================

/// Second-moment line integrals of a straight segment.
///
/// Returns `(∫z² ds, ∫y² ds, ∫yz ds)` for the segment from `a` to `b`
/// (coordinates already relative to the reference axis).
///
/// # Formula
/// ∫z² ds = L(z_a² + z_a z_b + z_b²)/3,
/// ∫yz ds = L(2y_a z_a + y_a z_b + y_b z_a + 2y_b z_b)/6
///
/// # Example
/// ```rust
/// use thinwall_core::equations::thin_wall::line_second_moments;
/// use thinwall_core::section::Point;
///
/// // Vertical web of height 0.1 centred on the axis: ∫z² ds = h³/12
/// let (zz, _, _) = line_second_moments(Point::new(0.0, -0.05), Point::new(0.0, 0.05));
/// assert!((zz - 0.1_f64.powi(3) / 12.0).abs() < 1e-15);
/// ```
pub fn line_second_moments(a: Point, b: Point) -> (f64, f64, f64) {
    let length = a.distance_to(b);
    let zz = length * (a.z * a.z + a.z * b.z + b.z * b.z) / 3.0;
    let yy = length * (a.y * a.y + a.y * b.y + b.y * b.y) / 3.0;
    let yz = length * (2.0 * a.y * a.z + a.y * b.z + b.y * a.z + 2.0 * b.y * b.z) / 6.0;
    (zz, yy, yz)
}

/// Determinant of the bending stiffness tensor.
///
/// # Formula
/// D = EI_yy·EI_zz − EI_yz²
#[inline]
pub fn stiffness_determinant(ei_yy: f64, ei_zz: f64, ei_yz: f64) -> f64 {
    ei_yy * ei_zz - ei_yz * ei_yz
}

// =============================================================================
// BENDING
// =============================================================================

/// Axial strain at (y, z) under bending moments (M_y, M_z).
///
/// # Formula
/// ε = [(EI_zz M_y + EI_yz M_z) z − (EI_yz M_y + EI_yy M_z) y] / D
///
/// The stress in a wall is `E(s)·ε`; for a Z-section with M_z = 0 this is
/// σ = E (EI_zz M_y z − EI_yz M_y y)/D.
pub fn bending_strain(ei_yy: f64, ei_zz: f64, ei_yz: f64, m_y: f64, m_z: f64, y: f64, z: f64) -> f64 {
    let d = stiffness_determinant(ei_yy, ei_zz, ei_yz);
    ((ei_zz * m_y + ei_yz * m_z) * z - (ei_yz * m_y + ei_yy * m_z) * y) / d
}

// =============================================================================
// SHEAR FLOW
// =============================================================================

/// Open-section shear flow from modulus-weighted first moments.
///
/// # Formula
/// q = (V_z/D)[EI_zz Q_z − EI_yz Q_y] + (V_y/D)[EI_yy Q_y − EI_yz Q_z]
///
/// where `Q_y = ∫E t y ds`, `Q_z = ∫E t z ds` accumulated from the free edge or cut.
pub fn open_shear_flow(ei_yy: f64, ei_zz: f64, ei_yz: f64, v_y: f64, v_z: f64, q_y: f64, q_z: f64) -> f64 {
    let d = stiffness_determinant(ei_yy, ei_zz, ei_yz);
    (v_z * (ei_zz * q_z - ei_yz * q_y) + v_y * (ei_yy * q_y - ei_yz * q_z)) / d
}

/// Uniform closing flow restoring moment equivalence about the moment centre.
///
/// # Formula
/// q₀ = −(∮ p q_o ds) / (2A)
///
/// `signed_area` must carry the loop orientation so that ∮ p ds = 2A.
#[inline]
pub fn closing_shear_flow(moment_integral: f64, signed_area: f64) -> f64 {
    -moment_integral / (2.0 * signed_area)
}

// =============================================================================
// TORSION
// =============================================================================

/// Bredt–Batho shear flow in a closed cell.
///
/// # Formula
/// q = M_x / (2A)
///
/// # Example
/// ```rust
/// use thinwall_core::equations::thin_wall::bredt_shear_flow;
///
/// // 10 kN·m on a 0.2 x 0.1 m box
/// assert!((bredt_shear_flow(10_000.0, 0.02) - 250_000.0).abs() < 1e-9);
/// ```
#[inline]
pub fn bredt_shear_flow(torque: f64, area: f64) -> f64 {
    torque / (2.0 * area)
}

/// Saint-Venant rigidity of one thin open strip.
///
/// # Formula
/// GJ_i = G l t³ / 3
#[inline]
pub fn strip_torsional_rigidity(shear_modulus: f64, length: f64, thickness: f64) -> f64 {
    shear_modulus * length * thickness.powi(3) / 3.0
}

/// Torsional rigidity of a single closed cell with heterogeneous walls.
///
/// # Formula
/// GJ = 4A² / ∮ ds/(G t)
#[inline]
pub fn closed_cell_torsional_rigidity(area: f64, compliance: f64) -> f64 {
    4.0 * area * area / compliance
}

/// Rate of twist.
///
/// # Formula
/// θ' = M_x / GJ
#[inline]
pub fn twist_rate(torque: f64, rigidity: f64) -> f64 {
    torque / rigidity
}

/// Maximum shear stress across an open strip (at the wall faces).
///
/// # Formula
/// τ_max = G t θ'
#[inline]
pub fn open_wall_max_shear_stress(shear_modulus: f64, thickness: f64, twist_rate: f64) -> f64 {
    shear_modulus * thickness * twist_rate
}

/// Average shear stress in a closed-cell wall.
///
/// # Formula
/// τ = q / t
#[inline]
pub fn closed_wall_shear_stress(shear_flow: f64, thickness: f64) -> f64 {
    shear_flow / thickness
}

// =============================================================================
// WARPING
// =============================================================================

/// Warping displacement from a swept (sectorial) area.
///
/// # Formula
/// u = −2 A_R θ'
///
/// # Example
/// ```rust
/// use thinwall_core::equations::thin_wall::sectorial_warping;
///
/// assert!((sectorial_warping(1.25e-3, 0.1) + 2.5e-4).abs() < 1e-18);
/// ```
#[inline]
pub fn sectorial_warping(swept_area: f64, twist_rate: f64) -> f64 {
    -2.0 * swept_area * twist_rate
}

// =============================================================================
// UNIT TESTS
// =============================================================================
