//! # Composite Micromechanics Formulas
//!
//! Rule-of-mixtures estimates for a unidirectional fibre/matrix ply and the
//! axial response of a composite bar.
//!
//! ## Notation
//!
//! - `v_f`, `v_m` = fibre and matrix volume fractions (v_f + v_m = 1)
//! - `E_f`, `E_m` = fibre and matrix moduli
//! - `x` = fibre direction, `y` = transverse direction

/// Longitudinal modulus (Voigt, iso-strain).
///
/// # Formula
/// E_x = v_f E_f + v_m E_m
///
/// # Example
/// ```rust
/// use thinwall_core::equations::composite::longitudinal_modulus;
///
/// // 20 % fibres at 200 GPa in a 5 GPa matrix
/// assert!((longitudinal_modulus(0.2, 200.0, 0.8, 5.0) - 44.0).abs() < 1e-12);
/// ```
#[inline]
pub fn longitudinal_modulus(v_f: f64, e_f: f64, v_m: f64, e_m: f64) -> f64 {
    v_f * e_f + v_m * e_m
}

/// Transverse modulus (Reuss, iso-stress).
///
/// # Formula
/// E_y = (v_f/E_f + v_m/E_m)⁻¹
#[inline]
pub fn transverse_modulus(v_f: f64, e_f: f64, v_m: f64, e_m: f64) -> f64 {
    1.0 / (v_f / e_f + v_m / e_m)
}

/// In-plane shear modulus by the inverse rule of mixtures.
///
/// # Formula
/// G_xy = (v_f/G_f + v_m/G_m)⁻¹
#[inline]
pub fn inplane_shear_modulus(v_f: f64, g_f: f64, v_m: f64, g_m: f64) -> f64 {
    1.0 / (v_f / g_f + v_m / g_m)
}

/// Axial stress in a bar.
///
/// # Formula
/// σ_xx = F / A
#[inline]
pub fn axial_stress(force: f64, area: f64) -> f64 {
    force / area
}

/// Axial elongation of a bar of length L.
///
/// # Formula
/// ΔL = ε_xx L = σ_xx L / E_x
#[inline]
pub fn axial_elongation(stress: f64, modulus: f64, length: f64) -> f64 {
    stress / modulus * length
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_transverse_modulus() {
        // 1 / (0.2/200 + 0.8/5) = 1 / 0.161 = 6.2112 GPa
        assert_relative_eq!(transverse_modulus(0.2, 200.0, 0.8, 5.0), 6.2112, epsilon = 1e-4);
    }

    #[test]
    fn test_bounds_ordering() {
        // Voigt bound is always at least the Reuss bound
        let (vf, ef, vm, em) = (0.6, 230.0, 0.4, 3.5);
        assert!(longitudinal_modulus(vf, ef, vm, em) >= transverse_modulus(vf, ef, vm, em));
    }

    #[test]
    fn test_pure_phase_limits() {
        assert_relative_eq!(longitudinal_modulus(1.0, 200.0, 0.0, 5.0), 200.0);
        assert_relative_eq!(transverse_modulus(0.0, 200.0, 1.0, 5.0), 5.0);
        assert_relative_eq!(inplane_shear_modulus(0.0, 80.0, 1.0, 1.8), 1.8);
    }

    #[test]
    fn test_bar_response() {
        // 100 kN on 80 x 50 mm
        let sigma = axial_stress(100_000.0, 0.08 * 0.05);
        assert_relative_eq!(sigma, 25.0e6, epsilon = 1e-6);
        let dl = axial_elongation(sigma, 44.0e9, 0.5);
        assert_relative_eq!(dl, 25.0e6 / 44.0e9 * 0.5, epsilon = 1e-15);
    }
}
