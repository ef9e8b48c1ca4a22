//! Unidirectional ply properties from fibre and matrix constituents.
//!
//! ## Example
//!
//! ```rust
//! use thinwall_core::materials::micromechanics::{calculate, PlyInput};
//!
//! let input = PlyInput::new(200.0e9, 5.0e9, 0.2, 0.8);
//! let ply = calculate(&input).unwrap();
//! assert!((ply.longitudinal_modulus - 44.0e9).abs() < 1.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::equations::composite;
use crate::equations::registry::Equation;
use crate::errors::{AnalysisError, AnalysisResult};

/// Allowed deviation of v_f + v_m from 1
pub const VOLUME_FRACTION_TOLERANCE: f64 = 1e-6;

/// Constituents of a unidirectional ply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlyInput {
    /// Fibre modulus E_f (Pa)
    pub fibre_modulus: f64,
    /// Matrix modulus E_m (Pa)
    pub matrix_modulus: f64,
    /// Fibre volume fraction v_f
    pub fibre_fraction: f64,
    /// Matrix volume fraction v_m
    pub matrix_fraction: f64,
    /// Fibre shear modulus G_f (Pa), optional
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fibre_shear_modulus: Option<f64>,
    /// Matrix shear modulus G_m (Pa), optional
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matrix_shear_modulus: Option<f64>,
}

impl PlyInput {
    /// Ply with moduli only (no shear data).
    pub fn new(fibre_modulus: f64, matrix_modulus: f64, fibre_fraction: f64, matrix_fraction: f64) -> Self {
        PlyInput {
            fibre_modulus,
            matrix_modulus,
            fibre_fraction,
            matrix_fraction,
            fibre_shear_modulus: None,
            matrix_shear_modulus: None,
        }
    }

    /// Add constituent shear moduli.
    pub fn with_shear_moduli(mut self, fibre: f64, matrix: f64) -> Self {
        self.fibre_shear_modulus = Some(fibre);
        self.matrix_shear_modulus = Some(matrix);
        self
    }

    /// Validate moduli and volume fractions.
    pub fn validate(&self) -> AnalysisResult<()> {
        let moduli = [
            ("fibre_modulus", Some(self.fibre_modulus)),
            ("matrix_modulus", Some(self.matrix_modulus)),
            ("fibre_shear_modulus", self.fibre_shear_modulus),
            ("matrix_shear_modulus", self.matrix_shear_modulus),
        ];
        for (field, value) in moduli {
            if let Some(value) = value {
                AnalysisError::require_finite(field, value)?;
                if value <= 0.0 {
                    return Err(AnalysisError::invalid_input(field, value.to_string(), "Modulus must be positive"));
                }
            }
        }

        for (field, value) in [("fibre_fraction", self.fibre_fraction), ("matrix_fraction", self.matrix_fraction)] {
            AnalysisError::require_finite(field, value)?;
            if !(0.0..=1.0).contains(&value) {
                return Err(AnalysisError::invalid_input(field, value.to_string(), "Volume fraction must be in [0, 1]"));
            }
        }

        let sum = self.fibre_fraction + self.matrix_fraction;
        if (sum - 1.0).abs() > VOLUME_FRACTION_TOLERANCE {
            return Err(AnalysisError::invalid_input(
                "fibre_fraction + matrix_fraction",
                sum.to_string(),
                "Volume fractions must sum to 1",
            ));
        }
        Ok(())
    }
}

/// Homogenized ply properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlyProperties {
    /// E_x, fibre direction (Pa)
    pub longitudinal_modulus: f64,
    /// E_y, transverse (Pa)
    pub transverse_modulus: f64,
    /// G_xy (Pa), when both shear moduli were given
    pub shear_modulus: Option<f64>,
    /// Equations applied, in order
    pub equations: Vec<Equation>,
}

/// Rule-of-mixtures ply properties.
pub fn calculate(input: &PlyInput) -> AnalysisResult<PlyProperties> {
    input.validate()?;
    let (vf, vm) = (input.fibre_fraction, input.matrix_fraction);

    let longitudinal = composite::longitudinal_modulus(vf, input.fibre_modulus, vm, input.matrix_modulus);
    let transverse = composite::transverse_modulus(vf, input.fibre_modulus, vm, input.matrix_modulus);
    let mut equations = vec![Equation::LongitudinalModulus, Equation::TransverseModulus];

    let shear = match (input.fibre_shear_modulus, input.matrix_shear_modulus) {
        (Some(gf), Some(gm)) => {
            equations.push(Equation::InPlaneShearModulus);
            Some(composite::inplane_shear_modulus(vf, gf, vm, gm))
        }
        _ => None,
    };

    log::debug!(
        "ply: E_x = {:.4e} Pa, E_y = {:.4e} Pa, G_xy = {:?}",
        longitudinal,
        transverse,
        shear
    );

    Ok(PlyProperties {
        longitudinal_modulus: longitudinal,
        transverse_modulus: transverse,
        shear_modulus: shear,
        equations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_glass_epoxy_ply() {
        let ply = calculate(&PlyInput::new(200.0e9, 5.0e9, 0.2, 0.8)).unwrap();
        assert_relative_eq!(ply.longitudinal_modulus, 44.0e9, max_relative = 1e-12);
        assert_relative_eq!(ply.transverse_modulus, 1.0 / (0.2 / 200.0e9 + 0.8 / 5.0e9), max_relative = 1e-12);
        assert!(ply.shear_modulus.is_none());
        assert_eq!(ply.equations.len(), 2);
    }

    #[test]
    fn test_shear_modulus_when_given() {
        let input = PlyInput::new(230.0e9, 3.5e9, 0.6, 0.4).with_shear_moduli(15.0e9, 1.3e9);
        let ply = calculate(&input).unwrap();
        let g = ply.shear_modulus.unwrap();
        assert_relative_eq!(g, 1.0 / (0.6 / 15.0e9 + 0.4 / 1.3e9), max_relative = 1e-12);
        assert!(ply.equations.contains(&Equation::InPlaneShearModulus));
    }

    #[test]
    fn test_fractions_must_sum_to_one() {
        let err = calculate(&PlyInput::new(200.0e9, 5.0e9, 0.3, 0.8)).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        // Within tolerance is accepted
        assert!(calculate(&PlyInput::new(200.0e9, 5.0e9, 0.2 + 5e-7, 0.8)).is_ok());
    }

    #[test]
    fn test_fraction_out_of_range() {
        let err = calculate(&PlyInput::new(200.0e9, 5.0e9, 1.2, -0.2)).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidInput { ref field, .. } if field == "fibre_fraction"));
    }

    #[test]
    fn test_non_positive_modulus() {
        assert!(calculate(&PlyInput::new(0.0, 5.0e9, 0.2, 0.8)).is_err());
        assert!(calculate(&PlyInput::new(f64::NAN, 5.0e9, 0.2, 0.8)).is_err());
    }
}
