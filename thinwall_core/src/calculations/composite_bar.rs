//! # Composite Bar
//!
//! Unidirectional composite bar of rectangular cross-section under axial
//! load, fibres along the bar axis. Ply moduli come from the rule of
//! mixtures; the response is uniform stress, strain and elongation.
//!
//! ## Example
//!
//! ```rust
//! use thinwall_core::calculations::composite_bar::{calculate, CompositeBarInput};
//! use thinwall_core::materials::micromechanics::PlyInput;
//!
//! let input = CompositeBarInput {
//!     label: "Bar".to_string(),
//!     ply: PlyInput::new(200.0e9, 5.0e9, 0.2, 0.8),
//!     force: 100.0e3,
//!     width: 0.08,
//!     height: 0.05,
//!     length: 0.5,
//! };
//! let result = calculate(&input).unwrap();
//! assert!((result.stress - 25.0e6).abs() < 1e-6);
//! ```

use serde::{Deserialize, Serialize};

use crate::equations::composite;
use crate::equations::registry::Equation;
use crate::errors::{AnalysisError, AnalysisResult};
use crate::materials::micromechanics::{self, PlyInput, PlyProperties};

/// Input parameters for an axially loaded composite bar.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Bar",
///   "ply": {
///     "fibre_modulus": 200e9,
///     "matrix_modulus": 5e9,
///     "fibre_fraction": 0.2,
///     "matrix_fraction": 0.8
///   },
///   "force": 100000.0,
///   "width": 0.08,
///   "height": 0.05,
///   "length": 0.5
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeBarInput {
    /// User label for this bar
    pub label: String,

    /// Fibre and matrix constituents
    pub ply: PlyInput,

    /// Axial force (N), tension positive
    pub force: f64,

    /// Cross-section width (m)
    pub width: f64,

    /// Cross-section height (m)
    pub height: f64,

    /// Bar length (m)
    pub length: f64,
}

impl CompositeBarInput {
    /// Validate input parameters.
    pub fn validate(&self) -> AnalysisResult<()> {
        AnalysisError::require_finite("force", self.force)?;
        for (field, value) in [("width", self.width), ("height", self.height), ("length", self.length)] {
            AnalysisError::require_finite(field, value)?;
            if value <= 0.0 {
                return Err(AnalysisError::invalid_input(field, value.to_string(), "Dimension must be positive"));
            }
        }
        self.ply.validate()
    }
}

/// Axial response of the bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeBarResult {
    /// Label carried from the input
    pub label: String,
    /// Homogenized ply moduli
    pub ply: PlyProperties,
    /// Cross-section area (m²)
    pub area: f64,
    /// Axial stress (Pa)
    pub stress: f64,
    /// Axial strain
    pub strain: f64,
    /// Change in length (m)
    pub elongation: f64,
    /// Equations applied, in order
    pub equations: Vec<Equation>,
}

/// Stress, strain and elongation of a composite bar.
pub fn calculate(input: &CompositeBarInput) -> AnalysisResult<CompositeBarResult> {
    input.validate()?;
    let ply = micromechanics::calculate(&input.ply)?;

    let area = input.width * input.height;
    let stress = composite::axial_stress(input.force, area);
    let strain = stress / ply.longitudinal_modulus;
    let elongation = composite::axial_elongation(stress, ply.longitudinal_modulus, input.length);
    log::debug!("bar '{}': σ = {:.4e} Pa, ΔL = {:.4e} m", input.label, stress, elongation);

    let mut equations = ply.equations.clone();
    equations.extend([Equation::AxialStress, Equation::AxialElongation]);

    Ok(CompositeBarResult {
        label: input.label.clone(),
        ply,
        area,
        stress,
        strain,
        elongation,
        equations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn bar() -> CompositeBarInput {
        CompositeBarInput {
            label: "Bar".to_string(),
            ply: PlyInput::new(200.0e9, 5.0e9, 0.2, 0.8),
            force: 100.0e3,
            width: 0.08,
            height: 0.05,
            length: 0.5,
        }
    }

    #[test]
    fn test_bar_response() {
        let result = calculate(&bar()).unwrap();
        assert_relative_eq!(result.ply.longitudinal_modulus, 44.0e9, max_relative = 1e-12);
        assert_relative_eq!(result.area, 0.004, max_relative = 1e-12);
        assert_relative_eq!(result.stress, 25.0e6, max_relative = 1e-12);
        assert_relative_eq!(result.strain, 25.0e6 / 44.0e9, max_relative = 1e-12);
        assert_relative_eq!(result.elongation, 25.0e6 * 0.5 / 44.0e9, max_relative = 1e-12);
        assert_eq!(result.equations.last(), Some(&Equation::AxialElongation));
    }

    #[test]
    fn test_compression_shortens() {
        let mut input = bar();
        input.force = -50.0e3;
        assert!(calculate(&input).unwrap().elongation < 0.0);
    }

    #[test]
    fn test_invalid_dimensions() {
        let mut input = bar();
        input.width = 0.0;
        assert!(calculate(&input).is_err());

        let mut input = bar();
        input.ply.matrix_fraction = 0.7;
        let err = calculate(&input).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_json_input() {
        let json = r#"{
            "label": "Bar",
            "ply": {"fibre_modulus": 200e9, "matrix_modulus": 5e9, "fibre_fraction": 0.2, "matrix_fraction": 0.8},
            "force": 100000.0, "width": 0.08, "height": 0.05, "length": 0.5
        }"#;
        let input: CompositeBarInput = serde_json::from_str(json).unwrap();
        assert_eq!(input, bar());
    }
}
