//! # Wall Materials
//!
//! Elastic properties assigned to section walls. A [`WallMaterial`] carries
//! the bending modulus and the shear modulus a segment needs; it can come from
//! the built-in table, from an isotropic modulus and Poisson's ratio, or from
//! a homogenized ply.
//!
//! ## Example
//!
//! ```rust
//! use thinwall_core::materials::find_material;
//!
//! let alu = find_material("Aluminium 2024-T3").unwrap();
//! assert!((alu.modulus - 73.1e9).abs() < 1.0);
//! ```

pub mod micromechanics;

pub use micromechanics::{PlyInput, PlyProperties};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{AnalysisError, AnalysisResult};

/// Elastic properties of one wall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallMaterial {
    /// Display name
    pub name: String,
    /// Young's modulus used for bending (Pa)
    pub modulus: f64,
    /// Shear modulus used for torsion and shear (Pa)
    pub shear_modulus: f64,
}

impl WallMaterial {
    /// Material with explicit moduli.
    pub fn new(name: impl Into<String>, modulus: f64, shear_modulus: f64) -> Self {
        WallMaterial {
            name: name.into(),
            modulus,
            shear_modulus,
        }
    }

    /// Isotropic material, G = E / (2(1 + ν)).
    pub fn isotropic(name: impl Into<String>, modulus: f64, poisson_ratio: f64) -> AnalysisResult<Self> {
        check_poisson(poisson_ratio)?;
        Ok(WallMaterial::new(name, modulus, modulus / (2.0 * (1.0 + poisson_ratio))))
    }

    /// Isotropic material known by its shear modulus, E = 2G(1 + ν).
    pub fn isotropic_from_shear(name: impl Into<String>, shear_modulus: f64, poisson_ratio: f64) -> AnalysisResult<Self> {
        check_poisson(poisson_ratio)?;
        Ok(WallMaterial::new(name, 2.0 * shear_modulus * (1.0 + poisson_ratio), shear_modulus))
    }

    /// Wall laid up from a unidirectional ply with fibres along the beam axis.
    ///
    /// Needs the ply's in-plane shear modulus.
    pub fn from_ply(name: impl Into<String>, ply: &PlyProperties) -> AnalysisResult<Self> {
        let name = name.into();
        let shear = ply.shear_modulus.ok_or_else(|| {
            AnalysisError::invalid_input(
                format!("{}.shear_modulus", name),
                "None",
                "Ply needs fibre and matrix shear moduli to be used as a wall",
            )
        })?;
        Ok(WallMaterial::new(name, ply.longitudinal_modulus, shear))
    }
}

fn check_poisson(nu: f64) -> AnalysisResult<()> {
    AnalysisError::require_finite("poisson_ratio", nu)?;
    if nu <= -1.0 || nu >= 0.5 {
        return Err(AnalysisError::invalid_input(
            "poisson_ratio",
            nu.to_string(),
            "Must lie in (-1, 0.5)",
        ));
    }
    Ok(())
}

/// Built-in wall materials.
static MATERIALS: Lazy<Vec<WallMaterial>> = Lazy::new(|| {
    vec![
        WallMaterial::new("Aluminium 2024-T3", 73.1e9, 28.0e9),
        WallMaterial::new("Aluminium 7075-T6", 71.7e9, 26.9e9),
        WallMaterial::new("Steel", 200.0e9, 77.0e9),
        WallMaterial::new("Titanium Ti-6Al-4V", 113.8e9, 44.0e9),
        WallMaterial::new("Carbon/Epoxy UD", 135.0e9, 5.0e9),
        WallMaterial::new("Glass/Epoxy UD", 40.0e9, 4.0e9),
        WallMaterial::new("Carbon/Epoxy Quasi-Isotropic", 50.0e9, 19.0e9),
        WallMaterial::new("Aramid/Epoxy UD", 76.0e9, 2.1e9),
    ]
});

fn normalize(name: &str) -> String {
    name.to_uppercase().replace([' ', '_', '-', '/'], "")
}

/// Every entry in the built-in table.
pub fn builtin_materials() -> &'static [WallMaterial] {
    &MATERIALS
}

/// Look up a built-in material, ignoring case, spaces, dashes and slashes.
pub fn find_material(name: &str) -> AnalysisResult<WallMaterial> {
    let key = normalize(name);
    MATERIALS
        .iter()
        .find(|m| normalize(&m.name) == key)
        .cloned()
        .ok_or_else(|| AnalysisError::material_not_found(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_find_material_flexible() {
        let m = find_material("carbon-epoxy ud").unwrap();
        assert_eq!(m.name, "Carbon/Epoxy UD");
        assert!(find_material("STEEL").is_ok());
    }

    #[test]
    fn test_unknown_material() {
        let err = find_material("unobtainium").unwrap_err();
        assert_eq!(err.error_code(), "MATERIAL_NOT_FOUND");
    }

    #[test]
    fn test_isotropic_relations() {
        let m = WallMaterial::isotropic("steel", 200.0e9, 0.25).unwrap();
        assert_relative_eq!(m.shear_modulus, 80.0e9, max_relative = 1e-12);
        let m = WallMaterial::isotropic_from_shear("flange", 20.0e9, 0.3).unwrap();
        assert_relative_eq!(m.modulus, 52.0e9, max_relative = 1e-12);
        assert!(WallMaterial::isotropic("bad", 1.0e9, 0.5).is_err());
    }

    #[test]
    fn test_from_ply() {
        let input = PlyInput::new(200.0e9, 5.0e9, 0.2, 0.8).with_shear_moduli(80.0e9, 1.8e9);
        let ply = micromechanics::calculate(&input).unwrap();
        let wall = WallMaterial::from_ply("ply", &ply).unwrap();
        assert_relative_eq!(wall.modulus, 44.0e9, max_relative = 1e-12);

        let no_shear = micromechanics::calculate(&PlyInput::new(200.0e9, 5.0e9, 0.2, 0.8)).unwrap();
        assert!(WallMaterial::from_ply("ply", &no_shear).is_err());
    }

    #[test]
    fn test_builtin_table_is_physical() {
        for m in builtin_materials() {
            assert!(m.modulus > 0.0 && m.shear_modulus > 0.0, "{}", m.name);
        }
    }
}
