//! # Analysis Settings
//!
//! Tolerances and sampling options shared by every solver. Settings travel with
//! a study file as plain JSON and fall back to defaults for any missing field.
//!
//! ## Example
//!
//! ```rust
//! use thinwall_core::settings::AnalysisSettings;
//!
//! let settings = AnalysisSettings::from_json(r#"{ "samples_per_segment": 21 }"#).unwrap();
//! assert_eq!(settings.samples_per_segment, 21);
//! assert_eq!(settings.connection_tolerance, 1e-9);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{AnalysisError, AnalysisResult};

/// Global analysis settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Maximum gap (m) between the end of one segment and the start of the next
    pub connection_tolerance: f64,

    /// Enclosed area (m²) below which a closed cell is treated as degenerate
    pub area_tolerance: f64,

    /// Relative tolerance on D = EI_yy·EI_zz − EI_yz², scaled by EI_yy·EI_zz
    pub determinant_tolerance: f64,

    /// Number of shear-flow stations produced per segment (ends included)
    pub samples_per_segment: usize,

    /// Length/thickness ratio below which a strip triggers a slenderness warning
    pub slender_strip_ratio: f64,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        AnalysisSettings {
            connection_tolerance: 1e-9,
            area_tolerance: 1e-12,
            determinant_tolerance: 1e-10,
            samples_per_segment: 11,
            slender_strip_ratio: 10.0,
        }
    }
}

impl AnalysisSettings {
    /// Parse settings from JSON; absent fields keep their defaults.
    pub fn from_json(json: &str) -> AnalysisResult<Self> {
        let settings: AnalysisSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validate the settings.
    pub fn validate(&self) -> AnalysisResult<()> {
        let positive = [
            ("connection_tolerance", self.connection_tolerance),
            ("area_tolerance", self.area_tolerance),
            ("determinant_tolerance", self.determinant_tolerance),
            ("slender_strip_ratio", self.slender_strip_ratio),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(AnalysisError::invalid_input(
                    field,
                    value.to_string(),
                    "Tolerance must be positive and finite",
                ));
            }
        }
        if self.samples_per_segment < 2 {
            return Err(AnalysisError::invalid_input(
                "samples_per_segment",
                self.samples_per_segment.to_string(),
                "At least both segment ends must be sampled",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(AnalysisSettings::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = AnalysisSettings::from_json(r#"{ "area_tolerance": 1e-8 }"#).unwrap();
        assert_eq!(settings.area_tolerance, 1e-8);
        assert_eq!(settings.samples_per_segment, 11);
    }

    #[test]
    fn test_rejects_single_sample() {
        let err = AnalysisSettings::from_json(r#"{ "samples_per_segment": 1 }"#).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_rejects_negative_tolerance() {
        let settings = AnalysisSettings {
            connection_tolerance: -1.0,
            ..AnalysisSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_malformed_json() {
        let err = AnalysisSettings::from_json("{ samples").unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }
}
