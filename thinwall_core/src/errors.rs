//! # Error Types
//!
//! Structured error types for thinwall_core. Every failure is raised by the
//! operation that detects it, carries enough context for a caller to display
//! it, and serializes to JSON alongside normal results.
//!
//! ## Example
//!
//! ```rust
//! use thinwall_core::errors::{AnalysisError, AnalysisResult};
//!
//! fn validate_thickness(segment: usize, thickness: f64) -> AnalysisResult<()> {
//!     if thickness <= 0.0 {
//!         return Err(AnalysisError::zero_rigidity(segment, "thickness", thickness));
//!     }
//!     Ok(())
//! }
//!
//! let err = validate_thickness(2, 0.0).unwrap_err();
//! assert_eq!(err.error_code(), "ZERO_RIGIDITY");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for thinwall_core operations
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Structured error type for section analysis operations.
///
/// None of these are retryable: the computations are deterministic, so the
/// same input always fails the same way.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum AnalysisError {
    /// Segment endpoints do not chain into a single polyline or loop
    #[error("Malformed topology at segment {segment}: {reason}")]
    MalformedTopology { segment: usize, reason: String },

    /// Section cannot carry bending (no segments, or D = EI_yy·EI_zz − EI_yz² ≤ 0)
    #[error("Degenerate section: {reason}")]
    DegenerateSection { reason: String },

    /// Closed cell whose enclosed area is (near) zero
    #[error("Degenerate geometry: {reason}")]
    DegenerateGeometry { reason: String },

    /// A segment has zero (or negative) thickness or modulus
    #[error("Zero rigidity on segment {segment}: {property} = {value}")]
    ZeroRigidity {
        segment: usize,
        property: String,
        value: f64,
    },

    /// An input value is invalid (non-finite, out of range, wrong shape)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Material not found in the built-in table
    #[error("Material not found: {material_name}")]
    MaterialNotFound { material_name: String },

    /// A named section point was referenced but never defined
    #[error("Unknown section point: {name}")]
    UnknownPoint { name: String },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },
}

impl AnalysisError {
    /// Create a MalformedTopology error
    pub fn malformed_topology(segment: usize, reason: impl Into<String>) -> Self {
        AnalysisError::MalformedTopology {
            segment,
            reason: reason.into(),
        }
    }

    /// Create a DegenerateSection error
    pub fn degenerate_section(reason: impl Into<String>) -> Self {
        AnalysisError::DegenerateSection {
            reason: reason.into(),
        }
    }

    /// Create a DegenerateGeometry error
    pub fn degenerate_geometry(reason: impl Into<String>) -> Self {
        AnalysisError::DegenerateGeometry {
            reason: reason.into(),
        }
    }

    /// Create a ZeroRigidity error
    pub fn zero_rigidity(segment: usize, property: impl Into<String>, value: f64) -> Self {
        AnalysisError::ZeroRigidity {
            segment,
            property: property.into(),
            value,
        }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        AnalysisError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MaterialNotFound error
    pub fn material_not_found(material_name: impl Into<String>) -> Self {
        AnalysisError::MaterialNotFound {
            material_name: material_name.into(),
        }
    }

    /// Create an UnknownPoint error
    pub fn unknown_point(name: impl Into<String>) -> Self {
        AnalysisError::UnknownPoint { name: name.into() }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        AnalysisError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Reject NaN and infinities for a named field
    pub fn require_finite(field: &str, value: f64) -> AnalysisResult<f64> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(AnalysisError::invalid_input(field, value.to_string(), "Value must be finite"))
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            AnalysisError::MalformedTopology { .. } => "MALFORMED_TOPOLOGY",
            AnalysisError::DegenerateSection { .. } => "DEGENERATE_SECTION",
            AnalysisError::DegenerateGeometry { .. } => "DEGENERATE_GEOMETRY",
            AnalysisError::ZeroRigidity { .. } => "ZERO_RIGIDITY",
            AnalysisError::InvalidInput { .. } => "INVALID_INPUT",
            AnalysisError::MaterialNotFound { .. } => "MATERIAL_NOT_FOUND",
            AnalysisError::UnknownPoint { .. } => "UNKNOWN_POINT",
            AnalysisError::SerializationError { .. } => "SERIALIZATION_ERROR",
            AnalysisError::FileError { .. } => "FILE_ERROR",
        }
    }
}

impl From<serde_json::Error> for AnalysisError {
    fn from(err: serde_json::Error) -> Self {
        AnalysisError::SerializationError {
            reason: err.to_string(),
        }
    }
}
