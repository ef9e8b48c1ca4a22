//! # thinwall_core - Thin-Walled Composite Section Analysis
//!
//! `thinwall_core` computes the cross-sectional response of thin-walled beams
//! whose walls may each have a different thickness, bending modulus and shear
//! modulus. All inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take a section and loads and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Traceable**: Every result names the equation that produced it
//!
//! ## Quick Start
//!
//! ```rust
//! use thinwall_core::calculations::{compute_stiffness, compute_torsion, ReferenceAxis};
//! use thinwall_core::section::{Section, Segment};
//!
//! // Channel: two 25 mm flanges and a 50 mm web
//! let pts = [(0.025, 0.025), (0.0, 0.025), (0.0, -0.025), (0.025, -0.025)];
//! let segments = (0..3)
//!     .map(|i| Segment::new(pts[i].into(), pts[i + 1].into(), 0.002, 70.0e9, 27.0e9).unwrap())
//!     .collect();
//! let section = Section::new(segments).unwrap();
//!
//! let stiffness = compute_stiffness(&section, ReferenceAxis::Centroid).unwrap();
//! let torsion = compute_torsion(&section, 5.0).unwrap();
//! assert!(stiffness.ei_yy > 0.0);
//! assert!(torsion.twist_rate > 0.0);
//! ```
//!
//! ## Modules
//!
//! - [`section`] - Segments, section topology and points on the wall
//! - [`calculations`] - Stiffness, bending, shear flow, torsion, warping and study solvers
//! - [`equations`] - Closed-form formulas and the equation registry
//! - [`materials`] - Wall materials and rule-of-mixtures ply properties
//! - [`report`] - Labelled report lines for every result
//! - [`worked_cases`] - Textbook examples computed by the engine
//! - [`settings`] - Tolerances and sampling options
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod equations;
pub mod errors;
pub mod materials;
pub mod report;
pub mod section;
pub mod settings;
pub mod units;
pub mod worked_cases;

// Re-export commonly used types at crate root for convenience
pub use errors::{AnalysisError, AnalysisResult};
pub use report::{ReportLine, ToReport};
pub use section::{NamedPoint, Point, Section, SectionPoint, Segment, Topology};
pub use settings::AnalysisSettings;
