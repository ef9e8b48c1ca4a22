//! # Section Calculations
//!
//! The solvers that run on a validated [`Section`](crate::section::Section).
//! Each one is a pure function returning a JSON-serializable result that
//! carries the [`Equation`](crate::equations::Equation) it applied.
//!
//! ## Available Calculations
//!
//! - [`stiffness`] - Modulus-weighted centroid and bending stiffness tensor
//! - [`bending`] - Direct stress under biaxial bending
//! - [`shear_flow`] - Shear flow and shear centre
//! - [`torsion`] - Torsional rigidity, twist rate and wall shear stress
//! - [`warping`] - Axial warping displacement
//! - [`composite_bar`] - Axially loaded unidirectional composite bar
//! - [`analysis`] - Study driver running all of the above from one input

pub mod analysis;
pub mod bending;
pub mod composite_bar;
pub mod shear_flow;
pub mod stiffness;
pub mod torsion;
pub mod warping;

// Re-export commonly used types
pub use analysis::{analyze_study, StudyInput, StudyLoads, StudyReport};
pub use bending::{compute_bending_stress, BendingMoments, BendingStressResult};
pub use composite_bar::{CompositeBarInput, CompositeBarResult};
pub use shear_flow::{compute_shear_center, compute_shear_flow, compute_shear_flow_for, ShearFlowField, ShearLoad};
pub use stiffness::{compute_stiffness, ReferenceAxis, StiffnessTensor};
pub use torsion::{compute_strip_torsion, compute_torsion, TorsionResult};
pub use warping::{compute_warping, compute_warping_with, WarpingOptions, WarpingResult};
