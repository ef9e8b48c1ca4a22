//! # Section Mechanics Equations
//!
//! Closed-form formulas used by the solvers. Keeping them in one place allows
//! each to be checked against its reference and documented with its sign
//! convention.
//!
//! ## Modules
//!
//! - [`thin_wall`] - Segment integrals, bending, shear flow, torsion and warping formulas
//! - [`composite`] - Rule-of-mixtures ply properties and axial bar response
//! - [`registry`] - Equation metadata and usage tracking
//!
//! ## Sign Conventions
//!
//! - **Coordinates**: y horizontal, z vertical, x along the beam axis
//! - **Moments**: positive M_y stretches +z fibres; positive M_z compresses +y fibres
//! - **Shear flow**: positive along the segment direction (start to end)
//! - **Areas**: enclosed and swept areas positive counter-clockwise

pub mod composite;
pub mod registry;
pub mod thin_wall;

pub use registry::{
    Equation,
    EquationCategory,
    EquationMetadata,
    EquationTracker,
    EquationUsage,
    Reference,
    Variable,
    ALL_EQUATIONS,
    generate_equations_markdown,
};
