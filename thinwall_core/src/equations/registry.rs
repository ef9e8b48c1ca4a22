//! # Equation Registry
//!
//! Central registry of every formula the section analyzer evaluates.
//! Each equation has metadata including a reference, formulas, and variable definitions.
//!
//! ## Architecture
//!
//! The registry provides:
//! - Type-safe equation identification via the `Equation` enum
//! - Full metadata for reports and audit trails
//! - Serialization support for JSON export
//!
//! Every solver result carries the `Equation` it was computed with; callers
//! look up the metadata when they need to display or cite the formula.
//!
//! ## Usage
//!
//! ```rust
//! use thinwall_core::equations::registry::{Equation, EquationTracker};
//!
//! // Track equation usage during an analysis
//! let mut tracker = EquationTracker::new();
//! tracker.record(Equation::ClosedSectionTorsionalRigidity, "box torsion");
//!
//! let meta = Equation::ClosedSectionTorsionalRigidity.metadata();
//! println!("Formula: {}", meta.formula_plain);
//! ```

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

// ============================================================================
// References
// ============================================================================

/// Theoretical source of an equation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Reference {
    /// Thin-walled beam theory (modulus-weighted, straight segments)
    ThinWalledBeamTheory { topic: &'static str },
    /// Bredt–Batho theory of closed single-cell sections
    BredtBatho,
    /// Saint-Venant torsion of thin open strips
    SaintVenant,
    /// Micromechanics rule of mixtures
    RuleOfMixtures { bound: &'static str },
    /// Fundamental mechanics (no specific reference needed)
    Mechanics,
}

impl Reference {
    /// Format the reference for display in reports
    pub fn citation(&self) -> String {
        match self {
            Reference::ThinWalledBeamTheory { topic } => format!("Thin-walled beam theory, {}", topic),
            Reference::BredtBatho => "Bredt–Batho closed-cell torsion".to_string(),
            Reference::SaintVenant => "Saint-Venant torsion of thin strips".to_string(),
            Reference::RuleOfMixtures { bound } => format!("Rule of mixtures ({} bound)", bound),
            Reference::Mechanics => "Fundamental Mechanics".to_string(),
        }
    }

    /// Short form for inline references
    pub fn short_form(&self) -> &'static str {
        match self {
            Reference::ThinWalledBeamTheory { .. } => "Thin-walled",
            Reference::BredtBatho => "Bredt–Batho",
            Reference::SaintVenant => "Saint-Venant",
            Reference::RuleOfMixtures { .. } => "RoM",
            Reference::Mechanics => "Mechanics",
        }
    }
}

// ============================================================================
// Equation Categories
// ============================================================================

/// Categories for organizing equations in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquationCategory {
    /// Modulus-weighted section properties (EA, EI, centroid)
    SectionProperties,
    /// Direct and shear stresses
    Stresses,
    /// Shear flow distribution and shear centre
    ShearFlow,
    /// Torsional rigidity and twist
    Torsion,
    /// Out-of-plane warping displacement
    Warping,
    /// Ply properties from fibre and matrix
    Micromechanics,
    /// Deformations of members
    Deformations,
}

impl EquationCategory {
    /// Display name for the category
    pub fn display_name(&self) -> &'static str {
        match self {
            EquationCategory::SectionProperties => "Section Properties",
            EquationCategory::Stresses => "Stresses",
            EquationCategory::ShearFlow => "Shear Flow",
            EquationCategory::Torsion => "Torsion",
            EquationCategory::Warping => "Warping",
            EquationCategory::Micromechanics => "Micromechanics",
            EquationCategory::Deformations => "Deformations",
        }
    }

    /// Sort order in reports (lower = earlier)
    pub fn sort_order(&self) -> u8 {
        match self {
            EquationCategory::Micromechanics => 1,
            EquationCategory::SectionProperties => 2,
            EquationCategory::ShearFlow => 3,
            EquationCategory::Torsion => 4,
            EquationCategory::Warping => 5,
            EquationCategory::Stresses => 6,
            EquationCategory::Deformations => 7,
        }
    }
}

// ============================================================================
// Variable Definition
// ============================================================================

/// Definition of a variable used in an equation.
#[derive(Debug, Clone)]
pub struct Variable {
    /// Symbol (e.g., "q", "GJ", "θ'")
    pub symbol: &'static str,
    /// Description
    pub description: &'static str,
    /// SI units
    pub units: &'static str,
}

impl Variable {
    pub const fn new(symbol: &'static str, description: &'static str, units: &'static str) -> Self {
        Self { symbol, description, units }
    }
}

// ============================================================================
// Equation Metadata
// ============================================================================

/// Complete metadata for an equation.
#[derive(Debug, Clone)]
pub struct EquationMetadata {
    /// Human-readable name
    pub name: &'static str,
    /// Brief description of what this equation calculates
    pub description: &'static str,
    /// The formula in LaTeX math notation
    pub formula_latex: &'static str,
    /// The formula in plain text for markdown and terminals
    pub formula_plain: &'static str,
    /// Theoretical reference
    pub reference: Reference,
    /// Variable definitions
    pub variables: Vec<Variable>,
    /// Assumptions or limitations
    pub assumptions: Vec<&'static str>,
    /// Category for grouping
    pub category: EquationCategory,
    /// Source module where the equation implementation lives
    pub source_module: &'static str,
    /// Function name implementing the equation
    pub source_function: &'static str,
}

// ============================================================================
// Equation Enum
// ============================================================================

/// All equations used by Thinwall.
///
/// This is the "symbolic formula identifier" attached to every result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Equation {
    // -------------------------------------------------------------------------
    // Section properties
    // -------------------------------------------------------------------------
    /// EA = Σ E t L
    AxialStiffness,
    /// centroid = Σ E t L c / EA
    ModulusWeightedCentroid,
    /// EI_yy = ∫E t z² ds, EI_zz = ∫E t y² ds, EI_yz = ∫E t y z ds
    BendingStiffness,
    /// D = EI_yy EI_zz − EI_yz²
    StiffnessDeterminant,

    // -------------------------------------------------------------------------
    // Stresses
    // -------------------------------------------------------------------------
    /// σ = E[(EI_zz M_y + EI_yz M_z) z − (EI_yz M_y + EI_yy M_z) y]/D
    BendingStress,
    /// τ = q/t
    ClosedWallShearStress,
    /// τ = G t θ'
    OpenWallShearStress,
    /// σ = F/A
    AxialStress,

    // -------------------------------------------------------------------------
    // Shear flow
    // -------------------------------------------------------------------------
    /// q_o(s) from modulus-weighted first moments
    OpenShearFlow,
    /// q0 = −∮ p q_o ds / 2A
    ClosingShearFlow,
    /// Moment equivalence of the shear flow
    ShearCenter,

    // -------------------------------------------------------------------------
    // Torsion
    // -------------------------------------------------------------------------
    /// q = T/2A
    BredtShearFlow,
    /// GJ = Σ G l t³/3
    OpenSectionTorsionalRigidity,
    /// GJ = 4A²/∮ ds/(G t)
    ClosedSectionTorsionalRigidity,
    /// θ' = T/GJ
    TwistRate,

    // -------------------------------------------------------------------------
    // Warping
    // -------------------------------------------------------------------------
    /// u = −θ'(2A_R + n r_t)
    OpenSectionWarping,
    /// u = −2 A_eff θ'
    ClosedSectionWarping,

    // -------------------------------------------------------------------------
    // Micromechanics and bars
    // -------------------------------------------------------------------------
    /// E_x = v_f E_f + v_m E_m
    LongitudinalModulus,
    /// E_y = (v_f/E_f + v_m/E_m)⁻¹
    TransverseModulus,
    /// G_xy = (v_f/G_f + v_m/G_m)⁻¹
    InPlaneShearModulus,
    /// ΔL = σ L / E
    AxialElongation,
}

impl Equation {
    /// Get the full metadata for this equation
    pub fn metadata(&self) -> EquationMetadata {
        match self {
            // Section properties
            Equation::AxialStiffness => EquationMetadata {
                name: "Modulus-Weighted Axial Stiffness",
                description: "Axial stiffness of a section whose walls carry different moduli",
                formula_latex: r#"EA = \sum_i E_i t_i L_i"#,
                formula_plain: "EA = sum(E_i * t_i * L_i)",
                reference: Reference::ThinWalledBeamTheory { topic: "section properties" },
                variables: vec![
                    Variable::new("EA", "Axial stiffness", "N"),
                    Variable::new("E_i", "Segment modulus", "Pa"),
                    Variable::new("t_i", "Segment thickness", "m"),
                    Variable::new("L_i", "Segment length", "m"),
                ],
                assumptions: vec!["Thin walls (t << L)", "Straight segments"],
                category: EquationCategory::SectionProperties,
                source_module: "calculations/stiffness.rs",
                source_function: "compute_stiffness",
            },

            Equation::ModulusWeightedCentroid => EquationMetadata {
                name: "Modulus-Weighted Centroid",
                description: "Point through which an axial force produces no bending",
                formula_latex: r#"\bar{y} = \frac{\sum E_i t_i L_i y_i}{EA},\ \bar{z} = \frac{\sum E_i t_i L_i z_i}{EA}"#,
                formula_plain: "y_c = sum(E t L y_mid)/EA, z_c = sum(E t L z_mid)/EA",
                reference: Reference::ThinWalledBeamTheory { topic: "section properties" },
                variables: vec![
                    Variable::new("y_c, z_c", "Centroid coordinates", "m"),
                    Variable::new("y_mid, z_mid", "Segment midpoint coordinates", "m"),
                    Variable::new("EA", "Axial stiffness", "N"),
                ],
                assumptions: vec!["Linear elastic walls"],
                category: EquationCategory::SectionProperties,
                source_module: "calculations/stiffness.rs",
                source_function: "compute_stiffness",
            },

            Equation::BendingStiffness => EquationMetadata {
                name: "Modulus-Weighted Bending Stiffness",
                description: "Bending stiffness tensor integrated exactly over straight segments",
                formula_latex: r#"EI_{yy} = \oint E t z^2\,ds,\ EI_{zz} = \oint E t y^2\,ds,\ EI_{yz} = \oint E t y z\,ds"#,
                formula_plain: "EI_yy = int(E t z^2 ds), EI_zz = int(E t y^2 ds), EI_yz = int(E t y z ds)",
                reference: Reference::ThinWalledBeamTheory { topic: "unsymmetric bending" },
                variables: vec![
                    Variable::new("EI_yy", "Bending stiffness about y", "N·m²"),
                    Variable::new("EI_zz", "Bending stiffness about z", "N·m²"),
                    Variable::new("EI_yz", "Product stiffness", "N·m²"),
                    Variable::new("y, z", "Coordinates relative to the reference axis", "m"),
                ],
                assumptions: vec![
                    "Thin walls: own-axis bending of each wall (t³ terms) neglected",
                    "Each segment integrated with its own E and t",
                ],
                category: EquationCategory::SectionProperties,
                source_module: "equations/thin_wall.rs",
                source_function: "line_second_moments",
            },

            Equation::StiffnessDeterminant => EquationMetadata {
                name: "Stiffness Determinant",
                description: "Determinant of the bending stiffness tensor; must be positive",
                formula_latex: r#"D = EI_{yy} EI_{zz} - EI_{yz}^2"#,
                formula_plain: "D = EI_yy * EI_zz - EI_yz^2",
                reference: Reference::ThinWalledBeamTheory { topic: "unsymmetric bending" },
                variables: vec![
                    Variable::new("D", "Determinant", "N²·m⁴"),
                ],
                assumptions: vec!["D <= 0 means a collinear or degenerate section"],
                category: EquationCategory::SectionProperties,
                source_module: "equations/thin_wall.rs",
                source_function: "stiffness_determinant",
            },

            // Stresses
            Equation::BendingStress => EquationMetadata {
                name: "Composite Bending Stress",
                description: "Direct stress at a wall point under biaxial bending",
                formula_latex: r#"\sigma = \frac{E\left[(EI_{zz} M_y + EI_{yz} M_z) z - (EI_{yz} M_y + EI_{yy} M_z) y\right]}{D}"#,
                formula_plain: "sigma = E[(EI_zz My + EI_yz Mz) z - (EI_yz My + EI_yy Mz) y]/D",
                reference: Reference::ThinWalledBeamTheory { topic: "unsymmetric bending" },
                variables: vec![
                    Variable::new("σ", "Direct stress", "Pa"),
                    Variable::new("E", "Modulus of the wall at the point", "Pa"),
                    Variable::new("M_y, M_z", "Bending moments", "N·m"),
                    Variable::new("y, z", "Coordinates relative to the centroid", "m"),
                ],
                assumptions: vec!["Plane sections remain plane", "Centroidal stiffness tensor"],
                category: EquationCategory::Stresses,
                source_module: "equations/thin_wall.rs",
                source_function: "bending_strain",
            },

            Equation::ClosedWallShearStress => EquationMetadata {
                name: "Closed-Wall Shear Stress",
                description: "Average shear stress across a closed-cell wall",
                formula_latex: r#"\tau = \frac{q}{t}"#,
                formula_plain: "tau = q / t",
                reference: Reference::BredtBatho,
                variables: vec![
                    Variable::new("τ", "Shear stress", "Pa"),
                    Variable::new("q", "Shear flow", "N/m"),
                    Variable::new("t", "Wall thickness", "m"),
                ],
                assumptions: vec!["Shear stress uniform through the thickness"],
                category: EquationCategory::Stresses,
                source_module: "equations/thin_wall.rs",
                source_function: "closed_wall_shear_stress",
            },

            Equation::OpenWallShearStress => EquationMetadata {
                name: "Open-Wall Torsional Shear Stress",
                description: "Maximum shear stress at the faces of a thin open strip",
                formula_latex: r#"\tau_{max} = G t \theta'"#,
                formula_plain: "tau_max = G * t * theta'",
                reference: Reference::SaintVenant,
                variables: vec![
                    Variable::new("τ_max", "Shear stress at the wall faces", "Pa"),
                    Variable::new("G", "Shear modulus of the strip", "Pa"),
                    Variable::new("t", "Strip thickness", "m"),
                    Variable::new("θ'", "Twist rate", "rad/m"),
                ],
                assumptions: vec!["Linear stress through the thickness, zero on the mid-line"],
                category: EquationCategory::Stresses,
                source_module: "equations/thin_wall.rs",
                source_function: "open_wall_max_shear_stress",
            },

            Equation::AxialStress => EquationMetadata {
                name: "Axial Stress",
                description: "Direct stress in a bar under axial force",
                formula_latex: r#"\sigma_{xx} = \frac{F}{A}"#,
                formula_plain: "sigma_xx = F / A",
                reference: Reference::Mechanics,
                variables: vec![
                    Variable::new("F", "Axial force", "N"),
                    Variable::new("A", "Cross-sectional area", "m²"),
                ],
                assumptions: vec!["Homogenized ply, uniform strain"],
                category: EquationCategory::Stresses,
                source_module: "equations/composite.rs",
                source_function: "axial_stress",
            },

            // Shear flow
            Equation::OpenShearFlow => EquationMetadata {
                name: "Open-Section Shear Flow",
                description: "Shear flow integrated from a free edge or cut",
                formula_latex: r#"q_o(s) = \frac{V_z}{D}\left[EI_{zz} Q_z - EI_{yz} Q_y\right] + \frac{V_y}{D}\left[EI_{yy} Q_y - EI_{yz} Q_z\right]"#,
                formula_plain: "q_o = (Vz/D)[EI_zz Qz - EI_yz Qy] + (Vy/D)[EI_yy Qy - EI_yz Qz]",
                reference: Reference::ThinWalledBeamTheory { topic: "shear of open sections" },
                variables: vec![
                    Variable::new("q_o", "Open shear flow", "N/m"),
                    Variable::new("V_y, V_z", "Shear forces", "N"),
                    Variable::new("Q_y", "First moment int(E t y ds) from the start", "N·m"),
                    Variable::new("Q_z", "First moment int(E t z ds) from the start", "N·m"),
                ],
                assumptions: vec!["Zero at the free edge or cut", "Centroidal coordinates"],
                category: EquationCategory::ShearFlow,
                source_module: "equations/thin_wall.rs",
                source_function: "open_shear_flow",
            },

            Equation::ClosingShearFlow => EquationMetadata {
                name: "Closing Shear Flow",
                description: "Uniform redundant flow that restores moment equivalence in a closed cell",
                formula_latex: r#"q_0 = -\frac{\oint p\, q_o\, ds}{2A}"#,
                formula_plain: "q0 = -int(p * q_o ds) / (2A)",
                reference: Reference::ThinWalledBeamTheory { topic: "shear of closed sections" },
                variables: vec![
                    Variable::new("q_0", "Closing flow", "N/m"),
                    Variable::new("p", "Perpendicular distance from the moment centre", "m"),
                    Variable::new("A", "Signed enclosed area", "m²"),
                ],
                assumptions: vec!["Shear force acts through the moment centre"],
                category: EquationCategory::ShearFlow,
                source_module: "equations/thin_wall.rs",
                source_function: "closing_shear_flow",
            },

            Equation::ShearCenter => EquationMetadata {
                name: "Shear Centre",
                description: "Point through which a shear load causes no twist",
                formula_latex: r#"y_{sc} = -\frac{M_{V_z}}{V_z},\ z_{sc} = \frac{M_{V_y}}{V_y}"#,
                formula_plain: "y_sc = -M(q from Vz)/Vz, z_sc = M(q from Vy)/Vy",
                reference: Reference::ThinWalledBeamTheory { topic: "shear centre" },
                variables: vec![
                    Variable::new("y_sc, z_sc", "Shear centre", "m"),
                    Variable::new("M", "Moment of the shear flow about the origin", "N·m"),
                ],
                assumptions: vec!["Closed cells use the twist-free closing flow"],
                category: EquationCategory::ShearFlow,
                source_module: "calculations/shear_flow.rs",
                source_function: "compute_shear_center",
            },

            // Torsion
            Equation::BredtShearFlow => EquationMetadata {
                name: "Bredt–Batho Shear Flow",
                description: "Constant shear flow in a closed cell under pure torque",
                formula_latex: r#"q = \frac{T}{2A}"#,
                formula_plain: "q = T / (2A)",
                reference: Reference::BredtBatho,
                variables: vec![
                    Variable::new("q", "Shear flow", "N/m"),
                    Variable::new("T", "Torque", "N·m"),
                    Variable::new("A", "Enclosed area", "m²"),
                ],
                assumptions: vec!["Single closed cell", "Free warping"],
                category: EquationCategory::Torsion,
                source_module: "equations/thin_wall.rs",
                source_function: "bredt_shear_flow",
            },

            Equation::OpenSectionTorsionalRigidity => EquationMetadata {
                name: "Open-Section Torsional Rigidity",
                description: "Sum of thin-strip Saint-Venant rigidities",
                formula_latex: r#"GJ = \sum_i \frac{1}{3} G_i l_i t_i^3"#,
                formula_plain: "GJ = sum(G_i * l_i * t_i^3 / 3)",
                reference: Reference::SaintVenant,
                variables: vec![
                    Variable::new("GJ", "Torsional rigidity", "N·m²"),
                    Variable::new("G_i", "Strip shear modulus", "Pa"),
                    Variable::new("l_i", "Strip length", "m"),
                    Variable::new("t_i", "Strip thickness", "m"),
                ],
                assumptions: vec!["Slender strips (l/t >> 1)", "Corner effects neglected"],
                category: EquationCategory::Torsion,
                source_module: "equations/thin_wall.rs",
                source_function: "strip_torsional_rigidity",
            },

            Equation::ClosedSectionTorsionalRigidity => EquationMetadata {
                name: "Closed-Section Torsional Rigidity",
                description: "Bredt–Batho rigidity generalized to walls of different G and t",
                formula_latex: r#"GJ = \frac{4A^2}{\oint \frac{ds}{G t}}"#,
                formula_plain: "GJ = 4A^2 / sum(L_i / (G_i t_i))",
                reference: Reference::BredtBatho,
                variables: vec![
                    Variable::new("GJ", "Torsional rigidity", "N·m²"),
                    Variable::new("A", "Enclosed area", "m²"),
                    Variable::new("G", "Wall shear modulus", "Pa"),
                    Variable::new("t", "Wall thickness", "m"),
                ],
                assumptions: vec!["Single closed cell", "Open-strip contribution of the walls neglected"],
                category: EquationCategory::Torsion,
                source_module: "equations/thin_wall.rs",
                source_function: "closed_cell_torsional_rigidity",
            },

            Equation::TwistRate => EquationMetadata {
                name: "Rate of Twist",
                description: "Twist per unit length under a torque",
                formula_latex: r#"\theta' = \frac{T}{GJ}"#,
                formula_plain: "theta' = T / GJ",
                reference: Reference::Mechanics,
                variables: vec![
                    Variable::new("θ'", "Twist rate", "rad/m"),
                    Variable::new("T", "Torque", "N·m"),
                    Variable::new("GJ", "Torsional rigidity", "N·m²"),
                ],
                assumptions: vec!["Uniform torsion"],
                category: EquationCategory::Torsion,
                source_module: "equations/thin_wall.rs",
                source_function: "twist_rate",
            },

            // Warping
            Equation::OpenSectionWarping => EquationMetadata {
                name: "Open-Section Warping",
                description: "Primary sectorial warping plus the through-thickness term",
                formula_latex: r#"u = -\theta'\left(2A_R(s) + n\, r_t(s)\right)"#,
                formula_plain: "u = -theta' * (2 A_R(s) + n * r_t(s))",
                reference: Reference::SaintVenant,
                variables: vec![
                    Variable::new("u", "Axial warping displacement", "m"),
                    Variable::new("A_R", "Area swept from the reference point", "m²"),
                    Variable::new("n", "Through-thickness coordinate", "m"),
                    Variable::new("r_t", "Tangential projection of the radius vector", "m"),
                ],
                assumptions: vec![
                    "Twist about the given centre",
                    "Values defined up to a constant set by the reference point",
                ],
                category: EquationCategory::Warping,
                source_module: "calculations/warping.rs",
                source_function: "compute_warping",
            },

            Equation::ClosedSectionWarping => EquationMetadata {
                name: "Closed-Section Warping",
                description: "Swept area corrected by the Bredt shear-strain term",
                formula_latex: r#"u = -2\theta'\left(A_R(s) - A\frac{\int_0^s \frac{ds}{Gt}}{\oint \frac{ds}{Gt}}\right)"#,
                formula_plain: "u = -2 theta' (A_R(s) - A * int(ds/Gt)/loop(ds/Gt))",
                reference: Reference::BredtBatho,
                variables: vec![
                    Variable::new("u", "Axial warping displacement", "m"),
                    Variable::new("A_R", "Area swept from the reference point", "m²"),
                    Variable::new("A", "Enclosed area", "m²"),
                ],
                assumptions: vec![
                    "Single closed cell",
                    "Values defined up to a constant set by the reference point",
                ],
                category: EquationCategory::Warping,
                source_module: "equations/thin_wall.rs",
                source_function: "sectorial_warping",
            },

            // Micromechanics
            Equation::LongitudinalModulus => EquationMetadata {
                name: "Longitudinal Ply Modulus",
                description: "Fibre-direction modulus of a unidirectional ply",
                formula_latex: r#"E_x = v_f E_f + v_m E_m"#,
                formula_plain: "E_x = v_f E_f + v_m E_m",
                reference: Reference::RuleOfMixtures { bound: "Voigt" },
                variables: vec![
                    Variable::new("v_f, v_m", "Fibre and matrix volume fractions", "-"),
                    Variable::new("E_f, E_m", "Fibre and matrix moduli", "Pa"),
                ],
                assumptions: vec!["Iso-strain", "Perfect bonding"],
                category: EquationCategory::Micromechanics,
                source_module: "equations/composite.rs",
                source_function: "longitudinal_modulus",
            },

            Equation::TransverseModulus => EquationMetadata {
                name: "Transverse Ply Modulus",
                description: "Modulus normal to the fibres",
                formula_latex: r#"E_y = \left(\frac{v_f}{E_f} + \frac{v_m}{E_m}\right)^{-1}"#,
                formula_plain: "E_y = 1 / (v_f/E_f + v_m/E_m)",
                reference: Reference::RuleOfMixtures { bound: "Reuss" },
                variables: vec![
                    Variable::new("v_f, v_m", "Fibre and matrix volume fractions", "-"),
                    Variable::new("E_f, E_m", "Fibre and matrix moduli", "Pa"),
                ],
                assumptions: vec!["Iso-stress"],
                category: EquationCategory::Micromechanics,
                source_module: "equations/composite.rs",
                source_function: "transverse_modulus",
            },

            Equation::InPlaneShearModulus => EquationMetadata {
                name: "In-Plane Ply Shear Modulus",
                description: "Shear modulus of a unidirectional ply",
                formula_latex: r#"G_{xy} = \left(\frac{v_f}{G_f} + \frac{v_m}{G_m}\right)^{-1}"#,
                formula_plain: "G_xy = 1 / (v_f/G_f + v_m/G_m)",
                reference: Reference::RuleOfMixtures { bound: "Reuss" },
                variables: vec![
                    Variable::new("G_f, G_m", "Fibre and matrix shear moduli", "Pa"),
                ],
                assumptions: vec!["Iso-stress"],
                category: EquationCategory::Micromechanics,
                source_module: "equations/composite.rs",
                source_function: "inplane_shear_modulus",
            },

            Equation::AxialElongation => EquationMetadata {
                name: "Axial Elongation",
                description: "Change in length of a bar under axial stress",
                formula_latex: r#"\Delta L = \varepsilon_{xx} L = \frac{\sigma_{xx}}{E_x} L"#,
                formula_plain: "dL = (sigma_xx / E_x) * L",
                reference: Reference::Mechanics,
                variables: vec![
                    Variable::new("ΔL", "Elongation", "m"),
                    Variable::new("L", "Bar length", "m"),
                    Variable::new("E_x", "Bar modulus", "Pa"),
                ],
                assumptions: vec!["Linear elastic", "Small strain"],
                category: EquationCategory::Deformations,
                source_module: "equations/composite.rs",
                source_function: "axial_elongation",
            },
        }
    }

    /// Get all equations in a given category
    pub fn in_category(category: EquationCategory) -> Vec<Equation> {
        ALL_EQUATIONS
            .iter()
            .filter(|eq| eq.metadata().category == category)
            .copied()
            .collect()
    }

    /// Get all categories in report order
    pub fn all_categories() -> Vec<EquationCategory> {
        use EquationCategory::*;
        let mut cats = vec![
            SectionProperties,
            Stresses,
            ShearFlow,
            Torsion,
            Warping,
            Micromechanics,
            Deformations,
        ];
        cats.sort_by_key(|c| c.sort_order());
        cats
    }
}

/// All equations in the registry (for iteration)
pub static ALL_EQUATIONS: &[Equation] = &[
    // Section properties
    Equation::AxialStiffness,
    Equation::ModulusWeightedCentroid,
    Equation::BendingStiffness,
    Equation::StiffnessDeterminant,
    // Stresses
    Equation::BendingStress,
    Equation::ClosedWallShearStress,
    Equation::OpenWallShearStress,
    Equation::AxialStress,
    // Shear flow
    Equation::OpenShearFlow,
    Equation::ClosingShearFlow,
    Equation::ShearCenter,
    // Torsion
    Equation::BredtShearFlow,
    Equation::OpenSectionTorsionalRigidity,
    Equation::ClosedSectionTorsionalRigidity,
    Equation::TwistRate,
    // Warping
    Equation::OpenSectionWarping,
    Equation::ClosedSectionWarping,
    // Micromechanics
    Equation::LongitudinalModulus,
    Equation::TransverseModulus,
    Equation::InPlaneShearModulus,
    Equation::AxialElongation,
];

// ============================================================================
// Equation Usage Tracking
// ============================================================================

/// Record of an equation being used in an analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquationUsage {
    /// The equation that was used
    pub equation: Equation,
    /// Context describing where it was used (e.g., "shear flow, cut at segment 0")
    pub context: String,
    /// Optional: the study label this equation was applied to
    pub study_label: Option<String>,
}

impl EquationUsage {
    /// Create a new equation usage record
    pub fn new(equation: Equation, context: impl Into<String>) -> Self {
        Self {
            equation,
            context: context.into(),
            study_label: None,
        }
    }

    /// Create usage record with a study label
    pub fn for_study(equation: Equation, context: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            equation,
            context: context.into(),
            study_label: Some(label.into()),
        }
    }
}

/// Collector for equation usage during an analysis.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EquationTracker {
    usages: Vec<EquationUsage>,
}

impl EquationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that an equation was used
    pub fn record(&mut self, equation: Equation, context: impl Into<String>) {
        self.usages.push(EquationUsage::new(equation, context));
    }

    /// Record equation usage for a named study
    pub fn record_for_study(&mut self, equation: Equation, context: impl Into<String>, label: impl Into<String>) {
        self.usages.push(EquationUsage::for_study(equation, context, label));
    }

    /// Get all recorded usages
    pub fn usages(&self) -> &[EquationUsage] {
        &self.usages
    }

    /// Get unique equations used (deduplicated, first-use order)
    pub fn unique_equations(&self) -> Vec<Equation> {
        let mut seen = HashSet::new();
        self.usages
            .iter()
            .filter(|u| seen.insert(u.equation))
            .map(|u| u.equation)
            .collect()
    }

    /// Group usages by equation
    pub fn by_equation(&self) -> HashMap<Equation, Vec<&EquationUsage>> {
        let mut map: HashMap<Equation, Vec<&EquationUsage>> = HashMap::new();
        for usage in &self.usages {
            map.entry(usage.equation).or_default().push(usage);
        }
        map
    }

    /// Group unique equations by category
    pub fn by_category(&self) -> Vec<(EquationCategory, Vec<Equation>)> {
        let mut by_cat: HashMap<EquationCategory, Vec<Equation>> = HashMap::new();
        for eq in self.unique_equations() {
            by_cat.entry(eq.metadata().category).or_default().push(eq);
        }

        let mut result: Vec<_> = by_cat.into_iter().collect();
        result.sort_by_key(|(cat, _)| cat.sort_order());
        result
    }

    /// Merge another tracker into this one
    pub fn merge(&mut self, other: EquationTracker) {
        self.usages.extend(other.usages);
    }

    /// Markdown list of the equations used, grouped by category, with the
    /// contexts each was applied in.
    pub fn to_markdown(&self) -> String {
        let mut output = String::from("## Equations Used\n\n");
        if self.usages.is_empty() {
            output.push_str("No equations recorded.\n");
            return output;
        }

        let by_equation = self.by_equation();
        for (category, equations) in self.by_category() {
            output.push_str(&format!("### {}\n\n", category.display_name()));
            for equation in equations {
                let meta = equation.metadata();
                output.push_str(&format!(
                    "- **{}**: `{}` ({})\n",
                    meta.name,
                    meta.formula_plain,
                    meta.reference.citation()
                ));
                if let Some(usages) = by_equation.get(&equation) {
                    for usage in usages {
                        match &usage.study_label {
                            Some(label) => output.push_str(&format!("  - {} [{}]\n", usage.context, label)),
                            None => output.push_str(&format!("  - {}\n", usage.context)),
                        }
                    }
                }
            }
            output.push('\n');
        }
        output
    }
}

// ============================================================================
// Markdown Documentation
// ============================================================================

/// Generate the full equations reference as markdown.
///
/// ```rust
/// let markdown = thinwall_core::equations::registry::generate_equations_markdown();
/// assert!(markdown.contains("Torsion"));
/// ```
pub fn generate_equations_markdown() -> String {
    let mut output = String::with_capacity(24_000);

    output.push_str(
        r#"# Thinwall Equations Reference

> **Auto-generated from source code. Do not edit manually.**
>
> Regenerate with: `cargo run --bin gen-equations`

This document lists every formula used by the Thinwall section analyzer.
Each equation includes its formula, reference, source location, and assumptions.

## Sign Conventions

| Quantity | Positive Direction |
|----------|-------------------|
| Coordinates | y horizontal, z vertical, x along the beam |
| Moment M_y | Tension in +z fibres |
| Moment M_z | Compression in +y fibres |
| Torque T | Counter-clockwise in the (y, z) plane |
| Shear flow q | Along the segment direction (start to end) |
| Enclosed area A | Positive for a counter-clockwise loop |

---

"#,
    );

    let categories = Equation::all_categories();

    for category in &categories {
        let equations = Equation::in_category(*category);
        if equations.is_empty() {
            continue;
        }

        output.push_str(&format!("## {}\n\n", category.display_name()));

        for equation in equations {
            let meta = equation.metadata();

            output.push_str(&format!("### {}\n\n", meta.name));
            output.push_str(&format!("{}\n\n", meta.description));
            output.push_str(&format!("**Formula:** `{}`\n\n", meta.formula_plain));

            if !meta.variables.is_empty() {
                output.push_str("**Variables:**\n\n");
                output.push_str("| Symbol | Description | Units |\n");
                output.push_str("|--------|-------------|-------|\n");
                for var in &meta.variables {
                    output.push_str(&format!("| {} | {} | {} |\n", var.symbol, var.description, var.units));
                }
                output.push('\n');
            }

            output.push_str(&format!("**Reference:** {}\n\n", meta.reference.citation()));
            output.push_str(&format!(
                "**Source:** [`{}`]({})\n\n",
                meta.source_function, meta.source_module
            ));

            if !meta.assumptions.is_empty() {
                output.push_str("**Assumptions:**\n");
                for assumption in &meta.assumptions {
                    output.push_str(&format!("- {}\n", assumption));
                }
                output.push('\n');
            }

            output.push_str("---\n\n");
        }
    }

    output.push_str(&format!(
        "## Statistics\n\n- **Total Equations:** {}\n- **Categories:** {}\n\n",
        ALL_EQUATIONS.len(),
        categories.len()
    ));

    output.push_str(
        r#"## How to Audit

1. Find the equation you want to verify in the sections above
2. Check the **Reference** for the underlying theory
3. Open the **Source** file to view the implementation
4. Run `cargo test` to check the worked cases against their published values
"#,
    );

    output
}

// ============================================================================
// Tests
// ============================================================================
