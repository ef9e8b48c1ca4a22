//! # Study Analysis
//!
//! A study bundles one section with the loads to apply to it. Running a study
//! calls every solver the loads ask for and collects the results, together
//! with a log of the equations applied, into one JSON-serializable report.
//!
//! ## Example
//!
//! ```rust
//! use thinwall_core::calculations::analysis::{analyze_study, StudyInput};
//!
//! let json = r#"{
//!   "label": "Box",
//!   "segments": [
//!     {"start": {"y": 0.1, "z": -0.05}, "end": {"y": 0.1, "z": 0.05}, "thickness": 0.001, "modulus": 35e9, "shear_modulus": 35e9},
//!     {"start": {"y": 0.1, "z": 0.05}, "end": {"y": -0.1, "z": 0.05}, "thickness": 0.002, "modulus": 20e9, "shear_modulus": 20e9},
//!     {"start": {"y": -0.1, "z": 0.05}, "end": {"y": -0.1, "z": -0.05}, "thickness": 0.001, "modulus": 35e9, "shear_modulus": 35e9},
//!     {"start": {"y": -0.1, "z": -0.05}, "end": {"y": 0.1, "z": -0.05}, "thickness": 0.002, "modulus": 20e9, "shear_modulus": 20e9}
//!   ],
//!   "loads": { "torque": 10000.0 }
//! }"#;
//! let study = StudyInput::from_json(json).unwrap();
//! let report = analyze_study(&study).unwrap();
//! assert!((report.torsion.unwrap().rigidity - 101_818.18).abs() < 0.01);
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::calculations::bending::{compute_bending_stress, BendingMoments, BendingStressResult};
use crate::calculations::shear_flow::{compute_shear_center, compute_shear_flow_for, ShearCenter, ShearFlowField, ShearLoad};
use crate::calculations::stiffness::{compute_stiffness, ReferenceAxis, StiffnessTensor};
use crate::calculations::torsion::{compute_torsion, TorsionResult};
use crate::calculations::warping::{compute_warping_with, WarpingOptions, WarpingResult};
use crate::equations::registry::{Equation, EquationTracker};
use crate::errors::{AnalysisError, AnalysisResult};
use crate::section::{NamedPoint, Section, Segment, Topology};
use crate::settings::AnalysisSettings;

/// Loads applied in a study. Every entry is optional.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StudyLoads {
    /// Transverse shear load
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shear: Option<ShearLoad>,

    /// Segment at whose start a closed cell is cut for the open flow
    #[serde(default)]
    pub cut_segment: usize,

    /// Torque (N·m)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub torque: Option<f64>,

    /// Bending moments about the centroid
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moments: Option<BendingMoments>,

    /// Points at which bending stress is reported
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stress_points: Vec<NamedPoint>,

    /// Points at which warping is reported (needs a torque)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warping_points: Vec<NamedPoint>,

    /// Twist centre and zero-warping reference
    #[serde(default)]
    pub warping: WarpingOptions,
}

/// A section plus the loads to analyze it under.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Z-section",
///   "segments": [ { "start": {"y": 0.05, "z": 0.05}, "end": {"y": 0.0, "z": 0.05},
///                   "thickness": 0.002, "modulus": 50e9, "shear_modulus": 19e9 } ],
///   "settings": { "samples_per_segment": 21 },
///   "reference_axis": { "kind": "Centroid" },
///   "loads": { "moments": { "m_y": 1000.0 },
///              "stress_points": [ { "name": "tip", "point": { "segment": 0, "s": 0.0 } } ] }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyInput {
    /// User label for the study
    pub label: String,

    /// Wall segments, in chain order
    pub segments: Vec<Segment>,

    /// Tolerances and sampling
    #[serde(default)]
    pub settings: AnalysisSettings,

    /// Axis the reported stiffness tensor is taken about
    #[serde(default)]
    pub reference_axis: ReferenceAxis,

    /// Loads to apply
    #[serde(default)]
    pub loads: StudyLoads,
}

impl StudyInput {
    /// Parse a study from JSON.
    pub fn from_json(json: &str) -> AnalysisResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a study file.
    pub fn load(path: &Path) -> AnalysisResult<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| AnalysisError::file_error("read", path.display().to_string(), e.to_string()))?;
        serde_json::from_str(&contents).map_err(|e| AnalysisError::SerializationError {
            reason: format!("Invalid JSON in {}: {}", path.display(), e),
        })
    }
}

/// Everything computed for a study.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyReport {
    /// Label carried from the input
    pub label: String,
    /// Section topology
    pub topology: Topology,
    /// Stiffness about the requested axis; absent when the section has no
    /// bending stiffness and no load needed it
    pub stiffness: Option<StiffnessTensor>,
    /// Shear centre, when the stiffness could be formed
    pub shear_center: Option<ShearCenter>,
    /// Bending stresses, when moments were given
    pub bending: Option<BendingStressResult>,
    /// Shear flow, when a shear load was given
    pub shear_flow: Option<ShearFlowField>,
    /// Torsion, when a torque was given
    pub torsion: Option<TorsionResult>,
    /// Warping, when a torque and warping points were given
    pub warping: Option<WarpingResult>,
    /// Equations applied
    pub equations: EquationTracker,
}

impl StudyReport {
    /// Pretty JSON.
    pub fn to_json(&self) -> AnalysisResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Run every analysis the study's loads call for.
pub fn analyze_study(study: &StudyInput) -> AnalysisResult<StudyReport> {
    let section = Section::with_settings(study.segments.clone(), &study.settings)?;
    let label = study.label.as_str();
    let loads = &study.loads;
    let mut tracker = EquationTracker::new();

    log::debug!("study '{}': {} segments, {:?}", label, section.len(), section.topology());

    // Torsion and warping never need the bending axes, so a torque-only study
    // of a flat strip or collinear chain still runs
    let needs_axes = loads.moments.is_some() || loads.shear.is_some();

    let stiffness = unless_degenerate(compute_stiffness(&section, study.reference_axis), needs_axes, "stiffness")?;
    if let Some(k) = &stiffness {
        tracker.record_for_study(Equation::ModulusWeightedCentroid, "centroid", label);
        tracker.record_for_study(k.equation, format!("stiffness about {:?}", study.reference_axis), label);
        tracker.record_for_study(Equation::StiffnessDeterminant, "stiffness determinant", label);
    }

    // Stress, shear and shear-centre solvers work about the centroid
    let centroidal = match &stiffness {
        Some(k) if k.is_centroidal(section.tolerance()) => Some(k.clone()),
        Some(_) => unless_degenerate(compute_stiffness(&section, ReferenceAxis::Centroid), needs_axes, "centroidal stiffness")?,
        None => None,
    };

    let shear_center = match &centroidal {
        Some(k) => unless_degenerate(compute_shear_center(&section, k), false, "shear centre")?,
        None => None,
    };
    if let Some(centre) = &shear_center {
        tracker.record_for_study(centre.equation, "shear centre", label);
    }

    let bending = match (loads.moments, &centroidal) {
        (Some(moments), Some(k)) => {
            let result = compute_bending_stress(&section, k, moments, &loads.stress_points)?;
            tracker.record_for_study(result.equation, format!("{} stress points", result.stresses.len()), label);
            Some(result)
        }
        _ => None,
    };

    let shear_flow = match (&loads.shear, &centroidal) {
        (Some(load), Some(k)) => {
            let field = compute_shear_flow_for(&section, k, load, loads.cut_segment)?;
            tracker.record_for_study(Equation::OpenShearFlow, "open shear flow", label);
            if field.closing_flow.is_some() {
                tracker.record_for_study(
                    Equation::ClosingShearFlow,
                    format!("closing flow, cut at segment {}", loads.cut_segment),
                    label,
                );
            }
            Some(field)
        }
        _ => None,
    };

    let torsion = match loads.torque {
        Some(torque) => {
            let result = compute_torsion(&section, torque)?;
            tracker.record_for_study(result.equation, "torsional rigidity", label);
            if result.shear_flow.is_some() {
                tracker.record_for_study(Equation::BredtShearFlow, "Bredt shear flow", label);
            }
            tracker.record_for_study(Equation::TwistRate, "rate of twist", label);
            if let Some(wall) = result.wall_stresses.first() {
                tracker.record_for_study(wall.equation, "wall shear stress", label);
            }
            Some(result)
        }
        None => None,
    };

    let warping = match (&torsion, loads.warping_points.is_empty()) {
        (_, true) => None,
        (Some(torsion), false) => {
            let result = compute_warping_with(&section, torsion.twist_rate, &loads.warping_points, &loads.warping)?;
            tracker.record_for_study(result.equation, format!("{} warping points", result.displacements.len()), label);
            Some(result)
        }
        (None, false) => {
            return Err(AnalysisError::invalid_input(
                "warping_points",
                loads.warping_points.len().to_string(),
                "warping needs a torque to set the rate of twist",
            ))
        }
    };

    Ok(StudyReport {
        label: study.label.clone(),
        topology: section.topology(),
        stiffness,
        shear_center,
        bending,
        shear_flow,
        torsion,
        warping,
        equations: tracker,
    })
}

/// Keep a degenerate-section failure as `None` when nothing downstream needs the value.
fn unless_degenerate<T>(result: AnalysisResult<T>, needed: bool, what: &str) -> AnalysisResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err @ (AnalysisError::DegenerateSection { .. } | AnalysisError::DegenerateGeometry { .. })) if !needed => {
            log::warn!("{} skipped: {}", what, err);
            Ok(None)
        }
        Err(err) => Err(err),
    }
}
