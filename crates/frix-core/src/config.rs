//! TOML section definitions for the core components, plus the shared
//! configuration error type.
//!
//! The same parameter file feeds every constructor; each reads only its own
//! section(s). Workers in a sweep re-read the file independently, so the
//! sections here must stay cheap to parse.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::sweep::SweepScale;
use frix_materials::MaterialError;

/// Configuration and construction errors of the core components.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Material(#[from] MaterialError),

    #[error("Unknown {what} type: {name:?}")]
    UnknownKind { what: &'static str, name: String },

    #[error("Missing section [{0}] in parameter file")]
    MissingSection(&'static str),

    #[error("Section [{section}] is missing key {key:?}")]
    MissingKey {
        section: &'static str,
        key: &'static str,
    },

    #[error("Invalid sweep: {0}")]
    InvalidSweep(String),

    #[error("Failed to read parameter file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse parameter file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// The core sections of a parameter file.
#[derive(Debug, Default, Deserialize)]
pub struct CoreSections {
    #[serde(rename = "GreensTensor")]
    pub greens_tensor: Option<GreensTensorSection>,
    #[serde(rename = "Polarizability")]
    pub polarizability: Option<PolarizabilitySection>,
    #[serde(rename = "Friction")]
    pub friction: Option<FrictionSection>,
    #[serde(rename = "Looper")]
    pub looper: Option<LooperSection>,
}

impl CoreSections {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }
}

/// `[GreensTensor]` section.
#[derive(Debug, Deserialize)]
pub struct GreensTensorSection {
    #[serde(rename = "type")]
    pub kind: String,
    pub v: Option<f64>,
    pub beta: Option<f64>,
    /// Separation height (plate).
    pub za: Option<f64>,
    /// Dimensionless κ cutoff (plate).
    pub delta_cut: Option<f64>,
    /// Relative-error budget: `[propagating, evanescent]` for the plate, a
    /// single entry for the vacuum field.
    #[serde(default)]
    pub rel_err: Vec<f64>,
}

/// `[Polarizability]` section.
#[derive(Debug, Deserialize)]
pub struct PolarizabilitySection {
    #[serde(rename = "type")]
    pub kind: String,
    pub omega_a: Option<f64>,
    pub alpha_zero: Option<f64>,
}

/// `[Friction]` section.
#[derive(Debug, Deserialize)]
pub struct FrictionSection {
    pub relerr_omega: Option<f64>,
    /// `"full"` (default) or `"noneq"`.
    pub spectrum: Option<String>,
}

/// `[Looper]` section.
#[derive(Debug, Deserialize)]
pub struct LooperSection {
    pub start: f64,
    pub end: f64,
    #[serde(rename = "N")]
    pub steps: usize,
    pub scale: SweepScale,
    /// Name of the computed quantity.
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,
    pub variable: String,
}

fn default_kind() -> String {
    "friction".into()
}
