//! TOML section definitions for material models.
//!
//! The parameter file is one TOML document with one section per model
//! (`[Permittivity]`, `[MemoryKernel]`, ...). Each section carries a `type`
//! key naming the variant plus that variant's numeric parameters. Sections
//! irrelevant to the caller are ignored, so a single file can configure the
//! whole stack.

use std::path::Path;

use serde::Deserialize;

use crate::MaterialError;

/// The material-related sections of a parameter file.
#[derive(Debug, Default, Deserialize)]
pub struct MaterialSections {
    #[serde(rename = "Permittivity")]
    pub permittivity: Option<PermittivitySection>,
    #[serde(rename = "MemoryKernel")]
    pub memory_kernel: Option<MemoryKernelSection>,
}

/// `[Permittivity]` section. Which keys are required depends on `type`.
#[derive(Debug, Deserialize)]
pub struct PermittivitySection {
    #[serde(rename = "type")]
    pub kind: String,
    /// Damping rate (drude).
    pub gamma: Option<f64>,
    /// Plasma frequency (drude).
    pub omega_p: Option<f64>,
    /// Background permittivity (lorentz).
    pub eps_inf: Option<f64>,
    /// Oscillator strength (lorentz).
    pub alpha_zero: Option<f64>,
    /// Resonance frequency (lorentz).
    pub omega_0: Option<f64>,
}

/// `[MemoryKernel]` section.
#[derive(Debug, Deserialize)]
pub struct MemoryKernelSection {
    #[serde(rename = "type")]
    pub kind: String,
    /// Damping coefficient (ohmic).
    pub gamma: Option<f64>,
}

impl MaterialSections {
    /// Load the material sections of a TOML parameter file.
    pub fn from_file(path: &Path) -> Result<Self, MaterialError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }
}

/// Pull a required key out of a section, with a section-qualified error.
pub(crate) fn require(
    value: Option<f64>,
    section: &'static str,
    key: &'static str,
) -> Result<f64, MaterialError> {
    value.ok_or(MaterialError::MissingKey { section, key })
}
