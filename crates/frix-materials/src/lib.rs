//! # Frix Materials
//!
//! Material response models for the frix framework. Every model is a closed
//! enum of physical variants with pure evaluation functions of frequency;
//! construction goes either through explicit numeric parameters or through a
//! TOML parameter file with a `type` key dispatched against the variant
//! registry.
//!
//! ## Available models
//!
//! | Model | Variants | Module |
//! |-------|----------|--------|
//! | Memory kernel | `ohmic` | [`memory`] |
//! | Permittivity | `drude`, `lorentz` | [`permittivity`] |
//! | Reflection coefficients | local bulk | [`reflection`] |
//!
//! All permittivities satisfy the crossing relation
//! $\epsilon(-\omega) = \overline{\epsilon(\omega)}$ for real $\omega$; the
//! frequency-domain symmetries of every downstream quantity rest on it.

pub mod config;
pub mod memory;
pub mod permittivity;
pub mod reflection;

use thiserror::Error;

/// Errors from material-model construction.
#[derive(Debug, Error)]
pub enum MaterialError {
    #[error("Unknown {what} type: {name:?}")]
    UnknownKind { what: &'static str, name: String },

    #[error("Missing section [{0}] in parameter file")]
    MissingSection(&'static str),

    #[error("Section [{section}] is missing key {key:?}")]
    MissingKey {
        section: &'static str,
        key: &'static str,
    },

    #[error("Failed to read parameter file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse parameter file: {0}")]
    Parse(#[from] toml::de::Error),
}
