//! Whole-job view of a parameter file.
//!
//! Workers re-read the file themselves (each builds a private model stack);
//! this module only offers the one-shot load used to validate a file and to
//! fail fast before any parallel work starts.

use std::path::Path;

use frix_core::config::{ConfigError, CoreSections};
use frix_core::{Friction, GreensTensor, Polarizability, SweepDescriptor};
use frix_materials::config::MaterialSections;

/// A fully constructed model stack plus the sweep description.
pub struct JobFile {
    pub sweep: SweepDescriptor,
    pub friction: Friction,
    pub greens: GreensTensor,
    pub polarizability: Polarizability,
}

impl JobFile {
    /// Load and construct everything the run needs. Any missing section,
    /// missing key or unknown type name surfaces here, before workers
    /// start.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let core = CoreSections::from_file(path)?;
        let materials = MaterialSections::from_file(path)?;
        Ok(Self {
            sweep: SweepDescriptor::from_sections(&core)?,
            friction: Friction::from_sections(&core)?,
            greens: GreensTensor::from_sections(&core, &materials)?,
            polarizability: Polarizability::from_sections(&core, &materials)?,
        })
    }
}
