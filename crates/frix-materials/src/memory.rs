//! Memory kernels coupling an oscillator to its bath.
//!
//! The kernel enters the equations of motion as the damping term
//! $-i\omega\mu(\omega)$; every variant must satisfy
//! $\mu(-\omega) = \overline{\mu(\omega)}$.

use std::path::Path;

use num_complex::Complex64;

use crate::config::{require, MaterialSections, MemoryKernelSection};
use crate::MaterialError;

/// A bath memory kernel, evaluated as a complex function of frequency.
#[derive(Debug, Clone, PartialEq)]
pub enum MemoryKernel {
    /// Ohmic kernel: constant $\mu(\omega) = \gamma$, i.e. damping linear in
    /// frequency.
    Ohmic { gamma: f64 },
}

impl MemoryKernel {
    pub fn ohmic(gamma: f64) -> Self {
        Self::Ohmic { gamma }
    }

    /// Evaluate $\mu(\omega)$.
    pub fn mu(&self, _omega: f64) -> Complex64 {
        match self {
            Self::Ohmic { gamma } => Complex64::new(*gamma, 0.0),
        }
    }

    /// Construct from a parsed `[MemoryKernel]` section.
    pub fn from_section(section: &MemoryKernelSection) -> Result<Self, MaterialError> {
        match section.kind.as_str() {
            "ohmic" => Ok(Self::Ohmic {
                gamma: require(section.gamma, "MemoryKernel", "gamma")?,
            }),
            other => Err(MaterialError::UnknownKind {
                what: "memory kernel",
                name: other.to_string(),
            }),
        }
    }

    /// Construct from the `[MemoryKernel]` section of a parameter file.
    pub fn from_file(path: &Path) -> Result<Self, MaterialError> {
        let sections = MaterialSections::from_file(path)?;
        let section = sections
            .memory_kernel
            .ok_or(MaterialError::MissingSection("MemoryKernel"))?;
        Self::from_section(&section)
    }
}
