//! Bulk permittivity models.
//!
//! Two variants are registered: a local Drude metal and a Lorentz oscillator
//! coupled to a bath through a [`MemoryKernel`]. Both expose the plain
//! $\epsilon(\omega)$ and the product $\epsilon(\omega)\,\omega$; the latter
//! is regular at $\omega = 0$ for the Drude model and is what the reflection
//! coefficients are built from.

use std::path::Path;

use num_complex::Complex64;

use crate::config::{require, MaterialSections, PermittivitySection};
use crate::memory::MemoryKernel;
use crate::MaterialError;

/// A bulk permittivity, evaluated at real frequency.
#[derive(Debug, Clone)]
pub enum Permittivity {
    /// Local Drude metal: $\epsilon(\omega) = 1 - \omega_p^2/(\omega(\omega + i\gamma))$.
    Drude { gamma: f64, omega_p: f64 },
    /// Lorentz oscillator with bath coupling:
    /// $\epsilon(\omega) = \epsilon_\infty - \alpha_0\omega_0^2/(\omega_0^2 - \omega^2 - i\omega\mu(\omega))$.
    Lorentz {
        eps_inf: f64,
        alpha_zero: f64,
        omega_0: f64,
        kernel: MemoryKernel,
    },
}

impl Permittivity {
    pub fn drude(gamma: f64, omega_p: f64) -> Self {
        Self::Drude { gamma, omega_p }
    }

    pub fn lorentz(eps_inf: f64, alpha_zero: f64, omega_0: f64, kernel: MemoryKernel) -> Self {
        Self::Lorentz {
            eps_inf,
            alpha_zero,
            omega_0,
            kernel,
        }
    }

    /// Evaluate $\epsilon(\omega)$. The Drude variant has a pole at
    /// $\omega = 0$; use [`Self::epsilon_omega`] on paths that cross zero.
    pub fn epsilon(&self, omega: f64) -> Complex64 {
        match self {
            Self::Drude { gamma, omega_p } => {
                let denom = omega * Complex64::new(omega, *gamma);
                Complex64::from(1.0) - omega_p * omega_p / denom
            }
            Self::Lorentz {
                eps_inf,
                alpha_zero,
                omega_0,
                kernel,
            } => {
                let o2 = omega_0 * omega_0;
                let denom = Complex64::from(o2 - omega * omega)
                    - Complex64::new(0.0, omega) * kernel.mu(omega);
                Complex64::from(*eps_inf) - alpha_zero * o2 / denom
            }
        }
    }

    /// Evaluate $\epsilon(\omega)\,\omega$, regular at $\omega = 0$ for the
    /// Drude variant.
    pub fn epsilon_omega(&self, omega: f64) -> Complex64 {
        match self {
            Self::Drude { gamma, omega_p } => {
                Complex64::from(omega) - omega_p * omega_p / Complex64::new(omega, *gamma)
            }
            _ => self.epsilon(omega) * omega,
        }
    }

    /// Construct from a parsed `[Permittivity]` section. The `lorentz`
    /// variant additionally needs the file's `[MemoryKernel]` section.
    pub fn from_sections(sections: &MaterialSections) -> Result<Self, MaterialError> {
        let section: &PermittivitySection = sections
            .permittivity
            .as_ref()
            .ok_or(MaterialError::MissingSection("Permittivity"))?;
        match section.kind.as_str() {
            "drude" => Ok(Self::Drude {
                gamma: require(section.gamma, "Permittivity", "gamma")?,
                omega_p: require(section.omega_p, "Permittivity", "omega_p")?,
            }),
            "lorentz" => {
                let kernel_section = sections
                    .memory_kernel
                    .as_ref()
                    .ok_or(MaterialError::MissingSection("MemoryKernel"))?;
                Ok(Self::Lorentz {
                    eps_inf: require(section.eps_inf, "Permittivity", "eps_inf")?,
                    alpha_zero: require(section.alpha_zero, "Permittivity", "alpha_zero")?,
                    omega_0: require(section.omega_0, "Permittivity", "omega_0")?,
                    kernel: MemoryKernel::from_section(kernel_section)?,
                })
            }
            other => Err(MaterialError::UnknownKind {
                what: "permittivity",
                name: other.to_string(),
            }),
        }
    }

    /// Construct from the `[Permittivity]` section of a parameter file.
    pub fn from_file(path: &Path) -> Result<Self, MaterialError> {
        Self::from_sections(&MaterialSections::from_file(path)?)
    }
}
