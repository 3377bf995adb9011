//! Dressed polarizability of the moving oscillator.
//!
//! The bare oscillator (resonance `omega_a`, static polarizability
//! `alpha_zero`, optionally damped through a bath memory kernel) is dressed
//! by the integrated response field:
//!
//! $\alpha(\omega) = \alpha_0\omega_a^2\left[(\omega_a^2 - \omega^2 - i\omega\mu(\omega))\,\mathbb{1} - \alpha_0\omega_a^2\,G(\omega)\right]^{-1}$
//!
//! where $G$ is the `Plain`-mode wavevector-integrated Green's tensor. The
//! response field is borrowed per call — a polarizability never stores one,
//! so worker-private model stacks cannot alias.

use std::path::Path;

use num_complex::Complex64;

use frix_materials::config::MaterialSections;
use frix_materials::memory::MemoryKernel;

use crate::config::{ConfigError, CoreSections, PolarizabilitySection};
use crate::greens::{EvaluationMode, GreensTensor};
use crate::tensor::{self, Tensor3x3};

/// Polarizability of the microscopic oscillator.
#[derive(Debug, Clone)]
pub enum Polarizability {
    /// Undamped internal dynamics.
    NoBath { omega_a: f64, alpha_zero: f64 },
    /// Internal dynamics damped by a bath through a memory kernel.
    Bath {
        omega_a: f64,
        alpha_zero: f64,
        kernel: MemoryKernel,
    },
}

impl Polarizability {
    pub fn no_bath(omega_a: f64, alpha_zero: f64) -> Self {
        Self::NoBath {
            omega_a,
            alpha_zero,
        }
    }

    pub fn bath(omega_a: f64, alpha_zero: f64, kernel: MemoryKernel) -> Self {
        Self::Bath {
            omega_a,
            alpha_zero,
            kernel,
        }
    }

    pub fn omega_a(&self) -> f64 {
        match self {
            Self::NoBath { omega_a, .. } | Self::Bath { omega_a, .. } => *omega_a,
        }
    }

    pub fn alpha_zero(&self) -> f64 {
        match self {
            Self::NoBath { alpha_zero, .. } | Self::Bath { alpha_zero, .. } => *alpha_zero,
        }
    }

    /// The full complex polarizability tensor at `ω`.
    pub fn tensor(&self, omega: f64, greens: &GreensTensor) -> Tensor3x3 {
        let oa2 = self.omega_a() * self.omega_a();
        let strength = self.alpha_zero() * oa2;
        let mut diag = Complex64::from(oa2 - omega * omega);
        if let Self::Bath { kernel, .. } = self {
            diag -= Complex64::new(0.0, omega) * kernel.mu(omega);
        }
        let g = greens.integrate_k(omega, EvaluationMode::Plain);
        let mut m = tensor::zero();
        for i in 0..3 {
            for j in 0..3 {
                let d = if i == j { diag } else { Complex64::from(0.0) };
                m[i][j] = d - strength * g[i][j];
            }
        }
        tensor::scale(Complex64::from(strength), &tensor::inverse(&m))
    }

    /// Anti-Hermitian (dissipative) part `(α − α†)/2i`.
    pub fn antihermitian(&self, omega: f64, greens: &GreensTensor) -> Tensor3x3 {
        tensor::antihermitian_part(&self.tensor(omega, greens))
    }

    /// Construct from a parsed `[Polarizability]` section; the `bath`
    /// variant additionally reads the `[MemoryKernel]` section.
    pub fn from_sections(
        core: &CoreSections,
        materials: &MaterialSections,
    ) -> Result<Self, ConfigError> {
        let section: &PolarizabilitySection = core
            .polarizability
            .as_ref()
            .ok_or(ConfigError::MissingSection("Polarizability"))?;
        let require = |value: Option<f64>, key: &'static str| {
            value.ok_or(ConfigError::MissingKey {
                section: "Polarizability",
                key,
            })
        };
        let omega_a = require(section.omega_a, "omega_a")?;
        let alpha_zero = require(section.alpha_zero, "alpha_zero")?;
        match section.kind.as_str() {
            "nobath" => Ok(Self::no_bath(omega_a, alpha_zero)),
            "bath" => {
                let kernel_section = materials
                    .memory_kernel
                    .as_ref()
                    .ok_or(ConfigError::MissingSection("MemoryKernel"))?;
                Ok(Self::bath(
                    omega_a,
                    alpha_zero,
                    MemoryKernel::from_section(kernel_section)?,
                ))
            }
            other => Err(ConfigError::UnknownKind {
                what: "polarizability",
                name: other.to_string(),
            }),
        }
    }

    /// Construct from a parameter file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let core = CoreSections::from_file(path)?;
        let materials = MaterialSections::from_file(path)?;
        Self::from_sections(&core, &materials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::greens::VacuumGreensTensor;
    use crate::types::PhysicalParameters;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn vacuum() -> GreensTensor {
        GreensTensor::Vacuum(VacuumGreensTensor::new(
            PhysicalParameters::new(0.1, 0.0, 3.0),
            1e-10,
        ))
    }

    #[test]
    fn polarizability_obeys_crossing_relation() {
        let pol = Polarizability::no_bath(1.3, 6e-9);
        let g = vacuum();
        for &w in &[0.4, 0.7, 1.29, 2.6] {
            let plus = pol.tensor(w, &g);
            let minus = pol.tensor(-w, &g);
            for i in 0..3 {
                for j in 0..3 {
                    let expect = plus[i][j].conj();
                    assert_relative_eq!(minus[i][j].re, expect.re, max_relative = 1e-10);
                    assert_relative_eq!(minus[i][j].im, expect.im, max_relative = 1e-10);
                }
            }
        }
    }

    #[test]
    fn static_limit_recovers_alpha_zero() {
        // at omega -> 0 the radiative dressing dies out as omega^3
        let pol = Polarizability::no_bath(1.3, 6e-9);
        let alpha = pol.tensor(1e-8, &vacuum());
        for i in 0..3 {
            assert_relative_eq!(alpha[i][i].re, 6e-9, max_relative = 1e-10);
            assert_abs_diff_eq!(alpha[i][i].im, 0.0, epsilon = 1e-20);
        }
    }

    #[test]
    fn dissipative_part_is_positive_on_resonance() {
        let pol = Polarizability::bath(1.3, 6e-9, MemoryKernel::ohmic(0.05));
        let alpha_i = pol.antihermitian(1.3, &vacuum());
        for i in 0..3 {
            assert!(alpha_i[i][i].re > 0.0);
            assert_abs_diff_eq!(alpha_i[i][i].im, 0.0, epsilon = 1e-25);
        }
    }

    #[test]
    fn bath_and_file_construction_agree() {
        let path = std::env::temp_dir().join("frix_polarizability_equiv.toml");
        std::fs::write(
            &path,
            "[Polarizability]\n\
             type = \"bath\"\n\
             omega_a = 1.3\n\
             alpha_zero = 6e-9\n\n\
             [MemoryKernel]\n\
             type = \"ohmic\"\n\
             gamma = 0.05\n",
        )
        .unwrap();
        let from_file = Polarizability::from_file(&path).unwrap();
        let explicit = Polarizability::bath(1.3, 6e-9, MemoryKernel::ohmic(0.05));
        assert_eq!(from_file.omega_a(), explicit.omega_a());
        assert_eq!(from_file.alpha_zero(), explicit.alpha_zero());
        let g = vacuum();
        let a = from_file.tensor(0.8, &g);
        let b = explicit.tensor(0.8, &g);
        assert_eq!(a, b);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn unknown_polarizability_type_is_fatal() {
        let core: CoreSections =
            toml::from_str("[Polarizability]\ntype = \"anharmonic\"\nomega_a = 1.0\nalpha_zero = 1.0\n")
                .unwrap();
        let err = Polarizability::from_sections(&core, &MaterialSections::default()).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownKind { .. }));
    }
}
