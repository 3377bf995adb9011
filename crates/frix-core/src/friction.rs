//! Nonequilibrium friction on the moving oscillator.
//!
//! The force is a frequency integral over the assembled transport
//! integrand. Two equivalent-by-theory formulas are supported, selected
//! once per run:
//!
//! - full spectrum:
//!   `f(ω) = 2 Re Tr[ −S(ω)·G_ImagKx(ω) + (1/π)·α_I(ω)·G_ImagKxBose(ω) ]`
//! - non-equilibrium only:
//!   `f(ω) = (2/π) Re Tr[ −J(ω)·G_ImagKx(ω) + α_I(ω)·(G_ImagKxBose − n·G_ImagKx)(ω) ]`
//!
//! The frequency axis is split into four regions handled by different
//! quadrature strategies, in strictly increasing order; every region after
//! the first inherits an absolute-error floor of `1e-2` times the running
//! partial sum, so precision is not wasted refining a subdominant region.

use std::f64::consts::PI;

use num_complex::Complex64;

use crate::config::{ConfigError, CoreSections};
use crate::greens::{EvaluationMode, GreensTensor};
use crate::polarizability::Polarizability;
use crate::power_spectrum::{nonequilibrium_part, power_spectrum, SpectrumMode};
use crate::quadrature;
use crate::tensor;

/// Fraction of the running partial sum used as the absolute floor of the
/// remaining regions.
const FLOOR_FRACTION: f64 = 1e-2;

/// The friction engine: frequency-integration policy plus the spectrum
/// formula used for the whole run.
#[derive(Debug, Clone, Copy)]
pub struct Friction {
    /// Relative-error target of every frequency region.
    pub relerr_omega: f64,
    /// Which transport formula is assembled per frequency.
    pub spectrum: SpectrumMode,
}

impl Friction {
    pub fn new(relerr_omega: f64, spectrum: SpectrumMode) -> Self {
        Self {
            relerr_omega,
            spectrum,
        }
    }

    /// Construct from the `[Friction]` section of a parameter file.
    pub fn from_sections(core: &CoreSections) -> Result<Self, ConfigError> {
        let section = core
            .friction
            .as_ref()
            .ok_or(ConfigError::MissingSection("Friction"))?;
        let spectrum = match section.spectrum.as_deref().unwrap_or("full") {
            "full" => SpectrumMode::Full,
            "noneq" => SpectrumMode::NonEquilibrium,
            other => {
                return Err(ConfigError::UnknownKind {
                    what: "friction spectrum",
                    name: other.to_string(),
                })
            }
        };
        let relerr_omega = section.relerr_omega.ok_or(ConfigError::MissingKey {
            section: "Friction",
            key: "relerr_omega",
        })?;
        Ok(Self::new(relerr_omega, spectrum))
    }

    /// The transport integrand at one frequency.
    pub fn integrand(
        &self,
        omega: f64,
        greens: &GreensTensor,
        polarizability: &Polarizability,
    ) -> f64 {
        let g_kx = greens.integrate_k(omega, EvaluationMode::ImagKx);
        let alpha_i = polarizability.antihermitian(omega, greens);
        let s = power_spectrum(greens, polarizability, omega, self.spectrum);
        match self.spectrum {
            SpectrumMode::Full => {
                let g_kx_bose = greens.integrate_k(omega, EvaluationMode::ImagKxBose);
                let first = tensor::mul(&s, &g_kx);
                let second = tensor::mul(&alpha_i, &g_kx_bose);
                let combined = tensor::lincomb(
                    Complex64::from(-1.0),
                    &first,
                    Complex64::from(1.0 / PI),
                    &second,
                );
                2.0 * tensor::trace(&combined).re
            }
            SpectrumMode::NonEquilibrium => {
                let g_kx_neq = nonequilibrium_part(greens, omega, true);
                let first = tensor::mul(&s, &g_kx);
                let second = tensor::mul(&alpha_i, &g_kx_neq);
                let combined = tensor::lincomb(
                    Complex64::from(-1.0),
                    &first,
                    Complex64::from(1.0),
                    &second,
                );
                2.0 / PI * tensor::trace(&combined).re
            }
        }
    }

    /// Lower boundary of the region containing the free-oscillator
    /// resonance. Derived from the field's wavevector cutoff, clamped so
    /// the region sequence stays strictly increasing.
    fn omega_cut(greens: &GreensTensor, omega_a: f64) -> f64 {
        (1e-3 * greens.wavevector_cutoff()).min(0.5 * omega_a)
    }

    /// Integrate the transport integrand over all frequencies.
    pub fn calculate(&self, greens: &GreensTensor, polarizability: &Polarizability) -> f64 {
        let omega_a = polarizability.omega_a();
        let wcut = Self::omega_cut(greens, omega_a);
        let f = |omega: f64| self.integrand(omega, greens, polarizability);
        let rel = self.relerr_omega;

        let mut result = quadrature::adaptive(&f, 0.0, wcut, rel, 0.0);
        result += quadrature::robust(
            &f,
            wcut,
            0.999 * omega_a,
            rel,
            result.abs() * FLOOR_FRACTION,
        );
        result += quadrature::robust(
            &f,
            0.999 * omega_a,
            2.0 * omega_a,
            rel,
            result.abs() * FLOOR_FRACTION,
        );
        result += quadrature::tail(&f, 2.0 * omega_a, rel, result.abs() * FLOOR_FRACTION);
        result
    }
}
