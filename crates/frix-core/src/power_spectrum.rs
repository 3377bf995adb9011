//! Spectral density (power spectrum) of the dipole fluctuations.
//!
//! Combines the response field and the polarizability into the fluctuation
//! term of the transport integrand:
//!
//! $S(\omega) = \frac{1}{\pi}\,\alpha(\omega)\,G_w(\omega)\,\alpha^\dagger(\omega)$
//!
//! where $G_w$ is the Bose-weighted dissipative tensor for the full
//! spectrum, or its temperature-subtracted combination for the
//! non-equilibrium-only spectrum. `S` is Hermitian in either mode.

use std::f64::consts::PI;

use num_complex::Complex64;

use crate::greens::{bose_weight, EvaluationMode, GreensTensor};
use crate::polarizability::Polarizability;
use crate::tensor::{self, Tensor3x3};

/// Which spectrum a query produces. Mirrors the mutual-exclusion
/// discipline of [`EvaluationMode`]: exactly one per query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpectrumMode {
    /// The full fluctuation spectrum.
    Full,
    /// Only the non-equilibrium part; vanishes identically at `v = 0`.
    NonEquilibrium,
}

/// The temperature-subtracted dissipative tensor
/// `G_ImagBose(ω) − n(ω)·G_Imag(ω)` (with the `k_x` weight when asked).
/// The subtraction removes the local-equilibrium occupation, leaving the
/// motion-induced part.
pub fn nonequilibrium_part(greens: &GreensTensor, omega: f64, kx_weighted: bool) -> Tensor3x3 {
    let (bose_mode, plain_mode) = if kx_weighted {
        (EvaluationMode::ImagKxBose, EvaluationMode::ImagKx)
    } else {
        (EvaluationMode::ImagBose, EvaluationMode::Imag)
    };
    let weighted = greens.integrate_k(omega, bose_mode);
    let bare = greens.integrate_k(omega, plain_mode);
    let n = bose_weight(greens.beta() * omega);
    tensor::lincomb(
        Complex64::from(1.0),
        &weighted,
        Complex64::from(-n),
        &bare,
    )
}

/// Evaluate the spectral density at `ω` in the given mode.
pub fn power_spectrum(
    greens: &GreensTensor,
    polarizability: &Polarizability,
    omega: f64,
    mode: SpectrumMode,
) -> Tensor3x3 {
    let alpha = polarizability.tensor(omega, greens);
    let g_w = match mode {
        SpectrumMode::Full => greens.integrate_k(omega, EvaluationMode::ImagBose),
        SpectrumMode::NonEquilibrium => nonequilibrium_part(greens, omega, false),
    };
    let s = tensor::mul(&tensor::mul(&alpha, &g_w), &tensor::dagger(&alpha));
    tensor::scale(Complex64::from(1.0 / PI), &s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::greens::VacuumGreensTensor;
    use crate::types::PhysicalParameters;
    use approx::assert_abs_diff_eq;

    fn vacuum(v: f64) -> GreensTensor {
        GreensTensor::Vacuum(VacuumGreensTensor::new(
            PhysicalParameters::new(v, 0.0, 3.0),
            1e-10,
        ))
    }

    #[test]
    fn spectrum_is_hermitian() {
        let g = vacuum(0.1);
        let pol = Polarizability::no_bath(1.3, 6e-9);
        for &mode in &[SpectrumMode::Full, SpectrumMode::NonEquilibrium] {
            let s = power_spectrum(&g, &pol, 0.9, mode);
            for i in 0..3 {
                for j in 0..3 {
                    let d = s[i][j] - s[j][i].conj();
                    assert_abs_diff_eq!(d.norm(), 0.0, epsilon = 1e-30);
                }
            }
        }
    }

    #[test]
    fn nonequilibrium_spectrum_vanishes_at_rest() {
        let g = vacuum(0.0);
        let pol = Polarizability::no_bath(1.3, 6e-9);
        let full = power_spectrum(&g, &pol, 0.9, SpectrumMode::Full);
        let neq = power_spectrum(&g, &pol, 0.9, SpectrumMode::NonEquilibrium);
        assert!(full[0][0].re > 0.0);
        assert!(neq[0][0].norm() < 1e-12 * full[0][0].norm());
    }
}
