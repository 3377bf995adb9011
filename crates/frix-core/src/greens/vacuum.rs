//! Free-space (vacuum) Green's tensor.
//!
//! Only the dissipative part is carried: the Hermitian part of the vacuum
//! tensor diverges and is taken as absorbed into the oscillator's resonance
//! frequency. Azimuthal symmetry reduces the wavevector integration to a
//! single integral over `k_x` with the light-cone support
//! `(ω + v k_x)² > k_x²`; the `k_y` integral is analytic.
//!
//! Closed forms of the integrated modes (used as test anchors):
//! `Imag`: diag `(2/3)ω³·(1/(1−v²)², (1+v²)/(1−v²)³, (1+v²)/(1−v²)³)`;
//! `ImagKx`: diag `(2/3)ω⁴v·(1/(1−v²)³, (2+v²)/(1−v²)⁴, (2+v²)/(1−v²)⁴)`.

use num_complex::Complex64;

use crate::greens::{assemble, bose_weight, EvaluationMode, Weight};
use crate::quadrature;
use crate::tensor::{self, Tensor3x3};
use crate::types::PhysicalParameters;

#[derive(Debug, Clone)]
pub struct VacuumGreensTensor {
    pub(crate) params: PhysicalParameters,
    rel_err: f64,
}

impl VacuumGreensTensor {
    pub fn new(params: PhysicalParameters, rel_err: f64) -> Self {
        Self { params, rel_err }
    }

    /// Wavevector-resolved tensor: `i` times the imaginary part, which is
    /// all the vacuum field carries. Support is the interior of the light
    /// cone; outside it the tensor vanishes.
    pub fn tensor(&self, omega: f64, k: [f64; 2]) -> Tensor3x3 {
        let [kx, ky] = k;
        let k2 = kx * kx + ky * ky;
        let mut out = tensor::zero();
        if omega * omega <= k2 {
            return out;
        }
        let kz = (omega * omega - k2).sqrt();
        let pref = omega.signum() * 2.0 * std::f64::consts::PI / kz;
        let i_unit = Complex64::new(0.0, 1.0);
        out[0][0] = i_unit * (pref * (omega * omega - kx * kx));
        out[1][1] = i_unit * (pref * (omega * omega - ky * ky));
        out[2][2] = i_unit * (pref * k2);
        out[0][1] = i_unit * (-pref * kx * ky);
        out[1][0] = out[0][1];
        out
    }

    /// Reduced 1-D integrand over `k_x` for a diagonal element, `k_y`
    /// integrated analytically.
    fn integrand_1d(&self, kx: f64, omega: f64, i: usize, weight: Weight) -> f64 {
        let wp = omega + self.params.v * kx;
        if wp * wp <= kx * kx {
            return 0.0;
        }
        let mut val = if i == 0 {
            0.5 * (wp * wp - kx * kx)
        } else {
            0.25 * (wp * wp + kx * kx)
        };
        val *= wp.signum();
        if weight.kx {
            val *= kx;
        }
        if weight.bose {
            if wp == 0.0 {
                return 0.0;
            }
            val *= bose_weight(self.params.beta * wp);
        }
        val
    }

    /// Light-cone support of the 1-D integrand.
    fn domain(&self, omega: f64) -> (f64, f64) {
        let v = self.params.v;
        if omega >= 0.0 {
            (-omega / (1.0 + v), omega / (1.0 - v))
        } else {
            (omega / (1.0 - v), -omega / (1.0 + v))
        }
    }

    /// Wavevector-integrated tensor. Diagonal by azimuthal symmetry.
    pub fn integrate_k(&self, omega: f64, mode: EvaluationMode) -> Tensor3x3 {
        let weight = mode.weight();
        let (a, b) = self.domain(omega);
        let mut vals = [0.0; 3];
        for (i, v) in vals.iter_mut().enumerate() {
            *v = quadrature::adaptive(
                &|kx: f64| self.integrand_1d(kx, omega, i, weight),
                a,
                b,
                self.rel_err,
                0.0,
            );
        }
        let im = assemble(vals[0], vals[1], vals[2], 0.0);
        match mode {
            // the Hermitian part is renormalised away: Plain is i * Imag
            EvaluationMode::Plain => tensor::scale(Complex64::new(0.0, 1.0), &im),
            _ => im,
        }
    }
}
