//! Scattered Green's tensor above a planar surface.
//!
//! The surface response enters through the reflection coefficients of the
//! configured permittivity. The integrated representation runs over the
//! polar angle `φ` (outer) and a κ-parametrised wavevector coordinate
//! (inner), where negative `κ_d` encodes the purely imaginary
//! (propagating) branch of the out-of-plane wavevector, `κ = iκ_d`, and
//! positive `κ_d` the evanescent branch. The substitution removes the
//! `1/κ` light-cone singularity of the point tensor: the measure carries a
//! compensating factor of `|κ_d|`.

use std::f64::consts::PI;

use num_complex::Complex64;

use frix_materials::permittivity::Permittivity;
use frix_materials::reflection::reflection_coefficients;

use crate::greens::{assemble, bose_weight, EvaluationMode, Part, Weight};
use crate::quadrature;
use crate::tensor::{self, Tensor3x3};
use crate::types::PhysicalParameters;

/// Elements that survive the azimuthal integration; `xy` drops by the
/// `k_y → −k_y` symmetry.
const ELEMENTS: [(usize, usize); 4] = [(0, 0), (1, 1), (2, 2), (2, 0)];

#[derive(Debug, Clone)]
pub struct PlateGreensTensor {
    pub(crate) params: PhysicalParameters,
    permittivity: Permittivity,
    /// Dimensionless cutoff of the evanescent κ integration; the domain
    /// ends at `delta_cut/(2 za)` where the `e^{−2κ za}` envelope has
    /// decayed to `e^{−delta_cut}`.
    delta_cut: f64,
    /// Relative-error budget `[propagating, evanescent]`.
    rel_err: [f64; 2],
}

impl PlateGreensTensor {
    pub fn new(
        params: PhysicalParameters,
        permittivity: Permittivity,
        delta_cut: f64,
        rel_err: [f64; 2],
    ) -> Self {
        Self {
            params,
            permittivity,
            delta_cut,
            rel_err,
        }
    }

    pub fn za(&self) -> f64 {
        self.params.za
    }

    pub fn delta_cut(&self) -> f64 {
        self.delta_cut
    }

    pub fn rel_err(&self) -> [f64; 2] {
        self.rel_err
    }

    /// Upper end of the κ integration domain.
    pub fn wavevector_cutoff(&self) -> f64 {
        self.delta_cut / (2.0 * self.params.za)
    }

    /// Wavevector-resolved scattered tensor at `(ω, k)`.
    pub fn tensor(&self, omega: f64, k: [f64; 2]) -> Tensor3x3 {
        let k2 = k[0] * k[0] + k[1] * k[1];
        let kappa = Complex64::from(k2 - omega * omega).sqrt();
        let kappa = Complex64::new(kappa.re.abs(), -kappa.im.abs());
        self.point_tensor(omega, k[0], k[1], kappa)
    }

    /// Point tensor with the out-of-plane wavevector supplied by the
    /// caller. The κ-parametrised integration passes its exact coordinate
    /// here; recomputing κ from `(ω′, k)` would cancel catastrophically
    /// next to the light cone.
    ///
    /// Negative frequency is the conjugate transpose of the positive-
    /// frequency tensor (reality condition, enforced structurally).
    fn point_tensor(&self, omega: f64, kx: f64, ky: f64, kappa: Complex64) -> Tensor3x3 {
        if omega < 0.0 {
            return tensor::dagger(&self.point_tensor(-omega, kx, ky, kappa));
        }
        let k2 = kx * kx + ky * ky;
        let (r_p, r_s) = reflection_coefficients(&self.permittivity, omega, kappa);
        let pref = 2.0 * PI * (-2.0 * self.params.za * kappa).exp();
        let w2 = omega * omega;
        let i_unit = Complex64::new(0.0, 1.0);

        let mut g = tensor::zero();
        g[0][0] = pref * (kx * kx * kappa * r_p + ky * ky * w2 * r_s / kappa) / k2;
        g[1][1] = pref * (ky * ky * kappa * r_p + kx * kx * w2 * r_s / kappa) / k2;
        g[0][1] = pref * (kx * ky * kappa * r_p - kx * ky * w2 * r_s / kappa) / k2;
        g[1][0] = g[0][1];
        g[2][2] = pref * k2 * r_p / kappa;
        g[0][2] = -i_unit * kx * r_p * pref;
        g[2][0] = -g[0][2];
        g[1][2] = -i_unit * ky * r_p * pref;
        g[2][1] = -g[1][2];
        g
    }

    /// Hermitian or anti-Hermitian part of the point tensor at the
    /// Doppler-shifted frequency.
    fn point_part(&self, wp: f64, kx: f64, ky: f64, kappa: Complex64, part: Part) -> Tensor3x3 {
        let g = self.point_tensor(wp, kx, ky, kappa);
        match part {
            Part::Hermitian => tensor::hermitian_part(&g),
            Part::AntiHermitian => tensor::antihermitian_part(&g),
        }
    }

    /// Inner integrand at fixed `φ`, as a function of the branch coordinate
    /// `κ_d`. At fixed `(κ_d, φ)` the wavevector magnitude solves
    /// `k² − (ω + v k cosφ)² = sgn(κ_d)·κ_d²`; when `v·cosφ·ω > 0` the map
    /// folds and the deep propagating segment carries both roots, each with
    /// measure `μ = |κ_d|·k/√D`.
    fn kappa_integrand(
        &self,
        kd: f64,
        phi: f64,
        omega: f64,
        i: usize,
        j: usize,
        part: Part,
        weight: Weight,
    ) -> f64 {
        let cos_phi = phi.cos();
        let vc = self.params.v * cos_phi;
        let fac = 1.0 - vc * vc;
        let kq = if kd < 0.0 { -kd * kd } else { kd * kd };
        let disc = omega * omega + kq * fac;
        if disc <= 0.0 {
            return 0.0;
        }
        let sq = disc.sqrt();
        let kappa = if kd < 0.0 {
            Complex64::new(0.0, kd)
        } else {
            Complex64::new(kd, 0.0)
        };

        let mut total = 0.0;
        for sgn in [1.0, -1.0] {
            // the second root only exists beyond the fold, in the
            // propagating region
            if sgn < 0.0 && (kd >= 0.0 || kq >= -omega * omega) {
                continue;
            }
            let k = (omega * vc + sgn * sq) / fac;
            if k <= 0.0 {
                continue;
            }
            let wp = omega + vc * k;
            if kd < 0.0 && wp * wp < kd * kd {
                continue;
            }
            let mu = kd.abs() * k / sq;
            let (kx, ky) = (k * cos_phi, k * phi.sin());
            let f = self.point_part(wp, kx, ky, kappa, part);
            // diagonal integrands are real, zx is purely imaginary with
            // the i reinserted at assembly
            let val = if i == j { f[i][j].re } else { f[i][j].im };
            let mut w = 1.0;
            if weight.kx {
                w *= kx;
            }
            if weight.bose {
                if wp == 0.0 {
                    return 0.0; // removable point of the Bose weight
                }
                w *= bose_weight(self.params.beta * wp);
            }
            total += mu * w * val;
        }
        total
    }

    /// Integrate one tensor part over the full wavevector domain.
    fn integrate_part(&self, omega: f64, part: Part, weight: Weight) -> Tensor3x3 {
        let kcut = self.wavevector_cutoff();
        let [re_prop, re_evan] = self.rel_err;
        let v = self.params.v;
        let mut vals = [0.0; 4];
        for (n, &(i, j)) in ELEMENTS.iter().enumerate() {
            let fphi = |phi: f64| {
                let fk = |kd: f64| self.kappa_integrand(kd, phi, omega, i, j, part, weight);
                let vc = v * phi.cos();
                let wtil = omega.abs() / (1.0 - vc * vc).sqrt();
                let mut r = 0.0;
                if vc * omega > 0.0 {
                    // folded segment: both wavevector roots contribute
                    r += quadrature::adaptive(&fk, -wtil, -omega.abs(), re_prop, 0.0);
                }
                r += quadrature::adaptive(&fk, -omega.abs(), 0.0, re_prop, 0.0);
                r += quadrature::adaptive(&fk, 0.0, kcut, re_evan, 0.0);
                r
            };
            // the y symmetry doubles [0, π]
            vals[n] = 2.0 * quadrature::adaptive(&fphi, 0.0, PI, re_prop, 0.0) / (4.0 * PI * PI);
        }
        assemble(vals[0], vals[1], vals[2], vals[3])
    }

    /// Wavevector-integrated tensor under the given evaluation mode.
    pub fn integrate_k(&self, omega: f64, mode: EvaluationMode) -> Tensor3x3 {
        match mode {
            EvaluationMode::Plain => {
                let re = self.integrate_part(omega, Part::Hermitian, mode.weight());
                let im = self.integrate_part(omega, Part::AntiHermitian, mode.weight());
                tensor::lincomb(Complex64::from(1.0), &re, Complex64::new(0.0, 1.0), &im)
            }
            _ => self.integrate_part(omega, Part::AntiHermitian, mode.weight()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn plate(v: f64, za: f64, beta: f64) -> PlateGreensTensor {
        PlateGreensTensor::new(
            PhysicalParameters::new(v, za, beta),
            Permittivity::drude(0.1, 9.0),
            20.0,
            [1e-9, 1e-7],
        )
    }

    // deterministic sample points spanning propagating and evanescent
    // sectors, both frequency signs
    const SAMPLES: [(f64, f64, f64); 6] = [
        (72.3, 9.1, 42.5),
        (-86.0, 28.9, 14.4),
        (3.2, 54.8, 6.3),
        (-0.7, 0.3, 0.1),
        (65.4, 12.4, 22.3),
        (-14.5, 31.4, 58.6),
    ];

    #[test]
    fn tensor_obeys_reciprocity() {
        let g = plate(1e-2, 0.1, f64::NAN);
        for &(w, kx, ky) in &SAMPLES {
            let lhs = g.tensor(w, [kx, ky]);
            let rhs = g.tensor(w, [-kx, -ky]);
            for i in 0..3 {
                for j in 0..3 {
                    assert_relative_eq!(lhs[i][j].re, rhs[j][i].re, max_relative = 1e-12);
                    assert_relative_eq!(lhs[i][j].im, rhs[j][i].im, max_relative = 1e-12);
                }
            }
        }
    }

    #[test]
    fn tensor_obeys_reality_condition() {
        let g = plate(1e-2, 0.1, f64::NAN);
        for &(w, kx, ky) in &SAMPLES {
            let lhs = g.tensor(-w, [kx, ky]);
            let rhs = g.tensor(w, [kx, ky]);
            for i in 0..3 {
                for j in 0..3 {
                    let expect = rhs[j][i].conj();
                    assert_relative_eq!(lhs[i][j].re, expect.re, max_relative = 1e-12);
                    assert_relative_eq!(lhs[i][j].im, expect.im, max_relative = 1e-12);
                }
            }
        }
    }

    /// The κ-parametrised inner integral must reproduce the direct
    /// integral over the wavevector magnitude at fixed azimuth, fold
    /// branches included. Moderate velocity stresses the folded segment.
    #[test]
    fn kappa_representation_matches_direct_k_integral() {
        let g = plate(0.3, 0.5, 2.0);
        let kcut = g.wavevector_cutoff();
        for &omega in &[0.7, -0.7] {
            for &phi in &[0.4, 2.1] {
                for &(i, j) in &[(0, 0), (2, 2), (2, 0)] {
                    for &weight in &[
                        Weight { kx: false, bose: false },
                        Weight { kx: true, bose: false },
                        Weight { kx: false, bose: true },
                    ] {
                        let via_kappa = {
                            let fk = |kd: f64| {
                                g.kappa_integrand(kd, phi, omega, i, j, Part::AntiHermitian, weight)
                            };
                            let vc = g.params.v * phi.cos();
                            let wtil = omega.abs() / (1.0 - vc * vc).sqrt();
                            let mut r = 0.0;
                            if vc * omega > 0.0 {
                                r += quadrature::adaptive(&fk, -wtil, -omega.abs(), 1e-9, 0.0);
                            }
                            r += quadrature::adaptive(&fk, -omega.abs(), 0.0, 1e-9, 0.0);
                            r += quadrature::adaptive(&fk, 0.0, kcut, 1e-9, 0.0);
                            r
                        };
                        let direct = {
                            let (cos_phi, sin_phi) = (phi.cos(), phi.sin());
                            let vc = g.params.v * cos_phi;
                            let fac = 1.0 - vc * vc;
                            let kstar = (omega * vc + omega.abs()) / fac;
                            let kmax = (omega * vc
                                + (omega * omega + kcut * kcut * fac).sqrt())
                                / fac;
                            let f = |k: f64| {
                                let wp = omega + vc * k;
                                if k == 0.0 || k * k == wp * wp {
                                    return 0.0;
                                }
                                let kappa = Complex64::from(k * k - wp * wp).sqrt();
                                let kappa = Complex64::new(kappa.re.abs(), -kappa.im.abs());
                                let fij = g.point_part(
                                    wp,
                                    k * cos_phi,
                                    k * sin_phi,
                                    kappa,
                                    Part::AntiHermitian,
                                );
                                let val = if i == j { fij[i][j].re } else { fij[i][j].im };
                                let mut w = 1.0;
                                if weight.kx {
                                    w *= k * cos_phi;
                                }
                                if weight.bose {
                                    if wp == 0.0 {
                                        return 0.0;
                                    }
                                    w *= bose_weight(g.params.beta * wp);
                                }
                                k * w * val
                            };
                            quadrature::robust(&f, 0.0, kstar, 1e-7, 0.0)
                                + quadrature::robust(&f, kstar, kmax, 1e-7, 0.0)
                        };
                        assert_relative_eq!(via_kappa, direct, max_relative = 2e-4);
                    }
                }
            }
        }
    }

    #[test]
    fn xy_element_vanishes_by_symmetry() {
        // pointwise G_xy is nonzero but odd under k_y -> -k_y
        let g = plate(1e-2, 0.1, f64::NAN);
        let a = g.tensor(3.0, [1.0, 2.0]);
        let b = g.tensor(3.0, [1.0, -2.0]);
        assert!(a[0][1].norm() > 0.0);
        assert_abs_diff_eq!(a[0][1].re, -b[0][1].re, epsilon = 1e-12);
        assert_abs_diff_eq!(a[0][1].im, -b[0][1].im, epsilon = 1e-12);
    }
}
