//! Fresnel reflection coefficients of a local bulk medium.

use num_complex::Complex64;

use crate::permittivity::Permittivity;

/// p- and s-polarised reflection coefficients at non-negative frequency.
///
/// `kappa` is the out-of-plane wavevector above the surface,
/// $\kappa = \sqrt{k^2 - \omega^2}$, already on the branch with
/// non-negative real part and non-positive imaginary part. The medium-side
/// wavevector is put on the same branch:
/// $\kappa_\epsilon = \sqrt{\kappa^2 - (\epsilon(\omega) - 1)\omega^2}$,
/// written via $\epsilon(\omega)\,\omega$ so the Drude pole at $\omega = 0$
/// never appears.
pub fn reflection_coefficients(
    permittivity: &Permittivity,
    omega: f64,
    kappa: Complex64,
) -> (Complex64, Complex64) {
    debug_assert!(omega >= 0.0, "reflection coefficients take omega >= 0");
    let eps_w = permittivity.epsilon_omega(omega);
    let kappa_eps = (kappa * kappa - (eps_w - omega) * omega).sqrt();
    let kappa_eps = Complex64::new(kappa_eps.re.abs(), -kappa_eps.im.abs());
    let r_p = (eps_w * kappa - omega * kappa_eps) / (eps_w * kappa + omega * kappa_eps);
    let r_s = (kappa - kappa_eps) / (kappa + kappa_eps);
    (r_p, r_s)
}
