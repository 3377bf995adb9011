//! Stack-allocated complex 3×3 tensor algebra.
//!
//! Every physical quantity in the hot path is a 3×3 complex matrix; keeping
//! them as plain `[[Complex64; 3]; 3]` avoids heap allocation inside the
//! quadrature loops.

use num_complex::Complex64;

/// Stack-allocated 3×3 complex tensor (zero heap allocation).
pub type Tensor3x3 = [[Complex64; 3]; 3];

/// The zero tensor.
pub fn zero() -> Tensor3x3 {
    [[Complex64::new(0.0, 0.0); 3]; 3]
}

/// Plain transpose.
pub fn transpose(t: &Tensor3x3) -> Tensor3x3 {
    let mut out = zero();
    for i in 0..3 {
        for j in 0..3 {
            out[i][j] = t[j][i];
        }
    }
    out
}

/// Conjugate (Hermitian) transpose.
pub fn dagger(t: &Tensor3x3) -> Tensor3x3 {
    let mut out = zero();
    for i in 0..3 {
        for j in 0..3 {
            out[i][j] = t[j][i].conj();
        }
    }
    out
}

/// Element-wise conjugate.
pub fn conj(t: &Tensor3x3) -> Tensor3x3 {
    let mut out = zero();
    for i in 0..3 {
        for j in 0..3 {
            out[i][j] = t[i][j].conj();
        }
    }
    out
}

/// Matrix product.
pub fn mul(a: &Tensor3x3, b: &Tensor3x3) -> Tensor3x3 {
    let mut out = zero();
    for i in 0..3 {
        for j in 0..3 {
            let mut acc = Complex64::new(0.0, 0.0);
            for l in 0..3 {
                acc += a[i][l] * b[l][j];
            }
            out[i][j] = acc;
        }
    }
    out
}

/// Trace.
pub fn trace(t: &Tensor3x3) -> Complex64 {
    t[0][0] + t[1][1] + t[2][2]
}

/// `a*A + b*B` with complex coefficients.
pub fn lincomb(a: Complex64, ta: &Tensor3x3, b: Complex64, tb: &Tensor3x3) -> Tensor3x3 {
    let mut out = zero();
    for i in 0..3 {
        for j in 0..3 {
            out[i][j] = a * ta[i][j] + b * tb[i][j];
        }
    }
    out
}

/// Uniform scaling.
pub fn scale(c: Complex64, t: &Tensor3x3) -> Tensor3x3 {
    let mut out = zero();
    for i in 0..3 {
        for j in 0..3 {
            out[i][j] = c * t[i][j];
        }
    }
    out
}

/// Hermitian part, $(T + T^\dagger)/2$.
pub fn hermitian_part(t: &Tensor3x3) -> Tensor3x3 {
    let mut out = zero();
    for i in 0..3 {
        for j in 0..3 {
            out[i][j] = (t[i][j] + t[j][i].conj()) * 0.5;
        }
    }
    out
}

/// Anti-Hermitian (dissipative) part, $(T - T^\dagger)/2i$. Itself Hermitian.
pub fn antihermitian_part(t: &Tensor3x3) -> Tensor3x3 {
    let half_over_i = Complex64::new(0.0, -0.5);
    let mut out = zero();
    for i in 0..3 {
        for j in 0..3 {
            out[i][j] = (t[i][j] - t[j][i].conj()) * half_over_i;
        }
    }
    out
}

/// Inverse through the cofactor expansion. The 3×3 systems solved here are
/// far from singular (the polarizability denominator), so no pivoting is
/// needed.
pub fn inverse(t: &Tensor3x3) -> Tensor3x3 {
    let [a, b, c] = t[0];
    let [d, e, f] = t[1];
    let [g, h, i] = t[2];
    let det = a * (e * i - f * h) - b * (d * i - f * g) + c * (d * h - e * g);
    [
        [(e * i - f * h) / det, -(b * i - c * h) / det, (b * f - c * e) / det],
        [-(d * i - f * g) / det, (a * i - c * g) / det, -(a * f - c * d) / det],
        [(d * h - e * g) / det, -(a * h - b * g) / det, (a * e - b * d) / det],
    ]
}
