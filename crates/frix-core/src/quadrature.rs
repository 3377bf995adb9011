//! Adaptive quadrature strategies.
//!
//! Three routines cover the integration needs of the engine:
//!
//! - [`adaptive`] — doubly-adaptive Gauss–Kronrod G7/K15 with recursive
//!   bisection, for smooth bounded intervals;
//! - [`robust`] — globally adaptive G10/K21 with largest-error-first
//!   subdivision, for bounded intervals containing a feature (resonance
//!   edge, thermal step);
//! - [`tail`] — semi-infinite `[a, ∞)` through the rational map
//!   `x = a + t/(1 - t)`, then [`robust`] on `[0, 1)`.
//!
//! Every call takes a relative-error target and an absolute-error floor;
//! with a zero floor only the relative target governs termination. On budget
//! exhaustion the best-effort estimate is returned and a warning is logged —
//! callers treat the result as best-effort.

/// Kronrod 15-point abscissae on `[-1, 1]` (positive half).
const XGK15: [f64; 8] = [
    0.991_455_371_120_812_6,
    0.949_107_912_342_758_5,
    0.864_864_423_359_769_1,
    0.741_531_185_599_394_4,
    0.586_087_235_467_691_1,
    0.405_845_151_377_397_2,
    0.207_784_955_007_898_5,
    0.0,
];

/// Kronrod 15-point weights.
const WGK15: [f64; 8] = [
    0.022_935_322_010_529_2,
    0.063_092_092_629_978_6,
    0.104_790_010_322_250_2,
    0.140_653_259_715_525_9,
    0.169_004_726_639_267_9,
    0.190_350_578_064_785_4,
    0.204_432_940_075_298_9,
    0.209_482_141_084_727_8,
];

/// Embedded Gauss 7-point weights (even Kronrod nodes).
const WG7: [f64; 4] = [
    0.129_484_966_168_869_7,
    0.279_705_391_489_276_7,
    0.381_830_050_505_118_9,
    0.417_959_183_673_469_4,
];

/// Kronrod 21-point abscissae (positive half).
const XGK21: [f64; 11] = [
    0.995_657_163_025_808_1,
    0.973_906_528_517_171_7,
    0.930_157_491_355_708_2,
    0.865_063_366_688_984_5,
    0.780_817_726_586_416_9,
    0.679_409_568_299_024_4,
    0.562_757_134_668_604_7,
    0.433_395_394_129_247_2,
    0.294_392_862_701_460_2,
    0.148_874_338_981_631_2,
    0.0,
];

/// Kronrod 21-point weights.
const WGK21: [f64; 11] = [
    0.011_694_638_867_371_9,
    0.032_558_162_307_964_7,
    0.054_755_896_574_352_0,
    0.075_039_674_810_919_9,
    0.093_125_454_583_697_6,
    0.109_387_158_802_297_6,
    0.123_491_976_262_065_9,
    0.134_709_217_311_473_3,
    0.142_775_938_577_060_1,
    0.147_739_104_901_338_5,
    0.149_445_554_002_916_9,
];

/// Embedded Gauss 10-point weights (odd Kronrod nodes).
const WG10: [f64; 5] = [
    0.066_671_344_308_688_1,
    0.149_451_349_150_580_6,
    0.219_086_362_515_982_0,
    0.269_266_719_309_996_3,
    0.295_524_224_714_752_9,
];

const MAX_DEPTH: u32 = 30;
const MAX_INTERVALS: usize = 200;

/// One G7/K15 panel: returns the Kronrod estimate and the |K15 - G7|
/// error indicator.
fn gk15<F: Fn(f64) -> f64>(f: &F, a: f64, b: f64) -> (f64, f64) {
    let c = 0.5 * (a + b);
    let h = 0.5 * (b - a);
    let fc = f(c);
    let mut resk = WGK15[7] * fc;
    let mut resg = WG7[3] * fc;
    for j in 0..7 {
        let x = h * XGK15[j];
        let f1 = f(c - x);
        let f2 = f(c + x);
        resk += WGK15[j] * (f1 + f2);
        if j % 2 == 1 {
            resg += WG7[j / 2] * (f1 + f2);
        }
    }
    (resk * h, (resk - resg).abs() * h)
}

/// One G10/K21 panel.
fn gk21<F: Fn(f64) -> f64>(f: &F, a: f64, b: f64) -> (f64, f64) {
    let c = 0.5 * (a + b);
    let h = 0.5 * (b - a);
    let fc = f(c);
    let mut resk = WGK21[10] * fc;
    let mut resg = 0.0;
    for j in 0..10 {
        let x = h * XGK21[j];
        let f1 = f(c - x);
        let f2 = f(c + x);
        resk += WGK21[j] * (f1 + f2);
        if j % 2 == 1 {
            resg += WG10[j / 2] * (f1 + f2);
        }
    }
    (resk * h, (resk - resg).abs() * h)
}

fn adaptive_rec<F: Fn(f64) -> f64>(
    f: &F,
    a: f64,
    b: f64,
    rel_err: f64,
    abs_err: f64,
    depth: u32,
) -> f64 {
    let (est, err) = gk15(f, a, b);
    let tol = abs_err.max(est.abs() * rel_err);
    if err <= tol {
        return est;
    }
    if depth >= MAX_DEPTH {
        log::warn!(
            "adaptive quadrature hit depth cap on [{a:.3e}, {b:.3e}] (err {err:.3e} > tol {tol:.3e})"
        );
        return est;
    }
    let m = 0.5 * (a + b);
    let half = 0.5 * abs_err;
    adaptive_rec(f, a, m, rel_err, half, depth + 1) + adaptive_rec(f, m, b, rel_err, half, depth + 1)
}

/// Doubly-adaptive bounded quadrature for smooth integrands.
pub fn adaptive<F: Fn(f64) -> f64>(f: &F, a: f64, b: f64, rel_err: f64, abs_err: f64) -> f64 {
    if a == b {
        return 0.0;
    }
    adaptive_rec(f, a, b, rel_err, abs_err, 0)
}

/// Robust bounded quadrature for integrands with a localised feature.
///
/// Keeps a worklist of panels and always splits the panel with the largest
/// error indicator, so a single bad spot does not force refinement of the
/// whole interval.
pub fn robust<F: Fn(f64) -> f64>(f: &F, a: f64, b: f64, rel_err: f64, abs_err: f64) -> f64 {
    if a == b {
        return 0.0;
    }
    let (est, err) = gk21(f, a, b);
    // (error, lo, hi, estimate) panels
    let mut panels: Vec<(f64, f64, f64, f64)> = vec![(err, a, b, est)];
    let mut total = est;
    let mut total_err = err;
    for _ in 0..MAX_INTERVALS {
        if total_err <= abs_err.max(total.abs() * rel_err) {
            return total;
        }
        let worst = panels
            .iter()
            .enumerate()
            .max_by(|x, y| x.1 .0.total_cmp(&y.1 .0))
            .map(|(idx, _)| idx)
            .unwrap_or(0);
        let (e0, lo, hi, v0) = panels.swap_remove(worst);
        let m = 0.5 * (lo + hi);
        let (vl, el) = gk21(f, lo, m);
        let (vr, er) = gk21(f, m, hi);
        total += vl + vr - v0;
        total_err += el + er - e0;
        panels.push((el, lo, m, vl));
        panels.push((er, m, hi, vr));
    }
    log::warn!(
        "robust quadrature exhausted {MAX_INTERVALS} panels on [{a:.3e}, {b:.3e}] (err {total_err:.3e})"
    );
    total
}

/// Quadrature over the semi-infinite interval `[a, ∞)`.
pub fn tail<F: Fn(f64) -> f64>(f: &F, a: f64, rel_err: f64, abs_err: f64) -> f64 {
    let g = |t: f64| {
        if t >= 1.0 {
            return 0.0;
        }
        let u = 1.0 - t;
        f(a + t / u) / (u * u)
    };
    robust(&g, 0.0, 1.0, rel_err, abs_err)
}
