//! Tensor-valued response fields (Green's tensors).
//!
//! A response field produces the 3×3 complex tensor describing the
//! electromagnetic response at the particle position, either resolved in the
//! in-plane wavevector (`tensor`) or integrated over the full 2-D wavevector
//! domain under a named [`EvaluationMode`] (`integrate_k`).
//!
//! Two fields are registered: free space ([`vacuum::VacuumGreensTensor`])
//! and a planar surface ([`plate::PlateGreensTensor`]).
//!
//! ## Symmetry contracts
//!
//! For every field and all valid `(ω, k)`:
//!
//! - reciprocity: `G(k, ω) = G(−k, ω)ᵀ`;
//! - reality: `G(k, −ω) = G(k, ω)†`;
//! - each mode's integrated tensor obeys a crossing relation at `−ω`
//!   (see the mode docs below).
//!
//! These are load-bearing: the frequency integration in the friction engine
//! runs over positive frequencies only because the negative half is pinned
//! by the crossing relations.

pub mod plate;
pub mod vacuum;

use num_complex::Complex64;

use crate::config::{ConfigError, CoreSections, GreensTensorSection};
use crate::tensor::{self, Tensor3x3};
use crate::types::PhysicalParameters;
use frix_materials::config::MaterialSections;
use frix_materials::permittivity::Permittivity;

pub use plate::PlateGreensTensor;
pub use vacuum::VacuumGreensTensor;

/// Which derived quantity a wavevector-integrated query produces.
///
/// Exactly one mode is active per query; the closed enum makes combinations
/// unrepresentable. Crossing relations at `−ω` in terms of `+ω` values:
///
/// | Mode | relation |
/// |------|----------|
/// | `Plain` | `conj(G)` |
/// | `Imag` | `−Gᵀ` |
/// | `ImagKx` | `+Gᵀ` |
/// | `ImagBose` | `(G_ImagBose − G_Imag)ᵀ` |
/// | `ImagKxBose` | `−(G_ImagKxBose − G_ImagKx)ᵀ` |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvaluationMode {
    /// Full complex integrated tensor (Hermitian plus anti-Hermitian part).
    Plain,
    /// Anti-Hermitian (dissipative) part `(G − G†)/2i`, unit weight.
    Imag,
    /// Dissipative part weighted by the velocity-direction wavevector
    /// component `k_x`.
    ImagKx,
    /// Dissipative part weighted by the Bose factor `1/(1 − e^{−βω′})` at
    /// the Doppler-shifted frequency `ω′ = ω + k_x v`.
    ImagBose,
    /// Both the `k_x` and the Bose weight.
    ImagKxBose,
}

/// Weight attached to a dissipative-part integrand.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Weight {
    pub kx: bool,
    pub bose: bool,
}

impl EvaluationMode {
    pub(crate) fn weight(self) -> Weight {
        match self {
            EvaluationMode::Plain | EvaluationMode::Imag => Weight {
                kx: false,
                bose: false,
            },
            EvaluationMode::ImagKx => Weight {
                kx: true,
                bose: false,
            },
            EvaluationMode::ImagBose => Weight {
                kx: false,
                bose: true,
            },
            EvaluationMode::ImagKxBose => Weight { kx: true, bose: true },
        }
    }
}

/// Which part of the point tensor enters the integrand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Part {
    Hermitian,
    AntiHermitian,
}

/// Bose occupation-style weight `1/(1 − e^{−x})`, overflow-safe on both
/// tails. Diverges at `x = 0`; callers skip the removable point.
pub(crate) fn bose_weight(x: f64) -> f64 {
    -1.0 / (-x).exp_m1()
}

/// A tensor-valued response field.
#[derive(Debug, Clone)]
pub enum GreensTensor {
    Vacuum(VacuumGreensTensor),
    Plate(PlateGreensTensor),
}

impl GreensTensor {
    /// The wavevector-resolved response tensor at `(ω, k)`.
    pub fn tensor(&self, omega: f64, k: [f64; 2]) -> Tensor3x3 {
        match self {
            GreensTensor::Vacuum(g) => g.tensor(omega, k),
            GreensTensor::Plate(g) => g.tensor(omega, k),
        }
    }

    /// The response tensor integrated over the 2-D wavevector domain with
    /// the measure `∫ d²k/(2π)²`, under the given evaluation mode.
    pub fn integrate_k(&self, omega: f64, mode: EvaluationMode) -> Tensor3x3 {
        match self {
            GreensTensor::Vacuum(g) => g.integrate_k(omega, mode),
            GreensTensor::Plate(g) => g.integrate_k(omega, mode),
        }
    }

    pub fn velocity(&self) -> f64 {
        self.params().v
    }

    pub fn beta(&self) -> f64 {
        self.params().beta
    }

    /// Wavevector cutoff of the integration domain; infinite for the vacuum
    /// field whose integrand has compact support.
    pub fn wavevector_cutoff(&self) -> f64 {
        match self {
            GreensTensor::Vacuum(_) => f64::INFINITY,
            GreensTensor::Plate(g) => g.wavevector_cutoff(),
        }
    }

    fn params(&self) -> &PhysicalParameters {
        match self {
            GreensTensor::Vacuum(g) => &g.params,
            GreensTensor::Plate(g) => &g.params,
        }
    }

    /// Set the relative velocity. Used by the sweep driver on worker-private
    /// instances only.
    pub fn set_velocity(&mut self, v: f64) {
        match self {
            GreensTensor::Vacuum(g) => g.params.v = v,
            GreensTensor::Plate(g) => g.params.v = v,
        }
    }

    /// Construct from the `[GreensTensor]` (and, for the plate, the
    /// `[Permittivity]`) sections of a parameter file.
    pub fn from_sections(
        core: &CoreSections,
        materials: &MaterialSections,
    ) -> Result<Self, ConfigError> {
        let section: &GreensTensorSection = core
            .greens_tensor
            .as_ref()
            .ok_or(ConfigError::MissingSection("GreensTensor"))?;
        let require = |value: Option<f64>, key: &'static str| {
            value.ok_or(ConfigError::MissingKey {
                section: "GreensTensor",
                key,
            })
        };
        let v = require(section.v, "v")?;
        let beta = require(section.beta, "beta")?;
        match section.kind.as_str() {
            "vacuum" => {
                let params = PhysicalParameters::new(v, 0.0, beta);
                let rel_err = section.rel_err.first().copied().unwrap_or(1e-9);
                Ok(GreensTensor::Vacuum(VacuumGreensTensor::new(params, rel_err)))
            }
            "plate" => {
                let za = require(section.za, "za")?;
                let delta_cut = require(section.delta_cut, "delta_cut")?;
                if section.rel_err.len() != 2 {
                    return Err(ConfigError::MissingKey {
                        section: "GreensTensor",
                        key: "rel_err (two-component vector)",
                    });
                }
                let permittivity = Permittivity::from_sections(materials)?;
                Ok(GreensTensor::Plate(PlateGreensTensor::new(
                    PhysicalParameters::new(v, za, beta),
                    permittivity,
                    delta_cut,
                    [section.rel_err[0], section.rel_err[1]],
                )))
            }
            other => Err(ConfigError::UnknownKind {
                what: "greens tensor",
                name: other.to_string(),
            }),
        }
    }

    /// Construct from a parameter file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let core = CoreSections::from_file(path)?;
        let materials = MaterialSections::from_file(path)?;
        Self::from_sections(&core, &materials)
    }
}

/// Assemble a Hermitian mode tensor from the four independent element
/// integrals (xx, yy, zz and the purely imaginary zx).
pub(crate) fn assemble(xx: f64, yy: f64, zz: f64, zx: f64) -> Tensor3x3 {
    let mut out = tensor::zero();
    out[0][0] = Complex64::from(xx);
    out[1][1] = Complex64::from(yy);
    out[2][2] = Complex64::from(zz);
    out[2][0] = Complex64::new(0.0, zx);
    out[0][2] = -out[2][0];
    out
}
