//! Parameter sweep: an ordered, fixed sequence of values of one physical
//! parameter, each driving an independent friction computation.

use ndarray::Array1;
use serde::Deserialize;

use crate::config::{ConfigError, CoreSections};
use crate::greens::GreensTensor;

/// Spacing of the swept values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SweepScale {
    Linear,
    Log,
}

/// Which physical parameter the sweep varies. Only the velocity sweep is
/// registered; the registry keeps an explicit unknown-name error path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepVariable {
    Velocity,
}

impl SweepVariable {
    pub fn from_name(name: &str) -> Result<Self, ConfigError> {
        match name {
            "v" => Ok(Self::Velocity),
            other => Err(ConfigError::UnknownKind {
                what: "sweep variable",
                name: other.to_string(),
            }),
        }
    }

    /// Apply one swept value to a worker-private model stack.
    pub fn apply(self, value: f64, greens: &mut GreensTensor) {
        match self {
            Self::Velocity => greens.set_velocity(value),
        }
    }
}

/// An immutable sweep description with its precomputed value sequence.
///
/// Both endpoints are included: `steps` intervals give `steps + 1` values,
/// `value[i] = start + i·(end−start)/steps` on the linear scale and
/// `value[i] = start·r^i` with `r = (end/start)^{1/steps}` on the log
/// scale.
#[derive(Debug, Clone)]
pub struct SweepDescriptor {
    start: f64,
    end: f64,
    steps: usize,
    scale: SweepScale,
    variable: SweepVariable,
    /// Free-form name of the computed quantity, carried to output headers
    /// and logs.
    kind: String,
    values: Array1<f64>,
}

impl SweepDescriptor {
    pub fn new(
        start: f64,
        end: f64,
        steps: usize,
        scale: SweepScale,
        variable: SweepVariable,
        kind: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        if !(start < end) {
            return Err(ConfigError::InvalidSweep(format!(
                "start ({start}) must be below end ({end})"
            )));
        }
        if steps == 0 {
            return Err(ConfigError::InvalidSweep("step count must be positive".into()));
        }
        if scale == SweepScale::Log && start <= 0.0 {
            return Err(ConfigError::InvalidSweep(format!(
                "log scale needs a positive start, got {start}"
            )));
        }
        let values = match scale {
            SweepScale::Linear => {
                let spacing = (end - start) / steps as f64;
                Array1::from_iter((0..=steps).map(|i| start + i as f64 * spacing))
            }
            SweepScale::Log => {
                let ratio = (end / start).powf(1.0 / steps as f64);
                Array1::from_iter((0..=steps).map(|i| start * ratio.powi(i as i32)))
            }
        };
        Ok(Self {
            start,
            end,
            steps,
            scale,
            variable,
            kind: kind.into(),
            values,
        })
    }

    /// Construct from the `[Looper]` section of a parameter file.
    pub fn from_sections(core: &CoreSections) -> Result<Self, ConfigError> {
        let section = core
            .looper
            .as_ref()
            .ok_or(ConfigError::MissingSection("Looper"))?;
        let variable = SweepVariable::from_name(&section.variable)?;
        Self::new(
            section.start,
            section.end,
            section.steps,
            section.scale,
            variable,
            section.kind.clone(),
        )
    }

    /// Number of sweep points (slots), `steps + 1`.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn value(&self, index: usize) -> f64 {
        self.values[index]
    }

    pub fn values(&self) -> &Array1<f64> {
        &self.values
    }

    pub fn variable(&self) -> SweepVariable {
        self.variable
    }

    pub fn scale(&self) -> SweepScale {
        self.scale
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// `(start, end, steps)` as configured.
    pub fn bounds(&self) -> (f64, f64, usize) {
        (self.start, self.end, self.steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn descriptor(
        start: f64,
        end: f64,
        steps: usize,
        scale: SweepScale,
    ) -> Result<SweepDescriptor, ConfigError> {
        SweepDescriptor::new(start, end, steps, scale, SweepVariable::Velocity, "friction")
    }

    #[test]
    fn linear_values_hit_every_grid_point() {
        let sweep = descriptor(1.0, 5.0, 4, SweepScale::Linear).unwrap();
        assert_eq!(sweep.len(), 5);
        for (i, expect) in [1.0, 2.0, 3.0, 4.0, 5.0].into_iter().enumerate() {
            assert_relative_eq!(sweep.value(i), expect, max_relative = 1e-15);
        }
    }

    #[test]
    fn log_values_are_geometric_and_hit_endpoints() {
        let sweep = descriptor(1e-4, 1.0, 4, SweepScale::Log).unwrap();
        assert_eq!(sweep.len(), 5);
        for (i, expect) in [1e-4, 1e-3, 1e-2, 1e-1, 1.0].into_iter().enumerate() {
            assert_relative_eq!(sweep.value(i), expect, max_relative = 1e-12);
        }
    }

    #[test]
    fn inverted_bounds_are_rejected() {
        assert!(descriptor(5.0, 1.0, 4, SweepScale::Linear).is_err());
        assert!(descriptor(1.0, 1.0, 4, SweepScale::Linear).is_err());
    }

    #[test]
    fn zero_steps_are_rejected() {
        assert!(descriptor(1.0, 5.0, 0, SweepScale::Linear).is_err());
    }

    #[test]
    fn log_scale_rejects_nonpositive_start() {
        assert!(descriptor(0.0, 5.0, 4, SweepScale::Log).is_err());
    }

    #[test]
    fn unknown_sweep_variable_is_fatal() {
        let err = SweepVariable::from_name("za").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownKind { .. }));
    }

    #[test]
    fn velocity_variable_mutates_the_field() {
        use crate::greens::VacuumGreensTensor;
        use crate::types::PhysicalParameters;
        let mut g = GreensTensor::Vacuum(VacuumGreensTensor::new(
            PhysicalParameters::new(1e-4, 0.0, 1e3),
            1e-9,
        ));
        SweepVariable::Velocity.apply(3e-3, &mut g);
        assert_eq!(g.velocity(), 3e-3);
    }
}
