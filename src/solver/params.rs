use crate::error::ConfigError;

/// Solver parameters, fixed for the lifetime of a `FluidState`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverParams {
    pub dt: f64,
    pub diff: f64,
    pub visc: f64,
    /// Gauss-Seidel sweeps per linear solve (diffusion and pressure).
    pub iter: usize,
    /// Subtracted from the vertical component of every velocity impulse.
    pub gravity: f64,
    /// Density removed from every cell per `fade`.
    pub fade_rate: f64,
}

impl Default for SolverParams {
    fn default() -> Self {
        Self {
            dt: 0.2,
            diff: 0.0,
            visc: 0.0000001,
            iter: 4,
            gravity: 0.0,
            fade_rate: 0.02,
        }
    }
}

impl SolverParams {
    /// Check the values a configuration file could get wrong. The solver
    /// itself runs with whatever it is given.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(ConfigError::InvalidParameter(format!("dt must be positive and finite, got {}", self.dt)));
        }
        for (name, value) in [("diff", self.diff), ("visc", self.visc)] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidParameter(format!(
                    "{name} must be non-negative and finite, got {value}"
                )));
            }
        }
        for (name, value) in [("gravity", self.gravity), ("fade_rate", self.fade_rate)] {
            if !value.is_finite() {
                return Err(ConfigError::InvalidParameter(format!("{name} must be finite, got {value}")));
            }
        }
        if self.iter == 0 {
            return Err(ConfigError::InvalidParameter("iter must be at least 1".to_string()));
        }
        Ok(())
    }
}
