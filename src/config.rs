use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use crate::error::ConfigError;
use crate::solver::SolverParams;
use crate::source::CandleSource;

pub const CONFIG_FILE: &str = "stable-fluids.yaml";

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    pub grid: GridConfig,
    pub physics: PhysicsConfig,
    pub source: SourceConfig,
    pub run: RunConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub size: usize,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub dt: f64,
    pub diff: f64,
    pub visc: f64,
    pub iter: usize,
    pub gravity: f64,
    pub fade_rate: f64,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub enabled: bool,
    /// Emitter cell; defaults to the centered candle position.
    pub x: Option<i32>,
    pub y: Option<i32>,
    pub amount: f64,
    pub velocity_scale: f64,
    pub seed: u32,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub frames: usize,
    pub report_every: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            physics: PhysicsConfig::default(),
            source: SourceConfig::default(),
            run: RunConfig::default(),
        }
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self { size: 64 }
    }
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        let p = SolverParams::default();
        Self {
            dt: p.dt,
            diff: p.diff,
            visc: p.visc,
            iter: p.iter,
            gravity: p.gravity,
            fade_rate: p.fade_rate,
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            x: None,
            y: None,
            amount: 100.0,
            velocity_scale: 3.0,
            seed: 42,
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            frames: 300,
            report_every: 30,
        }
    }
}

impl Config {
    pub fn solver_params(&self) -> SolverParams {
        SolverParams {
            dt: self.physics.dt,
            diff: self.physics.diff,
            visc: self.physics.visc,
            iter: self.physics.iter,
            gravity: self.physics.gravity,
            fade_rate: self.physics.fade_rate,
        }
    }

    /// Build the configured emitter, or `None` when disabled.
    pub fn candle_source(&self) -> Option<CandleSource> {
        let src = &self.source;
        if !src.enabled {
            return None;
        }
        let mut candle = CandleSource::centered(self.grid.size, src.amount, src.velocity_scale, src.seed);
        if let Some(x) = src.x {
            candle.x = x;
        }
        if let Some(y) = src.y {
            candle.y = y;
        }
        Some(candle)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid.size == 0 {
            return Err(ConfigError::InvalidParameter("grid.size must be at least 1".to_string()));
        }
        if self.grid.size < 3 {
            warn!(size = self.grid.size, "grid.size below 3 has no interior cells");
        }
        if self.run.report_every == 0 {
            return Err(ConfigError::InvalidParameter("run.report_every must be at least 1".to_string()));
        }
        self.solver_params().validate()
    }
}

/// Parse and validate a configuration file.
pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let cfg: Config = serde_yaml::from_str(&contents)?;
    cfg.validate()?;
    Ok(cfg)
}

/// Load `stable-fluids.yaml` from the working directory, falling back to
/// defaults when it is missing or unusable.
pub fn load() -> Config {
    let path = Path::new(CONFIG_FILE);
    if path.exists() {
        match load_from(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!("{e}; using defaults");
                Config::default()
            }
        }
    } else {
        Config::default()
    }
}
