//! Parameter schedules for deterministic control
//!
//! Schedules map an iteration number to a parameter value. All schedules share
//! the progress fraction `p = min(t / (T − 1), 1)`, so the end value is reached
//! on the last iteration of a run of `T` iterations.

use std::collections::HashMap;
use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::error::{SwarmError, SwarmResult};

/// Parameter schedule trait
///
/// Defines how a parameter changes over the course of a run.
pub trait ParameterSchedule: Send + Sync {
    /// Get the parameter value at a given iteration
    fn value_at(&self, iteration: usize, max_iterations: usize) -> f64;
}

/// Progress fraction `min(t / (T − 1), 1)`; runs of at most one iteration
/// are treated as already complete
pub fn progress(iteration: usize, max_iterations: usize) -> f64 {
    if max_iterations <= 1 {
        return 1.0;
    }
    (iteration as f64 / (max_iterations - 1) as f64).min(1.0)
}

/// Linear interpolation: `start + (end − start)·p`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinearSchedule {
    /// Value at iteration 0
    pub start: f64,
    /// Value at the final iteration
    pub end: f64,
}

impl LinearSchedule {
    /// Create a new linear schedule
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }
}

impl ParameterSchedule for LinearSchedule {
    fn value_at(&self, iteration: usize, max_iterations: usize) -> f64 {
        let p = progress(iteration, max_iterations);
        self.start + (self.end - self.start) * p
    }
}

/// Geometric interpolation: `start·(end / start)^p`
///
/// Both endpoints should share a sign and be non-zero.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExponentialSchedule {
    /// Value at iteration 0
    pub start: f64,
    /// Value at the final iteration
    pub end: f64,
}

impl ExponentialSchedule {
    /// Create a new exponential schedule
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }
}

impl ParameterSchedule for ExponentialSchedule {
    fn value_at(&self, iteration: usize, max_iterations: usize) -> f64 {
        let p = progress(iteration, max_iterations);
        self.start * (self.end / self.start).powf(p)
    }
}

/// Half-cosine interpolation: `start + (end − start)·(1 − cos πp)/2`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CosineSchedule {
    /// Value at iteration 0
    pub start: f64,
    /// Value at the final iteration
    pub end: f64,
}

impl CosineSchedule {
    /// Create a new cosine schedule
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }
}

impl ParameterSchedule for CosineSchedule {
    fn value_at(&self, iteration: usize, max_iterations: usize) -> f64 {
        let p = progress(iteration, max_iterations);
        self.start + (self.end - self.start) * (1.0 - (PI * p).cos()) / 2.0
    }
}

/// Single switch: `start` before `switch_at`, `end` from then on
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StepSchedule {
    /// Value before the switch
    pub start: f64,
    /// Value from the switch onwards
    pub end: f64,
    /// Iteration at which the value switches
    pub switch_at: usize,
}

impl StepSchedule {
    /// Create a new step schedule
    pub fn new(start: f64, end: f64, switch_at: usize) -> Self {
        Self {
            start,
            end,
            switch_at,
        }
    }
}

impl ParameterSchedule for StepSchedule {
    fn value_at(&self, iteration: usize, _max_iterations: usize) -> f64 {
        if iteration < self.switch_at {
            self.start
        } else {
            self.end
        }
    }
}

/// Enum-based schedule for storing heterogeneous schedules together
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AdaptiveSchedule {
    Linear(LinearSchedule),
    Exponential(ExponentialSchedule),
    Cosine(CosineSchedule),
    Step(StepSchedule),
}

impl ParameterSchedule for AdaptiveSchedule {
    fn value_at(&self, iteration: usize, max_iterations: usize) -> f64 {
        match self {
            Self::Linear(s) => s.value_at(iteration, max_iterations),
            Self::Exponential(s) => s.value_at(iteration, max_iterations),
            Self::Cosine(s) => s.value_at(iteration, max_iterations),
            Self::Step(s) => s.value_at(iteration, max_iterations),
        }
    }
}

impl From<LinearSchedule> for AdaptiveSchedule {
    fn from(s: LinearSchedule) -> Self {
        Self::Linear(s)
    }
}

impl From<ExponentialSchedule> for AdaptiveSchedule {
    fn from(s: ExponentialSchedule) -> Self {
        Self::Exponential(s)
    }
}

impl From<CosineSchedule> for AdaptiveSchedule {
    fn from(s: CosineSchedule) -> Self {
        Self::Cosine(s)
    }
}

impl From<StepSchedule> for AdaptiveSchedule {
    fn from(s: StepSchedule) -> Self {
        Self::Step(s)
    }
}

/// Registry of named schedules sharing one run length
///
/// Every parameter must be registered before it is queried; unknown names are
/// an error rather than a silent default.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AdaptiveParameterManager {
    max_iterations: usize,
    schedules: HashMap<String, AdaptiveSchedule>,
}

impl AdaptiveParameterManager {
    /// Create an empty manager for runs of `max_iterations`
    pub fn new(max_iterations: usize) -> Self {
        Self {
            max_iterations,
            schedules: HashMap::new(),
        }
    }

    /// Register (or replace) a schedule under `name`
    pub fn register<S: Into<AdaptiveSchedule>>(&mut self, name: impl Into<String>, schedule: S) {
        self.schedules.insert(name.into(), schedule.into());
    }

    /// Builder-style variant of [`register`](Self::register)
    pub fn with<S: Into<AdaptiveSchedule>>(mut self, name: impl Into<String>, schedule: S) -> Self {
        self.register(name, schedule);
        self
    }

    /// Value of `name` at `iteration`
    pub fn value(&self, name: &str, iteration: usize) -> SwarmResult<f64> {
        self.schedules
            .get(name)
            .map(|s| s.value_at(iteration, self.max_iterations))
            .ok_or_else(|| SwarmError::ParameterNotFound(name.to_string()))
    }

    /// Values of every registered parameter at `iteration`
    pub fn values(&self, iteration: usize) -> HashMap<String, f64> {
        self.schedules
            .iter()
            .map(|(name, s)| (name.clone(), s.value_at(iteration, self.max_iterations)))
            .collect()
    }

    /// Whether `name` has been registered
    pub fn contains(&self, name: &str) -> bool {
        self.schedules.contains_key(name)
    }

    /// Run length used for progress normalization
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }
}
