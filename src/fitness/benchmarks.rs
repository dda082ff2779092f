//! Benchmark fitness functions
//!
//! Standard 2D test landscapes for visualizing swarm behavior. All values are
//! MINIMIZED.

use std::f64::consts::{E, PI};
use std::sync::Arc;

use crate::fitness::objective::ObjectiveFn;
use crate::solution::{Bounds, Position};

/// Trait for benchmark functions
pub trait BenchmarkFunction: Send + Sync {
    /// Name of the benchmark function
    fn name(&self) -> &'static str;

    /// Recommended search bounds
    fn bounds(&self) -> Bounds;

    /// Optimal (minimum) fitness value
    fn optimal_fitness(&self) -> f64;

    /// A global minimizer
    fn optimal_position(&self) -> Position;

    /// Evaluate the function
    fn evaluate(&self, x: f64, y: f64) -> f64;
}

/// Shareable objective closure for a benchmark
pub fn benchmark_objective<B>(benchmark: B) -> ObjectiveFn
where
    B: BenchmarkFunction + 'static,
{
    Arc::new(move |x, y| benchmark.evaluate(x, y))
}

/// Names accepted by [`benchmark_by_name`]
pub const BENCHMARK_NAMES: [&str; 9] = [
    "sphere",
    "rastrigin",
    "rosenbrock",
    "ackley",
    "griewank",
    "himmelblau",
    "booth",
    "beale",
    "schwefel",
];

/// Look up a benchmark by its lowercase name
pub fn benchmark_by_name(name: &str) -> Option<Arc<dyn BenchmarkFunction>> {
    let benchmark: Arc<dyn BenchmarkFunction> = match name.to_ascii_lowercase().as_str() {
        "sphere" => Arc::new(Sphere),
        "rastrigin" => Arc::new(Rastrigin),
        "rosenbrock" => Arc::new(Rosenbrock),
        "ackley" => Arc::new(Ackley::default()),
        "griewank" => Arc::new(Griewank),
        "himmelblau" => Arc::new(Himmelblau),
        "booth" => Arc::new(Booth),
        "beale" => Arc::new(Beale),
        "schwefel" => Arc::new(Schwefel),
        _ => return None,
    };
    Some(benchmark)
}

/// Sphere function: f(x, y) = x² + y²
///
/// Unimodal, convex, separable. Optimum at origin.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sphere;

impl BenchmarkFunction for Sphere {
    fn name(&self) -> &'static str {
        "Sphere"
    }

    fn bounds(&self) -> Bounds {
        Bounds::symmetric(5.12)
    }

    fn optimal_fitness(&self) -> f64 {
        0.0
    }

    fn optimal_position(&self) -> Position {
        [0.0, 0.0]
    }

    fn evaluate(&self, x: f64, y: f64) -> f64 {
        x * x + y * y
    }
}

/// Rastrigin function: f = 20 + Σ(xᵢ² - 10cos(2πxᵢ))
///
/// Highly multimodal with many local minima. Optimum at origin.
#[derive(Clone, Copy, Debug, Default)]
pub struct Rastrigin;

impl BenchmarkFunction for Rastrigin {
    fn name(&self) -> &'static str {
        "Rastrigin"
    }

    fn bounds(&self) -> Bounds {
        Bounds::symmetric(5.12)
    }

    fn optimal_fitness(&self) -> f64 {
        0.0
    }

    fn optimal_position(&self) -> Position {
        [0.0, 0.0]
    }

    fn evaluate(&self, x: f64, y: f64) -> f64 {
        20.0 + [x, y]
            .iter()
            .map(|xi| xi * xi - 10.0 * (2.0 * PI * xi).cos())
            .sum::<f64>()
    }
}

/// Rosenbrock function: f = 100(y - x²)² + (1 - x)²
///
/// Valley structure, non-separable. Optimum at (1, 1).
#[derive(Clone, Copy, Debug, Default)]
pub struct Rosenbrock;

impl BenchmarkFunction for Rosenbrock {
    fn name(&self) -> &'static str {
        "Rosenbrock"
    }

    fn bounds(&self) -> Bounds {
        Bounds::new(-5.0, 10.0)
    }

    fn optimal_fitness(&self) -> f64 {
        0.0
    }

    fn optimal_position(&self) -> Position {
        [1.0, 1.0]
    }

    fn evaluate(&self, x: f64, y: f64) -> f64 {
        100.0 * (y - x * x).powi(2) + (1.0 - x).powi(2)
    }
}

/// Ackley function
///
/// Nearly flat outer region with many local minima. Optimum at origin.
#[derive(Clone, Copy, Debug)]
pub struct Ackley {
    a: f64,
    b: f64,
    c: f64,
}

impl Ackley {
    /// Create with custom parameters
    pub fn with_params(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }
}

impl Default for Ackley {
    fn default() -> Self {
        Self {
            a: 20.0,
            b: 0.2,
            c: 2.0 * PI,
        }
    }
}

impl BenchmarkFunction for Ackley {
    fn name(&self) -> &'static str {
        "Ackley"
    }

    fn bounds(&self) -> Bounds {
        Bounds::symmetric(32.768)
    }

    fn optimal_fitness(&self) -> f64 {
        0.0
    }

    fn optimal_position(&self) -> Position {
        [0.0, 0.0]
    }

    fn evaluate(&self, x: f64, y: f64) -> f64 {
        let sum_sq = x * x + y * y;
        let sum_cos = (self.c * x).cos() + (self.c * y).cos();

        -self.a * (-self.b * (sum_sq / 2.0).sqrt()).exp() - (sum_cos / 2.0).exp() + self.a + E
    }
}

/// Griewank function: f = (x² + y²)/4000 - cos(x)cos(y/√2) + 1
///
/// Many local minima. Optimum at origin.
#[derive(Clone, Copy, Debug, Default)]
pub struct Griewank;

impl BenchmarkFunction for Griewank {
    fn name(&self) -> &'static str {
        "Griewank"
    }

    fn bounds(&self) -> Bounds {
        Bounds::symmetric(600.0)
    }

    fn optimal_fitness(&self) -> f64 {
        0.0
    }

    fn optimal_position(&self) -> Position {
        [0.0, 0.0]
    }

    fn evaluate(&self, x: f64, y: f64) -> f64 {
        (x * x + y * y) / 4000.0 - x.cos() * (y / 2.0_f64.sqrt()).cos() + 1.0
    }
}

/// Himmelblau function: f = (x² + y - 11)² + (x + y² - 7)²
///
/// Four identical minima; (3, 2) is reported as the optimum.
#[derive(Clone, Copy, Debug, Default)]
pub struct Himmelblau;

impl BenchmarkFunction for Himmelblau {
    fn name(&self) -> &'static str {
        "Himmelblau"
    }

    fn bounds(&self) -> Bounds {
        Bounds::symmetric(5.0)
    }

    fn optimal_fitness(&self) -> f64 {
        0.0
    }

    fn optimal_position(&self) -> Position {
        [3.0, 2.0]
    }

    fn evaluate(&self, x: f64, y: f64) -> f64 {
        (x * x + y - 11.0).powi(2) + (x + y * y - 7.0).powi(2)
    }
}

/// Booth function: f = (x + 2y - 7)² + (2x + y - 5)²
#[derive(Clone, Copy, Debug, Default)]
pub struct Booth;

impl BenchmarkFunction for Booth {
    fn name(&self) -> &'static str {
        "Booth"
    }

    fn bounds(&self) -> Bounds {
        Bounds::symmetric(10.0)
    }

    fn optimal_fitness(&self) -> f64 {
        0.0
    }

    fn optimal_position(&self) -> Position {
        [1.0, 3.0]
    }

    fn evaluate(&self, x: f64, y: f64) -> f64 {
        (x + 2.0 * y - 7.0).powi(2) + (2.0 * x + y - 5.0).powi(2)
    }
}

/// Beale function
///
/// Sharp peaks at the corners of the domain. Optimum at (3, 0.5).
#[derive(Clone, Copy, Debug, Default)]
pub struct Beale;

impl BenchmarkFunction for Beale {
    fn name(&self) -> &'static str {
        "Beale"
    }

    fn bounds(&self) -> Bounds {
        Bounds::symmetric(4.5)
    }

    fn optimal_fitness(&self) -> f64 {
        0.0
    }

    fn optimal_position(&self) -> Position {
        [3.0, 0.5]
    }

    fn evaluate(&self, x: f64, y: f64) -> f64 {
        (1.5 - x + x * y).powi(2)
            + (2.25 - x + x * y * y).powi(2)
            + (2.625 - x + x * y.powi(3)).powi(2)
    }
}

/// Schwefel function
///
/// Deceptive - global optimum far from local optima.
#[derive(Clone, Copy, Debug, Default)]
pub struct Schwefel;

impl BenchmarkFunction for Schwefel {
    fn name(&self) -> &'static str {
        "Schwefel"
    }

    fn bounds(&self) -> Bounds {
        Bounds::symmetric(500.0)
    }

    fn optimal_fitness(&self) -> f64 {
        0.0
    }

    fn optimal_position(&self) -> Position {
        [420.968_746, 420.968_746]
    }

    fn evaluate(&self, x: f64, y: f64) -> f64 {
        418.982_887_272_433_9 * 2.0
            - [x, y]
                .iter()
                .map(|xi| xi * xi.abs().sqrt().sin())
                .sum::<f64>()
    }
}
