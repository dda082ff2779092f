//! Benchmark landscapes exposed to JavaScript

use serde::Serialize;
use swarmlab::error::{SwarmError, SwarmResult};
use swarmlab::fitness::benchmarks::{benchmark_by_name, BenchmarkFunction, BENCHMARK_NAMES};
use swarmlab::solution::Position;
use wasm_bindgen::prelude::*;

use crate::error::swarm_error_to_js;

/// Description of a benchmark for the landscape renderer
#[derive(Clone, Debug, Serialize)]
pub struct BenchmarkInfo {
    pub name: &'static str,
    pub min: f64,
    pub max: f64,
    pub optimal_position: Position,
    pub optimal_fitness: f64,
}

impl BenchmarkInfo {
    fn of(benchmark: &dyn BenchmarkFunction) -> Self {
        let bounds = benchmark.bounds();
        Self {
            name: benchmark.name(),
            min: bounds.min,
            max: bounds.max,
            optimal_position: benchmark.optimal_position(),
            optimal_fitness: benchmark.optimal_fitness(),
        }
    }
}

pub(crate) fn lookup(name: &str) -> SwarmResult<std::sync::Arc<dyn BenchmarkFunction>> {
    benchmark_by_name(name).ok_or_else(|| SwarmError::config(format!("unknown benchmark: {name}")))
}

/// Names of all available benchmarks as a JSON array
#[wasm_bindgen(js_name = benchmarkNames)]
pub fn benchmark_names() -> String {
    serde_json::to_string(&BENCHMARK_NAMES).unwrap_or_else(|_| "[]".to_string())
}

/// Evaluate a benchmark at a point
#[wasm_bindgen(js_name = evaluateBenchmark)]
pub fn evaluate_benchmark(name: &str, x: f64, y: f64) -> Result<f64, JsValue> {
    lookup(name)
        .map(|b| b.evaluate(x, y))
        .map_err(swarm_error_to_js)
}

/// Bounds and optimum of a benchmark as JSON
#[wasm_bindgen(js_name = benchmarkInfo)]
pub fn benchmark_info(name: &str) -> Result<String, JsValue> {
    benchmark_info_json(name).map_err(swarm_error_to_js)
}

pub(crate) fn benchmark_info_json(name: &str) -> SwarmResult<String> {
    let benchmark = lookup(name)?;
    Ok(serde_json::to_string(&BenchmarkInfo::of(benchmark.as_ref()))?)
}

/// Sample a benchmark on a `resolution × resolution` grid over its bounds
///
/// Row-major, `y` varying slowest; used to draw the contour background.
#[wasm_bindgen(js_name = sampleLandscape)]
pub fn sample_landscape(name: &str, resolution: usize) -> Result<Vec<f64>, JsValue> {
    landscape_grid(name, resolution).map_err(swarm_error_to_js)
}

pub(crate) fn landscape_grid(name: &str, resolution: usize) -> SwarmResult<Vec<f64>> {
    if resolution < 2 {
        return Err(SwarmError::config("resolution must be at least 2"));
    }
    let benchmark = lookup(name)?;
    let bounds = benchmark.bounds();
    let cell = bounds.range() / (resolution - 1) as f64;

    let mut grid = Vec::with_capacity(resolution * resolution);
    for row in 0..resolution {
        let y = bounds.min + row as f64 * cell;
        for col in 0..resolution {
            let x = bounds.min + col as f64 * cell;
            grid.push(benchmark.evaluate(x, y));
        }
    }
    Ok(grid)
}
