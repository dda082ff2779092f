//! Step-by-step swarm driver for the browser

use std::sync::Arc;

use serde_json::{Map, Value};
use swarmlab::algorithms::AlgorithmSpec;
use swarmlab::error::{SwarmError, SwarmResult};
use swarmlab::fitness::objective::ObjectiveFn;
use swarmlab::operators::local_search::LocalSearch;
use swarmlab::optimizer::{OptimizerBuilder, SwarmRunner};
use wasm_bindgen::prelude::*;

use crate::error::swarm_error_to_js;
use crate::fitness::lookup;

/// Merge a parameter object with the algorithm tag and parse it
pub fn parse_spec(algorithm: &str, params_json: &str) -> SwarmResult<AlgorithmSpec> {
    let mut params: Map<String, Value> = if params_json.trim().is_empty() {
        Map::new()
    } else {
        serde_json::from_str(params_json)?
    };
    params.insert("algorithm".to_string(), Value::from(algorithm));
    Ok(serde_json::from_value(Value::Object(params))?)
}

/// Parse a local-search object; empty input gives the default search
pub fn parse_search(search_json: &str) -> SwarmResult<LocalSearch> {
    if search_json.trim().is_empty() {
        return Ok(LocalSearch::default());
    }
    Ok(serde_json::from_str(search_json)?)
}

/// Build a runner over a named benchmark; `seed == 0` seeds from entropy
pub fn build_runner(
    algorithm: &str,
    benchmark: &str,
    params_json: &str,
    population_size: usize,
    seed: u64,
    polish: Option<LocalSearch>,
) -> SwarmResult<Box<dyn SwarmRunner>> {
    let spec = parse_spec(algorithm, params_json)?;
    let landscape = lookup(benchmark)?;
    let bounds = landscape.bounds();
    let objective: ObjectiveFn = Arc::new(move |x, y| landscape.evaluate(x, y));

    let builder = OptimizerBuilder::new()
        .population_size(population_size)
        .bounds(bounds)
        .objective_fn(objective);
    spec.build(builder, (seed != 0).then_some(seed), polish)
}

/// A running swarm on a benchmark landscape
#[wasm_bindgen]
pub struct SwarmVisualizer {
    runner: Box<dyn SwarmRunner>,
}

impl SwarmVisualizer {
    /// Plain-Rust constructor
    pub fn try_new(
        algorithm: &str,
        benchmark: &str,
        params_json: &str,
        population_size: usize,
        seed: u64,
    ) -> SwarmResult<Self> {
        let runner = build_runner(algorithm, benchmark, params_json, population_size, seed, None)?;
        Ok(Self { runner })
    }

    fn frame_json_at(&self, index: usize) -> SwarmResult<String> {
        let frame = self.runner.frame(index).ok_or_else(|| {
            SwarmError::config(format!(
                "frame {index} out of range (history has {})",
                self.runner.history_len()
            ))
        })?;
        Ok(serde_json::to_string(&frame)?)
    }
}

#[wasm_bindgen]
impl SwarmVisualizer {
    /// Create a swarm
    ///
    /// `params_json` is an object of parameter overrides (may be empty);
    /// a `seed` of 0 seeds from entropy.
    #[wasm_bindgen(constructor)]
    pub fn new(
        algorithm: &str,
        benchmark: &str,
        params_json: &str,
        population_size: usize,
        seed: u64,
    ) -> Result<SwarmVisualizer, JsValue> {
        Self::try_new(algorithm, benchmark, params_json, population_size, seed)
            .map_err(swarm_error_to_js)
    }

    /// Create a swarm whose best agent is refined after every iteration
    ///
    /// `search_json` is a local-search object such as
    /// `{"method": "powell", "iterations": 3, "initial_step": 0.05}`; an
    /// empty string selects the default search.
    #[wasm_bindgen(js_name = withPolish)]
    pub fn with_polish(
        algorithm: &str,
        benchmark: &str,
        params_json: &str,
        population_size: usize,
        seed: u64,
        search_json: &str,
    ) -> Result<SwarmVisualizer, JsValue> {
        parse_search(search_json)
            .and_then(|search| {
                build_runner(
                    algorithm,
                    benchmark,
                    params_json,
                    population_size,
                    seed,
                    Some(search),
                )
            })
            .map(|runner| Self { runner })
            .map_err(swarm_error_to_js)
    }

    /// Identifier of the running algorithm
    #[wasm_bindgen(getter)]
    pub fn algorithm(&self) -> String {
        self.runner.name().to_string()
    }

    /// Run one iteration
    pub fn step(&mut self) {
        self.runner.step();
    }

    /// Run `n` iterations
    pub fn run(&mut self, n: usize) {
        self.runner.run(n);
    }

    /// Re-initialize with a fresh population
    pub fn reset(&mut self) {
        self.runner.reset();
    }

    /// Iterations completed
    #[wasm_bindgen(getter)]
    pub fn iteration(&self) -> usize {
        self.runner.iteration()
    }

    /// Number of recorded frames
    #[wasm_bindgen(js_name = historyLength)]
    pub fn history_length(&self) -> usize {
        self.runner.history_len()
    }

    /// Frame of iteration `index` as JSON
    #[wasm_bindgen(js_name = frameJson)]
    pub fn frame_json(&self, index: usize) -> Result<String, JsValue> {
        self.frame_json_at(index).map_err(swarm_error_to_js)
    }

    /// Latest frame as JSON
    #[wasm_bindgen(js_name = currentFrameJson)]
    pub fn current_frame_json(&self) -> Result<String, JsValue> {
        self.frame_json_at(self.runner.history_len().saturating_sub(1))
            .map_err(swarm_error_to_js)
    }

    /// Full history, per-agent state included, as JSON
    #[wasm_bindgen(js_name = historyJson)]
    pub fn history_json(&self) -> Result<String, JsValue> {
        self.runner.history_json().map_err(swarm_error_to_js)
    }

    /// Best fitness seen so far
    #[wasm_bindgen(js_name = bestFitness)]
    pub fn best_fitness(&self) -> f64 {
        self.runner.best().1
    }

    /// Best position seen so far as `[x, y]`
    #[wasm_bindgen(js_name = bestPosition)]
    pub fn best_position(&self) -> Vec<f64> {
        self.runner.best().0.to_vec()
    }
}
