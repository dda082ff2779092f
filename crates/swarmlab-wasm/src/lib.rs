//! WebAssembly bindings for swarmlab
//!
//! JavaScript-friendly wrappers for driving the swarm optimizers from a
//! browser visualizer: pick an algorithm and a benchmark landscape, step the
//! swarm and read each iteration back as JSON.
//!
//! # Example (JavaScript)
//!
//! ```javascript
//! import init, { SwarmVisualizer, algorithmsJson } from 'swarmlab-wasm';
//!
//! await init();
//!
//! const algorithms = JSON.parse(algorithmsJson());
//! const swarm = new SwarmVisualizer("chaotic_bat", "ackley", "{\"levy_beta\": 1.3}", 30, 42);
//! swarm.run(100);
//! const frame = JSON.parse(swarm.currentFrameJson());
//! console.log("Best fitness:", swarm.bestFitness());
//! ```

use wasm_bindgen::prelude::*;

mod error;
mod fitness;
mod registry;
mod visualizer;

pub use error::*;
pub use fitness::*;
pub use registry::*;
pub use visualizer::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the library version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
