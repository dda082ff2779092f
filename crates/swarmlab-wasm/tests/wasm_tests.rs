//! WASM integration tests for swarmlab-wasm
//!
//! Run with: wasm-pack test --headless --chrome

#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

use swarmlab_wasm::{
    algorithms_json, benchmark_names, evaluate_benchmark, version, SwarmVisualizer,
};

// ============================================================================
// Basic Functionality Tests
// ============================================================================

#[wasm_bindgen_test]
fn test_version() {
    let v = version();
    assert!(!v.is_empty());
    assert!(v.starts_with("0."));
}

#[wasm_bindgen_test]
fn test_catalogues() {
    assert!(algorithms_json().contains("\"id\":\"chaotic_bat\""));
    assert!(benchmark_names().contains("rastrigin"));
}

#[wasm_bindgen_test]
fn test_evaluate_benchmark() {
    let value = evaluate_benchmark("sphere", 3.0, 4.0).expect("Should evaluate");
    assert!((value - 25.0).abs() < 1e-12);
    assert!(evaluate_benchmark("teapot", 0.0, 0.0).is_err());
}

// ============================================================================
// SwarmVisualizer Tests
// ============================================================================

#[wasm_bindgen_test]
fn test_visualizer_entropy_seed() {
    let mut viz = SwarmVisualizer::new("standard_fish", "himmelblau", "", 20, 0)
        .expect("Should create visualizer");
    viz.run(10);
    assert_eq!(viz.history_length(), 11);
    let frame = viz.current_frame_json().expect("Should serialize frame");
    assert!(frame.contains("\"iteration\":10"));
}

#[wasm_bindgen_test]
fn test_visualizer_with_overrides() {
    let mut viz = SwarmVisualizer::new("abc_bat", "rastrigin", "{\"limit\": 3}", 25, 42)
        .expect("Should create visualizer");
    let start = viz.best_fitness();
    viz.run(50);
    assert!(viz.best_fitness() <= start);
    assert_eq!(viz.best_position().len(), 2);
    assert!(viz.history_json().expect("Should serialize").contains("trials"));
}

#[wasm_bindgen_test]
fn test_visualizer_rejects_bad_params() {
    assert!(SwarmVisualizer::new("sa_bat", "sphere", "{\"cooling_rate\": 2.0}", 10, 1).is_err());
}

#[wasm_bindgen_test]
fn test_visualizer_with_polish() {
    let mut viz = SwarmVisualizer::with_polish("standard_bat", "sphere", "{}", 10, 3, "")
        .expect("Should create visualizer");
    viz.run(5);
    assert!(viz.best_fitness() < 1e-3);
}
