//! Algorithm catalogue for the parameter panel
//!
//! Every algorithm the visualizer can run is listed with the sliders (or
//! dropdowns) the UI should render for it. Defaults mirror the core crate's
//! parameter defaults so an untouched panel reproduces `default_for(id)`.

use serde::Serialize;
use serde_json::Value;
use swarmlab::algorithms::ALGORITHM_IDS;
use wasm_bindgen::prelude::*;

/// Widget kind and range of a parameter
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParamKind {
    Float { min: f64, max: f64, step: f64 },
    Integer { min: u64, max: u64, step: u64 },
    Choice { options: Vec<&'static str> },
}

/// A tunable parameter
#[derive(Clone, Debug, Serialize)]
pub struct ParamInfo {
    /// JSON field name accepted by the algorithm
    pub name: &'static str,
    pub label: &'static str,
    #[serde(flatten)]
    pub kind: ParamKind,
    pub default: Value,
}

impl ParamInfo {
    fn float(
        name: &'static str,
        label: &'static str,
        range: (f64, f64, f64),
        default: f64,
    ) -> Self {
        Self {
            name,
            label,
            kind: ParamKind::Float {
                min: range.0,
                max: range.1,
                step: range.2,
            },
            default: Value::from(default),
        }
    }

    fn integer(
        name: &'static str,
        label: &'static str,
        range: (u64, u64, u64),
        default: u64,
    ) -> Self {
        Self {
            name,
            label,
            kind: ParamKind::Integer {
                min: range.0,
                max: range.1,
                step: range.2,
            },
            default: Value::from(default),
        }
    }

    fn choice(
        name: &'static str,
        label: &'static str,
        options: &[&'static str],
        default: &'static str,
    ) -> Self {
        Self {
            name,
            label,
            kind: ParamKind::Choice {
                options: options.to_vec(),
            },
            default: Value::from(default),
        }
    }
}

/// Catalogue entry for one algorithm
#[derive(Clone, Debug, Serialize)]
pub struct AlgorithmInfo {
    pub id: &'static str,
    pub display_name: &'static str,
    /// `bat`, `hybrid` or `fish`
    pub family: &'static str,
    pub description: &'static str,
    pub params: Vec<ParamInfo>,
}

fn bat_params() -> Vec<ParamInfo> {
    vec![
        ParamInfo::float("f_min", "Min frequency", (0.0, 2.0, 0.1), 0.0),
        ParamInfo::float("f_max", "Max frequency", (0.0, 5.0, 0.1), 2.0),
        ParamInfo::float("initial_loudness", "Initial loudness", (0.0, 1.0, 0.05), 1.0),
        ParamInfo::float("initial_pulse_rate", "Initial pulse rate", (0.0, 1.0, 0.05), 0.5),
        ParamInfo::float("alpha", "Loudness decay", (0.5, 1.0, 0.01), 0.9),
        ParamInfo::float("gamma", "Pulse growth", (0.0, 2.0, 0.05), 0.9),
    ]
}

fn fish_params(with_crowding: bool) -> Vec<ParamInfo> {
    let mut params = vec![
        ParamInfo::float("visual", "Visual range", (0.1, 10.0, 0.1), 2.5),
        ParamInfo::float("step", "Step size", (0.01, 3.0, 0.01), 0.5),
    ];
    if with_crowding {
        params.push(ParamInfo::float("crowding", "Crowding factor", (0.05, 1.0, 0.01), 0.618));
    }
    params.push(ParamInfo::integer("try_number", "Prey attempts", (1, 20, 1), 5));
    params
}

fn with(mut base: Vec<ParamInfo>, extra: Vec<ParamInfo>) -> Vec<ParamInfo> {
    base.extend(extra);
    base
}

/// Catalogue entry for `id`
pub fn algorithm_info(id: &str) -> Option<AlgorithmInfo> {
    let info = match id {
        "standard_bat" => AlgorithmInfo {
            id: "standard_bat",
            display_name: "Bat Algorithm",
            family: "bat",
            description: "Echolocation-driven search with loudness and pulse-rate schedules",
            params: bat_params(),
        },
        "adaptive_bat" => AlgorithmInfo {
            id: "adaptive_bat",
            display_name: "Adaptive Bat",
            family: "bat",
            description: "Frequency range shrinks as the swarm loses diversity",
            params: with(
                bat_params(),
                vec![ParamInfo::float(
                    "diversity_damping",
                    "Diversity damping",
                    (0.0, 50.0, 1.0),
                    10.0,
                )],
            ),
        },
        "chaotic_bat" => AlgorithmInfo {
            id: "chaotic_bat",
            display_name: "Chaotic Bat",
            family: "bat",
            description: "Chaotic-map frequencies with Lévy-flight local walks",
            params: with(
                bat_params(),
                vec![
                    ParamInfo::choice(
                        "chaos_map",
                        "Chaotic map",
                        &["logistic", "tent", "sine", "circle", "gauss"],
                        "logistic",
                    ),
                    ParamInfo::float("chaos_seed", "Chaos seed", (0.01, 0.99, 0.01), 0.7),
                    ParamInfo::float("levy_beta", "Lévy exponent", (1.0, 2.0, 0.05), 1.5),
                    ParamInfo::float("levy_scale", "Lévy scale", (0.0, 0.2, 0.005), 0.01),
                ],
            ),
        },
        "self_adaptive_bat" => AlgorithmInfo {
            id: "self_adaptive_bat",
            display_name: "Self-Adaptive Bat",
            family: "bat",
            description: "Loudness and pulse rate follow the run's progress",
            params: vec![
                ParamInfo::integer("max_iterations", "Planned iterations", (10, 1000, 10), 100),
                ParamInfo::float("initial_loudness", "Initial loudness", (0.0, 1.0, 0.05), 1.0),
            ],
        },
        "de_bat" => AlgorithmInfo {
            id: "de_bat",
            display_name: "Bat + Differential Evolution",
            family: "hybrid",
            description: "Velocity moves blended with DE/rand/1/bin trial vectors",
            params: with(
                bat_params(),
                vec![
                    ParamInfo::float(
                        "differential_weight",
                        "Differential weight",
                        (0.0, 2.0, 0.05),
                        0.5,
                    ),
                    ParamInfo::float("crossover_rate", "Crossover rate", (0.0, 1.0, 0.05), 0.9),
                ],
            ),
        },
        "pso_bat" => AlgorithmInfo {
            id: "pso_bat",
            display_name: "Bat + Particle Swarm",
            family: "hybrid",
            description: "PSO velocity with personal bests plus a frequency pull",
            params: with(
                bat_params(),
                vec![
                    ParamInfo::float("inertia", "Inertia", (0.0, 1.2, 0.05), 0.7),
                    ParamInfo::float("cognitive", "Cognitive", (0.0, 3.0, 0.1), 1.5),
                    ParamInfo::float("social", "Social", (0.0, 3.0, 0.1), 1.5),
                ],
            ),
        },
        "sa_bat" => AlgorithmInfo {
            id: "sa_bat",
            display_name: "Bat + Simulated Annealing",
            family: "hybrid",
            description: "Metropolis acceptance under a cooling temperature",
            params: with(
                bat_params(),
                vec![
                    ParamInfo::float(
                        "initial_temperature",
                        "Initial temperature",
                        (1.0, 1000.0, 1.0),
                        100.0,
                    ),
                    ParamInfo::float("cooling_rate", "Cooling rate", (0.5, 1.0, 0.005), 0.95),
                ],
            ),
        },
        "hs_bat" => AlgorithmInfo {
            id: "hs_bat",
            display_name: "Bat + Harmony Search",
            family: "hybrid",
            description: "Harmony improvisation replaces the local walk",
            params: with(
                bat_params(),
                vec![
                    ParamInfo::float("hmcr", "Memory consideration", (0.0, 1.0, 0.01), 0.9),
                    ParamInfo::float("par", "Pitch adjustment", (0.0, 1.0, 0.01), 0.3),
                    ParamInfo::float("bandwidth", "Bandwidth", (0.0, 1.0, 0.01), 0.1),
                ],
            ),
        },
        "abc_bat" => AlgorithmInfo {
            id: "abc_bat",
            display_name: "Bat + Artificial Bee Colony",
            family: "hybrid",
            description: "Employed-bee moves and scouts for stalled bats",
            params: with(
                bat_params(),
                vec![ParamInfo::integer("limit", "Abandonment limit", (1, 50, 1), 10)],
            ),
        },
        "standard_fish" => AlgorithmInfo {
            id: "standard_fish",
            display_name: "Fish Swarm",
            family: "fish",
            description: "Swarming, following and preying with a crowding limit",
            params: fish_params(true),
        },
        "fast_fish" => AlgorithmInfo {
            id: "fast_fish",
            display_name: "Fast Fish Swarm",
            family: "fish",
            description: "Fish swarm with a geometrically shrinking step",
            params: with(
                fish_params(true),
                vec![
                    ParamInfo::float("alpha", "Step decay", (0.5, 1.0, 0.01), 0.95),
                    ParamInfo::float("min_step", "Minimum step", (0.0, 1.0, 0.005), 0.01),
                ],
            ),
        },
        "modified_fish" => AlgorithmInfo {
            id: "modified_fish",
            display_name: "Modified Fish Swarm",
            family: "fish",
            description: "Crowding factor rises over time to favour exploitation",
            params: fish_params(false),
        },
        _ => return None,
    };
    Some(info)
}

/// The full catalogue, in [`ALGORITHM_IDS`] order
pub fn algorithms() -> Vec<AlgorithmInfo> {
    ALGORITHM_IDS.iter().filter_map(|id| algorithm_info(id)).collect()
}

/// The full catalogue as JSON
#[wasm_bindgen(js_name = algorithmsJson)]
pub fn algorithms_json() -> String {
    serde_json::to_string(&algorithms()).unwrap_or_else(|_| "[]".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use swarmlab::algorithms::AlgorithmSpec;

    #[test]
    fn test_every_algorithm_is_listed() {
        let list = algorithms();
        assert_eq!(list.len(), ALGORITHM_IDS.len());
        assert!(algorithm_info("warp_drive").is_none());
    }

    #[test]
    fn test_defaults_match_core_defaults() {
        for info in algorithms() {
            let spec = AlgorithmSpec::default_for(info.id).unwrap();
            let core = serde_json::to_value(&spec).unwrap();
            for param in &info.params {
                let expected = &core[param.name];
                assert!(!expected.is_null(), "{} has no field {}", info.id, param.name);
                match (&param.default, expected) {
                    (Value::String(a), Value::String(b)) => assert_eq!(a, b),
                    (a, b) => {
                        let (a, b) = (a.as_f64().unwrap(), b.as_f64().unwrap());
                        assert!((a - b).abs() < 1e-12, "{}.{}", info.id, param.name);
                    }
                }
            }
        }
    }

    #[test]
    fn test_integer_params_serialize_as_integers() {
        let json: Value = serde_json::from_str(&algorithms_json()).unwrap();
        let abc = json
            .as_array()
            .unwrap()
            .iter()
            .find(|a| a["id"] == "abc_bat")
            .unwrap();
        let limit = &abc["params"].as_array().unwrap().last().unwrap();
        assert_eq!(limit["kind"], "integer");
        assert!(limit["default"].is_u64());
    }

    #[test]
    fn test_defaults_are_within_ranges() {
        for info in algorithms() {
            for param in &info.params {
                match &param.kind {
                    ParamKind::Float { min, max, .. } => {
                        let d = param.default.as_f64().unwrap();
                        assert!(*min <= d && d <= *max, "{}.{}", info.id, param.name);
                    }
                    ParamKind::Integer { min, max, .. } => {
                        let d = param.default.as_u64().unwrap();
                        assert!(*min <= d && d <= *max, "{}.{}", info.id, param.name);
                    }
                    ParamKind::Choice { options } => {
                        assert!(options.contains(&param.default.as_str().unwrap()));
                    }
                }
            }
        }
    }
}
