//! Error handling for WASM bindings

use swarmlab::error::SwarmError;
use wasm_bindgen::prelude::*;

/// Short type tag exposed to JavaScript
pub fn error_type(err: &SwarmError) -> &'static str {
    match err {
        SwarmError::Configuration(_) => "ConfigError",
        SwarmError::ParameterNotFound(_) => "ParameterError",
        SwarmError::DimensionMismatch { .. } => "DimensionError",
        SwarmError::InvalidStructure(_) => "StructureError",
        SwarmError::Serialization(_) => "SerializationError",
    }
}

/// Convert a swarm error to a JsValue
pub fn swarm_error_to_js(err: SwarmError) -> JsValue {
    let obj = js_sys::Object::new();
    let _ = js_sys::Reflect::set(&obj, &"type".into(), &JsValue::from_str(error_type(&err)));
    let _ = js_sys::Reflect::set(
        &obj,
        &"message".into(),
        &JsValue::from_str(&err.to_string()),
    );
    obj.into()
}

/// Create a JS error from a string message
pub fn string_error(msg: &str) -> JsValue {
    JsValue::from_str(msg)
}
