//! SegmentStack (transform stub).
//!
//! Genera una región determinista por frame del stack de entrada: el área
//! de la región `i` es `100 * (i + 1) * threshold`. Aridad de salida 2:
//! la lista de regiones y el conteo.

use pipe_core::{CallError, Callable, Outputs, ParamSpec, ResolvedParams};
use serde_json::json;

pub struct SegmentStack;

impl Callable for SegmentStack {
    fn name(&self) -> &str {
        "segment_stack"
    }

    fn signature(&self) -> Vec<ParamSpec> {
        vec![ParamSpec::required("stack"), ParamSpec::with_default("threshold", json!(0.5))]
    }

    fn output_arity(&self) -> usize {
        2
    }

    fn call(&self, params: &ResolvedParams) -> Result<Outputs, CallError> {
        let stack = params.require("stack")?;
        let frames = stack.get("frames")
                          .and_then(|v| v.as_i64())
                          .ok_or("parameter 'stack' has no frame count")?;
        let threshold = params.as_f64("threshold")?;

        let regions: Vec<_> = (0..frames).map(|i| {
                                             json!({
                                                 "id": i,
                                                 "area": 100.0 * (i + 1) as f64 * threshold,
                                             })
                                         })
                                         .collect();
        Ok(Outputs::many(vec![json!(regions), json!(frames)]))
    }
}
