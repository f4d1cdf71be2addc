//! LoadStack (source stub).
//!
//! Produce un descriptor determinista de stack a partir de la ruta y el
//! canal: `frames = 3 + len(path) % 5`, dimensiones fijas. No toca disco.

use pipe_core::{CallError, Callable, Outputs, ParamSpec, ResolvedParams};
use serde_json::json;

pub struct LoadStack;

impl Callable for LoadStack {
    fn name(&self) -> &str {
        "load_stack"
    }

    fn signature(&self) -> Vec<ParamSpec> {
        vec![ParamSpec::required("path"), ParamSpec::with_default("channel", json!(0))]
    }

    fn call(&self, params: &ResolvedParams) -> Result<Outputs, CallError> {
        let path = params.as_str("path")?;
        let channel = params.as_i64("channel")?;
        let frames = 3 + (path.len() as i64) % 5;
        Ok(Outputs::single(json!({
            "path": path,
            "channel": channel,
            "frames": frames,
            "width": 64,
            "height": 64,
        })))
    }
}
