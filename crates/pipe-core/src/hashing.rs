//! Huella del record exportado.
//!
//! El record se reescribe en forma canónica (claves de objeto ordenadas,
//! sin whitespace) y se digiere con blake3. Dos pipelines con el mismo
//! armado producen la misma huella sin importar el orden de inserción de
//! los objetos intermedios.

use std::fmt::Write as _;

use indexmap::IndexMap;
use serde_json::{json, Value};

use crate::constants::ENGINE_VERSION;
use crate::errors::PipeError;
use crate::node::NodeRecord;

/// Fingerprint hex determinista de un record `{identity: {name, Parameters}}`,
/// salado con `ENGINE_VERSION` para que cambios de motor invaliden huellas.
pub fn fingerprint_record(record: &IndexMap<String, NodeRecord>) -> Result<String, PipeError> {
    let record = serde_json::to_value(record).map_err(|e| PipeError::NotSerializable(e.to_string()))?;
    let salted = json!({ "engine_version": ENGINE_VERSION, "record": record });

    let mut canonical = String::new();
    write_canonical(&salted, &mut canonical);
    Ok(blake3::hash(canonical.as_bytes()).to_hex().to_string())
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(true) => out.push_str("true"),
        Value::Bool(false) => out.push_str("false"),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::String(s) => write_escaped(s, out),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by_key(|(k, _)| *k);
            out.push('{');
            for (i, (key, item)) in entries.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_escaped(key, out);
                out.push(':');
                write_canonical(item, out);
            }
            out.push('}');
        }
    }
}

fn write_escaped(s: &str, out: &mut String) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
}
