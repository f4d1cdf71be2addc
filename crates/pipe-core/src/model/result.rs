//! Resultado de la ejecución de un nodo.

use chrono::{DateTime, Utc};
use serde_json::Value;

/// Salidas normalizadas de un callable: secuencia ordenada de al menos un
/// elemento. Un callable que no produce nada se normaliza a `[null]` para
/// que los consumidores siempre vean una secuencia no vacía.
#[derive(Debug, Clone, PartialEq)]
pub struct Outputs(Vec<Value>);

impl Outputs {
    pub fn single(value: Value) -> Self {
        Self(vec![value])
    }

    pub fn many(values: Vec<Value>) -> Self {
        if values.is_empty() {
            Self(vec![Value::Null])
        } else {
            Self(values)
        }
    }

    pub fn into_values(self) -> Vec<Value> {
        self.0
    }

    pub fn values(&self) -> &[Value] {
        &self.0
    }
}

impl From<Value> for Outputs {
    fn from(value: Value) -> Self {
        Outputs::single(value)
    }
}

impl From<Vec<Value>> for Outputs {
    fn from(values: Vec<Value>) -> Self {
        Outputs::many(values)
    }
}

/// Estado de un nodo respecto a su última ejecución.
///
/// Transiciones válidas: `Pending -> FinishedOk`, `Pending -> Failed`, y de
/// vuelta a cualquiera de los dos en una re-ejecución. La ejecución es
/// síncrona, por lo que no hay estado `Running` observable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeStatus {
    Pending,
    FinishedOk,
    Failed,
}

/// Resultado capturado de un nodo. Antes de ejecutar: `values == [null]`,
/// `executed == false`. Los timestamps son metadatos de diagnóstico y no
/// entran en el record exportado.
#[derive(Debug, Clone)]
pub struct NodeResult {
    pub values: Vec<Value>,
    pub executed: bool,
    pub status: NodeStatus,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl Default for NodeResult {
    fn default() -> Self {
        Self { values: vec![Value::Null],
               executed: false,
               status: NodeStatus::Pending,
               started_at: None,
               finished_at: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn outputs_normalize_empty_to_null_singleton() {
        assert_eq!(Outputs::many(vec![]).values(), &[Value::Null]);
        assert_eq!(Outputs::from(json!(3)).values(), &[json!(3)]);
        assert_eq!(Outputs::from(vec![json!(1), json!(2)]).values(), &[json!(1), json!(2)]);
    }

    #[test]
    fn fresh_result_is_unexecuted_null() {
        let r = NodeResult::default();
        assert!(!r.executed);
        assert_eq!(r.status, NodeStatus::Pending);
        assert_eq!(r.values, vec![Value::Null]);
    }
}
