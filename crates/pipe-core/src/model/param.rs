//! Parámetros declarados y su tabla de valores.
//!
//! La firma de un callable se declara de forma explícita como una lista
//! ordenada de `ParamSpec` (nombre + default opcional); no hay reflexión en
//! tiempo de ejecución. El orden de declaración es semántico: el cableado
//! entre nodos direcciona parámetros por índice de slot.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::node::CallError;

/// Declaración de un parámetro: nombre y default opcional.
///
/// Un parámetro sin default se inicializa en `null` dentro de la tabla del
/// nodo, igual que un argumento sin valor declarado.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamSpec {
    pub name: String,
    pub default: Option<Value>,
}

impl ParamSpec {
    pub fn required(name: impl Into<String>) -> Self {
        Self { name: name.into(), default: None }
    }

    pub fn with_default(name: impl Into<String>, default: Value) -> Self {
        Self { name: name.into(), default: Some(default) }
    }

    /// Valor inicial para la tabla de parámetros del nodo.
    pub(crate) fn initial_value(&self) -> ParamValue {
        ParamValue::Concrete(self.default.clone().unwrap_or(Value::Null))
    }
}

/// Valor actual de un parámetro en la tabla de un nodo.
///
/// `Pending` es el marcador de referencia diferida: registra qué salida de
/// qué proveedor debe resolverse inmediatamente antes de ejecutar el nodo
/// suscriptor. Es dato opaco, nunca una expresión evaluable.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Concrete(Value),
    Pending { provider: String, output: usize },
}

impl ParamValue {
    pub fn is_pending(&self) -> bool {
        matches!(self, ParamValue::Pending { .. })
    }

    /// Forma serializable para el record exportado. Un marcador pendiente se
    /// exporta como objeto `{"$pending": ...}` en lugar de un valor concreto.
    pub fn record_value(&self) -> Value {
        match self {
            ParamValue::Concrete(v) => v.clone(),
            ParamValue::Pending { provider, output } => {
                json!({ "$pending": { "provider": provider, "output": output } })
            }
        }
    }
}

/// Parámetros ya resueltos, en orden de declaración, entregados a
/// `Callable::call`. Todos los valores son concretos.
#[derive(Debug, Clone, Default)]
pub struct ResolvedParams {
    inner: IndexMap<String, Value>,
}

impl ResolvedParams {
    pub fn new(inner: IndexMap<String, Value>) -> Self {
        Self { inner }
    }

    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, Value)>) -> Self {
        Self { inner: pairs.into_iter().collect() }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.inner.get(name)
    }

    pub fn require(&self, name: &str) -> Result<&Value, CallError> {
        self.inner
            .get(name)
            .ok_or_else(|| format!("missing parameter '{name}'").into())
    }

    pub fn as_str(&self, name: &str) -> Result<&str, CallError> {
        self.require(name)?
            .as_str()
            .ok_or_else(|| format!("parameter '{name}' is not a string").into())
    }

    pub fn as_i64(&self, name: &str) -> Result<i64, CallError> {
        self.require(name)?
            .as_i64()
            .ok_or_else(|| format!("parameter '{name}' is not an integer").into())
    }

    pub fn as_f64(&self, name: &str) -> Result<f64, CallError> {
        self.require(name)?
            .as_f64()
            .ok_or_else(|| format!("parameter '{name}' is not a number").into())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.inner.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
