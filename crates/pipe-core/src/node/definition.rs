//! El Nodo: un callable adaptado con identidad, tabla de parámetros y
//! resultado capturado.

use std::fmt;
use std::fs;
use std::path::Path;

use chrono::Utc;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::PipeError;
use crate::model::{NodeResult, NodeStatus, ParamValue, ResolvedParams};
use crate::node::Callable;

/// Unidad ejecutable del pipeline.
///
/// Invariante: el conjunto de claves de `params` queda fijado en la
/// construcción a partir de la firma declarada del callable; después solo
/// mutan los valores. El resultado se puebla en cada ejecución.
pub struct Node {
    identity: String,
    callable: Box<dyn Callable>,
    params: IndexMap<String, ParamValue>,
    result: NodeResult,
}

impl Node {
    pub fn new<C: Callable + 'static>(callable: C) -> Self {
        let identity = callable.name().to_string();
        Self::from_boxed_with_identity(Box::new(callable), identity)
    }

    pub fn with_identity<C: Callable + 'static>(callable: C, identity: impl Into<String>) -> Self {
        Self::from_boxed_with_identity(Box::new(callable), identity.into())
    }

    pub fn from_boxed(callable: Box<dyn Callable>) -> Self {
        let identity = callable.name().to_string();
        Self::from_boxed_with_identity(callable, identity)
    }

    fn from_boxed_with_identity(callable: Box<dyn Callable>, identity: String) -> Self {
        let params = callable.signature()
                             .iter()
                             .map(|spec| (spec.name.clone(), spec.initial_value()))
                             .collect();
        Self { identity,
               callable,
               params,
               result: NodeResult::default() }
    }

    /// Identidad bajo la cual el nodo se registra en un pipeline.
    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// Nombre declarado del callable envuelto (no cambia con renombres).
    pub fn name(&self) -> &str {
        self.callable.name()
    }

    pub fn output_arity(&self) -> usize {
        self.callable.output_arity()
    }

    pub(crate) fn set_identity(&mut self, identity: String) {
        self.identity = identity;
    }

    /// Tabla de parámetros en orden de declaración.
    pub fn params(&self) -> &IndexMap<String, ParamValue> {
        &self.params
    }

    pub(crate) fn params_mut(&mut self) -> impl Iterator<Item = (&String, &mut ParamValue)> {
        self.params.iter_mut()
    }

    /// Acceso directo por nombre.
    pub fn param(&self, name: &str) -> Result<&ParamValue, PipeError> {
        self.params.get(name).ok_or_else(|| PipeError::UnknownParameter { node: self.identity.clone(),
                                                                          param: name.to_string() })
    }

    /// Fija un valor concreto. Falla si el nombre no pertenece a la firma
    /// declarada (las claves son fijas desde la construcción).
    pub fn set_param(&mut self, name: &str, value: impl Into<Value>) -> Result<(), PipeError> {
        self.set_raw(name, ParamValue::Concrete(value.into()))
    }

    pub(crate) fn set_raw(&mut self, name: &str, value: ParamValue) -> Result<(), PipeError> {
        match self.params.get_mut(name) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(PipeError::UnknownParameter { node: self.identity.clone(),
                                                      param: name.to_string() }),
        }
    }

    /// Traduce un índice de slot posicional al nombre declarado.
    pub(crate) fn slot_name(&self, slot: usize) -> Result<String, PipeError> {
        self.params
            .get_index(slot)
            .map(|(name, _)| name.clone())
            .ok_or_else(|| PipeError::SlotOutOfRange { node: self.identity.clone(), slot })
    }

    pub fn result(&self) -> &NodeResult {
        &self.result
    }

    /// Ejecuta el callable con el contenido actual de la tabla. Todos los
    /// parámetros deben estar resueltos a valores concretos; un marcador
    /// pendiente es un error (el pipeline los resuelve antes de llamar aquí).
    ///
    /// Un fallo del callable deja el resultado en su estado no ejecutado,
    /// con `status == Failed` como diagnóstico.
    pub fn execute(&mut self) -> Result<(), PipeError> {
        let mut resolved: IndexMap<String, Value> = IndexMap::with_capacity(self.params.len());
        for (name, value) in &self.params {
            match value {
                ParamValue::Concrete(v) => {
                    resolved.insert(name.clone(), v.clone());
                }
                ParamValue::Pending { .. } => {
                    return Err(PipeError::UnresolvedReference { node: self.identity.clone(),
                                                                param: name.clone() })
                }
            }
        }

        self.result.started_at = Some(Utc::now());
        match self.callable.call(&ResolvedParams::new(resolved)) {
            Ok(outputs) => {
                self.result.values = outputs.into_values();
                self.result.executed = true;
                self.result.status = NodeStatus::FinishedOk;
                self.result.finished_at = Some(Utc::now());
                Ok(())
            }
            Err(e) => {
                self.result = NodeResult { status: NodeStatus::Failed,
                                           finished_at: Some(Utc::now()),
                                           started_at: self.result.started_at,
                                           ..NodeResult::default() };
                Err(PipeError::ExecutionFailure { node: self.identity.clone(),
                                                  message: e.to_string() })
            }
        }
    }

    /// Record serializable del nodo: nombre declarado + snapshot de
    /// parámetros.
    pub fn to_record(&self) -> NodeRecord {
        NodeRecord { name: self.callable.name().to_string(),
                     parameters: self.params
                                     .iter()
                                     .map(|(k, v)| (k.clone(), v.record_value()))
                                     .collect() }
    }

    /// Record del nodo como texto JSON. Un valor que el encoder no pueda
    /// representar se reporta como `NotSerializable`.
    pub fn to_json(&self) -> Result<String, PipeError> {
        serde_json::to_string(&self.to_record()).map_err(|e| PipeError::NotSerializable(e.to_string()))
    }

    /// Persiste el record del nodo en `path`, creando o truncando el
    /// archivo.
    pub fn dump(&self, path: impl AsRef<Path>) -> Result<(), PipeError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

// Un callable crudo se adapta implícitamente al agregarse a un pipeline.
impl<C: Callable + 'static> From<C> for Node {
    fn from(callable: C) -> Self {
        Node::new(callable)
    }
}

/// Forma exportable de un nodo: `{ "name": ..., "Parameters": {...} }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub name: String,
    #[serde(rename = "Parameters")]
    pub parameters: IndexMap<String, Value>,
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
         .field("identity", &self.identity)
         .field("name", &self.callable.name())
         .field("params", &self.params)
         .field("result", &self.result)
         .finish()
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Function: {} [{}]", self.callable.name(), self.identity)?;
        writeln!(f, "\tParameters")?;
        write!(f, "\t----------")?;
        for (name, value) in &self.params {
            match value {
                ParamValue::Concrete(v) => write!(f, "\n\t{name}: {v}")?,
                ParamValue::Pending { provider, output } => {
                    write!(f, "\n\t{name}: <- {provider}[{output}]")?
                }
            }
        }
        Ok(())
    }
}
