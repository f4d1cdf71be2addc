//! Modelo neutral del motor.
//!
//! Los parámetros y las salidas de los nodos son JSON genérico
//! (`serde_json::Value`); el motor no interpreta su semántica. Este módulo
//! define:
//! - `ParamSpec`: declaración explícita de parámetros (nombre + default).
//! - `ParamValue`: valor etiquetado, concreto o referencia diferida.
//! - `ResolvedParams`: vista de solo lectura entregada al callable.
//! - `Outputs` / `NodeResult` / `NodeStatus`: resultado de una ejecución.

pub mod param;
pub mod result;

pub use param::{ParamSpec, ParamValue, ResolvedParams};
pub use result::{NodeResult, NodeStatus, Outputs};
