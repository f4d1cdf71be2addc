//! Definiciones relacionadas a Nodos.
//!
//! Un Nodo adapta un callable arbitrario en una unidad auto-descriptiva y
//! re-ejecutable: firma declarada, tabla mutable de parámetros y resultado
//! capturado. Este módulo define:
//! - `Callable`: interfaz neutral que el motor consume.
//! - `FnCallable`: adaptador para closures.
//! - `Node`: el callable adaptado con identidad, parámetros y resultado.

pub mod callable;
pub mod definition;

pub use callable::{CallError, Callable, FnCallable};
pub use definition::{Node, NodeRecord};
