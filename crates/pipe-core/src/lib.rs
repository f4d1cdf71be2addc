//! pipe-core: motor lineal de pipelines de funciones adaptadas.
//!
//! Un `Pipe` es un registro ordenado de nodos (callables adaptados con
//! parámetros declarados) que se ejecutan en orden de inserción, con
//! cableado hacia adelante: la salida de un nodo anterior se resuelve como
//! parámetro de un nodo posterior inmediatamente antes de ejecutarlo. El
//! pipeline completo se exporta a un record JSON para trazabilidad.

pub mod constants;
pub mod errors;
pub mod hashing;
pub mod model;
pub mod node;
pub mod pipeline;

pub use errors::PipeError;
pub use model::{NodeResult, NodeStatus, Outputs, ParamSpec, ParamValue, ResolvedParams};
pub use node::{CallError, Callable, FnCallable, Node, NodeRecord};
pub use pipeline::Pipe;
