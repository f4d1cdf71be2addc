//! pipe-adapters: callables stub deterministas para pipelines de análisis
//! de stacks de imágenes.
//!
//! El motor trata los callables como opacos; estos adaptadores existen para
//! demos y tests de integración. Son stubs: producen valores deterministas
//! derivados de sus parámetros, sin procesar imágenes reales.

pub mod callables;

pub use callables::{LoadStack, MeasureRegions, SegmentStack};
