//! Exportación del pipeline a un record estructurado.
//!
//! El record es un mapa `{ identity: { "name": ..., "Parameters": {...} } }`
//! en orden de registro, serializable a JSON y persistible a archivo. El
//! fingerprint del record se calcula sobre su JSON canónico, salado con
//! `ENGINE_VERSION`.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;

use crate::errors::PipeError;
use crate::hashing::fingerprint_record;
use crate::node::NodeRecord;
use crate::pipeline::Pipe;

impl Pipe {
    /// Snapshot serializable de todos los nodos, en orden de registro.
    pub fn to_record(&self) -> IndexMap<String, NodeRecord> {
        self.iter()
            .map(|(identity, node)| (identity.to_string(), node.to_record()))
            .collect()
    }

    /// Record como texto JSON. Un valor que el encoder no pueda representar
    /// se reporta como `NotSerializable`.
    pub fn to_json(&self) -> Result<String, PipeError> {
        serde_json::to_string(&self.to_record()).map_err(|e| PipeError::NotSerializable(e.to_string()))
    }

    /// Persiste el record en `path`, creando o truncando el archivo. Sin
    /// garantía de escritura atómica ni backup.
    pub fn dump(&self, path: impl AsRef<Path>) -> Result<(), PipeError> {
        let text = self.to_json()?;
        fs::write(path, text)?;
        Ok(())
    }

    /// Fingerprint determinista del record exportado.
    pub fn record_fingerprint(&self) -> Result<String, PipeError> {
        fingerprint_record(&self.to_record())
    }
}
