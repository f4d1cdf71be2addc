//! Constantes del motor.
//!
//! `ENGINE_VERSION` participa en el cálculo del fingerprint del record
//! exportado: un cambio de versión del motor invalida los fingerprints
//! aunque el pipeline no haya cambiado.

/// Versión lógica del motor. Mantener estable mientras no haya cambios
/// incompatibles en el formato del record.
pub const ENGINE_VERSION: &str = "P1.0";
