//! Errores del motor de pipelines (superficie completa, sin reintentos).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipeError {
    #[error("identity already taken: {0}")] DuplicateIdentity(String),
    #[error("unknown identity: {0}")] UnknownIdentity(String),
    #[error("provider '{provider}' must precede subscriber '{subscriber}'")] OrderingViolation { provider: String, subscriber: String },
    #[error("invalid operand for append-and-connect: {0}")] InvalidOperand(String),
    #[error("unknown parameter '{param}' on node '{node}'")] UnknownParameter { node: String, param: String },
    #[error("parameter slot {slot} out of range for node '{node}'")] SlotOutOfRange { node: String, slot: usize },
    #[error("output {output} out of range for provider '{provider}'")] OutputOutOfRange { provider: String, output: usize },
    #[error("unresolved reference left in node '{node}' parameter '{param}'")] UnresolvedReference { node: String, param: String },
    #[error("node '{node}' failed: {message}")] ExecutionFailure { node: String, message: String },
    #[error("record not serializable: {0}")] NotSerializable(String),
    #[error("io: {0}")] Io(#[from] std::io::Error),
}
