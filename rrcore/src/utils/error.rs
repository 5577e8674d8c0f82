use thiserror::Error;

use crate::integral::IntegralKind;

/// Errors raised by the derivation engine.
///
/// Apart from configuration and I/O failures, every variant signals a malformed call from
/// upstream (a programming error). They abort the construction or emission in progress and
/// are never replaced by a default.
#[derive(Debug, Error)]
pub enum RrError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse compilation parameters from '{file}': {source}")]
    ConfigParse {
        source: toml::de::Error,
        file: String,
    },

    #[error("Failed to serialize compilation parameters: {source}")]
    ConfigSerialize { source: toml::ser::Error },

    /// The auxiliary index of an integral is outside the range of its operator.
    #[error(
        "Auxiliary index {aux} is out of range for {kind} integrals (valid range is 0..={max})."
    )]
    InvalidAuxIndex {
        kind: IntegralKind,
        aux: u32,
        max: u32,
    },

    /// A relation was asked to derive a target of a family it does not handle.
    #[error("Relation `{relation}` cannot derive {found} integrals, it expects {expected} integrals.")]
    UnexpectedIntegralKind {
        relation: &'static str,
        expected: IntegralKind,
        found: IntegralKind,
    },

    /// A relation label is already registered by a relation of another type.
    #[error("Relation label `{label}` is already registered by a relation of another type.")]
    LabelConflict { label: String },

    #[error(
        "Child index {index} is out of range for relation `{relation}` which has {count} children."
    )]
    ChildIndexOutOfRange {
        relation: String,
        index: usize,
        count: usize,
    },

    #[error("Relation `{relation}` expects {expected} child symbols but {found} were provided.")]
    SymbolCountMismatch {
        relation: String,
        expected: usize,
        found: usize,
    },

    #[error("The derivation graph contains a cycle through `{label}`.")]
    CyclicDependency { label: String },
}

pub type RrResult<T> = Result<T, RrError>;
