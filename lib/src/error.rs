//! Error types for decoding, encoding and querying objects.

use crate::term::Identifier;
use oxigraph::io::RdfParseError;
use oxigraph::model::{NamedNode, Term};
use oxigraph::store::StorageError;
use thiserror::Error;

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A value was read expecting one term kind, datatype or range and found another.
    #[error("{subject} {predicate}: expected {expected}, found {actual}")]
    WrongTermKind {
        subject: Identifier,
        predicate: NamedNode,
        actual: Term,
        expected: String,
    },

    /// The resource does not belong to the expected RDF type, directly,
    /// through a known descendant type, or through `rdfs:subClassOf`.
    #[error(
        "{subject} has unexpected RDF type (actual: {}, expected: {expected})",
        display_optional(.actual)
    )]
    UnexpectedType {
        subject: Identifier,
        actual: Option<Term>,
        expected: NamedNode,
    },

    /// A field that requires exactly one value has none.
    #[error("{subject} has no value for required {predicate}")]
    MissingValue {
        subject: Identifier,
        predicate: NamedNode,
    },

    /// An RDF list reachable from `subject`/`predicate` is not a well-formed
    /// `rdf:first`/`rdf:rest` chain terminated by `rdf:nil`.
    #[error("malformed RDF list at {node} (from {subject} {predicate}): {message}")]
    MalformedList {
        subject: Identifier,
        predicate: NamedNode,
        node: Term,
        message: String,
    },

    #[error("invalid identifier {value:?}: {message}")]
    InvalidIdentifier { value: String, message: String },

    /// A point lookup found no matching object.
    #[error("no object with identifier {identifier}")]
    NotFound { identifier: Identifier },

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Parse(#[from] RdfParseError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn display_optional(term: &Option<Term>) -> String {
    match term {
        Some(term) => term.to_string(),
        None => "none".to_string(),
    }
}
