//! The contract every decodable object kind implements.

use crate::error::Result;
use crate::filter::RecordFilter;
use crate::resource::Resource;
use crate::store::{TripleSink, TripleSource};
use crate::term::Identifier;
use oxigraph::model::NamedNodeRef;
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FromRdfOptions {
    /// Skip the `rdf:type` check. Set by a level that has already verified the
    /// type before it delegates to its parent level.
    pub ignore_rdf_type: bool,
}

impl FromRdfOptions {
    pub(crate) const PARENT: FromRdfOptions = FromRdfOptions {
        ignore_rdf_type: true,
    };
}

/// Runtime type tag of a decoded object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    NodeShape,
    PropertyShape,
    ShaclmateNodeShape,
    ShaclmatePropertyShape,
    Ontology,
    PropertyGroup,
}

impl ObjectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectKind::NodeShape => "NodeShape",
            ObjectKind::PropertyShape => "PropertyShape",
            ObjectKind::ShaclmateNodeShape => "ShaclmateNodeShape",
            ObjectKind::ShaclmatePropertyShape => "ShaclmatePropertyShape",
            ObjectKind::Ontology => "Ontology",
            ObjectKind::PropertyGroup => "PropertyGroup",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A kind of object that can be decoded from, encoded to, and queried in a graph.
pub trait ObjectType: Sized {
    type Filter: RecordFilter<Self>;

    /// Type IRIs whose direct instances are the candidates of a type-indexed
    /// scan. Empty when objects of this kind can only be found by a full scan.
    fn discovery_types() -> Vec<NamedNodeRef<'static>>;

    fn identifier(&self) -> &Identifier;

    fn kind(&self) -> ObjectKind;

    fn from_rdf<S: TripleSource + ?Sized>(
        resource: &Resource<'_, S>,
        options: FromRdfOptions,
    ) -> Result<Self>;

    /// Writes the object's triples, including its `rdf:type` assertions.
    fn to_rdf<K: TripleSink + ?Sized>(&self, sink: &mut K);
}

/// Candidate type IRIs of a union: the members' types together, or none (full
/// scan) as soon as one member can only be found by a full scan.
pub(crate) fn union_discovery_types(
    members: &[Vec<NamedNodeRef<'static>>],
) -> Vec<NamedNodeRef<'static>> {
    if members.iter().any(Vec::is_empty) {
        return Vec::new();
    }
    let mut types: Vec<NamedNodeRef<'static>> = Vec::new();
    for member_type in members.iter().flatten() {
        if !types.contains(member_type) {
            types.push(*member_type);
        }
    }
    types
}
