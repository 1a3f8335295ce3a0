//! Typed, filterable access to the SHACL shapes held in an RDF graph.
//!
//! A [`Resource`] reads the property values of one subject, the types in
//! [`shapes`] decode themselves from a resource and encode back into a
//! [`TripleSink`], and an [`ObjectSet`] finds, filters and pages the objects
//! of a kind across a whole graph.

pub mod codec;
pub mod error;
pub mod filter;
pub mod list;
pub mod named_nodes;
pub mod object_set;
pub mod resource;
pub mod shapes;
pub mod store;
pub mod term;
pub mod test_utils;

pub use codec::{FromRdfOptions, ObjectKind, ObjectType};
pub use error::{Error, Result};
pub use filter::{
    BooleanFilter, CollectionFilter, Filter, IdentifierFilter, LiteralFilter, MaybeFilter,
    NamedNodeFilter, NumericFilter, RecordFilter, StringFilter, TermFilter,
};
pub use list::{decode_list, decode_list_with, encode_list};
pub use object_set::{ObjectSet, Query};
pub use resource::Resource;
pub use store::{
    parse_graph, read_graph, write_graph, BlankNodeGenerator, CountingBlankNodeGenerator,
    GraphBuilder, MutableResource, RandomBlankNodeGenerator, StoreGraph, TripleSink,
    TripleSource,
};
pub use term::{
    parse_identifier, Identifier, IdentifierKind, IdentifierSet, TermKind, Value,
};
