//! The SHACL shapes graph as typed objects.
//!
//! Each level of the shape hierarchy (`BaseShape` → `NodeShape` /
//! `PropertyShape` → the shaclmate extensions) is a field bag that embeds its
//! parent level. A level decodes its parent with the type check suppressed and
//! then reads its own fields, so a type is verified once, by the level the
//! caller asked for.

mod base;
mod node_shape;
mod ontology;
mod path;
mod property_group;
mod property_shape;
mod shaclmate;
mod union;

pub use base::{BaseShape, BaseShapeFilter};
pub use node_shape::{NodeShape, NodeShapeFilter};
pub use ontology::{Ontology, OntologyFilter};
pub use path::PropertyPath;
pub use property_group::{PropertyGroup, PropertyGroupFilter};
pub use property_shape::{PropertyShape, PropertyShapeFilter};
pub use shaclmate::{
    ShaclmateNodeShape, ShaclmateNodeShapeFilter, ShaclmatePropertyShape,
    ShaclmatePropertyShapeFilter, Visibility,
};
pub use union::{Object, ObjectFilter, ShaclmateShape, ShaclmateShapeFilter, Shape, ShapeFilter};

use crate::error::Result;
use crate::filter::{Filter, NamedNodeFilter};
use crate::named_nodes::{SHACL, XSD};
use crate::term::Value;
use oxigraph::model::{Literal, NamedNodeRef};

/// Value of `sh:nodeKind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    BlankNode,
    BlankNodeOrIri,
    BlankNodeOrLiteral,
    Iri,
    IriOrLiteral,
    Literal,
}

impl NodeKind {
    const ALL: [NodeKind; 6] = [
        NodeKind::BlankNode,
        NodeKind::BlankNodeOrIri,
        NodeKind::BlankNodeOrLiteral,
        NodeKind::Iri,
        NodeKind::IriOrLiteral,
        NodeKind::Literal,
    ];

    pub fn named_node(self) -> NamedNodeRef<'static> {
        let sh = SHACL::new();
        match self {
            NodeKind::BlankNode => sh.blank_node,
            NodeKind::BlankNodeOrIri => sh.blank_node_or_iri,
            NodeKind::BlankNodeOrLiteral => sh.blank_node_or_literal,
            NodeKind::Iri => sh.iri,
            NodeKind::IriOrLiteral => sh.iri_or_literal,
            NodeKind::Literal => sh.literal,
        }
    }

    pub fn from_value(value: &Value<'_>) -> Result<Self> {
        let iri = value.to_named_node_in(&Self::ALL.map(NodeKind::named_node))?;
        Self::ALL
            .into_iter()
            .find(|kind| kind.named_node() == iri.as_ref())
            .ok_or_else(|| value.wrong_kind("sh:nodeKind value"))
    }
}

impl Filter<NodeKind> for NamedNodeFilter {
    fn matches(&self, value: &NodeKind) -> bool {
        self.matches_ref(value.named_node())
    }
}

pub(crate) fn integer_literal(value: u64) -> Literal {
    Literal::new_typed_literal(value.to_string(), XSD::new().integer)
}

pub(crate) fn string_literal(value: &str) -> Literal {
    Literal::new_simple_literal(value)
}
