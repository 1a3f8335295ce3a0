use super::base::{BaseShape, BaseShapeFilter};
use crate::codec::{FromRdfOptions, ObjectKind, ObjectType};
use crate::error::Result;
use crate::filter::{
    BooleanFilter, CollectionFilter, Filter, IdentifierFilter, MaybeFilter, NamedNodeFilter,
    RecordFilter,
};
use crate::list::{decode_list_with, encode_list};
use crate::named_nodes::{RDF, SHACL, SHACLMATE};
use crate::resource::Resource;
use crate::store::{MutableResource, TripleSink, TripleSource};
use crate::term::{Identifier, Value};
use oxigraph::model::{Literal, NamedNode, NamedNodeRef};

#[derive(Debug, Clone, PartialEq)]
pub struct NodeShape {
    pub base: BaseShape,
    pub closed: Option<bool>,
    pub ignored_properties: Option<Vec<NamedNode>>,
    pub properties: Vec<Identifier>,
}

impl NodeShape {
    pub const FROM_RDF_TYPE: NamedNodeRef<'static> = SHACL::new().node_shape;
    pub const DESCENDANT_FROM_RDF_TYPES: [NamedNodeRef<'static>; 1] =
        [SHACLMATE::new().node_shape];
    pub const TO_RDF_TYPES: [NamedNodeRef<'static>; 1] = [SHACL::new().node_shape];

    pub fn new(identifier: Identifier) -> Self {
        NodeShape {
            base: BaseShape::new(identifier),
            closed: None,
            ignored_properties: None,
            properties: Vec::new(),
        }
    }

    pub(crate) fn properties_from_rdf<S: TripleSource + ?Sized>(
        resource: &Resource<'_, S>,
        options: FromRdfOptions,
    ) -> Result<Self> {
        if !options.ignore_rdf_type {
            resource.check_rdf_type(Self::FROM_RDF_TYPE, &Self::DESCENDANT_FROM_RDF_TYPES)?;
        }
        let base = BaseShape::properties_from_rdf(resource, FromRdfOptions::PARENT)?;
        let sh = SHACL::new();
        let source = resource.source();
        Ok(NodeShape {
            base,
            closed: resource.optional(sh.closed, Value::to_boolean)?,
            ignored_properties: resource.optional(sh.ignored_properties, |v| {
                decode_list_with(source, v, Value::to_named_node)
            })?,
            properties: resource.all(sh.property, Value::to_identifier)?,
        })
    }

    pub(crate) fn properties_to_rdf<K: TripleSink + ?Sized>(
        &self,
        resource: &mut MutableResource<'_, K>,
    ) {
        let sh = SHACL::new();
        self.base.properties_to_rdf(resource);
        resource.add_optional(sh.closed, self.closed.map(Literal::from));
        if let Some(ignored) = &self.ignored_properties {
            let head = encode_list(resource.sink(), ignored.iter().cloned());
            resource.add(sh.ignored_properties, head);
        }
        resource.add_all(sh.property, self.properties.iter().cloned());
    }
}

impl ObjectType for NodeShape {
    type Filter = NodeShapeFilter;

    fn discovery_types() -> Vec<NamedNodeRef<'static>> {
        let mut types = vec![Self::FROM_RDF_TYPE];
        types.extend(Self::DESCENDANT_FROM_RDF_TYPES);
        types
    }

    fn identifier(&self) -> &Identifier {
        &self.base.identifier
    }

    fn kind(&self) -> ObjectKind {
        ObjectKind::NodeShape
    }

    fn from_rdf<S: TripleSource + ?Sized>(
        resource: &Resource<'_, S>,
        options: FromRdfOptions,
    ) -> Result<Self> {
        Self::properties_from_rdf(resource, options)
    }

    fn to_rdf<K: TripleSink + ?Sized>(&self, sink: &mut K) {
        let mut resource = sink.resource(self.base.identifier.clone());
        resource.add_all(RDF::new().type_, Self::TO_RDF_TYPES.map(NamedNodeRef::into_owned));
        self.properties_to_rdf(&mut resource);
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeShapeFilter {
    pub base: BaseShapeFilter,
    pub closed: MaybeFilter<BooleanFilter>,
    pub ignored_properties: MaybeFilter<CollectionFilter<NamedNodeFilter>>,
    pub properties: CollectionFilter<IdentifierFilter>,
}

impl Filter<NodeShape> for NodeShapeFilter {
    fn matches(&self, shape: &NodeShape) -> bool {
        self.base.matches(&shape.base)
            && self.closed.matches(&shape.closed)
            && self.ignored_properties.matches(&shape.ignored_properties)
            && self.properties.matches(&shape.properties)
    }
}

impl RecordFilter<NodeShape> for NodeShapeFilter {
    fn identifier(&self) -> &IdentifierFilter {
        &self.base.identifier
    }

    fn identifier_mut(&mut self) -> &mut IdentifierFilter {
        &mut self.base.identifier
    }
}
