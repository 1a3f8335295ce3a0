use crate::codec::{FromRdfOptions, ObjectKind, ObjectType};
use crate::error::Result;
use crate::filter::{CollectionFilter, Filter, IdentifierFilter, LiteralFilter, RecordFilter};
use crate::named_nodes::{RDF, RDFS, SHACL};
use crate::resource::Resource;
use crate::store::{TripleSink, TripleSource};
use crate::term::{Identifier, Value};
use oxigraph::model::{Literal, NamedNodeRef};

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyGroup {
    pub identifier: Identifier,
    pub comments: Vec<Literal>,
    pub labels: Vec<Literal>,
}

impl PropertyGroup {
    pub const FROM_RDF_TYPE: NamedNodeRef<'static> = SHACL::new().property_group;
    pub const TO_RDF_TYPES: [NamedNodeRef<'static>; 1] = [SHACL::new().property_group];

    pub fn new(identifier: Identifier) -> Self {
        PropertyGroup {
            identifier,
            comments: Vec::new(),
            labels: Vec::new(),
        }
    }
}

impl ObjectType for PropertyGroup {
    type Filter = PropertyGroupFilter;

    fn discovery_types() -> Vec<NamedNodeRef<'static>> {
        vec![Self::FROM_RDF_TYPE]
    }

    fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    fn kind(&self) -> ObjectKind {
        ObjectKind::PropertyGroup
    }

    fn from_rdf<S: TripleSource + ?Sized>(
        resource: &Resource<'_, S>,
        options: FromRdfOptions,
    ) -> Result<Self> {
        if !options.ignore_rdf_type {
            resource.check_rdf_type(Self::FROM_RDF_TYPE, &[])?;
        }
        let rdfs = RDFS::new();
        Ok(PropertyGroup {
            identifier: resource.identifier().clone(),
            comments: resource.all(rdfs.comment, Value::to_literal)?,
            labels: resource.all(rdfs.label, Value::to_literal)?,
        })
    }

    fn to_rdf<K: TripleSink + ?Sized>(&self, sink: &mut K) {
        let rdfs = RDFS::new();
        let mut resource = sink.resource(self.identifier.clone());
        resource.add_all(RDF::new().type_, Self::TO_RDF_TYPES.map(NamedNodeRef::into_owned));
        resource.add_all(rdfs.comment, self.comments.iter().cloned());
        resource.add_all(rdfs.label, self.labels.iter().cloned());
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyGroupFilter {
    pub identifier: IdentifierFilter,
    pub comments: CollectionFilter<LiteralFilter>,
    pub labels: CollectionFilter<LiteralFilter>,
}

impl Filter<PropertyGroup> for PropertyGroupFilter {
    fn matches(&self, group: &PropertyGroup) -> bool {
        self.identifier.matches(&group.identifier)
            && self.comments.matches(&group.comments)
            && self.labels.matches(&group.labels)
    }
}

impl RecordFilter<PropertyGroup> for PropertyGroupFilter {
    fn identifier(&self) -> &IdentifierFilter {
        &self.identifier
    }

    fn identifier_mut(&mut self) -> &mut IdentifierFilter {
        &mut self.identifier
    }
}
