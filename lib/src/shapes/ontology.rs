use crate::codec::{FromRdfOptions, ObjectKind, ObjectType};
use crate::error::Result;
use crate::filter::{
    CollectionFilter, Filter, IdentifierFilter, LiteralFilter, MaybeFilter, NamedNodeFilter,
    RecordFilter,
};
use crate::named_nodes::{OWL, RDF, RDFS};
use crate::resource::Resource;
use crate::store::{TripleSink, TripleSource};
use crate::term::{Identifier, Value};
use oxigraph::model::{Literal, NamedNode, NamedNodeRef};

/// An `owl:Ontology` header, which generated code reads for module-level metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Ontology {
    pub identifier: Identifier,
    pub comments: Vec<Literal>,
    pub labels: Vec<Literal>,
    pub version_iri: Option<NamedNode>,
}

impl Ontology {
    pub const FROM_RDF_TYPE: NamedNodeRef<'static> = OWL::new().ontology;
    pub const TO_RDF_TYPES: [NamedNodeRef<'static>; 1] = [OWL::new().ontology];

    pub fn new(identifier: Identifier) -> Self {
        Ontology {
            identifier,
            comments: Vec::new(),
            labels: Vec::new(),
            version_iri: None,
        }
    }
}

impl ObjectType for Ontology {
    type Filter = OntologyFilter;

    fn discovery_types() -> Vec<NamedNodeRef<'static>> {
        vec![Self::FROM_RDF_TYPE]
    }

    fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    fn kind(&self) -> ObjectKind {
        ObjectKind::Ontology
    }

    fn from_rdf<S: TripleSource + ?Sized>(
        resource: &Resource<'_, S>,
        options: FromRdfOptions,
    ) -> Result<Self> {
        if !options.ignore_rdf_type {
            resource.check_rdf_type(Self::FROM_RDF_TYPE, &[])?;
        }
        let rdfs = RDFS::new();
        Ok(Ontology {
            identifier: resource.identifier().clone(),
            comments: resource.all(rdfs.comment, Value::to_literal)?,
            labels: resource.all(rdfs.label, Value::to_literal)?,
            version_iri: resource.optional(OWL::new().version_iri, Value::to_named_node)?,
        })
    }

    fn to_rdf<K: TripleSink + ?Sized>(&self, sink: &mut K) {
        let rdfs = RDFS::new();
        let mut resource = sink.resource(self.identifier.clone());
        resource.add_all(RDF::new().type_, Self::TO_RDF_TYPES.map(NamedNodeRef::into_owned));
        resource.add_all(rdfs.comment, self.comments.iter().cloned());
        resource.add_all(rdfs.label, self.labels.iter().cloned());
        resource.add_optional(OWL::new().version_iri, self.version_iri.clone());
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OntologyFilter {
    pub identifier: IdentifierFilter,
    pub comments: CollectionFilter<LiteralFilter>,
    pub labels: CollectionFilter<LiteralFilter>,
    pub version_iri: MaybeFilter<NamedNodeFilter>,
}

impl Filter<Ontology> for OntologyFilter {
    fn matches(&self, ontology: &Ontology) -> bool {
        self.identifier.matches(&ontology.identifier)
            && self.comments.matches(&ontology.comments)
            && self.labels.matches(&ontology.labels)
            && self.version_iri.matches(&ontology.version_iri)
    }
}

impl RecordFilter<Ontology> for OntologyFilter {
    fn identifier(&self) -> &IdentifierFilter {
        &self.identifier
    }

    fn identifier_mut(&mut self) -> &mut IdentifierFilter {
        &mut self.identifier
    }
}
