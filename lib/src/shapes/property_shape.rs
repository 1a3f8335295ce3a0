use super::base::{BaseShape, BaseShapeFilter};
use super::path::PropertyPath;
use crate::codec::{FromRdfOptions, ObjectKind, ObjectType};
use crate::error::Result;
use crate::filter::{
    BooleanFilter, CollectionFilter, Filter, IdentifierFilter, LiteralFilter, MaybeFilter,
    NumericFilter, RecordFilter, TermFilter,
};
use crate::named_nodes::{RDF, SHACL};
use crate::resource::Resource;
use crate::store::{MutableResource, TripleSink, TripleSource};
use crate::term::{Identifier, Value};
use oxigraph::model::{Literal, NamedNodeRef, Term};

/// A property shape. Recognised by its `sh:path` rather than by `rdf:type`,
/// which SHACL does not require on property shapes.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyShape {
    pub base: BaseShape,
    pub default_value: Option<Term>,
    pub descriptions: Vec<Literal>,
    pub groups: Vec<Identifier>,
    pub names: Vec<Literal>,
    pub order: Option<f64>,
    pub path: PropertyPath,
    pub unique_lang: Option<bool>,
}

impl PropertyShape {
    pub const TO_RDF_TYPES: [NamedNodeRef<'static>; 1] = [SHACL::new().property_shape];

    pub fn new(identifier: Identifier, path: PropertyPath) -> Self {
        PropertyShape {
            base: BaseShape::new(identifier),
            default_value: None,
            descriptions: Vec::new(),
            groups: Vec::new(),
            names: Vec::new(),
            order: None,
            path,
            unique_lang: None,
        }
    }

    pub(crate) fn properties_from_rdf<S: TripleSource + ?Sized>(
        resource: &Resource<'_, S>,
        _options: FromRdfOptions,
    ) -> Result<Self> {
        let base = BaseShape::properties_from_rdf(resource, FromRdfOptions::PARENT)?;
        let sh = SHACL::new();
        let source = resource.source();
        Ok(PropertyShape {
            base,
            default_value: resource.optional(sh.default_value, |v| Ok(v.term().clone()))?,
            descriptions: resource.all(sh.description, Value::to_literal)?,
            groups: resource.all(sh.group, Value::to_identifier)?,
            names: resource.all(sh.name, Value::to_literal)?,
            order: resource.optional(sh.order, Value::to_f64)?,
            path: resource.required(sh.path, |v| PropertyPath::from_value(source, v))?,
            unique_lang: resource.optional(sh.unique_lang, Value::to_boolean)?,
        })
    }

    pub(crate) fn properties_to_rdf<K: TripleSink + ?Sized>(
        &self,
        resource: &mut MutableResource<'_, K>,
    ) {
        let sh = SHACL::new();
        self.base.properties_to_rdf(resource);
        resource.add_optional(sh.default_value, self.default_value.clone());
        resource.add_all(sh.description, self.descriptions.iter().cloned());
        resource.add_all(sh.group, self.groups.iter().cloned());
        resource.add_all(sh.name, self.names.iter().cloned());
        resource.add_optional(sh.order, self.order.map(Literal::from));
        let path = self.path.to_rdf(resource.sink());
        resource.add(sh.path, path);
        resource.add_optional(sh.unique_lang, self.unique_lang.map(Literal::from));
    }
}

impl ObjectType for PropertyShape {
    type Filter = PropertyShapeFilter;

    fn discovery_types() -> Vec<NamedNodeRef<'static>> {
        Vec::new()
    }

    fn identifier(&self) -> &Identifier {
        &self.base.identifier
    }

    fn kind(&self) -> ObjectKind {
        ObjectKind::PropertyShape
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
pub struct PropertyShapeFilter {
    pub base: BaseShapeFilter,
    pub default_value: MaybeFilter<TermFilter>,
    pub descriptions: CollectionFilter<LiteralFilter>,
    pub groups: CollectionFilter<IdentifierFilter>,
    pub names: CollectionFilter<LiteralFilter>,
    pub order: MaybeFilter<NumericFilter<f64>>,
    pub unique_lang: MaybeFilter<BooleanFilter>,
}

impl Filter<PropertyShape> for PropertyShapeFilter {
    fn matches(&self, shape: &PropertyShape) -> bool {
        self.base.matches(&shape.base)
            && self.default_value.matches(&shape.default_value)
            && self.descriptions.matches(&shape.descriptions)
            && self.groups.matches(&shape.groups)
            && self.names.matches(&shape.names)
            && self.order.matches(&shape.order)
            && self.unique_lang.matches(&shape.unique_lang)
    }
}

impl RecordFilter<PropertyShape> for PropertyShapeFilter {
    fn identifier(&self) -> &IdentifierFilter {
        &self.base.identifier
    }

    fn identifier_mut(&mut self) -> &mut IdentifierFilter {
        &mut self.base.identifier
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::store::GraphBuilder;
    use crate::test_utils::graph_from_turtle;
    use oxigraph::model::{Graph, NamedNode};

    fn ex(local: &str) -> NamedNode {
        NamedNode::new_unchecked(format!("http://example.com/{local}"))
    }

    fn decode(graph: &Graph, identifier: Identifier) -> Result<PropertyShape> {
        PropertyShape::from_rdf(&Resource::new(graph, identifier), FromRdfOptions::default())
    }

    #[test]
    fn single_path_decodes_to_a_nested_path_object() {
        let graph = graph_from_turtle(
            r#"
            @prefix sh: <http://www.w3.org/ns/shacl#> .
            @prefix ex: <http://example.com/> .
            ex:P sh:path ex:name ; sh:minCount 1 ; sh:maxCount 1 ; sh:order 2.5 .
            ex:NoPath sh:minCount 1 .
            "#,
        )
        .unwrap();
        let shape = decode(&graph, ex("P").into()).unwrap();
        assert_eq!(shape.path, PropertyPath::Predicate(ex("name")));
        assert_eq!(shape.base.min_count, Some(1));
        assert_eq!(shape.base.max_count, Some(1));
        assert_eq!(shape.order, Some(2.5));
        assert!(matches!(
            decode(&graph, ex("NoPath").into()),
            Err(Error::MissingValue { .. })
        ));
    }

    #[test]
    fn round_trips_through_a_graph() {
        let mut shape = PropertyShape::new(
            ex("P").into(),
            PropertyPath::Inverse(Box::new(PropertyPath::Predicate(ex("parent")))),
        );
        shape.default_value = Some(Literal::from(3_i64).into());
        shape.names = vec![Literal::new_language_tagged_literal_unchecked("Name", "en")];
        shape.order = Some(1.0);
        shape.unique_lang = Some(true);
        shape.base.language_in = Some(vec!["en".to_string(), "fr".to_string()]);

        let mut builder = GraphBuilder::new();
        shape.to_rdf(&mut builder);
        let graph = builder.into_graph();
        assert_eq!(decode(&graph, shape.identifier().clone()).unwrap(), shape);
    }
}
