//! Shapes extended with code-generation annotations from the shaclmate vocabulary.

use super::node_shape::{NodeShape, NodeShapeFilter};
use super::property_shape::{PropertyShape, PropertyShapeFilter};
use super::string_literal;
use crate::codec::{FromRdfOptions, ObjectKind, ObjectType};
use crate::error::Result;
use crate::filter::{
    BooleanFilter, CollectionFilter, Filter, IdentifierFilter, MaybeFilter, NamedNodeFilter,
    RecordFilter, StringFilter,
};
use crate::named_nodes::{RDF, SHACLMATE};
use crate::resource::Resource;
use crate::store::{TripleSink, TripleSource};
use crate::term::{Identifier, Value};
use oxigraph::model::{Literal, NamedNode, NamedNodeRef};

/// Generated member visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    Private,
    Protected,
    Public,
}

impl Visibility {
    const ALL: [Visibility; 3] = [
        Visibility::Private,
        Visibility::Protected,
        Visibility::Public,
    ];

    pub fn named_node(self) -> NamedNodeRef<'static> {
        let shaclmate = SHACLMATE::new();
        match self {
            Visibility::Private => shaclmate.visibility_private,
            Visibility::Protected => shaclmate.visibility_protected,
            Visibility::Public => shaclmate.visibility_public,
        }
    }

    pub fn from_value(value: &Value<'_>) -> Result<Self> {
        let iri = value.to_named_node_in(&Self::ALL.map(Visibility::named_node))?;
        Self::ALL
            .into_iter()
            .find(|visibility| visibility.named_node() == iri.as_ref())
            .ok_or_else(|| value.wrong_kind("shaclmate visibility"))
    }
}

impl Filter<Visibility> for NamedNodeFilter {
    fn matches(&self, value: &Visibility) -> bool {
        self.matches_ref(value.named_node())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShaclmateNodeShape {
    pub node_shape: NodeShape,
    pub abstract_: Option<bool>,
    pub extern_: Option<bool>,
    pub from_rdf_type: Option<NamedNode>,
    pub mutable: Option<bool>,
    pub name: Option<String>,
    pub rdf_type: Option<NamedNode>,
    pub to_rdf_types: Vec<NamedNode>,
}

impl ShaclmateNodeShape {
    pub const FROM_RDF_TYPE: NamedNodeRef<'static> = SHACLMATE::new().node_shape;
    pub const TO_RDF_TYPES: [NamedNodeRef<'static>; 1] = [SHACLMATE::new().node_shape];

    pub fn new(identifier: Identifier) -> Self {
        ShaclmateNodeShape {
            node_shape: NodeShape::new(identifier),
            abstract_: None,
            extern_: None,
            from_rdf_type: None,
            mutable: None,
            name: None,
            rdf_type: None,
            to_rdf_types: Vec::new(),
        }
    }
}

impl ObjectType for ShaclmateNodeShape {
    type Filter = ShaclmateNodeShapeFilter;

    fn discovery_types() -> Vec<NamedNodeRef<'static>> {
        vec![Self::FROM_RDF_TYPE]
    }

    fn identifier(&self) -> &Identifier {
        &self.node_shape.base.identifier
    }

    fn kind(&self) -> ObjectKind {
        ObjectKind::ShaclmateNodeShape
    }

    fn from_rdf<S: TripleSource + ?Sized>(
        resource: &Resource<'_, S>,
        options: FromRdfOptions,
    ) -> Result<Self> {
        if !options.ignore_rdf_type {
            resource.check_rdf_type(Self::FROM_RDF_TYPE, &[])?;
        }
        let node_shape = NodeShape::properties_from_rdf(resource, FromRdfOptions::PARENT)?;
        let shaclmate = SHACLMATE::new();
        Ok(ShaclmateNodeShape {
            node_shape,
            abstract_: resource.optional(shaclmate.abstract_, Value::to_boolean)?,
            extern_: resource.optional(shaclmate.extern_, Value::to_boolean)?,
            from_rdf_type: resource.optional(shaclmate.from_rdf_type, Value::to_named_node)?,
            mutable: resource.optional(shaclmate.mutable, Value::to_boolean)?,
            name: resource.optional(shaclmate.name, Value::to_string_value)?,
            rdf_type: resource.optional(shaclmate.rdf_type, Value::to_named_node)?,
            to_rdf_types: resource.all(shaclmate.to_rdf_type, Value::to_named_node)?,
        })
    }

    fn to_rdf<K: TripleSink + ?Sized>(&self, sink: &mut K) {
        let shaclmate = SHACLMATE::new();
        let mut resource = sink.resource(self.identifier().clone());
        resource.add_all(RDF::new().type_, Self::TO_RDF_TYPES.map(NamedNodeRef::into_owned));
        self.node_shape.properties_to_rdf(&mut resource);
        resource.add_optional(shaclmate.abstract_, self.abstract_.map(Literal::from));
        resource.add_optional(shaclmate.extern_, self.extern_.map(Literal::from));
        resource.add_optional(shaclmate.from_rdf_type, self.from_rdf_type.clone());
        resource.add_optional(shaclmate.mutable, self.mutable.map(Literal::from));
        resource.add_optional(shaclmate.name, self.name.as_deref().map(string_literal));
        resource.add_optional(shaclmate.rdf_type, self.rdf_type.clone());
        resource.add_all(shaclmate.to_rdf_type, self.to_rdf_types.iter().cloned());
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShaclmateNodeShapeFilter {
    pub node_shape: NodeShapeFilter,
    pub abstract_: MaybeFilter<BooleanFilter>,
    pub extern_: MaybeFilter<BooleanFilter>,
    pub from_rdf_type: MaybeFilter<NamedNodeFilter>,
    pub mutable: MaybeFilter<BooleanFilter>,
    pub name: MaybeFilter<StringFilter>,
    pub rdf_type: MaybeFilter<NamedNodeFilter>,
    pub to_rdf_types: CollectionFilter<NamedNodeFilter>,
}

impl Filter<ShaclmateNodeShape> for ShaclmateNodeShapeFilter {
    fn matches(&self, shape: &ShaclmateNodeShape) -> bool {
        self.node_shape.matches(&shape.node_shape)
            && self.abstract_.matches(&shape.abstract_)
            && self.extern_.matches(&shape.extern_)
            && self.from_rdf_type.matches(&shape.from_rdf_type)
            && self.mutable.matches(&shape.mutable)
            && self.name.matches(&shape.name)
            && self.rdf_type.matches(&shape.rdf_type)
            && self.to_rdf_types.matches(&shape.to_rdf_types)
    }
}

impl RecordFilter<ShaclmateNodeShape> for ShaclmateNodeShapeFilter {
    fn identifier(&self) -> &IdentifierFilter {
        self.node_shape.identifier()
    }

    fn identifier_mut(&mut self) -> &mut IdentifierFilter {
        self.node_shape.identifier_mut()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShaclmatePropertyShape {
    pub property_shape: PropertyShape,
    pub mutable: Option<bool>,
    pub name: Option<String>,
    pub visibility: Option<Visibility>,
}

impl ShaclmatePropertyShape {
    pub const FROM_RDF_TYPE: NamedNodeRef<'static> = SHACLMATE::new().property_shape;
    pub const TO_RDF_TYPES: [NamedNodeRef<'static>; 1] = [SHACLMATE::new().property_shape];

    pub fn new(property_shape: PropertyShape) -> Self {
        ShaclmatePropertyShape {
            property_shape,
            mutable: None,
            name: None,
            visibility: None,
        }
    }
}

impl ObjectType for ShaclmatePropertyShape {
    type Filter = ShaclmatePropertyShapeFilter;

    fn discovery_types() -> Vec<NamedNodeRef<'static>> {
        vec![Self::FROM_RDF_TYPE]
    }

    fn identifier(&self) -> &Identifier {
        &self.property_shape.base.identifier
    }

    fn kind(&self) -> ObjectKind {
        ObjectKind::ShaclmatePropertyShape
    }

    fn from_rdf<S: TripleSource + ?Sized>(
        resource: &Resource<'_, S>,
        options: FromRdfOptions,
    ) -> Result<Self> {
        if !options.ignore_rdf_type {
            resource.check_rdf_type(Self::FROM_RDF_TYPE, &[])?;
        }
        let property_shape = PropertyShape::properties_from_rdf(resource, FromRdfOptions::PARENT)?;
        let shaclmate = SHACLMATE::new();
        Ok(ShaclmatePropertyShape {
            property_shape,
            mutable: resource.optional(shaclmate.mutable, Value::to_boolean)?,
            name: resource.optional(shaclmate.name, Value::to_string_value)?,
            visibility: resource.optional(shaclmate.visibility, Visibility::from_value)?,
        })
    }

    fn to_rdf<K: TripleSink + ?Sized>(&self, sink: &mut K) {
        let shaclmate = SHACLMATE::new();
        let mut resource = sink.resource(self.identifier().clone());
        resource.add_all(RDF::new().type_, Self::TO_RDF_TYPES.map(NamedNodeRef::into_owned));
        self.property_shape.properties_to_rdf(&mut resource);
        resource.add_optional(shaclmate.mutable, self.mutable.map(Literal::from));
        resource.add_optional(shaclmate.name, self.name.as_deref().map(string_literal));
        resource.add_optional(
            shaclmate.visibility,
            self.visibility.map(|v| v.named_node().into_owned()),
        );
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShaclmatePropertyShapeFilter {
    pub property_shape: PropertyShapeFilter,
    pub mutable: MaybeFilter<BooleanFilter>,
    pub name: MaybeFilter<StringFilter>,
    pub visibility: MaybeFilter<NamedNodeFilter>,
}

impl Filter<ShaclmatePropertyShape> for ShaclmatePropertyShapeFilter {
    fn matches(&self, shape: &ShaclmatePropertyShape) -> bool {
        self.property_shape.matches(&shape.property_shape)
            && self.mutable.matches(&shape.mutable)
            && self.name.matches(&shape.name)
            && self.visibility.matches(&shape.visibility)
    }
}

impl RecordFilter<ShaclmatePropertyShape> for ShaclmatePropertyShapeFilter {
    fn identifier(&self) -> &IdentifierFilter {
        self.property_shape.identifier()
    }

    fn identifier_mut(&mut self) -> &mut IdentifierFilter {
        self.property_shape.identifier_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::shapes::PropertyPath;
    use crate::store::GraphBuilder;
    use crate::test_utils::graph_from_turtle;
    use oxigraph::model::Graph;

    fn ex(local: &str) -> NamedNode {
        NamedNode::new_unchecked(format!("http://example.com/{local}"))
    }

    fn decode<T: ObjectType>(graph: &Graph, local: &str) -> Result<T> {
        T::from_rdf(&Resource::new(graph, ex(local).into()), FromRdfOptions::default())
    }

    const DATA: &str = r#"
        @prefix sh: <http://www.w3.org/ns/shacl#> .
        @prefix shaclmate: <http://purl.org/shaclmate/ontology#> .
        @prefix ex: <http://example.com/> .
        ex:Node a shaclmate:NodeShape ;
            sh:closed true ;
            shaclmate:abstract true ;
            shaclmate:name "Node" ;
            shaclmate:toRdfType ex:B, ex:A .
        ex:Prop a shaclmate:PropertyShape ;
            sh:path ex:p ;
            shaclmate:visibility shaclmate:_Visibility_Protected .
        ex:BadVisibility a shaclmate:PropertyShape ;
            sh:path ex:p ;
            shaclmate:visibility ex:Secret .
        ex:PlainNode a sh:NodeShape .
    "#;

    #[test]
    fn every_level_contributes_fields() {
        let graph = graph_from_turtle(DATA).unwrap();
        let node: ShaclmateNodeShape = decode(&graph, "Node").unwrap();
        assert_eq!(node.node_shape.closed, Some(true), "node shape level");
        assert_eq!(node.abstract_, Some(true));
        assert_eq!(node.name.as_deref(), Some("Node"));
        assert_eq!(node.to_rdf_types, vec![ex("A"), ex("B")]);
        assert_eq!(node.kind(), ObjectKind::ShaclmateNodeShape);

        let prop: ShaclmatePropertyShape = decode(&graph, "Prop").unwrap();
        assert_eq!(prop.property_shape.path, PropertyPath::Predicate(ex("p")));
        assert_eq!(prop.visibility, Some(Visibility::Protected));
    }

    #[test]
    fn rejects_base_types_and_unknown_enum_members() {
        let graph = graph_from_turtle(DATA).unwrap();
        assert!(matches!(
            decode::<ShaclmateNodeShape>(&graph, "PlainNode"),
            Err(Error::UnexpectedType { .. })
        ));
        assert!(matches!(
            decode::<ShaclmatePropertyShape>(&graph, "BadVisibility"),
            Err(Error::WrongTermKind { .. })
        ));
    }

    #[test]
    fn round_trips_through_a_graph() {
        let mut node = ShaclmateNodeShape::new(ex("Node").into());
        node.extern_ = Some(false);
        node.rdf_type = Some(ex("Type"));
        node.node_shape.properties = vec![ex("Prop").into()];
        let mut prop = ShaclmatePropertyShape::new(PropertyShape::new(
            ex("Prop").into(),
            PropertyPath::Predicate(ex("p")),
        ));
        prop.mutable = Some(true);
        prop.visibility = Some(Visibility::Private);

        let mut builder = GraphBuilder::new();
        node.to_rdf(&mut builder);
        prop.to_rdf(&mut builder);
        let graph = builder.into_graph();
        assert_eq!(decode::<ShaclmateNodeShape>(&graph, "Node").unwrap(), node);
        assert_eq!(decode::<ShaclmatePropertyShape>(&graph, "Prop").unwrap(), prop);
        // the extension type is a known descendant of sh:NodeShape
        assert!(decode::<NodeShape>(&graph, "Node").is_ok());
    }
}
