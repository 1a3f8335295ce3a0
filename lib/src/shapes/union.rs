//! Sum types over object kinds.
//!
//! Decoding tries the members in declaration order and returns the first
//! success; when every member fails, the last member's error is returned.
//! A union filter constrains the identifier and, per member, applies its
//! sub-filter only to objects of that member kind.

use super::{
    NodeShape, NodeShapeFilter, Ontology, OntologyFilter, PropertyGroup, PropertyGroupFilter,
    PropertyShape, PropertyShapeFilter, ShaclmateNodeShape, ShaclmateNodeShapeFilter,
    ShaclmatePropertyShape, ShaclmatePropertyShapeFilter,
};
use crate::codec::{union_discovery_types, FromRdfOptions, ObjectKind, ObjectType};
use crate::error::Result;
use crate::filter::{Filter, IdentifierFilter, RecordFilter};
use crate::resource::Resource;
use crate::store::{TripleSink, TripleSource};
use crate::term::Identifier;
use oxigraph::model::NamedNodeRef;

macro_rules! object_union {
    (@decode $name:ident, $resource:ident, $options:ident;
        $first:ident($first_ty:ty) $(, $variant:ident($ty:ty))*) => {{
        let result = <$first_ty as ObjectType>::from_rdf($resource, $options).map($name::$first);
        $(
            let result = result.or_else(|error| {
                log::trace!(
                    "{}: trying {} after {}",
                    $resource.identifier(),
                    stringify!($variant),
                    error
                );
                <$ty as ObjectType>::from_rdf($resource, $options).map($name::$variant)
            });
        )*
        result
    }};

    (
        $(#[$meta:meta])*
        pub enum $name:ident / $filter:ident {
            $($variant:ident($ty:ty) => $scope:ident: $variant_filter:ty),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub enum $name {
            $($variant($ty)),+
        }

        impl ObjectType for $name {
            type Filter = $filter;

            fn discovery_types() -> Vec<NamedNodeRef<'static>> {
                union_discovery_types(&[$(<$ty as ObjectType>::discovery_types()),+])
            }

            fn identifier(&self) -> &Identifier {
                match self {
                    $($name::$variant(object) => object.identifier()),+
                }
            }

            fn kind(&self) -> ObjectKind {
                match self {
                    $($name::$variant(object) => object.kind()),+
                }
            }

            fn from_rdf<S: TripleSource + ?Sized>(
                resource: &Resource<'_, S>,
                options: FromRdfOptions,
            ) -> Result<Self> {
                object_union!(@decode $name, resource, options; $($variant($ty)),+)
            }

            fn to_rdf<K: TripleSink + ?Sized>(&self, sink: &mut K) {
                match self {
                    $($name::$variant(object) => object.to_rdf(sink)),+
                }
            }
        }

        $(
            impl From<$ty> for $name {
                fn from(object: $ty) -> Self {
                    $name::$variant(object)
                }
            }
        )+

        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct $filter {
            pub identifier: IdentifierFilter,
            $(pub $scope: Option<$variant_filter>),+
        }

        impl Filter<$name> for $filter {
            fn matches(&self, object: &$name) -> bool {
                self.identifier.matches(object.identifier())
                    && match object {
                        $($name::$variant(object) => self
                            .$scope
                            .as_ref()
                            .map_or(true, |filter| filter.matches(object))),+
                    }
            }
        }

        impl RecordFilter<$name> for $filter {
            fn identifier(&self) -> &IdentifierFilter {
                &self.identifier
            }

            fn identifier_mut(&mut self) -> &mut IdentifierFilter {
                &mut self.identifier
            }
        }
    };
}

object_union! {
    /// A SHACL shape of either kind.
    pub enum Shape / ShapeFilter {
        NodeShape(NodeShape) => on_node_shape: NodeShapeFilter,
        PropertyShape(PropertyShape) => on_property_shape: PropertyShapeFilter,
    }
}

object_union! {
    pub enum ShaclmateShape / ShaclmateShapeFilter {
        ShaclmateNodeShape(ShaclmateNodeShape) => on_node_shape: ShaclmateNodeShapeFilter,
        ShaclmatePropertyShape(ShaclmatePropertyShape) => on_property_shape: ShaclmatePropertyShapeFilter,
    }
}

object_union! {
    /// Every decodable kind, most specific first.
    pub enum Object / ObjectFilter {
        ShaclmateNodeShape(ShaclmateNodeShape) => on_shaclmate_node_shape: ShaclmateNodeShapeFilter,
        ShaclmatePropertyShape(ShaclmatePropertyShape) => on_shaclmate_property_shape: ShaclmatePropertyShapeFilter,
        NodeShape(NodeShape) => on_node_shape: NodeShapeFilter,
        PropertyShape(PropertyShape) => on_property_shape: PropertyShapeFilter,
        Ontology(Ontology) => on_ontology: OntologyFilter,
        PropertyGroup(PropertyGroup) => on_property_group: PropertyGroupFilter,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::shapes::PropertyPath;
    use crate::test_utils::graph_from_turtle;
    use oxigraph::model::{Graph, NamedNode};

    const DATA: &str = r#"
        @prefix sh: <http://www.w3.org/ns/shacl#> .
        @prefix shaclmate: <http://purl.org/shaclmate/ontology#> .
        @prefix owl: <http://www.w3.org/2002/07/owl#> .
        @prefix ex: <http://example.com/> .
        ex:Both a sh:NodeShape ; sh:path ex:p .
        ex:Extended a shaclmate:NodeShape .
        ex:Onto a owl:Ontology .
        ex:Nothing ex:p ex:q .
    "#;

    fn decode<T: ObjectType>(graph: &Graph, local: &str) -> Result<T> {
        let identifier = NamedNode::new_unchecked(format!("http://example.com/{local}"));
        T::from_rdf(&Resource::new(graph, identifier.into()), FromRdfOptions::default())
    }

    #[test]
    fn first_declared_member_wins() {
        let graph = graph_from_turtle(DATA).unwrap();
        // ex:Both decodes as either member; declaration order decides
        assert!(matches!(decode::<Shape>(&graph, "Both").unwrap(), Shape::NodeShape(_)));
        assert!(matches!(
            decode::<Object>(&graph, "Extended").unwrap(),
            Object::ShaclmateNodeShape(_)
        ));
        assert_eq!(
            decode::<Object>(&graph, "Onto").unwrap().kind(),
            ObjectKind::Ontology
        );
    }

    #[test]
    fn last_error_is_reported() {
        let graph = graph_from_turtle(DATA).unwrap();
        // the property shape member fails last, on the missing sh:path
        assert!(matches!(
            decode::<Shape>(&graph, "Nothing"),
            Err(Error::MissingValue { .. })
        ));
        // the property group member fails last, on the type check
        assert!(matches!(
            decode::<Object>(&graph, "Nothing"),
            Err(Error::UnexpectedType { .. })
        ));
    }

    #[test]
    fn discovery_types_follow_the_members() {
        assert!(Shape::discovery_types().is_empty(), "property shapes need a full scan");
        assert_eq!(
            ShaclmateShape::discovery_types(),
            vec![
                ShaclmateNodeShape::FROM_RDF_TYPE,
                ShaclmatePropertyShape::FROM_RDF_TYPE
            ]
        );
    }

    #[test]
    fn scoped_filters_only_apply_to_their_member() {
        let node: Shape =
            NodeShape::new(NamedNode::new_unchecked("http://example.com/N").into()).into();
        let property: Shape = PropertyShape::new(
            NamedNode::new_unchecked("http://example.com/P").into(),
            PropertyPath::Predicate(NamedNode::new_unchecked("http://example.com/p")),
        )
        .into();
        let mut filter = ShapeFilter {
            on_node_shape: Some(NodeShapeFilter {
                closed: crate::filter::MaybeFilter::Absent,
                ..Default::default()
            }),
            ..Default::default()
        };
        assert!(filter.matches(&node));
        assert!(filter.matches(&property), "not excluded by a filter scoped to node shapes");
        filter.on_node_shape = Some(NodeShapeFilter {
            closed: crate::filter::MaybeFilter::Present(Default::default()),
            ..Default::default()
        });
        assert!(!filter.matches(&node));
        assert!(filter.matches(&property));
    }
}
