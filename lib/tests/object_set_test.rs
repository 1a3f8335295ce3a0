use oxigraph::model::{GraphName, NamedNode};
use oxigraph::store::Store;
use shacl_objects::shapes::{
    NodeShape, Object, ObjectFilter, Ontology, OntologyFilter, PropertyShape,
    PropertyShapeFilter, ShaclmateNodeShape, ShaclmateShape, Shape,
};
use shacl_objects::test_utils::graph_from_turtle;
use shacl_objects::{
    parse_identifier, read_graph, CollectionFilter, Error, Identifier, MaybeFilter, NumericFilter,
    ObjectKind, ObjectSet, ObjectType, Query, RecordFilter, StoreGraph,
};
use std::io::Write;

const SHAPES: &str = r#"
    @prefix sh: <http://www.w3.org/ns/shacl#> .
    @prefix shaclmate: <http://purl.org/shaclmate/ontology#> .
    @prefix owl: <http://www.w3.org/2002/07/owl#> .
    @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
    @prefix ex: <http://example.com/> .

    ex:onto a owl:Ontology ; rdfs:label "Example" .
    ex:bare a owl:Ontology .

    ex:Person a sh:NodeShape ;
        sh:property ex:Person-name, ex:Person-knows .
    ex:Organization a shaclmate:NodeShape ;
        shaclmate:name "Org" ;
        sh:property ex:Organization-member .
    ex:Place a sh:NodeShape .

    ex:Person-name sh:path ex:name ; sh:maxCount 1 ; sh:order 1 .
    ex:Person-knows sh:path ( ex:knows ex:name ) ; sh:order 2 .
    ex:Organization-member sh:path [ sh:inversePath ex:memberOf ] .

    ex:Contact a sh:PropertyGroup ; rdfs:label "Contact" .
"#;

fn id(local: &str) -> Identifier {
    NamedNode::new_unchecked(format!("http://example.com/{local}")).into()
}

fn identifiers<T: ObjectType>(objects: &[T]) -> Vec<Identifier> {
    objects.iter().map(|o| o.identifier().clone()).collect()
}

#[test]
fn node_shapes_include_descendant_types() {
    let graph = graph_from_turtle(SHAPES).unwrap();
    let shapes: Vec<NodeShape> = ObjectSet::new(&graph).list(&Query::new()).unwrap();
    assert_eq!(
        identifiers(&shapes),
        vec![id("Organization"), id("Person"), id("Place")]
    );

    let extended: Vec<ShaclmateNodeShape> = ObjectSet::new(&graph).list(&Query::new()).unwrap();
    assert_eq!(identifiers(&extended), vec![id("Organization")]);
    assert_eq!(extended[0].name.as_deref(), Some("Org"));
}

#[test]
fn pages_partition_the_full_listing() {
    let graph = graph_from_turtle(SHAPES).unwrap();
    let objects = ObjectSet::new(&graph);
    let all: Vec<PropertyShape> = objects.list(&Query::new()).unwrap();
    assert_eq!(all.len(), 3);

    let mut paged = Vec::new();
    for offset in 0..all.len() {
        let page: Vec<PropertyShape> =
            objects.list(&Query::new().offset(offset).limit(1)).unwrap();
        assert_eq!(page.len(), 1);
        paged.extend(page);
    }
    assert_eq!(paged, all);
    assert!(objects
        .list::<PropertyShape>(&Query::new().offset(all.len()))
        .unwrap()
        .is_empty());
}

#[test]
fn field_filters_are_conjunctive() {
    let graph = graph_from_turtle(SHAPES).unwrap();
    let objects = ObjectSet::new(&graph);
    let mut filter = PropertyShapeFilter {
        order: MaybeFilter::Present(NumericFilter {
            min_inclusive: Some(1.0),
            ..Default::default()
        }),
        ..Default::default()
    };
    assert_eq!(objects.count::<PropertyShape>(&filter).unwrap(), 2);

    filter.base.max_count = MaybeFilter::Absent;
    let shapes: Vec<PropertyShape> = objects.list(&Query::new().filter(filter)).unwrap();
    assert_eq!(identifiers(&shapes), vec![id("Person-knows")]);
    assert_eq!(
        shapes[0].path.to_sparql_path(),
        "(<http://example.com/knows> / <http://example.com/name>)"
    );
}

#[test]
fn ontology_label_cardinality() {
    let graph = graph_from_turtle(SHAPES).unwrap();
    let filter = OntologyFilter {
        labels: CollectionFilter::count(Some(1), None),
        ..Default::default()
    };
    let ontologies: Vec<Ontology> = ObjectSet::new(&graph)
        .list(&Query::new().filter(filter))
        .unwrap();
    assert_eq!(identifiers(&ontologies), vec![id("onto")]);
}

#[test]
fn missing_identifiers_are_omitted_or_not_found() {
    let graph = graph_from_turtle(SHAPES).unwrap();
    let objects = ObjectSet::new(&graph);
    let filter =
        ObjectFilter::default().with_identifiers(vec![id("nope"), id("Contact"), id("onto")]);
    let found: Vec<Object> = objects.list(&Query::new().filter(filter)).unwrap();
    assert_eq!(identifiers(&found), vec![id("Contact"), id("onto")]);
    assert_eq!(found[0].kind(), ObjectKind::PropertyGroup);

    match objects.get::<Object>(&id("nope")) {
        Err(Error::NotFound { identifier }) => assert_eq!(identifier, id("nope")),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn unions_resolve_in_declaration_order() {
    let graph = graph_from_turtle(SHAPES).unwrap();
    let objects = ObjectSet::new(&graph);
    let organization: Object = objects.get(&id("Organization")).unwrap();
    assert_eq!(organization.kind(), ObjectKind::ShaclmateNodeShape);
    let person: Object = objects.get(&id("Person")).unwrap();
    assert_eq!(person.kind(), ObjectKind::NodeShape);

    // property shapes carry no rdf:type, so shapes are found by a full scan
    let shapes: Vec<Shape> = objects.list(&Query::new()).unwrap();
    assert_eq!(shapes.len(), 6);
    assert_eq!(
        shapes.iter().filter(|s| matches!(s, Shape::PropertyShape(_))).count(),
        3
    );
}

#[test]
fn store_graph_matches_in_memory_graph() {
    let graph = graph_from_turtle(SHAPES).unwrap();
    let store = Store::new().unwrap();
    let name = GraphName::NamedNode(NamedNode::new_unchecked("http://example.com/shapes"));
    let source = StoreGraph::new(&store, name);
    source.insert_graph(&graph).unwrap();

    let from_graph: Vec<Object> = ObjectSet::new(&graph).list(&Query::new()).unwrap();
    let from_store: Vec<Object> = ObjectSet::new(&source).list(&Query::new()).unwrap();
    assert_eq!(from_store, from_graph);

    let default_graph = StoreGraph::default_graph(&store);
    assert_eq!(
        ObjectSet::new(&default_graph)
            .count::<NodeShape>(&Default::default())
            .unwrap(),
        0
    );
}

#[test]
fn reads_shapes_from_a_file() {
    let mut file = tempfile::Builder::new().suffix(".ttl").tempfile().unwrap();
    file.write_all(SHAPES.as_bytes()).unwrap();
    let graph = read_graph(file.path()).unwrap();
    let person: NodeShape = ObjectSet::new(&graph)
        .get(&parse_identifier("http://example.com/Person").unwrap())
        .unwrap();
    assert_eq!(person.properties, vec![id("Person-knows"), id("Person-name")]);
}

const EXTENDED: &str = r#"
    @prefix sh: <http://www.w3.org/ns/shacl#> .
    @prefix shaclmate: <http://purl.org/shaclmate/ontology#> .
    @prefix ex: <http://example.com/> .

    ex:Zone a shaclmate:NodeShape ; shaclmate:name "Zone" .
    ex:Both a sh:NodeShape, shaclmate:NodeShape ; shaclmate:name "Both" .
    ex:Hybrid a shaclmate:NodeShape, shaclmate:PropertyShape ; sh:path ex:h .
    ex:zone-id a shaclmate:PropertyShape ; sh:path ex:id ; shaclmate:name "id" .
    ex:Plain a sh:NodeShape .
"#;

#[test]
fn union_listing_dedups_across_discovery_types() {
    let graph = graph_from_turtle(EXTENDED).unwrap();
    let objects = ObjectSet::new(&graph);

    let shapes: Vec<ShaclmateShape> = objects.list(&Query::new()).unwrap();
    assert_eq!(
        identifiers(&shapes),
        vec![id("Both"), id("Hybrid"), id("Zone"), id("zone-id")]
    );
    // typed as both members, decoded by the first declared one
    assert!(matches!(shapes[1], ShaclmateShape::ShaclmateNodeShape(_)));
    assert!(matches!(shapes[3], ShaclmateShape::ShaclmatePropertyShape(_)));
    assert_eq!(objects.count::<ShaclmateShape>(&Default::default()).unwrap(), 4);

    let page: Vec<ShaclmateShape> = objects.list(&Query::new().offset(1).limit(2)).unwrap();
    assert_eq!(identifiers(&page), vec![id("Hybrid"), id("Zone")]);

    let node_shapes: Vec<NodeShape> = objects.list(&Query::new()).unwrap();
    assert_eq!(
        identifiers(&node_shapes),
        vec![id("Both"), id("Hybrid"), id("Plain"), id("Zone")]
    );
}

#[test]
fn full_scan_skips_cyclic_paths() {
    let graph = graph_from_turtle(&format!(
        "{SHAPES}\n ex:Loop sh:path _:loop . _:loop sh:inversePath _:loop ."
    ))
    .unwrap();
    let shapes: Vec<PropertyShape> = ObjectSet::new(&graph).list(&Query::new()).unwrap();
    assert_eq!(shapes.len(), 3);
    assert!(!identifiers(&shapes).contains(&id("Loop")));
}
