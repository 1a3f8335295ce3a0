//! Graph access at the boundary of the object layer.
//!
//! Decoding reads through [`TripleSource`], which is implemented for an
//! in-memory [`Graph`] and for one graph of an Oxigraph [`Store`]. Encoding
//! writes through [`TripleSink`]; [`GraphBuilder`] is the standard sink and
//! takes its blank node labels from an injectable [`BlankNodeGenerator`] so
//! that encoded output can be made deterministic.

use crate::error::{Error, Result};
use crate::named_nodes::RDF;
use crate::term::Identifier;
use log::info;
use oxigraph::io::{RdfFormat, RdfParser, RdfSerializer};
use oxigraph::model::{
    BlankNode, Graph, GraphName, NamedNodeRef, NamedOrBlankNodeRef, QuadRef, Term, Triple,
    TripleRef,
};
use oxigraph::store::Store;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

/// Read-only view of a set of triples.
///
/// Implementations must behave as a snapshot for the duration of a call;
/// the object layer performs no locking of its own.
pub trait TripleSource {
    /// Objects of all triples with the given subject and predicate.
    fn objects(
        &self,
        subject: NamedOrBlankNodeRef<'_>,
        predicate: NamedNodeRef<'_>,
    ) -> Result<Vec<Term>>;

    /// Subjects directly asserted to be `rdf:type` of `class`.
    fn instances_of(&self, class: NamedNodeRef<'_>) -> Result<Vec<Identifier>>;

    /// Every distinct subject.
    fn subjects(&self) -> Result<Vec<Identifier>>;

    /// Whether `subject` is the subject of at least one triple.
    fn has_subject(&self, subject: NamedOrBlankNodeRef<'_>) -> Result<bool>;
}

impl TripleSource for Graph {
    fn objects(
        &self,
        subject: NamedOrBlankNodeRef<'_>,
        predicate: NamedNodeRef<'_>,
    ) -> Result<Vec<Term>> {
        Ok(self
            .objects_for_subject_predicate(subject, predicate)
            .map(|o| o.into_owned())
            .collect())
    }

    fn instances_of(&self, class: NamedNodeRef<'_>) -> Result<Vec<Identifier>> {
        let rdf = RDF::new();
        Ok(self
            .subjects_for_predicate_object(rdf.type_, class)
            .map(|s| s.into_owned())
            .collect())
    }

    fn subjects(&self) -> Result<Vec<Identifier>> {
        let mut seen = HashSet::new();
        Ok(self
            .iter()
            .map(|t| t.subject.into_owned())
            .filter(|s| seen.insert(s.clone()))
            .collect())
    }

    fn has_subject(&self, subject: NamedOrBlankNodeRef<'_>) -> Result<bool> {
        Ok(self.triples_for_subject(subject).next().is_some())
    }
}

/// One graph of an Oxigraph [`Store`].
#[derive(Clone)]
pub struct StoreGraph<'a> {
    store: &'a Store,
    graph_name: GraphName,
}

impl<'a> StoreGraph<'a> {
    pub fn new(store: &'a Store, graph_name: GraphName) -> Self {
        Self { store, graph_name }
    }

    pub fn default_graph(store: &'a Store) -> Self {
        Self::new(store, GraphName::DefaultGraph)
    }

    pub fn graph_name(&self) -> &GraphName {
        &self.graph_name
    }

    /// Writes every triple of `graph` into this graph of the store.
    pub fn insert_graph(&self, graph: &Graph) -> Result<()> {
        for triple in graph.iter() {
            self.store.insert(QuadRef::new(
                triple.subject,
                triple.predicate,
                triple.object,
                self.graph_name.as_ref(),
            ))?;
        }
        Ok(())
    }
}

impl TripleSource for StoreGraph<'_> {
    fn objects(
        &self,
        subject: NamedOrBlankNodeRef<'_>,
        predicate: NamedNodeRef<'_>,
    ) -> Result<Vec<Term>> {
        let mut results = Vec::new();
        for quad in self.store.quads_for_pattern(
            Some(subject),
            Some(predicate),
            None,
            Some(self.graph_name.as_ref()),
        ) {
            results.push(quad?.object);
        }
        Ok(results)
    }

    fn instances_of(&self, class: NamedNodeRef<'_>) -> Result<Vec<Identifier>> {
        let rdf = RDF::new();
        let mut results = Vec::new();
        for quad in self.store.quads_for_pattern(
            None,
            Some(rdf.type_),
            Some(class.into()),
            Some(self.graph_name.as_ref()),
        ) {
            results.push(quad?.subject);
        }
        Ok(results)
    }

    fn subjects(&self) -> Result<Vec<Identifier>> {
        let mut seen = HashSet::new();
        let mut results = Vec::new();
        for quad in
            self.store
                .quads_for_pattern(None, None, None, Some(self.graph_name.as_ref()))
        {
            let subject = quad?.subject;
            if seen.insert(subject.clone()) {
                results.push(subject);
            }
        }
        Ok(results)
    }

    fn has_subject(&self, subject: NamedOrBlankNodeRef<'_>) -> Result<bool> {
        match self
            .store
            .quads_for_pattern(Some(subject), None, None, Some(self.graph_name.as_ref()))
            .next()
        {
            Some(quad) => quad.map(|_| true).map_err(Error::from),
            None => Ok(false),
        }
    }
}

/// Supplies labels for blank nodes minted while encoding.
pub trait BlankNodeGenerator {
    fn next_blank_node(&mut self) -> BlankNode;
}

/// Mints `b0`, `b1`, ... (or `<prefix>0`, ...). Deterministic for a given write order.
#[derive(Debug, Clone)]
pub struct CountingBlankNodeGenerator {
    prefix: String,
    next: u64,
}

impl Default for CountingBlankNodeGenerator {
    fn default() -> Self {
        Self {
            prefix: "b".to_string(),
            next: 0,
        }
    }
}

impl CountingBlankNodeGenerator {
    pub fn with_prefix(prefix: &str) -> Result<Self> {
        BlankNode::new(format!("{prefix}0")).map_err(|e| Error::InvalidIdentifier {
            value: format!("_:{prefix}0"),
            message: e.to_string(),
        })?;
        Ok(Self {
            prefix: prefix.to_string(),
            next: 0,
        })
    }
}

impl BlankNodeGenerator for CountingBlankNodeGenerator {
    fn next_blank_node(&mut self) -> BlankNode {
        let node = BlankNode::new_unchecked(format!("{}{}", self.prefix, self.next));
        self.next += 1;
        node
    }
}

/// Random, globally unique labels.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomBlankNodeGenerator;

impl BlankNodeGenerator for RandomBlankNodeGenerator {
    fn next_blank_node(&mut self) -> BlankNode {
        BlankNode::default()
    }
}

/// Mutable destination for encoded triples.
///
/// Not safe for concurrent mutation; callers serialize writes.
pub trait TripleSink {
    fn insert(&mut self, triple: TripleRef<'_>);

    fn mint_blank_node(&mut self) -> BlankNode;

    fn resource(&mut self, identifier: Identifier) -> MutableResource<'_, Self> {
        MutableResource {
            sink: self,
            identifier,
        }
    }
}

/// Handle for adding triples about one subject.
pub struct MutableResource<'s, K: TripleSink + ?Sized> {
    sink: &'s mut K,
    identifier: Identifier,
}

impl<K: TripleSink + ?Sized> MutableResource<'_, K> {
    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    pub fn sink(&mut self) -> &mut K {
        &mut *self.sink
    }

    pub fn add(&mut self, predicate: NamedNodeRef<'_>, object: impl Into<Term>) {
        let object = object.into();
        self.sink.insert(TripleRef::new(
            self.identifier.as_ref(),
            predicate,
            object.as_ref(),
        ));
    }

    pub fn add_all<T: Into<Term>>(
        &mut self,
        predicate: NamedNodeRef<'_>,
        objects: impl IntoIterator<Item = T>,
    ) {
        for object in objects {
            self.add(predicate, object);
        }
    }

    pub fn add_optional(&mut self, predicate: NamedNodeRef<'_>, object: Option<impl Into<Term>>) {
        if let Some(object) = object {
            self.add(predicate, object);
        }
    }
}

/// Accumulates encoded triples into an in-memory [`Graph`].
#[derive(Debug, Default)]
pub struct GraphBuilder<G: BlankNodeGenerator = CountingBlankNodeGenerator> {
    graph: Graph,
    blank_nodes: G,
}

impl GraphBuilder<CountingBlankNodeGenerator> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<G: BlankNodeGenerator> GraphBuilder<G> {
    pub fn with_generator(blank_nodes: G) -> Self {
        Self {
            graph: Graph::new(),
            blank_nodes,
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn into_graph(self) -> Graph {
        self.graph
    }
}

impl<G: BlankNodeGenerator> TripleSink for GraphBuilder<G> {
    fn insert(&mut self, triple: TripleRef<'_>) {
        self.graph.insert(triple);
    }

    fn mint_blank_node(&mut self) -> BlankNode {
        self.blank_nodes.next_blank_node()
    }
}

/// Parses RDF in the given syntax into a graph; named graphs are merged into it.
pub fn parse_graph(reader: impl Read, format: RdfFormat) -> Result<Graph> {
    let mut graph = Graph::new();
    for quad in RdfParser::from_format(format).for_reader(reader) {
        let triple: Triple = quad?.into();
        graph.insert(&triple);
    }
    Ok(graph)
}

/// Reads an RDF file, choosing the syntax from its extension (Turtle when unknown).
pub fn read_graph(path: &Path) -> Result<Graph> {
    let format = path
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(RdfFormat::from_extension)
        .unwrap_or(RdfFormat::Turtle);
    let file = File::open(path)?;
    let graph = parse_graph(BufReader::new(file), format)?;
    info!(
        "Loaded {} triples from {} ({:?})",
        graph.len(),
        path.display(),
        format
    );
    Ok(graph)
}

/// Serializes `graph` in the given syntax and returns the writer.
pub fn write_graph<W: Write>(graph: &Graph, writer: W, format: RdfFormat) -> Result<W> {
    let mut serializer = RdfSerializer::from_format(format).for_writer(writer);
    for triple in graph.iter() {
        serializer.serialize_triple(triple)?;
    }
    Ok(serializer.finish()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::graph_from_turtle;
    use oxigraph::model::{Literal, NamedNode};

    const DATA: &str = r#"
        @prefix ex: <http://example.com/> .
        ex:a a ex:Thing ; ex:p "1" .
        ex:b a ex:Thing , ex:Other .
        _:c ex:p ex:a .
    "#;

    fn check_source(source: &impl TripleSource) {
        let thing = NamedNodeRef::new_unchecked("http://example.com/Thing");
        let mut instances: Vec<String> = source
            .instances_of(thing)
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect();
        instances.sort();
        assert_eq!(
            instances,
            vec!["<http://example.com/a>", "<http://example.com/b>"]
        );
        assert_eq!(source.subjects().unwrap().len(), 3);

        let a = NamedNodeRef::new_unchecked("http://example.com/a");
        let p = NamedNodeRef::new_unchecked("http://example.com/p");
        assert_eq!(
            source.objects(a.into(), p).unwrap(),
            vec![Term::from(Literal::new_simple_literal("1"))]
        );
        assert!(source.has_subject(a.into()).unwrap());
        let missing = NamedNodeRef::new_unchecked("http://example.com/missing");
        assert!(!source.has_subject(missing.into()).unwrap());
    }

    #[test]
    fn graph_and_store_sources_agree() {
        let graph = graph_from_turtle(DATA).unwrap();
        check_source(&graph);

        let store = Store::new().unwrap();
        let named = StoreGraph::new(
            &store,
            NamedNode::new_unchecked("urn:graph:data").into(),
        );
        named.insert_graph(&graph).unwrap();
        check_source(&named);
        // nothing leaked into the default graph
        assert!(StoreGraph::default_graph(&store).subjects().unwrap().is_empty());
    }

    #[test]
    fn counting_generator_is_deterministic() {
        let mut a = CountingBlankNodeGenerator::default();
        let mut b = CountingBlankNodeGenerator::default();
        let labels: Vec<String> = (0..3).map(|_| a.next_blank_node().to_string()).collect();
        assert_eq!(labels, vec!["_:b0", "_:b1", "_:b2"]);
        assert_eq!(b.next_blank_node().as_str(), "b0");
        assert!(CountingBlankNodeGenerator::with_prefix("list").is_ok());
        assert!(CountingBlankNodeGenerator::with_prefix("not valid").is_err());
    }

    #[test]
    fn mutable_resource_adds_triples() {
        let mut builder = GraphBuilder::new();
        let subject: Identifier = NamedNode::new_unchecked("http://example.com/s").into();
        let p = NamedNodeRef::new_unchecked("http://example.com/p");
        {
            let mut resource = builder.resource(subject.clone());
            resource.add(p, Literal::from(1_i64));
            resource.add_all(p, [Literal::from(2_i64), Literal::from(3_i64)]);
            resource.add_optional(p, None::<Literal>);
        }
        assert_eq!(builder.graph().len(), 3);
        assert_eq!(builder.graph().objects(subject.as_ref(), p).unwrap().len(), 3);
    }
}
