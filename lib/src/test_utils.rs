//! Helpers for tests that build graphs from inline Turtle and compare encoded output.

use crate::error::Result;
use crate::store::{parse_graph, write_graph};
use oxigraph::io::RdfFormat;
use oxigraph::model::{Graph, NamedNode, Term};
use petgraph::algo::is_isomorphic_matching;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

pub fn graph_from_turtle(turtle: &str) -> Result<Graph> {
    parse_graph(turtle.as_bytes(), RdfFormat::Turtle)
}

pub fn graph_to_turtle(graph: &Graph) -> Result<String> {
    let bytes = write_graph(graph, Vec::new(), RdfFormat::Turtle)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Subjects and objects become nodes, each triple an edge weighted by its predicate.
fn to_petgraph(graph: &Graph) -> DiGraph<Term, NamedNode> {
    let mut digraph = DiGraph::<Term, NamedNode>::new();
    let mut nodes = HashMap::<Term, NodeIndex>::new();
    for triple in graph.iter() {
        let subject = Term::from(triple.subject.into_owned());
        let object = triple.object.into_owned();
        let s = *nodes
            .entry(subject.clone())
            .or_insert_with(|| digraph.add_node(subject));
        let o = *nodes
            .entry(object.clone())
            .or_insert_with(|| digraph.add_node(object));
        digraph.add_edge(s, o, triple.predicate.into_owned());
    }
    digraph
}

/// Graph equality up to blank node relabelling.
pub fn are_isomorphic(left: &Graph, right: &Graph) -> bool {
    if left.len() != right.len() {
        return false;
    }
    is_isomorphic_matching(
        &to_petgraph(left),
        &to_petgraph(right),
        |a, b| match (a, b) {
            (Term::BlankNode(_), Term::BlankNode(_)) => true,
            _ => a == b,
        },
        |a, b| a == b,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn isomorphism_ignores_blank_node_labels() {
        let a = graph_from_turtle(
            r#"@prefix ex: <http://example.com/> . ex:s ex:p [ ex:q "1" ] ."#,
        )
        .unwrap();
        let b = graph_from_turtle(
            r#"@prefix ex: <http://example.com/> . ex:s ex:p _:other . _:other ex:q "1" ."#,
        )
        .unwrap();
        let c = graph_from_turtle(
            r#"@prefix ex: <http://example.com/> . ex:s ex:p [ ex:q "2" ] ."#,
        )
        .unwrap();
        assert!(are_isomorphic(&a, &b));
        assert!(!are_isomorphic(&a, &c));
        let reparsed = graph_from_turtle(&graph_to_turtle(&a).unwrap()).unwrap();
        assert!(are_isomorphic(&a, &reparsed));
    }
}
