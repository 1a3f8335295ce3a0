use crate::error::Result;
use crate::list::{decode_list, encode_list};
use crate::named_nodes::{RDF, SHACL};
use crate::resource::Resource;
use crate::store::{TripleSink, TripleSource};
use crate::term::{Identifier, IdentifierSet, Value};
use oxigraph::model::{NamedNode, NamedNodeRef, Term, TripleRef};
use std::fmt;

/// A SHACL property path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropertyPath {
    Predicate(NamedNode),
    Inverse(Box<PropertyPath>),
    Sequence(Vec<PropertyPath>),
    Alternative(Vec<PropertyPath>),
    ZeroOrMore(Box<PropertyPath>),
    OneOrMore(Box<PropertyPath>),
    ZeroOrOne(Box<PropertyPath>),
}

impl PropertyPath {
    /// Decodes the path node held by `value` (typically the object of `sh:path`).
    ///
    /// A path node that contains itself is rejected with
    /// [`Error::WrongTermKind`](crate::Error::WrongTermKind). Sub-paths shared
    /// between branches are fine.
    pub fn from_value<S: TripleSource + ?Sized>(source: &S, value: &Value<'_>) -> Result<Self> {
        Self::decode(source, value, &mut IdentifierSet::new())
    }

    /// `active` holds the path nodes on the current branch of the recursion.
    fn decode<S: TripleSource + ?Sized>(
        source: &S,
        value: &Value<'_>,
        active: &mut IdentifierSet,
    ) -> Result<Self> {
        if let Term::NamedNode(predicate) = value.term() {
            if predicate.as_ref() != RDF::new().nil {
                return Ok(PropertyPath::Predicate(predicate.clone()));
            }
        }
        let identifier = value.to_identifier()?;
        if !active.insert(identifier.clone()) {
            return Err(value.wrong_kind("acyclic SHACL property path"));
        }
        let path = Self::decode_node(source, value, identifier.clone(), active);
        active.remove(&identifier);
        path
    }

    fn decode_node<S: TripleSource + ?Sized>(
        source: &S,
        value: &Value<'_>,
        identifier: Identifier,
        active: &mut IdentifierSet,
    ) -> Result<Self> {
        let sh = SHACL::new();
        let node = Resource::new(source, identifier);

        if node.value(RDF::new().first)?.is_some() {
            let mut steps = Vec::new();
            for step in decode_list(source, value)? {
                steps.push(Self::decode(source, &step, active)?);
            }
            return Ok(PropertyPath::Sequence(steps));
        }
        if let Some(head) = node.value(sh.alternative_path)? {
            let mut alternatives = Vec::new();
            for alternative in decode_list(source, &head)? {
                alternatives.push(Self::decode(source, &alternative, active)?);
            }
            return Ok(PropertyPath::Alternative(alternatives));
        }
        let unary: [(NamedNodeRef<'_>, fn(Box<PropertyPath>) -> PropertyPath); 4] = [
            (sh.inverse_path, PropertyPath::Inverse),
            (sh.zero_or_more_path, PropertyPath::ZeroOrMore),
            (sh.one_or_more_path, PropertyPath::OneOrMore),
            (sh.zero_or_one_path, PropertyPath::ZeroOrOne),
        ];
        for (predicate, wrap) in unary {
            if let Some(inner) = node.value(predicate)? {
                return Ok(wrap(Box::new(Self::decode(source, &inner, active)?)));
            }
        }
        Err(value.wrong_kind("SHACL property path"))
    }

    /// Writes the path and returns the term that `sh:path` should point at.
    pub fn to_rdf<K: TripleSink + ?Sized>(&self, sink: &mut K) -> Term {
        let sh = SHACL::new();
        let (predicate, inner) = match self {
            PropertyPath::Predicate(predicate) => return predicate.clone().into(),
            PropertyPath::Sequence(steps) => {
                let items: Vec<Term> = steps.iter().map(|step| step.to_rdf(sink)).collect();
                return encode_list(sink, items);
            }
            PropertyPath::Alternative(alternatives) => {
                let items: Vec<Term> = alternatives.iter().map(|a| a.to_rdf(sink)).collect();
                let head = encode_list(sink, items);
                let node = sink.mint_blank_node();
                sink.insert(TripleRef::new(&node, sh.alternative_path, &head));
                return node.into();
            }
            PropertyPath::Inverse(inner) => (sh.inverse_path, inner),
            PropertyPath::ZeroOrMore(inner) => (sh.zero_or_more_path, inner),
            PropertyPath::OneOrMore(inner) => (sh.one_or_more_path, inner),
            PropertyPath::ZeroOrOne(inner) => (sh.zero_or_one_path, inner),
        };
        let inner = inner.to_rdf(sink);
        let node = sink.mint_blank_node();
        sink.insert(TripleRef::new(&node, predicate, &inner));
        node.into()
    }

    /// SPARQL 1.1 property path syntax. Sequences and alternatives are parenthesized.
    pub fn to_sparql_path(&self) -> String {
        let join = |paths: &[PropertyPath], separator: &str| {
            let parts: Vec<String> = paths.iter().map(PropertyPath::to_sparql_path).collect();
            match parts.len() {
                1 => parts.concat(),
                _ => format!("({})", parts.join(separator)),
            }
        };
        match self {
            PropertyPath::Predicate(predicate) => predicate.to_string(),
            PropertyPath::Inverse(inner) => format!("^{}", inner.to_sparql_path()),
            PropertyPath::Sequence(steps) => join(steps, " / "),
            PropertyPath::Alternative(alternatives) => join(alternatives, " | "),
            PropertyPath::ZeroOrMore(inner) => format!("{}*", inner.to_sparql_path()),
            PropertyPath::OneOrMore(inner) => format!("{}+", inner.to_sparql_path()),
            PropertyPath::ZeroOrOne(inner) => format!("{}?", inner.to_sparql_path()),
        }
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_sparql_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::store::GraphBuilder;
    use crate::test_utils::graph_from_turtle;

    const DATA: &str = r#"
        @prefix sh: <http://www.w3.org/ns/shacl#> .
        @prefix ex: <http://example.com/> .
        ex:simple sh:path ex:a .
        ex:complex sh:path (
            [ sh:inversePath ex:b ]
            [ sh:alternativePath ( ex:c [ sh:zeroOrMorePath ex:d ] ) ]
            [ sh:oneOrMorePath ex:e ]
        ) .
        ex:broken sh:path [ ex:unrelated ex:f ] .
        ex:selfInverse sh:path _:x .
        _:x sh:inversePath _:x .
        ex:selfAlternative sh:path _:y .
        _:y sh:alternativePath ( ex:g _:y ) .
        ex:shared sh:path [ sh:alternativePath ( _:z _:z ) ] .
        _:z sh:inversePath ex:h .
    "#;

    fn ex(local: &str) -> NamedNode {
        NamedNode::new_unchecked(format!("http://example.com/{local}"))
    }

    fn path_of<S: TripleSource + ?Sized>(source: &S, subject: &Identifier) -> Result<PropertyPath> {
        let resource = Resource::new(source, subject.clone());
        resource.required(SHACL::new().path, |v| PropertyPath::from_value(source, v))
    }

    #[test]
    fn decodes_nested_paths() {
        let graph = graph_from_turtle(DATA).unwrap();
        assert_eq!(
            path_of(&graph, &ex("simple").into()).unwrap(),
            PropertyPath::Predicate(ex("a"))
        );
        let complex = path_of(&graph, &ex("complex").into()).unwrap();
        assert_eq!(
            complex,
            PropertyPath::Sequence(vec![
                PropertyPath::Inverse(Box::new(PropertyPath::Predicate(ex("b")))),
                PropertyPath::Alternative(vec![
                    PropertyPath::Predicate(ex("c")),
                    PropertyPath::ZeroOrMore(Box::new(PropertyPath::Predicate(ex("d")))),
                ]),
                PropertyPath::OneOrMore(Box::new(PropertyPath::Predicate(ex("e")))),
            ])
        );
        assert_eq!(
            complex.to_sparql_path(),
            "(^<http://example.com/b> / (<http://example.com/c> | <http://example.com/d>*) / <http://example.com/e>+)"
        );
        assert!(path_of(&graph, &ex("broken").into()).is_err());
    }

    #[test]
    fn cyclic_paths_are_rejected() {
        let graph = graph_from_turtle(DATA).unwrap();
        for subject in ["selfInverse", "selfAlternative"] {
            assert!(
                matches!(
                    path_of(&graph, &ex(subject).into()),
                    Err(Error::WrongTermKind { .. })
                ),
                "{subject}"
            );
        }
        let inverse_h = PropertyPath::Inverse(Box::new(PropertyPath::Predicate(ex("h"))));
        assert_eq!(
            path_of(&graph, &ex("shared").into()).unwrap(),
            PropertyPath::Alternative(vec![inverse_h.clone(), inverse_h])
        );
    }

    #[test]
    fn encoded_paths_decode_to_the_same_path() {
        let graph = graph_from_turtle(DATA).unwrap();
        let original = path_of(&graph, &ex("complex").into()).unwrap();

        let mut builder = GraphBuilder::new();
        let subject: Identifier = ex("copy").into();
        let head = original.to_rdf(&mut builder);
        builder.resource(subject.clone()).add(SHACL::new().path, head);
        let encoded = builder.into_graph();
        assert_eq!(path_of(&encoded, &subject).unwrap(), original);
    }

    #[test]
    fn predicate_paths_are_not_wrapped() {
        let mut builder = GraphBuilder::new();
        let term = PropertyPath::Predicate(ex("a")).to_rdf(&mut builder);
        assert_eq!(term, Term::from(ex("a")));
        assert!(builder.graph().is_empty());
        let p = NamedNodeRef::new_unchecked("http://example.com/a");
        assert_eq!(PropertyPath::Predicate(p.into_owned()).to_string(), "<http://example.com/a>");
    }
}
