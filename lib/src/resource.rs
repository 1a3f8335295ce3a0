//! Read access to the triples about one subject.

use crate::error::{Error, Result};
use crate::named_nodes::{RDF, RDFS};
use crate::store::TripleSource;
use crate::term::{term_to_identifier, Identifier, IdentifierSet, Value};
use log::debug;
use oxigraph::model::{NamedNodeRef, NamedOrBlankNodeRef, Term};
use std::collections::VecDeque;

/// A subject of a [`TripleSource`] being decoded.
pub struct Resource<'a, S: TripleSource + ?Sized> {
    source: &'a S,
    identifier: Identifier,
}

impl<'a, S: TripleSource + ?Sized> Resource<'a, S> {
    pub fn new(source: &'a S, identifier: Identifier) -> Self {
        Resource { source, identifier }
    }

    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    pub fn source(&self) -> &'a S {
        self.source
    }

    /// Distinct values of `predicate`, ordered by their N-Triples form so that
    /// reads do not depend on the iteration order of the backing store.
    pub fn values<'r>(&'r self, predicate: NamedNodeRef<'r>) -> Result<Vec<Value<'r>>> {
        let mut terms = self.source.objects(self.identifier.as_ref(), predicate)?;
        terms.sort_by_cached_key(Term::to_string);
        terms.dedup();
        Ok(terms
            .into_iter()
            .map(|term| Value::new(term, &self.identifier, predicate))
            .collect())
    }

    /// First value of `predicate`; further values are ignored.
    pub fn value<'r>(&'r self, predicate: NamedNodeRef<'r>) -> Result<Option<Value<'r>>> {
        Ok(self.values(predicate)?.into_iter().next())
    }

    /// Exactly-one field: the first value, narrowed by `convert`.
    pub fn required<'r, T>(
        &'r self,
        predicate: NamedNodeRef<'r>,
        convert: impl Fn(&Value<'r>) -> Result<T>,
    ) -> Result<T> {
        match self.value(predicate)? {
            Some(value) => convert(&value),
            None => Err(Error::MissingValue {
                subject: self.identifier.clone(),
                predicate: predicate.into_owned(),
            }),
        }
    }

    /// Zero-or-one field: the first value if any, narrowed by `convert`.
    pub fn optional<'r, T>(
        &'r self,
        predicate: NamedNodeRef<'r>,
        convert: impl Fn(&Value<'r>) -> Result<T>,
    ) -> Result<Option<T>> {
        self.value(predicate)?.as_ref().map(convert).transpose()
    }

    /// Unordered collection field: every value, each narrowed by `convert`.
    pub fn all<'r, T>(
        &'r self,
        predicate: NamedNodeRef<'r>,
        convert: impl Fn(&Value<'r>) -> Result<T>,
    ) -> Result<Vec<T>> {
        self.values(predicate)?.iter().map(convert).collect()
    }

    /// Whether the resource is an instance of `class`, directly or through any
    /// number of `rdfs:subClassOf` steps from one of its asserted types.
    pub fn is_instance_of(&self, class: NamedNodeRef<'_>) -> Result<bool> {
        let rdf = RDF::new();
        let rdfs = RDFS::new();
        let class: NamedOrBlankNodeRef<'_> = class.into();
        let mut visited = IdentifierSet::new();
        let mut queue: VecDeque<Identifier> = self
            .source
            .objects(self.identifier.as_ref(), rdf.type_)?
            .iter()
            .filter_map(term_to_identifier)
            .collect();
        while let Some(current) = queue.pop_front() {
            if !visited.insert(current.clone()) {
                continue;
            }
            if current.as_ref() == class {
                return Ok(true);
            }
            for parent in self.source.objects(current.as_ref(), rdfs.sub_class_of)? {
                if let Some(parent) = term_to_identifier(&parent) {
                    if !visited.contains(&parent) {
                        queue.push_back(parent);
                    }
                }
            }
        }
        Ok(false)
    }

    /// Verifies the resource's `rdf:type` against `expected`.
    ///
    /// Accepts an asserted type equal to `expected` or to one of the statically
    /// known `descendants`, then falls back to the open-world `rdfs:subClassOf`
    /// walk. Fails with [`Error::UnexpectedType`] otherwise.
    pub fn check_rdf_type(
        &self,
        expected: NamedNodeRef<'_>,
        descendants: &[NamedNodeRef<'_>],
    ) -> Result<()> {
        let rdf = RDF::new();
        let types = self.values(rdf.type_)?;
        let known = types.iter().any(|value| match value.term() {
            Term::NamedNode(n) => {
                n.as_ref() == expected || descendants.iter().any(|d| *d == n.as_ref())
            }
            _ => false,
        });
        if known {
            return Ok(());
        }
        if self.is_instance_of(expected)? {
            debug!(
                "{} accepted as {} through rdfs:subClassOf",
                self.identifier, expected
            );
            return Ok(());
        }
        Err(Error::UnexpectedType {
            subject: self.identifier.clone(),
            actual: types.into_iter().next().map(Value::into_term),
            expected: expected.into_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::graph_from_turtle;
    use oxigraph::model::{Literal, NamedNode};

    const DATA: &str = r#"
        @prefix ex: <http://example.com/> .
        @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
        ex:Animal rdfs:subClassOf ex:Thing .
        ex:Dog rdfs:subClassOf ex:Animal .
        ex:Loop rdfs:subClassOf ex:Loop2 .
        ex:Loop2 rdfs:subClassOf ex:Loop .
        ex:rex a ex:Dog ; ex:name "b", "a", "a" .
        ex:ring a ex:Loop .
        ex:rock a ex:Mineral .
    "#;

    fn id(local: &str) -> Identifier {
        NamedNode::new_unchecked(format!("http://example.com/{local}")).into()
    }

    #[test]
    fn values_are_sorted_and_distinct() {
        let graph = graph_from_turtle(DATA).unwrap();
        let rex = Resource::new(&graph, id("rex"));
        let name = NamedNodeRef::new_unchecked("http://example.com/name");
        let names = rex.all(name, |v| v.to_string_value()).unwrap();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(
            rex.required(name, |v| v.to_literal()).unwrap(),
            Literal::new_simple_literal("a")
        );
        let missing = NamedNodeRef::new_unchecked("http://example.com/missing");
        assert!(rex.optional(missing, |v| v.to_literal()).unwrap().is_none());
        assert!(matches!(
            rex.required(missing, |v| v.to_literal()),
            Err(Error::MissingValue { .. })
        ));
    }

    #[test]
    fn subclass_walk_is_transitive_and_terminates_on_cycles() {
        let graph = graph_from_turtle(DATA).unwrap();
        let thing = NamedNodeRef::new_unchecked("http://example.com/Thing");
        assert!(Resource::new(&graph, id("rex")).is_instance_of(thing).unwrap());
        assert!(!Resource::new(&graph, id("ring")).is_instance_of(thing).unwrap());
        assert!(!Resource::new(&graph, id("rock")).is_instance_of(thing).unwrap());
    }

    #[test]
    fn type_check_reports_actual_and_expected() {
        let graph = graph_from_turtle(DATA).unwrap();
        let thing = NamedNodeRef::new_unchecked("http://example.com/Thing");
        let dog = NamedNodeRef::new_unchecked("http://example.com/Dog");
        let rex = Resource::new(&graph, id("rex"));
        assert!(rex.check_rdf_type(thing, &[]).is_ok());
        let pet = NamedNodeRef::new_unchecked("http://example.com/Pet");
        assert!(rex.check_rdf_type(pet, &[dog]).is_ok(), "known descendant type");

        match Resource::new(&graph, id("rock")).check_rdf_type(thing, &[dog]) {
            Err(Error::UnexpectedType {
                subject,
                actual,
                expected,
            }) => {
                assert_eq!(subject, id("rock"));
                assert_eq!(
                    actual,
                    Some(NamedNode::new_unchecked("http://example.com/Mineral").into())
                );
                assert_eq!(expected.as_ref(), thing);
            }
            other => panic!("unexpected result {other:?}"),
        }
    }
}
