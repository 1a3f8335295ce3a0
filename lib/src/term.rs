//! Identifiers and narrowing of generic terms read from the graph.

use crate::error::{Error, Result};
use oxigraph::model::vocab::{rdf, xsd};
use oxigraph::model::{BlankNode, Literal, NamedNode, NamedNodeRef, NamedOrBlankNode, Term};
use std::collections::HashSet;
use std::fmt;

/// Object identity: a blank node or a named node.
pub type Identifier = NamedOrBlankNode;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum IdentifierKind {
    BlankNode,
    NamedNode,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TermKind {
    BlankNode,
    Literal,
    NamedNode,
}

impl fmt::Display for TermKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TermKind::BlankNode => write!(f, "BlankNode"),
            TermKind::Literal => write!(f, "Literal"),
            TermKind::NamedNode => write!(f, "NamedNode"),
        }
    }
}

pub fn identifier_kind(identifier: &Identifier) -> IdentifierKind {
    match identifier {
        NamedOrBlankNode::NamedNode(_) => IdentifierKind::NamedNode,
        NamedOrBlankNode::BlankNode(_) => IdentifierKind::BlankNode,
    }
}

pub fn term_kind(term: &Term) -> TermKind {
    match term {
        Term::NamedNode(_) => TermKind::NamedNode,
        Term::BlankNode(_) => TermKind::BlankNode,
        Term::Literal(_) => TermKind::Literal,
    }
}

/// Canonical text form of an identifier (`<iri>` or `_:label`), also used as sort key.
pub fn identifier_to_string(identifier: &Identifier) -> String {
    identifier.to_string()
}

/// Parses the canonical text form back into an identifier. A bare IRI is accepted as well.
pub fn parse_identifier(value: &str) -> Result<Identifier> {
    let invalid = |message: String| Error::InvalidIdentifier {
        value: value.to_string(),
        message,
    };
    if let Some(label) = value.strip_prefix("_:") {
        return BlankNode::new(label)
            .map(Into::into)
            .map_err(|e| invalid(e.to_string()));
    }
    let iri = value
        .strip_prefix('<')
        .and_then(|rest| rest.strip_suffix('>'))
        .unwrap_or(value);
    NamedNode::new(iri)
        .map(Into::into)
        .map_err(|e| invalid(e.to_string()))
}

pub fn term_to_identifier(term: &Term) -> Option<Identifier> {
    match term {
        Term::NamedNode(n) => Some(n.clone().into()),
        Term::BlankNode(b) => Some(b.clone().into()),
        Term::Literal(_) => None,
    }
}

/// Deduplicating set of identifiers with O(1) membership, keyed by kind and value.
#[derive(Debug, Default, Clone)]
pub struct IdentifierSet {
    members: HashSet<Identifier>,
}

impl IdentifierSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the identifier was not already present.
    pub fn insert(&mut self, identifier: Identifier) -> bool {
        self.members.insert(identifier)
    }

    /// Returns `true` if the identifier was present.
    pub fn remove(&mut self, identifier: &Identifier) -> bool {
        self.members.remove(identifier)
    }

    pub fn contains(&self, identifier: &Identifier) -> bool {
        self.members.contains(identifier)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Members sorted by their canonical text form.
    pub fn into_sorted_vec(self) -> Vec<Identifier> {
        let mut members: Vec<Identifier> = self.members.into_iter().collect();
        sort_identifiers(&mut members);
        members
    }
}

impl FromIterator<Identifier> for IdentifierSet {
    fn from_iter<I: IntoIterator<Item = Identifier>>(iter: I) -> Self {
        IdentifierSet {
            members: iter.into_iter().collect(),
        }
    }
}

pub fn sort_identifiers(identifiers: &mut [Identifier]) {
    identifiers.sort_by_cached_key(identifier_to_string);
}

const INTEGER_DATATYPES: [NamedNodeRef<'static>; 13] = [
    xsd::INTEGER,
    xsd::NON_NEGATIVE_INTEGER,
    xsd::POSITIVE_INTEGER,
    xsd::NON_POSITIVE_INTEGER,
    xsd::NEGATIVE_INTEGER,
    xsd::LONG,
    xsd::INT,
    xsd::SHORT,
    xsd::BYTE,
    xsd::UNSIGNED_LONG,
    xsd::UNSIGNED_INT,
    xsd::UNSIGNED_SHORT,
    xsd::UNSIGNED_BYTE,
];

const DECIMAL_DATATYPES: [NamedNodeRef<'static>; 3] = [xsd::DECIMAL, xsd::DOUBLE, xsd::FLOAT];

fn is_integer_datatype(datatype: NamedNodeRef<'_>) -> bool {
    INTEGER_DATATYPES.iter().any(|d| *d == datatype)
}

/// A term read from `subject`'s `predicate`, kept together with where it came
/// from so narrowing failures can say so.
#[derive(Debug, Clone)]
pub struct Value<'a> {
    term: Term,
    subject: &'a Identifier,
    predicate: NamedNodeRef<'a>,
}

impl<'a> Value<'a> {
    pub fn new(term: Term, subject: &'a Identifier, predicate: NamedNodeRef<'a>) -> Self {
        Value {
            term,
            subject,
            predicate,
        }
    }

    pub fn term(&self) -> &Term {
        &self.term
    }

    pub fn into_term(self) -> Term {
        self.term
    }

    pub fn subject(&self) -> &'a Identifier {
        self.subject
    }

    pub fn predicate(&self) -> NamedNodeRef<'a> {
        self.predicate
    }

    /// Same provenance, different term. Used for list items.
    pub(crate) fn with_term(&self, term: Term) -> Value<'a> {
        Value {
            term,
            subject: self.subject,
            predicate: self.predicate,
        }
    }

    pub(crate) fn wrong_kind(&self, expected: impl Into<String>) -> Error {
        Error::WrongTermKind {
            subject: self.subject.clone(),
            predicate: self.predicate.into_owned(),
            actual: self.term.clone(),
            expected: expected.into(),
        }
    }

    pub fn to_identifier(&self) -> Result<Identifier> {
        term_to_identifier(&self.term).ok_or_else(|| self.wrong_kind("BlankNode or NamedNode"))
    }

    pub fn to_named_node(&self) -> Result<NamedNode> {
        match &self.term {
            Term::NamedNode(n) => Ok(n.clone()),
            _ => Err(self.wrong_kind("NamedNode")),
        }
    }

    /// Narrows to one of a closed set of IRIs.
    pub fn to_named_node_in(&self, allowed: &[NamedNodeRef<'_>]) -> Result<NamedNode> {
        let named_node = self.to_named_node()?;
        if allowed.iter().any(|a| *a == named_node.as_ref()) {
            Ok(named_node)
        } else {
            let expected: Vec<String> = allowed.iter().map(ToString::to_string).collect();
            Err(self.wrong_kind(format!("one of {}", expected.join(", "))))
        }
    }

    pub fn to_literal(&self) -> Result<Literal> {
        match &self.term {
            Term::Literal(l) => Ok(l.clone()),
            _ => Err(self.wrong_kind("Literal")),
        }
    }

    /// Narrows to a literal or a named node, as used by `sh:hasValue` and `sh:in`.
    pub fn to_iri_or_literal(&self) -> Result<Term> {
        match &self.term {
            Term::BlankNode(_) => Err(self.wrong_kind("Literal or NamedNode")),
            _ => Ok(self.term.clone()),
        }
    }

    pub fn to_boolean(&self) -> Result<bool> {
        let literal = self.to_literal()?;
        if literal.datatype() != xsd::BOOLEAN {
            return Err(self.wrong_kind("xsd:boolean literal"));
        }
        match literal.value() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => Err(self.wrong_kind("xsd:boolean literal")),
        }
    }

    pub fn to_u64(&self) -> Result<u64> {
        let literal = self.to_literal()?;
        if !is_integer_datatype(literal.datatype()) {
            return Err(self.wrong_kind("non-negative integer literal"));
        }
        literal
            .value()
            .trim()
            .trim_start_matches('+')
            .parse::<u64>()
            .map_err(|_| self.wrong_kind("non-negative integer literal"))
    }

    pub fn to_f64(&self) -> Result<f64> {
        let literal = self.to_literal()?;
        let datatype = literal.datatype();
        if !is_integer_datatype(datatype) && !DECIMAL_DATATYPES.iter().any(|d| *d == datatype) {
            return Err(self.wrong_kind("numeric literal"));
        }
        literal
            .value()
            .trim()
            .parse::<f64>()
            .map_err(|_| self.wrong_kind("numeric literal"))
    }

    /// Plain or language-tagged string value.
    pub fn to_string_value(&self) -> Result<String> {
        let literal = self.to_literal()?;
        if literal.datatype() == xsd::STRING || literal.datatype() == rdf::LANG_STRING {
            Ok(literal.value().to_string())
        } else {
            Err(self.wrong_kind("string literal"))
        }
    }
}
