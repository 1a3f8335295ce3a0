//! Encoding and decoding of RDF collections (`rdf:first`/`rdf:rest` chains).

use crate::error::{Error, Result};
use crate::named_nodes::RDF;
use crate::store::{TripleSink, TripleSource};
use crate::term::{term_to_identifier, IdentifierSet, Value};
use oxigraph::model::{Term, TripleRef};

/// Decodes the list whose head node is `head`, in list order.
///
/// Items keep the provenance of `head` so narrowing errors point at the field
/// that holds the list. Fails on a literal node, a missing `rdf:first` or
/// `rdf:rest`, or a chain that revisits a node.
pub fn decode_list<'v, S: TripleSource + ?Sized>(
    source: &S,
    head: &Value<'v>,
) -> Result<Vec<Value<'v>>> {
    let rdf = RDF::new();
    let malformed = |node: &Term, message: &str| Error::MalformedList {
        subject: head.subject().clone(),
        predicate: head.predicate().into_owned(),
        node: node.clone(),
        message: message.to_string(),
    };

    let mut items = Vec::new();
    let mut visited = IdentifierSet::new();
    let mut current = head.term().clone();
    loop {
        if let Term::NamedNode(n) = &current {
            if n.as_ref() == rdf.nil {
                return Ok(items);
            }
        }
        let node = term_to_identifier(&current)
            .ok_or_else(|| malformed(&current, "list node is a literal"))?;
        if !visited.insert(node.clone()) {
            return Err(malformed(&current, "list is cyclic"));
        }
        let first = first_in_order(source.objects(node.as_ref(), rdf.first)?)
            .ok_or_else(|| malformed(&current, "missing rdf:first"))?;
        items.push(head.with_term(first));
        current = first_in_order(source.objects(node.as_ref(), rdf.rest)?)
            .ok_or_else(|| malformed(&current, "missing rdf:rest"))?;
    }
}

/// Decodes a list and narrows every item with `convert`.
pub fn decode_list_with<'v, S: TripleSource + ?Sized, T>(
    source: &S,
    head: &Value<'v>,
    convert: impl Fn(&Value<'v>) -> Result<T>,
) -> Result<Vec<T>> {
    decode_list(source, head)?.iter().map(convert).collect()
}

fn first_in_order(terms: Vec<Term>) -> Option<Term> {
    terms.into_iter().min_by_key(Term::to_string)
}

/// Encodes `items` as a list and returns the term the owning field must point at:
/// `rdf:nil` for an empty sequence, otherwise the head node.
pub fn encode_list<K, T>(sink: &mut K, items: impl IntoIterator<Item = T>) -> Term
where
    K: TripleSink + ?Sized,
    T: Into<Term>,
{
    let rdf = RDF::new();
    let mut items = items.into_iter();
    let Some(first) = items.next() else {
        return rdf.nil.into_owned().into();
    };

    let head = sink.mint_blank_node();
    let first: Term = first.into();
    sink.insert(TripleRef::new(&head, rdf.first, &first));
    let last = items.fold(head.clone(), |previous, item| {
        let node = sink.mint_blank_node();
        sink.insert(TripleRef::new(&previous, rdf.rest, &node));
        let item: Term = item.into();
        sink.insert(TripleRef::new(&node, rdf.first, &item));
        node
    });
    sink.insert(TripleRef::new(&last, rdf.rest, rdf.nil));
    head.into()
}
