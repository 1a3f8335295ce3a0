use super::{integer_literal, string_literal, NodeKind};
use crate::codec::FromRdfOptions;
use crate::error::{Error, Result};
use crate::filter::{
    BooleanFilter, CollectionFilter, Filter, IdentifierFilter, LiteralFilter, MaybeFilter,
    NamedNodeFilter, NumericFilter, StringFilter, TermFilter,
};
use crate::list::{decode_list_with, encode_list};
use crate::named_nodes::{RDFS, SHACL};
use crate::resource::Resource;
use crate::store::{MutableResource, TripleSink, TripleSource};
use crate::term::{identifier_to_string, Identifier, Value};
use oxigraph::model::{Literal, NamedNode, NamedNodeRef, Term};

/// Constraint parameters shared by node shapes and property shapes.
///
/// Not decodable on its own: it has no `rdf:type` and is only ever read as the
/// first level of a [`NodeShape`](super::NodeShape) or
/// [`PropertyShape`](super::PropertyShape).
#[derive(Debug, Clone, PartialEq)]
pub struct BaseShape {
    pub identifier: Identifier,
    /// `sh:and`; each inner vector is one RDF list.
    pub and_: Vec<Vec<Identifier>>,
    pub classes: Vec<NamedNode>,
    pub comments: Vec<Literal>,
    pub datatype: Option<NamedNode>,
    pub deactivated: Option<bool>,
    pub flags: Vec<String>,
    pub has_values: Vec<Term>,
    pub in_: Option<Vec<Term>>,
    pub is_defined_by: Option<Identifier>,
    pub labels: Vec<Literal>,
    pub language_in: Option<Vec<String>>,
    pub max_count: Option<u64>,
    pub max_exclusive: Option<Literal>,
    pub max_inclusive: Option<Literal>,
    pub max_length: Option<u64>,
    pub min_count: Option<u64>,
    pub min_exclusive: Option<Literal>,
    pub min_inclusive: Option<Literal>,
    pub min_length: Option<u64>,
    pub node_kind: Option<NodeKind>,
    pub nodes: Vec<Identifier>,
    pub not: Vec<Identifier>,
    pub or_: Vec<Vec<Identifier>>,
    pub patterns: Vec<String>,
    pub xone: Vec<Vec<Identifier>>,
}

impl BaseShape {
    pub fn new(identifier: Identifier) -> Self {
        BaseShape {
            identifier,
            and_: Vec::new(),
            classes: Vec::new(),
            comments: Vec::new(),
            datatype: None,
            deactivated: None,
            flags: Vec::new(),
            has_values: Vec::new(),
            in_: None,
            is_defined_by: None,
            labels: Vec::new(),
            language_in: None,
            max_count: None,
            max_exclusive: None,
            max_inclusive: None,
            max_length: None,
            min_count: None,
            min_exclusive: None,
            min_inclusive: None,
            min_length: None,
            node_kind: None,
            nodes: Vec::new(),
            not: Vec::new(),
            or_: Vec::new(),
            patterns: Vec::new(),
            xone: Vec::new(),
        }
    }

    pub(crate) fn properties_from_rdf<S: TripleSource + ?Sized>(
        resource: &Resource<'_, S>,
        _options: FromRdfOptions,
    ) -> Result<Self> {
        let sh = SHACL::new();
        let rdfs = RDFS::new();
        let source = resource.source();
        let identifier_lists = |predicate: NamedNodeRef<'_>| {
            let mut lists = resource.all(predicate, |v| {
                decode_list_with(source, v, Value::to_identifier)
            })?;
            sort_identifier_lists(&mut lists);
            Ok::<_, Error>(lists)
        };

        Ok(BaseShape {
            identifier: resource.identifier().clone(),
            and_: identifier_lists(sh.and_)?,
            classes: resource.all(sh.class, Value::to_named_node)?,
            comments: resource.all(rdfs.comment, Value::to_literal)?,
            datatype: resource.optional(sh.datatype, Value::to_named_node)?,
            deactivated: resource.optional(sh.deactivated, Value::to_boolean)?,
            flags: resource.all(sh.flags, Value::to_string_value)?,
            has_values: resource.all(sh.has_value, Value::to_iri_or_literal)?,
            in_: resource.optional(sh.in_, |v| {
                decode_list_with(source, v, Value::to_iri_or_literal)
            })?,
            is_defined_by: resource.optional(rdfs.is_defined_by, Value::to_identifier)?,
            labels: resource.all(rdfs.label, Value::to_literal)?,
            language_in: resource.optional(sh.language_in, |v| {
                decode_list_with(source, v, Value::to_string_value)
            })?,
            max_count: resource.optional(sh.max_count, Value::to_u64)?,
            max_exclusive: resource.optional(sh.max_exclusive, Value::to_literal)?,
            max_inclusive: resource.optional(sh.max_inclusive, Value::to_literal)?,
            max_length: resource.optional(sh.max_length, Value::to_u64)?,
            min_count: resource.optional(sh.min_count, Value::to_u64)?,
            min_exclusive: resource.optional(sh.min_exclusive, Value::to_literal)?,
            min_inclusive: resource.optional(sh.min_inclusive, Value::to_literal)?,
            min_length: resource.optional(sh.min_length, Value::to_u64)?,
            node_kind: resource.optional(sh.node_kind, NodeKind::from_value)?,
            nodes: resource.all(sh.node, Value::to_identifier)?,
            not: resource.all(sh.not, Value::to_identifier)?,
            or_: identifier_lists(sh.or_)?,
            patterns: resource.all(sh.pattern, Value::to_string_value)?,
            xone: identifier_lists(sh.xone)?,
        })
    }

    pub(crate) fn properties_to_rdf<K: TripleSink + ?Sized>(
        &self,
        resource: &mut MutableResource<'_, K>,
    ) {
        let sh = SHACL::new();
        let rdfs = RDFS::new();
        let mut add_identifier_lists = |predicate, lists: &[Vec<Identifier>]| {
            for list in lists {
                let head = encode_list(resource.sink(), list.iter().cloned());
                resource.add(predicate, head);
            }
        };
        add_identifier_lists(sh.and_, &self.and_);
        add_identifier_lists(sh.or_, &self.or_);
        add_identifier_lists(sh.xone, &self.xone);

        resource.add_all(sh.class, self.classes.iter().cloned());
        resource.add_all(rdfs.comment, self.comments.iter().cloned());
        resource.add_optional(sh.datatype, self.datatype.clone());
        resource.add_optional(sh.deactivated, self.deactivated.map(Literal::from));
        resource.add_all(sh.flags, self.flags.iter().map(|f| string_literal(f)));
        resource.add_all(sh.has_value, self.has_values.iter().cloned());
        if let Some(members) = &self.in_ {
            let head = encode_list(resource.sink(), members.iter().cloned());
            resource.add(sh.in_, head);
        }
        resource.add_optional(rdfs.is_defined_by, self.is_defined_by.clone());
        resource.add_all(rdfs.label, self.labels.iter().cloned());
        if let Some(languages) = &self.language_in {
            let head = encode_list(resource.sink(), languages.iter().map(|l| string_literal(l)));
            resource.add(sh.language_in, head);
        }
        resource.add_optional(sh.max_count, self.max_count.map(integer_literal));
        resource.add_optional(sh.max_exclusive, self.max_exclusive.clone());
        resource.add_optional(sh.max_inclusive, self.max_inclusive.clone());
        resource.add_optional(sh.max_length, self.max_length.map(integer_literal));
        resource.add_optional(sh.min_count, self.min_count.map(integer_literal));
        resource.add_optional(sh.min_exclusive, self.min_exclusive.clone());
        resource.add_optional(sh.min_inclusive, self.min_inclusive.clone());
        resource.add_optional(sh.min_length, self.min_length.map(integer_literal));
        resource.add_optional(
            sh.node_kind,
            self.node_kind.map(|kind| kind.named_node().into_owned()),
        );
        resource.add_all(sh.node, self.nodes.iter().cloned());
        resource.add_all(sh.not, self.not.iter().cloned());
        resource.add_all(sh.pattern, self.patterns.iter().map(|p| string_literal(p)));
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BaseShapeFilter {
    pub identifier: IdentifierFilter,
    pub and_: CollectionFilter<CollectionFilter<IdentifierFilter>>,
    pub classes: CollectionFilter<NamedNodeFilter>,
    pub comments: CollectionFilter<LiteralFilter>,
    pub datatype: MaybeFilter<NamedNodeFilter>,
    pub deactivated: MaybeFilter<BooleanFilter>,
    pub flags: CollectionFilter<StringFilter>,
    pub has_values: CollectionFilter<TermFilter>,
    pub in_: MaybeFilter<CollectionFilter<TermFilter>>,
    pub is_defined_by: MaybeFilter<IdentifierFilter>,
    pub labels: CollectionFilter<LiteralFilter>,
    pub language_in: MaybeFilter<CollectionFilter<StringFilter>>,
    pub max_count: MaybeFilter<NumericFilter<u64>>,
    pub max_exclusive: MaybeFilter<LiteralFilter>,
    pub max_inclusive: MaybeFilter<LiteralFilter>,
    pub max_length: MaybeFilter<NumericFilter<u64>>,
    pub min_count: MaybeFilter<NumericFilter<u64>>,
    pub min_exclusive: MaybeFilter<LiteralFilter>,
    pub min_inclusive: MaybeFilter<LiteralFilter>,
    pub min_length: MaybeFilter<NumericFilter<u64>>,
    pub node_kind: MaybeFilter<NamedNodeFilter>,
    pub nodes: CollectionFilter<IdentifierFilter>,
    pub not: CollectionFilter<IdentifierFilter>,
    pub or_: CollectionFilter<CollectionFilter<IdentifierFilter>>,
    pub patterns: CollectionFilter<StringFilter>,
    pub xone: CollectionFilter<CollectionFilter<IdentifierFilter>>,
}

impl Filter<BaseShape> for BaseShapeFilter {
    fn matches(&self, shape: &BaseShape) -> bool {
        self.identifier.matches(&shape.identifier)
            && self.and_.matches(&shape.and_)
            && self.classes.matches(&shape.classes)
            && self.comments.matches(&shape.comments)
            && self.datatype.matches(&shape.datatype)
            && self.deactivated.matches(&shape.deactivated)
            && self.flags.matches(&shape.flags)
            && self.has_values.matches(&shape.has_values)
            && self.in_.matches(&shape.in_)
            && self.is_defined_by.matches(&shape.is_defined_by)
            && self.labels.matches(&shape.labels)
            && self.language_in.matches(&shape.language_in)
            && self.max_count.matches(&shape.max_count)
            && self.max_exclusive.matches(&shape.max_exclusive)
            && self.max_inclusive.matches(&shape.max_inclusive)
            && self.max_length.matches(&shape.max_length)
            && self.min_count.matches(&shape.min_count)
            && self.min_exclusive.matches(&shape.min_exclusive)
            && self.min_inclusive.matches(&shape.min_inclusive)
            && self.min_length.matches(&shape.min_length)
            && self.node_kind.matches(&shape.node_kind)
            && self.nodes.matches(&shape.nodes)
            && self.not.matches(&shape.not)
            && self.or_.matches(&shape.or_)
            && self.patterns.matches(&shape.patterns)
            && self.xone.matches(&shape.xone)
    }
}

/// Orders the lists of `sh:and` / `sh:or` / `sh:xone` by their items.
///
/// List heads are blank nodes minted by whoever wrote the graph, so their
/// labels say nothing about the data. Lists compare item by item on the
/// canonical identifier text, a shorter list first when it is a prefix.
fn sort_identifier_lists(lists: &mut [Vec<Identifier>]) {
    lists.sort_by_cached_key(|list| list.iter().map(identifier_to_string).collect::<Vec<_>>());
}
