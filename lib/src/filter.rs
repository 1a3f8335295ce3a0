//! Structural predicates over decoded objects.
//!
//! Scalar filters constrain one value; [`MaybeFilter`] and [`CollectionFilter`]
//! lift them over optional and multi-valued fields. Record filters (one per
//! object kind, defined next to the kind) are conjunctions of field filters in
//! which every field defaults to "no constraint".

use crate::term::{identifier_kind, term_kind, Identifier, IdentifierKind, TermKind};
use oxigraph::model::{Literal, NamedNode, NamedNodeRef, Term};

pub trait Filter<T: ?Sized> {
    fn matches(&self, value: &T) -> bool;
}

/// A record filter: constrains the object's identifier in addition to its fields.
///
/// The identifier allow-list selects the direct lookup path of an object set.
pub trait RecordFilter<T>: Filter<T> + Default {
    fn identifier(&self) -> &IdentifierFilter;

    fn identifier_mut(&mut self) -> &mut IdentifierFilter;

    fn with_identifiers(mut self, identifiers: Vec<Identifier>) -> Self {
        self.identifier_mut().in_ = Some(identifiers);
        self
    }
}

fn allowed<T: PartialEq>(allow_list: &Option<Vec<T>>, value: &T) -> bool {
    allow_list.as_ref().map_or(true, |list| list.contains(value))
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BooleanFilter {
    pub value: Option<bool>,
}

impl Filter<bool> for BooleanFilter {
    fn matches(&self, value: &bool) -> bool {
        self.value.map_or(true, |expected| expected == *value)
    }
}

/// Numeric range and membership. All bounds are optional and independent.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericFilter<N> {
    pub in_: Option<Vec<N>>,
    pub min_inclusive: Option<N>,
    pub min_exclusive: Option<N>,
    pub max_inclusive: Option<N>,
    pub max_exclusive: Option<N>,
}

impl<N> Default for NumericFilter<N> {
    fn default() -> Self {
        NumericFilter {
            in_: None,
            min_inclusive: None,
            min_exclusive: None,
            max_inclusive: None,
            max_exclusive: None,
        }
    }
}

impl<N: PartialOrd> Filter<N> for NumericFilter<N> {
    fn matches(&self, value: &N) -> bool {
        allowed(&self.in_, value)
            && self.min_inclusive.as_ref().map_or(true, |min| value >= min)
            && self.min_exclusive.as_ref().map_or(true, |min| value > min)
            && self.max_inclusive.as_ref().map_or(true, |max| value <= max)
            && self.max_exclusive.as_ref().map_or(true, |max| value < max)
    }
}

/// String membership and length bounds (in characters).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StringFilter {
    pub in_: Option<Vec<String>>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
}

impl Filter<str> for StringFilter {
    fn matches(&self, value: &str) -> bool {
        let length = value.chars().count();
        self.in_
            .as_ref()
            .map_or(true, |list| list.iter().any(|s| s == value))
            && self.min_length.map_or(true, |min| length >= min)
            && self.max_length.map_or(true, |max| length <= max)
    }
}

impl Filter<String> for StringFilter {
    fn matches(&self, value: &String) -> bool {
        Filter::<str>::matches(self, value.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LiteralFilter {
    pub in_: Option<Vec<Literal>>,
    pub datatype_in: Option<Vec<NamedNode>>,
    /// Language tags compared case-insensitively; untagged literals never match.
    pub language_in: Option<Vec<String>>,
}

impl Filter<Literal> for LiteralFilter {
    fn matches(&self, value: &Literal) -> bool {
        allowed(&self.in_, value)
            && self
                .datatype_in
                .as_ref()
                .map_or(true, |list| list.iter().any(|d| d.as_ref() == value.datatype()))
            && self.language_in.as_ref().map_or(true, |list| {
                value
                    .language()
                    .is_some_and(|tag| list.iter().any(|l| l.eq_ignore_ascii_case(tag)))
            })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NamedNodeFilter {
    pub in_: Option<Vec<NamedNode>>,
}

impl NamedNodeFilter {
    pub fn matches_ref(&self, value: NamedNodeRef<'_>) -> bool {
        self.in_
            .as_ref()
            .map_or(true, |list| list.iter().any(|n| n.as_ref() == value))
    }
}

impl Filter<NamedNode> for NamedNodeFilter {
    fn matches(&self, value: &NamedNode) -> bool {
        self.matches_ref(value.as_ref())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct IdentifierFilter {
    pub in_: Option<Vec<Identifier>>,
    pub kind: Option<IdentifierKind>,
}

impl IdentifierFilter {
    pub fn allow_list(&self) -> Option<&[Identifier]> {
        self.in_.as_deref()
    }
}

impl Filter<Identifier> for IdentifierFilter {
    fn matches(&self, value: &Identifier) -> bool {
        allowed(&self.in_, value) && self.kind.map_or(true, |kind| kind == identifier_kind(value))
    }
}

/// Filter over a field that may hold any kind of term.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermFilter {
    pub in_: Option<Vec<Term>>,
    pub datatype_in: Option<Vec<NamedNode>>,
    pub language_in: Option<Vec<String>>,
    pub kind_in: Option<Vec<TermKind>>,
}

impl Filter<Term> for TermFilter {
    fn matches(&self, value: &Term) -> bool {
        if !allowed(&self.in_, value) {
            return false;
        }
        if let Some(kinds) = &self.kind_in {
            if !kinds.contains(&term_kind(value)) {
                return false;
            }
        }
        if self.datatype_in.is_none() && self.language_in.is_none() {
            return true;
        }
        match value {
            Term::Literal(literal) => LiteralFilter {
                in_: None,
                datatype_in: self.datatype_in.clone(),
                language_in: self.language_in.clone(),
            }
            .matches(literal),
            _ => false,
        }
    }
}

/// Filter over an optional field.
///
/// `Absent` requires the field to have no value, which is different from
/// leaving it unconstrained.
#[derive(Debug, Clone, PartialEq)]
pub enum MaybeFilter<F> {
    Unconstrained,
    Absent,
    Present(F),
}

impl<F> Default for MaybeFilter<F> {
    fn default() -> Self {
        MaybeFilter::Unconstrained
    }
}

impl<T, F: Filter<T>> Filter<Option<T>> for MaybeFilter<F> {
    fn matches(&self, value: &Option<T>) -> bool {
        match (self, value) {
            (MaybeFilter::Unconstrained, _) => true,
            (MaybeFilter::Absent, value) => value.is_none(),
            (MaybeFilter::Present(_), None) => false,
            (MaybeFilter::Present(filter), Some(value)) => filter.matches(value),
        }
    }
}

/// Filter over a multi-valued field: every item must pass `item`, and the
/// number of items must lie within the count bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionFilter<F> {
    pub item: Option<F>,
    pub min_count: Option<usize>,
    pub max_count: Option<usize>,
}

impl<F> Default for CollectionFilter<F> {
    fn default() -> Self {
        CollectionFilter {
            item: None,
            min_count: None,
            max_count: None,
        }
    }
}

impl<F> CollectionFilter<F> {
    pub fn count(min_count: Option<usize>, max_count: Option<usize>) -> Self {
        CollectionFilter {
            item: None,
            min_count,
            max_count,
        }
    }

    pub fn each(item: F) -> Self {
        CollectionFilter {
            item: Some(item),
            min_count: None,
            max_count: None,
        }
    }
}

impl<T, F: Filter<T>> Filter<Vec<T>> for CollectionFilter<F> {
    fn matches(&self, values: &Vec<T>) -> bool {
        let count = values.len();
        self.min_count.map_or(true, |min| count >= min)
            && self.max_count.map_or(true, |max| count <= max)
            && self
                .item
                .as_ref()
                .map_or(true, |item| values.iter().all(|value| item.matches(value)))
    }
}
