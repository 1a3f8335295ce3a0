//! Point lookup, filtered listing and counting of decoded objects.
//!
//! Candidates are found in one of three ways, in priority order:
//!
//! 1. the identifier allow-list of the filter, in allow-list order;
//! 2. the direct instances of the kind's type IRIs, sorted by identifier;
//! 3. every subject of the graph, sorted by identifier.
//!
//! A candidate found through 1 or 2 must decode; a decode failure aborts the
//! query. A candidate found through 3 that does not decode is simply not an
//! object of the requested kind and is skipped. The filter is applied to
//! decoded objects, then `offset` matches are skipped and at most `limit`
//! are returned.

use crate::codec::{FromRdfOptions, ObjectType};
use crate::error::{Error, Result};
use crate::filter::{Filter, RecordFilter};
use crate::resource::Resource;
use crate::store::TripleSource;
use crate::term::{sort_identifiers, Identifier, IdentifierSet};
use log::{debug, trace};
use std::ops::ControlFlow;

/// Filter and pagination for [`ObjectSet::list`].
#[derive(Debug, Clone, PartialEq)]
pub struct Query<F> {
    pub filter: F,
    pub limit: Option<usize>,
    pub offset: usize,
}

impl<F: Default> Default for Query<F> {
    fn default() -> Self {
        Query {
            filter: F::default(),
            limit: None,
            offset: 0,
        }
    }
}

impl<F: Default> Query<F> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<F> Query<F> {
    pub fn filter(mut self, filter: F) -> Self {
        self.filter = filter;
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }
}

/// The objects of one [`TripleSource`].
///
/// Every call reads the source afresh; nothing is cached between calls.
pub struct ObjectSet<'a, S: TripleSource + ?Sized> {
    source: &'a S,
}

impl<'a, S: TripleSource + ?Sized> ObjectSet<'a, S> {
    pub fn new(source: &'a S) -> Self {
        ObjectSet { source }
    }

    pub fn source(&self) -> &'a S {
        self.source
    }

    /// The object with the given identifier, or [`Error::NotFound`].
    pub fn get<T: ObjectType>(&self, identifier: &Identifier) -> Result<T> {
        let filter = T::Filter::default().with_identifiers(vec![identifier.clone()]);
        let query = Query::new().filter(filter).limit(1);
        self.list::<T>(&query)?
            .into_iter()
            .next()
            .ok_or_else(|| Error::NotFound {
                identifier: identifier.clone(),
            })
    }

    pub fn list<T: ObjectType>(&self, query: &Query<T::Filter>) -> Result<Vec<T>> {
        let mut objects = Vec::new();
        if query.limit == Some(0) {
            return Ok(objects);
        }
        let mut skipped = 0;
        self.select::<T>(&query.filter, |object| {
            if skipped < query.offset {
                skipped += 1;
                return ControlFlow::Continue(());
            }
            objects.push(object);
            match query.limit {
                Some(limit) if objects.len() >= limit => ControlFlow::Break(()),
                _ => ControlFlow::Continue(()),
            }
        })?;
        Ok(objects)
    }

    /// Number of objects matching `filter`, regardless of pagination.
    pub fn count<T: ObjectType>(&self, filter: &T::Filter) -> Result<usize> {
        let mut count = 0;
        self.select::<T>(filter, |_| {
            count += 1;
            ControlFlow::Continue(())
        })?;
        Ok(count)
    }

    /// Feeds every decoded object matching `filter` to `visit`, in candidate
    /// order, until `visit` breaks.
    fn select<T: ObjectType>(
        &self,
        filter: &T::Filter,
        mut visit: impl FnMut(T) -> ControlFlow<()>,
    ) -> Result<()> {
        let mut offer = |object: T| {
            if filter.matches(&object) {
                visit(object)
            } else {
                ControlFlow::Continue(())
            }
        };

        if let Some(allow_list) = filter.identifier().allow_list() {
            debug!("Direct lookup of {} identifiers", allow_list.len());
            let mut seen = IdentifierSet::new();
            for identifier in allow_list {
                if !seen.insert(identifier.clone()) {
                    continue;
                }
                if !self.source.has_subject(identifier.as_ref())? {
                    debug!("{identifier} is not in the graph, omitting it");
                    continue;
                }
                if offer(self.decode(identifier)?).is_break() {
                    break;
                }
            }
            return Ok(());
        }

        let types = T::discovery_types();
        if !types.is_empty() {
            let mut candidates = IdentifierSet::new();
            for rdf_type in &types {
                for identifier in self.source.instances_of(*rdf_type)? {
                    candidates.insert(identifier);
                }
            }
            debug!(
                "Type-indexed scan of {} types found {} candidates",
                types.len(),
                candidates.len()
            );
            for identifier in candidates.into_sorted_vec() {
                if offer(self.decode(&identifier)?).is_break() {
                    break;
                }
            }
            return Ok(());
        }

        let mut subjects = self.source.subjects()?;
        sort_identifiers(&mut subjects);
        debug!("Full scan of {} subjects", subjects.len());
        for identifier in subjects {
            match self.decode::<T>(&identifier) {
                Ok(object) => {
                    if offer(object).is_break() {
                        break;
                    }
                }
                Err(error) => debug!("Skipping {identifier}: {error}"),
            }
        }
        Ok(())
    }

    fn decode<T: ObjectType>(&self, identifier: &Identifier) -> Result<T> {
        trace!("Decoding {identifier}");
        T::from_rdf(
            &Resource::new(self.source, identifier.clone()),
            FromRdfOptions::default(),
        )
    }
}
