//! Declarative query description handed to a `Source`.
//!
//! A `Query` is never executed by this crate; it records what the caller
//! wants (joins, filter, field narrowing, order, distinct, page) and a source
//! materializes it. Every field reference is in relation-traversal form
//! (`department__name`).

mod field_ref;
pub mod predicate;


use std::fmt;

pub use field_ref::FieldRef;
pub use predicate::{CompareOp, ComparePredicate, Predicate};

///
/// OrderDirection
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OrderDirection {
    Asc,
    Desc,
}

///
/// OrderSpec
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct OrderSpec {
    pub fields: Vec<(String, OrderDirection)>,
}

///
/// PageSpec
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PageSpec {
    pub limit: Option<u32>,
    pub offset: u32,
}

///
/// Query
///
/// Unmaterialized query over one source collection.
///
/// This description is:
/// - schema-agnostic at construction
/// - validated only by the source that executes it
/// - free of access-path decisions
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Query {
    select_related: Vec<String>,
    predicate: Option<Predicate>,
    only: Option<Vec<String>>,
    order: Option<OrderSpec>,
    distinct: bool,
    page: Option<PageSpec>,
}

impl Query {
    /// Every record in the collection.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Eagerly join relation chains. A fetch-efficiency hint only.
    #[must_use]
    pub fn select_related<I, S>(mut self, chains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for chain in chains {
            let chain = chain.into();
            if !self.select_related.contains(&chain) {
                self.select_related.push(chain);
            }
        }
        self
    }

    /// Add a predicate, implicitly AND-ing with any existing predicate.
    #[must_use]
    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.predicate = match self.predicate.take() {
            Some(existing) => Some(Predicate::And(vec![existing, predicate])),
            None => Some(predicate),
        };
        self
    }

    /// Restrict fetched fields. Replaces any earlier restriction.
    #[must_use]
    pub fn only<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.only = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    /// Append an ascending sort key.
    #[must_use]
    pub fn order_by(mut self, field: impl Into<String>) -> Self {
        self.order = Some(push_order(self.order, field.into(), OrderDirection::Asc));
        self
    }

    /// Append a descending sort key.
    #[must_use]
    pub fn order_by_desc(mut self, field: impl Into<String>) -> Self {
        self.order = Some(push_order(self.order, field.into(), OrderDirection::Desc));
        self
    }

    /// Collapse records identical across every fetched attribute.
    #[must_use]
    pub const fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    /// Keep at most `limit` records.
    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        let mut page = self.page.take().unwrap_or_default();
        page.limit = Some(limit);
        self.page = Some(page);
        self
    }

    /// Skip the first `offset` records.
    #[must_use]
    pub fn offset(mut self, offset: u32) -> Self {
        let mut page = self.page.take().unwrap_or_default();
        page.offset = offset;
        self.page = Some(page);
        self
    }

    /// Replace the current pagination settings.
    #[must_use]
    pub fn page(mut self, page: PageSpec) -> Self {
        self.page = Some(page);
        self
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    #[must_use]
    pub fn related(&self) -> &[String] {
        &self.select_related
    }

    #[must_use]
    pub const fn predicate(&self) -> Option<&Predicate> {
        self.predicate.as_ref()
    }

    #[must_use]
    pub fn only_fields(&self) -> Option<&[String]> {
        self.only.as_deref()
    }

    #[must_use]
    pub const fn order(&self) -> Option<&OrderSpec> {
        self.order.as_ref()
    }

    #[must_use]
    pub const fn is_distinct(&self) -> bool {
        self.distinct
    }

    #[must_use]
    pub const fn page_spec(&self) -> Option<&PageSpec> {
        self.page.as_ref()
    }

    /// Every field path this query references, for source-side validation.
    #[must_use]
    pub fn referenced_fields(&self) -> Vec<&str> {
        let mut fields: Vec<&str> = Vec::new();

        if let Some(predicate) = &self.predicate {
            predicate.for_each_field(&mut |field| fields.push(field));
        }
        if let Some(only) = &self.only {
            fields.extend(only.iter().map(String::as_str));
        }
        if let Some(order) = &self.order {
            fields.extend(order.fields.iter().map(|(field, _)| field.as_str()));
        }

        fields
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "all()")?;
        if !self.select_related.is_empty() {
            write!(f, ".select_related({})", self.select_related.join(", "))?;
        }
        if self.predicate.is_some() {
            write!(f, ".filter(..)")?;
        }
        if let Some(only) = &self.only {
            write!(f, ".only({})", only.join(", "))?;
        }
        if let Some(order) = &self.order {
            let keys: Vec<String> = order
                .fields
                .iter()
                .map(|(field, dir)| match dir {
                    OrderDirection::Asc => field.clone(),
                    OrderDirection::Desc => format!("-{field}"),
                })
                .collect();
            write!(f, ".order_by({})", keys.join(", "))?;
        }
        if self.distinct {
            write!(f, ".distinct()")?;
        }
        if let Some(page) = &self.page {
            match page.limit {
                Some(limit) => {
                    let end = u64::from(page.offset) + u64::from(limit);
                    write!(f, "[{}:{end}]", page.offset)?;
                }
                None => write!(f, "[{}:]", page.offset)?,
            }
        }

        Ok(())
    }
}

/// Helper to append an ordering field while preserving existing order spec.
fn push_order(order: Option<OrderSpec>, field: String, direction: OrderDirection) -> OrderSpec {
    match order {
        Some(mut spec) => {
            spec.fields.push((field, direction));
            spec
        }
        None => OrderSpec {
            fields: vec![(field, direction)],
        },
    }
}
