use crate::{
    DEFAULT_VALUE_PATH,
    config::{DropdownConfig, MissingRelation},
    error::OptionError,
    option::{Context, OptionItem, Options},
    path::{ExtractError, FieldPath, Record, resolve},
    plan::ProjectionPlan,
    query::{Predicate, Query},
    source::Source,
    value::Value,
};
use tracing::debug;

///
/// OptionBuilder
///
/// Projects records from a source into option items.
///
/// The query it issues joins every relation the requested paths cross,
/// narrows fetched fields when a label path is set, orders by the label
/// (or value) path, and collapses duplicate rows. Limiting is opt-in:
/// `no_limit` defaults to `true`.
///

pub struct OptionBuilder<'a, S: Source> {
    source: &'a S,
    config: &'a DropdownConfig,
    label: Option<String>,
    value: String,
    filter: Option<Predicate>,
    no_limit: bool,
    context: Vec<String>,
}

impl<'a, S: Source> OptionBuilder<'a, S> {
    #[must_use]
    pub fn new(source: &'a S, config: &'a DropdownConfig) -> Self {
        Self {
            source,
            config,
            label: None,
            value: DEFAULT_VALUE_PATH.to_string(),
            filter: None,
            no_limit: true,
            context: Vec::new(),
        }
    }

    // ------------------------------------------------------------------
    // Arguments
    // ------------------------------------------------------------------

    /// Path of the label field. Without one, labels are each record's
    /// display text.
    #[must_use]
    pub fn label(mut self, path: impl Into<String>) -> Self {
        self.label = Some(path.into());
        self
    }

    #[must_use]
    pub fn value(mut self, path: impl Into<String>) -> Self {
        self.value = path.into();
        self
    }

    /// Restrict records; repeated calls AND together.
    #[must_use]
    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.filter = Some(match self.filter.take() {
            Some(existing) => existing & predicate,
            None => predicate,
        });
        self
    }

    #[must_use]
    pub const fn no_limit(mut self, no_limit: bool) -> Self {
        self.no_limit = no_limit;
        self
    }

    /// Extra paths copied into each item's context, in this order.
    #[must_use]
    pub fn context<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        self.context.extend(paths.into_iter().map(Into::into));
        self
    }

    // ------------------------------------------------------------------
    // Execution
    // ------------------------------------------------------------------

    pub fn build(self) -> Result<Options, OptionError<S::Error>> {
        // every path resolves before the source is touched
        let label = self.label.as_deref().map(resolve).transpose()?;
        let value = resolve(&self.value)?;
        let context = self
            .context
            .iter()
            .map(String::as_str)
            .map(resolve)
            .collect::<Result<Vec<_>, _>>()?;

        let plan = ProjectionPlan::new(label.as_ref(), &value, &context);
        let query = build_query(&plan, label.as_ref().unwrap_or(&value), self.filter);

        let limited = !self.no_limit && self.config.limit > 0;
        debug!(
            query = %query,
            joins = plan.joins().len(),
            limit = limited.then_some(self.config.limit),
            "building options"
        );

        let (records, total) = if limited {
            let total = self.source.count(&query).map_err(OptionError::Source)?;
            let records = self
                .source
                .fetch(&query.limit(self.config.limit))
                .map_err(OptionError::Source)?;

            (records, total)
        } else {
            let records = self.source.fetch(&query).map_err(OptionError::Source)?;
            let total = u64::try_from(records.len()).unwrap_or(u64::MAX);

            (records, total)
        };

        let items = records
            .iter()
            .map(|record| {
                project(
                    record,
                    label.as_ref(),
                    &value,
                    self.context.iter().zip(&context),
                    self.config.missing_relation,
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(items = items.len(), total, "built options");

        Ok(Options { items, total })
    }
}

// Query phases in fixed order: join, filter, narrow, order, distinct.
fn build_query(plan: &ProjectionPlan, order: &FieldPath, filter: Option<Predicate>) -> Query {
    let mut query = Query::all();

    if !plan.joins().is_empty() {
        query = query.select_related(plan.join_strings());
    }
    if let Some(predicate) = filter {
        query = query.filter(predicate);
    }
    if let Some(fields) = plan.fields() {
        query = query.only(fields.iter().cloned());
    }

    query.order_by(order.to_relation_string()).distinct()
}

fn project<'p, R: Record>(
    record: &R,
    label: Option<&FieldPath>,
    value: &FieldPath,
    context: impl Iterator<Item = (&'p String, &'p FieldPath)>,
    missing: MissingRelation,
) -> Result<OptionItem, ExtractError> {
    let label = match label {
        Some(path) => path.extract(record)?.to_string(),
        None => record.to_string(),
    };
    let value = value.extract(record)?;

    let mut extracted = Context::new();
    for (key, path) in context {
        let field = match path.extract(record) {
            Ok(field) => field,
            Err(ExtractError::Missing(_)) if missing == MissingRelation::Null => Value::Null,
            Err(err) => return Err(err),
        };
        extracted.push(key.as_str(), field);
    }

    Ok(OptionItem::new(label, value).with_context(extracted))
}

/// Build options from `source` in one call.
///
/// `label` of `None` labels items with each record's display text;
/// `value` is usually [`DEFAULT_VALUE_PATH`]. With `no_limit` false, at
/// most `config.limit` items are returned and `total` still counts every
/// matching record.
pub fn from_source<S: Source>(
    source: &S,
    config: &DropdownConfig,
    label: Option<&str>,
    value: &str,
    filter: Option<Predicate>,
    no_limit: bool,
    context: &[&str],
) -> Result<Options, OptionError<S::Error>> {
    let mut builder = OptionBuilder::new(source, config)
        .value(value)
        .no_limit(no_limit)
        .context(context.iter().copied());

    if let Some(label) = label {
        builder = builder.label(label);
    }
    if let Some(predicate) = filter {
        builder = builder.filter(predicate);
    }

    builder.build()
}
