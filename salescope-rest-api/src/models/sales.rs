//! Request bodies for the sales endpoints

use salescope_api_types::{
    FieldPurpose, Filter, QueryBuilderRequest, QueryFilter, SaleField, SaleFilters, SortDirection, ValidationError,
};
use salescope_config::QueryConfig;
use serde::{de, Deserialize, Deserializer};
use serde_json::Value;

/// Filters as sent by a client: the dashboard's filter object or a raw list
/// of `{ field, operation, value }` entries
#[derive(Debug, Clone, PartialEq)]
pub enum FiltersInput {
    Selection(SaleFilters),
    List(Vec<QueryFilter>),
}

impl FiltersInput {
    pub fn into_filters(self) -> Result<Vec<Filter>, ValidationError> {
        match self {
            FiltersInput::Selection(selection) => selection.to_filters(),
            FiltersInput::List(list) => list.into_iter().map(Filter::try_from).collect(),
        }
    }
}

impl<'de> Deserialize<'de> for FiltersInput {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        match value {
            Value::Array(_) => serde_json::from_value(value)
                .map(FiltersInput::List)
                .map_err(de::Error::custom),
            Value::Object(_) => serde_json::from_value(value)
                .map(FiltersInput::Selection)
                .map_err(de::Error::custom),
            Value::Null => Ok(FiltersInput::Selection(SaleFilters::default())),
            other => Err(de::Error::custom(format!(
                "filters must be an object or an array, got {other}"
            ))),
        }
    }
}

/// Body of `POST /api/sales`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SalesQueryRequest {
    pub current_page: Option<i64>,
    pub page_size: Option<i64>,
    pub search_phrase: Option<String>,
    pub search_on: Option<Vec<String>>,
    pub sort_by: Option<String>,
    pub sort_dir: Option<SortDirection>,
    pub filters: Option<FiltersInput>,
}

impl SalesQueryRequest {
    /// Apply the endpoint defaults and turn the body into a typed query.
    ///
    /// Missing or non-positive page sizes take the configured default and
    /// larger ones are capped. Sorting defaults to `date desc`.
    pub fn into_query(self, limits: &QueryConfig) -> Result<QueryBuilderRequest, ValidationError> {
        let page_size = match self.page_size {
            Some(size) if size > 0 => size.min(i64::from(limits.max_page_size)),
            _ => i64::from(limits.default_page_size),
        };
        let current_page = self.current_page.unwrap_or(0).max(0);

        let sort_by = match self.sort_by.as_deref().map(str::trim).filter(|name| !name.is_empty()) {
            Some(name) => SaleField::parse_for(name, FieldPurpose::Sort)?,
            None => SaleField::Date,
        };
        let sort_dir = self.sort_dir.unwrap_or(SortDirection::Desc);

        let mut request = QueryBuilderRequest::new(current_page, page_size)
            .sorted_by(sort_by, sort_dir)
            .with_filters(collect_filters(self.filters)?);

        if let Some(phrase) = self.search_phrase {
            request = request.with_search(phrase, search_fields(self.search_on)?);
        }

        request.validate()?;
        Ok(request)
    }
}

/// Body of `POST /api/sales/stats`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SalesStatsRequest {
    pub filters: Option<FiltersInput>,
    pub search_phrase: Option<String>,
    pub search_on: Option<Vec<String>>,
}

impl SalesStatsRequest {
    pub fn into_query(self) -> Result<QueryBuilderRequest, ValidationError> {
        let mut request = QueryBuilderRequest::default().with_filters(collect_filters(self.filters)?);

        if let Some(phrase) = self.search_phrase {
            request = request.with_search(phrase, search_fields(self.search_on)?);
        }

        request.validate()?;
        Ok(request)
    }
}

fn collect_filters(input: Option<FiltersInput>) -> Result<Vec<Filter>, ValidationError> {
    input.map(FiltersInput::into_filters).transpose().map(Option::unwrap_or_default)
}

/// Requested search fields, or every searchable field when none are named
fn search_fields(requested: Option<Vec<String>>) -> Result<Vec<SaleField>, ValidationError> {
    match requested {
        Some(names) if !names.is_empty() => names
            .iter()
            .map(|name| SaleField::parse_for(name, FieldPurpose::Search))
            .collect(),
        _ => Ok(SaleField::SEARCHABLE.to_vec()),
    }
}
