//! Typed query model
//!
//! Clients send filters as loosely typed [`QueryFilter`] triples. They are
//! converted into [`Filter`] values once, at the edge, so that every filter the
//! storage layer sees names an allow-listed field and carries a value whose
//! shape matches its operation.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::enums::{FilterOperationKind, SortDirection};
use crate::errors::ValidationError;
use crate::fields::{FieldKind, FieldPurpose, SaleField};
use crate::pagination::{PageWindow, DEFAULT_PAGE_SIZE};

/// Typed scalar compared against a column
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FilterValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Date(NaiveDate),
    Timestamp(DateTime<Utc>),
}

impl FilterValue {
    /// Coerce a wire scalar to the value kind of `field`
    pub fn coerce(field: SaleField, value: &Value) -> Result<Self, ValidationError> {
        let kind = field.kind();
        let mismatch = || ValidationError::ValueType {
            field: field.as_str().to_string(),
            value: value.to_string(),
            expected: kind.describe(),
        };

        match kind {
            FieldKind::Text | FieldKind::TextList => match value {
                Value::String(s) => Ok(FilterValue::Text(s.clone())),
                Value::Number(n) => Ok(FilterValue::Text(n.to_string())),
                _ => Err(mismatch()),
            },
            FieldKind::Integer => match value {
                Value::Number(n) => n
                    .as_i64()
                    .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
                    .map(FilterValue::Integer)
                    .ok_or_else(mismatch),
                Value::String(s) => s.trim().parse().map(FilterValue::Integer).map_err(|_| mismatch()),
                _ => Err(mismatch()),
            },
            FieldKind::Float => match value {
                Value::Number(n) => n.as_f64().map(FilterValue::Float).ok_or_else(mismatch),
                Value::String(s) => s.trim().parse().map(FilterValue::Float).map_err(|_| mismatch()),
                _ => Err(mismatch()),
            },
            FieldKind::Date => match value {
                Value::String(s) => parse_date(s).map(FilterValue::Date).ok_or_else(mismatch),
                _ => Err(mismatch()),
            },
            FieldKind::Timestamp => match value {
                Value::String(s) => parse_timestamp(s).map(FilterValue::Timestamp).ok_or_else(mismatch),
                _ => Err(mismatch()),
            },
        }
    }

    fn to_json(&self) -> Value {
        match self {
            FilterValue::Text(s) => Value::String(s.clone()),
            FilterValue::Integer(i) => Value::from(*i),
            FilterValue::Float(f) => Value::from(*f),
            FilterValue::Date(d) => Value::String(d.format("%Y-%m-%d").to_string()),
            FilterValue::Timestamp(ts) => Value::String(ts.to_rfc3339()),
        }
    }
}

/// Parse a calendar date, accepting either `YYYY-MM-DD` or a full RFC 3339 timestamp
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(input).ok().map(|dt| dt.date_naive()))
}

fn parse_timestamp(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    DateTime::parse_from_rfc3339(input)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|| parse_date(input).map(|d| d.and_time(NaiveTime::MIN).and_utc()))
}

/// Filter condition keyed by operation
#[derive(Debug, Clone, PartialEq)]
pub enum FilterCondition {
    Equals(FilterValue),
    NotEquals(FilterValue),
    GreaterThan(FilterValue),
    LesserThan(FilterValue),
    GreaterThanOrEquals(FilterValue),
    LesserThanOrEquals(FilterValue),
    IsNull,
    IsNotNull,
    Like(String),
    NotLike(String),
    In(Vec<FilterValue>),
    NotIn(Vec<FilterValue>),
    Between(FilterValue, FilterValue),
    ArrayHasSome(Vec<String>),
}

impl FilterCondition {
    pub fn operation(&self) -> FilterOperationKind {
        match self {
            FilterCondition::Equals(_) => FilterOperationKind::Equals,
            FilterCondition::NotEquals(_) => FilterOperationKind::NotEquals,
            FilterCondition::GreaterThan(_) => FilterOperationKind::GreaterThan,
            FilterCondition::LesserThan(_) => FilterOperationKind::LesserThan,
            FilterCondition::GreaterThanOrEquals(_) => FilterOperationKind::GreaterThanOrEquals,
            FilterCondition::LesserThanOrEquals(_) => FilterOperationKind::LesserThanOrEquals,
            FilterCondition::IsNull => FilterOperationKind::IsNull,
            FilterCondition::IsNotNull => FilterOperationKind::IsNotNull,
            FilterCondition::Like(_) => FilterOperationKind::Like,
            FilterCondition::NotLike(_) => FilterOperationKind::NotLike,
            FilterCondition::In(_) => FilterOperationKind::In,
            FilterCondition::NotIn(_) => FilterOperationKind::NotIn,
            FilterCondition::Between(_, _) => FilterOperationKind::Between,
            FilterCondition::ArrayHasSome(_) => FilterOperationKind::ArrayHasSome,
        }
    }

    /// Build a condition from a wire operation and value, coercing to the field's kind
    pub fn from_wire(
        field: SaleField,
        operation: FilterOperationKind,
        value: Option<&Value>,
    ) -> Result<Self, ValidationError> {
        let shape = |expected: &'static str| ValidationError::ValueShape {
            field: field.as_str().to_string(),
            operation,
            expected,
        };
        let value = value.filter(|v| !v.is_null());

        let scalar = || -> Result<FilterValue, ValidationError> {
            match value {
                Some(v) if !v.is_array() && !v.is_object() => FilterValue::coerce(field, v),
                _ => Err(shape("a single scalar value")),
            }
        };
        let list = || -> Result<Vec<FilterValue>, ValidationError> {
            match value {
                Some(Value::Array(items)) => items.iter().map(|v| FilterValue::coerce(field, v)).collect(),
                Some(Value::Object(_)) | None => Err(shape("an array of values")),
                Some(v) => Ok(vec![FilterValue::coerce(field, v)?]),
            }
        };
        let text = || -> Result<String, ValidationError> {
            match value {
                Some(Value::String(s)) => Ok(s.clone()),
                _ => Err(shape("a string pattern")),
            }
        };

        let condition = match operation {
            FilterOperationKind::Equals => FilterCondition::Equals(scalar()?),
            FilterOperationKind::NotEquals => FilterCondition::NotEquals(scalar()?),
            FilterOperationKind::GreaterThan => FilterCondition::GreaterThan(scalar()?),
            FilterOperationKind::LesserThan => FilterCondition::LesserThan(scalar()?),
            FilterOperationKind::GreaterThanOrEquals => FilterCondition::GreaterThanOrEquals(scalar()?),
            FilterOperationKind::LesserThanOrEquals => FilterCondition::LesserThanOrEquals(scalar()?),
            FilterOperationKind::IsNull => FilterCondition::IsNull,
            FilterOperationKind::IsNotNull => FilterCondition::IsNotNull,
            FilterOperationKind::Like => FilterCondition::Like(text()?),
            FilterOperationKind::NotLike => FilterCondition::NotLike(text()?),
            FilterOperationKind::In => FilterCondition::In(list()?),
            FilterOperationKind::NotIn => FilterCondition::NotIn(list()?),
            FilterOperationKind::Between => match value {
                Some(Value::Array(bounds)) if bounds.len() == 2 => FilterCondition::Between(
                    FilterValue::coerce(field, &bounds[0])?,
                    FilterValue::coerce(field, &bounds[1])?,
                ),
                _ => return Err(shape("a two-element array [low, high]")),
            },
            FilterOperationKind::ArrayHasSome => FilterCondition::ArrayHasSome(
                list()?
                    .into_iter()
                    .map(|v| match v {
                        FilterValue::Text(s) => Ok(s),
                        _ => Err(shape("an array of strings")),
                    })
                    .collect::<Result<_, _>>()?,
            ),
        };

        Ok(condition)
    }

    fn wire_value(&self) -> Option<Value> {
        match self {
            FilterCondition::Equals(v)
            | FilterCondition::NotEquals(v)
            | FilterCondition::GreaterThan(v)
            | FilterCondition::LesserThan(v)
            | FilterCondition::GreaterThanOrEquals(v)
            | FilterCondition::LesserThanOrEquals(v) => Some(v.to_json()),
            FilterCondition::IsNull | FilterCondition::IsNotNull => None,
            FilterCondition::Like(s) | FilterCondition::NotLike(s) => Some(Value::String(s.clone())),
            FilterCondition::In(values) | FilterCondition::NotIn(values) => {
                Some(Value::Array(values.iter().map(FilterValue::to_json).collect()))
            }
            FilterCondition::Between(low, high) => Some(Value::Array(vec![low.to_json(), high.to_json()])),
            FilterCondition::ArrayHasSome(tags) => {
                Some(Value::Array(tags.iter().cloned().map(Value::String).collect()))
            }
        }
    }
}

/// A validated filter on one allow-listed field
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub field: SaleField,
    pub condition: FilterCondition,
}

impl Filter {
    /// Create a filter, checking the field is filterable and supports the operation
    pub fn new(field: SaleField, condition: FilterCondition) -> Result<Self, ValidationError> {
        field.ensure_allowed(FieldPurpose::Filter)?;

        let operation = condition.operation();
        let supported = match field.kind() {
            FieldKind::TextList => !operation.is_comparison(),
            FieldKind::Text => operation != FilterOperationKind::ArrayHasSome,
            FieldKind::Integer | FieldKind::Float | FieldKind::Date | FieldKind::Timestamp => !matches!(
                operation,
                FilterOperationKind::Like | FilterOperationKind::NotLike | FilterOperationKind::ArrayHasSome
            ),
        };

        if !supported {
            return Err(ValidationError::UnsupportedOperation {
                field: field.as_str().to_string(),
                operation,
            });
        }

        Ok(Self { field, condition })
    }
}

/// Wire form of a filter: `{ field, operation, value? }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QueryFilter {
    pub field: String,
    pub operation: FilterOperationKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl TryFrom<QueryFilter> for Filter {
    type Error = ValidationError;

    fn try_from(wire: QueryFilter) -> Result<Self, Self::Error> {
        let field = SaleField::parse_for(&wire.field, FieldPurpose::Filter)?;
        let condition = FilterCondition::from_wire(field, wire.operation, wire.value.as_ref())?;
        Filter::new(field, condition)
    }
}

impl From<&Filter> for QueryFilter {
    fn from(filter: &Filter) -> Self {
        Self {
            field: filter.field.as_str().to_string(),
            operation: filter.condition.operation(),
            value: filter.condition.wire_value(),
        }
    }
}

/// Search, filter, sort and pagination parameters for one query
#[derive(Debug, Clone, PartialEq)]
pub struct QueryBuilderRequest {
    pub current_page: i64,
    pub page_size: i64,
    pub search_phrase: Option<String>,
    pub search_on: Vec<SaleField>,
    pub sort_by: Option<SaleField>,
    pub sort_dir: SortDirection,
    /// Combined with logical AND
    pub filters: Vec<Filter>,
}

impl Default for QueryBuilderRequest {
    fn default() -> Self {
        Self {
            current_page: 0,
            page_size: DEFAULT_PAGE_SIZE as i64,
            search_phrase: None,
            search_on: Vec::new(),
            sort_by: None,
            sort_dir: SortDirection::Asc,
            filters: Vec::new(),
        }
    }
}

impl QueryBuilderRequest {
    pub fn new(current_page: i64, page_size: i64) -> Self {
        Self {
            current_page,
            page_size,
            ..Default::default()
        }
    }

    pub fn with_search(mut self, phrase: impl Into<String>, fields: Vec<SaleField>) -> Self {
        self.search_phrase = Some(phrase.into());
        self.search_on = fields;
        self
    }

    pub fn sorted_by(mut self, field: SaleField, direction: SortDirection) -> Self {
        self.sort_by = Some(field);
        self.sort_dir = direction;
        self
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn with_filters(mut self, filters: impl IntoIterator<Item = Filter>) -> Self {
        self.filters.extend(filters);
        self
    }

    /// Trimmed search phrase; empty or whitespace-only phrases count as absent
    pub fn effective_search_phrase(&self) -> Option<&str> {
        self.search_phrase
            .as_deref()
            .map(str::trim)
            .filter(|phrase| !phrase.is_empty())
    }

    /// Whether the search term contributes to the predicate
    pub fn has_search(&self) -> bool {
        self.effective_search_phrase().is_some() && !self.search_on.is_empty()
    }

    /// Effective page window after coercing out-of-range values
    pub fn window(&self) -> PageWindow {
        PageWindow::from_request(self.current_page, self.page_size)
    }

    /// Check every field in the request against its allow-list
    pub fn validate(&self) -> Result<(), ValidationError> {
        for field in &self.search_on {
            field.ensure_allowed(FieldPurpose::Search)?;
        }
        if let Some(field) = &self.sort_by {
            field.ensure_allowed(FieldPurpose::Sort)?;
        }
        for filter in &self.filters {
            filter.field.ensure_allowed(FieldPurpose::Filter)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn wire(field: &str, operation: FilterOperationKind, value: Option<Value>) -> QueryFilter {
        QueryFilter {
            field: field.to_string(),
            operation,
            value,
        }
    }

    #[test]
    fn test_in_coerces_scalar_to_list() {
        let filter = Filter::try_from(wire("gender", FilterOperationKind::In, Some(json!("Female")))).unwrap();
        assert_eq!(
            filter.condition,
            FilterCondition::In(vec![FilterValue::Text("Female".to_string())])
        );
    }

    #[test]
    fn test_values_coerced_to_field_kind() {
        let filter = Filter::try_from(wire("age", FilterOperationKind::GreaterThan, Some(json!("30")))).unwrap();
        assert_eq!(filter.condition, FilterCondition::GreaterThan(FilterValue::Integer(30)));

        let filter = Filter::try_from(wire(
            "date",
            FilterOperationKind::LesserThanOrEquals,
            Some(json!("2023-06-30T00:00:00.000Z")),
        ))
        .unwrap();
        assert_eq!(
            filter.condition,
            FilterCondition::LesserThanOrEquals(FilterValue::Date(NaiveDate::from_ymd_opt(2023, 6, 30).unwrap()))
        );

        let err = Filter::try_from(wire("age", FilterOperationKind::Equals, Some(json!("old")))).unwrap_err();
        assert!(matches!(err, ValidationError::ValueType { .. }));
    }

    #[test]
    fn test_between_requires_pair() {
        let ok = Filter::try_from(wire("age", FilterOperationKind::Between, Some(json!([20, 30])))).unwrap();
        assert_eq!(
            ok.condition,
            FilterCondition::Between(FilterValue::Integer(20), FilterValue::Integer(30))
        );

        for bad in [json!([20]), json!([1, 2, 3]), json!(20)] {
            let err = Filter::try_from(wire("age", FilterOperationKind::Between, Some(bad))).unwrap_err();
            assert!(matches!(err, ValidationError::ValueShape { .. }));
        }
    }

    #[test]
    fn test_comparison_requires_scalar() {
        let err = Filter::try_from(wire("age", FilterOperationKind::GreaterThan, Some(json!([1, 2])))).unwrap_err();
        assert!(matches!(err, ValidationError::ValueShape { .. }));

        let err = Filter::try_from(wire("age", FilterOperationKind::Equals, None)).unwrap_err();
        assert!(matches!(err, ValidationError::ValueShape { .. }));
    }

    #[test]
    fn test_null_checks_ignore_value() {
        let filter = Filter::try_from(wire("tags", FilterOperationKind::IsNull, Some(json!("ignored")))).unwrap();
        assert_eq!(filter.condition, FilterCondition::IsNull);
    }

    #[test]
    fn test_field_allow_list_enforced() {
        let err = Filter::try_from(wire("customerName", FilterOperationKind::Equals, Some(json!("x")))).unwrap_err();
        assert!(matches!(err, ValidationError::FieldNotAllowed { .. }));

        let err = Filter::try_from(wire("secret", FilterOperationKind::Equals, Some(json!("x")))).unwrap_err();
        assert_eq!(err, ValidationError::UnknownField("secret".to_string()));
    }

    #[test]
    fn test_unsupported_operations() {
        let err = Filter::try_from(wire("age", FilterOperationKind::Like, Some(json!("3")))).unwrap_err();
        assert!(matches!(err, ValidationError::UnsupportedOperation { .. }));

        let err = Filter::try_from(wire("tags", FilterOperationKind::GreaterThan, Some(json!("a")))).unwrap_err();
        assert!(matches!(err, ValidationError::UnsupportedOperation { .. }));

        let err = Filter::try_from(wire("gender", FilterOperationKind::ArrayHasSome, Some(json!(["Male"])))).unwrap_err();
        assert!(matches!(err, ValidationError::UnsupportedOperation { .. }));
    }

    #[test]
    fn test_wire_round_trip_for_echo() {
        let original = wire("tags", FilterOperationKind::ArrayHasSome, Some(json!(["organic", "eco"])));
        let filter = Filter::try_from(original.clone()).unwrap();
        assert_eq!(QueryFilter::from(&filter), original);
    }

    #[test]
    fn test_unknown_wire_keys_rejected() {
        let result = serde_json::from_value::<QueryFilter>(json!({
            "field": "age",
            "operation": "EQUALS",
            "value": 3,
            "extra": true
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_effective_search_phrase() {
        let request = QueryBuilderRequest::new(0, 10).with_search("   ", vec![SaleField::CustomerName]);
        assert_eq!(request.effective_search_phrase(), None);
        assert!(!request.has_search());

        let request = QueryBuilderRequest::new(0, 10).with_search(" Kumar ", vec![SaleField::CustomerName]);
        assert_eq!(request.effective_search_phrase(), Some("Kumar"));
        assert!(request.has_search());

        let request = QueryBuilderRequest::new(0, 10).with_search("Kumar", vec![]);
        assert!(!request.has_search());
    }

    #[test]
    fn test_validate_allow_lists() {
        let request = QueryBuilderRequest::new(0, 10).sorted_by(SaleField::Age, SortDirection::Desc);
        assert!(request.validate().is_err());

        let request = QueryBuilderRequest::new(0, 10).with_search("x", vec![SaleField::Gender]);
        assert!(request.validate().is_err());

        let request = QueryBuilderRequest::new(0, 10)
            .sorted_by(SaleField::Date, SortDirection::Desc)
            .with_search("x", vec![SaleField::CustomerName, SaleField::PhoneNumber]);
        assert!(request.validate().is_ok());
    }
}
