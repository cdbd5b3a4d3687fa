use salescope_api_types::{
    FieldPurpose, Filter, FilterCondition, FilterValue, QueryBuilderRequest, SaleField, ValidationError,
};
use sea_query::{BinOper, Expr, Func, LikeExpr, Query, SelectStatement, SimpleExpr};
use sea_orm::{Condition, DbBackend, IdenStatic, Value};

use crate::seaorm::entities::{sale_tags, sales};

/// Where a field's values live
enum FieldTarget {
    Column(sales::Column),
    /// Child table `sale_tags`, matched through a subquery on `sale_id`
    Tags,
}

fn field_target(field: SaleField) -> FieldTarget {
    match field {
        SaleField::CustomerName => FieldTarget::Column(sales::Column::CustomerName),
        SaleField::PhoneNumber => FieldTarget::Column(sales::Column::PhoneNumber),
        SaleField::Gender => FieldTarget::Column(sales::Column::Gender),
        SaleField::Age => FieldTarget::Column(sales::Column::Age),
        SaleField::CustomerRegion => FieldTarget::Column(sales::Column::CustomerRegion),
        SaleField::ProductCategory => FieldTarget::Column(sales::Column::ProductCategory),
        SaleField::Tags => FieldTarget::Tags,
        SaleField::Quantity => FieldTarget::Column(sales::Column::Quantity),
        SaleField::FinalAmount => FieldTarget::Column(sales::Column::FinalAmount),
        SaleField::Date => FieldTarget::Column(sales::Column::Date),
        SaleField::PaymentMethod => FieldTarget::Column(sales::Column::PaymentMethod),
        SaleField::OrderStatus => FieldTarget::Column(sales::Column::OrderStatus),
        SaleField::DeliveryType => FieldTarget::Column(sales::Column::DeliveryType),
        SaleField::CreatedAt => FieldTarget::Column(sales::Column::CreatedAt),
    }
}

/// Column used to order by `field`
pub fn sort_column(field: SaleField) -> Result<sales::Column, ValidationError> {
    field.ensure_allowed(FieldPurpose::Sort)?;
    match field_target(field) {
        FieldTarget::Column(column) => Ok(column),
        FieldTarget::Tags => Err(ValidationError::FieldNotAllowed {
            field: field.as_str().to_string(),
            purpose: FieldPurpose::Sort,
        }),
    }
}

/// Escape `%`, `_` and `\` so user input matches literally inside a LIKE pattern
pub fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Build the WHERE condition for a request.
///
/// The search term OR-combines over the searched fields, the filters
/// AND-combine, and the two parts are ANDed. An empty request yields a
/// condition that matches every row. Case-insensitive matching is rendered
/// per backend so both sides of the comparison fold the same way.
pub fn build_condition(request: &QueryBuilderRequest, backend: DbBackend) -> Result<Condition, ValidationError> {
    request.validate()?;

    let predicates = Predicates { backend };
    let mut condition = Condition::all();

    if let Some(phrase) = request.effective_search_phrase() {
        if !request.search_on.is_empty() {
            let mut any = Condition::any();
            for field in &request.search_on {
                any = any.add(predicates.contains_on(*field, phrase));
            }
            condition = condition.add(any);
        }
    }

    for filter in &request.filters {
        condition = condition.add(predicates.filter_expr(filter)?);
    }

    tracing::debug!(
        filters = request.filters.len(),
        search = request.has_search(),
        backend = ?backend,
        "Built sales predicate"
    );

    Ok(condition)
}

/// GLOB pattern matching `text` anywhere, with every cased letter expanded to
/// a class of its single-character case variants (`é` becomes `[éÉ]`)
pub fn glob_contains_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() * 4 + 2);
    pattern.push('*');
    for c in text.chars() {
        if matches!(c, '*' | '?' | '[') {
            pattern.push('[');
            pattern.push(c);
            pattern.push(']');
            continue;
        }

        let variants = case_variants(c);
        if variants.len() > 1 {
            pattern.push('[');
            pattern.extend(variants);
            pattern.push(']');
        } else {
            pattern.push(c);
        }
    }
    pattern.push('*');
    pattern
}

fn case_variants(c: char) -> Vec<char> {
    fn single(mut mapped: impl Iterator<Item = char>) -> Option<char> {
        match (mapped.next(), mapped.next()) {
            (Some(only), None) => Some(only),
            _ => None,
        }
    }

    let mut variants = vec![c];
    for variant in [single(c.to_lowercase()), single(c.to_uppercase())].into_iter().flatten() {
        if !variants.contains(&variant) {
            variants.push(variant);
        }
    }
    variants
}

/// Backend-aware predicate rendering
struct Predicates {
    backend: DbBackend,
}

impl Predicates {
    /// Case-insensitive substring match of `text` against `column`.
    ///
    /// SQLite's `LOWER` and `LIKE` fold ASCII only, so SQLite uses a
    /// case-expanded GLOB. Postgres uses `ILIKE`, whose default escape is `\`.
    fn contains(&self, column: SimpleExpr, text: &str) -> SimpleExpr {
        match self.backend {
            DbBackend::Sqlite => binary(column, "GLOB", glob_contains_pattern(text)),
            DbBackend::Postgres => binary(column, "ILIKE", format!("%{}%", escape_like(text))),
            DbBackend::MySql => Expr::expr(Func::lower(column))
                .like(LikeExpr::new(format!("%{}%", escape_like(&text.to_lowercase()))).escape('\\')),
        }
    }

    fn contains_on(&self, field: SaleField, text: &str) -> SimpleExpr {
        match field_target(field) {
            FieldTarget::Column(column) => self.contains(Expr::col((sales::Entity, column)).into(), text),
            FieldTarget::Tags => {
                let matches_tag = self.contains(Expr::col((sale_tags::Entity, sale_tags::Column::Tag)).into(), text);
                tag_membership(|select| {
                    select.and_where(matches_tag);
                })
            }
        }
    }

    fn column_expr(
        &self,
        column: sales::Column,
        condition: &FilterCondition,
    ) -> Result<SimpleExpr, ValidationError> {
        let col = || Expr::col((sales::Entity, column));

        let expr = match condition {
            FilterCondition::Equals(v) => col().eq(to_value(v)),
            FilterCondition::NotEquals(v) => col().ne(to_value(v)),
            FilterCondition::GreaterThan(v) => col().gt(to_value(v)),
            FilterCondition::LesserThan(v) => col().lt(to_value(v)),
            FilterCondition::GreaterThanOrEquals(v) => col().gte(to_value(v)),
            FilterCondition::LesserThanOrEquals(v) => col().lte(to_value(v)),
            FilterCondition::IsNull => col().is_null(),
            FilterCondition::IsNotNull => col().is_not_null(),
            FilterCondition::Like(text) => self.contains(col().into(), text),
            FilterCondition::NotLike(text) => self.contains(col().into(), text).not(),
            FilterCondition::In(values) if values.is_empty() => match_nothing(),
            FilterCondition::In(values) => col().is_in(values.iter().map(to_value)),
            FilterCondition::NotIn(values) if values.is_empty() => match_everything(),
            FilterCondition::NotIn(values) => col().is_not_in(values.iter().map(to_value)),
            FilterCondition::Between(low, high) => col().between(to_value(low), to_value(high)),
            FilterCondition::ArrayHasSome(_) => {
                return Err(ValidationError::UnsupportedOperation {
                    field: column_name(column),
                    operation: condition.operation(),
                })
            }
        };

        Ok(expr)
    }

    fn tags_expr(&self, filter: &Filter) -> Result<SimpleExpr, ValidationError> {
        let tag_col = || Expr::col((sale_tags::Entity, sale_tags::Column::Tag));
        let tag_texts = |values: &[FilterValue]| -> Vec<Value> { values.iter().map(to_value).collect() };

        let expr = match &filter.condition {
            FilterCondition::Equals(v) => tag_membership(|select| {
                select.and_where(tag_col().eq(to_value(v)));
            }),
            FilterCondition::NotEquals(v) => tag_membership(|select| {
                select.and_where(tag_col().eq(to_value(v)));
            })
            .not(),
            FilterCondition::In(values) if values.is_empty() => match_nothing(),
            FilterCondition::In(values) => tag_membership(|select| {
                select.and_where(tag_col().is_in(tag_texts(values)));
            }),
            FilterCondition::ArrayHasSome(tags) if tags.is_empty() => match_nothing(),
            FilterCondition::ArrayHasSome(tags) => tag_membership(|select| {
                select.and_where(tag_col().is_in(tags.iter().cloned()));
            }),
            FilterCondition::NotIn(values) if values.is_empty() => match_everything(),
            FilterCondition::NotIn(values) => tag_membership(|select| {
                select.and_where(tag_col().is_in(tag_texts(values)));
            })
            .not(),
            FilterCondition::Like(text) => self.contains_on(SaleField::Tags, text),
            FilterCondition::NotLike(text) => self.contains_on(SaleField::Tags, text).not(),
            FilterCondition::IsNull => tag_membership(|_| {}).not(),
            FilterCondition::IsNotNull => tag_membership(|_| {}),
            FilterCondition::GreaterThan(_)
            | FilterCondition::LesserThan(_)
            | FilterCondition::GreaterThanOrEquals(_)
            | FilterCondition::LesserThanOrEquals(_)
            | FilterCondition::Between(_, _) => {
                return Err(ValidationError::UnsupportedOperation {
                    field: filter.field.as_str().to_string(),
                    operation: filter.condition.operation(),
                })
            }
        };

        Ok(expr)
    }
}

fn binary(left: SimpleExpr, operator: &'static str, pattern: String) -> SimpleExpr {
    SimpleExpr::Binary(Box::new(left), BinOper::Custom(operator), Box::new(pattern.into()))
}

/// `sales.id IN (SELECT sale_id FROM sale_tags WHERE ...)`
fn tag_membership(restrict: impl FnOnce(&mut SelectStatement)) -> SimpleExpr {
    let mut select = Query::select();
    select
        .column((sale_tags::Entity, sale_tags::Column::SaleId))
        .from(sale_tags::Entity);
    restrict(&mut select);

    Expr::col((sales::Entity, sales::Column::Id)).in_subquery(select)
}

fn match_nothing() -> SimpleExpr {
    Expr::cust("1 = 0")
}

fn match_everything() -> SimpleExpr {
    Expr::cust("1 = 1")
}

fn column_name(column: sales::Column) -> String {
    column.as_str().to_string()
}

fn to_value(value: &FilterValue) -> Value {
    match value {
        FilterValue::Text(s) => s.clone().into(),
        FilterValue::Integer(i) => (*i).into(),
        FilterValue::Float(f) => (*f).into(),
        FilterValue::Date(d) => (*d).into(),
        FilterValue::Timestamp(t) => (*t).into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use salescope_api_types::FilterOperationKind;
    use sea_orm::{EntityTrait, QueryFilter, QueryTrait};

    fn sql_on(backend: DbBackend, request: &QueryBuilderRequest) -> String {
        let condition = build_condition(request, backend).unwrap();
        sales::Entity::find().filter(condition).build(backend).to_string()
    }

    fn sql_for(request: &QueryBuilderRequest) -> String {
        sql_on(DbBackend::Sqlite, request)
    }

    fn filter(field: SaleField, condition: FilterCondition) -> Filter {
        Filter::new(field, condition).unwrap()
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like("plain"), "plain");
    }

    #[test]
    fn test_glob_pattern_expands_case_variants() {
        assert_eq!(glob_contains_pattern("Ku1"), "*[Kk][uU]1*");
        assert_eq!(glob_contains_pattern("élo"), "*[éÉ][lL][oO]*");
        assert_eq!(glob_contains_pattern("Ø"), "*[Øø]*");
        assert_eq!(glob_contains_pattern("a*b?[c"), "*[aA][*][bB][?][[][cC]*");
        // ß upper-cases to two letters, so only the single-letter form is kept
        assert_eq!(glob_contains_pattern("ß"), "*ß*");
    }

    #[test]
    fn test_empty_request_has_no_restriction() {
        let sql = sql_for(&QueryBuilderRequest::default());
        assert!(!sql.contains("WHERE") || sql.ends_with("WHERE TRUE"), "{sql}");
        assert!(!sql.contains("GLOB"), "{sql}");
    }

    #[test]
    fn test_whitespace_phrase_is_absent() {
        let request = QueryBuilderRequest::default().with_search("   ", vec![SaleField::CustomerName]);
        let sql = sql_for(&request);
        assert!(!sql.contains("GLOB"), "{sql}");
    }

    #[test]
    fn test_search_is_case_folded_and_or_combined() {
        let request = QueryBuilderRequest::default()
            .with_search("KuMar", vec![SaleField::CustomerName, SaleField::PhoneNumber]);
        let sql = sql_for(&request);
        assert!(
            sql.contains("\"sales\".\"customer_name\" GLOB '*[Kk][uU][Mm][aA][rR]*'"),
            "{sql}"
        );
        assert!(sql.contains("\"sales\".\"phone_number\" GLOB"), "{sql}");
        assert!(sql.contains(" OR "), "{sql}");
    }

    #[test]
    fn test_postgres_search_uses_ilike() {
        let request = QueryBuilderRequest::default().with_search("100%", vec![SaleField::CustomerName]);
        let sql = sql_on(DbBackend::Postgres, &request);
        assert!(sql.contains("\"sales\".\"customer_name\" ILIKE "), "{sql}");
        assert!(sql.contains("%100\\"), "{sql}");
        assert!(!sql.contains("GLOB"), "{sql}");
    }

    #[test]
    fn test_filters_and_combined() {
        let request = QueryBuilderRequest::default().with_filters([
            filter(SaleField::Gender, FilterCondition::Equals(FilterValue::Text("Female".to_string()))),
            filter(SaleField::Age, FilterCondition::GreaterThanOrEquals(FilterValue::Integer(30))),
        ]);
        let sql = sql_for(&request);
        assert!(sql.contains("\"sales\".\"gender\" = 'Female'"), "{sql}");
        assert!(sql.contains(" AND \"sales\".\"age\" >= 30"), "{sql}");
    }

    #[test]
    fn test_empty_in_matches_nothing() {
        let request = QueryBuilderRequest::default()
            .with_filter(filter(SaleField::Gender, FilterCondition::In(vec![])))
            .with_filter(filter(SaleField::CustomerRegion, FilterCondition::NotIn(vec![])));
        let sql = sql_for(&request);
        assert!(sql.contains("1 = 0"), "{sql}");
        assert!(sql.contains("1 = 1"), "{sql}");
    }

    #[test]
    fn test_tags_use_subquery() {
        let request = QueryBuilderRequest::default().with_filter(filter(
            SaleField::Tags,
            FilterCondition::ArrayHasSome(vec!["organic".to_string()]),
        ));
        let sql = sql_for(&request);
        assert!(
            sql.contains("\"sales\".\"id\" IN (SELECT \"sale_tags\".\"sale_id\" FROM \"sale_tags\""),
            "{sql}"
        );
        assert!(sql.contains("\"sale_tags\".\"tag\" IN ('organic')"), "{sql}");
    }

    #[test]
    fn test_between_on_tags_rejected() {
        let tags_between = Filter {
            field: SaleField::Tags,
            condition: FilterCondition::Between(
                FilterValue::Text("a".to_string()),
                FilterValue::Text("b".to_string()),
            ),
        };
        let request = QueryBuilderRequest::default().with_filter(tags_between);
        let err = build_condition(&request, DbBackend::Sqlite).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::UnsupportedOperation {
                operation: FilterOperationKind::Between,
                ..
            }
        ));
    }

    #[test]
    fn test_sort_column() {
        assert!(matches!(sort_column(SaleField::Date), Ok(sales::Column::Date)));
        assert!(matches!(sort_column(SaleField::FinalAmount), Ok(sales::Column::FinalAmount)));
        assert!(sort_column(SaleField::Gender).is_err());
        assert!(sort_column(SaleField::Tags).is_err());
    }

    #[test]
    fn test_search_on_disallowed_field_rejected() {
        let request = QueryBuilderRequest::default().with_search("x", vec![SaleField::Gender]);
        assert!(matches!(
            build_condition(&request, DbBackend::Sqlite).unwrap_err(),
            ValidationError::FieldNotAllowed { .. }
        ));
    }
}
