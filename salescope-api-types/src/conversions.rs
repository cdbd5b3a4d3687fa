//! Conversion from the UI filter object to typed filters

use serde_json::Value;

use crate::domain::SaleFilters;
use crate::enums::FilterOperationKind;
use crate::errors::ValidationError;
use crate::fields::SaleField;
use crate::query::{Filter, FilterCondition, FilterValue};

impl SaleFilters {
    /// Translate into the generic filter list.
    ///
    /// Multi-selects become `IN` (tags become `ARRAY_HAS_SOME`), range bounds
    /// become inclusive comparisons. Empty selections contribute nothing.
    pub fn to_filters(&self) -> Result<Vec<Filter>, ValidationError> {
        let mut filters = Vec::new();

        push_multi_select(&mut filters, SaleField::CustomerRegion, &self.customer_region)?;
        push_multi_select(&mut filters, SaleField::Gender, &self.gender)?;

        if let Some(range) = &self.age_range {
            if let Some(min) = range.min {
                filters.push(Filter::new(
                    SaleField::Age,
                    FilterCondition::GreaterThanOrEquals(FilterValue::Integer(min)),
                )?);
            }
            if let Some(max) = range.max {
                filters.push(Filter::new(
                    SaleField::Age,
                    FilterCondition::LesserThanOrEquals(FilterValue::Integer(max)),
                )?);
            }
        }

        push_multi_select(&mut filters, SaleField::ProductCategory, &self.product_category)?;

        if let Some(tags) = self.tags.as_ref().filter(|tags| !tags.is_empty()) {
            filters.push(Filter::new(SaleField::Tags, FilterCondition::ArrayHasSome(tags.clone()))?);
        }

        push_multi_select(&mut filters, SaleField::PaymentMethod, &self.payment_method)?;

        if let Some(range) = &self.date_range {
            let bounds = [
                (range.from.as_deref(), FilterOperationKind::GreaterThanOrEquals),
                (range.to.as_deref(), FilterOperationKind::LesserThanOrEquals),
            ];
            for (bound, operation) in bounds {
                if let Some(bound) = bound.filter(|b| !b.trim().is_empty()) {
                    let value = Value::String(bound.to_string());
                    let condition = FilterCondition::from_wire(SaleField::Date, operation, Some(&value))?;
                    filters.push(Filter::new(SaleField::Date, condition)?);
                }
            }
        }

        push_multi_select(&mut filters, SaleField::OrderStatus, &self.order_status)?;
        push_multi_select(&mut filters, SaleField::DeliveryType, &self.delivery_type)?;

        Ok(filters)
    }
}

fn push_multi_select(
    filters: &mut Vec<Filter>,
    field: SaleField,
    selected: &Option<Vec<String>>,
) -> Result<(), ValidationError> {
    if let Some(values) = selected.as_ref().filter(|values| !values.is_empty()) {
        let values = values.iter().cloned().map(FilterValue::Text).collect();
        filters.push(Filter::new(field, FilterCondition::In(values))?);
    }
    Ok(())
}
