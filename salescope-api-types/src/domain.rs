use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Sale record as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: String,

    // Customer
    pub customer_id: String,
    pub customer_name: String,
    pub phone_number: String,
    pub gender: String,
    pub age: i32,
    pub customer_region: String,
    pub customer_type: String,

    // Product
    pub product_id: String,
    pub product_name: String,
    pub brand: String,
    pub product_category: String,
    pub tags: Vec<String>,

    // Amounts
    pub quantity: i32,
    pub price_per_unit: f64,
    pub discount_percentage: f64,
    pub total_amount: f64,
    pub final_amount: f64,

    // Operational
    pub date: NaiveDate,
    pub payment_method: String,
    pub order_status: String,
    pub delivery_type: String,
    pub store_id: String,
    pub store_location: String,
    pub salesperson_id: String,
    pub employee_name: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Inclusive age bounds chosen in the UI
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AgeRange {
    pub min: Option<i64>,
    pub max: Option<i64>,
}

/// Inclusive date bounds chosen in the UI, as `YYYY-MM-DD` or RFC 3339 strings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DateRange {
    pub from: Option<String>,
    pub to: Option<String>,
}

/// Filter object sent by the dashboard UI
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SaleFilters {
    #[serde(default, deserialize_with = "one_or_many")]
    pub customer_region: Option<Vec<String>>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub gender: Option<Vec<String>>,
    pub age_range: Option<AgeRange>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub product_category: Option<Vec<String>>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub tags: Option<Vec<String>>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub payment_method: Option<Vec<String>>,
    pub date_range: Option<DateRange>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub order_status: Option<Vec<String>>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub delivery_type: Option<Vec<String>>,
}

/// Accept a multi-select as a list or as a single string; `""` selects nothing
fn one_or_many<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        None => None,
        Some(OneOrMany::One(value)) if value.trim().is_empty() => Some(Vec::new()),
        Some(OneOrMany::One(value)) => Some(vec![value]),
        Some(OneOrMany::Many(values)) => Some(values),
    })
}

/// Observed age bounds across the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeBounds {
    pub min: i32,
    pub max: i32,
}

impl Default for AgeBounds {
    fn default() -> Self {
        Self { min: 0, max: 100 }
    }
}

/// Values available for the dashboard's filter widgets
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    pub customer_regions: Vec<String>,
    pub genders: Vec<String>,
    pub product_categories: Vec<String>,
    pub payment_methods: Vec<String>,
    pub order_statuses: Vec<String>,
    pub delivery_types: Vec<String>,
    pub tags: Vec<String>,
    pub age_range: AgeBounds,
}

/// Aggregates over the records matching a filter/search predicate
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesStats {
    pub total_units_sold: i64,
    /// Sum of gross amounts
    pub total_amount: f64,
    /// Sum of net amounts
    pub total_revenue: f64,
    pub total_discount: f64,
    pub total_sales_records: u64,
}

impl SalesStats {
    /// Derive the discount total from the gross and net sums
    pub fn from_sums(total_units_sold: i64, total_amount: f64, total_revenue: f64, total_sales_records: u64) -> Self {
        Self {
            total_units_sold,
            total_amount,
            total_revenue,
            total_discount: total_amount - total_revenue,
            total_sales_records,
        }
    }
}
