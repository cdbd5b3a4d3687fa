//! Builders for sale fixtures

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use salescope_api_types::Sale;

/// Builder pattern for creating test sales
pub struct SaleBuilder {
    sale: Sale,
}

impl SaleBuilder {
    pub fn new() -> Self {
        let created_at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().unwrap_or_else(Utc::now);
        Self {
            sale: Sale {
                id: uuid::Uuid::new_v4().to_string(),
                customer_id: "CUST-0001".to_string(),
                customer_name: "Test Customer".to_string(),
                phone_number: "9000000000".to_string(),
                gender: "Female".to_string(),
                age: 30,
                customer_region: "North".to_string(),
                customer_type: "Regular".to_string(),
                product_id: "PROD-0001".to_string(),
                product_name: "Cotton Shirt".to_string(),
                brand: "Acme".to_string(),
                product_category: "Clothing".to_string(),
                tags: Vec::new(),
                quantity: 1,
                price_per_unit: 100.0,
                discount_percentage: 0.0,
                total_amount: 100.0,
                final_amount: 100.0,
                date: NaiveDate::from_ymd_opt(2023, 6, 1).unwrap_or_default(),
                payment_method: "UPI".to_string(),
                order_status: "Completed".to_string(),
                delivery_type: "Standard".to_string(),
                store_id: "ST-001".to_string(),
                store_location: "Mumbai".to_string(),
                salesperson_id: "EMP-001".to_string(),
                employee_name: "Test Employee".to_string(),
                created_at,
                updated_at: created_at,
            },
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.sale.id = id.into();
        self
    }

    pub fn with_customer_name(mut self, name: impl Into<String>) -> Self {
        self.sale.customer_name = name.into();
        self
    }

    pub fn with_phone_number(mut self, phone: impl Into<String>) -> Self {
        self.sale.phone_number = phone.into();
        self
    }

    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.sale.gender = gender.into();
        self
    }

    pub fn with_age(mut self, age: i32) -> Self {
        self.sale.age = age;
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.sale.customer_region = region.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.sale.product_category = category.into();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sale.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Set quantity plus gross and net amounts
    pub fn with_amounts(mut self, quantity: i32, total_amount: f64, final_amount: f64) -> Self {
        self.sale.quantity = quantity;
        self.sale.total_amount = total_amount;
        self.sale.final_amount = final_amount;
        if quantity > 0 {
            self.sale.price_per_unit = total_amount / quantity as f64;
        }
        if total_amount > 0.0 {
            self.sale.discount_percentage = (1.0 - final_amount / total_amount) * 100.0;
        }
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.sale.date = date;
        self
    }

    pub fn with_payment_method(mut self, method: impl Into<String>) -> Self {
        self.sale.payment_method = method.into();
        self
    }

    pub fn with_order_status(mut self, status: impl Into<String>) -> Self {
        self.sale.order_status = status.into();
        self
    }

    pub fn with_delivery_type(mut self, delivery: impl Into<String>) -> Self {
        self.sale.delivery_type = delivery.into();
        self
    }

    pub fn build(self) -> Sale {
        self.sale
    }
}

impl Default for SaleBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Deterministic bulk fixtures
pub mod factories {
    use super::*;

    const REGIONS: [&str; 5] = ["North", "South", "East", "West", "Central"];
    const GENDERS: [&str; 2] = ["Female", "Male"];
    const CATEGORIES: [&str; 3] = ["Clothing", "Electronics", "Beauty"];
    const PAYMENT_METHODS: [&str; 4] = ["UPI", "Credit Card", "Cash", "Wallet"];
    const STATUSES: [&str; 3] = ["Completed", "Pending", "Cancelled"];
    const DELIVERY_TYPES: [&str; 2] = ["Standard", "Express"];
    const TAGS: [&str; 6] = ["organic", "fashion", "gadgets", "skincare", "wireless", "casual"];
    const NAMES: [&str; 4] = ["Neha Kumar", "Arjun Mehta", "Priya Shah", "Ravi Iyer"];

    /// `count` sales spread over every filter dimension, ids `TXN-00000`..
    pub fn generated_sales(count: usize) -> Vec<Sale> {
        let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or_default();

        (0..count)
            .map(|i| {
                let quantity = (i % 10) as i32 + 1;
                let total = quantity as f64 * 250.0;
                let tags = [TAGS[i % TAGS.len()], TAGS[(i / 2 + 1) % TAGS.len()]];

                SaleBuilder::new()
                    .with_id(format!("TXN-{i:05}"))
                    .with_customer_name(format!("{} {}", NAMES[i % NAMES.len()], i))
                    .with_phone_number(format!("98{:08}", i))
                    .with_gender(GENDERS[i % GENDERS.len()])
                    .with_age(18 + (i % 50) as i32)
                    .with_region(REGIONS[i % REGIONS.len()])
                    .with_category(CATEGORIES[i % CATEGORIES.len()])
                    .with_tags(if tags[0] == tags[1] { vec![tags[0]] } else { tags.to_vec() })
                    .with_amounts(quantity, total, total * 0.9)
                    .with_date(start + Duration::days((i * 7 % 365) as i64))
                    .with_payment_method(PAYMENT_METHODS[i % PAYMENT_METHODS.len()])
                    .with_order_status(STATUSES[i % STATUSES.len()])
                    .with_delivery_type(DELIVERY_TYPES[i % DELIVERY_TYPES.len()])
                    .build()
            })
            .collect()
    }
}
