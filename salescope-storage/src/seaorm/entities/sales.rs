use salescope_api_types::Sale;
use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};

/// One transaction line imported from the sales CSV
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sales")]
pub struct Model {
    /// Transaction ID from the source file
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub customer_id: String,
    pub customer_name: String,
    pub phone_number: String,
    pub gender: String,
    pub age: i32,
    pub customer_region: String,
    pub customer_type: String,

    pub product_id: String,
    pub product_name: String,
    pub brand: String,
    pub product_category: String,

    pub quantity: i32,
    pub price_per_unit: f64,
    pub discount_percentage: f64,
    /// Gross amount before discount
    pub total_amount: f64,
    /// Net amount after discount
    pub final_amount: f64,

    pub date: Date,
    pub payment_method: String,
    pub order_status: String,
    pub delivery_type: String,
    pub store_id: String,
    pub store_location: String,
    pub salesperson_id: String,
    pub employee_name: String,

    pub created_at: ChronoDateTimeUtc,
    pub updated_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::sale_tags::Entity")]
    SaleTags,
}

impl Related<super::sale_tags::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SaleTags.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Convert to the API record, attaching the tags loaded from `sale_tags`
    pub fn into_sale(self, tags: Vec<String>) -> Sale {
        Sale {
            id: self.id,
            customer_id: self.customer_id,
            customer_name: self.customer_name,
            phone_number: self.phone_number,
            gender: self.gender,
            age: self.age,
            customer_region: self.customer_region,
            customer_type: self.customer_type,
            product_id: self.product_id,
            product_name: self.product_name,
            brand: self.brand,
            product_category: self.product_category,
            tags,
            quantity: self.quantity,
            price_per_unit: self.price_per_unit,
            discount_percentage: self.discount_percentage,
            total_amount: self.total_amount,
            final_amount: self.final_amount,
            date: self.date,
            payment_method: self.payment_method,
            order_status: self.order_status,
            delivery_type: self.delivery_type,
            store_id: self.store_id,
            store_location: self.store_location,
            salesperson_id: self.salesperson_id,
            employee_name: self.employee_name,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl From<&Sale> for ActiveModel {
    fn from(sale: &Sale) -> Self {
        Self {
            id: Set(sale.id.clone()),
            customer_id: Set(sale.customer_id.clone()),
            customer_name: Set(sale.customer_name.clone()),
            phone_number: Set(sale.phone_number.clone()),
            gender: Set(sale.gender.clone()),
            age: Set(sale.age),
            customer_region: Set(sale.customer_region.clone()),
            customer_type: Set(sale.customer_type.clone()),
            product_id: Set(sale.product_id.clone()),
            product_name: Set(sale.product_name.clone()),
            brand: Set(sale.brand.clone()),
            product_category: Set(sale.product_category.clone()),
            quantity: Set(sale.quantity),
            price_per_unit: Set(sale.price_per_unit),
            discount_percentage: Set(sale.discount_percentage),
            total_amount: Set(sale.total_amount),
            final_amount: Set(sale.final_amount),
            date: Set(sale.date),
            payment_method: Set(sale.payment_method.clone()),
            order_status: Set(sale.order_status.clone()),
            delivery_type: Set(sale.delivery_type.clone()),
            store_id: Set(sale.store_id.clone()),
            store_location: Set(sale.store_location.clone()),
            salesperson_id: Set(sale.salesperson_id.clone()),
            employee_name: Set(sale.employee_name.clone()),
            created_at: Set(sale.created_at),
            updated_at: Set(sale.updated_at),
        }
    }
}
